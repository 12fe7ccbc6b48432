//! # dfm
//!
//! A parser and printer for Delphi form files (`.dfm`) in text format.
//!
//! ## What is a DFM?
//!
//! Delphi stores the design of every form as a tree of components: the form
//! itself, the panels and buttons on it, their fonts, pictures and event
//! bindings. In text form a DFM looks like this:
//!
//! ```text
//! object Form1: TForm1
//!   Caption = 'Hello'
//!   Anchors = [akLeft, akTop]
//!   object Button1: TButton
//!     Left = 8
//!     OnClick = Button1Click
//!   end
//! end
//! ```
//!
//! ## Key Features
//!
//! - **Faithful round trip**: printing follows the Delphi IDE's layout, so a
//!   parsed and re-printed form diffs cleanly against the file it came from
//! - **Owned tree**: [`Object`], [`Property`] and [`PropertyValue`] are plain
//!   data that can be edited before printing
//! - **Positioned errors**: every parse error carries line and column
//! - **Encodings**: UTF-8 with or without byte order mark, and Windows-1252
//!   for forms saved by older Delphi versions
//! - **Serde**: the tree derives `Serialize` and `Deserialize`
//!
//! ## Quick Start
//!
//! ```rust
//! use dfm::{from_str, to_string, PropertyValue};
//!
//! let code = "object Form1: TForm1\r\n  Caption = 'Hello'\r\nend\r\n";
//!
//! let mut form = from_str(code).unwrap();
//! assert_eq!(form.type_name, "TForm1");
//! assert_eq!(form.get("Caption").and_then(PropertyValue::as_str), Some("Hello"));
//!
//! form.set("Caption", "Goodbye");
//! assert_eq!(
//!     to_string(&form),
//!     "object Form1: TForm1\r\n  Caption = 'Goodbye'\r\nend\r\n"
//! );
//! ```
//!
//! ### Reading Files
//!
//! Files should be read as bytes and handed to [`from_slice`] or
//! [`from_reader`], which detect the byte order mark, fall back to
//! Windows-1252 for non-UTF-8 input and reject binary DFMs:
//!
//! ```rust
//! use dfm::{from_slice, Error};
//!
//! let form = from_slice(b"object F: TF\r\n  Caption = '\xA9 2024'\r\nend").unwrap();
//! assert_eq!(form.get("Caption").and_then(|v| v.as_str()), Some("\u{a9} 2024"));
//!
//! assert_eq!(from_slice(b"\xFF\x0A\x00").unwrap_err(), Error::BinaryFormat);
//! ```
//!
//! ### Writing Files
//!
//! [`to_vec`] and [`to_writer`] produce the bytes to save. Trees containing any
//! non-ASCII text get a UTF-8 byte order mark so Delphi reads them as UTF-8;
//! [`to_string`] never includes it.
//!
//! ```rust
//! use dfm::{Object, Property};
//!
//! let ascii = Object::new("F", "TF").with_property(Property::new("Caption", "Hi"));
//! assert!(!dfm::to_vec(&ascii).starts_with(&dfm::printer::UTF8_BOM));
//!
//! let umlaut = Object::new("F", "TF").with_property(Property::new("Caption", "Gr\u{fc}\u{df}e"));
//! assert!(dfm::to_vec(&umlaut).starts_with(&dfm::printer::UTF8_BOM));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: `debug` for each parse and
//! print, `trace` per nested object and `warn` when lenient parsing recovers
//! from truncated input. No logger is installed.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Printing cannot fail and never panics
//! - Parsing stops at the first error and returns it with its position

pub mod ansi;
pub mod error;
pub mod macros;
pub mod object;
pub mod options;
pub mod parser;
pub mod printer;
pub mod token;
pub mod tokenizer;
pub mod value;

pub use error::{Error, Result};
pub use object::{Object, ObjectKind, Property};
pub use options::{ParseOptions, PrintOptions};
pub use parser::Parser;
pub use printer::Printer;
pub use value::{Item, PropertyValue};

use log::{debug, warn};
use std::io;

/// Parse DFM code from text.
///
/// A leading byte order mark (U+FEFF) is skipped. Only the first object is
/// read; anything after its `end` is ignored.
///
/// # Examples
///
/// ```rust
/// use dfm::from_str;
///
/// let obj = from_str("object TMenuItem\nend").unwrap();
/// assert!(obj.is_anonymous());
/// assert_eq!(obj.type_name, "TMenuItem");
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid DFM code. Error messages include
/// line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Object> {
    from_str_with_options(s, ParseOptions::default())
}

/// Parse DFM code from text with custom options.
///
/// # Examples
///
/// ```rust
/// use dfm::{from_str_with_options, Error, ParseOptions};
///
/// let result = from_str_with_options("object A: T\n  Data = {ABC}\nend", ParseOptions::strict());
/// assert!(matches!(result, Err(Error::MalformedLiteral { .. })));
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid DFM code under `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: ParseOptions) -> Result<Object> {
    let s = s.strip_prefix('\u{FEFF}').unwrap_or(s);
    debug!("parsing {} bytes of DFM code (strict: {})", s.len(), options.strict);
    let obj = Parser::with_options(s, options).parse()?;
    debug!(
        "parsed {} {:?} of type {} with {} properties",
        obj.kind,
        obj.name,
        obj.type_name,
        obj.properties.len()
    );
    Ok(obj)
}

/// Parse DFM code from raw file contents.
///
/// # Examples
///
/// ```rust
/// use dfm::from_slice;
///
/// let obj = from_slice(b"\xEF\xBB\xBFobject A: TA\r\nend\r\n").unwrap();
/// assert_eq!(obj.name, "A");
/// ```
///
/// # Errors
///
/// Returns [`Error::BinaryFormat`] if the first byte is 0xFF, or any parse
/// error of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Object> {
    from_slice_with_options(v, ParseOptions::default())
}

/// Parse DFM code from raw file contents with custom options.
///
/// The binary signature is checked before anything else. A UTF-8 byte order
/// mark is stripped. Input that is not valid UTF-8 is decoded as Windows-1252.
///
/// # Errors
///
/// Returns [`Error::BinaryFormat`] if the first byte is 0xFF, or any parse
/// error of [`from_str_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_options(v: &[u8], options: ParseOptions) -> Result<Object> {
    if v.first() == Some(&0xFF) {
        return Err(Error::BinaryFormat);
    }
    let v = v.strip_prefix(&printer::UTF8_BOM).unwrap_or(v);
    match std::str::from_utf8(v) {
        Ok(s) => from_str_with_options(s, options),
        Err(e) => {
            warn!("input is not UTF-8 ({}), decoding it as Windows-1252", e);
            from_str_with_options(&ansi::decode_windows_1252(v), options)
        }
    }
}

/// Parse DFM code from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use dfm::from_reader;
/// use std::io::Cursor;
///
/// let obj = from_reader(Cursor::new(b"object A: TA\r\nend")).unwrap();
/// assert_eq!(obj.type_name, "TA");
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the contents are not valid DFM code.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Object>
where
    R: io::Read,
{
    from_reader_with_options(reader, ParseOptions::default())
}

/// Parse DFM code from an I/O stream with custom options.
///
/// # Errors
///
/// Returns an error if reading fails or the contents are not valid DFM code.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R>(mut reader: R, options: ParseOptions) -> Result<Object>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_slice_with_options(&bytes, options)
}

/// Print an object as DFM code, without byte order mark.
///
/// Any tree the parser can produce prints back to code that parses to an
/// equal tree. A tree that puts an [`PropertyValue::Object`] inside a set or
/// tuple still prints, but the output is not valid DFM.
///
/// # Examples
///
/// ```rust
/// use dfm::{to_string, Object};
///
/// assert_eq!(to_string(&Object::new("", "TMenuItem")), "object TMenuItem\r\nend\r\n");
/// ```
#[must_use]
pub fn to_string(obj: &Object) -> String {
    to_string_with_options(obj, PrintOptions::default())
}

/// Print an object as DFM code with custom layout options.
///
/// # Examples
///
/// ```rust
/// use dfm::{to_string_with_options, Object, PrintOptions, Property};
///
/// let obj = Object::new("A", "TA").with_property(Property::new("Tag", 1));
/// let options = PrintOptions::new().with_indent(4);
/// assert_eq!(
///     to_string_with_options(&obj, options),
///     "object A: TA\r\n    Tag = 1\r\nend\r\n"
/// );
/// ```
#[must_use]
pub fn to_string_with_options(obj: &Object, options: PrintOptions) -> String {
    debug!("printing {} {:?} of type {}", obj.kind, obj.name, obj.type_name);
    let mut printer = Printer::new(options);
    printer.print_object(obj);
    let output = printer.into_inner();
    debug!("printed {} bytes of DFM code", output.len());
    output
}

/// Print an object as the bytes of a DFM file.
///
/// The output starts with a UTF-8 byte order mark if any name, identifier or
/// string in the tree contains a non-ASCII character.
#[must_use]
pub fn to_vec(obj: &Object) -> Vec<u8> {
    to_vec_with_options(obj, PrintOptions::default())
}

/// Print an object as the bytes of a DFM file with custom layout options.
#[must_use]
pub fn to_vec_with_options(obj: &Object, options: PrintOptions) -> Vec<u8> {
    let text = to_string_with_options(obj, options);
    if obj.is_ascii() {
        return text.into_bytes();
    }
    let mut bytes = Vec::with_capacity(printer::UTF8_BOM.len() + text.len());
    bytes.extend_from_slice(&printer::UTF8_BOM);
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Write an object as a DFM file to an I/O stream.
///
/// # Examples
///
/// ```rust
/// use dfm::{to_writer, Object};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Object::new("A", "TA")).unwrap();
/// assert_eq!(buffer, b"object A: TA\r\nend\r\n");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, obj: &Object) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, obj, PrintOptions::default())
}

/// Write an object as a DFM file to an I/O stream with custom layout options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, obj: &Object, options: PrintOptions) -> Result<()>
where
    W: io::Write,
{
    writer.write_all(&to_vec_with_options(obj, options))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_is_skipped() {
        let obj = from_str("\u{FEFF}object A: TA end").unwrap();
        assert_eq!(obj.name, "A");
    }

    #[test]
    fn test_binary_signature_in_bytes() {
        assert_eq!(from_slice(&[0xFF]).unwrap_err(), Error::BinaryFormat);
        assert_eq!(from_slice(&[0xFF, b'o']).unwrap_err(), Error::BinaryFormat);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let obj = from_slice(b"object A: TA\r\n  S = '\x80\xE4'\r\nend").unwrap();
        assert_eq!(obj.get("S").and_then(PropertyValue::as_str), Some("\u{20ac}\u{e4}"));
    }

    #[test]
    fn test_to_vec_bom() {
        let obj = Object::new("A", "TA");
        assert_eq!(to_vec(&obj), to_string(&obj).into_bytes());

        let obj = obj.with_property(Property::new("S", "\u{e4}"));
        let bytes = to_vec(&obj);
        assert_eq!(&bytes[..3], &printer::UTF8_BOM);
        assert_eq!(&bytes[3..], to_string(&obj).as_bytes());
        assert_eq!(obj.to_bytes(), bytes);
    }

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_error() {
        let err = to_writer(FailingWriter, &Object::new("A", "TA")).unwrap_err();
        assert!(matches!(err, Error::Io(msg) if msg.contains("disk full")));
    }
}
