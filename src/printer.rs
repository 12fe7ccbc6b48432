//! DFM printing.
//!
//! The [`Printer`] turns an [`Object`] tree back into DFM code the way the
//! Delphi IDE writes it: CRLF line endings, two spaces of indentation per
//! level, floats with 18 decimals, long strings wrapped at 64 characters and
//! byte blocks in rows of 32 hex digits.
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use dfm::{Object, Property};
//!
//! let obj = Object::new("Form1", "TForm1").with_property(Property::new("Caption", "It's"));
//! assert_eq!(
//!     dfm::to_string(&obj),
//!     "object Form1: TForm1\r\n  Caption = 'It''s'\r\nend\r\n"
//! );
//! ```
//!
//! Printing cannot fail. Every [`PropertyValue`] variant has a printed form,
//! and NaN or infinite floats, which DFM files cannot hold, print as `0`.

use crate::object::{Object, Property};
use crate::options::PrintOptions;
use crate::value::PropertyValue;

/// The UTF-8 byte order mark written in front of non-ASCII output.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Delphi always writes this many digits after the decimal point.
const FLOAT_DECIMALS: usize = 18;

/// Magnitudes from here on are written in `E` notation.
const SCIENTIFIC_THRESHOLD: f64 = 1e16;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Writes DFM code into an owned buffer.
pub struct Printer {
    output: String,
    options: PrintOptions,
    indent_level: usize,
}

impl Printer {
    pub fn new(options: PrintOptions) -> Self {
        Printer {
            output: String::with_capacity(1024),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_indent(&mut self) {
        let width = self.options.indent * self.indent_level;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn newline(&mut self) {
        self.output.push_str("\r\n");
        self.write_indent();
    }

    /// Prints `obj` and its children as a block of lines, indented at the
    /// current level and ending in CRLF.
    pub fn print_object(&mut self, obj: &Object) {
        self.write_indent();
        self.write_object(obj);
        self.output.push_str("\r\n");
    }

    /// Header, body and `end`, without leading indent or trailing newline.
    fn write_object(&mut self, obj: &Object) {
        self.output.push_str(obj.kind.keyword());
        self.output.push(' ');
        if !obj.is_anonymous() {
            self.output.push_str(&obj.name);
            self.output.push_str(": ");
        }
        self.output.push_str(&obj.type_name);
        if let Some(index) = obj.index {
            self.output.push_str(" [");
            self.output.push_str(&index.to_string());
            self.output.push(']');
        }
        self.output.push_str("\r\n");

        self.indent_level += 1;
        for property in &obj.properties {
            self.print_property(property);
        }
        self.indent_level -= 1;

        self.write_indent();
        self.output.push_str("end");
    }

    fn print_property(&mut self, property: &Property) {
        // Child objects are written as blocks; the property name is the
        // child's own name.
        if let PropertyValue::Object(child) = &property.value {
            self.print_object(child);
            return;
        }
        self.write_indent();
        self.output.push_str(&property.name);
        self.output.push_str(" = ");
        self.print_value(&property.value);
        self.output.push_str("\r\n");
    }

    /// Prints a value the way it follows `Name = `. Multi-line values indent
    /// their continuation lines one level deeper than the current level.
    ///
    /// A [`PropertyValue::Object`] prints as an object block wherever it
    /// sits. Only a property value can hold one in parsed text: inside a set
    /// or tuple the block is printed all the same, but the result does not
    /// parse back.
    pub fn print_value(&mut self, value: &PropertyValue) {
        match value {
            PropertyValue::Int(i) => self.output.push_str(&i.to_string()),
            PropertyValue::Float(f) => self.output.push_str(&format_float(*f)),
            PropertyValue::Bool(true) => self.output.push_str("True"),
            PropertyValue::Bool(false) => self.output.push_str("False"),
            PropertyValue::String(s) => self.print_string(s),
            PropertyValue::Identifier(id) => self.output.push_str(id),
            PropertyValue::Set(elements) => {
                self.output.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.print_value(element);
                }
                self.output.push(']');
            }
            PropertyValue::Tuple(elements) => {
                self.output.push('(');
                self.indent_level += 1;
                for element in elements {
                    self.newline();
                    self.print_value(element);
                }
                self.indent_level -= 1;
                self.output.push(')');
            }
            PropertyValue::Bytes(bytes) => self.print_bytes(bytes),
            PropertyValue::Items(items) => {
                self.output.push('<');
                self.indent_level += 1;
                for item in items {
                    self.newline();
                    self.output.push_str("item\r\n");
                    self.indent_level += 1;
                    for property in item {
                        self.print_property(property);
                    }
                    self.indent_level -= 1;
                    self.write_indent();
                    self.output.push_str("end");
                }
                self.indent_level -= 1;
                self.output.push('>');
            }
            PropertyValue::Object(obj) => self.write_object(obj),
        }
    }

    fn print_string(&mut self, s: &str) {
        if s.is_empty() {
            self.output.push_str("''");
            return;
        }

        let max_line_length = self.options.max_line_length.max(1);
        let one_line = s.chars().count() <= max_line_length;
        if !one_line {
            self.indent_level += 1;
            self.newline();
        }

        let mut quoted = false;
        let mut line_length = 0;
        for ch in s.chars() {
            if line_length >= max_line_length {
                if quoted {
                    self.output.push('\'');
                    quoted = false;
                }
                self.output.push_str(" +");
                self.newline();
                line_length = 0;
            }

            if (' '..='~').contains(&ch) {
                if !quoted {
                    self.output.push('\'');
                    quoted = true;
                }
                if ch == '\'' {
                    self.output.push_str("''");
                } else {
                    self.output.push(ch);
                }
            } else {
                if quoted {
                    self.output.push('\'');
                    quoted = false;
                }
                self.output.push('#');
                self.output.push_str(&u32::from(ch).to_string());
            }
            line_length += 1;
        }
        if quoted {
            self.output.push('\'');
        }

        if !one_line {
            self.indent_level -= 1;
        }
    }

    fn print_bytes(&mut self, bytes: &[u8]) {
        let per_line = self.options.bytes_per_line.max(1);
        self.output.push('{');
        self.indent_level += 1;
        self.newline();
        for (row, chunk) in bytes.chunks(per_line).enumerate() {
            if row > 0 {
                self.newline();
            }
            for &b in chunk {
                self.output.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
                self.output.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
            }
        }
        self.indent_level -= 1;
        self.output.push('}');
    }
}

/// Formats a float the way Delphi writes it to a DFM.
///
/// The shortest representation that reads back to the same `f64` supplies the
/// digits. Below 1e16 in magnitude it is written in fixed point with exactly
/// 18 decimals, padding with zeros or cutting off further digits. From 1e16 on
/// it is written as `<mantissa>E<exponent>`.
#[must_use]
pub fn format_float(f: f64) -> String {
    let f = if f.is_finite() { f } else { 0.0 };

    if f.abs() >= SCIENTIFIC_THRESHOLD {
        return format!("{:e}", f).replacen('e', "E", 1);
    }

    let mut s = f.to_string();
    match s.find('.') {
        None => {
            s.push('.');
            s.push_str(&"0".repeat(FLOAT_DECIMALS));
        }
        Some(dot) => {
            let decimals = s.len() - dot - 1;
            if decimals > FLOAT_DECIMALS {
                s.truncate(dot + 1 + FLOAT_DECIMALS);
            } else {
                s.push_str(&"0".repeat(FLOAT_DECIMALS - decimals));
            }
        }
    }
    s
}

pub(crate) fn value_to_string(value: &PropertyValue) -> String {
    let mut printer = Printer::new(PrintOptions::default());
    printer.print_value(value);
    printer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;
    use pretty_assertions::assert_eq;

    fn print(obj: &Object) -> String {
        let mut printer = Printer::new(PrintOptions::default());
        printer.print_object(obj);
        printer.into_inner()
    }

    fn prop(name: &str, value: impl Into<PropertyValue>) -> Property {
        Property::new(name, value)
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.000000000000000000");
        assert_eq!(format_float(-123.1875), "-123.187500000000000000");
        assert_eq!(format_float(39043.36641510417), "39043.366415104170000000");
        assert_eq!(format_float(1.000000040918479e35), "1.000000040918479E35");
        assert_eq!(format_float(1e15), "1000000000000000.000000000000000000");
        assert_eq!(format_float(1e16), "1E16");
        assert_eq!(format_float(-1e16), "-1E16");
        assert_eq!(format_float(f64::NAN), "0.000000000000000000");
        assert_eq!(format_float(f64::INFINITY), "0.000000000000000000");
        assert_eq!(format_float(f64::NEG_INFINITY), "0.000000000000000000");
    }

    #[test]
    fn test_format_float_truncates_extra_decimals() {
        assert_eq!(format_float(1e-20), "0.000000000000000000");
        assert_eq!(format_float(1.5e-17), "0.000000000000000015");
    }

    #[test]
    fn test_string_runs() {
        assert_eq!(value_to_string(&PropertyValue::from("")), "''");
        assert_eq!(value_to_string(&PropertyValue::from("string")), "'string'");
        assert_eq!(
            value_to_string(&PropertyValue::from("The 'Laser'")),
            "'The ''Laser'''"
        );
        assert_eq!(value_to_string(&PropertyValue::from("\t\r\n")), "#9#13#10");
        assert_eq!(
            value_to_string(&PropertyValue::from("Gr\u{fc}\u{df}e!")),
            "'Gr'#252#223'e!'"
        );
    }

    #[test]
    fn test_narrow_line_length() {
        let mut printer = Printer::new(PrintOptions::new().with_max_line_length(3));
        printer.print_value(&PropertyValue::from("abcdefg"));
        assert_eq!(printer.into_inner(), "\r\n  'abc' +\r\n  'def' +\r\n  'g'");
    }

    #[test]
    fn test_bytes_rows() {
        let mut printer = Printer::new(PrintOptions::new().with_bytes_per_line(2));
        printer.print_value(&PropertyValue::Bytes(vec![0x01, 0x23, 0x45, 0x67, 0x89]));
        assert_eq!(printer.into_inner(), "{\r\n  0123\r\n  4567\r\n  89}");
    }

    #[test]
    fn test_custom_indent() {
        let obj = Object::new("A", "TA")
            .with_property(Property::object(
                Object::new("B", "TB").with_property(prop("X", 1)),
            ));
        let mut printer = Printer::new(PrintOptions::new().with_indent(4));
        printer.print_object(&obj);
        assert_eq!(
            printer.into_inner(),
            "object A: TA\r\n    object B: TB\r\n        X = 1\r\n    end\r\nend\r\n"
        );
    }

    #[test]
    fn test_object_value_display() {
        let value = PropertyValue::from(Object::new("", "TMenuItem").with_property(prop("Tag", 1)));
        assert_eq!(value.to_string(), "object TMenuItem\r\n  Tag = 1\r\nend");
    }

    #[test]
    fn test_print_dfm() {
        let long_string = "\n\t\t\t\tA long string with four tabs at the start of each line.\n\t\t\t\tThe string starts with a line break and ends with a line break,\n\t\t\t\tfollowed by some more tabs.\n\t\t\t";
        let obj = Object {
            name: "Dialog".into(),
            type_name: "TDialog".into(),
            kind: ObjectKind::Plain,
            index: None,
            properties: vec![
                Property::object(Object::new("", "TSubObject").with_kind(ObjectKind::Inline)),
                Property::object(Object::new("Child", "TChild").with_kind(ObjectKind::Inherited)),
                Property::object(Object::new("IndexObject", "TPanel").with_index(123)),
                prop("Left", 123),
                prop("Top", -123),
                prop("Scale", 1.0),
                prop("F.G", -123.1875),
                prop("Precise", 39043.36641510417),
                prop("Huge", 1.000000040918479e35),
                prop("Decimal", 1e15),
                prop("UseE", 1e16),
                prop("Not.A.Number", f64::NAN),
                prop("Infinity", f64::INFINITY),
                prop("NegativeInfinity", f64::NEG_INFINITY),
                prop("EmptyString", ""),
                prop("S", "string"),
                prop("Unicode1Line", "\u{e4}".repeat(64)),
                prop("Unicode2Lines", "\u{e4}".repeat(65)),
                prop("OneLine", "x".repeat(64)),
                prop("TwoLines", "x".repeat(65)),
                prop("Quoted", "The 'Laser'"),
                prop("Control", "\t\r\n"),
                prop("LongString", long_string),
                prop("Yes", true),
                prop("No", false),
                prop("ID", PropertyValue::identifier("clColor")),
                prop("ID.With.Dots", PropertyValue::identifier("A.B.C")),
                prop("EmptySet", PropertyValue::Set(vec![])),
                prop("Left", PropertyValue::Set(vec![PropertyValue::identifier("akLeft")])),
                prop(
                    "TopLeft",
                    PropertyValue::Set(vec![
                        PropertyValue::identifier("akLeft"),
                        PropertyValue::identifier("akTop"),
                    ]),
                ),
                prop("EmptyTuple", PropertyValue::Tuple(vec![])),
                prop("One", PropertyValue::Tuple(vec![PropertyValue::Int(1)])),
                prop(
                    "OneTwo",
                    PropertyValue::Tuple(vec![PropertyValue::Int(1), PropertyValue::Int(2)]),
                ),
                prop(
                    "StringTuple",
                    PropertyValue::Tuple(vec![
                        PropertyValue::from("a".repeat(10)),
                        PropertyValue::from("b".repeat(100)),
                        PropertyValue::from("c".repeat(5)),
                    ]),
                ),
                prop("EmptyBytes", PropertyValue::Bytes(vec![])),
                prop("OneByte", PropertyValue::Bytes(vec![0xAF])),
                prop(
                    "ManyBytes",
                    PropertyValue::Bytes([0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF].repeat(10)),
                ),
                prop("EmptyItems", PropertyValue::Items(vec![])),
                prop("OneEmptyItem", PropertyValue::Items(vec![vec![]])),
                prop("TwoEmptyItems", PropertyValue::Items(vec![vec![], vec![]])),
                prop("OneItem", PropertyValue::Items(vec![vec![prop("Left", 5)]])),
                prop(
                    "NestedItems",
                    PropertyValue::Items(vec![vec![prop(
                        "Nested",
                        PropertyValue::Items(vec![vec![prop("Left", 5)]]),
                    )]]),
                ),
            ],
        };

        let a64 = "#228".repeat(64);
        let x64 = "x".repeat(64);
        let b64 = "b".repeat(64);
        let b36 = "b".repeat(36);
        let hex_row = "0123456789ABCDEF0123456789ABCDEF";
        let want = [
            "object Dialog: TDialog".to_string(),
            "  inline TSubObject".into(),
            "  end".into(),
            "  inherited Child: TChild".into(),
            "  end".into(),
            "  object IndexObject: TPanel [123]".into(),
            "  end".into(),
            "  Left = 123".into(),
            "  Top = -123".into(),
            "  Scale = 1.000000000000000000".into(),
            "  F.G = -123.187500000000000000".into(),
            "  Precise = 39043.366415104170000000".into(),
            "  Huge = 1.000000040918479E35".into(),
            "  Decimal = 1000000000000000.000000000000000000".into(),
            "  UseE = 1E16".into(),
            "  Not.A.Number = 0.000000000000000000".into(),
            "  Infinity = 0.000000000000000000".into(),
            "  NegativeInfinity = 0.000000000000000000".into(),
            "  EmptyString = ''".into(),
            "  S = 'string'".into(),
            format!("  Unicode1Line = {}", a64),
            "  Unicode2Lines = ".into(),
            format!("    {} +", a64),
            "    #228".into(),
            format!("  OneLine = '{}'", x64),
            "  TwoLines = ".into(),
            format!("    '{}' +", x64),
            "    'x'".into(),
            "  Quoted = 'The ''Laser'''".into(),
            "  Control = #9#13#10".into(),
            "  LongString = ".into(),
            "    #10#9#9#9#9'A long string with four tabs at the start of each line.'#10#9#9#9 +".into(),
            "    #9'The string starts with a line break and ends with a line break,' +".into(),
            "    #10#9#9#9#9'followed by some more tabs.'#10#9#9#9".into(),
            "  Yes = True".into(),
            "  No = False".into(),
            "  ID = clColor".into(),
            "  ID.With.Dots = A.B.C".into(),
            "  EmptySet = []".into(),
            "  Left = [akLeft]".into(),
            "  TopLeft = [akLeft, akTop]".into(),
            "  EmptyTuple = ()".into(),
            "  One = (".into(),
            "    1)".into(),
            "  OneTwo = (".into(),
            "    1".into(),
            "    2)".into(),
            "  StringTuple = (".into(),
            "    'aaaaaaaaaa'".into(),
            "    ".into(),
            format!("      '{}' +", b64),
            format!("      '{}'", b36),
            "    'ccccc')".into(),
            "  EmptyBytes = {".into(),
            "    }".into(),
            "  OneByte = {".into(),
            "    AF}".into(),
            "  ManyBytes = {".into(),
            format!("    {}", hex_row),
            format!("    {}", hex_row),
            format!("    {}", hex_row),
            format!("    {}", hex_row),
            format!("    {}}}", hex_row),
            "  EmptyItems = <>".into(),
            "  OneEmptyItem = <".into(),
            "    item".into(),
            "    end>".into(),
            "  TwoEmptyItems = <".into(),
            "    item".into(),
            "    end".into(),
            "    item".into(),
            "    end>".into(),
            "  OneItem = <".into(),
            "    item".into(),
            "      Left = 5".into(),
            "    end>".into(),
            "  NestedItems = <".into(),
            "    item".into(),
            "      Nested = <".into(),
            "        item".into(),
            "          Left = 5".into(),
            "        end>".into(),
            "    end>".into(),
            "end".into(),
            "".into(),
        ]
        .join("\r\n");

        assert_eq!(print(&obj), want);
    }
}
