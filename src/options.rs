//! Configuration options for parsing and printing.
//!
//! - [`ParseOptions`]: how lenient the parser is with truncated input
//! - [`PrintOptions`]: indentation and wrapping widths of printed code
//!
//! The defaults reproduce what Delphi itself reads and writes.
//!
//! ## Examples
//!
//! ```rust
//! use dfm::{from_str_with_options, ParseOptions};
//!
//! // Lenient by default: a missing final `end` is tolerated.
//! assert!(dfm::from_str("object A: TA").is_ok());
//!
//! // Strict mode rejects it.
//! let strict = ParseOptions::new().with_strict(true);
//! assert!(from_str_with_options("object A: TA", strict).is_err());
//! ```

/// Options controlling the parser.
///
/// # Examples
///
/// ```rust
/// use dfm::ParseOptions;
///
/// let options = ParseOptions::new();
/// assert!(!options.strict);
/// assert_eq!(options.max_depth, 256);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject an object body cut off by end of input and byte blocks with an
    /// odd number of hex digits, instead of closing/truncating them.
    pub strict: bool,
    /// How deep objects, sets, tuples and item lists may nest. The root
    /// object is level 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict: false,
            max_depth: 256,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `ParseOptions::new().with_strict(true)`.
    #[must_use]
    pub fn strict() -> Self {
        Self::new().with_strict(true)
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the nesting limit. Deeper input fails with
    /// [`Error::NestingTooDeep`](crate::Error::NestingTooDeep) instead of
    /// exhausting the stack.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling the printer.
///
/// # Examples
///
/// ```rust
/// use dfm::PrintOptions;
///
/// let options = PrintOptions::new();
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.max_line_length, 64);
/// assert_eq!(options.bytes_per_line, 16);
///
/// let wide = PrintOptions::new().with_bytes_per_line(32);
/// assert_eq!(wide.bytes_per_line, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Code points per line before a long string is continued with ` +`.
    pub max_line_length: usize,
    /// Bytes per row of hex digits in a byte block.
    pub bytes_per_line: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent: 2,
            max_line_length: 64,
            bytes_per_line: 16,
        }
    }
}

impl PrintOptions {
    /// Creates default options (2-space indent, 64 code points per string
    /// line, 16 bytes per hex row).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the string wrap width. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length.max(1);
        self
    }

    /// Sets the number of bytes per row in byte blocks. Values below 1 are
    /// treated as 1.
    #[must_use]
    pub fn with_bytes_per_line(mut self, bytes_per_line: usize) -> Self {
        self.bytes_per_line = bytes_per_line.max(1);
        self
    }
}
