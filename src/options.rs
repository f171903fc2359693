//! Configuration options for TOON encoding.
//!
//! - [`EncodeOptions`]: indentation, delimiter and length-marker settings
//! - [`Delimiter`]: the field separator used in tabular rows and headers
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions};
//!
//! let rows = toon!([{"id": 1, "name": "Alice"}]);
//!
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! let text = encode_with_options(&rows, &options);
//! assert_eq!(text, "[1]{id|name}:\n  1|Alice");
//! ```

/// Delimiter separating fields in tabular headers and rows.
///
/// - **Comma**: default, most compact
/// - **Tab**: TSV-like output
/// - **Pipe**: readable for markdown-style tables
/// - **Custom**: any other single character outside the reserved set
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::custom(';'), Some(Delimiter::Custom(';')));
/// assert_eq!(Delimiter::custom(':'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Custom(char),
}

impl Delimiter {
    /// Characters that can never act as a delimiter: they already carry
    /// structural meaning in the grammar.
    const RESERVED: [char; 9] = [':', '"', '\\', '{', '}', '[', ']', '\n', '\r'];

    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Custom(c) => *c,
        }
    }

    /// Creates a custom delimiter, rejecting reserved characters.
    ///
    /// Returns `None` for `:`, `"`, `\`, `{`, `}`, `[`, `]`, LF and CR.
    #[must_use]
    pub fn custom(c: char) -> Option<Self> {
        if Self::RESERVED.contains(&c) {
            None
        } else {
            Some(match c {
                ',' => Delimiter::Comma,
                '\t' => Delimiter::Tab,
                '|' => Delimiter::Pipe,
                other => Delimiter::Custom(other),
            })
        }
    }
}

/// Configuration options for TOON encoding.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, EncodeOptions};
///
/// let options = EncodeOptions::new()
///     .with_indent("    ")
///     .with_delimiter(Delimiter::Tab)
///     .with_length_marker(false);
/// assert_eq!(options.indent, "    ");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeOptions {
    /// String prepended once per nesting level. Must consist only of space
    /// and tab characters.
    pub indent: String,
    /// Field separator for tabular headers and rows.
    pub delimiter: Delimiter,
    /// When `false`, regular-list headers are emitted as `[N]` without the
    /// trailing colon. Both decoders accept either form.
    pub length_marker: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: "  ".to_string(),
            delimiter: Delimiter::default(),
            length_marker: true,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (two-space indent, comma delimiter, length
    /// markers on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-level indentation string.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the delimiter for tabular headers and rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables the trailing colon on regular-list headers.
    #[must_use]
    pub fn with_length_marker(mut self, length_marker: bool) -> Self {
        self.length_marker = length_marker;
        self
    }
}
