use std::fmt;

/// Why a mimetype string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Nothing left after trimming whitespace and `;`
    Empty,
    /// The leading segment has no `type/subtype` pair
    MissingSlash,
    /// A trailing `q=` parameter is not a number
    InvalidWeight,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InvalidReason::Empty => "empty mimetype",
            InvalidReason::MissingSlash => "expected <type>/<subtype>",
            InvalidReason::InvalidWeight => "weight is not a number",
        };
        f.write_str(msg)
    }
}

/// A mimetype expression that could not be parsed.
///
/// Valid mimetypes have the form `<type>/<subtype>`, either side may be a
/// `*` wildcard, optionally followed by `;param=value` segments and a final
/// `;q=<weight>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mimetype {input:?}: {reason}")]
pub struct InvalidMimeType {
    input: String,
    reason: InvalidReason,
}

impl InvalidMimeType {
    pub(crate) fn new(input: impl Into<String>, reason: InvalidReason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reason(&self) -> InvalidReason {
        self.reason
    }
}

pub type Result<T> = std::result::Result<T, InvalidMimeType>;
