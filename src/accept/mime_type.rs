use crate::accept::error::{InvalidMimeType, InvalidReason, Result};
use glob::Pattern;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

const WILDCARD: &str = "*";
const WEIGHT_PREFIX: &str = "q=";

/// Outcome of comparing how specific two mimetypes are.
///
/// A concrete type beats a `*` type; when the types tie, a concrete subtype
/// beats a `*` subtype. Anything else is [`Specificity::Undetermined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
    /// The first mimetype is more specific
    More,
    /// The second mimetype is more specific
    Less,
    /// Neither type nor subtype wildcard status differs
    Undetermined,
}

impl Specificity {
    fn as_ordering(self) -> Option<Ordering> {
        match self {
            Specificity::More => Some(Ordering::Greater),
            Specificity::Less => Some(Ordering::Less),
            Specificity::Undetermined => None,
        }
    }
}

/// Compares the wildcard status of two `type/subtype` strings.
///
/// Only the segment before the first `/` and the segment after it (up to the
/// next `/`) are examined, and only for being exactly `*`. Parameters stay
/// attached to the subtype, so `text/*;level=1` counts as a concrete subtype.
///
/// # Example
///
/// ```
/// # use mimematch::{is_more_specific, Specificity};
/// assert_eq!(is_more_specific("text/html", "text/*"), Specificity::More);
/// assert_eq!(is_more_specific("*/*", "text/*"), Specificity::Less);
/// assert_eq!(is_more_specific("text/*", "html/*"), Specificity::Undetermined);
/// ```
pub fn is_more_specific(first: &str, second: &str) -> Specificity {
    let (first_type, first_sub) = split_type(first);
    let (second_type, second_sub) = split_type(second);

    match (first_type == WILDCARD, second_type == WILDCARD) {
        (true, false) => return Specificity::Less,
        (false, true) => return Specificity::More,
        _ => {}
    }

    match (first_sub == Some(WILDCARD), second_sub == Some(WILDCARD)) {
        (true, false) => Specificity::Less,
        (false, true) => Specificity::More,
        _ => Specificity::Undetermined,
    }
}

fn split_type(mimetype: &str) -> (&str, Option<&str>) {
    let mut parts = mimetype.split('/');
    let kind = parts.next().unwrap_or_default();
    (kind, parts.next())
}

#[derive(Debug, Clone)]
enum Matcher {
    Glob(Pattern),
    // Not a valid glob pattern, compared as-is
    Literal,
}

/// Rewrites a mimetype into a `glob` pattern with `fnmatch` semantics.
///
/// `glob` rejects `**` inside a component and a `[` without a closing `]`,
/// where `fnmatch` reads them as `*` and a literal `[`. Runs of `*` are
/// collapsed and an unclosed `[` becomes the class `[[]`.
fn fnmatch_pattern(mimetype: &str) -> String {
    let chars: Vec<char> = mimetype.chars().collect();
    let mut pattern = String::with_capacity(mimetype.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                pattern.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    pattern.extend(&chars[i..=end]);
                    i = end;
                }
                None => pattern.push_str("[[]"),
            },
            c => pattern.push(c),
        }
        i += 1;
    }

    pattern
}

// Index of the `]` closing the class opened at `start`. A leading `!` and a
// `]` right after it belong to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

/// A single weighted entry of an Accept header, e.g. `text/html;level=1;q=0.7`.
///
/// The weight is split off and exposed separately; the remaining
/// `type/subtype[;params]` string is what gets matched against served types.
/// Values are compared by precedence with [`MimeType::cmp_precedence`]: the
/// more specific entry wins regardless of weight, and weight only decides
/// between entries of equal specificity.
#[derive(Debug, Clone)]
pub struct MimeType {
    raw: String,
    mimetype: String,
    weight: f64,
    matcher: Matcher,
}

impl MimeType {
    /// Parses a mimetype, optionally carrying a trailing `q=` weight.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMimeType`] if the string is empty, has no
    /// `type/subtype` pair, or carries a `q=` value that is not a number.
    ///
    /// # Example
    ///
    /// ```
    /// # use mimematch::MimeType;
    /// let mime = MimeType::parse("text/html;level=1;q=0.7").unwrap();
    /// assert_eq!(mime.mimetype(), "text/html;level=1");
    /// assert_eq!(mime.weight(), 0.7);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim().trim_matches(';');

        let parts: Vec<&str> = raw
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        let first = parts
            .first()
            .ok_or_else(|| InvalidMimeType::new(input, InvalidReason::Empty))?;
        if !first.contains('/') {
            return Err(InvalidMimeType::new(input, InvalidReason::MissingSlash));
        }

        let (mimetype, weight) = match parts.split_last() {
            Some((last, rest)) if !rest.is_empty() && last.starts_with(WEIGHT_PREFIX) => {
                let weight = parse_weight(&last[WEIGHT_PREFIX.len()..])
                    .ok_or_else(|| InvalidMimeType::new(input, InvalidReason::InvalidWeight))?;
                (rest.join(";"), weight)
            }
            _ => (raw.to_string(), 1.0),
        };

        let matcher = match Pattern::new(&fnmatch_pattern(&mimetype)) {
            Ok(pattern) => Matcher::Glob(pattern),
            Err(err) => {
                trace!(mimetype = %mimetype, %err, "not a glob pattern, matching literally");
                Matcher::Literal
            }
        };

        Ok(Self {
            raw: raw.to_string(),
            mimetype,
            weight,
            matcher,
        })
    }

    /// The mimetype with the weight parameter removed.
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// The `q` value, `1.0` when the entry carries none.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The trimmed input this value was parsed from, weight included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Shell-style glob match of `served` against this mimetype.
    ///
    /// `*` matches any run of characters, including `/`. Matching is
    /// case-sensitive.
    pub fn is_match(&self, served: &str) -> bool {
        let matched = match &self.matcher {
            Matcher::Glob(pattern) => pattern.matches(served),
            Matcher::Literal => self.mimetype == served,
        };
        trace!(pattern = %self.mimetype, served, matched, "glob match");
        matched
    }

    /// Specificity of this mimetype relative to `other`.
    pub fn specificity(&self, other: &MimeType) -> Specificity {
        is_more_specific(&self.mimetype, &other.mimetype)
    }

    /// Orders two entries by precedence.
    ///
    /// When specificity differs it alone decides; weight is only consulted
    /// when specificity is undetermined.
    pub fn cmp_precedence(&self, other: &MimeType) -> Ordering {
        self.specificity(other)
            .as_ordering()
            .unwrap_or_else(|| {
                self.weight
                    .partial_cmp(&other.weight)
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Like [`MimeType::cmp_precedence`], but an absent value always ranks
    /// below any real entry.
    pub fn cmp_precedence_opt(&self, other: Option<&MimeType>) -> Ordering {
        match other {
            Some(other) => self.cmp_precedence(other),
            None => Ordering::Greater,
        }
    }

    /// True when neither entry outranks the other.
    ///
    /// Two entries with the same weight and the same wildcard shape are of
    /// equal precedence even if they name different types (`text/*` and
    /// `image/*`). An absent value is never equal.
    pub fn is_same_precedence(&self, other: Option<&MimeType>) -> bool {
        self.cmp_precedence_opt(other) == Ordering::Equal
    }

    /// True when this entry is strictly preferred over `other`.
    pub fn outranks(&self, other: Option<&MimeType>) -> bool {
        self.cmp_precedence_opt(other) == Ordering::Greater
    }
}

fn parse_weight(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|w| !w.is_nan())
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mimetype)
    }
}

impl FromStr for MimeType {
    type Err = InvalidMimeType;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MimeType {
    type Error = InvalidMimeType;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
