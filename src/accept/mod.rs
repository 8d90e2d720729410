//! Accept header negotiation.
//!
//! This module parses `Accept` header values and picks which of a server's
//! content types best satisfies the client.
//!
//! # Architecture
//!
//! - **`mime_type`**: a single weighted, possibly wildcarded entry and the
//!   precedence relation between entries
//! - **`header`**: a whole header, sorted most preferred first, answering
//!   match queries
//! - **`error`**: the [`InvalidMimeType`] error
//!
//! # Precedence
//!
//! ```text
//!   type concrete?  ── differs ──► concrete wins
//!        │ same
//!   subtype concrete? ── differs ──► concrete wins
//!        │ same
//!   higher q wins
//! ```
//!
//! # Example
//!
//! ```
//! let best = mimematch::get_best_match(
//!     "text/*;q=0.3, text/html;q=0.7, */*;q=0.5",
//!     &["application/json", "text/html"],
//! )
//! .unwrap()
//! .unwrap();
//!
//! assert_eq!(best.served_type(), "text/html");
//! assert_eq!(best.mime_type().mimetype(), "text/html");
//! ```

pub mod error;
pub mod header;
pub mod mime_type;

pub use error::{InvalidMimeType, InvalidReason, Result};
pub use header::{AcceptHeader, BestMatch};
pub use mime_type::{MimeType, Specificity, is_more_specific};

/// Anything an `Accept` header can be given as: a raw comma delimited
/// string, or a list of individual entries.
pub trait AcceptSource {
    fn into_accept_header(self) -> Result<AcceptHeader>;
}

impl AcceptSource for &str {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(self)
    }
}

impl AcceptSource for String {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(&self)
    }
}

impl AcceptSource for &String {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(self)
    }
}

// Entries are joined with `,` first, so an entry holding a comma still splits.
fn join_entries<S: AsRef<str>>(entries: &[S]) -> String {
    entries
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

impl<S: AsRef<str>> AcceptSource for &[S] {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(&join_entries(self))
    }
}

impl<S: AsRef<str>, const N: usize> AcceptSource for [S; N] {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(&join_entries(&self))
    }
}

impl<S: AsRef<str>, const N: usize> AcceptSource for &[S; N] {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(&join_entries(self))
    }
}

impl<S: AsRef<str>> AcceptSource for Vec<S> {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(&join_entries(&self))
    }
}

impl<S: AsRef<str>> AcceptSource for &Vec<S> {
    fn into_accept_header(self) -> Result<AcceptHeader> {
        AcceptHeader::parse(&join_entries(self))
    }
}

/// Parses `accept` and returns the best of `served_types` for it.
///
/// `accept` may be a header string or a list of entries such as
/// `["text/html;q=0.7", "*/*;q=0.1"]`.
///
/// # Errors
///
/// Fails with [`InvalidMimeType`] if any non-blank entry is malformed. A
/// well-formed header that accepts none of `served_types` gives `Ok(None)`.
pub fn get_best_match<H, S>(accept: H, served_types: &[S]) -> Result<Option<BestMatch>>
where
    H: AcceptSource,
    S: AsRef<str>,
{
    Ok(accept.into_accept_header()?.get_best_match(served_types))
}
