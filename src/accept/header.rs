use crate::accept::error::{InvalidMimeType, Result};
use crate::accept::mime_type::MimeType;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::{debug, trace};

/// A parsed `Accept` header, entries ordered most preferred first.
///
/// Blank comma-separated pieces are dropped; any other malformed piece fails
/// the whole header. Entries of equal precedence keep their header order.
#[derive(Debug, Clone, Default)]
pub struct AcceptHeader {
    mimetypes: Vec<MimeType>,
}

/// The winner of [`AcceptHeader::get_best_match`]: the header entry that
/// accepted a served type, together with that served type.
#[derive(Debug, Clone)]
pub struct BestMatch {
    mime_type: MimeType,
    served_type: String,
}

impl BestMatch {
    /// The header entry that matched.
    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    /// The served type, exactly as passed in.
    pub fn served_type(&self) -> &str {
        &self.served_type
    }

    pub fn into_parts(self) -> (MimeType, String) {
        (self.mime_type, self.served_type)
    }
}

impl From<BestMatch> for (MimeType, String) {
    fn from(best: BestMatch) -> Self {
        best.into_parts()
    }
}

impl AcceptHeader {
    /// Parses a comma delimited `Accept` header.
    ///
    /// # Example
    ///
    /// ```
    /// # use mimematch::AcceptHeader;
    /// let header = AcceptHeader::parse("text/*;q=0.3, text/html, */*;q=0.5").unwrap();
    /// let order: Vec<&str> = header.iter().map(|m| m.mimetype()).collect();
    /// assert_eq!(order, ["text/html", "text/*", "*/*"]);
    /// ```
    pub fn parse(header: &str) -> Result<Self> {
        Self::from_pieces(header.split(','))
    }

    /// Builds a header from already split entries.
    pub fn from_pieces<I, S>(pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mimetypes = pieces
            .into_iter()
            .filter_map(|piece| {
                let piece = piece.as_ref().trim();
                (!piece.is_empty()).then(|| MimeType::parse(piece))
            })
            .collect::<Result<Vec<_>>>()?;

        // stable, so equal precedence keeps header order
        mimetypes.sort_by(|a, b| b.cmp_precedence(a));

        debug!(
            order = ?mimetypes.iter().map(MimeType::mimetype).collect::<Vec<_>>(),
            "parsed accept header"
        );

        Ok(Self { mimetypes })
    }

    /// Most preferred entry matching `served`, if any.
    pub fn get_match(&self, served: &str) -> Option<&MimeType> {
        self.mimetypes.iter().find(|mime| mime.is_match(served))
    }

    /// Picks the served type the client prefers most.
    ///
    /// Each served type is paired with its [`AcceptHeader::get_match`] entry
    /// and the pairing whose entry has the highest precedence wins. Among
    /// equal pairings the earliest served type wins. Returns `None` when no
    /// served type is acceptable.
    pub fn get_best_match<S: AsRef<str>>(&self, served_types: &[S]) -> Option<BestMatch> {
        let mut best: Option<(&MimeType, &str)> = None;

        for served in served_types.iter().map(AsRef::as_ref) {
            let Some(mime) = self.get_match(served) else {
                trace!(served, "no accepted entry");
                continue;
            };
            trace!(served, entry = mime.mimetype(), "accepted");

            let current = best.map(|(current, _)| current);
            if mime.cmp_precedence_opt(current) == Ordering::Greater {
                best = Some((mime, served));
            }
        }

        let best = best.map(|(mime, served)| BestMatch {
            mime_type: mime.clone(),
            served_type: served.to_string(),
        });
        debug!(
            served = ?best.as_ref().map(BestMatch::served_type),
            "best match resolved"
        );
        best
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MimeType> {
        self.mimetypes.iter()
    }

    pub fn as_slice(&self) -> &[MimeType] {
        &self.mimetypes
    }

    pub fn len(&self) -> usize {
        self.mimetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mimetypes.is_empty()
    }
}

impl<'a> IntoIterator for &'a AcceptHeader {
    type Item = &'a MimeType;
    type IntoIter = std::slice::Iter<'a, MimeType>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for AcceptHeader {
    type Item = MimeType;
    type IntoIter = std::vec::IntoIter<MimeType>;

    fn into_iter(self) -> Self::IntoIter {
        self.mimetypes.into_iter()
    }
}

impl FromStr for AcceptHeader {
    type Err = InvalidMimeType;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
