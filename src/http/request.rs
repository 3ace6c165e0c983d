/// Outcome of scanning a request for a resource path.
///
/// "No GET line was seen" is a distinct state, never an empty string: a
/// missing target means the handler serves the default landing page, not a
/// 404 and not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// Resource path captured from a request line, e.g. "/index.html".
    /// Non-empty by construction.
    Path(String),
    /// No "GET " token appeared before the header block ended.
    Missing,
}

impl RequestTarget {
    /// The captured path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            RequestTarget::Path(p) => Some(p),
            RequestTarget::Missing => None,
        }
    }
}
