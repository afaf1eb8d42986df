use core::fmt;

use uuid::Uuid;

/// Header carrying the request id in and out of the HTTP layer.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request correlation id.
///
/// Generated ids are UUIDv7 so they sort by creation time in log search.
/// Ids supplied by a caller are kept verbatim when they are reasonable header values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Reuse a caller-supplied id, or generate one when it is missing or unusable.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() && v.len() <= 128 && v.chars().all(|c| c.is_ascii_graphic()) => {
                Self(v.to_string())
            }
            _ => Self::generate(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
