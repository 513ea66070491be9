//! HTTP methods used by the MediMate API.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods the MediMate endpoints accept.
///
/// ## Examples
///
/// ```rust
/// use medimate::RestMethod;
///
/// let method: RestMethod = "POST".parse().unwrap();
/// assert!(method.has_body());
/// assert!(!RestMethod::Get.has_body());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// Retrieve a resource.
    Get,
    /// Create a resource or trigger an action (translation, validation).
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl RestMethod {
    /// Returns `true` if requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if repeating the request has the same effect as sending it once.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}
