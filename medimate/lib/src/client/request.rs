//! Per-call request description shared by the blocking and async paths.

use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::error::RequestError;
use crate::method::RestMethod;

/// One API request: method, path, query parameters and an optional JSON body.
///
/// Paths are relative to the configured base URL, so `"cultural/translate"`
/// against `https://api.medimate.my/v1` targets
/// `https://api.medimate.my/v1/cultural/translate`. Identifiers supplied by
/// callers go through [`segment`](Self::segment) and are percent-encoded.
///
/// ## Examples
///
/// ```rust
/// use medimate::Request;
/// use url::Url;
///
/// let base = Url::parse("https://api.medimate.my/v1").unwrap();
/// let request = Request::get("patients")
///     .query("page", 2)
///     .query_opt("search", Some("tan ah kow"));
/// assert_eq!(
///     request.url(&base).unwrap().as_str(),
///     "https://api.medimate.my/v1/patients?page=2&search=tan+ah+kow"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: RestMethod,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl Request {
    pub fn new(method: RestMethod, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(RestMethod::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(RestMethod::Post, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(RestMethod::Put, path)
    }

    pub fn patch(path: &str) -> Self {
        Self::new(RestMethod::Patch, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(RestMethod::Delete, path)
    }

    /// Appends one path segment; slashes in `segment` are encoded, not split.
    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when `value` is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// ## Errors
    ///
    /// Returns [`RequestError::Encode`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, RequestError> {
        let encoded = serde_json::to_vec(body).map_err(RequestError::Encode)?;
        self.body = Some(Bytes::from(encoded));
        Ok(self)
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// The unencoded path, e.g. `/cultural/prayer-times/KUL`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Resolves the request against `base`, keeping the base path.
    pub fn url(&self, base: &Url) -> Result<Url, RequestError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| RequestError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}
