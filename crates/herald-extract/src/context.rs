//! Extraction context providing access to request data.
//!
//! The [`ExtractionContext`] is what handlers hand to the readers in this
//! crate: the strict JSON decoder, the query readers, and the error
//! dispatcher all take it by reference.

use crate::Params;
use bytes::Bytes;
use herald_core::ScopedCarrier;
use http::{Extensions, HeaderMap, Method, Request, Uri};

/// A buffered request with its route parameters.
///
/// # Example
///
/// ```rust
/// use herald_extract::{ExtractionContext, Params};
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// let mut params = Params::new();
/// params.push("id", "123");
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/v1/movies/123"),
///     HeaderMap::new(),
///     Bytes::new(),
///     params,
/// );
///
/// assert_eq!(ctx.method(), &Method::GET);
/// assert_eq!(ctx.path_params().get("id"), Some("123"));
/// ```
#[derive(Debug)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
    extensions: Extensions,
}

impl ExtractionContext {
    /// Creates a new extraction context.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        path_params: Params,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            path_params,
            extensions: Extensions::new(),
        }
    }

    /// Builds a context from a buffered request, keeping its extensions.
    #[must_use]
    pub fn from_request(request: Request<Bytes>, path_params: Params) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            path_params,
            extensions: parts.extensions,
        }
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> ExtractionContextBuilder {
        ExtractionContextBuilder::new()
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request body as bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the extracted path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl ScopedCarrier for ExtractionContext {
    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// Builder for constructing an `ExtractionContext`.
///
/// Method defaults to `GET` and URI to `/`.
#[derive(Debug, Default)]
pub struct ExtractionContextBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
}

impl ExtractionContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a single path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Builds the extraction context.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        ExtractionContext::new(
            self.method.unwrap_or(Method::GET),
            self.uri.unwrap_or_else(|| Uri::from_static("/")),
            self.headers,
            self.body,
            self.path_params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{context, Principal};

    #[test]
    fn test_extraction_context_creation() {
        let mut params = Params::new();
        params.push("id", "42");

        let ctx = ExtractionContext::new(
            Method::GET,
            Uri::from_static("/v1/movies/42?fields=title"),
            HeaderMap::new(),
            Bytes::from_static(b""),
            params,
        );

        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/v1/movies/42");
        assert_eq!(ctx.query_string(), Some("fields=title"));
        assert_eq!(ctx.path_params().get("id"), Some("42"));
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = ExtractionContext::builder().build();
        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/");
        assert!(ctx.body().is_empty());
    }

    #[test]
    fn test_builder() {
        let ctx = ExtractionContext::builder()
            .method(Method::PATCH)
            .uri(Uri::from_static("/v1/movies/7"))
            .header("content-type", "application/json")
            .body(r#"{"title": "Up"}"#)
            .path_param("id", "7")
            .build();

        assert_eq!(ctx.method(), &Method::PATCH);
        assert_eq!(ctx.header("content-type"), Some("application/json"));
        assert_eq!(ctx.path_params().get("id"), Some("7"));
    }

    #[test]
    fn test_from_request_keeps_principal() {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/v1/movies/3")
            .body(Bytes::new())
            .unwrap();
        let request = context::attach(request, Principal::anonymous());

        let ctx = ExtractionContext::from_request(request, [("id", "3")].into_iter().collect());

        assert_eq!(ctx.method(), &Method::DELETE);
        assert!(context::retrieve(&ctx).is_anonymous());
    }
}
