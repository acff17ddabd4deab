//! Transport-agnostic description of one Miro REST call.

use reqwest::Method;
use serde_json::Value;

/// One remote call, built by a tool handler and executed by a [`BoardApi`].
///
/// Path segments are kept unjoined so the client can percent-encode
/// identifiers (board IDs routinely contain `=`).
///
/// [`BoardApi`]: super::BoardApi
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub upload: Option<FileUpload>,
}

/// A file sent as `multipart/form-data` alongside a JSON `data` part.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub data: Value,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            upload: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, segments)
    }

    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PATCH, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn query_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a multipart file upload.
    pub fn upload(mut self, upload: FileUpload) -> Self {
        self.upload = Some(upload);
        self
    }

    /// The request path as sent, e.g. `/v2/boards/abc/items`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Look up a query parameter by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get(["v2", "boards", "uXjVO="])
            .query("limit", 50)
            .query_opt("cursor", None::<String>)
            .query_opt("offset", Some(10));

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path(), "/v2/boards/uXjVO=");
        assert_eq!(request.query_value("limit"), Some("50"));
        assert_eq!(request.query_value("cursor"), None);
        assert_eq!(request.query_value("offset"), Some("10"));
    }

    #[test]
    fn test_request_json_body() {
        let request = ApiRequest::post(["v2", "boards"]).json(json!({ "name": "Plan" }));
        assert_eq!(request.body, Some(json!({ "name": "Plan" })));
        assert!(request.upload.is_none());
    }
}
