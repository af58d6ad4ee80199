//! Request options for the dashboard's base-URL fetch helpers.
//!
//! Callers never need to know where the API lives: the helpers inject the
//! configured base URL and a lazy default *under* whatever the caller passes,
//! so an explicit option always wins.

use crate::config::RuntimeConfig;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Options for one request. `None` fields are filled from defaults on merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    pub base_url: Option<String>,
    pub lazy: Option<bool>,
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = Some(lazy);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Layers `self` over `defaults`: every field set here is kept, the rest
    /// comes from `defaults`. Headers with the same name (case-insensitive)
    /// are replaced; query parameters are appended after the defaults.
    pub fn merge_over(self, defaults: FetchOptions) -> FetchOptions {
        let mut headers: Vec<(String, String)> = defaults
            .headers
            .into_iter()
            .filter(|(name, _)| {
                !self
                    .headers
                    .iter()
                    .any(|(own, _)| own.eq_ignore_ascii_case(name))
            })
            .collect();
        headers.extend(self.headers);

        let mut query = defaults.query;
        query.extend(self.query);

        FetchOptions {
            base_url: self.base_url.or(defaults.base_url),
            lazy: self.lazy.or(defaults.lazy),
            method: self.method.or(defaults.method),
            headers,
            query,
            body: self.body.or(defaults.body),
        }
    }

    /// Caller options on top of `{ base_url: config.server_base_url, lazy: true }`.
    pub fn with_base_url_defaults(config: &RuntimeConfig, caller: FetchOptions) -> FetchOptions {
        let defaults = FetchOptions::new()
            .base_url(config.server_base_url.clone())
            .lazy(true);
        caller.merge_over(defaults)
    }

    pub fn resolve(self, request: &str) -> ResolvedRequest {
        let url = match self.base_url.as_deref() {
            Some(base) => join_url(base, request),
            None => request.to_string(),
        };

        ResolvedRequest {
            url,
            method: self.method.unwrap_or_default(),
            headers: self.headers,
            query: self.query,
            body: self.body,
            lazy: self.lazy.unwrap_or(false),
        }
    }
}

/// Fully merged request, ready to hand to the HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub lazy: bool,
}

/// Prefixes `request` with `base` using exactly one `/`.
///
/// Absolute URLs and requests already carrying the base are left untouched.
pub fn join_url(base: &str, request: &str) -> String {
    if base.is_empty() || is_absolute(request) || carries_base(base, request) {
        return request.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = request.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// `request` starts with every path segment of `base`, not just its characters.
fn carries_base(base: &str, request: &str) -> bool {
    let prefix = base.trim_end_matches('/');
    if request == base || (!prefix.is_empty() && request == prefix) {
        return true;
    }
    !prefix.is_empty()
        && request
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            server_base_url: "http://localhost:5000/dashboard/".into(),
            base_path: "/dashboard/".into(),
        }
    }

    #[test]
    fn injects_base_url_and_lazy() {
        let options = FetchOptions::with_base_url_defaults(&config(), FetchOptions::new());
        assert_eq!(options.base_url.as_deref(), Some("http://localhost:5000/dashboard/"));
        assert_eq!(options.lazy, Some(true));

        let request = options.resolve("data/collections");
        assert_eq!(request.url, "http://localhost:5000/dashboard/data/collections");
        assert!(request.lazy);
        assert_eq!(request.method, Method::Get);
    }

    #[test]
    fn caller_lazy_false_makes_request_eager() {
        let options =
            FetchOptions::with_base_url_defaults(&config(), FetchOptions::new().lazy(false));
        assert!(!options.resolve("data/options").lazy);
    }

    #[test]
    fn caller_base_url_overrides_injected_one() {
        let options = FetchOptions::with_base_url_defaults(
            &config(),
            FetchOptions::new().base_url("https://api.example.org/v2"),
        );
        assert_eq!(
            options.resolve("/data/namespaces").url,
            "https://api.example.org/v2/data/namespaces"
        );
    }

    #[test]
    fn caller_headers_replace_defaults_by_name() {
        let defaults = FetchOptions::new()
            .header("Accept", "application/json")
            .header("X-Client", "dashboard")
            .query("page", "1");
        let caller = FetchOptions::new()
            .header("accept", "text/html")
            .query("limit", "10");

        let merged = caller.merge_over(defaults);
        assert_eq!(
            merged.headers,
            vec![
                ("X-Client".to_string(), "dashboard".to_string()),
                ("accept".to_string(), "text/html".to_string()),
            ]
        );
        assert_eq!(merged.query.len(), 2);
    }

    #[test]
    fn json_body_and_method_are_kept() {
        let request = FetchOptions::new()
            .method(Method::Put)
            .json(&json!([{"key": "service_title", "value": "x"}]))
            .unwrap()
            .merge_over(FetchOptions::new().method(Method::Get))
            .resolve("/data/options");

        assert_eq!(request.method, Method::Put);
        assert_eq!(request.body.unwrap()[0]["key"], "service_title");
        assert!(!request.lazy);
    }

    #[test]
    fn join_url_uses_one_slash() {
        assert_eq!(join_url("/dashboard/", "/data/options"), "/dashboard/data/options");
        assert_eq!(join_url("/dashboard", "data/options"), "/dashboard/data/options");
        assert_eq!(join_url("/dashboard/", ""), "/dashboard/");
        assert_eq!(join_url("", "data"), "data");
    }

    #[test]
    fn join_url_keeps_absolute_and_prefixed_requests() {
        assert_eq!(join_url("/dashboard/", "https://x.org/a"), "https://x.org/a");
        assert_eq!(join_url("/dashboard/", "/dashboard/data"), "/dashboard/data");
        assert_eq!(join_url("/api", "/api/data"), "/api/data");
        assert_eq!(join_url("/api", "/api"), "/api");
    }

    #[test]
    fn join_url_matches_base_by_whole_segments() {
        assert_eq!(join_url("/api", "/apiary/list"), "/api/apiary/list");
        assert_eq!(join_url("/dashboard/", "/dashboards"), "/dashboard/dashboards");
        assert_eq!(join_url("http://localhost:5000/ops", "/opsdata"), "http://localhost:5000/ops/opsdata");
        assert_eq!(join_url("/", "/data/options"), "/data/options");
    }
}
