//! Fetch helpers that know where the API lives.
//!
//! Components pass a path relative to the API root (`data/collections`) plus
//! optional [`FetchOptions`]. The configured base URL and `lazy: true` are
//! injected underneath the caller's options, so callers can still override
//! either one.
//!
//! - [`base_url_fetch`] returns a [`FetchHandle`] that decodes the JSON
//!   response into a callback. A lazy handle waits for [`FetchHandle::execute`],
//!   usually called when the component first renders; an eager one starts
//!   right away.
//! - [`base_url_fetch_raw`] sends immediately and hands back the raw response.
//!
//! Nothing is retried or cached. Errors are the ones `gloo-net` produces.

use common::config::RuntimeConfig;
use common::fetch::{FetchOptions, Method, ResolvedRequest};
use gloo_net::http::{self, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use yew::platform::spawn_local;
use yew::Callback;

pub type FetchResult<T> = Result<T, gloo_net::Error>;

/// A request that can be issued any number of times; each run reports to `on_done`.
pub struct FetchHandle<T> {
    request: ResolvedRequest,
    on_done: Callback<FetchResult<T>>,
}

impl<T: DeserializeOwned + 'static> FetchHandle<T> {
    pub fn is_lazy(&self) -> bool {
        self.request.lazy
    }

    pub fn execute(&self) {
        let request = self.request.clone();
        let on_done = self.on_done.clone();
        spawn_local(async move {
            let result = match send(&request).await {
                Ok(response) => decode(response).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                gloo_console::warn!(format!("{} {} failed: {}", request.method.as_str(), request.url, e));
            }
            on_done.emit(result);
        });
    }
}

pub fn base_url_fetch<T: DeserializeOwned + 'static>(
    config: &RuntimeConfig,
    request: &str,
    opts: FetchOptions,
    on_done: Callback<FetchResult<T>>,
) -> FetchHandle<T> {
    let opts = opts.merge_over(FetchOptions::new().header("Accept", "application/json"));
    let handle = FetchHandle {
        request: FetchOptions::with_base_url_defaults(config, opts).resolve(request),
        on_done,
    };
    if !handle.is_lazy() {
        handle.execute();
    }
    handle
}

pub async fn base_url_fetch_raw(
    config: &RuntimeConfig,
    request: &str,
    opts: FetchOptions,
) -> FetchResult<Response> {
    let request = FetchOptions::with_base_url_defaults(config, opts).resolve(request);
    send(&request).await
}

fn http_method(method: Method) -> http::Method {
    match method {
        Method::Get => http::Method::GET,
        Method::Post => http::Method::POST,
        Method::Put => http::Method::PUT,
        Method::Patch => http::Method::PATCH,
        Method::Delete => http::Method::DELETE,
    }
}

async fn send(request: &ResolvedRequest) -> FetchResult<Response> {
    let mut builder = RequestBuilder::new(&request.url).method(http_method(request.method));
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if !request.query.is_empty() {
        builder = builder.query(
            request
                .query
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
    }

    match &request.body {
        Some(body) => builder.json(body)?.send().await,
        None => builder.send().await,
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> FetchResult<T> {
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "{} {}",
            response.status(),
            response.status_text()
        )));
    }
    response.json::<T>().await
}
