//! One component per dashboard section. Each page loads its list lazily on
//! first render and reloads it after a successful change.

pub mod collections;
pub mod connections;
pub mod general_options;
pub mod namespaces;

use crate::fetch::base_url_fetch_raw;
use common::config::RuntimeConfig;
use common::fetch::FetchOptions;
use gloo_net::http::Response;
use yew::html::Scope;
use yew::{Callback, Component};

/// Sends a request and turns non-2xx statuses into their status line and body.
pub(crate) async fn request(
    config: &RuntimeConfig,
    path: &str,
    opts: FetchOptions,
) -> Result<Response, String> {
    let response = base_url_fetch_raw(config, path, opts)
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        Ok(response)
    } else {
        let detail = response.text().await.unwrap_or_default();
        Err(format!("{} {}", response.status(), detail).trim().to_string())
    }
}

/// The runtime config provided by the app root, or the build default outside of it.
pub(crate) fn runtime_config<C: Component>(link: &Scope<C>) -> RuntimeConfig {
    link.context::<RuntimeConfig>(Callback::noop())
        .map(|(config, _)| config)
        .unwrap_or_default()
}
