//! Deployment settings baked into the wasm bundle at build time.

use common::config::{DashboardEnv, RuntimeConfig};

/// Builds the [`RuntimeConfig`] from the variables set when the bundle was compiled.
///
/// An invalid `APP_PROFILE` is logged and the build profile is used instead,
/// so a misconfigured build still renders and fails at request time.
pub fn runtime_config() -> RuntimeConfig {
    let vars = [
        ("APP_PROFILE", option_env!("APP_PROFILE")),
        ("SERVER_BASE_URL", option_env!("SERVER_BASE_URL")),
        ("APISERVER_PORT", option_env!("APISERVER_PORT")),
        ("DASHBOARD_URL", option_env!("DASHBOARD_URL")),
        ("API_SERVER_ROOT_PATH", option_env!("API_SERVER_ROOT_PATH")),
        ("HOST_PORT_API_SERVER", option_env!("HOST_PORT_API_SERVER")),
    ];
    let defined = vars
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)));

    match DashboardEnv::from_vars(defined.clone()) {
        Ok(env) => env.runtime_config(),
        Err(e) => {
            gloo_console::error!(format!("Invalid dashboard build settings: {}", e));
            let without_profile = defined.filter(|(name, _)| *name != "APP_PROFILE");
            DashboardEnv::from_vars(without_profile)
                .unwrap_or_default()
                .runtime_config()
        }
    }
}
