//! Environment-derived deployment settings.
//!
//! The dashboard is mounted under `API_SERVER_ROOT_PATH` + `DASHBOARD_URL`
//! behind a reverse proxy, and every API call goes through the same prefix.
//! [`DashboardEnv`] captures the raw variables once and derives both values,
//! so the backend (at startup and in `build.rs`) and the frontend (at compile
//! time) agree on them.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DASHBOARD_URL: &str = "dashboard";
pub const DEFAULT_SERVER_BASE_URL: &str = "http://localhost";
pub const DEFAULT_API_PORT: u16 = 5000;
/// Relative to the backend crate, which serves the built dashboard.
pub const DEFAULT_BUILD_OUTPUT_DIR: &str = "static/dist";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
    #[error("unknown APP_PROFILE {0:?}, expected development or production")]
    UnknownProfile(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// API served by a separately started server on `APISERVER_PORT`.
    Development,
    /// API served by the same process that serves the static dashboard.
    Production,
}

impl Profile {
    /// Debug builds default to development, release builds to production.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Profile::Development
        } else {
            Profile::Production
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            _ => Err(ConfigError::UnknownProfile(value.to_string())),
        }
    }
}

/// Raw deployment variables. Empty values are treated as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardEnv {
    pub profile: Profile,
    pub server_base_url: Option<String>,
    pub apiserver_port: Option<String>,
    pub dashboard_url: Option<String>,
    pub api_server_root_path: Option<String>,
    pub build_output_dir: Option<String>,
    pub host_port_api_server: Option<String>,
}

impl Default for DashboardEnv {
    fn default() -> Self {
        Self {
            profile: Profile::from_build(),
            server_base_url: None,
            apiserver_port: None,
            dashboard_url: None,
            api_server_root_path: None,
            build_output_dir: None,
            host_port_api_server: None,
        }
    }
}

impl DashboardEnv {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Builds the settings from any `(name, value)` source; unrelated names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env = DashboardEnv::default();
        for (key, value) in vars {
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            match key.as_ref() {
                "APP_PROFILE" => env.profile = Profile::parse(value.trim())?,
                "SERVER_BASE_URL" => env.server_base_url = Some(value),
                "APISERVER_PORT" => env.apiserver_port = Some(value),
                "DASHBOARD_URL" => env.dashboard_url = Some(value),
                "API_SERVER_ROOT_PATH" => env.api_server_root_path = Some(value),
                "BUILD_OUTPUT_DIR" => env.build_output_dir = Some(value),
                "HOST_PORT_API_SERVER" => env.host_port_api_server = Some(value),
                _ => {}
            }
        }
        Ok(env)
    }

    /// Path prefix the dashboard is mounted under, always `/`-delimited.
    ///
    /// `/dashboard/` by default; `DASHBOARD_URL=ops` gives `/ops/` and adding
    /// `API_SERVER_ROOT_PATH=/api` gives `/api/ops/`.
    pub fn base_path(&self) -> String {
        let root = self.api_server_root_path.as_deref().unwrap_or("");
        let dashboard = self
            .dashboard_url
            .as_deref()
            .unwrap_or(DEFAULT_DASHBOARD_URL);

        let segments: Vec<&str> = root
            .split('/')
            .chain(dashboard.split('/'))
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", segments.join("/"))
        }
    }

    /// Root every API request is resolved against.
    pub fn server_base_url(&self) -> String {
        match self.profile {
            Profile::Production => self.base_path(),
            Profile::Development => {
                let host = self
                    .server_base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_SERVER_BASE_URL)
                    .trim_end_matches('/');
                let port = self
                    .apiserver_port
                    .as_deref()
                    .or(self.host_port_api_server.as_deref())
                    .map(str::trim)
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_API_PORT.to_string());
                format!("{}:{}{}", host, port, self.base_path())
            }
        }
    }

    /// Port the API server binds to.
    pub fn api_port(&self) -> Result<u16, ConfigError> {
        match self.host_port_api_server.as_deref() {
            None => Ok(DEFAULT_API_PORT),
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "HOST_PORT_API_SERVER",
                value: value.to_string(),
            }),
        }
    }

    /// Directory the static dashboard build is written to and served from.
    /// Relative paths are relative to the backend crate.
    pub fn build_output_dir(&self) -> PathBuf {
        PathBuf::from(
            self.build_output_dir
                .as_deref()
                .unwrap_or(DEFAULT_BUILD_OUTPUT_DIR),
        )
    }

    /// Whether `dir`, the resolved output directory, may be emptied before a
    /// new dashboard build is copied in.
    ///
    /// Directories inside `crate_dir` qualify, as do directories elsewhere
    /// that already hold a dashboard build (an `index.html`) or do not exist yet.
    pub fn may_replace_output_dir(dir: &Path, crate_dir: &Path) -> bool {
        if dir.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }
        if dir.starts_with(crate_dir) && dir != crate_dir {
            return true;
        }
        !dir.exists() || dir.join("index.html").is_file()
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            server_base_url: self.server_base_url(),
            base_path: self.base_path(),
        }
    }
}

/// What the running dashboard knows about its deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub server_base_url: String,
    pub base_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        DashboardEnv::default().runtime_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> DashboardEnv {
        DashboardEnv::from_vars(vars.iter().copied()).unwrap()
    }

    #[test]
    fn base_path_defaults_to_dashboard() {
        assert_eq!(env(&[]).base_path(), "/dashboard/");
    }

    #[test]
    fn base_path_uses_dashboard_url() {
        assert_eq!(env(&[("DASHBOARD_URL", "ops")]).base_path(), "/ops/");
    }

    #[test]
    fn base_path_prefixes_root_path() {
        let env = env(&[("DASHBOARD_URL", "ops"), ("API_SERVER_ROOT_PATH", "/api")]);
        assert_eq!(env.base_path(), "/api/ops/");
    }

    #[test]
    fn base_path_root_path_only() {
        let env = env(&[("API_SERVER_ROOT_PATH", "/api/")]);
        assert_eq!(env.base_path(), "/api/dashboard/");
    }

    #[test]
    fn base_path_never_doubles_slashes() {
        let roots = [None, Some("api"), Some("/api"), Some("/api/"), Some("//api//v1/")];
        let dashboards = [None, Some("ops"), Some("/ops"), Some("ops/"), Some("/ops/")];

        for root in roots {
            for dashboard in dashboards {
                let mut vars = Vec::new();
                if let Some(root) = root {
                    vars.push(("API_SERVER_ROOT_PATH", root));
                }
                if let Some(dashboard) = dashboard {
                    vars.push(("DASHBOARD_URL", dashboard));
                }
                let path = env(&vars).base_path();

                assert!(path.starts_with('/') && path.ends_with('/'), "{path}");
                assert!(!path.contains("//"), "{path}");
                let expected_tail = if dashboard.is_some() { "ops/" } else { "dashboard/" };
                assert_eq!(path.matches(expected_tail).count(), 1, "{path}");
            }
        }
    }

    #[test]
    fn empty_values_count_as_unset() {
        let env = env(&[("DASHBOARD_URL", ""), ("API_SERVER_ROOT_PATH", "  ")]);
        assert_eq!(env.base_path(), "/dashboard/");
    }

    #[test]
    fn production_calls_the_serving_origin() {
        let env = env(&[("APP_PROFILE", "production"), ("DASHBOARD_URL", "ops")]);
        assert_eq!(env.server_base_url(), "/ops/");
    }

    #[test]
    fn development_targets_the_api_port() {
        let env = env(&[
            ("APP_PROFILE", "development"),
            ("SERVER_BASE_URL", "http://127.0.0.1/"),
            ("APISERVER_PORT", "8080"),
        ]);
        assert_eq!(env.server_base_url(), "http://127.0.0.1:8080/dashboard/");
    }

    #[test]
    fn development_falls_back_to_host_port_then_default() {
        let env = env(&[("APP_PROFILE", "dev"), ("HOST_PORT_API_SERVER", "5050")]);
        assert_eq!(env.server_base_url(), "http://localhost:5050/dashboard/");

        let env = env_default_dev();
        assert_eq!(env.server_base_url(), "http://localhost:5000/dashboard/");
    }

    fn env_default_dev() -> DashboardEnv {
        DashboardEnv {
            profile: Profile::Development,
            ..DashboardEnv::default()
        }
    }

    #[test]
    fn api_port_is_validated() {
        assert_eq!(env(&[]).api_port(), Ok(DEFAULT_API_PORT));
        assert_eq!(env(&[("HOST_PORT_API_SERVER", "4000")]).api_port(), Ok(4000));
        assert!(matches!(
            env(&[("HOST_PORT_API_SERVER", "http")]).api_port(),
            Err(ConfigError::InvalidPort { .. })
        ));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let result = DashboardEnv::from_vars([("APP_PROFILE", "staging")]);
        assert_eq!(result, Err(ConfigError::UnknownProfile("staging".into())));
    }

    #[test]
    fn output_dir_outside_the_crate_needs_a_previous_build() {
        let crate_dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let site = outside.path().join("site");
        std::fs::create_dir(&site).unwrap();

        assert!(DashboardEnv::may_replace_output_dir(
            &crate_dir.path().join("static/dist"),
            crate_dir.path()
        ));
        assert!(!DashboardEnv::may_replace_output_dir(crate_dir.path(), crate_dir.path()));
        assert!(!DashboardEnv::may_replace_output_dir(
            &crate_dir.path().join("../elsewhere"),
            crate_dir.path()
        ));
        assert!(!DashboardEnv::may_replace_output_dir(outside.path(), crate_dir.path()));
        assert!(DashboardEnv::may_replace_output_dir(&outside.path().join("new"), crate_dir.path()));

        std::fs::write(site.join("index.html"), "").unwrap();
        assert!(DashboardEnv::may_replace_output_dir(&site, crate_dir.path()));
    }

    #[test]
    fn build_output_dir_defaults_under_backend_static() {
        assert_eq!(env(&[]).build_output_dir(), PathBuf::from("static/dist"));
        assert_eq!(
            env(&[("BUILD_OUTPUT_DIR", "/srv/www")]).build_output_dir(),
            PathBuf::from("/srv/www")
        );
    }
}
