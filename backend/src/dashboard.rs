//! Serves the statically built dashboard under its base path.
//!
//! The dashboard routes on the client, so any path below the base path that
//! is not a file falls back to `index.html`.
//!
//! Trunk writes asset URLs into `index.html` with the `public_url` the bundle
//! was built with ([`BUILD_PUBLIC_URL`]). Index pages are rewritten to the
//! configured base path when served, so one build can be mounted anywhere.

use actix_files::NamedFile;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use log::{debug, error};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// `public_url` in `frontend/Trunk.toml`.
pub const BUILD_PUBLIC_URL: &str = "/dashboard/";

#[derive(Debug, Clone)]
pub struct DashboardSite {
    base_path: String,
    static_dir: PathBuf,
}

impl DashboardSite {
    pub fn new(base_path: impl Into<String>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            static_dir: static_dir.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// The part of `path` below the base path, or `None` outside of it.
    fn relative_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let mount = self.base_path.trim_end_matches('/');
        if mount.is_empty() {
            return Some(path.trim_start_matches('/'));
        }
        match path.strip_prefix(mount) {
            Some("") => Some(""),
            Some(rest) if rest.starts_with('/') => Some(rest.trim_start_matches('/')),
            _ => None,
        }
    }

    /// Maps a request path below the base path to a file in the build output.
    ///
    /// Directories resolve to their `index.html`; unknown paths resolve to the
    /// root `index.html`. Paths escaping the static directory resolve to nothing.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = self.relative_path(request_path)?;
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }

        let candidate = self.static_dir.join(relative);
        if candidate.is_file() {
            return Some(candidate);
        }
        let nested_index = candidate.join("index.html");
        if nested_index.is_file() {
            return Some(nested_index);
        }
        let index = self.static_dir.join("index.html");
        index.is_file().then_some(index)
    }

    /// Points the asset URLs of a built `index.html` at the base path.
    ///
    /// Only quoted attribute and import values starting with
    /// [`BUILD_PUBLIC_URL`] are touched.
    pub fn rebase_index(&self, html: &str) -> String {
        if self.base_path == BUILD_PUBLIC_URL {
            return html.to_string();
        }
        ['"', '\''].iter().fold(html.to_string(), |html, quote| {
            html.replace(
                &format!("{}{}", quote, BUILD_PUBLIC_URL),
                &format!("{}{}", quote, self.base_path),
            )
        })
    }
}

fn is_index(path: &Path) -> bool {
    path.file_name() == Some(OsStr::new("index.html"))
}

/// Default service: redirects `/` to the base path and serves dashboard files.
pub async fn serve(req: HttpRequest, site: web::Data<DashboardSite>) -> HttpResponse {
    if req.path() == "/" && site.base_path() != "/" {
        return HttpResponse::Found()
            .insert_header((header::LOCATION, site.base_path().to_string()))
            .finish();
    }

    let Some(file_path) = site.resolve(req.path()) else {
        return HttpResponse::NotFound().body("Not Found");
    };

    debug!("Serving {} for {}", file_path.display(), req.path());
    if is_index(&file_path) {
        let read_path = file_path.clone();
        return match web::block(move || std::fs::read_to_string(read_path)).await {
            Ok(Ok(html)) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(site.rebase_index(&html)),
            Ok(Err(e)) => {
                error!("Error while reading {}: {}", file_path.display(), e);
                HttpResponse::NotFound().body("Not Found")
            }
            Err(e) => {
                error!("Error while reading {}: {}", file_path.display(), e);
                HttpResponse::InternalServerError().body("Internal server error")
            }
        };
    }

    match NamedFile::open_async(&file_path).await {
        Ok(file) => file.into_response(&req),
        Err(_) => HttpResponse::NotFound().body("Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site() -> (tempfile::TempDir, DashboardSite) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("app.js"), "").unwrap();
        fs::create_dir(dir.path().join("options")).unwrap();
        fs::write(dir.path().join("options").join("index.html"), "").unwrap();
        let site = DashboardSite::new("/dashboard/", dir.path());
        (dir, site)
    }

    #[test]
    fn resolves_files_below_base_path() {
        let (dir, site) = site();
        assert_eq!(site.resolve("/dashboard/app.js"), Some(dir.path().join("app.js")));
        assert_eq!(site.resolve("/dashboard"), Some(dir.path().join("index.html")));
        assert_eq!(site.resolve("/dashboard/"), Some(dir.path().join("index.html")));
    }

    #[test]
    fn directories_use_their_index() {
        let (dir, site) = site();
        assert_eq!(
            site.resolve("/dashboard/options"),
            Some(dir.path().join("options").join("index.html"))
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_root_index() {
        let (dir, site) = site();
        assert_eq!(
            site.resolve("/dashboard/collections/rivers"),
            Some(dir.path().join("index.html"))
        );
    }

    const TRUNK_INDEX: &str = r#"<link rel="modulepreload" href="/dashboard/dashboard-frontend-abc.js">
<link rel="stylesheet" href="/dashboard/style-123.css">
<a href="https://example.org/dashboard/">docs</a>
<script type="module">
import init from '/dashboard/dashboard-frontend-abc.js';
init({ module_or_path: '/dashboard/dashboard-frontend-abc_bg.wasm' });
</script>"#;

    #[test]
    fn index_assets_follow_a_custom_base_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dashboard-frontend-abc.js"), "").unwrap();
        let site = DashboardSite::new("/api/ops/", dir.path());

        let html = site.rebase_index(TRUNK_INDEX);
        assert!(!html.contains("\"/dashboard/"));
        assert!(!html.contains("'/dashboard/"));
        assert!(html.contains(r#"href="/api/ops/dashboard-frontend-abc.js""#));
        assert!(html.contains("from '/api/ops/dashboard-frontend-abc.js'"));
        assert!(html.contains("module_or_path: '/api/ops/dashboard-frontend-abc_bg.wasm'"));
        assert!(html.contains("https://example.org/dashboard/"));

        assert_eq!(
            site.resolve("/api/ops/dashboard-frontend-abc.js"),
            Some(dir.path().join("dashboard-frontend-abc.js"))
        );
    }

    #[test]
    fn index_is_unchanged_under_the_build_base_path() {
        let (_dir, site) = site();
        assert_eq!(site.rebase_index(TRUNK_INDEX), TRUNK_INDEX);
    }

    #[test]
    fn paths_outside_base_or_escaping_are_rejected() {
        let (_dir, site) = site();
        assert_eq!(site.resolve("/other/app.js"), None);
        assert_eq!(site.resolve("/dashboardx/app.js"), None);
        assert_eq!(site.resolve("/dashboard/../secret"), None);
    }
}
