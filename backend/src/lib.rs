pub mod config;
pub mod dashboard;
pub mod database;
pub mod services;

use actix_web::web;

/// Registers the data API and the dashboard fallback for a dashboard mounted
/// at `base_path`. Expects `Database` and `DashboardSite` app data.
pub fn configure(cfg: &mut web::ServiceConfig, base_path: &str) {
    cfg.service(services::configure_routes(base_path))
        .default_service(web::route().to(dashboard::serve));
}
