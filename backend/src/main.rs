use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use backend::config::ServerConfig;
use backend::dashboard::DashboardSite;
use backend::database::Database;
use env_logger::Env;
use log::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let level = if config.debug { "debug" } else { "info" };
    env_logger::init_from_env(Env::default().default_filter_or(level));

    let database = Database::new(config.database_path.clone());
    if let Err(e) = database.init() {
        error!("Error while initializing database {}: {}", config.database_path.display(), e);
        std::process::exit(1);
    }

    let base_path = config.base_path();
    let site = DashboardSite::new(base_path.clone(), config.static_dir.clone());
    if !site.static_dir().join("index.html").is_file() {
        warn!(
            "No dashboard build found in {}; only the data API is available",
            site.static_dir().display()
        );
    }

    let database = web::Data::new(database);
    let site = web::Data::new(site);

    info!(
        "Dashboard served at http://{}:{}{} (API base {})",
        config.host,
        config.port,
        base_path,
        config.dashboard.server_base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(database.clone())
            .app_data(site.clone())
            .configure(|cfg| backend::configure(cfg, &base_path))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
