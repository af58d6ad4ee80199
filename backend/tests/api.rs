use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{test, web, App};
use backend::dashboard::DashboardSite;
use backend::database::Database;
use common::model::collection::Collection;
use common::model::connection::Connection;
use common::model::general_option::GeneralOption;
use common::model::license::LicenseTitle;
use common::model::namespace::Namespace;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const BASE_PATH: &str = "/api/ops/";

struct Fixture {
    _dir: TempDir,
    database: Database,
    site: DashboardSite,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let database = Database::new(dir.path().join("dashboard.sqlite"));
    database.init().unwrap();

    let static_dir = dir.path().join("dist");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(static_dir.join("index.html"), "<html>dashboard</html>").unwrap();
    fs::create_dir_all(static_dir.join("built")).unwrap();
    fs::write(
        static_dir.join("built").join("index.html"),
        r#"<script type="module">import init from '/dashboard/app-1a2b.js';</script>"#,
    )
    .unwrap();
    fs::write(static_dir.join("app-1a2b.js"), "export default 1;").unwrap();

    Fixture {
        site: DashboardSite::new(BASE_PATH, static_dir),
        database,
        _dir: dir,
    }
}

macro_rules! app {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new($fixture.database.clone()))
                .app_data(web::Data::new($fixture.site.clone()))
                .configure(|cfg| backend::configure(cfg, BASE_PATH)),
        )
        .await
    };
}

fn connection(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "host": "localhost",
        "port": 5432,
        "role": "postgres",
        "password": "postgres",
        "database_name": "gis"
    })
}

#[actix_web::test]
async fn connection_lifecycle() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/connections")
        .set_json(connection("main"))
        .to_request();
    let created: Connection = test::call_and_read_body_json(&app, req).await;
    assert!(!created.uuid.is_nil());

    let req = test::TestRequest::get()
        .uri("/api/ops/data/connections/")
        .to_request();
    let listed: Vec<Connection> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, vec![created.clone()]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/ops/data/connections/{}", created.uuid))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/ops/data/connections/{}", created.uuid))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn legacy_collection_payload_is_stored_in_canonical_shape() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/connections")
        .set_json(connection("main"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/collections")
        .set_json(json!({
            "id": "rivers",
            "title": "Rivers",
            "connection": "main",
            "license": "CC-BY-4.0",
            "bbox": [[5.8, 47.2], [15.0, 55.0]],
            "interval": [["2020-01-01T00:00:00Z", null]]
        }))
        .to_request();
    let created: Vec<Collection> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/ops/data/collections/{}", created[0].uuid))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["extent"]["spatial"]["bbox"], json!([[5.8, 47.2], [15.0, 55.0]]));
    assert_eq!(body["extent"]["temporal"]["interval"][0][1], json!(null));
    assert!(body.get("bbox").is_none());
}

#[actix_web::test]
async fn collection_with_unknown_connection_conflicts() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/collections")
        .set_json(json!([{"id": "lakes", "title": "Lakes", "connection": "missing"}]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn licenses_are_listed() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/ops/data/collections/licenses")
        .to_request();
    let titles: Vec<LicenseTitle> = test::call_and_read_body_json(&app, req).await;
    assert!(titles.iter().any(|l| l.title == "CC0-1.0"));
}

#[actix_web::test]
async fn options_accept_data_alias_and_reject_empty_updates() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::put()
        .uri("/api/ops/data/options")
        .set_json(json!([{"key": "service_title", "data": "Rivers API"}]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/ops/data/options").to_request();
    let options: Vec<GeneralOption> = test::call_and_read_body_json(&app, req).await;
    assert!(options.contains(&GeneralOption::new("service_title", "Rivers API")));

    let req = test::TestRequest::put()
        .uri("/api/ops/data/options")
        .set_json(json!([]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn namespaces_round_trip() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/namespaces")
        .set_json(json!({"name": "hydro", "url": "https://example.org/hydro"}))
        .to_request();
    let created: Namespace = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/api/ops/data/namespaces").to_request();
    let listed: Vec<Namespace> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, vec![created]);
}

#[actix_web::test]
async fn dashboard_routes_fall_back_to_index() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::get().uri("/api/ops/collections/rivers").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "<html>dashboard</html>".as_bytes());

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get("location").unwrap(), BASE_PATH);

    let req = test::TestRequest::get().uri("/elsewhere").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn built_assets_are_served_under_a_custom_base_path() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::get().uri("/api/ops/built/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("from '/api/ops/app-1a2b.js'"), "{}", html);

    let req = test::TestRequest::get().uri("/api/ops/app-1a2b.js").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn patch_without_uuid_is_a_bad_request() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/connections")
        .set_json(connection("main"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::patch()
        .uri("/api/ops/data/collections")
        .set_json(json!({"id": "x", "title": "X", "connection": "main"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn patch_updates_an_existing_collection() {
    let fixture = fixture();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/connections")
        .set_json(connection("main"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/ops/data/collections")
        .set_json(json!({"id": "rivers", "title": "Rivers", "connection": "main"}))
        .to_request();
    let created: Vec<Collection> = test::call_and_read_body_json(&app, req).await;

    let mut changed = created[0].clone();
    changed.title = "Rivers and streams".to_string();
    let req = test::TestRequest::patch()
        .uri("/api/ops/data/collections")
        .set_json(&changed)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/ops/data/collections/{}", changed.uuid))
        .to_request();
    let stored: Collection = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored.title, "Rivers and streams");
}
