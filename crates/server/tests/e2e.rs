use std::net::SocketAddr;

use configs::ServiceConfig;
use models::db::{connect_and_migrate, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::{routes, ServerState};

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server_with(service: ServiceConfig) -> anyhow::Result<TestApp> {
    let db = connect_and_migrate(&DatabaseConfig::in_memory()).await?;
    let app = routes::build_router(ServerState::new(db, service));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(ServiceConfig::default()).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn create_todo(c: &reqwest::Client, app: &TestApp, body: Value) -> anyhow::Result<Value> {
    let res = c.post(app.url("/v1/todo")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(res.json().await?)
}

#[tokio::test]
async fn e2e_status_reports_ok() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/status")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["maintenance"], false);
    Ok(())
}

#[tokio::test]
async fn e2e_todo_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = create_todo(&c, &app, json!({"title": "write docs", "description": "api"})).await?;
    let id = created["id"].as_i64().ok_or_else(|| anyhow::anyhow!("id missing"))?;
    assert_eq!(created["completed"], false);
    assert!(created["updated_at"].is_null());

    let res = c.get(app.url(&format!("/v1/todo/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["title"], "write docs");

    let res = c.patch(app.url(&format!("/v1/todo/{id}"))).json(&json!({"completed": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "write docs");
    assert_eq!(updated["description"], "api");
    assert!(!updated["updated_at"].is_null());

    let res = c.delete(app.url(&format!("/v1/todo/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(app.url(&format!("/v1/todo/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "The requested todo was not found");
    Ok(())
}

#[tokio::test]
async fn e2e_listing_shapes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for title in ["a", "b", "c"] {
        create_todo(&c, &app, json!({"title": title})).await?;
    }

    let page = c.get(app.url("/v1/todo?per_page=2&page=abc")).send().await?.json::<Value>().await?;
    assert_eq!(page["total"], 3);
    assert_eq!(page["page"], 1);
    assert_eq!(page["per_page"], 2);
    assert_eq!(page["items"].as_array().map(Vec::len), Some(2));

    let itemized = c.get(app.url("/v1/todo?itemized=TRUE")).send().await?.json::<Value>().await?;
    let obj = itemized.as_object().ok_or_else(|| anyhow::anyhow!("not an object"))?;
    assert_eq!(obj.len(), 1);
    assert_eq!(itemized["items"].as_array().map(Vec::len), Some(3));

    let filtered = c.get(app.url("/v1/todo?title=b&itemize=true")).send().await?.json::<Value>().await?;
    assert_eq!(filtered["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(filtered["items"][0]["title"], "b");
    Ok(())
}

#[tokio::test]
async fn e2e_itemized_count_follows_create_and_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let created = create_todo(&c, &app, json!({"title": "only"})).await?;

    let before = c.get(app.url("/v1/todo?itemized=true")).send().await?.json::<Value>().await?;
    assert_eq!(before["items"].as_array().map(Vec::len), Some(1));

    c.delete(app.url(&format!("/v1/todo/{}", created["id"]))).send().await?;
    let after = c.get(app.url("/v1/todo?itemized=true")).send().await?.json::<Value>().await?;
    assert_eq!(after["items"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn e2e_write_endpoints_require_data() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(app.url("/v1/todo")).json(&json!({})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "No data provided");

    let res = c.post(app.url("/v1/todo")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "No data provided");

    let res = c.patch(app.url("/v1/service-context")).json(&Value::Null).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(app.url("/v1/todo")).json(&json!({"title": "   "})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_bulk_delete_needs_query() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    create_todo(&c, &app, json!({"title": "x"})).await?;
    create_todo(&c, &app, json!({"title": "y", "completed": true})).await?;

    let res = c.delete(app.url("/v1/todo")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Query parameters are required");

    let res = c.delete(app.url("/v1/todo?completed=true")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["deleted"], 1);

    let rest = c.get(app.url("/v1/todo")).send().await?.json::<Value>().await?;
    assert_eq!(rest["total"], 1);
    assert_eq!(rest["items"][0]["title"], "x");
    Ok(())
}

#[tokio::test]
async fn e2e_maintenance_mode_gates_requests() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/v1/maintenance/activate")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["maintenance"], true);

    let res = c.get(app.url("/v1/todo")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Service is currently enduring maintenance"}));

    let res = c.get(app.url("/status")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["maintenance"], true);

    let res = c.get(app.url("/v1/maintenance/deactivate")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(app.url("/v1/todo")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_service_context_patch() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/v1/service-context")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["maintenance"], false);

    let res = c.patch(app.url("/v1/service-context")).json(&json!({"maintenance": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["maintenance"], true);

    // the context route itself is not exempt
    let res = c.get(app.url("/v1/service-context")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn e2e_prefix_scopes_the_app() -> anyhow::Result<()> {
    let service = ServiceConfig { prefix: "/todo-service".into(), ..ServiceConfig::default() };
    let app = start_server_with(service).await?;
    let c = client();

    let res = c.get(app.url("/todo-service/v1/todo")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(app.url("/v1/todo")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "This url does not belong to the app.");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_is_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/v1/todo"].is_object());
    Ok(())
}
