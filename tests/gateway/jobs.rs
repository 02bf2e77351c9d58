use purgecron::config::{Config, RepositoryBackend};
use purgecron::gateway::run_gateway_with_listener;
use purgecron::repository::SqliteJobRepository;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct GatewayTestServer {
    port: u16,
    data_dir: TempDir,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl GatewayTestServer {
    async fn start(backend: RepositoryBackend) -> Self {
        let data_dir = TempDir::new().expect("temp data dir should be created");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let mut config = Config {
            data_dir: data_dir.path().to_path_buf(),
            config_path: data_dir.path().join("config.toml"),
            ..Config::default()
        };
        config.repository.backend = backend;

        let host = "127.0.0.1".to_string();
        let handle = tokio::spawn(async move {
            run_gateway_with_listener(&host, listener, Arc::new(config)).await
        });

        wait_until_gateway_ready(port).await;

        Self {
            port,
            data_dir,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}

fn job_body() -> Value {
    serde_json::json!({
        "jobName": "expurgo",
        "cronExpression": "0 3 * * *",
        "databaseName": "expandable",
        "schema": "dbo",
        "table": "person",
        "limit": 100,
        "filters": [{"column": "SentAt", "days": 60}]
    })
}

#[tokio::test]
async fn post_jobs_records_statement_in_outbox() {
    let server = GatewayTestServer::start(RepositoryBackend::Sqlite).await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/jobs"))
        .json(&job_body())
        .send()
        .await
        .expect("create request should complete");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("create response should be json");
    assert_eq!(body["registeredName"], "expandable-expurgo-job");
    assert_eq!(body["acknowledgement"], 1);

    let outbox = SqliteJobRepository::open(&server.data_dir.path().join("statements.db"))
        .await
        .expect("outbox should open");
    let statements = outbox.list_statements().await.expect("outbox should list");
    assert_eq!(statements.len(), 1);
    assert_eq!(Some(statements[0].statement.as_str()), body["query"].as_str());
}

#[tokio::test]
async fn post_jobs_rejects_missing_filters() {
    let server = GatewayTestServer::start(RepositoryBackend::None).await;
    let mut body = job_body();
    body["filters"] = serde_json::json!([]);

    let response = reqwest::Client::new()
        .post(server.url("/jobs"))
        .json(&body)
        .send()
        .await
        .expect("create request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error response should be json");
    assert_eq!(body["error"], "missing_filters");
}

#[tokio::test]
async fn preview_and_lookup_do_not_submit() {
    let server = GatewayTestServer::start(RepositoryBackend::None).await;
    let client = reqwest::Client::new();

    let preview = client
        .post(server.url("/jobs/preview"))
        .json(&job_body())
        .send()
        .await
        .expect("preview request should complete");
    assert_eq!(preview.status(), StatusCode::OK);
    let preview: Value = preview.json().await.expect("preview should be json");
    assert_eq!(preview["cronExpression"], "0 3 * * *");

    let lookup = client
        .get(server.url("/jobs?jobName=expurgo&databaseName=expandable"))
        .send()
        .await
        .expect("lookup request should complete");
    assert_eq!(lookup.status(), StatusCode::OK);
    let lookup: Value = lookup.json().await.expect("lookup should be json");
    assert_eq!(lookup["registeredName"], "expandable-expurgo-job");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = GatewayTestServer::start(RepositoryBackend::None).await;
    let mut body = job_body();
    body["jobName"] = Value::String("x".repeat(70_000));

    let response = reqwest::Client::new()
        .post(server.url("/jobs"))
        .json(&body)
        .send()
        .await
        .expect("oversized request should complete");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
