use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, post};
use axum::{Json, Router};
use company_accounting::database::db::{queries, Backend, DbError, SupabaseClient, TableQuery};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    path: String,
    query: Option<String>,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

async fn table(
    State(log): State<Log>,
    method: Method,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    log.lock().await.push(Seen {
        method: method.clone(),
        path: format!("/rest/v1/{table}"),
        query,
        apikey: header(&headers, "apikey"),
        authorization: header(&headers, "authorization"),
        prefer: header(&headers, "prefer"),
        body: serde_json::from_str(&body).ok(),
    });
    match (method, table.as_str()) {
        (Method::GET, "accounts") => (
            StatusCode::OK,
            Json(json!([{
                "account_id": Uuid::nil(),
                "account_name": "Cash",
                "account_type": "asset",
                "category_tag": "cash",
                "expense_nature": null
            }])),
        )
            .into_response(),
        (Method::PATCH, "fixed_assets") => (StatusCode::OK, Json(json!([]))).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("relation \"public.{table}\" does not exist") })),
        )
            .into_response(),
    }
}

async fn rpc(
    State(log): State<Log>,
    Path(function): Path<String>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> impl IntoResponse {
    log.lock().await.push(Seen {
        method: Method::POST,
        path: format!("/rest/v1/rpc/{function}"),
        query: None,
        apikey: header(&headers, "apikey"),
        authorization: header(&headers, "authorization"),
        prefer: header(&headers, "prefer"),
        body: Some(params),
    });
    match function.as_str() {
        "get_debt_summary" => (
            StatusCode::OK,
            Json(json!({ "total_receivable": 10.5, "total_payable": "4", "net_position": 6.5 })),
        )
            .into_response(),
        "vault_amount_insert" => StatusCode::NO_CONTENT.into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "code": "P0001", "message": "amount must be positive" })),
        )
            .into_response(),
    }
}

async fn mock_postgrest() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/rest/v1/rpc/:function", post(rpc))
        .route("/rest/v1/:table", any(table))
        .with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });
    (format!("http://{addr}/"), log)
}

fn client(base: &str) -> SupabaseClient {
    SupabaseClient::new(base, "test-key", Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn select_sends_auth_headers_and_postgrest_params() {
    let (base, log) = mock_postgrest().await;
    let db = client(&base);

    let accounts = queries::list_accounts(&db, Some("asset")).await.expect("accounts");
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].account_name, "Cash");

    let seen = log.lock().await[0].clone();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.path, "/rest/v1/accounts");
    assert_eq!(seen.apikey.as_deref(), Some("test-key"));
    assert_eq!(seen.authorization.as_deref(), Some("Bearer test-key"));
    assert_eq!(
        seen.query.as_deref(),
        Some("select=*&account_type=eq.asset&order=account_name.asc")
    );
}

#[tokio::test]
async fn rpc_posts_params_and_decodes_mixed_number_formats() {
    let (base, log) = mock_postgrest().await;
    let db = client(&base);
    let company = Uuid::new_v4();

    let summary = queries::get_debt_summary(&db, company, None).await.expect("summary");
    assert_eq!(summary.total_receivable.to_string(), "10.5");
    assert_eq!(summary.total_payable.to_string(), "4");

    let seen = log.lock().await[0].clone();
    assert_eq!(seen.path, "/rest/v1/rpc/get_debt_summary");
    assert_eq!(seen.body, Some(json!({ "p_company_id": company, "p_store_id": null })));
}

#[tokio::test]
async fn empty_rpc_response_is_null() {
    let (base, _log) = mock_postgrest().await;
    let db = client(&base);
    let out = db.rpc("vault_amount_insert", json!({})).await.expect("rpc");
    assert_eq!(out, Value::Null);
}

#[tokio::test]
async fn error_bodies_become_upstream_errors() {
    let (base, _log) = mock_postgrest().await;
    let db = client(&base);

    match db.rpc("bank_amount_insert_v2", json!({})).await {
        Err(DbError::Upstream { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "amount must be positive");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }

    let err = db
        .select(&TableQuery::new("no_such_table"))
        .await
        .expect_err("missing table");
    assert!(matches!(err, DbError::Upstream { status: 404, .. }));
}

#[tokio::test]
async fn writes_ask_for_representation() {
    let (base, log) = mock_postgrest().await;
    let db = client(&base);

    let q = TableQuery::new("fixed_assets").eq("asset_id", Uuid::nil());
    let rows = db.update(&q, json!({ "asset_name": "Van" })).await.expect("update");
    assert!(rows.is_empty());

    let seen = log.lock().await[0].clone();
    assert_eq!(seen.method, Method::PATCH);
    assert_eq!(seen.prefer.as_deref(), Some("return=representation"));
    assert_eq!(
        seen.query.as_deref(),
        Some(format!("asset_id=eq.{}", Uuid::nil()).as_str())
    );
    assert_eq!(seen.body, Some(json!({ "asset_name": "Van" })));
}
