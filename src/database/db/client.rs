use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{Backend, DbError, TableQuery};

/// reqwest-backed client for Supabase's PostgREST and RPC endpoints.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// The key is sent as both `apikey` and bearer token on every request.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, DbError> {
        let mut headers = HeaderMap::new();
        let invalid_key = |_| DbError::InvalidConfig("api key is not a valid header value".into());
        let mut key = HeaderValue::from_str(api_key).map_err(invalid_key)?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(invalid_key)?;
        bearer.set_sensitive(true);
        headers.insert(HeaderName::from_static("apikey"), key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    fn returning(rb: RequestBuilder) -> RequestBuilder {
        rb.header("Prefer", "return=representation")
    }

    async fn rows(rb: RequestBuilder) -> Result<Vec<Value>, DbError> {
        match read_json(rb.send().await?).await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}

/// Non-2xx responses become `DbError::Upstream`, using PostgREST's `message`
/// field when the body is JSON. An empty body decodes to `Value::Null`.
async fn read_json(resp: Response) -> Result<Value, DbError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or(body);
        warn!(status = status.as_u16(), %message, "backend request failed");
        return Err(DbError::Upstream {
            status: status.as_u16(),
            message,
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl Backend for SupabaseClient {
    fn backend_tag(&self) -> &'static str {
        "supabase"
    }

    #[instrument(skip(self), fields(table = %query.table))]
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, DbError> {
        debug!("select");
        let rb = self
            .http
            .get(self.table_url(&query.table))
            .query(&query.to_params());
        Self::rows(rb).await
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, DbError> {
        let rb = Self::returning(self.http.post(self.table_url(table)).json(&row));
        Self::rows(rb).await
    }

    #[instrument(skip(self, patch), fields(table = %query.table))]
    async fn update(&self, query: &TableQuery, patch: Value) -> Result<Vec<Value>, DbError> {
        let params: Vec<(String, String)> = query
            .to_params()
            .into_iter()
            .filter(|(k, _)| k != "select")
            .collect();
        let rb = self
            .http
            .patch(self.table_url(&query.table))
            .query(&params)
            .json(&patch);
        Self::rows(Self::returning(rb)).await
    }

    #[instrument(skip(self), fields(table = %query.table))]
    async fn delete(&self, query: &TableQuery) -> Result<Vec<Value>, DbError> {
        let params: Vec<(String, String)> = query
            .to_params()
            .into_iter()
            .filter(|(k, _)| k != "select")
            .collect();
        let rb = self.http.delete(self.table_url(&query.table)).query(&params);
        Self::rows(Self::returning(rb)).await
    }

    #[instrument(skip(self, params))]
    async fn rpc(&self, function: &str, params: Value) -> Result<Value, DbError> {
        debug!("rpc");
        let resp = self.http.post(self.rpc_url(function)).json(&params).send().await?;
        read_json(resp).await
    }
}
