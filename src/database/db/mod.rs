//! Access to the hosted backend: PostgREST tables and RPC functions.

pub mod client;
pub mod connection;
pub mod memory;
pub mod queries;
pub mod query;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use client::SupabaseClient;
pub use memory::MemoryBackend;
pub use query::{Filter, TableQuery};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Upstream { status: u16, message: String },
    /// The RPC ran but refused the request (`{"success": false, ...}`).
    #[error("{0}")]
    Rejected(String),
    #[error("could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

#[async_trait]
pub trait Backend: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, DbError>;

    /// Returns the inserted rows.
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, DbError>;

    /// Returns the updated rows; empty when nothing matched.
    async fn update(&self, query: &TableQuery, patch: Value) -> Result<Vec<Value>, DbError>;

    /// Returns the deleted rows; empty when nothing matched.
    async fn delete(&self, query: &TableQuery) -> Result<Vec<Value>, DbError>;

    async fn rpc(&self, function: &str, params: Value) -> Result<Value, DbError>;
}
