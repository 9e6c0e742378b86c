//! In-process backend holding table rows and canned RPC responses.
//!
//! Filters follow PostgREST semantics closely enough for tests: values are
//! compared as numbers when both sides parse as numbers, otherwise as text.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{Backend, DbError, Filter, TableQuery};

#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    rpc_responses: Mutex<HashMap<String, Value>>,
    rpc_calls: Mutex<Vec<(String, Value)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_table(&self, table: &str, rows: Vec<Value>) {
        self.tables
            .lock()
            .await
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    pub async fn table(&self, table: &str) -> Vec<Value> {
        self.tables.lock().await.get(table).cloned().unwrap_or_default()
    }

    /// Every later call to `function` returns `response`.
    pub async fn on_rpc(&self, function: &str, response: Value) {
        self.rpc_responses
            .lock()
            .await
            .insert(function.to_string(), response);
    }

    /// Parameters of every call made to `function`, oldest first.
    pub async fn rpc_calls(&self, function: &str) -> Vec<Value> {
        self.rpc_calls
            .lock()
            .await
            .iter()
            .filter(|(f, _)| f == function)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn compare(field: &str, wanted: &str) -> Ordering {
    match (field.parse::<f64>(), wanted.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => field.cmp(wanted),
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    let field = row.get(filter.column()).and_then(scalar_text);
    match (filter, field) {
        (Filter::IsNull(_), field) => field.is_none(),
        (_, None) => false,
        (Filter::Eq(_, v), Some(f)) => compare(&f, v) == Ordering::Equal,
        (Filter::Neq(_, v), Some(f)) => compare(&f, v) != Ordering::Equal,
        (Filter::Gte(_, v), Some(f)) => compare(&f, v) != Ordering::Less,
        (Filter::Lte(_, v), Some(f)) => compare(&f, v) != Ordering::Greater,
        (Filter::In(_, vs), Some(f)) => vs.iter().any(|v| compare(&f, v) == Ordering::Equal),
    }
}

fn matching<'a>(rows: &'a [Value], query: &'a TableQuery) -> impl Iterator<Item = (usize, &'a Value)> {
    rows.iter()
        .enumerate()
        .filter(move |(_, row)| query.filters.iter().all(|f| matches(row, f)))
}

fn sort_rows(rows: &mut [Value], order: &[(String, bool)]) {
    rows.sort_by(|a, b| {
        for (column, ascending) in order {
            let a = a.get(column).and_then(scalar_text);
            let b = b.get(column).and_then(scalar_text);
            let ord = match (a, b) {
                (Some(a), Some(b)) => compare(&a, &b),
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            let ord = if *ascending { ord } else { ord.reverse() };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

#[async_trait]
impl Backend for MemoryBackend {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, DbError> {
        let tables = self.tables.lock().await;
        let rows = tables.get(&query.table).map(Vec::as_slice).unwrap_or_default();
        let mut out: Vec<Value> = matching(rows, query).map(|(_, r)| r.clone()).collect();
        sort_rows(&mut out, &query.order);
        if let Some(n) = query.limit {
            out.truncate(n);
        }
        Ok(out)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, DbError> {
        let inserted = match row {
            Value::Array(rows) => rows,
            row => vec![row],
        };
        self.tables
            .lock()
            .await
            .entry(table.to_string())
            .or_default()
            .extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn update(&self, query: &TableQuery, patch: Value) -> Result<Vec<Value>, DbError> {
        let mut tables = self.tables.lock().await;
        let Some(rows) = tables.get_mut(&query.table) else {
            return Ok(Vec::new());
        };
        let hits: Vec<usize> = matching(rows, query).map(|(i, _)| i).collect();
        let mut updated = Vec::with_capacity(hits.len());
        for i in hits {
            if let (Value::Object(row), Value::Object(changes)) = (&mut rows[i], &patch) {
                for (k, v) in changes {
                    row.insert(k.clone(), v.clone());
                }
            }
            updated.push(rows[i].clone());
        }
        Ok(updated)
    }

    async fn delete(&self, query: &TableQuery) -> Result<Vec<Value>, DbError> {
        let mut tables = self.tables.lock().await;
        let Some(rows) = tables.get_mut(&query.table) else {
            return Ok(Vec::new());
        };
        let (removed, kept): (Vec<Value>, Vec<Value>) = rows
            .drain(..)
            .partition(|row| query.filters.iter().all(|f| matches(row, f)));
        *rows = kept;
        Ok(removed)
    }

    async fn rpc(&self, function: &str, params: Value) -> Result<Value, DbError> {
        self.rpc_calls
            .lock()
            .await
            .push((function.to_string(), params));
        self.rpc_responses
            .lock()
            .await
            .get(function)
            .cloned()
            .ok_or_else(|| DbError::Upstream {
                status: 404,
                message: format!("Could not find the function public.{function}"),
            })
    }
}
