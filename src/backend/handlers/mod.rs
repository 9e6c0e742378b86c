//! JSON handlers. Context travels in query parameters (`user_id`,
//! `company_id`, `store_id`, dates) and is parsed here so a malformed value
//! yields a 400 with the usual error body.

pub mod assets;
pub mod cash;
pub mod context;
pub mod debts;
pub mod journal;
pub mod statements;

use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    pub user_id: Option<String>,
    pub company_id: Option<String>,
    pub store_id: Option<String>,
    pub counterparty_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub as_of: Option<String>,
    pub account_type: Option<String>,
    pub location_type: Option<String>,
}

impl ScopeQuery {
    pub fn user_id(&self) -> AppResult<Uuid> {
        require_uuid(&self.user_id, "user_id")
    }

    pub fn company_id(&self) -> AppResult<Uuid> {
        require_uuid(&self.company_id, "company_id")
    }

    pub fn store_id(&self) -> AppResult<Option<Uuid>> {
        optional_uuid(&self.store_id, "store_id")
    }

    pub fn counterparty_id(&self) -> AppResult<Option<Uuid>> {
        optional_uuid(&self.counterparty_id, "counterparty_id")
    }

    /// `start_date`/`end_date`, rejecting an inverted range.
    pub fn period(&self) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        let start = optional_date(&self.start_date, "start_date")?;
        let end = optional_date(&self.end_date, "end_date")?;
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(AppError::BadRequest(
                    "start_date must not be after end_date".into(),
                ));
            }
        }
        Ok((start, end))
    }

    pub fn as_of(&self) -> AppResult<NaiveDate> {
        Ok(optional_date(&self.as_of, "as_of")?.unwrap_or_else(today))
    }

    pub fn account_type(&self) -> Option<&str> {
        non_blank(&self.account_type)
    }

    pub fn location_type(&self) -> Option<&str> {
        non_blank(&self.location_type)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn require_uuid(v: &Option<String>, name: &str) -> AppResult<Uuid> {
    optional_uuid(v, name)?.ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
}

pub fn optional_uuid(v: &Option<String>, name: &str) -> AppResult<Option<Uuid>> {
    non_blank(v)
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| AppError::BadRequest(format!("{name} is not a valid id")))
        })
        .transpose()
}

pub fn optional_date(v: &Option<String>, name: &str) -> AppResult<Option<NaiveDate>> {
    non_blank(v)
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
                .map_err(|_| AppError::BadRequest(format!("{name} must be YYYY-MM-DD")))
        })
        .transpose()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
