use crate::error::ApiError;
use database::{
    admin::ModelAdmin,
    services::{Record, RecordService},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Largest page a client may ask for
pub const MAX_PER_PAGE: u64 = 100;

/// Highest page number accepted, keeping the row offset within `i64`
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelResponse {
    /// URL segment under `/admin`
    pub name: String,
    pub verbose_name: String,
}

impl From<ModelAdmin> for ModelResponse {
    fn from(model: ModelAdmin) -> Self {
        Self {
            name: model.name.to_owned(),
            verbose_name: model.verbose_name.to_owned(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordResponse {
    /// Human-readable rendering of the record
    pub display: String,
    #[schema(value_type = Object)]
    pub record: serde_json::Value,
}

impl RecordResponse {
    pub async fn of<E>(db: &DatabaseConnection, model: &E::Model) -> Result<Self, ApiError>
    where
        E: Record,
        E::Model: Serialize,
    {
        Ok(Self {
            display: RecordService::display::<E>(db, model).await?,
            record: serde_json::to_value(model)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedRecordsResponse {
    pub model: String,
    pub records: Vec<RecordResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(per_page);

        Self {
            page,
            per_page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Substring matched against the model's search columns
    pub search: Option<String>,
}

impl ListParams {
    /// Page and page size pulled into their valid ranges
    pub fn bounds(&self) -> (u64, u64) {
        (
            self.page.clamp(1, MAX_PAGE),
            self.per_page.clamp(1, MAX_PER_PAGE),
        )
    }
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}
