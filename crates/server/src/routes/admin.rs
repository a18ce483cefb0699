use crate::{
    dtos::record::{
        ListParams, ModelResponse, PaginatedRecordsResponse, PaginationMeta, RecordResponse,
    },
    error::ApiError,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use database::{
    admin::site,
    entities::*,
    services::{KeyOf, Record, RecordService},
};
use sea_orm::{DatabaseConnection, IntoActiveModel};
use serde::Serialize;
use std::fmt::Display;

/// List the models registered with the administration surface
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Registered models", body = [ModelResponse])
    ),
    tag = "Admin"
)]
pub async fn index() -> Json<Vec<ModelResponse>> {
    Json(site().into_iter().map(ModelResponse::from).collect())
}

pub async fn list<E>(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedRecordsResponse>, ApiError>
where
    E: Record,
    E::Model: Serialize + Sync,
{
    let (page, per_page) = params.bounds();
    let (models, total_items) =
        RecordService::list::<E>(&db, page, per_page, params.search.as_deref()).await?;

    let mut records = Vec::with_capacity(models.len());
    for model in &models {
        records.push(RecordResponse::of::<E>(&db, model).await?);
    }

    Ok(Json(PaginatedRecordsResponse {
        model: E::NAME.to_owned(),
        records,
        pagination: PaginationMeta::new(page, per_page, total_items),
    }))
}

pub async fn create<E>(
    State(db): State<DatabaseConnection>,
    Json(form): Json<E::Form>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError>
where
    E: Record,
    E::Model: Serialize + IntoActiveModel<E::Active>,
{
    let model = RecordService::create::<E>(&db, form).await?;
    let response = RecordResponse::of::<E>(&db, &model).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn retrieve<E>(
    State(db): State<DatabaseConnection>,
    Path(key): Path<KeyOf<E>>,
) -> Result<Json<RecordResponse>, ApiError>
where
    E: Record,
    E::Model: Serialize,
    KeyOf<E>: Display,
{
    let model = RecordService::get::<E>(&db, key).await?;
    Ok(Json(RecordResponse::of::<E>(&db, &model).await?))
}

pub async fn update<E>(
    State(db): State<DatabaseConnection>,
    Path(key): Path<KeyOf<E>>,
    Json(form): Json<E::Form>,
) -> Result<Json<RecordResponse>, ApiError>
where
    E: Record,
    E::Model: Serialize + IntoActiveModel<E::Active>,
    KeyOf<E>: Clone + Display,
{
    let model = RecordService::update::<E>(&db, key, form).await?;
    Ok(Json(RecordResponse::of::<E>(&db, &model).await?))
}

pub async fn destroy<E>(
    State(db): State<DatabaseConnection>,
    Path(key): Path<KeyOf<E>>,
) -> Result<StatusCode, ApiError>
where
    E: Record,
    KeyOf<E>: Clone + Display,
{
    RecordService::delete::<E>(&db, key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mounts the list/create and retrieve/update/destroy routes of each entity
/// under its registry name
macro_rules! register {
    ($router:expr, $($entity:ident),+ $(,)?) => {
        $router
            $(
                .route(
                    &format!("/{}", <$entity::Entity as Record>::NAME),
                    get(list::<$entity::Entity>).post(create::<$entity::Entity>),
                )
                .route(
                    &format!("/{}/{{key}}", <$entity::Entity as Record>::NAME),
                    get(retrieve::<$entity::Entity>)
                        .put(update::<$entity::Entity>)
                        .delete(destroy::<$entity::Entity>),
                )
            )+
    };
}

pub fn router() -> Router<DatabaseConnection> {
    register!(
        Router::new().route("/", get(index)),
        students,
        professors,
        courses,
        enrollments,
        departments,
        classrooms,
        schedules,
        assignments,
        grade_reports,
    )
}
