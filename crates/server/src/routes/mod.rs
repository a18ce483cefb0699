use crate::doc::ApiDoc;
use axum::{Json, Router, routing::get};
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;

pub mod admin;
pub mod health;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/openapi.json", get(openapi))
        .nest("/admin", admin::router())
        .with_state(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        router(db)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    fn ada() -> Value {
        json!({
            "student_number": "12345678",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "enrollment_year": "2023-09-01",
            "major": "CS",
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_lists_models() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/admin", None).await;

        assert_eq!(status, StatusCode::OK);
        let models = body.as_array().unwrap();
        assert_eq!(models.len(), 9);
        assert_eq!(models[0]["name"], "students");
        assert_eq!(models[0]["verbose_name"], "Student");
    }

    #[tokio::test]
    async fn test_student_lifecycle() {
        let app = app().await;

        let (status, body) = send(&app, "POST", "/admin/students", Some(ada())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["display"], "Ada Lovelace (12345678)");
        assert_eq!(body["record"]["major"], "CS");

        let (status, body) = send(&app, "GET", "/admin/students?search=Love", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total_items"], 1);
        assert_eq!(body["records"][0]["record"]["student_number"], "12345678");

        let mut renamed = ada();
        renamed["first_name"] = json!("Augusta");
        let (status, body) = send(&app, "PUT", "/admin/students/12345678", Some(renamed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display"], "Augusta Lovelace (12345678)");

        let (status, _) = send(&app, "DELETE", "/admin/students/12345678", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", "/admin/students/12345678", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Student 12345678 does not exist");
    }

    #[tokio::test]
    async fn test_invalid_records_are_unprocessable() {
        let app = app().await;

        let mut student = ada();
        student["student_number"] = json!("1234");
        let (status, body) = send(&app, "POST", "/admin/students", Some(student)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "student_number must have 8 digits");

        let enrollment = json!({"semester": "Fall23", "student_id": "12345678", "course_id": 40123});
        let (status, _) = send(&app, "POST", "/admin/enrollments", Some(enrollment)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_huge_page_number_returns_empty_page() {
        let app = app().await;
        send(&app, "POST", "/admin/students", Some(ada())).await;

        let (status, body) = send(
            &app,
            "GET",
            "/admin/students?page=18446744073709551615&per_page=100",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["records"], json!([]));
        assert_eq!(body["pagination"]["total_items"], 1);
    }

    #[tokio::test]
    async fn test_malformed_key_is_rejected() {
        let app = app().await;
        let (status, _) = send(&app, "GET", "/admin/courses/not-a-number", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let app = app().await;
        let (status, _) = send(&app, "GET", "/admin/wizards", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
