//! HTTP API for the tally timesheet service.
//!
//! A thin façade over [`tally_store`]: handlers translate requests into
//! store calls and serialize the results back out. Duplicate conflicts
//! surface as `200 false`; anything unexpected is logged and collapsed into
//! a bare 500 by a single error boundary.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::SharedStore;
pub use server::TimesheetServer;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use tally_store::InMemoryTimesheetStore;

    use super::*;

    fn test_router() -> Router {
        let store: SharedStore = Arc::new(InMemoryTimesheetStore::new());
        router::build_router(store, &ServerConfig::default()).unwrap()
    }

    fn entry_json(user_id: i32, project_id: i32, hours: f64, date: &str) -> Value {
        json!({
            "userId": user_id,
            "projectId": project_id,
            "date": date,
            "hoursWorked": hours,
            "description": "worked",
        })
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn bare_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_entry(app: &Router, user_id: i32, project_id: i32, hours: f64, date: &str) {
        let response = send(
            app,
            json_request(
                Method::POST,
                "/timesheet",
                entry_json(user_id, project_id, hours, date),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(true));
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = test_router();
        let response = send(&app, bare_request(Method::GET, "/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn add_then_list_round_trip() {
        let app = test_router();
        post_entry(&app, 1, 10, 7.5, "2025-11-03T09:00:00").await;

        let response = send(&app, bare_request(Method::GET, "/timesheet")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["totalCount"], 1);
        let entry = &body["entries"]["0"];
        assert_eq!(entry["userId"], 1);
        assert_eq!(entry["projectId"], 10);
        assert_eq!(entry["hoursWorked"], 7.5);
        assert_eq!(entry["year"], 2025);
        assert_eq!(entry["month"], 11);
    }

    #[tokio::test]
    async fn duplicate_add_reports_false_with_status_ok() {
        let app = test_router();
        post_entry(&app, 1, 10, 5.0, "2025-11-03").await;

        // Same user, project, and day at a different time of day.
        let response = send(
            &app,
            json_request(
                Method::POST,
                "/timesheet",
                entry_json(1, 10, 2.0, "2025-11-03T18:00:00"),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(false));

        let list = body_json(send(&app, bare_request(Method::GET, "/timesheet")).await).await;
        assert_eq!(list["totalCount"], 1);
    }

    #[tokio::test]
    async fn update_unknown_id_inserts_under_fresh_id() {
        let app = test_router();
        let response = send(
            &app,
            json_request(
                Method::PUT,
                "/timesheet?id=99",
                entry_json(1, 10, 6.0, "2025-11-03"),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(true));

        let list = body_json(send(&app, bare_request(Method::GET, "/timesheet")).await).await;
        assert_eq!(list["totalCount"], 1);
        assert!(list["entries"].get("0").is_some());
        assert!(list["entries"].get("99").is_none());
    }

    #[tokio::test]
    async fn update_known_id_replaces_the_entry() {
        let app = test_router();
        post_entry(&app, 1, 10, 4.0, "2025-11-03").await;

        let response = send(
            &app,
            json_request(
                Method::PUT,
                "/timesheet?id=0",
                entry_json(1, 10, 8.0, "2025-11-04"),
            ),
        )
        .await;
        assert_eq!(body_json(response).await, json!(true));

        let list = body_json(send(&app, bare_request(Method::GET, "/timesheet")).await).await;
        assert_eq!(list["totalCount"], 1);
        assert_eq!(list["entries"]["0"]["hoursWorked"], 8.0);
    }

    #[tokio::test]
    async fn delete_is_idempotent_over_http() {
        let app = test_router();
        post_entry(&app, 1, 10, 5.0, "2025-11-03").await;

        let response = send(&app, bare_request(Method::DELETE, "/timesheet?id=0")).await;
        assert_eq!(response.status(), StatusCode::OK);

        // Deleting the same id again still succeeds and changes nothing.
        let response = send(&app, bare_request(Method::DELETE, "/timesheet?id=0")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let list = body_json(send(&app, bare_request(Method::GET, "/timesheet")).await).await;
        assert_eq!(list["totalCount"], 0);
    }

    #[tokio::test]
    async fn listing_honors_offset_and_limit() {
        let app = test_router();
        for day in 1..=10 {
            post_entry(&app, 1, 10, 1.0, &format!("2025-11-{day:02}")).await;
        }

        let response = send(
            &app,
            bare_request(Method::GET, "/timesheet?offset=3&limit=4"),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["totalCount"], 10);

        let keys: Vec<&String> = body["entries"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["3", "4", "5", "6"]);
    }

    #[tokio::test]
    async fn entries_for_user_filters_by_week() {
        let app = test_router();
        post_entry(&app, 1, 10, 5.0, "2025-11-03").await; // Monday
        post_entry(&app, 1, 10, 3.0, "2025-11-06").await; // same week
        post_entry(&app, 1, 10, 2.0, "2025-11-10").await; // next week
        post_entry(&app, 2, 10, 8.0, "2025-11-03").await; // someone else

        let response = send(
            &app,
            bare_request(Method::GET, "/timesheet/entries/1?date=2025-11-05"),
        )
        .await;
        let body = body_json(response).await;
        let entries = body.as_object().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains_key("0"));
        assert!(entries.contains_key("1"));
    }

    #[tokio::test]
    async fn entries_for_user_without_date_returns_all_of_theirs() {
        let app = test_router();
        post_entry(&app, 1, 10, 5.0, "2025-11-03").await;
        post_entry(&app, 1, 10, 3.0, "2025-11-24").await;
        post_entry(&app, 2, 10, 8.0, "2025-11-03").await;

        let response = send(&app, bare_request(Method::GET, "/timesheet/entries/1")).await;
        let body = body_json(response).await;
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn hours_per_project_aggregates() {
        let app = test_router();
        post_entry(&app, 1, 10, 5.0, "2025-11-03").await;
        post_entry(&app, 1, 10, 3.0, "2025-11-04").await;
        post_entry(&app, 1, 20, 4.0, "2025-11-05").await;
        post_entry(&app, 2, 30, 9.0, "2025-11-03").await;

        let response = send(&app, bare_request(Method::GET, "/timesheet/projects/1")).await;
        let body = body_json(response).await;
        assert_eq!(body["10"], 8.0);
        assert_eq!(body["20"], 4.0);
        assert!(body.get("30").is_none());
    }

    #[tokio::test]
    async fn missing_id_on_delete_is_a_client_error() {
        let app = test_router();
        let response = send(&app, bare_request(Method::DELETE, "/timesheet")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_week_date_is_a_client_error() {
        let app = test_router();
        let response = send(
            &app,
            bare_request(Method::GET, "/timesheet/entries/1?date=not-a-date"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_paths_are_404() {
        let app = test_router();
        let response = send(&app, bare_request(Method::GET, "/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
