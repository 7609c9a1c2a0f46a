pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::render::handlers as render;
use crate::resumes::handlers as resumes;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Layouts and stateless rendering
        .route("/api/v1/layouts", get(render::handle_list_layouts))
        .route("/api/v1/render/preview", post(render::handle_render_preview))
        .route("/api/v1/render/export", post(render::handle_render_export))
        // Editing sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_discard_session),
        )
        .route("/api/v1/sessions/:id/edits", post(session::handle_apply_edit))
        .route(
            "/api/v1/sessions/:id/preview",
            get(session::handle_session_preview),
        )
        .route(
            "/api/v1/sessions/:id/export",
            post(session::handle_session_export),
        )
        // Saved-resume library
        .route("/api/v1/resumes", get(resumes::handle_list_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/export",
            post(resumes::handle_retry_export),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::test_support::TestHarness;

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn call_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = call(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn open_session(app: &Router, user_id: Uuid) -> String {
        let (status, body) = call_json(
            app,
            Method::POST,
            "/api/v1/sessions",
            Some(json!({ "user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(TestHarness::new().state);
        let (status, body) = call_json(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_lists_all_layouts() {
        let app = build_router(TestHarness::new().state);
        let (status, body) = call_json(&app, Method::GET, "/api/v1/layouts", None).await;
        assert_eq!(status, StatusCode::OK);
        let layouts = body.as_array().unwrap();
        assert_eq!(layouts.len(), 10);
        assert_eq!(layouts[0]["id"], 1);
        assert_eq!(layouts[4]["structure"], "grid-2col");
    }

    #[tokio::test]
    async fn test_edit_preview_export_flow() {
        let harness = TestHarness::new();
        let app = build_router(harness.state.clone());
        let user_id = Uuid::new_v4();
        let id = open_session(&app, user_id).await;

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({ "op": "set_personal", "field": "name", "value": "Grace Hopper" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["document"]["personal"]["name"], "Grace Hopper");

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({ "op": "set_layout", "layout_id": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["layout_id"], 2);

        let (status, body) =
            call_json(&app, Method::GET, &format!("/api/v1/sessions/{id}/preview"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout_id"], 2);
        assert_eq!(body["header"]["name"], "Grace Hopper");

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/export"),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Grace Hopper");
        let resume_id = body["resume_id"].as_str().unwrap().to_string();

        let (status, body) = call_json(
            &app,
            Method::GET,
            &format!("/api/v1/resumes?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], resume_id.as_str());
    }

    #[tokio::test]
    async fn test_export_failure_is_distinct_and_keeps_record() {
        let harness = TestHarness::with_failing_printer();
        let app = build_router(harness.state.clone());
        let id = open_session(&app, Uuid::new_v4()).await;

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/export"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "EXPORT_FAILED");

        let rows = harness.resumes.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(body["error"]["resume_id"], rows[0].id.to_string());
    }

    #[tokio::test]
    async fn test_malformed_export_body_saves_nothing() {
        let harness = TestHarness::new();
        let app = build_router(harness.state.clone());
        let id = open_session(&app, Uuid::new_v4()).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/sessions/{id}/export"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(harness.resumes.rows().is_empty());
        assert!(harness.printer.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_edit_is_rejected() {
        let app = build_router(TestHarness::new().state);
        let id = open_session(&app, Uuid::new_v4()).await;
        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({ "op": "set_font_size", "font_size": 20.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_session_is_not_found() {
        let app = build_router(TestHarness::new().state);
        let (status, _) = call_json(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_discarded_session_is_gone() {
        let app = build_router(TestHarness::new().state);
        let id = open_session(&app, Uuid::new_v4()).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_opening_unreadable_record_carries_notice() {
        let harness = TestHarness::new();
        let app = build_router(harness.state.clone());
        let user_id = Uuid::new_v4();
        let row = harness.resumes.insert_raw(user_id, "Old", "not json");

        let (status, body) = call_json(
            &app,
            Method::POST,
            "/api/v1/sessions",
            Some(json!({ "user_id": user_id, "resume_id": row.id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["notice"], "could not load saved data");
        assert_eq!(body["resume_id"], row.id.to_string());
    }

    #[tokio::test]
    async fn test_library_search_and_delete() {
        let harness = TestHarness::new();
        let app = build_router(harness.state.clone());
        let user_id = Uuid::new_v4();
        harness.resumes.insert_raw(user_id, "Backend roles", "{}");
        let frontend = harness.resumes.insert_raw(user_id, "Frontend roles", "{}");
        harness.resumes.insert_raw(Uuid::new_v4(), "Backend elsewhere", "{}");

        let (_, body) = call_json(
            &app,
            Method::GET,
            &format!("/api/v1/resumes?user_id={user_id}&q=backend"),
            None,
        )
        .await;
        let found = body.as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Backend roles");

        let uri = format!("/api/v1/resumes/{}?user_id={user_id}", frontend.id);
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_retry_after_failed_export_keeps_order() {
        let harness = TestHarness::with_failing_printer();
        let app = build_router(harness.state.clone());
        let user_id = Uuid::new_v4();
        let id = open_session(&app, user_id).await;
        let edits = format!("/api/v1/sessions/{id}/edits");
        for index in [5, 4, 3, 2, 1] {
            let (status, _) = call_json(
                &app,
                Method::POST,
                &edits,
                Some(json!({ "op": "move_section", "index": index, "direction": "up" })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/export"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let resume_id = body["error"]["resume_id"].as_str().unwrap().to_string();

        harness.printer.set_failing(false);
        let (status, _) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/resumes/{resume_id}/export"),
            Some(json!({ "user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let jobs = harness.printer.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].html, jobs[1].html);
        let (_, saved) = call_json(
            &app,
            Method::GET,
            &format!("/api/v1/resumes/{resume_id}?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(saved["section_order"][0], "languages");
    }

    #[tokio::test]
    async fn test_retry_export_route() {
        let harness = TestHarness::new();
        let app = build_router(harness.state.clone());
        let user_id = Uuid::new_v4();
        let row = harness.resumes.insert_raw(user_id, "Saved", "{}");

        let (status, body) = call_json(
            &app,
            Method::POST,
            &format!("/api/v1/resumes/{}/export", row.id),
            Some(json!({ "user_id": user_id, "layout_id": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Saved");
        assert!(body["print_url"].as_str().unwrap().contains(&row.id.to_string()));
    }

    #[tokio::test]
    async fn test_stateless_export_returns_html() {
        let app = build_router(TestHarness::new().state);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/render/export")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "document": { "personal": { "name": "Ada" } }, "layout_id": 7 }).to_string(),
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ada</title>"));
    }
}
