pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{
    admin, appointments, auth, candidates, counselor, courses, events, jobs, pages, profile,
    resume, saved,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth & profile
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        .route("/api/v1/auth/register", post(auth::handlers::handle_register))
        .route("/api/v1/auth/logout", post(auth::handlers::handle_logout))
        .route("/api/v1/auth/me", get(auth::handlers::handle_me))
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).patch(profile::handle_update_profile),
        )
        .route("/api/v1/saved", get(saved::handle_list_saved))
        .route(
            "/api/v1/saved/:kind/:id",
            put(saved::handle_save_item).delete(saved::handle_unsave_item),
        )
        .route("/api/v1/navigation", get(pages::handlers::handle_resolve))
        .route("/api/v1/navigation/menu", get(pages::handlers::handle_menu))
        // Resume builder
        .route(
            "/api/v1/resumes",
            get(resume::handlers::handle_list_resumes).post(resume::handlers::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resume::handlers::handle_get_resume).delete(resume::handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/draft",
            get(resume::handlers::handle_get_draft).patch(resume::handlers::handle_update_draft),
        )
        .route(
            "/api/v1/resumes/:id/draft/items",
            post(resume::handlers::handle_add_item),
        )
        .route(
            "/api/v1/resumes/:id/draft/items/:item_id",
            put(resume::handlers::handle_replace_item),
        )
        .route(
            "/api/v1/resumes/:id/draft/:section/:item_id",
            axum::routing::delete(resume::handlers::handle_remove_item),
        )
        .route(
            "/api/v1/resumes/:id/autosave",
            put(resume::handlers::handle_set_autosave),
        )
        .route(
            "/api/v1/resumes/:id/save",
            post(resume::handlers::handle_save_resume),
        )
        .route(
            "/api/v1/resumes/:id/completeness",
            get(resume::handlers::handle_resume_completeness),
        )
        // Job board & employer postings
        .route("/api/v1/jobs", get(jobs::handlers::handle_job_board))
        .route("/api/v1/jobs/:id", get(jobs::handlers::handle_get_job))
        .route(
            "/api/v1/employer/jobs",
            get(jobs::handlers::handle_list_postings).post(jobs::handlers::handle_create_posting),
        )
        .route(
            "/api/v1/employer/jobs/:id",
            get(jobs::handlers::handle_get_posting)
                .patch(jobs::handlers::handle_update_posting)
                .delete(jobs::handlers::handle_delete_posting),
        )
        .route(
            "/api/v1/employer/jobs/:id/status",
            patch(jobs::handlers::handle_set_posting_status),
        )
        .route(
            "/api/v1/employer/jobs/:id/duplicate",
            post(jobs::handlers::handle_duplicate_posting),
        )
        // Candidate pipeline
        .route(
            "/api/v1/employer/candidates",
            get(candidates::handlers::handle_list_candidates),
        )
        .route(
            "/api/v1/employer/candidates/summary",
            get(candidates::handlers::handle_pipeline_summary),
        )
        .route(
            "/api/v1/employer/candidates/selection",
            get(candidates::handlers::handle_get_selection)
                .delete(candidates::handlers::handle_clear_selection),
        )
        .route(
            "/api/v1/employer/candidates/selection/toggle",
            post(candidates::handlers::handle_toggle_selection),
        )
        .route(
            "/api/v1/employer/candidates/selection/all",
            post(candidates::handlers::handle_select_all),
        )
        .route(
            "/api/v1/employer/candidates/bulk-status",
            post(candidates::handlers::handle_bulk_status),
        )
        .route(
            "/api/v1/employer/candidates/:id",
            get(candidates::handlers::handle_get_candidate),
        )
        .route(
            "/api/v1/employer/candidates/:id/status",
            patch(candidates::handlers::handle_set_candidate_status),
        )
        .route(
            "/api/v1/employer/candidates/:id/rating",
            put(candidates::handlers::handle_rate_candidate),
        )
        .route(
            "/api/v1/employer/candidates/:id/notes",
            post(candidates::handlers::handle_add_note),
        )
        // Events
        .route(
            "/api/v1/events",
            get(events::handlers::handle_list_events).post(events::handlers::handle_create_event),
        )
        .route(
            "/api/v1/events/:id",
            get(events::handlers::handle_get_event)
                .patch(events::handlers::handle_update_event)
                .delete(events::handlers::handle_delete_event),
        )
        .route(
            "/api/v1/events/:id/cancel",
            post(events::handlers::handle_cancel_event),
        )
        .route(
            "/api/v1/events/:id/registrations",
            get(events::handlers::handle_list_registrations),
        )
        .route(
            "/api/v1/events/:id/register",
            post(events::handlers::handle_register).delete(events::handlers::handle_unregister),
        )
        .route(
            "/api/v1/events/:id/stats",
            get(events::handlers::handle_event_stats),
        )
        .route(
            "/api/v1/registrations/:id/attendance",
            patch(events::handlers::handle_set_attendance),
        )
        // Appointments
        .route(
            "/api/v1/counselors",
            get(appointments::handlers::handle_list_counselors),
        )
        .route(
            "/api/v1/counselors/:id/availability",
            get(appointments::handlers::handle_counselor_availability),
        )
        .route(
            "/api/v1/appointments",
            get(appointments::handlers::handle_my_appointments),
        )
        .route(
            "/api/v1/appointments/book",
            post(appointments::handlers::handle_book),
        )
        .route(
            "/api/v1/appointments/picker",
            get(appointments::handlers::handle_get_picker),
        )
        .route(
            "/api/v1/appointments/picker/counselor",
            post(appointments::handlers::handle_pick_counselor),
        )
        .route(
            "/api/v1/appointments/picker/date",
            post(appointments::handlers::handle_pick_date),
        )
        .route(
            "/api/v1/appointments/picker/slot",
            post(appointments::handlers::handle_pick_slot),
        )
        .route(
            "/api/v1/appointments/picker/confirm",
            post(appointments::handlers::handle_confirm_booking),
        )
        // Counselor views
        .route(
            "/api/v1/counselor/students",
            get(counselor::handlers::handle_list_students),
        )
        .route(
            "/api/v1/counselor/students/:id",
            get(counselor::handlers::handle_get_student),
        )
        .route(
            "/api/v1/counselor/consultations",
            get(counselor::handlers::handle_list_consultations),
        )
        .route(
            "/api/v1/counselor/consultations/:id",
            patch(counselor::handlers::handle_update_consultation),
        )
        // Courses
        .route(
            "/api/v1/courses",
            get(courses::handlers::handle_list_courses).post(courses::handlers::handle_create_course),
        )
        .route(
            "/api/v1/courses/:id",
            get(courses::handlers::handle_get_course)
                .patch(courses::handlers::handle_update_course)
                .delete(courses::handlers::handle_delete_course),
        )
        .route(
            "/api/v1/courses/:id/modules",
            post(courses::handlers::handle_add_module),
        )
        .route(
            "/api/v1/courses/:id/modules/:module_id",
            put(courses::handlers::handle_replace_module)
                .delete(courses::handlers::handle_remove_module),
        )
        // Admin
        .route("/api/v1/admin/users", get(admin::handlers::handle_list_users))
        .route(
            "/api/v1/admin/users/:id",
            axum::routing::delete(admin::handlers::handle_delete_user),
        )
        .route(
            "/api/v1/admin/users/:id/status",
            patch(admin::handlers::handle_set_user_status),
        )
        .route(
            "/api/v1/admin/moderation",
            get(admin::handlers::handle_list_moderation),
        )
        .route(
            "/api/v1/admin/moderation/:id/:decision",
            post(admin::handlers::handle_moderate),
        )
        .route("/api/v1/admin/stats", get(admin::handlers::handle_platform_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::store::seed::{ids, SeedData, MOCK_PASSWORD};

    fn app() -> Router {
        build_router(AppState::from_seed(Config::default(), SeedData::mock()))
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(app: &Router, email: &str) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": email, "password": MOCK_PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "careerhub-api");
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let (status, body) = call(&app(), Method::GET, "/api/v1/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_job_board_lists_only_active() {
        let (status, body) = call(
            &app(),
            Method::GET,
            "/api/v1/jobs?status=all&page_size=50",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|j| j["status"] == "active"));
    }

    #[tokio::test]
    async fn test_search_with_no_results_is_empty_page() {
        let (status, body) = call(
            &app(),
            Method::GET,
            "/api/v1/employer/candidates?search=zzzz-no-match",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn test_booking_flow_over_http() {
        let app = app();
        let token = login(&app, "alex.johnson@university.edu").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/appointments/book",
            Some(&token),
            Some(json!({ "counselor_id": "1", "date": "2025-06-27", "time": "2:00 PM" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let message = body["notification"]["message"].as_str().unwrap();
        assert!(message.contains("Dr. Michael Rodriguez"));
        assert!(message.contains("2:00 PM"));
        assert_eq!(body["picker"]["tab"], "upcoming");

        let (_, availability) = call(
            &app,
            Method::GET,
            "/api/v1/counselors/1/availability",
            None,
            None,
        )
        .await;
        let june27 = availability["dates"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["date"] == "2025-06-27")
            .unwrap();
        assert_eq!(june27["slots"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_bulk_status_over_http() {
        let app = app();
        let token = login(&app, "jennifer.smith@techcorp.com").await;
        let seed = SeedData::mock().candidates;
        let chosen: Vec<_> = seed.iter().take(2).map(|c| c.id.to_string()).collect();

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/employer/candidates/bulk-status",
            Some(&token),
            Some(json!({ "status": "offer", "candidate_ids": chosen })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["updated"], 2);
        assert_eq!(body["selection"], json!([]));

        let (_, selection) = call(
            &app,
            Method::GET,
            "/api/v1/employer/candidates/selection",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(selection, json!([]));
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin() {
        let app = app();
        let student = login(&app, "alex.johnson@university.edu").await;
        let (status, _) = call(&app, Method::GET, "/api/v1/admin/stats", Some(&student), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = login(&app, "admin@careerhub.edu").await;
        let (status, body) = call(&app, Method::GET, "/api/v1/admin/stats", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pending_moderation"], 2);
    }

    #[tokio::test]
    async fn test_suspending_user_ends_their_session() {
        let app = app();
        let admin = login(&app, "admin@careerhub.edu").await;
        let emily = login(&app, "emily.davis@university.edu").await;

        let uri = format!("/api/v1/admin/users/{}/status", ids::STUDENT_EMILY);
        let (status, _) = call(
            &app,
            Method::PATCH,
            &uri,
            Some(&admin),
            Some(json!({ "status": "suspended" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(&app, Method::GET, "/api/v1/auth/me", Some(&emily), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_navigation_resolution() {
        let app = app();
        let (_, anon) = call(
            &app,
            Method::GET,
            "/api/v1/navigation?path=/app/resume",
            None,
            None,
        )
        .await;
        assert_eq!(anon, json!({ "outcome": "redirect", "to": "/login" }));

        let token = login(&app, "jennifer.smith@techcorp.com").await;
        let (_, employer) = call(
            &app,
            Method::GET,
            "/api/v1/navigation?path=/app/resume",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(employer["to"], "/app/employer");
    }

    #[tokio::test]
    async fn test_unknown_resume_section_item_is_not_found() {
        let app = app();
        let token = login(&app, "alex.johnson@university.edu").await;
        let uri = format!(
            "/api/v1/resumes/{}/draft/skills/{}",
            ids::RESUME_ALEX,
            uuid::Uuid::new_v4()
        );
        let (status, body) = call(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
