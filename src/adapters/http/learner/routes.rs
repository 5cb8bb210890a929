//! HTTP routes for learner endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_session, complete_module, complete_session, get_progress, get_risk_assessment,
    get_session, get_user, list_offerings, list_risk_questions, list_sessions,
    list_user_sessions, list_users, register_user, start_session, submit_risk_assessment,
    update_progress, update_user, LearnerHandlers,
};

/// Creates the learner router, mounted at `/api`.
pub fn learner_routes(handlers: LearnerHandlers) -> Router {
    Router::new()
        .route("/users", post(register_user).get(list_users))
        .route("/users/:id", get(get_user).patch(update_user))
        .route("/users/:id/sessions", get(list_user_sessions))
        .route(
            "/users/:id/risk-assessment",
            post(submit_risk_assessment).get(get_risk_assessment),
        )
        .route("/users/:id/progress", get(get_progress).patch(update_progress))
        .route(
            "/users/:id/modules/:module_id/complete",
            post(complete_module),
        )
        .route("/offerings", get(list_offerings))
        .route("/sessions", post(start_session).get(list_sessions))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/complete", post(complete_session))
        .route("/sessions/:id/cancel", post(cancel_session))
        .route("/risk/questions", get(list_risk_questions))
        .with_state(handlers)
}
