//! HTTP handlers for learner endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{json_rejection, ApiError};
use crate::application::handlers::learning::{
    CompleteModuleCommand, CompleteModuleHandler, FinishSessionCommand, FinishSessionHandler,
    LearnerQueries, RecordProgressCommand, RecordProgressHandler, RegisterUserCommand,
    RegisterUserHandler, StartSessionCommand, StartSessionHandler, UpdateUserCommand,
    UpdateUserHandler,
};
use crate::application::handlers::{SubmitRiskAssessmentCommand, SubmitRiskAssessmentHandler};
use crate::application::{AppError, Logger};
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::learner::Offering;
use crate::domain::risk::RISK_QUESTIONS;
use crate::ports::{ProgressRepository, RiskAssessmentRepository, SessionRepository, UserRepository};

use super::dto::{
    CompleteModuleRequest, CompleteModuleResponse, FinishSessionRequest, OfferingResponse,
    ProgressResponse, ProgressUpdateRequest, RegisterUserRequest, RiskAssessmentRequest,
    RiskAssessmentResponse, RiskEvaluationResponse, SessionResponse, StartSessionRequest,
    UpdateUserRequest, UserResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LearnerHandlers {
    register_user: Arc<RegisterUserHandler>,
    update_user: Arc<UpdateUserHandler>,
    start_session: Arc<StartSessionHandler>,
    finish_session: Arc<FinishSessionHandler>,
    submit_assessment: Arc<SubmitRiskAssessmentHandler>,
    record_progress: Arc<RecordProgressHandler>,
    complete_module: Arc<CompleteModuleHandler>,
    queries: Arc<LearnerQueries>,
}

impl LearnerHandlers {
    /// Wires every learner handler against the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        assessments: Arc<dyn RiskAssessmentRepository>,
        progress: Arc<dyn ProgressRepository>,
        logger: Logger,
    ) -> Self {
        Self {
            register_user: Arc::new(RegisterUserHandler::new(users.clone(), logger.clone())),
            update_user: Arc::new(UpdateUserHandler::new(users.clone())),
            start_session: Arc::new(StartSessionHandler::new(sessions.clone(), logger.clone())),
            finish_session: Arc::new(FinishSessionHandler::new(sessions.clone(), logger.clone())),
            submit_assessment: Arc::new(SubmitRiskAssessmentHandler::new(
                assessments.clone(),
                users.clone(),
                logger.clone(),
            )),
            record_progress: Arc::new(RecordProgressHandler::new(progress.clone())),
            complete_module: Arc::new(CompleteModuleHandler::new(progress.clone(), logger)),
            queries: Arc::new(LearnerQueries::new(users, sessions, assessments, progress)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/users - Register a learner
pub async fn register_user(
    State(handlers): State<LearnerHandlers>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let cmd = RegisterUserCommand {
        user_id,
        external_id: req.external_id,
        onboarding_progress: req.onboarding_progress,
    };

    match handlers.register_user.handle(cmd).await {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse::from(user))).into_response(),
        Err(failure) => ApiError(failure).into_response(),
    }
}

/// GET /api/users - List every learner
pub async fn list_users(State(handlers): State<LearnerHandlers>) -> Response {
    match handlers.queries.all_users().await {
        Ok(users) => {
            let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(failure) => ApiError(failure).into_response(),
    }
}

/// GET /api/users/:id - Fetch a learner profile
pub async fn get_user(
    State(handlers): State<LearnerHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let result = async {
        let user_id = UserId::new(user_id)?;
        Ok::<_, ApiError>(handlers.queries.user(&user_id).await?)
    }
    .await;

    match result {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// PATCH /api/users/:id - Update a learner profile
pub async fn update_user(
    State(handlers): State<LearnerHandlers>,
    Path(user_id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let result = async {
        let cmd = UpdateUserCommand {
            user_id: UserId::new(user_id)?,
            patch: req.into(),
        };
        Ok::<_, ApiError>(handlers.update_user.handle(cmd).await?)
    }
    .await;

    match result {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(e) => e.into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/offerings - Priced offering catalogue
pub async fn list_offerings() -> Response {
    let body: Vec<OfferingResponse> = Offering::ALL.into_iter().map(OfferingResponse::from).collect();
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /api/sessions - Book a guidance session
pub async fn start_session(
    State(handlers): State<LearnerHandlers>,
    body: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let result = async {
        let cmd = StartSessionCommand {
            user_id: UserId::new(req.user_id)?,
            offering: req.offering,
            topic: req.topic,
        };
        Ok::<_, ApiError>(handlers.start_session.handle(cmd).await?)
    }
    .await;

    match result {
        Ok(session) => (StatusCode::CREATED, Json(SessionResponse::from(session))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /api/sessions - List every session
pub async fn list_sessions(State(handlers): State<LearnerHandlers>) -> Response {
    match handlers.queries.all_sessions().await {
        Ok(sessions) => {
            let body: Vec<SessionResponse> =
                sessions.into_iter().map(SessionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(failure) => ApiError(failure).into_response(),
    }
}

/// GET /api/sessions/:id - Fetch one session
pub async fn get_session(
    State(handlers): State<LearnerHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let result = async {
        let session_id = SessionId::parse(session_id)?;
        Ok::<_, ApiError>(handlers.queries.session(&session_id).await?)
    }
    .await;

    match result {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /api/users/:id/sessions - A learner's sessions, newest first
pub async fn list_user_sessions(
    State(handlers): State<LearnerHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let result = async {
        let user_id = UserId::new(user_id)?;
        Ok::<_, ApiError>(handlers.queries.user_sessions(&user_id).await?)
    }
    .await;

    match result {
        Ok(sessions) => {
            let body: Vec<SessionResponse> =
                sessions.into_iter().map(SessionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// POST /api/sessions/:id/complete - Close a session as completed
pub async fn complete_session(
    State(handlers): State<LearnerHandlers>,
    Path(session_id): Path<String>,
    body: Result<Json<FinishSessionRequest>, JsonRejection>,
) -> Response {
    finish_session(handlers, session_id, body, FinishSessionCommand::complete).await
}

/// POST /api/sessions/:id/cancel - Close a session as cancelled
pub async fn cancel_session(
    State(handlers): State<LearnerHandlers>,
    Path(session_id): Path<String>,
    body: Result<Json<FinishSessionRequest>, JsonRejection>,
) -> Response {
    finish_session(handlers, session_id, body, FinishSessionCommand::cancel).await
}

async fn finish_session(
    handlers: LearnerHandlers,
    session_id: String,
    body: Result<Json<FinishSessionRequest>, JsonRejection>,
    command: fn(SessionId, UserId) -> FinishSessionCommand,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let result = async {
        let cmd = command(SessionId::parse(session_id)?, UserId::new(req.user_id)?);
        Ok::<_, ApiError>(handlers.finish_session.handle(cmd).await?)
    }
    .await;

    match result {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => e.into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Risk assessment
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/risk/questions - The fixed questionnaire
pub async fn list_risk_questions() -> Response {
    (StatusCode::OK, Json(RISK_QUESTIONS)).into_response()
}

/// POST /api/users/:id/risk-assessment - Score and store a submission
pub async fn submit_risk_assessment(
    State(handlers): State<LearnerHandlers>,
    Path(user_id): Path<String>,
    body: Result<Json<RiskAssessmentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let result = async {
        let cmd = SubmitRiskAssessmentCommand {
            user_id: UserId::new(user_id)?,
            answers: req.answers,
        };
        Ok::<_, ApiError>(handlers.submit_assessment.handle(cmd).await?)
    }
    .await;

    match result {
        Ok(result) => {
            (StatusCode::OK, Json(RiskEvaluationResponse::from(result))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/users/:id/risk-assessment - The latest stored submission
pub async fn get_risk_assessment(
    State(handlers): State<LearnerHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let result = async {
        let user_id = UserId::new(user_id)?;
        handlers
            .queries
            .risk_assessment(&user_id)
            .await?
            .ok_or_else(|| ApiError(AppError::not_found("No risk assessment recorded").into()))
    }
    .await;

    match result {
        Ok(assessment) => {
            (StatusCode::OK, Json(RiskAssessmentResponse::from(assessment))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Progress
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/users/:id/progress - Current learning progress
pub async fn get_progress(
    State(handlers): State<LearnerHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let result = async {
        let user_id = UserId::new(user_id)?;
        handlers
            .queries
            .progress(&user_id)
            .await?
            .ok_or_else(|| ApiError(AppError::not_found("No progress recorded").into()))
    }
    .await;

    match result {
        Ok(progress) => (StatusCode::OK, Json(ProgressResponse::from(progress))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// PATCH /api/users/:id/progress - Merge a progress update
pub async fn update_progress(
    State(handlers): State<LearnerHandlers>,
    Path(user_id): Path<String>,
    body: Result<Json<ProgressUpdateRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let result = async {
        let cmd = RecordProgressCommand {
            user_id: UserId::new(user_id)?,
            patch: req.into(),
        };
        Ok::<_, ApiError>(handlers.record_progress.handle(cmd).await?)
    }
    .await;

    match result {
        Ok(progress) => (StatusCode::OK, Json(ProgressResponse::from(progress))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /api/users/:id/modules/:module_id/complete - Finish a module
pub async fn complete_module(
    State(handlers): State<LearnerHandlers>,
    Path((user_id, module_id)): Path<(String, String)>,
    body: Result<Json<CompleteModuleRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let result = async {
        let cmd = CompleteModuleCommand {
            user_id: UserId::new(user_id)?,
            module_id,
            minutes: req.minutes,
            quiz: req.quiz.map(Into::into),
        };
        Ok::<_, ApiError>(handlers.complete_module.handle(cmd).await?)
    }
    .await;

    match result {
        Ok(result) => {
            (StatusCode::OK, Json(CompleteModuleResponse::from(result))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::InMemoryLogSink;
    use crate::adapters::memory::InMemoryEntityStore;

    fn handlers() -> LearnerHandlers {
        let store = Arc::new(InMemoryEntityStore::new());
        LearnerHandlers::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Logger::new(Arc::new(InMemoryLogSink::new()), false),
        )
    }

    #[tokio::test]
    async fn get_unknown_user_is_404() {
        let response = get_user(State(handlers()), Path("ghost".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_user_id_is_400() {
        let response = get_user(State(handlers()), Path("  ".to_string())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_session_id_is_400() {
        let response = get_session(State(handlers()), Path("not-a-session".to_string())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_progress_is_404() {
        let response = get_progress(State(handlers()), Path("u1".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn offerings_are_listed() {
        let response = list_offerings().await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
