//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; errors become `{"error": "..."}` with a 4xx status.

use std::sync::Arc;
use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};

use crate::catalog;
use crate::domain::{Difficulty, ProblemType, Settings};
use crate::generator::EngineError;
use crate::logic;
use crate::protocol::*;
use crate::session::SessionError;
use crate::state::AppState;

#[derive(Debug)]
pub struct ApiError {
  status: StatusCode,
  message: String,
}

impl ApiError {
  fn bad_request(message: impl Into<String>) -> Self {
    Self { status: StatusCode::BAD_REQUEST, message: message.into() }
  }
}

impl From<EngineError> for ApiError {
  fn from(e: EngineError) -> Self {
    let status = match e {
      EngineError::NoEnabledTypes => StatusCode::BAD_REQUEST,
      EngineError::InsufficientDistinctProblems { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    Self { status, message: e.to_string() }
  }
}

impl From<SessionError> for ApiError {
  fn from(e: SessionError) -> Self {
    let status = match &e {
      SessionError::Engine(inner) => return ApiError::from(inner.clone()),
      SessionError::NoActiveSession | SessionError::UnknownProblem(_) => StatusCode::NOT_FOUND,
      SessionError::AlreadyAnswered(_) | SessionError::AlreadyCompleted => StatusCode::CONFLICT,
      SessionError::InvalidSettings(_) | SessionError::SubmissionMismatch(_) | SessionError::IndexOutOfRange { .. } => {
        StatusCode::BAD_REQUEST
      }
    };
    Self { status, message: e.to_string() }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    warn!(target: "emhoctoan_backend", status = %self.status, error = %self.message, "HTTP request failed");
    (self.status, Json(ErrorOut { error: self.message })).into_response()
  }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_catalog() -> impl IntoResponse {
  Json(CatalogOut { types: catalog::catalog(), groups: catalog::groups() })
}

fn parse_difficulty(raw: Option<&str>) -> Result<Difficulty, ApiError> {
  match raw {
    None => Ok(Difficulty::default()),
    Some(d) => Difficulty::parse(d).ok_or_else(|| ApiError::bad_request(format!("unknown difficulty: {d}"))),
  }
}

#[instrument(level = "info", skip_all, fields(kind = ?q.kind, difficulty = ?q.difficulty))]
pub async fn http_get_problem(Query(q): Query<ProblemQuery>) -> ApiResult<ProblemOut> {
  let raw = q.kind.as_deref().ok_or_else(|| ApiError::bad_request("missing query parameter: type"))?;
  let kind = ProblemType::parse(raw).ok_or_else(|| ApiError::bad_request(format!("unknown problem type: {raw}")))?;
  let difficulty = parse_difficulty(q.difficulty.as_deref())?;
  let out = logic::generate_one(kind, difficulty);
  info!(target: "engine", id = %out.problem.id, kind = kind.as_str(), "HTTP problem served");
  Ok(Json(out))
}

#[instrument(level = "info", skip_all, fields(enabled = body.enabled_types.len()))]
pub async fn http_post_random(Json(body): Json<RandomProblemIn>) -> ApiResult<ProblemOut> {
  Ok(Json(logic::generate_random(&body.enabled_types, body.difficulty)?))
}

#[instrument(level = "info", skip_all, fields(enabled = body.enabled_types.len(), quantity = body.quantity))]
pub async fn http_post_unique(
  State(state): State<Arc<AppState>>,
  Json(body): Json<UniqueProblemsIn>,
) -> ApiResult<ProblemsOut> {
  let problems = logic::generate_unique(&state, &body.enabled_types, body.quantity, body.difficulty)?;
  info!(target: "engine", count = problems.len(), "HTTP unique batch served");
  Ok(Json(ProblemsOut { problems }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(logic::get_settings(&state))
}

#[instrument(level = "info", skip_all)]
pub async fn http_put_settings(
  State(state): State<Arc<AppState>>,
  Json(body): Json<Settings>,
) -> ApiResult<Settings> {
  Ok(Json(logic::put_settings(&state, body)?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_progress(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(ProgressOut { progress: logic::get_progress(&state) })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(logic::current_session(&state).await)
}

#[instrument(level = "info", skip_all)]
pub async fn http_start_session(
  State(state): State<Arc<AppState>>,
  body: Option<Json<StartIn>>,
) -> ApiResult<SessionOut> {
  let settings = body.and_then(|Json(b)| b.settings);
  Ok(Json(logic::start_test(&state, settings).await?))
}

#[instrument(level = "info", skip_all, fields(%body.problem_id))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> ApiResult<crate::session::AnswerOutcome> {
  let outcome = logic::submit_answer(&state, &body.problem_id, &body.answer).await?;
  info!(target: "session", id = %body.problem_id, correct = outcome.correct, "HTTP answer recorded");
  Ok(Json(outcome))
}

#[instrument(level = "info", skip_all, fields(index = body.index))]
pub async fn http_post_navigate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NavigateIn>,
) -> ApiResult<SessionOut> {
  Ok(Json(logic::navigate(&state, body.index).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_finish(State(state): State<Arc<AppState>>) -> ApiResult<crate::scoring::ResultsSummary> {
  Ok(Json(logic::finish(&state).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_retake(State(state): State<Arc<AppState>>) -> ApiResult<SessionOut> {
  Ok(Json(logic::retake(&state).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(logic::reset(&state).await)
}
