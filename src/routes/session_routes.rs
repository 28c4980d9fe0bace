use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::session_controller::SessionController;
use crate::services::identity_service::SessionContext;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_session_router() -> Router<AppState> {
    Router::new().route("/", post(start_session))
}

async fn start_session(State(state): State<AppState>) -> AppResult<Json<SessionContext>> {
    let controller = SessionController::new(state.identity.clone());
    let session = controller.start().await?;
    Ok(Json(session))
}
