use axum::{
    extract::{rejection::JsonRejection, Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::record_controller::RecordController;
use crate::dto::record_dto::{LookupResponse, SaveRecordRequest, SaveRecordResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedOwner};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_record_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(save_record))
        .route("/:plate", get(lookup_record))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> RecordController {
    RecordController::new(state.codec, state.store.clone())
}

async fn save_record(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthenticatedOwner>,
    payload: Result<Json<SaveRecordRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<SaveRecordResponse>>> {
    let Json(request) = payload?;
    let response = controller(&state).save(&owner.owner_id, request).await?;
    Ok(Json(response))
}

async fn lookup_record(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Path(plate): Path<String>,
) -> AppResult<Json<LookupResponse>> {
    let response = controller(&state).lookup(&owner.owner_id, &plate).await?;
    Ok(Json(response))
}
