//! Category route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};

use clinic_commerce_core::{CategoryId, EntityStatus};

use crate::error::AppError;
use crate::handlers::{CommandHandler, DeleteCategoryCommand};
use crate::state::AppState;

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list))
        .route("/api/categories/{id}", delete(remove))
}

/// Query parameters accepted by the delete endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub status: Option<EntityStatus>,
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
struct DeletedResponse {
    id: CategoryId,
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = state.store().list_active_categories().await?;

    Ok(Json(categories))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let command = DeleteCategoryCommand {
        id: CategoryId::new(id),
        status: query.status,
    };

    let id = state.delete_category().handle(command).await?;

    Ok(Json(DeletedResponse { id }))
}
