//! Handler for the recent predictions list.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::recent::{RecentItem, RecentQuery, RecentResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists recently served predictions, newest first.
///
/// # Endpoint
///
/// `GET /predictions/recent`
///
/// # Query Parameters
///
/// - `limit` (optional): Maximum entries to return (default and max: store capacity)
///
/// # Errors
///
/// Returns 500 Internal Server Error if the store cannot be read.
pub async fn recent_handler(
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<RecentResponse>, AppError> {
    let items: Vec<RecentItem> = state
        .estimator_service
        .recent_predictions(params.limit)
        .await?
        .into_iter()
        .map(RecentItem::from)
        .collect();

    Ok(Json(RecentResponse {
        total: items.len(),
        items,
    }))
}
