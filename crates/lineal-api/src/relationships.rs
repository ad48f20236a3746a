//! Handlers for the parent-link endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons/:id/parents` | Both slots; empty slots are null |
//! | `PUT`    | `/persons/:id/parents/:role` | Body: `{"parent_id": ...}`; replaces the slot |
//! | `DELETE` | `/persons/:id/parents/:role` | 404 if the slot is empty |
//!
//! `:role` is `father` or `mother`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use lineal_core::{
  relationship::{ParentLink, ParentRole, Parents},
  store::LineageStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Read slots ───────────────────────────────────────────────────────────────

/// `GET /persons/:id/parents`
pub async fn parents<S>(
  State(store): State<Arc<S>>,
  Path(child_id): Path<String>,
) -> Result<Json<Parents>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_person(&child_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {child_id} not found")))?;

  let parents = store
    .parents_of(&child_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(parents))
}

// ─── Set slot ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetParentBody {
  pub parent_id: String,
}

/// `PUT /persons/:id/parents/:role` — body: `{"parent_id": "..."}`.
///
/// Replaces whatever the slot held before. The named parent must already
/// have a person record.
pub async fn set_parent<S>(
  State(store): State<Arc<S>>,
  Path((child_id, role)): Path<(String, ParentRole)>,
  Json(body): Json<SetParentBody>,
) -> Result<Json<ParentLink>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_person(&child_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {child_id} not found")))?;

  if body.parent_id == child_id {
    return Err(ApiError::BadRequest(format!(
      "person {child_id} cannot be their own {}",
      role.as_str()
    )));
  }

  let parent_known = store
    .get_person(&body.parent_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some();
  if !parent_known {
    return Err(ApiError::BadRequest(format!(
      "no person record for parent {}",
      body.parent_id
    )));
  }

  let link = store
    .set_parent(&child_id, &body.parent_id, role)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(link))
}

// ─── Clear slot ───────────────────────────────────────────────────────────────

/// `DELETE /persons/:id/parents/:role` — 204 on success.
pub async fn remove_parent<S>(
  State(store): State<Arc<S>>,
  Path((child_id, role)): Path<(String, ParentRole)>,
) -> Result<StatusCode, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let removed = store
    .remove_parent(&child_id, role)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!(
      "no {} link recorded for {child_id}",
      role.as_str()
    )));
  }
  Ok(StatusCode::NO_CONTENT)
}
