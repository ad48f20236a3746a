//! Handlers for `/marriages` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/marriages` | Body: [`NewMarriage`]; 201 + stored row |
//! | `GET`    | `/marriages/:id` | 404 if not found |
//! | `PUT`    | `/marriages/:id` | Body: [`MarriageFields`] |
//! | `DELETE` | `/marriages/:id` | 404 if not found |
//! | `GET`    | `/persons/:id/marriages` | Either spouse column matches |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lineal_core::{
  marriage::{Marriage, MarriageFields, NewMarriage},
  store::LineageStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /marriages` — returns 201 + the stored [`Marriage`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewMarriage>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.spouse_a == body.spouse_b {
    return Err(ApiError::BadRequest(format!(
      "person {} cannot be married to themselves",
      body.spouse_a
    )));
  }
  for spouse in [&body.spouse_a, &body.spouse_b] {
    let known = store
      .get_person(spouse)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .is_some();
    if !known {
      return Err(ApiError::BadRequest(format!(
        "no person record for spouse {spouse}"
      )));
    }
  }

  let marriage = store
    .add_marriage(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(marriage)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /marriages/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(marriage_id): Path<Uuid>,
) -> Result<Json<Marriage>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let marriage = store
    .get_marriage(marriage_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("marriage {marriage_id} not found"))
    })?;
  Ok(Json(marriage))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /marriages/:id` — body is the [`MarriageFields`] replacement.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(marriage_id): Path<Uuid>,
  Json(fields): Json<MarriageFields>,
) -> Result<Json<Marriage>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let marriage = store
    .update_marriage(marriage_id, fields)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("marriage {marriage_id} not found"))
    })?;
  Ok(Json(marriage))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /marriages/:id` — 204 on success.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(marriage_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .delete_marriage(marriage_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!(
      "marriage {marriage_id} not found"
    )));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Per-person listing ───────────────────────────────────────────────────────

/// `GET /persons/:id/marriages`
pub async fn for_person<S>(
  State(store): State<Arc<S>>,
  Path(person_id): Path<String>,
) -> Result<Json<Vec<Marriage>>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_person(&person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {person_id} not found")))?;

  let marriages = store
    .marriages_of(&person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(marriages))
}
