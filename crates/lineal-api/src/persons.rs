//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons` | Optional `text`, `generation_level`, `status`, `limit`, `offset` |
//! | `POST`   | `/persons` | Body: `{"person_id": ..., "full_name": ..., ...}`; 409 if the ID is taken |
//! | `GET`    | `/persons/:id` | 404 if not found |
//! | `PUT`    | `/persons/:id` | Full replace of mutable fields |
//! | `DELETE` | `/persons/:id` | Cascades to links and marriages |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use lineal_core::{
  person::{Person, PersonFields},
  store::{LineageStore, PersonQuery},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub text:             Option<String>,
  pub generation_level: Option<i32>,
  pub status:           Option<String>,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// `GET /persons[?text=...][&generation_level=...][&status=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = PersonQuery {
    text:             params.text,
    generation_level: params.generation_level,
    status:           params.status,
    limit:            params.limit,
    offset:           params.offset,
  };

  let persons = store
    .list_persons(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(persons))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /persons`: the caller-chosen ID plus the
/// attribute fields, flattened into one object.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub person_id: String,
  #[serde(flatten)]
  pub fields:    PersonFields,
}

/// `POST /persons` — returns 201 + the stored [`Person`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let person_id = body.person_id.trim().to_owned();
  if person_id.is_empty() {
    return Err(ApiError::BadRequest("person_id must not be empty".into()));
  }

  let taken = store
    .get_person(&person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some();
  if taken {
    return Err(ApiError::Conflict(format!(
      "person id {person_id} is already in use"
    )));
  }

  let person = store
    .add_person(person_id, body.fields)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(person_id): Path<String>,
) -> Result<Json<Person>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let person = store
    .get_person(&person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {person_id} not found")))?;
  Ok(Json(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/:id` — body is the full [`PersonFields`] replacement.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(person_id): Path<String>,
  Json(fields): Json<PersonFields>,
) -> Result<Json<Person>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let person = store
    .update_person(&person_id, fields)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {person_id} not found")))?;
  Ok(Json(person))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/:id` — 204 on success; link and marriage rows go too.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(person_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .delete_person(&person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!("person {person_id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
