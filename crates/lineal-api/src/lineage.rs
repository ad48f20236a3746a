//! Handlers for the lineage traversal endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/tree?root_id=<id>[&max_generation=<n>]` | Nested descendant tree |
//! | `GET` | `/ancestors/:id` | Oldest-first father-line chain |
//! | `GET` | `/descendants/:id[?max_depth=<n>]` | Flat bounded list |
//!
//! Every request loads a fresh snapshot, builds the adjacency maps, and runs
//! the walk — nothing is cached between requests. Child lists are sorted by
//! name so responses are stable for display.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use lineal_core::{
  graph,
  person::Person,
  store::LineageStore,
  traversal::{self, ChainNode, DescendantEntry, TreeNode},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Generation bound applied when `max_generation` is omitted.
pub const DEFAULT_MAX_GENERATION: u32 = 5;

/// Depth bound applied when `max_depth` is omitted.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

// ─── Descendant tree ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TreeParams {
  pub root_id:        String,
  pub max_generation: Option<u32>,
}

/// `GET /tree?root_id=<id>[&max_generation=<n>]`
pub async fn tree<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<TreeParams>,
) -> Result<Json<TreeNode>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let max_generation = params.max_generation.unwrap_or(DEFAULT_MAX_GENERATION);
  if max_generation == 0 {
    return Err(ApiError::BadRequest(
      "max_generation must be at least 1".into(),
    ));
  }

  store
    .get_person(&params.root_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("person {} not found", params.root_id))
    })?;

  let snapshot = store
    .lineage_snapshot()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut children = graph::children_map(&snapshot.links);
  graph::sort_children_by_name(&mut children, &snapshot.persons);

  let tree = traversal::descendant_tree(
    &params.root_id,
    &snapshot.persons,
    &children,
    max_generation,
  )
  .map_err(|e| ApiError::Integrity(e.to_string()))?
  .ok_or_else(|| {
    // The root existed a moment ago; it can vanish under a concurrent delete.
    ApiError::NotFound(format!("person {} not found", params.root_id))
  })?;

  Ok(Json(tree))
}

// ─── Ancestors chain ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AncestorsResponse {
  pub person:          Person,
  /// Oldest ancestor first, the queried person last.
  pub ancestors_chain: Vec<ChainNode>,
}

/// `GET /ancestors/:id`
pub async fn ancestors<S>(
  State(store): State<Arc<S>>,
  Path(person_id): Path<String>,
) -> Result<Json<AncestorsResponse>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let person = store
    .get_person(&person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {person_id} not found")))?;

  let snapshot = store
    .lineage_snapshot()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let parents = graph::parent_map(&snapshot.links);
  let chain = traversal::ancestors_chain(&person_id, &snapshot.persons, &parents)
    .map_err(|e| ApiError::Integrity(e.to_string()))?;

  Ok(Json(AncestorsResponse { person, ancestors_chain: chain }))
}

// ─── Bounded descendants list ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DescendantsParams {
  pub max_depth: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DescendantsResponse {
  pub root_id:     String,
  pub max_depth:   u32,
  pub descendants: Vec<DescendantEntry>,
}

/// `GET /descendants/:id[?max_depth=<n>]`
pub async fn descendants<S>(
  State(store): State<Arc<S>>,
  Path(person_id): Path<String>,
  Query(params): Query<DescendantsParams>,
) -> Result<Json<DescendantsResponse>, ApiError>
where
  S: LineageStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let max_depth = params.max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
  if max_depth == 0 {
    return Err(ApiError::BadRequest("max_depth must be at least 1".into()));
  }

  store
    .get_person(&person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {person_id} not found")))?;

  let snapshot = store
    .lineage_snapshot()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut children = graph::children_map(&snapshot.links);
  graph::sort_children_by_name(&mut children, &snapshot.persons);

  let descendants = traversal::descendant_entries(
    &person_id,
    &snapshot.persons,
    &children,
    max_depth,
  )
  .map_err(|e| ApiError::Integrity(e.to_string()))?;

  Ok(Json(DescendantsResponse {
    root_id: person_id,
    max_depth,
    descendants,
  }))
}
