//! JSON REST API for Lineal.
//!
//! Exposes an axum [`Router`] backed by any [`lineal_core::store::LineageStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lineal_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod lineage;
pub mod marriages;
pub mod persons;
pub mod relationships;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use lineal_core::store::LineageStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LineageStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Persons
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S>)
        .put(persons::update::<S>)
        .delete(persons::delete_one::<S>),
    )
    // Parent links
    .route("/persons/{id}/parents", get(relationships::parents::<S>))
    .route(
      "/persons/{id}/parents/{role}",
      put(relationships::set_parent::<S>)
        .delete(relationships::remove_parent::<S>),
    )
    // Marriages
    .route("/persons/{id}/marriages", get(marriages::for_person::<S>))
    .route("/marriages", post(marriages::create::<S>))
    .route(
      "/marriages/{id}",
      get(marriages::get_one::<S>)
        .put(marriages::update::<S>)
        .delete(marriages::delete_one::<S>),
    )
    // Lineage
    .route("/tree", get(lineage::tree::<S>))
    .route("/ancestors/{id}", get(lineage::ancestors::<S>))
    .route("/descendants/{id}", get(lineage::descendants::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
