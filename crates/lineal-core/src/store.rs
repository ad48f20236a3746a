//! The `LineageStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `lineal-store-sqlite`).
//! Higher layers (`lineal-api`, `lineal-server`) depend on this abstraction,
//! not on any concrete backend.

use std::{collections::HashMap, future::Future};

use uuid::Uuid;

use crate::{
  marriage::{Marriage, MarriageFields, NewMarriage},
  person::{Person, PersonFields},
  relationship::{ParentLink, ParentRole, Parents},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`LineageStore::list_persons`].
#[derive(Debug, Clone, Default)]
pub struct PersonQuery {
  /// Free-text filter matched against full name and alias.
  pub text:             Option<String>,
  pub generation_level: Option<i32>,
  pub status:           Option<String>,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// Everything the lineage walks need, loaded in one shot.
///
/// A snapshot is rebuilt per request; a concurrent edit shows up in the next
/// snapshot, not the current one.
#[derive(Debug, Clone)]
pub struct LineageSnapshot {
  pub persons: HashMap<String, Person>,
  pub links:   Vec<ParentLink>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Lineal storage backend.
///
/// Operations that target a record which may not exist report absence
/// through the `Ok` channel (`Option` / `bool`) so callers can distinguish
/// "not there" from an infrastructure failure.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LineageStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Persist a new person under the caller-chosen ID. The `created_at`
  /// timestamp is set by the store. Fails if the ID is already taken.
  fn add_person(
    &self,
    person_id: String,
    fields: PersonFields,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by ID. Returns `None` if not found.
  fn get_person<'a>(
    &'a self,
    person_id: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// List persons matching `query`, ordered by generation level and name.
  fn list_persons<'a>(
    &'a self,
    query: &'a PersonQuery,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Replace every mutable attribute of a person. Returns the updated
  /// record, or `None` if the ID is unknown.
  fn update_person<'a>(
    &'a self,
    person_id: &'a str,
    fields: PersonFields,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// Delete a person; parent links and marriages referencing it go with it.
  /// Returns `false` if the ID is unknown.
  fn delete_person<'a>(
    &'a self,
    person_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Parent links ──────────────────────────────────────────────────────

  /// Record `parent_id` in the father/mother slot of `child_id`, replacing
  /// any previous occupant of that slot. Rejects self-linking.
  fn set_parent<'a>(
    &'a self,
    child_id: &'a str,
    parent_id: &'a str,
    role: ParentRole,
  ) -> impl Future<Output = Result<ParentLink, Self::Error>> + Send + 'a;

  /// Clear the father/mother slot of `child_id`. Returns `false` if the
  /// slot was already empty.
  fn remove_parent<'a>(
    &'a self,
    child_id: &'a str,
    role: ParentRole,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// The recorded father/mother slots of `child_id`; both empty when the
  /// child has no links.
  fn parents_of<'a>(
    &'a self,
    child_id: &'a str,
  ) -> impl Future<Output = Result<Parents, Self::Error>> + Send + 'a;

  // ── Marriages ─────────────────────────────────────────────────────────

  /// Record a marriage. `marriage_id` and `recorded_at` are assigned by
  /// the store. Rejects a person married to themselves.
  fn add_marriage(
    &self,
    input: NewMarriage,
  ) -> impl Future<Output = Result<Marriage, Self::Error>> + Send + '_;

  /// Retrieve a marriage by ID. Returns `None` if not found.
  fn get_marriage(
    &self,
    marriage_id: Uuid,
  ) -> impl Future<Output = Result<Option<Marriage>, Self::Error>> + Send + '_;

  /// Replace the status and notes of a marriage. Returns `None` if the ID
  /// is unknown.
  fn update_marriage(
    &self,
    marriage_id: Uuid,
    fields: MarriageFields,
  ) -> impl Future<Output = Result<Option<Marriage>, Self::Error>> + Send + '_;

  /// Delete a marriage. Returns `false` if the ID is unknown.
  fn delete_marriage(
    &self,
    marriage_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All marriages in which the person appears on either side.
  fn marriages_of<'a>(
    &'a self,
    person_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Marriage>, Self::Error>> + Send + 'a;

  // ── Lineage input ─────────────────────────────────────────────────────

  /// Load every person and parent link in one shot for a lineage walk.
  fn lineage_snapshot(
    &self,
  ) -> impl Future<Output = Result<LineageSnapshot, Self::Error>> + Send + '_;
}
