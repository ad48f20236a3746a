//! Person — the record at the heart of the genealogy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The mutable attribute set of a person record, shared by the create and
/// full-update operations.
///
/// The date fields are free text rather than calendar types: historical
/// entries mix precise dates, year-only fragments, and lunar-calendar dates
/// that have no single chrono representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
  pub full_name:        String,
  pub alias:            Option<String>,
  pub gender:           Option<String>,
  /// Free string, e.g. "alive" or "deceased".
  pub status:           Option<String>,
  /// Steps removed from the founding ancestor; used for sorting and
  /// display, not for lineage computation.
  pub generation_level: Option<i32>,
  pub home_town:        Option<String>,
  pub birth_date_solar: Option<String>,
  pub birth_date_lunar: Option<String>,
  pub death_date_solar: Option<String>,
  pub death_date_lunar: Option<String>,
  pub place_of_death:   Option<String>,
  pub grave_info:       Option<String>,
}

/// A person record. The ID is free-format text (commonly a
/// generation-prefixed code), unique, and immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub person_id:        String,
  pub full_name:        String,
  pub alias:            Option<String>,
  pub gender:           Option<String>,
  pub status:           Option<String>,
  pub generation_level: Option<i32>,
  pub home_town:        Option<String>,
  pub birth_date_solar: Option<String>,
  pub birth_date_lunar: Option<String>,
  pub death_date_solar: Option<String>,
  pub death_date_lunar: Option<String>,
  pub place_of_death:   Option<String>,
  pub grave_info:       Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:       DateTime<Utc>,
}

impl Person {
  /// Combine an ID, an attribute set, and a creation timestamp into a full
  /// record.
  pub fn from_fields(
    person_id: String,
    fields: PersonFields,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      person_id,
      full_name: fields.full_name,
      alias: fields.alias,
      gender: fields.gender,
      status: fields.status,
      generation_level: fields.generation_level,
      home_town: fields.home_town,
      birth_date_solar: fields.birth_date_solar,
      birth_date_lunar: fields.birth_date_lunar,
      death_date_solar: fields.death_date_solar,
      death_date_lunar: fields.death_date_lunar,
      place_of_death: fields.place_of_death,
      grave_info: fields.grave_info,
      created_at,
    }
  }
}
