//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, parental roles as the strings 'father'/'mother'. Raw rows are
//! converted into domain types immediately after fetch; no driver row ever
//! crosses into domain logic.

use chrono::{DateTime, Utc};
use lineal_core::{
  marriage::Marriage,
  person::Person,
  relationship::{ParentLink, ParentRole},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ParentRole ──────────────────────────────────────────────────────────────

pub fn encode_parent_role(role: ParentRole) -> &'static str { role.as_str() }

pub fn decode_parent_role(s: &str) -> Result<ParentRole> {
  match s {
    "father" => Ok(ParentRole::Father),
    "mother" => Ok(ParentRole::Mother),
    other => Err(Error::Decode(format!("unknown relation type: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `persons` row.
pub struct RawPerson {
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
  pub created_at:       String,
}

impl RawPerson {
  /// Read a row selected in [`crate::store::PERSON_COLUMNS`] order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:        row.get(0)?,
      full_name:        row.get(1)?,
      alias:            row.get(2)?,
      gender:           row.get(3)?,
      status:           row.get(4)?,
      generation_level: row.get(5)?,
      home_town:        row.get(6)?,
      birth_date_solar: row.get(7)?,
      birth_date_lunar: row.get(8)?,
      death_date_solar: row.get(9)?,
      death_date_lunar: row.get(10)?,
      place_of_death:   row.get(11)?,
      grave_info:       row.get(12)?,
      created_at:       row.get(13)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:        self.person_id,
      full_name:        self.full_name,
      alias:            self.alias,
      gender:           self.gender,
      status:           self.status,
      generation_level: self.generation_level,
      home_town:        self.home_town,
      birth_date_solar: self.birth_date_solar,
      birth_date_lunar: self.birth_date_lunar,
      death_date_solar: self.death_date_solar,
      death_date_lunar: self.death_date_lunar,
      place_of_death:   self.place_of_death,
      grave_info:       self.grave_info,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `relationships` row.
pub struct RawParentLink {
  pub child_id:      String,
  pub parent_id:     String,
  pub relation_type: String,
}

impl RawParentLink {
  /// Read a `child_id, parent_id, relation_type` row.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      child_id:      row.get(0)?,
      parent_id:     row.get(1)?,
      relation_type: row.get(2)?,
    })
  }

  pub fn into_link(self) -> Result<ParentLink> {
    Ok(ParentLink {
      child_id:      self.child_id,
      parent_id:     self.parent_id,
      relation_type: decode_parent_role(&self.relation_type)?,
    })
  }
}

/// Raw values read directly from a `marriages` row.
pub struct RawMarriage {
  pub marriage_id: String,
  pub spouse_a:    String,
  pub spouse_b:    String,
  pub status:      String,
  pub notes:       Option<String>,
  pub recorded_at: String,
}

impl RawMarriage {
  /// Read a row selected in [`crate::store::MARRIAGE_COLUMNS`] order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      marriage_id: row.get(0)?,
      spouse_a:    row.get(1)?,
      spouse_b:    row.get(2)?,
      status:      row.get(3)?,
      notes:       row.get(4)?,
      recorded_at: row.get(5)?,
    })
  }

  pub fn into_marriage(self) -> Result<Marriage> {
    Ok(Marriage {
      marriage_id: decode_uuid(&self.marriage_id)?,
      spouse_a:    self.spouse_a,
      spouse_b:    self.spouse_b,
      status:      self.status,
      notes:       self.notes,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
