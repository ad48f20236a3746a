//! [`SqliteStore`] — the SQLite implementation of [`LineageStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use lineal_core::{
  marriage::{Marriage, MarriageFields, NewMarriage},
  person::{Person, PersonFields},
  relationship::{ParentLink, ParentRole, Parents},
  store::{LineageSnapshot, LineageStore, PersonQuery},
};

use crate::{
  Error, Result,
  encode::{
    RawMarriage, RawParentLink, RawPerson, decode_parent_role, encode_dt,
    encode_parent_role, encode_uuid,
  },
  schema::SCHEMA,
};

/// Column list matching [`RawPerson::from_row`] index order.
pub(crate) const PERSON_COLUMNS: &str = "person_id, full_name, alias, gender, \
   status, generation_level, home_town, birth_date_solar, birth_date_lunar, \
   death_date_solar, death_date_lunar, place_of_death, grave_info, created_at";

/// Column list matching [`RawMarriage::from_row`] index order.
pub(crate) const MARRIAGE_COLUMNS: &str =
  "marriage_id, spouse_a, spouse_b, status, notes, recorded_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lineal store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Person`] into the `persons` table.
  async fn insert_person(&self, person: &Person) -> Result<()> {
    let row = person.clone();
    let created_at_str = encode_dt(person.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, full_name, alias, gender, status, generation_level,
             home_town, birth_date_solar, birth_date_lunar, death_date_solar,
             death_date_lunar, place_of_death, grave_info, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
          rusqlite::params![
            row.person_id,
            row.full_name,
            row.alias,
            row.gender,
            row.status,
            row.generation_level,
            row.home_town,
            row.birth_date_solar,
            row.birth_date_lunar,
            row.death_date_solar,
            row.death_date_lunar,
            row.place_of_death,
            row.grave_info,
            created_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LineageStore impl ───────────────────────────────────────────────────────

impl LineageStore for SqliteStore {
  type Error = Error;

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn add_person(
    &self,
    person_id: String,
    fields: PersonFields,
  ) -> Result<Person> {
    let person = Person::from_fields(person_id, fields, Utc::now());
    self.insert_person(&person).await?;
    Ok(person)
  }

  async fn get_person(&self, person_id: &str) -> Result<Option<Person>> {
    let id = person_id.to_owned();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE person_id = ?1"),
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_persons(&self, query: &PersonQuery) -> Result<Vec<Person>> {
    let text_pattern = query.text.as_deref().map(|t| format!("%{t}%"));
    let generation   = query.generation_level;
    let status       = query.status.clone();
    let limit_val    = query.limit.unwrap_or(100) as i64;
    let offset_val   = query.offset.unwrap_or(0) as i64;

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        // Build the WHERE clause dynamically; placeholder numbers are fixed.
        let mut conds: Vec<&'static str> = vec![];
        if text_pattern.is_some() {
          conds.push("(full_name LIKE ?1 OR alias LIKE ?1)");
        }
        if generation.is_some() {
          conds.push("generation_level = ?2");
        }
        if status.is_some() {
          conds.push("status = ?3");
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT {PERSON_COLUMNS} FROM persons
           {where_clause}
           ORDER BY generation_level, full_name, person_id
           LIMIT ?4 OFFSET ?5"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![
              text_pattern.as_deref(),
              generation,
              status.as_deref(),
              limit_val,
              offset_val,
            ],
            RawPerson::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn update_person(
    &self,
    person_id: &str,
    fields: PersonFields,
  ) -> Result<Option<Person>> {
    let id = person_id.to_owned();
    let row = fields.clone();

    let changed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE persons SET
             full_name = ?2, alias = ?3, gender = ?4, status = ?5,
             generation_level = ?6, home_town = ?7, birth_date_solar = ?8,
             birth_date_lunar = ?9, death_date_solar = ?10,
             death_date_lunar = ?11, place_of_death = ?12, grave_info = ?13
           WHERE person_id = ?1",
          rusqlite::params![
            id,
            row.full_name,
            row.alias,
            row.gender,
            row.status,
            row.generation_level,
            row.home_town,
            row.birth_date_solar,
            row.birth_date_lunar,
            row.death_date_solar,
            row.death_date_lunar,
            row.place_of_death,
            row.grave_info,
          ],
        )?;
        Ok(changed)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_person(person_id).await
  }

  async fn delete_person(&self, person_id: &str) -> Result<bool> {
    let id = person_id.to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE person_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  // ── Parent links ──────────────────────────────────────────────────────────

  async fn set_parent(
    &self,
    child_id: &str,
    parent_id: &str,
    role: ParentRole,
  ) -> Result<ParentLink> {
    if child_id == parent_id {
      return Err(lineal_core::Error::SelfReference(child_id.to_owned()).into());
    }

    let link = ParentLink {
      child_id:      child_id.to_owned(),
      parent_id:     parent_id.to_owned(),
      relation_type: role,
    };

    let child    = child_id.to_owned();
    let parent   = parent_id.to_owned();
    let role_str = encode_parent_role(role).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO relationships (child_id, parent_id, relation_type)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (child_id, relation_type)
           DO UPDATE SET parent_id = excluded.parent_id",
          rusqlite::params![child, parent, role_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(link)
  }

  async fn remove_parent(&self, child_id: &str, role: ParentRole) -> Result<bool> {
    let child    = child_id.to_owned();
    let role_str = encode_parent_role(role).to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM relationships WHERE child_id = ?1 AND relation_type = ?2",
          rusqlite::params![child, role_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn parents_of(&self, child_id: &str) -> Result<Parents> {
    let child = child_id.to_owned();

    let rows: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT parent_id, relation_type FROM relationships WHERE child_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![child], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut parents = Parents::default();
    for (parent_id, role_str) in rows {
      match decode_parent_role(&role_str)? {
        ParentRole::Father => parents.father_id = Some(parent_id),
        ParentRole::Mother => parents.mother_id = Some(parent_id),
      }
    }
    Ok(parents)
  }

  // ── Marriages ─────────────────────────────────────────────────────────────

  async fn add_marriage(&self, input: NewMarriage) -> Result<Marriage> {
    if input.spouse_a == input.spouse_b {
      return Err(lineal_core::Error::SelfReference(input.spouse_a).into());
    }

    let marriage = Marriage {
      marriage_id: Uuid::new_v4(),
      spouse_a:    input.spouse_a,
      spouse_b:    input.spouse_b,
      status:      input.status,
      notes:       input.notes,
      recorded_at: Utc::now(),
    };

    let id_str = encode_uuid(marriage.marriage_id);
    let at_str = encode_dt(marriage.recorded_at);
    let row    = marriage.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO marriages (marriage_id, spouse_a, spouse_b, status, notes, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, row.spouse_a, row.spouse_b, row.status, row.notes, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(marriage)
  }

  async fn get_marriage(&self, marriage_id: Uuid) -> Result<Option<Marriage>> {
    let id_str = encode_uuid(marriage_id);

    let raw: Option<RawMarriage> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MARRIAGE_COLUMNS} FROM marriages WHERE marriage_id = ?1"),
              rusqlite::params![id_str],
              RawMarriage::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMarriage::into_marriage).transpose()
  }

  async fn update_marriage(
    &self,
    marriage_id: Uuid,
    fields: MarriageFields,
  ) -> Result<Option<Marriage>> {
    let id_str = encode_uuid(marriage_id);

    let changed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE marriages SET status = ?2, notes = ?3 WHERE marriage_id = ?1",
          rusqlite::params![id_str, fields.status, fields.notes],
        )?;
        Ok(changed)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_marriage(marriage_id).await
  }

  async fn delete_marriage(&self, marriage_id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(marriage_id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM marriages WHERE marriage_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn marriages_of(&self, person_id: &str) -> Result<Vec<Marriage>> {
    let id = person_id.to_owned();

    let raws: Vec<RawMarriage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MARRIAGE_COLUMNS} FROM marriages
           WHERE spouse_a = ?1 OR spouse_b = ?1
           ORDER BY recorded_at, marriage_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id], RawMarriage::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMarriage::into_marriage).collect()
  }

  // ── Lineage input ─────────────────────────────────────────────────────────

  async fn lineage_snapshot(&self) -> Result<LineageSnapshot> {
    let (raw_persons, raw_links) = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PERSON_COLUMNS} FROM persons"))?;
        let persons = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        // Fixed fetch order keeps children_map insertion order stable.
        let mut stmt = conn.prepare(
          "SELECT child_id, parent_id, relation_type FROM relationships
           ORDER BY parent_id, child_id",
        )?;
        let links = stmt
          .query_map([], RawParentLink::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((persons, links))
      })
      .await?;

    let persons = raw_persons
      .into_iter()
      .map(|raw| {
        raw
          .into_person()
          .map(|person| (person.person_id.clone(), person))
      })
      .collect::<Result<HashMap<_, _>>>()?;

    let links = raw_links
      .into_iter()
      .map(RawParentLink::into_link)
      .collect::<Result<Vec<_>>>()?;

    Ok(LineageSnapshot { persons, links })
  }
}
