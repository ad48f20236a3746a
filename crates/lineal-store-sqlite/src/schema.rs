//! SQL schema for the Lineal SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    person_id        TEXT PRIMARY KEY,
    full_name        TEXT NOT NULL,
    alias            TEXT,
    gender           TEXT,
    status           TEXT,            -- free string, e.g. 'alive' | 'deceased'
    generation_level INTEGER,
    home_town        TEXT,
    birth_date_solar TEXT,            -- free text; historical dates are messy
    birth_date_lunar TEXT,
    death_date_solar TEXT,
    death_date_lunar TEXT,
    place_of_death   TEXT,
    grave_info       TEXT,
    created_at       TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- One father slot and one mother slot per child.
CREATE TABLE IF NOT EXISTS relationships (
    child_id      TEXT NOT NULL REFERENCES persons(person_id) ON DELETE CASCADE,
    parent_id     TEXT NOT NULL REFERENCES persons(person_id) ON DELETE CASCADE,
    relation_type TEXT NOT NULL,      -- 'father' | 'mother'
    PRIMARY KEY (child_id, relation_type)
);

-- Symmetric pairing; which spouse lands in which column carries no meaning.
CREATE TABLE IF NOT EXISTS marriages (
    marriage_id TEXT PRIMARY KEY,
    spouse_a    TEXT NOT NULL REFERENCES persons(person_id) ON DELETE CASCADE,
    spouse_b    TEXT NOT NULL REFERENCES persons(person_id) ON DELETE CASCADE,
    status      TEXT NOT NULL,        -- free string, e.g. 'active' | 'divorced'
    notes       TEXT,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS relationships_parent_idx ON relationships(parent_id);
CREATE INDEX IF NOT EXISTS marriages_spouse_a_idx   ON marriages(spouse_a);
CREATE INDEX IF NOT EXISTS marriages_spouse_b_idx   ON marriages(spouse_b);
CREATE INDEX IF NOT EXISTS persons_generation_idx   ON persons(generation_level);

PRAGMA user_version = 1;
";
