//! Marriage — a symmetric spouse pairing between two person records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The mutable portion of a marriage row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageFields {
  /// Free string, e.g. "active" or "divorced".
  pub status: String,
  pub notes:  Option<String>,
}

/// A recorded marriage. The pairing is symmetric; which spouse lands in
/// which column carries no meaning. No cardinality constraint applies —
/// historical record-keeping allows overlapping rows for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marriage {
  pub marriage_id: Uuid,
  pub spouse_a:    String,
  pub spouse_b:    String,
  pub status:      String,
  pub notes:       Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
}

/// Input to [`crate::store::LineageStore::add_marriage`].
/// `marriage_id` and `recorded_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMarriage {
  pub spouse_a: String,
  pub spouse_b: String,
  pub status:   String,
  pub notes:    Option<String>,
}
