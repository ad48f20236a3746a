//! Parent/child link types.

use serde::{Deserialize, Serialize};

/// Which parental role a link records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentRole {
  Father,
  Mother,
}

impl ParentRole {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Father => "father",
      Self::Mother => "mother",
    }
  }
}

/// A directed parent→child edge. Owned by neither endpoint; created and
/// deleted independently of the person records it joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
  pub child_id:      String,
  pub parent_id:     String,
  pub relation_type: ParentRole,
}

/// The father/mother slots recorded for one child. A missing slot means no
/// link of that role exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parents {
  pub father_id: Option<String>,
  pub mother_id: Option<String>,
}

impl Parents {
  /// The parent followed by the ancestors walk: the father if known,
  /// otherwise the mother.
  pub fn lineage_parent(&self) -> Option<&str> {
    self.father_id.as_deref().or(self.mother_id.as_deref())
  }
}
