//! Error types for `lineal-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A person may not be recorded as their own parent or spouse.
  #[error("person {0} cannot be linked to themselves")]
  SelfReference(String),

  /// The parent/child links contain a cycle. `path` lists the IDs in walk
  /// order, ending with the first repeated ID.
  #[error("lineage cycle detected: {}", .path.join(" -> "))]
  LineageCycle { path: Vec<String> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
