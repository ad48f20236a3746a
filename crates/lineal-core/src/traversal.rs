//! Lineage walks over the adjacency maps built by [`crate::graph`].
//!
//! All three walks are pure functions over per-request snapshots. Each one
//! carries the path of IDs from its starting point; revisiting an ID that is
//! already on the current path means the link data contains a cycle, which
//! is reported as [`Error::LineageCycle`] instead of being truncated away by
//! the depth bound. Reaching the same person along two different branches
//! (a child of two persons who both descend from the root) is legitimate
//! genealogy, not a cycle.
//!
//! A person missing from the snapshot prunes that branch with a warning —
//! gaps are common in historical data, so partial results win over hard
//! failures there.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result, person::Person, relationship::Parents};

// ─── Output types ────────────────────────────────────────────────────────────

/// One node of the nested descendant tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
  pub person_id:        String,
  pub full_name:        String,
  pub alias:            Option<String>,
  pub gender:           Option<String>,
  pub status:           Option<String>,
  pub generation_level: Option<i32>,
  pub children:         Vec<TreeNode>,
}

impl TreeNode {
  fn leaf(person: &Person) -> Self {
    Self {
      person_id:        person.person_id.clone(),
      full_name:        person.full_name.clone(),
      alias:            person.alias.clone(),
      gender:           person.gender.clone(),
      status:           person.status.clone(),
      generation_level: person.generation_level,
      children:         Vec::new(),
    }
  }
}

/// One step of the ancestors chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode {
  pub person_id:        String,
  pub full_name:        String,
  pub gender:           Option<String>,
  pub status:           Option<String>,
  pub generation_level: Option<i32>,
}

impl ChainNode {
  fn of(person: &Person) -> Self {
    Self {
      person_id:        person.person_id.clone(),
      full_name:        person.full_name.clone(),
      gender:           person.gender.clone(),
      status:           person.status.clone(),
      generation_level: person.generation_level,
    }
  }
}

/// One row of the flat bounded-descendants list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescendantEntry {
  pub person_id: String,
  pub full_name: String,
  /// Levels below the root; the root's own children are depth 1.
  pub depth:     u32,
  pub parent_id: String,
}

// ─── Descendant tree ─────────────────────────────────────────────────────────

/// Build the nested descendant tree rooted at `root_id`, limited to
/// `max_generation` levels with the root counting as generation 1.
///
/// Returns `Ok(None)` when the root has no person record. Child order
/// follows `children`; apply [`crate::graph::sort_children_by_name`] first
/// where a name order is wanted.
pub fn descendant_tree(
  root_id: &str,
  persons: &HashMap<String, Person>,
  children: &HashMap<String, Vec<String>>,
  max_generation: u32,
) -> Result<Option<TreeNode>> {
  let walk = DescentWalk { persons, children };
  walk.tree_below(root_id, 1, max_generation, &mut Vec::new())
}

// ─── Ancestors chain ─────────────────────────────────────────────────────────

/// Walk the single father-preferred lineage upward from `person_id` and
/// return it oldest-ancestor-first, with the queried person last.
///
/// The walk stops at the first person with no recorded parent, or with no
/// person record (logged, non-fatal). A person's maternal line beyond one
/// hop is not represented — this is one path, not the full ancestor set.
pub fn ancestors_chain(
  person_id: &str,
  persons: &HashMap<String, Person>,
  parents: &HashMap<String, Parents>,
) -> Result<Vec<ChainNode>> {
  let mut chain = Vec::new();
  let mut path = Vec::new();
  let mut current = person_id.to_owned();

  loop {
    let Some(person) = persons.get(&current) else {
      warn!(person_id = %current, "ancestors walk stopped: no person record");
      break;
    };
    chain.push(ChainNode::of(person));
    path.push(current.clone());

    let Some(next) = parents.get(&current).and_then(Parents::lineage_parent)
    else {
      break;
    };
    if path.iter().any(|seen| seen.as_str() == next) {
      let mut cycle = path.clone();
      cycle.push(next.to_owned());
      return Err(Error::LineageCycle { path: cycle });
    }
    current = next.to_owned();
  }

  chain.reverse();
  Ok(chain)
}

// ─── Bounded descendants list ────────────────────────────────────────────────

/// Collect the flat descendants list of `root_id` down to `max_depth`
/// levels, depth-first with each parent ahead of its children.
///
/// The root contributes only its children and is never listed itself.
/// Entries at `max_depth` are included but not descended into.
pub fn descendant_entries(
  root_id: &str,
  persons: &HashMap<String, Person>,
  children: &HashMap<String, Vec<String>>,
  max_depth: u32,
) -> Result<Vec<DescendantEntry>> {
  let walk = DescentWalk { persons, children };
  let mut entries = Vec::new();
  walk.collect_below(root_id, None, 0, max_depth, &mut Vec::new(), &mut entries)?;
  Ok(entries)
}

// ─── Walk state ──────────────────────────────────────────────────────────────

/// Borrowed snapshot shared by the two downward walks.
struct DescentWalk<'a> {
  persons:  &'a HashMap<String, Person>,
  children: &'a HashMap<String, Vec<String>>,
}

impl DescentWalk<'_> {
  fn tree_below(
    &self,
    id: &str,
    generation: u32,
    max_generation: u32,
    path: &mut Vec<String>,
  ) -> Result<Option<TreeNode>> {
    if generation > max_generation {
      return Ok(None);
    }
    let Some(person) = self.persons.get(id) else {
      warn!(person_id = id, "pruning branch: no person record");
      return Ok(None);
    };
    if path.iter().any(|seen| seen.as_str() == id) {
      let mut cycle = path.clone();
      cycle.push(id.to_owned());
      return Err(Error::LineageCycle { path: cycle });
    }

    path.push(id.to_owned());
    let mut node = TreeNode::leaf(person);
    if let Some(child_ids) = self.children.get(id) {
      for child_id in child_ids {
        if let Some(child) =
          self.tree_below(child_id, generation + 1, max_generation, path)?
        {
          node.children.push(child);
        }
      }
    }
    path.pop();

    Ok(Some(node))
  }

  fn collect_below(
    &self,
    id: &str,
    parent_id: Option<&str>,
    depth: u32,
    max_depth: u32,
    path: &mut Vec<String>,
    entries: &mut Vec<DescendantEntry>,
  ) -> Result<()> {
    let Some(person) = self.persons.get(id) else {
      warn!(person_id = id, "pruning branch: no person record");
      return Ok(());
    };
    if path.iter().any(|seen| seen.as_str() == id) {
      let mut cycle = path.clone();
      cycle.push(id.to_owned());
      return Err(Error::LineageCycle { path: cycle });
    }

    if let Some(parent_id) = parent_id {
      entries.push(DescendantEntry {
        person_id: person.person_id.clone(),
        full_name: person.full_name.clone(),
        depth,
        parent_id: parent_id.to_owned(),
      });
    }
    if depth >= max_depth {
      return Ok(());
    }

    path.push(id.to_owned());
    if let Some(child_ids) = self.children.get(id) {
      for child_id in child_ids {
        self.collect_below(child_id, Some(id), depth + 1, max_depth, path, entries)?;
      }
    }
    path.pop();
    Ok(())
  }
}
