//! Adjacency maps built from the parent/child link table.
//!
//! Both builders are pure functions over an already-fetched link slice; no
//! database access happens here. The maps are rebuilt for every request —
//! nothing is cached across requests.

use std::collections::HashMap;

use crate::{
  person::Person,
  relationship::{ParentLink, ParentRole, Parents},
};

/// Map each parent ID to the IDs of its recorded children.
///
/// Links with an empty ID on either side are skipped (bulk imports have
/// produced such rows), and a child is listed at most once per parent even
/// if malformed data stores the same pairing twice. List order follows the
/// link slice; callers wanting a name order apply [`sort_children_by_name`].
pub fn children_map(links: &[ParentLink]) -> HashMap<String, Vec<String>> {
  let mut map: HashMap<String, Vec<String>> = HashMap::new();
  for link in links {
    if link.parent_id.is_empty() || link.child_id.is_empty() {
      continue;
    }
    let children = map.entry(link.parent_id.clone()).or_default();
    if !children.contains(&link.child_id) {
      children.push(link.child_id.clone());
    }
  }
  map
}

/// Map each child ID to its recorded father/mother slots.
///
/// A child with no links has no entry; callers treat a missing key as "no
/// known parents".
pub fn parent_map(links: &[ParentLink]) -> HashMap<String, Parents> {
  let mut map: HashMap<String, Parents> = HashMap::new();
  for link in links {
    if link.parent_id.is_empty() || link.child_id.is_empty() {
      continue;
    }
    let slots = map.entry(link.child_id.clone()).or_default();
    match link.relation_type {
      ParentRole::Father => slots.father_id = Some(link.parent_id.clone()),
      ParentRole::Mother => slots.mother_id = Some(link.parent_id.clone()),
    }
  }
  map
}

/// Order every child list by full name, breaking ties by ID. IDs with no
/// person record group ahead of named ones and sort among themselves by ID.
pub fn sort_children_by_name(
  children: &mut HashMap<String, Vec<String>>,
  persons: &HashMap<String, Person>,
) {
  for list in children.values_mut() {
    list.sort_by(|a, b| {
      let name = |id: &str| persons.get(id).map(|p| p.full_name.as_str());
      name(a).cmp(&name(b)).then_with(|| a.cmp(b))
    });
  }
}
