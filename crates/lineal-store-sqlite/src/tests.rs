//! Integration tests for `SqliteStore` against an in-memory database.

use lineal_core::{
  marriage::{MarriageFields, NewMarriage},
  person::PersonFields,
  relationship::ParentRole,
  store::{LineageStore, PersonQuery},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn fields(full_name: &str) -> PersonFields {
  PersonFields {
    full_name: full_name.to_owned(),
    alias: None,
    gender: None,
    status: None,
    generation_level: None,
    home_town: None,
    birth_date_solar: None,
    birth_date_lunar: None,
    death_date_solar: None,
    death_date_lunar: None,
    place_of_death: None,
    grave_info: None,
  }
}

fn detailed_fields(full_name: &str, generation: i32, status: &str) -> PersonFields {
  PersonFields {
    status: Some(status.to_owned()),
    generation_level: Some(generation),
    ..fields(full_name)
  }
}

async fn seed(s: &SqliteStore, id: &str, name: &str) {
  s.add_person(id.to_owned(), fields(name)).await.unwrap();
}

fn marriage(a: &str, b: &str) -> NewMarriage {
  NewMarriage {
    spouse_a: a.to_owned(),
    spouse_b: b.to_owned(),
    status:   "active".to_owned(),
    notes:    None,
  }
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_person() {
  let s = store().await;

  let mut input = fields("Nguyen Van An");
  input.alias = Some("Ca An".to_owned());
  input.generation_level = Some(3);
  input.home_town = Some("Ha Tinh".to_owned());
  input.birth_date_lunar = Some("15-07 At Mao".to_owned());

  let person = s.add_person("G3-001".to_owned(), input).await.unwrap();
  assert_eq!(person.person_id, "G3-001");

  let fetched = s.get_person("G3-001").await.unwrap().unwrap();
  assert_eq!(fetched.full_name, "Nguyen Van An");
  assert_eq!(fetched.alias.as_deref(), Some("Ca An"));
  assert_eq!(fetched.generation_level, Some(3));
  assert_eq!(fetched.birth_date_lunar.as_deref(), Some("15-07 At Mao"));
  assert_eq!(fetched.created_at, person.created_at);
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  assert!(s.get_person("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn add_person_duplicate_id_errors() {
  let s = store().await;
  seed(&s, "G1-001", "An").await;

  let err = s.add_person("G1-001".to_owned(), fields("Binh")).await;
  assert!(err.is_err());
}

#[tokio::test]
async fn update_person_replaces_all_fields() {
  let s = store().await;
  seed(&s, "G1-001", "An").await;

  let mut replacement = fields("Nguyen Van An");
  replacement.status = Some("deceased".to_owned());
  replacement.place_of_death = Some("Hue".to_owned());

  let updated = s
    .update_person("G1-001", replacement)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.full_name, "Nguyen Van An");
  assert_eq!(updated.status.as_deref(), Some("deceased"));

  let fetched = s.get_person("G1-001").await.unwrap().unwrap();
  assert_eq!(fetched.place_of_death.as_deref(), Some("Hue"));
}

#[tokio::test]
async fn update_person_missing_returns_none() {
  let s = store().await;
  let result = s.update_person("nobody", fields("An")).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_person_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_person("nobody").await.unwrap());
}

#[tokio::test]
async fn delete_person_cascades_to_links_and_marriages() {
  let s = store().await;
  seed(&s, "A", "An").await;
  seed(&s, "B", "Binh").await;
  seed(&s, "C", "Cuc").await;

  s.set_parent("B", "A", ParentRole::Father).await.unwrap();
  s.add_marriage(marriage("A", "C")).await.unwrap();

  assert!(s.delete_person("A").await.unwrap());

  let parents = s.parents_of("B").await.unwrap();
  assert_eq!(parents.father_id, None);
  assert!(s.marriages_of("C").await.unwrap().is_empty());

  // The other endpoints survive.
  assert!(s.get_person("B").await.unwrap().is_some());
  assert!(s.get_person("C").await.unwrap().is_some());
}

// ─── Parent links ────────────────────────────────────────────────────────────

#[tokio::test]
async fn set_parent_and_read_back_slots() {
  let s = store().await;
  seed(&s, "C", "Cuc").await;
  seed(&s, "F", "Phong").await;
  seed(&s, "M", "Mai").await;

  let link = s.set_parent("C", "F", ParentRole::Father).await.unwrap();
  assert_eq!(link.parent_id, "F");
  s.set_parent("C", "M", ParentRole::Mother).await.unwrap();

  let parents = s.parents_of("C").await.unwrap();
  assert_eq!(parents.father_id.as_deref(), Some("F"));
  assert_eq!(parents.mother_id.as_deref(), Some("M"));
}

#[tokio::test]
async fn set_parent_replaces_the_slot() {
  let s = store().await;
  seed(&s, "C", "Cuc").await;
  seed(&s, "F1", "Phong").await;
  seed(&s, "F2", "Quang").await;

  s.set_parent("C", "F1", ParentRole::Father).await.unwrap();
  s.set_parent("C", "F2", ParentRole::Father).await.unwrap();

  let parents = s.parents_of("C").await.unwrap();
  assert_eq!(parents.father_id.as_deref(), Some("F2"));
}

#[tokio::test]
async fn set_parent_rejects_self_links() {
  let s = store().await;
  seed(&s, "A", "An").await;

  let err = s.set_parent("A", "A", ParentRole::Father).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(lineal_core::Error::SelfReference(_))
  ));
}

#[tokio::test]
async fn remove_parent_clears_one_slot() {
  let s = store().await;
  seed(&s, "C", "Cuc").await;
  seed(&s, "F", "Phong").await;
  seed(&s, "M", "Mai").await;

  s.set_parent("C", "F", ParentRole::Father).await.unwrap();
  s.set_parent("C", "M", ParentRole::Mother).await.unwrap();

  assert!(s.remove_parent("C", ParentRole::Father).await.unwrap());

  let parents = s.parents_of("C").await.unwrap();
  assert_eq!(parents.father_id, None);
  assert_eq!(parents.mother_id.as_deref(), Some("M"));
}

#[tokio::test]
async fn remove_parent_empty_slot_returns_false() {
  let s = store().await;
  seed(&s, "C", "Cuc").await;
  assert!(!s.remove_parent("C", ParentRole::Father).await.unwrap());
}

// ─── Marriages ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_marriage() {
  let s = store().await;
  seed(&s, "A", "An").await;
  seed(&s, "B", "Bich").await;

  let mut input = marriage("A", "B");
  input.notes = Some("second recorded wedding".to_owned());

  let recorded = s.add_marriage(input).await.unwrap();
  let fetched = s
    .get_marriage(recorded.marriage_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched, recorded);
}

#[tokio::test]
async fn get_marriage_missing_returns_none() {
  let s = store().await;
  assert!(s.get_marriage(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn add_marriage_rejects_self_pairing() {
  let s = store().await;
  seed(&s, "A", "An").await;

  let err = s.add_marriage(marriage("A", "A")).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(lineal_core::Error::SelfReference(_))
  ));
}

#[tokio::test]
async fn update_marriage_replaces_status_and_notes() {
  let s = store().await;
  seed(&s, "A", "An").await;
  seed(&s, "B", "Bich").await;

  let recorded = s.add_marriage(marriage("A", "B")).await.unwrap();
  let updated = s
    .update_marriage(
      recorded.marriage_id,
      MarriageFields {
        status: "divorced".to_owned(),
        notes:  Some("per district record".to_owned()),
      },
    )
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.status, "divorced");
  assert_eq!(updated.notes.as_deref(), Some("per district record"));
}

#[tokio::test]
async fn update_marriage_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_marriage(
      Uuid::new_v4(),
      MarriageFields { status: "active".to_owned(), notes: None },
    )
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_marriage_and_report_absence() {
  let s = store().await;
  seed(&s, "A", "An").await;
  seed(&s, "B", "Bich").await;

  let recorded = s.add_marriage(marriage("A", "B")).await.unwrap();
  assert!(s.delete_marriage(recorded.marriage_id).await.unwrap());
  assert!(!s.delete_marriage(recorded.marriage_id).await.unwrap());
}

#[tokio::test]
async fn marriages_of_matches_either_column() {
  let s = store().await;
  seed(&s, "A", "An").await;
  seed(&s, "B", "Bich").await;
  seed(&s, "C", "Cuc").await;

  s.add_marriage(marriage("A", "B")).await.unwrap();
  s.add_marriage(marriage("C", "A")).await.unwrap();

  let of_a = s.marriages_of("A").await.unwrap();
  assert_eq!(of_a.len(), 2);

  let of_b = s.marriages_of("B").await.unwrap();
  assert_eq!(of_b.len(), 1);
  assert_eq!(of_b[0].spouse_a, "A");
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_persons_text_filter_matches_name_and_alias() {
  let s = store().await;
  let mut aliased = fields("Nguyen Van Binh");
  aliased.alias = Some("Hai Lua".to_owned());
  s.add_person("B".to_owned(), aliased).await.unwrap();
  seed(&s, "A", "Nguyen Van An").await;

  let by_name = s
    .list_persons(&PersonQuery { text: Some("An".to_owned()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(by_name.len(), 1);
  assert_eq!(by_name[0].person_id, "A");

  let by_alias = s
    .list_persons(&PersonQuery { text: Some("Lua".to_owned()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(by_alias.len(), 1);
  assert_eq!(by_alias[0].person_id, "B");
}

#[tokio::test]
async fn list_persons_filters_by_generation_and_status() {
  let s = store().await;
  s.add_person("A".to_owned(), detailed_fields("An", 1, "deceased"))
    .await
    .unwrap();
  s.add_person("B".to_owned(), detailed_fields("Binh", 2, "alive"))
    .await
    .unwrap();
  s.add_person("C".to_owned(), detailed_fields("Cuc", 2, "deceased"))
    .await
    .unwrap();

  let second_generation = s
    .list_persons(&PersonQuery { generation_level: Some(2), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(second_generation.len(), 2);

  let gone = s
    .list_persons(&PersonQuery {
      generation_level: Some(2),
      status: Some("deceased".to_owned()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(gone.len(), 1);
  assert_eq!(gone[0].person_id, "C");
}

#[tokio::test]
async fn list_persons_orders_by_generation_then_name() {
  let s = store().await;
  s.add_person("C".to_owned(), detailed_fields("Cuc", 2, "alive"))
    .await
    .unwrap();
  s.add_person("B".to_owned(), detailed_fields("Binh", 2, "alive"))
    .await
    .unwrap();
  s.add_person("A".to_owned(), detailed_fields("An", 1, "alive"))
    .await
    .unwrap();

  let all = s.list_persons(&PersonQuery::default()).await.unwrap();
  let ids: Vec<&str> = all.iter().map(|p| p.person_id.as_str()).collect();
  assert_eq!(ids, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn list_persons_applies_limit_and_offset() {
  let s = store().await;
  for (id, name) in [("A", "An"), ("B", "Binh"), ("C", "Cuc")] {
    s.add_person(id.to_owned(), detailed_fields(name, 1, "alive"))
      .await
      .unwrap();
  }

  let page = s
    .list_persons(&PersonQuery {
      limit: Some(1),
      offset: Some(1),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(page.len(), 1);
  assert_eq!(page[0].person_id, "B");
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lineage_snapshot_loads_persons_and_links() {
  let s = store().await;
  seed(&s, "A", "An").await;
  seed(&s, "B", "Binh").await;
  seed(&s, "C", "Cuc").await;

  s.set_parent("B", "A", ParentRole::Father).await.unwrap();
  s.set_parent("C", "B", ParentRole::Father).await.unwrap();

  let snapshot = s.lineage_snapshot().await.unwrap();
  assert_eq!(snapshot.persons.len(), 3);
  assert!(snapshot.persons.contains_key("B"));

  let pairs: Vec<(&str, &str)> = snapshot
    .links
    .iter()
    .map(|l| (l.parent_id.as_str(), l.child_id.as_str()))
    .collect();
  assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
}
