//! Integration tests for the normalized collection store.

use std::sync::Arc;

use roster_core::domain::{Contract, Employee, EmployeeView, Skill};
use roster_core::store::{
    build_map_from_list, insert, map_insert, map_remove, map_replace, remove, replace, NormalizedList,
};
use roster_core::types::DbId;

fn employee(id: DbId, name: &str) -> Employee {
    Employee {
        tenant_id: 1,
        id: Some(id),
        version: Some(0),
        name: name.to_string(),
        contract: Contract {
            id: Some(10),
            version: Some(0),
            ..Contract::new(1, "Full time")
        },
        skill_proficiency_set: vec![Skill {
            id: Some(6),
            version: Some(0),
            ..Skill::new(1, "Nurse")
        }],
        short_id: None,
        color: None,
    }
}

/// Snapshots taken before a mutation stay exactly as they were.
#[test]
fn list_snapshots_survive_every_operation() {
    let mut list: NormalizedList<EmployeeView> = Vec::new();
    for (id, name) in [(0, "A"), (1, "B"), (2, "C")] {
        list = insert(&list, &employee(id, name));
    }
    let snapshot = list.clone();

    let replaced = replace(&list, &employee(0, "A2"));
    let removed = remove(&replaced, &employee(1, "B"));

    assert_eq!(list, snapshot);
    let names: Vec<&str> = removed.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A2"]);
}

/// Map snapshots are independent of later maps.
#[test]
fn map_snapshots_survive_every_operation() {
    let map = build_map_from_list(&[employee(0, "A"), employee(1, "B")]).unwrap();
    let snapshot = map.clone();

    let inserted = map_insert(&map, &employee(2, "C")).unwrap();
    let replaced = map_replace(&inserted, &employee(0, "A2")).unwrap();
    let removed = map_remove(&replaced, &employee(1, "B"));

    assert_eq!(map, snapshot);
    assert_eq!(inserted.len(), 3);
    assert_eq!(removed.len(), 2);
    assert_eq!(removed[&0].name, "A2");

    // Untouched entries are shared, not copied.
    assert!(Arc::ptr_eq(&map[&1], &inserted[&1]));
}

/// A map built from a listing holds views, not full records.
#[test]
fn build_map_stores_views() {
    let map = build_map_from_list(&[employee(5, "E")]).unwrap();
    assert_eq!(map[&5].contract, Some(10));
    assert_eq!(map[&5].skill_proficiency_set, vec![6]);
}
