// SPDX-License-Identifier: MIT OR Apache-2.0

use rolegraph::aggregate::{coverage, role_usage, summary_stats};
use rolegraph::fixtures::sample_store;
use rolegraph::test_utils::setup_logging;
use rolegraph::{
    Entity, EntityStore, Group, Highlighter, IdSet, NodeRef, Permission, PermissionMatrix,
    Resource, Role, RolePatch, Tier, User, UserPatch, UserStatus, effective_permissions,
    effective_permissions_of, reachable,
};

fn ids(permissions: &[Permission]) -> Vec<&str> {
    permissions.iter().map(|permission| permission.id.as_str()).collect()
}

/// u4 holds r4 directly and is a member of g3, whose roles grant something else entirely.
fn split_paths_store() -> EntityStore {
    let mut store = EntityStore::new();

    for id in ["res1", "res2"] {
        store
            .resources_mut()
            .insert(Resource::new(id, "module").with_id(id));
    }
    for (id, resource_id) in [
        ("p1", "res1"),
        ("p5", "res1"),
        ("p9", "res1"),
        ("p2", "res2"),
        ("p6", "res2"),
    ] {
        store
            .permissions_mut()
            .insert(Permission::new(id, resource_id, "read").with_id(id));
    }

    store
        .roles_mut()
        .insert(Role::new("Editor", "").with_permissions(["p2"]).with_id("r2"));
    store
        .roles_mut()
        .insert(Role::new("Analyst", "").with_permissions(["p6"]).with_id("r3"));
    store.roles_mut().insert(
        Role::new("Reader", "")
            .with_permissions(["p1", "p5", "p9"])
            .with_id("r4"),
    );
    store
        .groups_mut()
        .insert(Group::new("Ops", "").with_roles(["r2", "r3"]).with_id("g3"));
    store.users_mut().insert(
        User::new("Zhao Liu", "zhaoliu@example.com")
            .with_roles(["r4"])
            .with_groups(["g3"])
            .with_id("u4"),
    );

    store
}

#[test]
fn resolution_and_highlight_follow_different_paths() {
    setup_logging();
    let store = split_paths_store();

    assert_eq!(
        ids(&effective_permissions_of(&store, "u4")),
        vec!["p1", "p5", "p9"]
    );

    let highlight = reachable(&store, &NodeRef::user("u4"));
    assert_eq!(
        highlight.to_sorted_vec(),
        vec![
            NodeRef::user("u4"),
            NodeRef::group("g3"),
            NodeRef::role("r2"),
            NodeRef::role("r3"),
            NodeRef::permission("p2"),
            NodeRef::permission("p6"),
            NodeRef::resource("res2"),
        ]
    );
    for permission in ["p1", "p5", "p9"] {
        assert!(!highlight.contains(Tier::Permission, permission));
    }
    assert!(!highlight.contains(Tier::Role, "r4"));
}

#[test]
fn deleted_role_leaves_dangling_references() {
    setup_logging();
    let mut store = sample_store();
    assert!(store.roles_mut().remove("r2"));

    // Lists still mention r2, nothing was cascaded.
    assert!(store.users().get("u2").unwrap().role_ids.contains("r2"));
    assert!(store.groups().get("g1").unwrap().role_ids.contains("r2"));

    assert!(effective_permissions_of(&store, "u2").is_empty());

    let highlight = reachable(&store, &NodeRef::group("g1"));
    assert!(!highlight.contains(Tier::Role, "r2"));
    assert_eq!(highlight.len(), 1 + 1 + 12 + 4);

    let usage = role_usage(store.roles().as_slice(), store.users().as_slice());
    assert_eq!(usage.len(), 3);
    assert!(usage.iter().all(|usage| usage.role.id != "r2"));

    let stats = summary_stats(
        store.users().as_slice(),
        store.roles().as_slice(),
        store.permissions().as_slice(),
    );
    // (12 + 4 + 3) / 3 rounds to 6.
    assert_eq!(stats.avg_permissions_per_role, 6);
    assert_eq!(stats.total_roles, 3);
}

#[test]
fn matrix_toggle_flow() {
    let mut store = sample_store();
    let before = PermissionMatrix::build(&store);
    assert!(!before.is_granted("r4", "p6"));

    assert_eq!(store.toggle_role_permission("r4", "p6"), Some(true));
    assert!(PermissionMatrix::build(&store).is_granted("r4", "p6"));
    assert_eq!(
        ids(&effective_permissions_of(&store, "u4")),
        vec!["p1", "p5", "p6", "p9"]
    );

    assert_eq!(store.toggle_role_permission("r4", "p6"), Some(false));
    assert_eq!(PermissionMatrix::build(&store), before);

    assert_eq!(store.toggle_role_permission("r404", "p6"), None);
}

#[test]
fn highlighter_stays_stale_until_refreshed() {
    let mut store = sample_store();
    let mut highlighter = Highlighter::new();
    assert!(!highlighter.is_active());

    highlighter.hover(&store, NodeRef::group("g1"));
    assert!(highlighter.is_hovered(&NodeRef::group("g1")));
    assert!(highlighter.highlight().contains(Tier::Role, "r1"));

    store.roles_mut().remove("r1");
    assert!(highlighter.highlight().contains(Tier::Role, "r1"));

    let refreshed = highlighter.refresh(&store);
    assert!(!refreshed.contains(Tier::Role, "r1"));
    assert!(refreshed.contains(Tier::Permission, "p7"));
    assert!(!refreshed.contains(Tier::Permission, "p8"));

    highlighter.clear();
    assert!(!highlighter.is_active());
    assert!(highlighter.highlight().is_empty());
}

#[test]
fn edit_user_through_patches() {
    let mut store = sample_store();
    let id = store.users_mut().add(
        User::new("Qian Ba", "qianba@example.com").with_status(UserStatus::Inactive),
    );
    assert_eq!(id, "u6");
    assert!(effective_permissions_of(&store, &id).is_empty());

    assert!(store.users_mut().update(
        &id,
        UserPatch {
            role_ids: Some(IdSet::from(["r3", "r404"])),
            status: Some(UserStatus::Active),
            ..Default::default()
        },
    ));
    let user = store.users().get(&id).unwrap();
    assert_eq!(user.name, "Qian Ba");
    assert!(user.status.is_active());
    assert_eq!(
        ids(&effective_permissions(&store, user)),
        vec!["p1", "p9", "p10", "p12"]
    );
    assert_eq!(coverage(&store, user).percentage(), Some(4.0 * 100.0 / 12.0));

    assert!(!store.roles_mut().update(
        "r404",
        RolePatch {
            name: Some("Ghost".to_string()),
            ..Default::default()
        },
    ));

    let found = store.search_users("QIAN");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), "u6");
}
