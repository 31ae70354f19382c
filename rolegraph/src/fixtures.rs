// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample data set of a small organisation, used to seed a fresh console and in tests.
use crate::model::{Group, IdSet, Permission, Resource, Role, User, UserStatus};
use crate::store::EntityStore;
use crate::traits::Entity;

/// Build a store with 4 resources, 12 permissions, 4 roles, 3 groups and 5 users.
pub fn sample_store() -> EntityStore {
    let mut store = EntityStore::new();

    let resources = [
        ("res1", "User management", "User management module"),
        ("res2", "Role management", "Role management module"),
        ("res3", "Data analysis", "Data analysis module"),
        ("res4", "System settings", "System settings module"),
    ];
    for (id, name, description) in resources {
        store.resources_mut().insert(
            Resource::new(name, "module")
                .with_description(description)
                .with_id(id),
        );
    }

    let permissions = [
        ("p1", "View users", "res1", "read", "List and inspect users"),
        ("p2", "Create users", "res1", "create", "Create new users"),
        ("p3", "Edit users", "res1", "update", "Edit user details"),
        ("p4", "Delete users", "res1", "delete", "Delete users"),
        ("p5", "View roles", "res2", "read", "List and inspect roles"),
        ("p6", "Create roles", "res2", "create", "Create new roles"),
        ("p7", "Edit roles", "res2", "update", "Edit role details"),
        ("p8", "Delete roles", "res2", "delete", "Delete roles"),
        ("p9", "View reports", "res3", "read", "View data reports"),
        ("p10", "Export data", "res3", "export", "Export data sets"),
        ("p11", "Configure system", "res4", "manage", "Change system settings"),
        ("p12", "View logs", "res4", "read", "Read system logs"),
    ];
    for (id, name, resource_id, action, description) in permissions {
        store.permissions_mut().insert(
            Permission::new(name, resource_id, action)
                .with_description(description)
                .with_id(id),
        );
    }

    let all_permissions: Vec<String> = store.permissions().ids().map(String::from).collect();
    store.roles_mut().insert(
        Role::new("Super administrator", "Holds every permission in the system")
            .with_permissions(all_permissions)
            .with_id("r1"),
    );
    store.roles_mut().insert(
        Role::new("User administrator", "Manages users and roles")
            .with_permissions(["p1", "p2", "p3", "p4", "p5", "p6", "p7"])
            .with_id("r2"),
    );
    store.roles_mut().insert(
        Role::new("Data analyst", "Views and analyses data")
            .with_permissions(["p1", "p9", "p10", "p12"])
            .with_id("r3"),
    );
    store.roles_mut().insert(
        Role::new("Regular user", "Basic read access")
            .with_permissions(["p1", "p5", "p9"])
            .with_id("r4"),
    );

    store.groups_mut().insert(
        Group::new("Administrators", "System administrators")
            .with_roles(["r1", "r2"])
            .with_id("g1"),
    );
    store.groups_mut().insert(
        Group::new("Testers", "Quality assurance staff")
            .with_roles(["r3", "r4"])
            .with_id("g2"),
    );
    store.groups_mut().insert(
        Group::new("Developers", "Software developers")
            .with_roles(["r2", "r3"])
            .with_id("g3"),
    );

    let users = [
        ("u1", "Zhang San", "zhangsan@example.com", &["g1"][..], &["r1"][..], UserStatus::Active),
        ("u2", "Li Si", "lisi@example.com", &["g1"][..], &["r2"][..], UserStatus::Active),
        ("u3", "Wang Wu", "wangwu@example.com", &["g2"][..], &["r3", "r4"][..], UserStatus::Active),
        ("u4", "Zhao Liu", "zhaoliu@example.com", &["g3"][..], &["r4"][..], UserStatus::Inactive),
        ("u5", "Sun Qi", "sunqi@example.com", &["g2", "g3"][..], &["r3"][..], UserStatus::Active),
    ];
    for (id, name, email, group_ids, role_ids, status) in users {
        store.users_mut().insert(
            User::new(name, email)
                .with_groups(group_ids.iter().copied().collect::<IdSet>())
                .with_roles(role_ids.iter().copied().collect::<IdSet>())
                .with_status(status)
                .with_id(id),
        );
    }

    store
}
