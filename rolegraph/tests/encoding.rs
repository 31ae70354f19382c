// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg(feature = "serde")]

use ciborium::cbor;
use ciborium::value::Value;
use rolegraph::fixtures::sample_store;
use rolegraph::{
    Collection, Entity, EntityStore, LayoutConfig, NodeRef, PermissionMatrix, User, reachable,
};

fn encode<T: serde::Serialize>(value: &T) -> Vec<u8> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes).unwrap();
    bytes
}

#[test]
fn store_snapshot_survives_encoding() {
    let mut store = sample_store();
    let bytes = encode(&store.snapshot());
    let mut decoded: EntityStore = ciborium::from_reader(bytes.as_slice()).unwrap();

    assert_eq!(decoded.users().as_slice(), store.users().as_slice());
    assert_eq!(decoded.roles().as_slice(), store.roles().as_slice());
    assert_eq!(PermissionMatrix::build(&decoded), PermissionMatrix::build(&store));
    assert_eq!(
        reachable(&decoded, &NodeRef::user("u4")),
        reachable(&store, &NodeRef::user("u4"))
    );

    // The id counter is part of the snapshot.
    let user = User::new("Qian Ba", "qianba@example.com");
    assert_eq!(
        decoded.users_mut().add(user.clone()),
        store.users_mut().add(user)
    );
}

#[test]
fn field_names() {
    let store = sample_store();
    let user = store.users().get("u4").unwrap();
    let value: Value = ciborium::from_reader(encode(user).as_slice()).unwrap();
    let keys: Vec<String> = value
        .as_map()
        .unwrap()
        .iter()
        .filter_map(|(key, _)| key.as_text().map(str::to_string))
        .collect();
    assert_eq!(keys, ["id", "name", "email", "groupIds", "roleIds", "status"]);

    let value: Value = ciborium::from_reader(encode(&user.status).as_slice()).unwrap();
    assert_eq!(value.as_text(), Some("inactive"));

    let resource: Value =
        ciborium::from_reader(encode(store.resources().get("res1").unwrap()).as_slice()).unwrap();
    assert!(
        resource
            .as_map()
            .unwrap()
            .iter()
            .any(|(key, value)| key.as_text() == Some("type") && value.as_text() == Some("module"))
    );
}

#[test]
fn partial_layout_config() {
    let config: LayoutConfig = cbor!({ "columnWidth" => 200 })
        .unwrap()
        .deserialized()
        .unwrap();

    assert_eq!(config.column_width, 200);
    assert_eq!(
        config,
        LayoutConfig {
            column_width: 200,
            ..Default::default()
        }
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let alice = User::new("Alice", "alice@example.com").with_id("u1");
    let bob = User::new("Bob", "bob@example.com").with_id("u1");

    let entries = Value::serialized(&vec![alice.clone(), bob]).unwrap();
    let value = cbor!({ "entries" => entries, "counter" => 1 }).unwrap();
    let result: Result<Collection<User>, _> = value.deserialized();
    assert!(result.is_err());

    let carol = User::new("Carol", "carol@example.com").with_id("u2");
    let entries = Value::serialized(&vec![alice, carol]).unwrap();
    let value = cbor!({ "entries" => entries }).unwrap();
    let mut users: Collection<User> = value.deserialized().unwrap();
    assert_eq!(users.len(), 2);

    // Without a stored counter, generated ids still skip taken ones.
    assert_eq!(users.add(User::new("Dave", "dave@example.com")), "u3");

    assert!(users.remove("u1"));
    assert!(!users.contains("u1"));
    assert_eq!(users.len(), 2);
}
