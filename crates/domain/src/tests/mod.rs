// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DemoRename, ItemUpdate, NewPlayer};

#[test]
fn item_update_accepts_camel_case_wire_keys() {
    let body = r#"{
        "oldName": "Sword",
        "newName": "Longsword",
        "oldPrice": 9.99,
        "newPrice": 14.99,
        "oldFunction": "melee",
        "newFunction": "melee, reach"
    }"#;

    let update: ItemUpdate = serde_json::from_str(body).unwrap();
    assert_eq!(update.old_name, "Sword");
    assert_eq!(update.new_name, "Longsword");
    assert!((update.new_price - 14.99).abs() < f64::EPSILON);
}

#[test]
fn demo_rename_accepts_camel_case_wire_keys() {
    let rename: DemoRename =
        serde_json::from_str(r#"{"oldName": "a", "newName": "b"}"#).unwrap();
    assert_eq!(rename.old_name, "a");
    assert_eq!(rename.new_name, "b");
}

#[test]
fn new_player_rejects_missing_counter() {
    let body = r#"{"username": "alice", "followers": 1, "following": 2, "reviews": 3}"#;
    let result: Result<NewPlayer, _> = serde_json::from_str(body);
    assert!(result.is_err());
}
