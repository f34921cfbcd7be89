use contact_book::core::grouper::find_duplicate_groups;
use contact_book::{Contact, ContactStore, MergeEngine, ScriptedPort};
use std::collections::HashSet;

fn duplicate_store() -> ContactStore {
    ContactStore::from_contacts(vec![
        Contact::new("John", "Smith", "5551234567", "a@x.com"),
        Contact::new("John", "Smith", "9999999999", "b@y.com"),
        Contact::new("Carl", "Jones", "", "c@z.com"),
    ])
}

/// 測試同名的兩筆被分成一組，Carl Jones 不在任何群組
#[test]
fn test_grouping_matches_on_full_name() {
    let store = duplicate_store();
    let groups = find_duplicate_groups(store.entries());

    assert_eq!(groups.len(), 1);
    let members: Vec<&str> = groups[0]
        .members
        .iter()
        .map(|m| m.contact.phone_number.as_str())
        .collect();
    assert_eq!(members, vec!["5551234567", "9999999999"]);
    assert_eq!(groups[0].anchor().id, store.at(0).unwrap().id);
}

/// 測試合併後刪除兩筆原始資料，只剩合併結果與無關聯絡人
#[test]
fn test_merge_then_delete_originals() {
    let mut store = ContactStore::from_contacts(vec![
        Contact::new("John", "Smith", "5551234567", "a@x.com"),
        Contact::new("john", "smith", "9999999999", "b@y.com"),
    ]);
    // first: 1 (john), last: 0 (Smith), phone: 0, email: 1, add, delete both
    let mut engine = MergeEngine::new(ScriptedPort::new(["1", "0", "0", "1", "y", "y", "y"]));

    let outcome = engine.run(&mut store).unwrap();

    assert!(outcome.changed());
    let remaining: Vec<Contact> = store.iter().cloned().collect();
    assert_eq!(
        remaining,
        vec![Contact::new("john", "Smith", "5551234567", "b@y.com")]
    );

    let port = engine.into_port();
    assert!(port.transcript().contains("New merged contact preview:"));
    assert!(port.transcript().contains("Changes were made to the contact list."));
    assert_eq!(port.remaining_answers(), 0);
}

/// 測試全部拒絕時 store 完全不變
#[test]
fn test_declining_keeps_store_identical() {
    let mut store = duplicate_store();
    let before: Vec<Contact> = store.iter().cloned().collect();
    let mut engine = MergeEngine::new(ScriptedPort::new(["1", "1", "n", "n", "n"]));

    let outcome = engine.run(&mut store).unwrap();

    assert!(!outcome.changed());
    assert_eq!(store.iter().cloned().collect::<Vec<_>>(), before);
}

/// 測試多個群組互不重疊，且每組至少兩筆
#[test]
fn test_groups_are_disjoint_on_mixed_data() {
    let store = ContactStore::from_contacts(vec![
        Contact::new("Ann", "Lee", "111", "ann@x.com"),
        Contact::new("Ben", "Ray", "222", "ANN@x.com"),
        Contact::new("Cid", "Fox", "222", "cid@x.com"),
        Contact::new("ann", "LEE", "", ""),
        Contact::new("Dee", "Ng", "", "cid@X.COM"),
        Contact::new("Eve", "Oh", "999", ""),
    ]);

    let groups = find_duplicate_groups(store.entries());
    let mut seen = HashSet::new();
    for group in &groups {
        assert!(group.len() >= 2);
        for id in group.ids() {
            assert!(seen.insert(id));
        }
    }

    // Ann: Ben(email) + ann LEE(name)；Cid: Dee(email)；Eve 單獨
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(groups[1].len(), 2);
    let eve = store.at(5).unwrap().id;
    assert!(!seen.contains(&eve));
}

/// 測試合併中途輸入結束時，尚未確認的動作都不會執行
#[test]
fn test_input_closed_mid_group_applies_nothing_unconfirmed() {
    let mut store = duplicate_store();
    let mut engine = MergeEngine::new(ScriptedPort::new(["0", "0", "n"]));

    assert!(engine.run(&mut store).is_err());
    assert_eq!(store.len(), 3);
}
