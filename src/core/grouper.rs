use crate::core::{Contact, ContactId, StoredContact};
use std::collections::HashSet;

/// 一組互相重複的聯絡人（至少兩筆），第一筆為錨點。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<'a> {
    pub members: Vec<&'a StoredContact>,
}

impl<'a> DuplicateGroup<'a> {
    pub fn anchor(&self) -> &'a StoredContact {
        self.members[0]
    }

    pub fn ids(&self) -> Vec<ContactId> {
        self.members.iter().map(|member| member.id).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// 複製成不借用 store 的快照，之後才能修改 store
    pub fn snapshot(&self) -> Vec<StoredContact> {
        self.members.iter().map(|member| (*member).clone()).collect()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// 判斷 `candidate` 是否與錨點重複。
///
/// 只檢查錨點欄位是否為空：錨點有名有姓才比對姓名，錨點有電話才比對電話，
/// 錨點有 Email 才比對 Email。這個關係不具遞移性。
pub fn is_duplicate(anchor: &Contact, candidate: &Contact) -> bool {
    let same_name = !is_blank(&anchor.first_name)
        && !is_blank(&anchor.last_name)
        && anchor.first_name.eq_ignore_ascii_case(&candidate.first_name)
        && anchor.last_name.eq_ignore_ascii_case(&candidate.last_name);

    let same_phone = !is_blank(&anchor.phone_number) && anchor.phone_number == candidate.phone_number;

    let same_email = !is_blank(&anchor.email) && anchor.email.eq_ignore_ascii_case(&candidate.email);

    same_name || same_phone || same_email
}

/// 單次前向掃描，將 store 分成互不重疊的重複群組。
///
/// 群組依錨點位置遞增輸出，群組內依位置遞增排列；沒有重複對象的聯絡人不會出現。
pub fn find_duplicate_groups(entries: &[StoredContact]) -> Vec<DuplicateGroup<'_>> {
    let mut groups = Vec::new();
    let mut claimed: HashSet<usize> = HashSet::new();

    for (i, anchor) in entries.iter().enumerate() {
        if claimed.contains(&i) {
            continue;
        }

        let mut positions = vec![i];
        for (j, candidate) in entries.iter().enumerate().skip(i + 1) {
            if claimed.contains(&j) {
                continue;
            }
            if is_duplicate(&anchor.contact, &candidate.contact) {
                positions.push(j);
            }
        }

        if positions.len() > 1 {
            tracing::debug!(
                "Duplicate group anchored at #{} with {} members",
                anchor.id,
                positions.len()
            );
            claimed.extend(positions.iter().copied());
            groups.push(DuplicateGroup {
                members: positions.into_iter().map(|p| &entries[p]).collect(),
            });
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::ContactStore;

    fn store_of(contacts: &[(&str, &str, &str, &str)]) -> ContactStore {
        ContactStore::from_contacts(
            contacts
                .iter()
                .map(|(f, l, p, e)| Contact::new(*f, *l, *p, *e)),
        )
    }

    fn positions(store: &ContactStore, group: &DuplicateGroup<'_>) -> Vec<usize> {
        group
            .ids()
            .into_iter()
            .filter_map(|id| store.position_of(id))
            .collect()
    }

    #[test]
    fn test_same_name_groups_and_excludes_unrelated() {
        let store = store_of(&[
            ("John", "Smith", "5551234567", "a@x.com"),
            ("John", "Smith", "9999999999", "b@y.com"),
            ("Carl", "Jones", "", "c@z.com"),
        ]);

        let groups = find_duplicate_groups(store.entries());
        assert_eq!(groups.len(), 1);
        assert_eq!(positions(&store, &groups[0]), vec![0, 1]);
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let anchor = Contact::new("john", "SMITH", "", "");
        let candidate = Contact::new("John", "Smith", "1", "x@y.com");
        assert!(is_duplicate(&anchor, &candidate));
    }

    #[test]
    fn test_name_requires_both_parts_on_anchor() {
        let anchor = Contact::new("John", "", "", "");
        let candidate = Contact::new("John", "", "", "");
        assert!(!is_duplicate(&anchor, &candidate));
    }

    #[test]
    fn test_phone_match_is_exact() {
        let anchor = Contact::new("A", "B", "555-ABC", "");
        assert!(is_duplicate(&anchor, &Contact::new("C", "D", "555-ABC", "")));
        assert!(!is_duplicate(&anchor, &Contact::new("C", "D", "555-abc", "")));
    }

    #[test]
    fn test_email_match_ignores_case() {
        let anchor = Contact::new("A", "B", "", "Ana@X.com");
        assert!(is_duplicate(&anchor, &Contact::new("C", "D", "", "ana@x.COM")));
    }

    #[test]
    fn test_blank_anchor_fields_never_match() {
        let anchor = Contact::new("  ", "", " ", "");
        let candidate = Contact::new("  ", "", " ", "");
        assert!(!is_duplicate(&anchor, &candidate));
    }

    #[test]
    fn test_first_match_wins_and_groups_are_disjoint() {
        // 0 與 1 電話相同，1 與 2 Email 相同，但 2 不與錨點 0 相符
        let store = store_of(&[
            ("Ann", "Lee", "111", "ann@x.com"),
            ("Bob", "Ray", "111", "bob@x.com"),
            ("Cat", "Kim", "333", "bob@x.com"),
            ("Dan", "Oak", "333", ""),
        ]);

        let groups = find_duplicate_groups(store.entries());
        assert_eq!(groups.len(), 2);
        assert_eq!(positions(&store, &groups[0]), vec![0, 1]);
        assert_eq!(positions(&store, &groups[1]), vec![2, 3]);

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(group.len() >= 2);
            for id in group.ids() {
                assert!(seen.insert(id), "contact {} appears twice", id);
            }
        }
    }

    #[test]
    fn test_group_members_follow_anchor_only() {
        // 2 只和 1 相符；1 被錨點 0 吸收後，2 不會再被比對
        let store = store_of(&[
            ("Ann", "Lee", "111", ""),
            ("Bob", "Ray", "111", "bob@x.com"),
            ("Cat", "Kim", "", "bob@x.com"),
        ]);

        let groups = find_duplicate_groups(store.entries());
        assert_eq!(groups.len(), 1);
        assert_eq!(positions(&store, &groups[0]), vec![0, 1]);
    }

    #[test]
    fn test_grouping_is_repeatable() {
        let store = store_of(&[
            ("John", "Smith", "1", "a@x.com"),
            ("Ana", "Lopez", "2", "b@x.com"),
            ("JOHN", "smith", "3", "c@x.com"),
            ("Zed", "Ray", "2", ""),
        ]);

        let first: Vec<Vec<ContactId>> = find_duplicate_groups(store.entries())
            .iter()
            .map(DuplicateGroup::ids)
            .collect();
        let second: Vec<Vec<ContactId>> = find_duplicate_groups(store.entries())
            .iter()
            .map(DuplicateGroup::ids)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_empty_and_single_store_have_no_groups() {
        assert!(find_duplicate_groups(&[]).is_empty());
        let store = store_of(&[("Solo", "One", "1", "s@x.com")]);
        assert!(find_duplicate_groups(store.entries()).is_empty());
    }
}
