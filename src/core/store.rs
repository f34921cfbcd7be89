use crate::core::{Contact, ContactField, ContactId, StoredContact};

/// 有序的聯絡人清單。識別以 `ContactId` 為準，不以內容比對。
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    entries: Vec<StoredContact>,
    next_id: u64,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut store = Self::new();
        store.extend(contacts);
        store
    }

    pub fn add(&mut self, contact: Contact) -> ContactId {
        let id = ContactId(self.next_id);
        self.next_id += 1;
        self.entries.push(StoredContact { id, contact });
        id
    }

    pub fn extend(&mut self, contacts: impl IntoIterator<Item = Contact>) -> usize {
        let before = self.entries.len();
        for contact in contacts {
            self.add(contact);
        }
        self.entries.len() - before
    }

    /// 依識別碼移除；其餘項目保持原本順序
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let position = self.position_of(id)?;
        Some(self.entries.remove(position).contact)
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.contact)
    }

    pub fn get_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.contact)
    }

    pub fn position_of(&self, id: ContactId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn at(&self, position: usize) -> Option<&StoredContact> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> &[StoredContact] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.entries.iter().map(|entry| &entry.contact)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 回傳依欄位排序後的副本，不改動 store 本身。
    ///
    /// 以不分大小寫的值比較，相同時再比原始值；兩者皆相同則保留插入順序。
    pub fn sorted_by(&self, field: ContactField) -> Vec<&StoredContact> {
        let mut view: Vec<&StoredContact> = self.entries.iter().collect();
        view.sort_by(|a, b| {
            let (left, right) = (a.contact.field(field), b.contact.field(field));
            left.to_ascii_lowercase()
                .cmp(&right.to_ascii_lowercase())
                .then_with(|| left.cmp(right))
        });
        view
    }

    /// 名或姓包含關鍵字（不分大小寫）的聯絡人
    pub fn search_by_name(&self, term: &str) -> Vec<&StoredContact> {
        let needle = term.to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.contact.first_name.to_ascii_lowercase().contains(&needle)
                    || entry.contact.last_name.to_ascii_lowercase().contains(&needle)
            })
            .collect()
    }
}
