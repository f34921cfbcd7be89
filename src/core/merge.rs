use crate::core::grouper::find_duplicate_groups;
use crate::core::reconciler::pick_field_value;
use crate::core::store::ContactStore;
use crate::core::{Contact, ContactField, InteractionPort, MergeOutcome, Result, StoredContact};

/// 重複聯絡人合併流程。
///
/// 每次 `run` 都重新分組；每個群組依序完成欄位選擇、新增確認與逐筆刪除確認，
/// 任何對 store 的修改都在操作者確認之後才發生。
pub struct MergeEngine<P: InteractionPort> {
    port: P,
}

impl<P: InteractionPort> MergeEngine<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn into_port(self) -> P {
        self.port
    }

    pub fn run(&mut self, store: &mut ContactStore) -> Result<MergeOutcome> {
        self.port.show("### Merge & Deduplicate Contacts ###\n");

        // 分組時借用 store，修改前先複製成快照
        let groups: Vec<Vec<StoredContact>> = find_duplicate_groups(store.entries())
            .iter()
            .map(|group| group.snapshot())
            .collect();

        if groups.is_empty() {
            tracing::info!("No duplicate contacts among {} entries", store.len());
            self.port.show("No duplicate contacts were found.");
            return Ok(MergeOutcome::default());
        }

        tracing::info!("🔍 Found {} duplicate group(s)", groups.len());
        self.port.show(&format!(
            "Found {} group(s) of duplicate contacts.\n",
            groups.len()
        ));

        let mut outcome = MergeOutcome {
            groups_found: groups.len(),
            ..MergeOutcome::default()
        };

        for (number, group) in groups.iter().enumerate() {
            self.resolve_group(store, number + 1, group, &mut outcome)?;
        }

        self.port.show(if outcome.changed() {
            "Changes were made to the contact list."
        } else {
            "No changes were made to the contact list."
        });

        tracing::info!(
            "Merge session finished: {} added, {} removed",
            outcome.merged_added,
            outcome.originals_removed
        );
        Ok(outcome)
    }

    fn resolve_group(
        &mut self,
        store: &mut ContactStore,
        number: usize,
        group: &[StoredContact],
        outcome: &mut MergeOutcome,
    ) -> Result<()> {
        let mut listing = format!("--- Duplicate Group #{} ---", number);
        for (i, member) in group.iter().enumerate() {
            listing.push_str(&format!("\n[{}] {}", i, member.contact));
        }
        self.port.show(&listing);

        let merged = self.build_candidate(group)?;

        self.port.show("\nNew merged contact preview:");
        self.port.show(&merged.to_string());

        if self.port.ask_yes_no("Add this merged contact? [y/n]: ")? {
            let id = store.add(merged);
            outcome.merged_added += 1;
            tracing::debug!("Merged contact added as #{}", id);
            self.port.show("Merged contact added.");
        } else {
            self.port.show("Merge canceled.");
        }

        self.port
            .show("\nSelect contacts to delete from the original duplicates:");
        let mut to_delete = Vec::new();
        for (i, member) in group.iter().enumerate() {
            let prompt = format!(
                "Delete contact [{}] {}? [y/n]: ",
                i,
                member.contact.display_name()
            );
            if self.port.ask_yes_no(&prompt)? {
                to_delete.push(member);
            }
        }

        // 群組互不重疊，依識別碼刪除不受先前群組的修改影響
        for member in to_delete {
            match store.remove(member.id) {
                Some(removed) => {
                    outcome.originals_removed += 1;
                    self.port
                        .show(&format!("Deleted: {}", removed.display_name()));
                }
                None => tracing::warn!("Contact #{} was already gone", member.id),
            }
        }

        self.port.show("");
        Ok(())
    }

    fn build_candidate(&mut self, group: &[StoredContact]) -> Result<Contact> {
        let mut merged = Contact::default();
        for field in ContactField::ALL {
            let values: Vec<&str> = group.iter().map(|m| m.contact.field(field)).collect();
            let value = pick_field_value(&mut self.port, field, &values)?;
            merged.set_field(field, value);
        }
        Ok(merged)
    }
}
