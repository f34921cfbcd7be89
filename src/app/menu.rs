use crate::app::display::{format_detail, format_plain_row, Paginator};
use crate::core::contact_file::ContactFile;
use crate::core::merge::MergeEngine;
use crate::core::store::ContactStore;
use crate::core::{
    ConfigProvider, Contact, ContactField, ContactId, InteractionPort, MergeOutcome, Result,
    Storage,
};
use crate::utils::error::ContactBookError;

const WELCOME: &str = r"
     Welcome to Contact Book!

     Description:
     This program allows you to keep records of your contacts.
";

const MAIN_MENU: &str = r"
[1] Load contacts from a file.
[2] Show all contacts.
[3] Add contact.
[4] Edit contact.
[5] Delete contact.
[6] Merge duplicated contacts.
[7] Store contacts to a file.
[8] Exit the application.
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Load,
    ShowAll,
    Add,
    Edit,
    Delete,
    Merge,
    Save,
    Exit,
}

impl MenuAction {
    pub fn from_option(option: i64) -> Option<Self> {
        match option {
            1 => Some(Self::Load),
            2 => Some(Self::ShowAll),
            3 => Some(Self::Add),
            4 => Some(Self::Edit),
            5 => Some(Self::Delete),
            6 => Some(Self::Merge),
            7 => Some(Self::Save),
            8 => Some(Self::Exit),
            _ => None,
        }
    }
}

fn name_is_missing(first_name: &str, last_name: &str) -> bool {
    first_name.is_empty() && last_name.is_empty()
}

fn reach_is_invalid(phone: &str, email: &str, max_phone_length: usize) -> bool {
    (phone.is_empty() && email.is_empty()) || phone.chars().count() > max_phone_length
}

/// 選單驅動的聯絡簿；store 只由這個流程修改
pub struct ContactBookApp<S: Storage, C: ConfigProvider, P: InteractionPort> {
    store: ContactStore,
    file: ContactFile<S>,
    config: C,
    port: P,
}

impl<S: Storage, C: ConfigProvider, P: InteractionPort> ContactBookApp<S, C, P> {
    pub fn new(storage: S, config: C, port: P) -> Self {
        Self {
            store: ContactStore::new(),
            file: ContactFile::new(storage),
            config,
            port,
        }
    }

    pub fn with_store(mut self, store: ContactStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_parts(self) -> (ContactStore, P) {
        (self.store, self.port)
    }

    pub fn welcome(&mut self) -> Result<()> {
        self.port.show(WELCOME);
        self.port.pause()?;
        self.port.clear();
        Ok(())
    }

    /// 主選單迴圈，直到操作者確認離開
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.port.clear();
            self.port.show(MAIN_MENU);
            let option = self.port.ask_choice("Select an option: ", 1..=8)?;
            let Some(action) = MenuAction::from_option(option) else {
                continue;
            };
            tracing::debug!("Menu action: {:?}", action);

            match action {
                MenuAction::Load => self.load_contacts().await?,
                MenuAction::ShowAll => self.show_all_contacts()?,
                MenuAction::Add => {
                    self.add_contact()?;
                    self.show_all_contacts()?;
                }
                MenuAction::Edit => self.edit_contact()?,
                MenuAction::Delete => self.delete_contact()?,
                MenuAction::Merge => {
                    self.merge_duplicates()?;
                }
                MenuAction::Save => self.save_contacts().await?,
                MenuAction::Exit => {
                    if self.confirm_exit()? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// 讀取檔案並附加到 store，回傳新增筆數
    pub async fn load_file(&mut self, name: &str) -> Result<usize> {
        let parsed = self.file.load(name).await?;
        Ok(self.store.extend(parsed.contacts))
    }

    pub async fn save_file(&self, name: &str) -> Result<()> {
        self.file.save(name, self.store.iter()).await
    }

    pub async fn load_contacts(&mut self) -> Result<()> {
        self.port.clear();
        self.port
            .show("Loading From: \nWrite the file name or nothing to cancel.");
        let name = self.port.ask_text("File name: ")?;

        if name.is_empty() {
            self.port.show("The operation was canceled.");
        } else {
            match self.load_file(&name).await {
                Ok(_) => self.port.show("Contact book loaded successfully!"),
                Err(ContactBookError::FileNotFound { path }) => self
                    .port
                    .show(&format!("ERROR: File \"{}\" was not found!", path)),
                Err(e) => {
                    tracing::error!("❌ Failed to load {}: {}", name, e);
                    self.port.show(&format!(
                        "ERROR: An error occurred while reading the file! {}",
                        e
                    ));
                }
            }
        }

        self.port.pause()
    }

    pub async fn save_contacts(&mut self) -> Result<()> {
        self.port.clear();
        let name = self
            .port
            .ask_text("Enter the file name to save entries (or press Enter to cancel): ")?;

        if name.trim().is_empty() {
            self.port.show("Operation canceled.");
            return Ok(());
        }

        match self.save_file(&name).await {
            Ok(()) => self
                .port
                .show(&format!("Entries successfully saved to \"{}\".", name)),
            Err(e) => {
                tracing::error!("❌ Failed to save {}: {}", name, e);
                self.port
                    .show(&format!("ERROR: Failed to save the file. {}", e));
            }
        }
        Ok(())
    }

    pub fn show_all_contacts(&mut self) -> Result<()> {
        self.port.clear();
        self.port
            .show("Sort by [1] Name [2] Last Name [3] Phone Number [4] E-mail:");
        let sort_option = self.port.ask_choice("Choose sort option: ", 1..=4)?;
        let field = ContactField::from_index((sort_option - 1) as usize)
            .unwrap_or(ContactField::FirstName);

        let view = self.store.sorted_by(field);
        let pages = Paginator::new(view.len(), self.config.items_per_page());
        let mut page = 1;

        loop {
            self.port.clear();
            self.port.show(&pages.render_page(page, &view));
            let nav = self.port.ask_text(
                "Go to [0] Main Menu [-] Previous Page [+] Next Page or Page Number: ",
            )?;
            match pages.navigate(page, &nav) {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }
    }

    pub fn add_contact(&mut self) -> Result<()> {
        self.port.clear();
        self.port.show("### Add New Contact ###\n");

        let (first_name, last_name) = loop {
            let first = self.port.ask_text("Enter First Name: ")?;
            let last = self.port.ask_text("Enter Last Name: ")?;
            if !name_is_missing(&first, &last) {
                break (first, last);
            }
            self.port.show(
                "You can't have both name and last name in blank. Please try again. :)",
            );
        };

        let max_phone = self.config.max_phone_length();
        let (phone_number, email) = loop {
            let phone = self
                .port
                .ask_text(&format!("Enter Phone Number (max {} digits): ", max_phone))?;
            let email = self
                .port
                .ask_text("Write an email or nothing if you prefer to leave it blank: ")?;
            if !reach_is_invalid(&phone, &email, max_phone) {
                break (phone, email);
            }
            self.port.show(&format!(
                "You must provide a valid phone number (up to {} digits) or an email. Please try again. :)",
                max_phone
            ));
        };

        if self
            .port
            .ask_yes_no("Answer [Y] to apply changes or [N] to cancel: ")?
        {
            let id = self
                .store
                .add(Contact::new(first_name, last_name, phone_number, email));
            tracing::debug!("Contact #{} added", id);
            self.port.show("Operation was successful.");
        } else {
            self.port.show("Operation was canceled.");
        }
        Ok(())
    }

    pub fn edit_contact(&mut self) -> Result<()> {
        self.port.clear();
        if self.store.is_empty() {
            self.port.show("No contacts found.");
            return Ok(());
        }

        let option = self
            .port
            .ask_choice("Search by [1] Index or [2] Field or [0] Cancel: ", 0..=2)?;
        let selected = match option {
            1 => self.select_by_index()?,
            2 => self.select_by_name()?,
            _ => {
                self.port.show("Operation canceled.");
                None
            }
        };

        match selected {
            Some(id) => self.edit_fields(id),
            None => Ok(()),
        }
    }

    fn list_store(&mut self) {
        let listing: Vec<String> = self
            .store
            .iter()
            .enumerate()
            .map(|(i, contact)| format_plain_row(i, contact))
            .collect();
        self.port.show(&listing.join("\n"));
    }

    fn select_by_index(&mut self) -> Result<Option<ContactId>> {
        self.port.clear();
        self.port.show("### Edit Existing Contact ###");
        self.port
            .show(" #   Name       Last Name     Phone         E-mail");
        self.list_store();
        self.port.show("Page 1 of 1");

        let index = self.port.ask_index(
            "Select index of which contact to edit: ",
            self.store.len(),
        )?;
        Ok(self.store.at(index).map(|entry| entry.id))
    }

    fn select_by_name(&mut self) -> Result<Option<ContactId>> {
        let term = self.port.ask_text(
            "Enter the first name or last name of the contact to search for: ",
        )?;
        let found: Vec<(ContactId, String)> = self
            .store
            .search_by_name(&term)
            .into_iter()
            .map(|entry| (entry.id, entry.contact.display_name()))
            .collect();

        if found.is_empty() {
            self.port.show("No contacts found matching that name.");
            return Ok(None);
        }

        let mut listing = String::from("Found the following contacts:");
        for (i, (_, name)) in found.iter().enumerate() {
            listing.push_str(&format!("\n[{}] {}", i, name));
        }
        self.port.show(&listing);

        let choice = self
            .port
            .ask_index("Select contact by [0, 1, ...]: ", found.len())?;
        Ok(Some(found[choice].0))
    }

    fn edit_fields(&mut self, id: ContactId) -> Result<()> {
        let position = self
            .store
            .position_of(id)
            .ok_or(ContactBookError::ContactNotFound { id: id.0 })?;
        let detail = match self.store.get(id) {
            Some(contact) => format_detail(position, contact),
            None => return Err(ContactBookError::ContactNotFound { id: id.0 }),
        };
        self.port.show(&detail);

        self.port
            .show("[0] First Name [1] Last Name [2] Phone Number [3] Email [4] Cancel");
        let option = self
            .port
            .ask_choice("Which property do you wish to edit? ", 0..=4)?;

        let Some(field) = ContactField::from_index(option as usize) else {
            self.port.show("Edit was canceled");
            return Ok(());
        };

        let value = self.port.ask_text(&format!(
            "Enter new {} or nothing to cancel: ",
            field.label().to_lowercase()
        ))?;
        if value.is_empty() {
            self.port.show("Edit was canceled");
            return Ok(());
        }

        let contact = self
            .store
            .get_mut(id)
            .ok_or(ContactBookError::ContactNotFound { id: id.0 })?;
        contact.set_field(field, value);
        tracing::debug!("Contact #{} {} updated", id, field);
        self.port.show("Edit was successful");
        Ok(())
    }

    pub fn delete_contact(&mut self) -> Result<()> {
        self.port.clear();

        if self.store.is_empty() {
            self.port.show("No contacts found.");
            return self.port.pause();
        }

        self.port.show("### Delete Existing Contact ###\n");
        self.list_store();

        let last = self.store.len() as i64 - 1;
        let index = self.port.ask_choice(
            &format!(
                "Choose index of contact to delete [0-{}] or [-1] to cancel: ",
                last
            ),
            -1..=last,
        )?;

        let target = usize::try_from(index)
            .ok()
            .and_then(|i| self.store.at(i))
            .map(|entry| entry.id);
        let Some(id) = target else {
            self.port.show("Operation cancelled. Returning to the menu...");
            return Ok(());
        };

        if self
            .port
            .ask_yes_no("Are you sure you want to remove this contact? [Y/N]: ")?
        {
            self.store.remove(id);
            tracing::debug!("Contact #{} removed", id);
            self.port.show("Contact was removed successfully.");
        } else {
            self.port.show("Operation was cancelled.");
        }
        self.port.pause()
    }

    pub fn merge_duplicates(&mut self) -> Result<MergeOutcome> {
        self.port.clear();
        let outcome = MergeEngine::new(&mut self.port).run(&mut self.store)?;
        self.port.pause()?;
        Ok(outcome)
    }

    fn confirm_exit(&mut self) -> Result<bool> {
        let leave = self
            .port
            .ask_yes_no("Are you sure that you want to exit from the program? [y/n] ")?;
        if leave {
            self.port
                .show("Thank you for using Contact Book, Until Next time :D");
        }
        Ok(leave)
    }
}
