use crate::core::{Contact, Result, Storage};

/// 解析結果；`skipped` 為欄位不完整而略過的筆數
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedContacts {
    pub contacts: Vec<Contact>,
    pub skipped: usize,
}

/// 每筆聯絡人四行：名、姓、電話、Email。任一行缺少或為空即略過該筆。
pub fn parse_contacts(text: &str) -> ParsedContacts {
    let mut parsed = ParsedContacts::default();
    let mut lines = text.lines();

    loop {
        let Some(first_name) = lines.next() else {
            break;
        };
        let record = [
            Some(first_name),
            lines.next(),
            lines.next(),
            lines.next(),
        ];

        match record {
            [Some(first), Some(last), Some(phone), Some(email)]
                if [first, last, phone, email].iter().all(|line| !line.is_empty()) =>
            {
                parsed.contacts.push(Contact::new(first, last, phone, email));
            }
            _ => {
                tracing::warn!("Skipping incomplete contact record starting with {:?}", first_name);
                parsed.skipped += 1;
            }
        }
    }

    parsed
}

pub fn serialize_contacts<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> String {
    let mut out = String::new();
    for contact in contacts {
        for line in [
            &contact.first_name,
            &contact.last_name,
            &contact.phone_number,
            &contact.email,
        ] {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// 透過 `Storage` 讀寫聯絡人檔案
pub struct ContactFile<S: Storage> {
    storage: S,
}

impl<S: Storage> ContactFile<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load(&self, path: &str) -> Result<ParsedContacts> {
        tracing::debug!("Reading contacts from: {}", path);
        let data = self.storage.read_file(path).await?;
        let text = String::from_utf8_lossy(&data);
        let parsed = parse_contacts(&text);
        tracing::info!(
            "📁 Loaded {} contacts from {} ({} skipped)",
            parsed.contacts.len(),
            path,
            parsed.skipped
        );
        Ok(parsed)
    }

    pub async fn save<'a>(
        &self,
        path: &str,
        contacts: impl IntoIterator<Item = &'a Contact>,
    ) -> Result<()> {
        let text = serialize_contacts(contacts);
        tracing::debug!("Writing {} bytes of contacts to: {}", text.len(), path);
        self.storage.write_file(path, text.as_bytes()).await?;
        tracing::info!("💾 Contacts saved to {}", path);
        Ok(())
    }
}
