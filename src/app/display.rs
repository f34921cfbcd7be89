use crate::core::{Contact, StoredContact};

pub const TABLE_HEADER: &str =
    " #   First Name        Last Name             Phone         Email";
pub const TABLE_RULE: &str =
    "--------------------------------------------------------------------------";

/// 超過 `max` 個字元時保留前 `keep` 個字元並加上 `...`
fn truncate(value: &str, max: usize, keep: usize) -> String {
    if value.chars().count() > max {
        let mut short: String = value.chars().take(keep).collect();
        short.push_str("...");
        short
    } else {
        value.to_string()
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(placeholder.to_string())
    } else {
        None
    }
}

/// 十碼電話顯示為 `xxx-xxx-xxxx`，其他長度原樣輸出
pub fn format_phone(phone: &str) -> String {
    if let Some(placeholder) = or_placeholder(phone, "(no phone)") {
        return placeholder;
    }
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() == 10 {
        let part = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();
        format!("{}-{}-{}", part(0..3), part(3..6), part(6..10))
    } else {
        phone.to_string()
    }
}

pub fn format_row(index: usize, contact: &Contact) -> String {
    let first = or_placeholder(&contact.first_name, "(no name)")
        .unwrap_or_else(|| truncate(&contact.first_name, 18, 15));
    let last = or_placeholder(&contact.last_name, "(no last)")
        .unwrap_or_else(|| truncate(&contact.last_name, 18, 15));
    let email = or_placeholder(&contact.email, "(no email)")
        .unwrap_or_else(|| truncate(&contact.email, 22, 19));

    format!(
        "{:03}  {:<18} {:<18} {:<13} {}",
        index,
        first,
        last,
        format_phone(&contact.phone_number),
        email
    )
}

/// 編輯與刪除畫面使用的簡易清單
pub fn format_plain_row(index: usize, contact: &Contact) -> String {
    format!(
        "{:03} {:<10} {:<12} {:<13} {}",
        index, contact.first_name, contact.last_name, contact.phone_number, contact.email
    )
}

pub fn format_detail(index: usize, contact: &Contact) -> String {
    format!(
        "[{:03}]\nFirst Name: {}\nLast Name: {}\nPhone Number: {}\nEmail: {}",
        index, contact.first_name, contact.last_name, contact.phone_number, contact.email
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total: usize,
    per_page: usize,
}

impl Paginator {
    pub fn new(total: usize, per_page: usize) -> Self {
        Self {
            total,
            per_page: per_page.max(1),
        }
    }

    /// 至少一頁，空清單也顯示第 1 頁
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// 第 `page` 頁（從 1 起算）的索引範圍
    pub fn bounds(&self, page: usize) -> std::ops::Range<usize> {
        let offset = page.saturating_sub(1) * self.per_page;
        let start = offset.min(self.total);
        let end = (offset + self.per_page).min(self.total);
        start..end
    }

    /// `+` 下一頁、`-` 上一頁、數字跳頁；回傳 `None` 代表離開（輸入 0 或無法辨識）
    pub fn navigate(&self, current: usize, input: &str) -> Option<usize> {
        let page_count = self.page_count();
        match input.trim() {
            "+" => Some((current + 1).min(page_count)),
            "-" => Some(current.saturating_sub(1).max(1)),
            other => match other.parse::<usize>() {
                Ok(page) if page >= 1 && page <= page_count => Some(page),
                _ => None,
            },
        }
    }

    pub fn render_page(&self, page: usize, view: &[&StoredContact]) -> String {
        let bounds = self.bounds(page);
        let shown = bounds.len();

        let mut lines = vec![
            "### Show All Contacts ###".to_string(),
            TABLE_HEADER.to_string(),
            TABLE_RULE.to_string(),
        ];
        for i in bounds {
            lines.push(format_row(i, &view[i].contact));
        }
        // 最後一頁不足時補空行，讓頁尾位置固定
        lines.extend(std::iter::repeat(String::new()).take(self.per_page - shown));
        lines.push(format!("\nPage {} of {}", page, self.page_count()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::ContactStore;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("5551234567"), "555-123-4567");
        assert_eq!(format_phone("12345"), "12345");
        assert_eq!(format_phone("  "), "(no phone)");
    }

    #[test]
    fn test_format_row_truncates_and_fills_placeholders() {
        let contact = Contact::new(
            "Bartholomew-Maximilian",
            "",
            "",
            "a.very.long.address@example.com",
        );
        let row = format_row(7, &contact);

        assert!(row.starts_with("007  Bartholomew-Max... "));
        assert!(row.contains("(no last)"));
        assert!(row.contains("(no phone)"));
        assert!(row.ends_with("a.very.long.address..."));
    }

    #[test]
    fn test_page_count_and_bounds() {
        let pages = Paginator::new(23, 10);
        assert_eq!(pages.page_count(), 3);
        assert_eq!(pages.bounds(3), 20..23);
        assert_eq!(Paginator::new(0, 10).page_count(), 1);
        assert!(Paginator::new(0, 10).bounds(1).is_empty());
    }

    #[test]
    fn test_navigation() {
        let pages = Paginator::new(23, 10);
        assert_eq!(pages.navigate(1, "+"), Some(2));
        assert_eq!(pages.navigate(3, "+"), Some(3));
        assert_eq!(pages.navigate(1, "-"), Some(1));
        assert_eq!(pages.navigate(2, " 3 "), Some(3));
        assert_eq!(pages.navigate(2, "0"), None);
        assert_eq!(pages.navigate(2, "4"), None);
        assert_eq!(pages.navigate(2, "q"), None);
    }

    #[test]
    fn test_render_page_pads_short_page() {
        let store = ContactStore::from_contacts(vec![
            Contact::new("Ana", "Lopez", "5551234567", "ana@x.com"),
            Contact::new("Carl", "Jones", "", "c@z.com"),
        ]);
        let view: Vec<&StoredContact> = store.entries().iter().collect();
        let page = Paginator::new(view.len(), 5).render_page(1, &view);

        assert!(page.contains("000  Ana"));
        assert!(page.contains("555-123-4567"));
        assert!(page.ends_with("\n\n\n\n\nPage 1 of 1"));
    }
}
