use crate::core::{ContactField, InteractionPort, Result};
use std::collections::HashSet;

/// 去除空白值並保留首次出現順序的去重結果（區分大小寫）
pub fn distinct_candidates<'v>(values: &[&'v str]) -> Vec<&'v str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .copied()
        .filter(|value| !value.trim().is_empty())
        .filter(|value| seen.insert(*value))
        .collect()
}

/// 為合併結果挑選單一欄位值。
///
/// 沒有候選值時回傳空字串，只有一個時直接採用；兩個以上才詢問操作者。
pub fn pick_field_value<P: InteractionPort>(
    port: &mut P,
    field: ContactField,
    values: &[&str],
) -> Result<String> {
    let options = distinct_candidates(values);

    match options.as_slice() {
        [] => Ok(String::new()),
        [only] => Ok((*only).to_string()),
        _ => {
            let mut listing = format!("\nChoose {}:", field.label());
            for (i, option) in options.iter().enumerate() {
                listing.push_str(&format!("\n[{}] {}", i, option));
            }
            port.show(&listing);

            let prompt = format!("Select the preferred {}: ", field.label());
            let choice = port.ask_index(&prompt, options.len())?;
            tracing::debug!("{} resolved to option {}", field.label(), choice);
            Ok(options[choice].to_string())
        }
    }
}
