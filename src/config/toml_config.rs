use crate::utils::error::{ContactBookError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub display: Option<DisplayConfig>,
    pub storage: Option<StorageConfig>,
    pub contacts: Option<ContactRulesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub items_per_page: Option<usize>,
    pub clear_screen: Option<bool>,
    pub show_welcome: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub default_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRulesConfig {
    pub max_phone_length: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContactBookError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CONTACTS_DIR})；未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContactBookError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn items_per_page(&self) -> Option<usize> {
        self.display.as_ref().and_then(|d| d.items_per_page)
    }

    pub fn clear_screen(&self) -> Option<bool> {
        self.display.as_ref().and_then(|d| d.clear_screen)
    }

    pub fn show_welcome(&self) -> Option<bool> {
        self.display.as_ref().and_then(|d| d.show_welcome)
    }

    pub fn data_dir(&self) -> Option<&str> {
        self.storage.as_ref().and_then(|s| s.data_dir.as_deref())
    }

    pub fn default_file(&self) -> Option<&str> {
        self.storage.as_ref().and_then(|s| s.default_file.as_deref())
    }

    pub fn max_phone_length(&self) -> Option<usize> {
        self.contacts.as_ref().and_then(|c| c.max_phone_length)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(per_page) = self.items_per_page() {
            validation::validate_range("display.items_per_page", per_page, 1, 100)?;
        }
        if let Some(dir) = self.data_dir() {
            validation::validate_path("storage.data_dir", dir)?;
        }
        validation::validate_optional_file_name("storage.default_file", self.default_file())?;
        if let Some(max) = self.max_phone_length() {
            validation::validate_range("contacts.max_phone_length", max, 1, 64)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[display]
items_per_page = 5
clear_screen = false

[storage]
data_dir = "./data"
default_file = "contacts.txt"

[contacts]
max_phone_length = 12
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.items_per_page(), Some(5));
        assert_eq!(config.clear_screen(), Some(false));
        assert_eq!(config.data_dir(), Some("./data"));
        assert_eq!(config.default_file(), Some("contacts.txt"));
        assert_eq!(config.max_phone_length(), Some(12));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.items_per_page(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CONTACT_BOOK_TEST_DIR", "/tmp/contact-book");

        let toml_content = r#"
[storage]
data_dir = "${CONTACT_BOOK_TEST_DIR}"
default_file = "${CONTACT_BOOK_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), Some("/tmp/contact-book"));
        assert_eq!(config.default_file(), Some("${CONTACT_BOOK_UNSET_VAR}"));

        std::env::remove_var("CONTACT_BOOK_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[display]\nitems_per_page = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[display\n").unwrap_err();
        assert!(matches!(err, ContactBookError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\nitems_per_page = 20\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.items_per_page(), Some(20));
    }
}
