pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "contact-book")]
#[command(about = "Keep, browse, and deduplicate your contacts from the terminal")]
pub struct CliConfig {
    /// Contact file loaded at startup (relative to the data directory)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory used for loading and saving contact files
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Contacts shown per page when listing
    #[arg(long)]
    pub items_per_page: Option<usize>,

    #[arg(long, help = "Skip the welcome screen")]
    pub no_welcome: bool,

    #[arg(long, help = "Do not clear the terminal between screens")]
    pub no_clear: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 合併 TOML 與命令列後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub items_per_page: usize,
    pub data_dir: String,
    pub default_file: Option<String>,
    pub max_phone_length: usize,
    pub clear_screen: bool,
    pub show_welcome: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            data_dir: ".".to_string(),
            default_file: None,
            max_phone_length: 10,
            clear_screen: true,
            show_welcome: true,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            items_per_page: config.items_per_page().unwrap_or(defaults.items_per_page),
            data_dir: config
                .data_dir()
                .map(str::to_string)
                .unwrap_or(defaults.data_dir),
            default_file: config.default_file().map(str::to_string),
            max_phone_length: config
                .max_phone_length()
                .unwrap_or(defaults.max_phone_length),
            clear_screen: config.clear_screen().unwrap_or(defaults.clear_screen),
            show_welcome: config.show_welcome().unwrap_or(defaults.show_welcome),
        }
    }

    /// 命令列參數覆蓋 TOML 設定
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        file_config.validate()?;

        let mut settings = Self::from_toml(&file_config);
        if let Some(per_page) = cli.items_per_page {
            settings.items_per_page = per_page;
        }
        if let Some(dir) = &cli.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(file) = &cli.file {
            settings.default_file = Some(file.clone());
        }
        if cli.no_welcome {
            settings.show_welcome = false;
        }
        if cli.no_clear {
            settings.clear_screen = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn default_file(&self) -> Option<&str> {
        self.default_file.as_deref()
    }

    fn max_phone_length(&self) -> usize {
        self.max_phone_length
    }

    fn clear_screen(&self) -> bool {
        self.clear_screen
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_range("items_per_page", self.items_per_page, 1, 100)?;
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_optional_file_name("file", self.default_file.as_deref())?;
        validation::validate_range("max_phone_length", self.max_phone_length, 1, 64)?;
        Ok(())
    }
}
