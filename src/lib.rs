pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::console::ConsolePort;
pub use app::menu::ContactBookApp;
pub use app::scripted::ScriptedPort;
pub use config::{cli::LocalStorage, Settings};
pub use crate::core::merge::MergeEngine;
pub use crate::core::store::ContactStore;
pub use domain::model::{Contact, ContactField, ContactId, MergeOutcome};
pub use utils::error::{ContactBookError, Result};
