pub mod contact_file;
pub mod grouper;
pub mod merge;
pub mod reconciler;
pub mod store;

pub use crate::domain::model::{Contact, ContactField, ContactId, MergeOutcome, StoredContact};
pub use crate::domain::ports::{ConfigProvider, InteractionPort, Storage};
pub use crate::utils::error::Result;
