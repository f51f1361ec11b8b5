pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::RosterConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::core::csv_codec::{parse_csv, serialize_csv};
pub use crate::core::json_codec::{deserialize_json, serialize_json};
pub use crate::core::session::RosterSession;
pub use crate::core::stats::{count_by_course, count_by_group, sorted_view, SortKey, Statistics};
pub use crate::core::store::RecordStore;
pub use crate::domain::model::{StudentDraft, StudentRecord};
pub use crate::domain::ports::{StoreEvent, Storage, SubscriptionId};
pub use crate::utils::error::{DataFormat, Field, Result, RosterError};
pub use crate::utils::validation::{validate_draft, Validate, ValidationPolicy};
