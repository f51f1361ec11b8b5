pub mod csv_codec;
pub mod json_codec;
pub mod session;
pub mod stats;
pub mod store;

pub use crate::domain::model::{StudentDraft, StudentRecord};
pub use crate::domain::ports::{StoreEvent, Storage, SubscriptionId};
pub use crate::utils::error::Result;
