//! In-memory record instances.

pub mod record;
pub mod value;

pub use chrono::{DateTime, Utc};
pub use record::Record;
pub use uuid::Uuid;
pub use value::Value;
