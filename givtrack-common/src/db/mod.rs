//! SQLite persistence layer
//!
//! One key-value `storage` table holds the durable seen-set; nothing else is
//! persisted client-side.

mod init;
mod seen;

pub use init::init_database;
pub use seen::{SeenSetStore, OPENED_IDS_KEY};
