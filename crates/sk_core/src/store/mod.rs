// Persistence layer for the tournament core.
// MessagePack + LZ4 with versioning and integrity checks, one file per slot.

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::StoreError;
pub use format::{
    decompress_and_deserialize, serialize_and_compress, EvaluationFile, RosterFile, SessionFile,
};
pub use manager::StorageManager;
pub use migration::{migrate_evaluations, migrate_roster};

pub const STORE_VERSION: u32 = 1;
