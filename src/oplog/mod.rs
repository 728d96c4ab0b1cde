mod reader;
mod types;
mod writer;

pub use reader::read_log;
pub use types::{LogRecord, RollbackRecord};
pub use writer::{write_rename_log, write_rollback_log, OplogError};
