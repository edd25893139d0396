pub mod storage;

pub use storage::SQLiteStorage;
