pub mod memory;
pub mod sqlite;
pub mod storage;
pub mod trip_store;
