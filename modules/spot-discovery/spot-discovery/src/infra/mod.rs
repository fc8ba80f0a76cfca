pub mod catalog;
pub mod kv;
pub mod storage;
