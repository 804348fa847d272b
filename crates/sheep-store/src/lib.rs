pub mod config;
pub mod filter;
pub mod model;
pub mod rawsql;
pub mod storage;
