pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod code;
pub mod codes_file;
pub mod error;
pub mod fetcher;
pub mod request;
pub mod retry;
pub mod storage;
pub mod transport;
