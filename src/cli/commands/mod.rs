pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod group;
pub mod init;
pub mod list;
pub mod log;
pub mod stats;
pub mod status;
pub mod student;
pub mod take;
