pub mod entry;
pub mod group;
pub mod status;
pub mod student;
