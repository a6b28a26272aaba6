pub mod backup;
pub mod list;
pub mod log;
pub mod record;
pub mod roster;
pub mod sheet;
pub mod stats;
pub mod take;
