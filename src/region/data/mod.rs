pub mod datetime;
pub mod entry;
pub mod name;
