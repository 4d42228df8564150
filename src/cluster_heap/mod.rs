pub(crate) mod context;
pub mod directory;
pub mod file;
pub mod info;
pub(crate) mod merge;
