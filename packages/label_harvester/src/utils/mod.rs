pub mod file;
pub mod filename;
