pub mod format;
pub mod keyvalue;
