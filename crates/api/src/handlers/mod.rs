pub mod catalog;
pub mod records;
pub mod settings;
pub mod source;
