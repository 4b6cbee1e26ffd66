pub mod entry;
pub mod lead;
pub mod person;
