pub mod calendar;
pub mod entry;
pub mod health;
pub mod lead;
pub mod roster;
