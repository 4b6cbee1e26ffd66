pub mod conflicts;
pub mod schedule;
pub mod scheduling;
pub mod week;
