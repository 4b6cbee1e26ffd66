pub mod sqlite_entry_repo;
pub mod sqlite_lead_repo;

pub mod postgres_entry_repo;
pub mod postgres_lead_repo;
