use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Minimal view of a customer record owned by the leads subsystem.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct LeadSummary {
    pub id: String,
    pub display_name: String,
}
