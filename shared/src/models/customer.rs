//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer reference attached to a transaction
///
/// Bookkeeping only; has no effect on cart totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerSummary {
    pub id: i64,
    pub display_name: String,
}
