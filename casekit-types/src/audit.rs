//! Audit metadata attached to administrator-managed records.
//!
//! The values are populated by whoever persists the record. The schema and
//! entity engine carries them around but never interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created a record and who last updated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStamp {
    pub created_by: String,
    pub created_timestamp: DateTime<Utc>,
    pub last_updated_by: String,
    pub last_updated_timestamp: DateTime<Utc>,
}

impl AuditStamp {
    /// Creates a stamp for a record created right now by `user`.
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self::at(user, Utc::now())
    }

    /// Creates a stamp for a record created by `user` at `timestamp`.
    #[must_use]
    pub fn at(user: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let user = user.into();
        Self {
            created_by: user.clone(),
            created_timestamp: timestamp,
            last_updated_by: user,
            last_updated_timestamp: timestamp,
        }
    }
}
