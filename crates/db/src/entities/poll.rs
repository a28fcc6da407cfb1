//! Poll entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single-question multiple-choice poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    /// Unique identifier, assigned at creation.
    pub id: String,

    pub question: String,

    /// Answer options, in presentation order.
    pub options: Vec<String>,

    /// Set at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
}
