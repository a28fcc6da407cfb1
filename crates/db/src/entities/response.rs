//! Response entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One student's answer to one poll.
///
/// Nothing at this layer prevents a second record for the same
/// (`poll_id`, `roll_number`) pair; callers wanting at-most-once
/// semantics check before submitting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub poll_id: String,

    pub roll_number: String,

    /// The chosen option text; expected to be a member of the
    /// referenced poll's options.
    pub option: String,

    pub submitted_at: DateTime<Utc>,
}
