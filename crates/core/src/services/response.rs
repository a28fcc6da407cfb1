//! Response service.

use chrono::Utc;
use pollbox_common::AppResult;
use pollbox_db::entities::Response;
use pollbox_db::repositories::ResponseRepository;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Input for submitting a response.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitResponseInput {
    pub poll_id: String,

    pub roll_number: String,

    /// The chosen option text. Membership in the poll's options is a
    /// presentation-layer check.
    #[validate(length(min = 1))]
    pub option: String,
}

/// Response service for business logic.
#[derive(Clone)]
pub struct ResponseService {
    responses: ResponseRepository,
}

impl ResponseService {
    /// Create a new response service.
    #[must_use]
    pub const fn new(responses: ResponseRepository) -> Self {
        Self { responses }
    }

    /// Record a response, stamping the submission time.
    ///
    /// Appends unconditionally: a second submission for the same
    /// (poll, roll number) pair stores a second record. Callers wanting
    /// at-most-once semantics check [`Self::has_responded`] first.
    pub fn submit(&self, input: SubmitResponseInput) -> AppResult<Response> {
        let response = Response {
            poll_id: input.poll_id,
            roll_number: input.roll_number,
            option: input.option,
            submitted_at: Utc::now(),
        };
        let response = self.responses.append(response)?;
        info!(poll_id = %response.poll_id, roll_number = %response.roll_number, "recorded response");
        Ok(response)
    }

    /// Whether a response from `roll_number` for `poll_id` is stored.
    pub fn has_responded(&self, poll_id: &str, roll_number: &str) -> AppResult<bool> {
        self.responses.has_responded(poll_id, roll_number)
    }

    /// All responses for a poll, in storage order.
    pub fn for_poll(&self, poll_id: &str) -> AppResult<Vec<Response>> {
        self.responses.find_by_poll(poll_id)
    }
}
