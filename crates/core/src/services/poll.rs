//! Poll service.

use chrono::{DateTime, Utc};
use pollbox_common::{AppResult, IdGenerator};
use pollbox_db::entities::{Poll, Response, User};
use pollbox_db::repositories::{PollRepository, ResponseRepository, UserRepository};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Fewest options a poll may offer.
pub const MIN_OPTIONS: usize = 2;
/// Most options a poll may offer.
pub const MAX_OPTIONS: usize = 5;

/// Input for creating a poll.
///
/// Validation belongs to the presentation layer; the data layer stores
/// whatever it is given.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePollInput {
    #[validate(length(min = 1))]
    pub question: String,

    #[validate(length(min = 2, max = 5))]
    pub options: Vec<String>,

    pub created_at: DateTime<Utc>,
}

/// Tally for one option of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTally {
    pub option: String,
    pub votes: usize,
    /// Share of responses received, in whole percent.
    pub percentage: u32,
}

/// One stored response joined with its roster record.
#[derive(Debug, Clone)]
pub struct ResponderStatus {
    /// The roster record, when the roll number is still known.
    pub user: Option<User>,
    pub response: Response,
}

/// Aggregated dashboard statistics for one poll.
#[derive(Debug, Clone)]
pub struct PollStats {
    /// Number of responses received.
    pub responded: usize,
    /// Size of the student roster.
    pub total_students: usize,
    /// `responded` over `total_students`, in whole percent.
    pub percentage: u32,
    /// Per-option vote counts, in option order.
    pub tallies: Vec<OptionTally>,
    /// Stored responses with their roster records, in storage order.
    pub responders: Vec<ResponderStatus>,
    /// Students who have not responded yet.
    pub pending: Vec<User>,
}

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    polls: PollRepository,
    responses: ResponseRepository,
    users: UserRepository,
    id_gen: IdGenerator,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(
        polls: PollRepository,
        responses: ResponseRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            polls,
            responses,
            users,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a poll with a fresh identifier and return the stored record.
    pub fn create(&self, input: CreatePollInput) -> AppResult<Poll> {
        let poll = Poll {
            id: self.id_gen.generate(),
            question: input.question,
            options: input.options,
            created_at: input.created_at,
        };
        let poll = self.polls.append(poll)?;
        info!(poll_id = %poll.id, "created poll");
        Ok(poll)
    }

    /// All polls, in insertion order.
    pub fn list(&self) -> AppResult<Vec<Poll>> {
        self.polls.all()
    }

    /// Find a poll by ID.
    pub fn get(&self, poll_id: &str) -> AppResult<Option<Poll>> {
        self.polls.find_by_id(poll_id)
    }

    /// Delete a poll and every response referencing it.
    ///
    /// The poll and response collections are rewritten separately; there
    /// is no transaction spanning the two.
    pub fn delete(&self, poll_id: &str) -> AppResult<()> {
        self.polls.delete(poll_id)?;
        self.responses.delete_by_poll(poll_id)?;
        info!(poll_id, "deleted poll and cascaded responses");
        Ok(())
    }

    /// Dashboard statistics for one poll: per-option tallies and
    /// per-student response status.
    pub fn stats(&self, poll: &Poll) -> AppResult<PollStats> {
        let responses = self.responses.find_by_poll(&poll.id)?;
        let students: Vec<User> = self
            .users
            .all()?
            .into_iter()
            .filter(|u| !u.is_admin)
            .collect();

        let responded = responses.len();
        let total_students = students.len();

        let tallies = poll
            .options
            .iter()
            .map(|option| {
                let votes = responses.iter().filter(|r| &r.option == option).count();
                OptionTally {
                    option: option.clone(),
                    votes,
                    percentage: share(votes, responded),
                }
            })
            .collect();

        let responders = responses
            .into_iter()
            .map(|response| ResponderStatus {
                user: students
                    .iter()
                    .find(|s| s.roll_number == response.roll_number)
                    .cloned(),
                response,
            })
            .collect::<Vec<_>>();

        let pending = students
            .into_iter()
            .filter(|s| {
                !responders
                    .iter()
                    .any(|r| r.response.roll_number == s.roll_number)
            })
            .collect();

        Ok(PollStats {
            responded,
            total_students,
            percentage: share(responded, total_students),
            tallies,
            responders,
            pending,
        })
    }
}

/// `part` over `whole` in whole percent, rounded half-up; zero when the
/// whole is zero.
fn share(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
