//! Business logic services.

pub mod account;
pub mod poll;
pub mod response;
pub mod seed;
pub mod session;

pub use account::{AccountService, ChangePasswordInput, CompleteSetupInput};
pub use poll::{
    CreatePollInput, MAX_OPTIONS, MIN_OPTIONS, OptionTally, PollService, PollStats,
    ResponderStatus,
};
pub use response::{ResponseService, SubmitResponseInput};
pub use seed::SeedService;
pub use session::SessionService;
