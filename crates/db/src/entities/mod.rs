//! Persisted record types.

pub mod poll;
pub mod response;
pub mod user;

pub use poll::Poll;
pub use response::Response;
pub use user::User;
