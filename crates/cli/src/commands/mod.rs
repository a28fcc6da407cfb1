//! Command implementations.

pub mod auth;
pub mod polls;

use std::sync::Arc;

use anyhow::{Result, bail};
use pollbox_common::Config;
use pollbox_core::{AccountService, PollService, ResponseService, SeedService, SessionService};
use pollbox_db::entities::User;
use pollbox_db::repositories::{
    PollRepository, ResponseRepository, SessionRepository, UserRepository,
};
use pollbox_db::storage::StorageBackend;
use tracing::debug;

/// Shared handle to the store and the services built over it.
///
/// The store is opened once per invocation; seeding runs on every
/// startup and no-ops after the first.
pub struct App {
    store: Arc<dyn StorageBackend>,
    pub sessions: SessionService,
    pub accounts: AccountService,
    pub polls: PollService,
    pub responses: ResponseService,
}

impl App {
    /// Open the store, seed on first run and wire up the services.
    pub fn open(config: &Config) -> Result<Self> {
        let store = pollbox_db::open(config)?;
        debug!(data_dir = %config.storage.data_dir.display(), "opened store");
        let namespace = &config.storage.namespace;

        let users = UserRepository::new(Arc::clone(&store), namespace);
        let polls = PollRepository::new(Arc::clone(&store), namespace);
        let responses = ResponseRepository::new(Arc::clone(&store), namespace);
        let session_records = SessionRepository::new(Arc::clone(&store), namespace);

        SeedService::new(users.clone(), polls.clone(), responses.clone()).seed()?;

        Ok(Self {
            sessions: SessionService::new(users.clone(), session_records.clone()),
            accounts: AccountService::new(users.clone(), session_records),
            polls: PollService::new(polls, responses.clone(), users),
            responses: ResponseService::new(responses),
            store,
        })
    }

    /// Flush the store before exit.
    pub fn flush(&self) -> Result<()> {
        self.store.flush()?;
        Ok(())
    }

    /// The signed-in user, or an error telling the reader to sign in.
    pub fn require_session(&self) -> Result<User> {
        match self.sessions.current()? {
            Some(user) => Ok(user),
            None => bail!("Not signed in. Run `pollbox login` first."),
        }
    }

    /// The signed-in tutor.
    pub fn require_tutor(&self) -> Result<User> {
        let user = self.require_session()?;
        if !user.is_admin {
            bail!("Only the tutor can do that.");
        }
        Ok(user)
    }

    /// The signed-in student.
    pub fn require_student(&self) -> Result<User> {
        let user = self.require_session()?;
        if user.is_admin {
            bail!("Only students can do that.");
        }
        Ok(user)
    }
}
