//! End-to-end flow over a fresh store: seed, sign in, poll, respond,
//! and read the results back as the tutor would.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use pollbox_core::{
    AccountService, CompleteSetupInput, CreatePollInput, PollService, ResponseService,
    SeedService, SessionService, SubmitResponseInput,
};
use pollbox_db::test_utils::TestStore;

struct App {
    store: TestStore,
    sessions: SessionService,
    accounts: AccountService,
    polls: PollService,
    responses: ResponseService,
}

impl App {
    fn boot() -> Self {
        let store = TestStore::new();
        SeedService::new(store.users(), store.polls(), store.responses())
            .seed()
            .unwrap();
        Self {
            sessions: SessionService::new(store.users(), store.sessions()),
            accounts: AccountService::new(store.users(), store.sessions()),
            polls: PollService::new(store.polls(), store.responses(), store.users()),
            responses: ResponseService::new(store.responses()),
            store,
        }
    }
}

#[test]
fn student_answers_a_poll_and_the_tutor_sees_it() {
    let app = App::boot();

    // Tutor signs in and creates a poll.
    let tutor = app.sessions.login("tutor", "admin123").unwrap().unwrap();
    assert!(tutor.is_admin);
    let poll = app
        .polls
        .create(CreatePollInput {
            question: "Did today's lab make sense?".to_string(),
            options: vec!["Yes".to_string(), "Mostly".to_string(), "No".to_string()],
            created_at: Utc::now(),
        })
        .unwrap();

    // A known student signs in by email and answers.
    let student = app
        .sessions
        .login("student7@college.edu", "pass7123")
        .unwrap()
        .unwrap();
    assert_eq!(student.roll_number, "7");
    assert!(!app.responses.has_responded(&poll.id, "7").unwrap());

    app.responses
        .submit(SubmitResponseInput {
            poll_id: poll.id.clone(),
            roll_number: student.roll_number.clone(),
            option: "Mostly".to_string(),
        })
        .unwrap();
    assert!(app.responses.has_responded(&poll.id, "7").unwrap());

    // The tutor's view: exactly one response with the chosen option.
    let stored = app.responses.for_poll(&poll.id).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].roll_number, "7");
    assert_eq!(stored[0].option, "Mostly");

    let stats = app.polls.stats(&poll).unwrap();
    assert_eq!(stats.responded, 1);
    assert_eq!(stats.tallies[1].votes, 1);
    assert_eq!(stats.pending.len(), 59);
}

#[test]
fn first_login_setup_flows_into_the_session() {
    let app = App::boot();

    let student = app.sessions.login("21", "pass21123").unwrap().unwrap();
    assert!(!student.has_completed_setup);

    app.accounts
        .complete_setup(&CompleteSetupInput {
            roll_number: student.roll_number.clone(),
            name: "Keerthana Balaji".to_string(),
            new_password: "chosen-by-me".to_string(),
        })
        .unwrap()
        .unwrap();

    // Session reflects the change without re-authentication.
    let session = app.sessions.current().unwrap().unwrap();
    assert!(session.has_completed_setup);
    assert_eq!(session.name, "Keerthana Balaji");

    // The old seeded password is gone.
    assert!(app.sessions.authenticate("21", "pass21123").unwrap().is_none());
    assert!(app.sessions.authenticate("21", "chosen-by-me").unwrap().is_some());
}

#[test]
fn deleting_a_poll_erases_every_trace_of_it() {
    let app = App::boot();

    let poll = app
        .polls
        .create(CreatePollInput {
            question: "Keep Friday quizzes?".to_string(),
            options: vec!["Keep".to_string(), "Drop".to_string()],
            created_at: Utc::now(),
        })
        .unwrap();
    for roll in ["1", "2", "3"] {
        app.responses
            .submit(SubmitResponseInput {
                poll_id: poll.id.clone(),
                roll_number: roll.to_string(),
                option: "Drop".to_string(),
            })
            .unwrap();
    }

    app.polls.delete(&poll.id).unwrap();

    assert!(app.polls.get(&poll.id).unwrap().is_none());
    assert!(app.responses.for_poll(&poll.id).unwrap().is_empty());
    assert!(app.store.responses().all().unwrap().is_empty());
}
