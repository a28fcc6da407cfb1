//! Poll commands: the student and tutor dashboards.

use anyhow::{Result, bail};
use chrono::Utc;
use pollbox_common::AppError;
use pollbox_core::{CreatePollInput, MAX_OPTIONS, MIN_OPTIONS, SubmitResponseInput};
use pollbox_db::entities::Poll;
use validator::Validate;

use super::App;

/// List polls the way the signed-in user sees them.
pub fn overview(app: &App) -> Result<()> {
    let user = app.require_session()?;
    let polls = app.polls.list()?;

    if polls.is_empty() {
        println!("No polls yet.");
        return Ok(());
    }

    if user.is_admin {
        return list(app);
    }

    let mut pending = Vec::new();
    let mut completed = Vec::new();
    for poll in polls {
        if app.responses.has_responded(&poll.id, &user.roll_number)? {
            completed.push(poll);
        } else {
            pending.push(poll);
        }
    }

    if !pending.is_empty() {
        println!("Pending ({}):", pending.len());
        for poll in &pending {
            print_poll(poll);
        }
    }
    if !completed.is_empty() {
        println!("Completed ({}):", completed.len());
        for poll in &completed {
            println!("  [done] {}  {}", poll.id, poll.question);
        }
    }
    if pending.is_empty() {
        println!("All caught up!");
    }
    Ok(())
}

/// Submit a response to a poll as the signed-in student.
pub fn submit(app: &App, poll_id: &str, option: String) -> Result<()> {
    let user = app.require_student()?;

    let Some(poll) = app.polls.get(poll_id)? else {
        bail!("No such poll: {poll_id}");
    };
    if !poll.options.contains(&option) {
        bail!(
            "\"{option}\" is not an option of this poll. Options: {}",
            poll.options.join(", ")
        );
    }
    // One response per student per poll; the guard lives here, not in
    // the data layer.
    if app.responses.has_responded(&poll.id, &user.roll_number)? {
        bail!("You have already responded to this poll");
    }

    let input = SubmitResponseInput {
        poll_id: poll.id,
        roll_number: user.roll_number,
        option,
    };
    input.validate().map_err(AppError::from)?;
    app.responses.submit(input)?;

    println!("Response recorded.");
    Ok(())
}

/// Create a poll as the tutor.
pub fn create(app: &App, question: String, options: Vec<String>) -> Result<()> {
    app.require_tutor()?;

    let question = question.trim().to_string();
    if question.is_empty() || options.iter().any(|o| o.trim().is_empty()) {
        bail!("Please fill in the question and all options");
    }
    if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
        bail!("A poll takes between {MIN_OPTIONS} and {MAX_OPTIONS} options");
    }

    let input = CreatePollInput {
        question,
        options,
        created_at: Utc::now(),
    };
    input.validate().map_err(AppError::from)?;
    let poll = app.polls.create(input)?;

    println!("Poll created: {}", poll.id);
    Ok(())
}

/// List all polls with response counts (tutor view).
pub fn list(app: &App) -> Result<()> {
    app.require_tutor()?;

    let polls = app.polls.list()?;
    if polls.is_empty() {
        println!("No polls created yet.");
        return Ok(());
    }

    println!("Polls ({}):", polls.len());
    for poll in polls {
        let stats = app.polls.stats(&poll)?;
        println!(
            "  {}  {}  [{}/{} responded, {}%]",
            poll.id, poll.question, stats.responded, stats.total_students, stats.percentage
        );
    }
    Ok(())
}

/// Delete a poll and its responses.
pub fn delete(app: &App, poll_id: &str) -> Result<()> {
    app.require_tutor()?;

    if app.polls.get(poll_id)?.is_none() {
        bail!("No such poll: {poll_id}");
    }
    app.polls.delete(poll_id)?;

    println!("Poll deleted.");
    Ok(())
}

/// Show the results screen for one poll.
pub fn results(app: &App, poll_id: &str) -> Result<()> {
    app.require_tutor()?;

    let Some(poll) = app.polls.get(poll_id)? else {
        bail!("No such poll: {poll_id}");
    };
    let stats = app.polls.stats(&poll)?;

    println!("{}", poll.question);
    println!(
        "{}/{} responded ({}%)",
        stats.responded, stats.total_students, stats.percentage
    );
    println!();
    for tally in &stats.tallies {
        println!(
            "  {:<24} {:>3} votes ({}%)",
            tally.option, tally.votes, tally.percentage
        );
    }

    if !stats.responders.is_empty() {
        println!();
        println!("Responded:");
        for status in &stats.responders {
            let name = status
                .user
                .as_ref()
                .map_or("(unknown)", |u| u.name.as_str());
            println!(
                "  {} (roll {}) - {}",
                name, status.response.roll_number, status.response.option
            );
        }
    }

    if !stats.pending.is_empty() {
        println!();
        println!("Pending ({}):", stats.pending.len());
        for student in &stats.pending {
            println!("  {} (roll {})", student.name, student.roll_number);
        }
    }
    Ok(())
}

fn print_poll(poll: &Poll) {
    println!("  {}  {}", poll.id, poll.question);
    for option in &poll.options {
        println!("      - {option}");
    }
}
