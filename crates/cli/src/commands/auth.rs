//! Session and account commands.

use anyhow::{Result, bail};
use pollbox_common::AppError;
use pollbox_core::{ChangePasswordInput, CompleteSetupInput};
use validator::Validate;

use super::App;

/// Sign in and persist the session.
pub fn login(app: &App, identifier: &str, password: &str) -> Result<()> {
    if identifier.is_empty() || password.is_empty() {
        bail!("Please enter both roll number and password");
    }

    let Some(user) = app.sessions.login(identifier, password)? else {
        bail!("Invalid roll number or password");
    };

    println!("Welcome {}!", user.name);
    if !user.is_admin && !user.has_completed_setup {
        println!("First login: set your name and password with `pollbox setup`.");
    }
    Ok(())
}

/// Forget the active session.
pub fn logout(app: &App) -> Result<()> {
    app.sessions.logout()?;
    println!("Signed out.");
    Ok(())
}

/// Show the signed-in user.
pub fn whoami(app: &App) -> Result<()> {
    match app.sessions.current()? {
        Some(user) if user.is_admin => println!("{} (tutor)", user.name),
        Some(user) => println!("{} (roll {})", user.name, user.roll_number),
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Complete first-login setup for the signed-in student.
pub fn setup(app: &App, name: String, password: String) -> Result<()> {
    let user = app.require_student()?;
    if user.has_completed_setup {
        bail!("Setup is already complete. Use `pollbox passwd` to change your password.");
    }

    let input = CompleteSetupInput {
        roll_number: user.roll_number,
        name: name.trim().to_string(),
        new_password: password,
    };
    input.validate().map_err(AppError::from)?;

    if app.accounts.complete_setup(&input)?.is_none() {
        bail!("Failed to complete setup. Please try again.");
    }

    println!("Setup complete. Welcome, {}!", input.name);
    Ok(())
}

/// Change the signed-in user's password.
pub fn passwd(app: &App, current: String, new: String) -> Result<()> {
    let user = app.require_session()?;

    let input = ChangePasswordInput {
        roll_number: user.roll_number,
        current_password: current,
        new_password: new,
    };
    input.validate().map_err(AppError::from)?;

    if !app.accounts.change_password(&input)? {
        bail!("Current password is incorrect");
    }

    println!("Password updated.");
    Ok(())
}
