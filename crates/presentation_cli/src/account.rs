//! Account command handlers

use application::error::ApplicationError;
use application::ports::{ProfileUpdate, ReviewSubmission};
use application::services::SessionService;

/// Register a new account
pub async fn register(
    session: &SessionService,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApplicationError> {
    session.register(username, email, password).await?;
    println!("✅ Account created. An OTP was sent to {email}.");
    Ok(())
}

/// Verify the emailed OTP code
pub async fn verify_otp(
    session: &SessionService,
    email: &str,
    otp: &str,
) -> Result<(), ApplicationError> {
    session.verify_otp(email, otp).await?;
    println!("✅ Email verified. You can log in now.");
    Ok(())
}

/// Request a fresh OTP email
pub async fn resend_otp(session: &SessionService, email: &str) -> Result<(), ApplicationError> {
    session.resend_otp(email).await?;
    println!("✉️ A new OTP has been sent to {email}.");
    Ok(())
}

/// Log in and show the account behind the session
pub async fn whoami(
    session: &SessionService,
    email: &str,
    password: &str,
) -> Result<(), ApplicationError> {
    session.login(email, password).await?;
    let account = session.user_data().await?;
    println!("👤 {} <{}>", account.username, account.email);
    println!(
        "   role: {}",
        if account.role == 0 { "admin" } else { "commuter" }
    );
    Ok(())
}

/// Update profile fields for the logged-in account
pub async fn update_profile(
    session: &SessionService,
    email: &str,
    password: &str,
    new_username: Option<String>,
    new_email: Option<String>,
    new_password: Option<String>,
) -> Result<(), ApplicationError> {
    session.login(email, password).await?;
    let update = ProfileUpdate {
        username: new_username,
        email: new_email,
        password: new_password,
        current_password: password.to_string(),
    };
    session.update_profile(&update).await?;
    println!("✅ Profile updated.");
    Ok(())
}

/// Submit a service review as the logged-in account
pub async fn review(
    session: &SessionService,
    email: &str,
    password: &str,
    issue: &str,
    suggestion: &str,
    rating: u8,
) -> Result<(), ApplicationError> {
    session.login(email, password).await?;
    let submission = ReviewSubmission {
        issue: issue.to_string(),
        suggestion: suggestion.to_string(),
        rating,
    };
    session.submit_review(&submission).await?;
    println!("⭐ Review submitted, thank you!");
    Ok(())
}

/// Change an account's role (admin feature)
pub async fn update_role(
    session: &SessionService,
    email: &str,
    role: u8,
) -> Result<(), ApplicationError> {
    session.update_role(email, role).await?;
    println!("✅ Role updated for {email}.");
    Ok(())
}

/// List all accounts (admin feature)
pub async fn users(session: &SessionService) -> Result<(), ApplicationError> {
    let accounts = session.list_users().await?;
    println!("{} account(s):", accounts.len());
    for account in &accounts {
        println!(
            "  • {} <{}> role {}",
            account.username, account.email, account.role
        );
    }
    Ok(())
}
