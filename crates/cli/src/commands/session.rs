//! Session management commands.
//!
//! # Usage
//!
//! ```bash
//! # Sign in with a token issued by the backend
//! stitch session login --token "$TOKEN"
//!
//! # Who am I?
//! stitch session show
//!
//! # Forget the stored session
//! stitch session logout
//! ```

use secrecy::SecretString;

use super::{App, CliError};

/// Verify `token` with the backend and store the resulting session.
pub async fn login(app: &mut App, token: Option<String>) -> Result<(), CliError> {
    let token = match token {
        Some(token) => SecretString::from(token),
        None => app.config.api_token.clone().ok_or(CliError::NotSignedIn)?,
    };

    let session = app.api.authenticate(token).await?;
    app.store.save(&session).await?;
    app.notices.success(format!(
        "Signed in as {} ({})",
        session.user().name,
        session.user().role
    ));
    app.session.sign_in(session);
    tracing::info!(path = %app.store.path().display(), "session stored");
    Ok(())
}

pub async fn logout(app: &mut App) -> Result<(), CliError> {
    app.store.clear().await?;
    app.session.sign_out();
    app.notices.success("Signed out");
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn show(app: &mut App) -> Result<(), CliError> {
    let session = app.ensure_session().await?;
    let user = session.user();
    println!("{} <{}>", user.name, user.email);
    println!("  id:   {}", user.id);
    println!("  role: {}", user.role);
    Ok(())
}
