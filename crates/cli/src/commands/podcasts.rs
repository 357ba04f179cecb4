//! Podcast management commands (admins only).
//!
//! # Usage
//!
//! ```bash
//! stitch podcasts list
//! stitch podcasts create --title "Thread Talk #4" --url https://youtu.be/abc
//! stitch podcasts create --title "Studio tour" --video tour.mp4 --thumbnail tour.png
//! stitch podcasts edit 65f1c0 --title "Studio tour (2024)"
//! stitch podcasts delete 65f1c0
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use stitchhouse_admin::{PanelError, PodcastDraft, PodcastPanel};
use stitchhouse_api::{Applied, LocalFile};
use stitchhouse_core::{Podcast, PodcastId, VideoKind};

use super::{App, CliError};

/// Field values given on the command line. `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct EpisodeArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub video: Option<PathBuf>,
    pub thumbnail: Option<PathBuf>,
}

async fn mount(app: &mut App) -> Result<PodcastPanel, CliError> {
    // Being signed out is the panel's call to make; a token that could not
    // be exchanged is reported as is.
    match app.ensure_session().await {
        Ok(_) | Err(CliError::NotSignedIn) => {}
        Err(e) => return Err(e),
    }
    let panel = PodcastPanel::mount(&app.session, &app.api, &mut app.notices).await;
    if let Some(message) = panel.denial_message() {
        app.notices.error(message);
        app.flush_notices();
        return Err(PanelError::AccessDenied.into());
    }
    Ok(panel)
}

pub async fn list(app: &mut App) -> Result<(), CliError> {
    let panel = mount(app).await?;
    app.flush_notices();
    if panel.last_fetch() == Some(Applied::Cleared) {
        return Err(CliError::Usage("Failed to load podcasts".to_string()));
    }
    print_podcasts(panel.podcasts());
    Ok(())
}

pub async fn create(app: &mut App, args: EpisodeArgs) -> Result<(), CliError> {
    let mut panel = mount(app).await?;
    panel.open_create()?;
    let result = fill_and_submit(app, &mut panel, args).await;
    app.flush_notices();
    result
}

pub async fn edit(app: &mut App, id: PodcastId, args: EpisodeArgs) -> Result<(), CliError> {
    let mut panel = mount(app).await?;
    panel.open_edit(&id)?;
    let result = fill_and_submit(app, &mut panel, args).await;
    app.flush_notices();
    result
}

async fn fill_and_submit(
    app: &mut App,
    panel: &mut PodcastPanel,
    args: EpisodeArgs,
) -> Result<(), CliError> {
    let video = match &args.video {
        Some(path) => Some(LocalFile::from_path(path).await?),
        None => None,
    };
    let thumbnail = match &args.thumbnail {
        Some(path) => Some(LocalFile::from_path(path).await?),
        None => None,
    };

    let draft = panel.draft_mut().ok_or(PanelError::NoForm)?;
    apply_args(draft, args, video, thumbnail, &mut app.notices)?;
    panel.submit(&app.api, &mut app.notices).await?;
    Ok(())
}

fn apply_args(
    draft: &mut PodcastDraft,
    args: EpisodeArgs,
    video: Option<LocalFile>,
    thumbnail: Option<LocalFile>,
    notices: &mut stitchhouse_api::Notices,
) -> Result<(), CliError> {
    if args.url.is_some() && video.is_some() {
        return Err(CliError::Usage(
            "Use either --url or --video, not both".to_string(),
        ));
    }
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(url) = args.url {
        draft.kind = VideoKind::Url;
        draft.video_url = url;
    }
    if let Some(file) = video {
        draft.kind = VideoKind::Upload;
        if !draft.attach_video(file, notices) {
            return Err(CliError::Usage("Video file was rejected".to_string()));
        }
    }
    if let Some(file) = thumbnail
        && !draft.attach_thumbnail(file, notices)
    {
        return Err(CliError::Usage("Thumbnail was rejected".to_string()));
    }
    Ok(())
}

/// Delete an episode, asking first unless `yes` is set.
pub async fn delete(app: &mut App, id: PodcastId, yes: bool) -> Result<(), CliError> {
    let mut panel = mount(app).await?;
    panel.request_delete(&id)?;

    if !yes && !confirm(&format!("Delete podcast {id}? [y/N] "))? {
        panel.cancel_delete();
        app.notices.info("Cancelled");
        app.flush_notices();
        return Ok(());
    }

    let result = panel.confirm_delete(&app.api, &mut app.notices).await;
    app.flush_notices();
    result.map_err(Into::into)
}

#[allow(clippy::print_stdout)]
fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[allow(clippy::print_stdout)]
fn print_podcasts(podcasts: &[Podcast]) {
    if podcasts.is_empty() {
        println!("No podcasts yet.");
        return;
    }
    for podcast in podcasts {
        println!(
            "{:<26} {:<6} {}  {}",
            podcast.id.as_str(),
            podcast.kind.as_str(),
            podcast.created_at.format("%Y-%m-%d"),
            podcast.title
        );
        println!("{:<26} {}", "", podcast.video_url);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use stitchhouse_api::{ApiError, AuthUser, Session};
    use stitchhouse_core::Role;

    use super::*;
    use crate::commands::testing::unreachable_app;

    #[tokio::test]
    async fn test_list_fails_when_fetch_fails() {
        let mut app = unreachable_app("list-fails", None).await;
        app.session.sign_in(Session::new(
            SecretString::from("tok_admin"),
            AuthUser {
                id: "u1".into(),
                name: "Robin".to_string(),
                email: "robin@stitchhouse.studio".to_string(),
                role: Role::Admin,
            },
        ));

        let err = list(&mut app).await.unwrap_err();
        assert!(matches!(err, CliError::Usage(ref m) if m == "Failed to load podcasts"));
    }

    #[tokio::test]
    async fn test_failed_token_exchange_is_not_a_denial() {
        let mut app = unreachable_app("token-fails", Some("tok_env")).await;

        let err = list(&mut app).await.unwrap_err();
        assert!(matches!(err, CliError::Api(ApiError::Http(_))));
    }

    #[tokio::test]
    async fn test_no_token_is_a_denial() {
        let mut app = unreachable_app("no-token", None).await;

        let err = list(&mut app).await.unwrap_err();
        assert!(matches!(err, CliError::Panel(PanelError::AccessDenied)));
    }
}
