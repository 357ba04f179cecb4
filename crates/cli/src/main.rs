//! Stitchhouse CLI - browse the catalog, send requests and manage podcasts.
//!
//! # Usage
//!
//! ```bash
//! # Sign in once; the session is stored for later commands
//! stitch session login --token "$TOKEN"
//!
//! # Browse
//! stitch products --all
//! stitch designs --category modern --min-price 1000 --max-price 2500
//!
//! # Submit
//! stitch contact --name Sam --email sam@hill.cafe --message "Need 40 caps"
//! stitch embroidery --business "Hill Cafe" --contact Sam --email sam@hill.cafe \
//!     --phone 555-0100 --type logo --placement left-chest --quantity 40 \
//!     --description "Caps for staff" --image logo.png --image-note "front"
//!
//! # Admin
//! stitch podcasts list
//! ```
//!
//! # Environment Variables
//!
//! - `STITCHHOUSE_API_ORIGIN` - Backend origin (required)
//! - `STITCHHOUSE_API_TOKEN` - Bearer token used when no session is stored
//! - `STITCHHOUSE_SESSION_FILE` - Where `session login` stores the session
//! - `SENTRY_DSN` - Enables error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stitchhouse_api::{ClientConfig, DesignSort};
use stitchhouse_core::{Budget, EmbroideryType, PackageTier, Placement, PodcastId, Price};
use stitchhouse_storefront::ContactDraft;

mod commands;

use commands::catalog::DesignQuery;
use commands::podcasts::EpisodeArgs;
use commands::requests::EmbroideryArgs;
use commands::{App, CliError};

#[derive(Parser)]
#[command(name = "stitch")]
#[command(author, version, about = "Stitchhouse storefront and admin from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// List catalog products
    Products {
        /// How many products to fetch
        #[arg(short, long, default_value_t = stitchhouse_storefront::catalog::DEFAULT_LIMIT)]
        limit: u32,

        /// Show every fetched product instead of the first page
        #[arg(long)]
        all: bool,
    },
    /// Browse custom logo designs
    Designs {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        min_price: Option<Price>,

        #[arg(long)]
        max_price: Option<Price>,

        /// `newest`, `popular`, `price-low` or `price-high`
        #[arg(long)]
        sort: Option<DesignSort>,
    },
    /// Manage podcast episodes (admins only)
    Podcasts {
        #[command(subcommand)]
        action: PodcastAction,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        message: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        subject: String,

        /// custom-embroidery, logo-design, graphic-design, screen-printing or other
        #[arg(long, default_value = "")]
        project_type: String,
    },
    /// Submit a custom embroidery request (requires a session)
    Embroidery {
        #[arg(long = "business")]
        business_name: String,

        #[arg(long = "contact")]
        contact_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        website: Option<String>,

        /// `logo`, `text`, `patch`, `3d-puff` or `custom`
        #[arg(long = "type")]
        embroidery_type: EmbroideryType,

        /// `left-chest`, `full-back`, `sleeve`, `cap-front` or `other`
        #[arg(long)]
        placement: Placement,

        #[arg(long, default_value_t = 1)]
        quantity: u32,

        /// `under-100`, `100-500`, `500-1000` or `over-1000`
        #[arg(long)]
        budget: Option<Budget>,

        #[arg(long)]
        timeline: Option<String>,

        #[arg(long)]
        description: String,

        /// `basic`, `premium` or `enterprise`
        #[arg(long, default_value = "basic")]
        package: PackageTier,

        /// Reference image (repeatable, up to 5)
        #[arg(long = "image")]
        images: Vec<PathBuf>,

        /// Description for the image at the same position (repeatable)
        #[arg(long = "image-note")]
        notes: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Verify a token and store the session
    Login {
        /// Bearer token (defaults to `STITCHHOUSE_API_TOKEN`)
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Show,
}

#[derive(Subcommand)]
enum PodcastAction {
    /// List episodes
    List,
    /// Create an episode from a link or an uploaded video
    Create {
        #[command(flatten)]
        episode: EpisodeFlags,
    },
    /// Edit an episode; omitted fields keep their current value
    Edit {
        id: String,

        #[command(flatten)]
        episode: EpisodeFlags,
    },
    /// Delete an episode
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(clap::Args)]
struct EpisodeFlags {
    #[arg(short, long)]
    title: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    /// External video link
    #[arg(long)]
    url: Option<String>,

    /// Video file to upload
    #[arg(long)]
    video: Option<PathBuf>,

    /// Thumbnail image
    #[arg(long)]
    thumbnail: Option<PathBuf>,
}

impl From<EpisodeFlags> for EpisodeArgs {
    fn from(flags: EpisodeFlags) -> Self {
        Self {
            title: flags.title,
            description: flags.description,
            url: flags.url,
            video: flags.video,
            thumbnail: flags.thumbnail,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stitchhouse=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Sentry needs the configuration, so a bad config is reported through a
    // subscriber without it.
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("{}", CliError::from(e));
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), CliError> {
    let mut app = App::init(config).await?;

    match cli.command {
        Commands::Session { action } => match action {
            SessionAction::Login { token } => commands::session::login(&mut app, token).await?,
            SessionAction::Logout => commands::session::logout(&mut app).await?,
            SessionAction::Show => commands::session::show(&mut app).await?,
        },
        Commands::Products { limit, all } => {
            commands::catalog::products(&mut app, limit, all).await?;
        }
        Commands::Designs {
            search,
            category,
            industry,
            min_price,
            max_price,
            sort,
        } => {
            let query = DesignQuery {
                search,
                category,
                industry,
                min_price,
                max_price,
                sort,
            };
            commands::catalog::designs(&mut app, query).await?;
        }
        Commands::Podcasts { action } => match action {
            PodcastAction::List => commands::podcasts::list(&mut app).await?,
            PodcastAction::Create { episode } => {
                commands::podcasts::create(&mut app, episode.into()).await?;
            }
            PodcastAction::Edit { id, episode } => {
                commands::podcasts::edit(&mut app, PodcastId::new(id), episode.into()).await?;
            }
            PodcastAction::Delete { id, yes } => {
                commands::podcasts::delete(&mut app, PodcastId::new(id), yes).await?;
            }
        },
        Commands::Contact {
            name,
            email,
            message,
            phone,
            subject,
            project_type,
        } => {
            let draft = ContactDraft {
                name,
                email,
                phone,
                subject,
                message,
                project_type,
            };
            commands::requests::contact(&mut app, draft).await?;
        }
        Commands::Embroidery {
            business_name,
            contact_name,
            email,
            phone,
            website,
            embroidery_type,
            placement,
            quantity,
            budget,
            timeline,
            description,
            package,
            images,
            notes,
        } => {
            let args = EmbroideryArgs {
                business_name,
                contact_name,
                email,
                phone,
                website,
                embroidery_type,
                placement,
                quantity,
                budget,
                timeline,
                description,
                package,
                images,
                notes,
            };
            commands::requests::embroidery(&mut app, args).await?;
        }
    }

    app.flush_notices();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_designs_filters() {
        let cli = Cli::try_parse_from([
            "stitch",
            "designs",
            "--category",
            "modern",
            "--min-price",
            "1000",
            "--sort",
            "price-low",
        ]);
        let Ok(Cli {
            command: Commands::Designs {
                category, min_price, sort, ..
            },
        }) = cli
        else {
            panic!("designs should parse");
        };
        assert_eq!(category.as_deref(), Some("modern"));
        assert_eq!(min_price, Some(Price::from_dollars(1000)));
        assert_eq!(sort, Some(DesignSort::PriceLow));
    }

    #[test]
    fn test_embroidery_rejects_unknown_placement() {
        let cli = Cli::try_parse_from([
            "stitch", "embroidery", "--business", "B", "--contact", "C", "--email", "e@x.io",
            "--phone", "1", "--type", "logo", "--placement", "pocket", "--description", "d",
        ]);
        assert!(cli.is_err());
    }
}
