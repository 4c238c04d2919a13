//! ghshare CLI: share files through a GitHub repository.
//!
//! Credentials are saved with `ghshare config set`; environment variables
//! (GHSHARE_API_URL, GHSHARE_STATE_DIR, GHSHARE_SHARE_ORIGIN, ...) adjust endpoints.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ghshare_api_client::{ApiClient, Auth};
use ghshare_cli::{
    init_tracing, log_batch_summary, queue_paths, render_history_table, HistoryRow,
    OutcomeSummary, OutputFormat, TracingProgress,
};
use ghshare_core::constants::DEFAULT_BRANCH;
use ghshare_core::{LinkResolver, Route, Settings, StoredObjectName};
use ghshare_services::UploadSession;
use ghshare_storage::{create_object_store, create_state_store};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "ghshare", about = "Share files through a GitHub repository")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the saved token and repository
    Config {
        #[command(subcommand)]
        sub: ConfigCommands,
    },
    /// Upload one or more files and print their share links
    Upload {
        /// Paths of the files to upload, in order
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
    },
    /// List previous uploads, newest first
    History {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Resolve a share URL into its download view
    Open {
        /// Full share URL, e.g. http://localhost:8080/?v=1700000000000_a.txt
        url: String,
    },
    /// Print the share and raw links for a stored object name
    Link {
        /// Stored object name, e.g. 1700000000000_My_Report.pdf
        stored_name: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Save the access token and target repository
    Set {
        /// Personal access token with contents write permission
        #[arg(long)]
        token: String,
        /// Repository as owner/name
        #[arg(long)]
        repo: String,
    },
    /// Show the saved configuration with the token masked
    Show,
    /// Check that the saved repository is reachable with the saved token
    Verify,
}

#[derive(Serialize)]
struct ConfigView {
    token: String,
    repo: String,
    complete: bool,
}

#[derive(Serialize)]
struct VerifyView {
    full_name: String,
    default_branch: String,
    private: bool,
    raw_links_branch: &'static str,
    raw_links_valid: bool,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("Invalid ghshare environment settings")?;

    let state = create_state_store(&settings)
        .await
        .context("Failed to open state directory")?;
    let objects = create_object_store(&settings).context("Failed to create API client")?;
    let links = LinkResolver::from_settings(&settings);
    let mut session = UploadSession::open(state, objects, links).await?;

    match cli.command {
        Commands::Config { sub } => match sub {
            ConfigCommands::Set { token, repo } => {
                session.save_configuration(&token, &repo).await?;
                let config = session.configuration();
                print_json(&ConfigView {
                    token: config.masked_token(),
                    repo: config.repository.clone(),
                    complete: config.is_complete(),
                })?;
            }
            ConfigCommands::Show => {
                let config = session.configuration();
                print_json(&ConfigView {
                    token: config.masked_token(),
                    repo: config.repository.clone(),
                    complete: config.is_complete(),
                })?;
            }
            ConfigCommands::Verify => {
                let config = session.configuration();
                config.ensure_complete()?;

                let client = ApiClient::from_settings(&settings)
                    .context("Failed to create API client")?
                    .with_auth(Auth::Token(config.token.clone()));
                let repo = client
                    .get_repository(&config.repository)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))
                    .with_context(|| format!("Repository {} is not reachable", config.repository))?;

                let raw_links_valid = repo.default_branch == DEFAULT_BRANCH;
                if !raw_links_valid {
                    tracing::warn!(
                        repository = %repo.full_name,
                        default_branch = %repo.default_branch,
                        expected = DEFAULT_BRANCH,
                        "Default branch differs from the branch raw links point at"
                    );
                }
                print_json(&VerifyView {
                    full_name: repo.full_name,
                    default_branch: repo.default_branch,
                    private: repo.private,
                    raw_links_branch: DEFAULT_BRANCH,
                    raw_links_valid,
                })?;
            }
        },
        Commands::Upload { files } => {
            let (pending, mut summaries) = queue_paths(&files).await;
            session.add_files(pending);

            let report = session.upload_all(&TracingProgress).await?;
            summaries.extend(report.outcomes.iter().map(OutcomeSummary::from));
            print_json(&summaries)?;

            log_batch_summary(&summaries);
        }
        Commands::History { format } => {
            let entries = session.history().await?;
            let rows: Vec<HistoryRow> = entries
                .iter()
                .map(|entry| HistoryRow::new(entry, session.links()))
                .collect();
            match format {
                OutputFormat::Json => print_json(&rows)?,
                OutputFormat::Table => print!("{}", render_history_table(&rows)),
            }
        }
        Commands::Open { url } => match Route::from_url(&url) {
            Route::Download(stored_name) => print_json(&session.download_view(&stored_name))?,
            Route::Upload => {
                anyhow::bail!("{} does not name a shared file (missing ?v=...)", url)
            }
        },
        Commands::Link { stored_name } => {
            let stored_name = StoredObjectName::parse(stored_name);
            let view = session.download_view(&stored_name);
            print_json(&serde_json::json!({
                "stored_name": view.stored_name,
                "display_name": view.display_name,
                "share_url": session.links().share_url(&stored_name),
                "raw_url": view.raw_url,
            }))?;
        }
    }

    Ok(())
}
