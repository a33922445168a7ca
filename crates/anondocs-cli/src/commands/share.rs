//! Share link CLI commands.

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use anondocs_core::config::AppConfig;
use anondocs_core::error::AppError;
use anondocs_core::types::{DocumentId, LinkId};
use anondocs_entity::share::{DocumentSnapshot, ExpiryPolicy, LinkRecord, ShareMode};
use anondocs_service::{LinkSummary, ShareService};
use anondocs_share::ShareError;

use super::{Services, format_time};
use crate::output::{self, OutputFormat};

/// Password prompts allowed when opening a private link.
const MAX_PASSWORD_ATTEMPTS: u32 = 3;

/// Arguments for share commands
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Share subcommand
    #[command(subcommand)]
    pub command: ShareCommand,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Create a share link for a document
    Create {
        /// Document ID
        doc: DocumentId,
        /// Make the link readable without a password
        #[arg(long)]
        public: bool,
        /// Password for a private link (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Days until the link expires, 0 for never (defaults to config)
        #[arg(short, long)]
        expires_days: Option<u32>,
    },
    /// List share links, newest first
    List,
    /// Flip a link between public and private
    Toggle {
        /// Link ID
        link: LinkId,
        /// New password when making the link private (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Remove a link from the registry
    Revoke {
        /// Link ID
        link: LinkId,
    },
    /// Open a share URL and print the shared document
    Open {
        /// Share URL, query string, or bare envelope
        url: String,
        /// Password for a private link (prompted when needed)
        #[arg(short, long)]
        password: Option<String>,
        /// Keep a local copy of the opened document
        #[arg(long)]
        save: bool,
    },
}

/// Share link display row for table output
#[derive(Debug, Serialize, Tabled)]
struct LinkRow {
    /// Link ID
    id: String,
    /// Public or private
    mode: String,
    /// Source document title
    document: String,
    /// Created at
    created_at: String,
    /// Expires at
    expires: String,
    /// Active or expired
    status: String,
    /// Full share URL
    #[tabled(skip)]
    url: String,
}

impl LinkRow {
    fn new(summary: &LinkSummary) -> Self {
        let record = &summary.record;
        let status = if record.is_expired_at(Utc::now()) {
            "expired"
        } else {
            "active"
        };
        Self {
            id: record.id.to_string(),
            mode: record.mode().to_string(),
            document: summary
                .document_title
                .clone()
                .unwrap_or_else(|| "(deleted)".to_string()),
            created_at: format_time(record.created_at),
            expires: record
                .expires_at
                .map_or_else(|| "never".to_string(), format_time),
            status: status.to_string(),
            url: record.url.clone(),
        }
    }
}

/// Execute share commands
pub async fn execute(
    args: &ShareArgs,
    services: &Services,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let shares = &services.shares;

    match &args.command {
        ShareCommand::Create {
            doc,
            public,
            password,
            expires_days,
        } => {
            let mode = ShareMode::from_public_flag(*public);
            let password = match (mode, password) {
                (ShareMode::Private, None) => Some(prompt_new_password()?),
                (_, password) => password.clone(),
            };
            let expiry =
                ExpiryPolicy::from_days(expires_days.unwrap_or(config.share.default_expiry_days));

            let record = shares
                .create_link(*doc, mode, password.as_deref(), expiry)
                .await?;
            print_link(&record, format);
        }
        ShareCommand::List => {
            let rows: Vec<LinkRow> = shares.list_links().await?.iter().map(LinkRow::new).collect();
            output::print_list(&rows, format);
        }
        ShareCommand::Toggle { link, password } => {
            let current = shares.get_link(*link).await?;
            let password = match (current.mode().toggled(), password) {
                (ShareMode::Private, None) => Some(prompt_new_password()?),
                (_, password) => password.clone(),
            };
            let record = shares.toggle_visibility(*link, password.as_deref()).await?;
            print_link(&record, format);
        }
        ShareCommand::Revoke { link } => {
            shares.revoke(*link).await?;
            output::print_success(&format!("Share link {link} removed"));
            output::print_warning("URLs already handed out still open until they expire");
        }
        ShareCommand::Open {
            url,
            password,
            save,
        } => {
            let snapshot = open_interactive(services, url, password.clone())?;
            print_snapshot(&snapshot, format);

            if *save {
                let doc = services.documents.import_snapshot(&snapshot).await?;
                output::print_success(&format!("Saved a copy as '{}' ({})", doc.title, doc.id));
            }
        }
    }

    Ok(())
}

/// Decodes a share URL, asking for the password when the link needs one.
fn open_interactive(
    services: &Services,
    url: &str,
    password: Option<String>,
) -> Result<DocumentSnapshot, AppError> {
    open_with_retries(&services.shares, url, password, prompt_password)
}

/// Opens `url`, calling `prompt` for a password when one is missing or
/// wrong. A password given up front counts as one of the
/// [`MAX_PASSWORD_ATTEMPTS`] tries.
fn open_with_retries(
    shares: &ShareService,
    url: &str,
    mut password: Option<String>,
    mut prompt: impl FnMut() -> Result<String, AppError>,
) -> Result<DocumentSnapshot, AppError> {
    let mut attempts = u32::from(password.is_some());

    if password.is_none() && shares.is_private_link(url) {
        password = Some(prompt()?);
        attempts += 1;
    }

    loop {
        match shares.open_shared(url, password.as_deref()) {
            Ok(snapshot) => return Ok(snapshot),
            Err(err) if err.is_password_retryable() && attempts < MAX_PASSWORD_ATTEMPTS => {
                if err == ShareError::IncorrectPasswordOrCorrupt {
                    output::print_warning(&err.to_string());
                }
                password = Some(prompt()?);
                attempts += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Link password")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn prompt_new_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password for the private link")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn print_link(record: &LinkRecord, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_success(&format!("{} share link {}", record.mode(), record.id));
            output::print_kv(
                "expires",
                &record.expires_at.map_or_else(|| "never".to_string(), format_time),
            );
            println!("{}", record.url);
            if record.is_public {
                output::print_warning("Anyone with this URL can read the document");
            }
        }
        OutputFormat::Json => output::print_item(record, format),
    }
}

fn print_snapshot(snapshot: &DocumentSnapshot, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_kv("title", &snapshot.title);
            output::print_kv("shared", &format_time(snapshot.created_at));
            output::print_kv(
                "expires",
                &snapshot.expires_at.map_or_else(|| "never".to_string(), format_time),
            );
            println!();
            println!("{}", snapshot.body);
        }
        OutputFormat::Json => output::print_item(snapshot, format),
    }
}

#[cfg(test)]
mod tests {
    use anondocs_entity::document::Document;
    use anondocs_share::{EnvelopeDecoder, EnvelopeEncoder, KdfParams, ShareUrl};
    use anondocs_storage::Stores;

    use super::*;

    async fn private_link(password: &str) -> (ShareService, String) {
        let stores = Stores::in_memory();
        let doc = Document::new("Notes");
        stores.documents.put(&doc.id, &doc).await.expect("put");

        let shares = ShareService::new(
            stores.documents,
            stores.links,
            EnvelopeEncoder::new(KdfParams::new(256, 1, 1).expect("kdf params")),
            EnvelopeDecoder::new(),
            ShareUrl::new("https://docs.example/", "shared").expect("share url"),
        );
        let record = shares
            .create_link(doc.id, ShareMode::Private, Some(password), ExpiryPolicy::Never)
            .await
            .expect("create link");
        (shares, record.url)
    }

    #[tokio::test]
    async fn test_flag_password_counts_as_an_attempt() {
        let (shares, url) = private_link("right").await;
        let mut prompts = 0;

        let err = open_with_retries(&shares, &url, Some("wrong".into()), || {
            prompts += 1;
            Ok("still wrong".to_string())
        })
        .unwrap_err();

        assert_eq!(prompts, MAX_PASSWORD_ATTEMPTS - 1);
        assert_eq!(
            ShareError::from_app_error(&err),
            Some(&ShareError::IncorrectPasswordOrCorrupt)
        );
    }

    #[tokio::test]
    async fn test_prompts_up_to_the_limit_without_flag() {
        let (shares, url) = private_link("right").await;
        let mut prompts = 0;

        let result = open_with_retries(&shares, &url, None, || {
            prompts += 1;
            Ok("wrong".to_string())
        });

        assert!(result.is_err());
        assert_eq!(prompts, MAX_PASSWORD_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_recovers_on_a_later_attempt() {
        let (shares, url) = private_link("right").await;
        let mut answers = vec!["right", "wrong"];

        let snapshot = open_with_retries(&shares, &url, None, || {
            Ok(answers.pop().unwrap_or_default().to_string())
        })
        .expect("open");

        assert_eq!(snapshot.title, "Notes");
        assert!(answers.is_empty());
    }
}
