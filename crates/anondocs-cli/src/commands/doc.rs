//! Document management CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tokio::io::AsyncReadExt;

use anondocs_core::error::AppError;
use anondocs_core::types::DocumentId;
use anondocs_entity::document::Document;

use super::{Services, format_time};
use crate::output::{self, OutputFormat};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocCommand {
    /// Create an empty document
    New {
        /// Title (defaults to "Untitled")
        #[arg(short, long)]
        title: Option<String>,
    },
    /// List documents, most recently saved first
    List,
    /// Show a document
    Show {
        /// Document ID
        id: DocumentId,
    },
    /// Replace a document's body with HTML read from a file or stdin
    Save {
        /// Document ID
        id: DocumentId,
        /// File to read the body from (stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Rename a document
    Rename {
        /// Document ID
        id: DocumentId,
        /// New title
        title: String,
    },
    /// Delete a document
    Delete {
        /// Document ID
        id: DocumentId,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Word and character counts
    Stats {
        /// Document ID
        id: DocumentId,
    },
    /// Find text in a document's body
    Find {
        /// Document ID
        id: DocumentId,
        /// Text to look for
        term: String,
        /// Only match after this character offset
        #[arg(long)]
        after: Option<usize>,
    },
    /// Export a printable HTML page
    Export {
        /// Document ID
        id: DocumentId,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Document display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    /// Document ID
    id: String,
    /// Title
    title: String,
    /// Created at
    created_at: String,
    /// Last saved
    updated_at: String,
}

impl From<&Document> for DocumentRow {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            title: doc.title.clone(),
            created_at: format_time(doc.created_at),
            updated_at: format_time(doc.updated_at),
        }
    }
}

/// Execute document commands
pub async fn execute(
    args: &DocArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    let documents = &services.documents;

    match &args.command {
        DocCommand::New { title } => {
            let doc = documents.create(title.as_deref()).await?;
            output::print_success(&format!("Document '{}' created ({})", doc.title, doc.id));
        }
        DocCommand::List => {
            let rows: Vec<DocumentRow> = documents.list().await?.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
        DocCommand::Show { id } => {
            output::print_item(&documents.get(*id).await?, format);
        }
        DocCommand::Save { id, file, title } => {
            let content = match file {
                Some(path) => tokio::fs::read_to_string(path).await?,
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
            };
            let doc = documents.save(*id, title.as_deref(), &content).await?;
            output::print_success(&format!("Document '{}' saved", doc.title));
        }
        DocCommand::Rename { id, title } => {
            let doc = documents.rename(*id, title).await?;
            output::print_success(&format!("Document renamed to '{}'", doc.title));
        }
        DocCommand::Delete { id, yes } => {
            let doc = documents.get(*id).await?;
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete '{}'? Share links made from it stay valid.", doc.title))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            documents.delete(*id).await?;
            output::print_success(&format!("Document '{}' deleted", doc.title));
        }
        DocCommand::Stats { id } => {
            output::print_item(&documents.stats(*id).await?, format);
        }
        DocCommand::Find { id, term, after } => match documents.find(*id, term, *after).await? {
            Some(offset) => match format {
                OutputFormat::Table => output::print_kv("offset", &offset.to_string()),
                OutputFormat::Json => println!("{}", serde_json::json!({ "offset": offset })),
            },
            None => output::print_warning(&format!("'{term}' not found")),
        },
        DocCommand::Export { id, output: path } => {
            let html = documents.export_html(*id).await?;
            match path {
                Some(path) => {
                    tokio::fs::write(path, html).await?;
                    output::print_success(&format!("Exported to {}", path.display()));
                }
                None => print!("{html}"),
            }
        }
    }

    Ok(())
}
