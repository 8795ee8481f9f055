//! Jarvis CLI - Command-line client for the Jarvis Workstation daemon

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

const DEFAULT_URL: &str = "http://127.0.0.1:3001";

#[derive(Parser)]
#[command(name = "jarvis")]
#[command(about = "Jarvis Workstation CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Daemon base URL
    #[arg(long, env = "JARVIS_URL", default_value = DEFAULT_URL)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the microscopic code analysis
    #[command(group(ArgGroup::new("target").required(true).args(["dossier", "all"])))]
    Analyse {
        /// Folder to analyse
        #[arg(short, long)]
        dossier: Option<String>,

        /// Analyse the whole project
        #[arg(long)]
        all: bool,
    },

    /// Run a project evolution step
    Evolve {
        #[arg(value_parser = ["creer-sauvegarde", "lancer-evolution", "rollback"])]
        action: String,

        /// Corrections to apply, as JSON
        #[arg(long)]
        corrections: Option<String>,
    },

    /// Run a post-build validation
    Validate {
        #[arg(value_parser = [
            "test-build",
            "test-fonctionnel",
            "test-performance",
            "test-compatibilite",
            "test-regression",
            "test-stress",
            "test-rollback",
            "validation-complete",
        ])]
        action: String,

        /// Test type echoed back in the report
        #[arg(short = 't', long = "type")]
        test_type: Option<String>,
    },

    /// Memory / learning log
    Memory {
        #[command(subcommand)]
        command: MemoryCommands,
    },
}

#[derive(Subcommand)]
enum MemoryCommands {
    /// List entries, newest first
    List {
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        #[arg(short, long, value_parser = ["generation", "feedback", "learning"])]
        kind: Option<String>,
    },

    /// Append an entry
    Record {
        #[arg(value_parser = ["generation", "feedback", "learning"])]
        kind: String,

        content: String,
    },
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    resultats: Option<Value>,
    #[serde(default)]
    logs: Option<String>,
    #[serde(default)]
    erreurs: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct MemoryEntry {
    id: String,
    kind: String,
    content: String,
    created_at: i64,
}

#[derive(Tabled)]
struct FieldRow {
    field: String,
    value: String,
}

#[derive(Tabled)]
struct MemoryRow {
    id: String,
    kind: String,
    content: String,
    created_at: i64,
}

impl From<MemoryEntry> for MemoryRow {
    fn from(entry: MemoryEntry) -> Self {
        Self {
            id: entry.id.chars().take(8).collect(),
            kind: entry.kind,
            content: entry.content,
            created_at: entry.created_at,
        }
    }
}

struct Client {
    base: String,
    http: reqwest::Client,
}

impl Client {
    fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.http
            .post(format!("{}{}", self.base, path))
            .json(&body)
            .send()
            .await
            .context("Failed to connect to daemon")?
            .json()
            .await
            .context("Failed to parse response")
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.http
            .get(format!("{}{}", self.base, path))
            .query(query)
            .send()
            .await
            .context("Failed to connect to daemon")?
            .json()
            .await
            .context("Failed to parse response")
    }
}

/// Print a pipeline envelope; failures become the command's error
fn print_envelope(title: &str, body: Value) -> Result<()> {
    let envelope: Envelope = serde_json::from_value(body).context("Unexpected response shape")?;

    if !envelope.success {
        anyhow::bail!(
            "{}",
            envelope.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    println!("{}", format!("✓ {}", title).green().bold());
    println!();

    if let Some(Value::Object(fields)) = envelope.resultats {
        let rows: Vec<FieldRow> = fields
            .into_iter()
            .map(|(field, value)| FieldRow {
                value: match value {
                    Value::String(s) => s,
                    Value::Null => "-".to_string(),
                    other => other.to_string(),
                },
                field,
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if let Some(logs) = envelope.logs.filter(|l| !l.trim().is_empty()) {
        println!();
        println!("{}", "Logs:".cyan().bold());
        println!("{}", logs.trim_end());
    }
    if let Some(erreurs) = envelope.erreurs.filter(|e| !e.trim().is_empty()) {
        println!();
        println!("{}", "Errors:".yellow().bold());
        println!("{}", erreurs.trim_end());
    }

    Ok(())
}

fn ensure_success(body: &Value) -> Result<()> {
    if body["success"].as_bool() == Some(true) {
        return Ok(());
    }
    anyhow::bail!("{}", body["error"].as_str().unwrap_or("unknown error"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new(&cli.url);

    match cli.command {
        Commands::Analyse { dossier, all } => {
            let body = if all {
                json!({ "action": "analyser-tout" })
            } else {
                json!({ "action": "analyser", "dossierCible": dossier })
            };
            let response = client.post("/api/analyse", body).await?;
            print_envelope("Analysis completed", response)?;
        }

        Commands::Evolve {
            action,
            corrections,
        } => {
            let mut body = json!({ "action": action });
            if let Some(raw) = corrections {
                let parsed: Value =
                    serde_json::from_str(&raw).context("Invalid JSON corrections")?;
                body["corrections"] = parsed;
            }
            let response = client.post("/api/evolution", body).await?;
            print_envelope(&format!("Evolution '{}' completed", action), response)?;
        }

        Commands::Validate { action, test_type } => {
            let response = client
                .post(
                    "/api/validation",
                    json!({ "action": action, "testType": test_type }),
                )
                .await?;
            print_envelope(&format!("Validation '{}' completed", action), response)?;
        }

        Commands::Memory { command } => match command {
            MemoryCommands::List { limit, kind } => {
                let mut query = vec![("limit", limit.to_string())];
                if let Some(kind) = kind {
                    query.push(("kind", kind));
                }
                let response = client.get("/api/memory", &query).await?;
                ensure_success(&response)?;

                let entries: Vec<MemoryEntry> =
                    serde_json::from_value(response["entries"].clone())
                        .context("Unexpected response shape")?;
                if entries.is_empty() {
                    println!("{}", "No memory entries".yellow());
                } else {
                    let rows: Vec<MemoryRow> = entries.into_iter().map(MemoryRow::from).collect();
                    println!("{}", Table::new(rows));
                }
            }

            MemoryCommands::Record { kind, content } => {
                let response = client
                    .post("/api/memory", json!({ "kind": kind, "content": content }))
                    .await?;
                ensure_success(&response)?;
                let id = response["entry"]["id"].as_str().unwrap_or("?");
                println!("{}", format!("✓ Recorded {} entry {}", kind, id).green().bold());
            }
        },
    }

    Ok(())
}
