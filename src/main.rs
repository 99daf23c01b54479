//! Prosel CLI
//!
//! Terminal front-end for the hospital dashboard:
//! - Sign in, sign up, sign out
//! - List, add, update and remove patients, transport requests, trackings
//!   and incidents
//! - Print a default configuration file
//!
//! Panel commands run behind the same session guard as the browser
//! dashboard. The signed-in user is kept in a JSON file.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prosel::auth::{sign_out, submit_sign_in, submit_sign_up, Level, SignInForm, SignUpForm, Submission};
use prosel::client::HttpClient;
use prosel::config::{generate_default_config, Config, LoggingConfig};
use prosel::model::{Incident, Patient, Priority, RequestStatus, Tracking, TrackingStatus, TransportRequest};
use prosel::panel::{Filter, ListPanel, Mutation, Resource};
use prosel::session::{FileStore, Guard, Profile, Session};
use prosel::shell::PanelKind;

#[derive(Parser)]
#[command(name = "prosel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hospital operations dashboard")]
#[command(long_about = "Prosel manages patient priorities, transport scheduling,\npatient tracking and incident logging against the hospital REST API.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the user
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Register a new account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Forget the signed-in user
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Gestão de Prioridades
    Patients {
        #[command(subcommand)]
        action: PatientAction,
    },

    /// Agendamento de Transporte
    Requests {
        #[command(subcommand)]
        action: RequestAction,
    },

    /// Rastreamento de Pacientes
    Trackings {
        #[command(subcommand)]
        action: TrackingAction,
    },

    /// Registro de Incidentes
    Incidents {
        #[command(subcommand)]
        action: IncidentAction,
    },
}

#[derive(Subcommand)]
pub enum PatientAction {
    /// List patients
    List {
        /// Priority to show (Baixa, Média, Alta) or "Todos"
        #[arg(long)]
        filter: Option<Filter<Priority>>,
    },
    /// Add a patient
    Add {
        name: String,
        #[arg(long, default_value = "Baixa")]
        priority: Priority,
    },
    /// Change a patient's priority
    Priority { id: String, priority: Priority },
    /// Remove a patient
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum RequestAction {
    /// List transport requests
    List {
        /// Status to show (Pendente, Aceita, Recusada) or "Todos"
        #[arg(long)]
        filter: Option<Filter<RequestStatus>>,
    },
    /// Schedule a transport
    Add { patient: String },
    /// Accept a pending request
    Accept { id: String },
    /// Reject a pending request
    Reject { id: String },
}

#[derive(Subcommand)]
pub enum TrackingAction {
    /// List trackings
    List {
        #[arg(long)]
        filter: Option<Filter<TrackingStatus>>,
    },
    /// Start tracking a patient
    Add {
        name: String,
        #[arg(long, default_value = "Aguardando transporte")]
        status: TrackingStatus,
    },
    /// Move a tracking to any status
    Status { id: String, status: TrackingStatus },
}

#[derive(Subcommand)]
pub enum IncidentAction {
    /// List incidents
    List,
    /// Log an incident
    Add {
        #[arg(long)]
        description: String,
        /// Who is registering it
        #[arg(long = "by")]
        registered_by: String,
    },
    /// Remove an incident
    Remove { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.logging);

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("prosel={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output stays pipeable
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Table,
    Json,
}

impl std::str::FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            other => bail!("unknown format '{}', expected table or json", other),
        }
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let format: Format = cli.format.parse()?;

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let client = HttpClient::new(config.http_client_config())?;
    let mut session = Session::open(FileStore::new(config.session_path()));

    match cli.command {
        Commands::Signin { email, password } => {
            let form = SignInForm { email, password };
            finish(submit_sign_in(&form, &client, &mut session).await)
        }

        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignUpForm {
                name,
                email,
                password,
                confirm_password,
            };
            finish(submit_sign_up(&form, &client).await)
        }

        Commands::Logout => finish(sign_out(&mut session)),

        Commands::Whoami => {
            let profile = require_profile(&session)?;
            match format {
                Format::Json => println!(
                    "{}",
                    serde_json::json!({
                        "name": profile.name,
                        "email": profile.email,
                        "role": profile.role,
                    })
                ),
                Format::Table => {
                    println!("{}", prosel::shell::Dashboard::greeting(&profile.name));
                    println!("Email: {}", profile.email);
                    println!("Perfil: {}", profile.role);
                }
            }
            Ok(())
        }

        Commands::Patients { action } => {
            require_profile(&session)?;
            let mut panel: ListPanel<Patient> = ListPanel::new();
            match action {
                PatientAction::List { filter } => list(&mut panel, &client, filter, format).await,
                PatientAction::Add { name, priority } => {
                    panel.draft.name = name;
                    panel.draft.priority = priority;
                    report(panel.add(&client).await, "Paciente adicionado")
                }
                PatientAction::Priority { id, priority } => report(
                    panel.set_status(&client, &id, priority).await,
                    "Prioridade atualizada",
                ),
                PatientAction::Remove { id } => {
                    report(panel.remove(&client, &id).await, "Paciente removido")
                }
            }
        }

        Commands::Requests { action } => {
            require_profile(&session)?;
            let mut panel: ListPanel<TransportRequest> = ListPanel::new();
            match action {
                RequestAction::List { filter } => list(&mut panel, &client, filter, format).await,
                RequestAction::Add { patient } => {
                    panel.draft.patient = patient;
                    report(panel.add(&client).await, "Transporte agendado")
                }
                RequestAction::Accept { id } => {
                    decide(&mut panel, &client, &id, RequestStatus::Accepted).await
                }
                RequestAction::Reject { id } => {
                    decide(&mut panel, &client, &id, RequestStatus::Rejected).await
                }
            }
        }

        Commands::Trackings { action } => {
            require_profile(&session)?;
            let mut panel: ListPanel<Tracking> = ListPanel::new();
            match action {
                TrackingAction::List { filter } => list(&mut panel, &client, filter, format).await,
                TrackingAction::Add { name, status } => {
                    panel.draft.name = name;
                    panel.draft.status = status;
                    report(panel.add(&client).await, "Rastreamento adicionado")
                }
                TrackingAction::Status { id, status } => report(
                    panel.set_status(&client, &id, status).await,
                    "Status atualizado",
                ),
            }
        }

        Commands::Incidents { action } => {
            require_profile(&session)?;
            let mut panel: ListPanel<Incident> = ListPanel::new();
            match action {
                IncidentAction::List => list(&mut panel, &client, None, format).await,
                IncidentAction::Add {
                    description,
                    registered_by,
                } => {
                    panel.draft.description = description;
                    panel.draft.registered_by = registered_by;
                    report(panel.add(&client).await, "Incidente registrado")
                }
                IncidentAction::Remove { id } => {
                    report(panel.remove(&client, &id).await, "Incidente removido")
                }
            }
        }

        Commands::Config { .. } => Ok(()),
    }
}

/// Session guard for panel commands
fn require_profile(session: &Session<FileStore>) -> anyhow::Result<Profile> {
    match session.guard() {
        Guard::Allow(profile) => Ok(profile),
        Guard::Redirect(_) => bail!("not signed in, run `prosel signin` first"),
    }
}

/// Print the toast; error toasts become a failing exit code
fn finish(submission: Submission) -> anyhow::Result<()> {
    match submission {
        Submission::Invalid(errors) => bail!("{}", errors),
        Submission::Done { notification, .. } => {
            if notification.level == Level::Error {
                bail!("{}", notification);
            }
            println!("{}", notification);
            Ok(())
        }
    }
}

fn report(mutation: Mutation, done: &str) -> anyhow::Result<()> {
    match mutation {
        Mutation::Applied => {
            println!("{}", done);
            Ok(())
        }
        Mutation::Skipped => bail!("nothing submitted: required fields are empty"),
        Mutation::Failed(e) => Err(e.into()),
    }
}

/// Accept or reject, offered only while the request is pending
async fn decide(
    panel: &mut ListPanel<TransportRequest>,
    client: &HttpClient,
    id: &str,
    status: RequestStatus,
) -> anyhow::Result<()> {
    panel.load(client).await?;
    let request = panel
        .find(id)
        .with_context(|| format!("no transport request with id {}", id))?;
    if !request.status.choices().contains(&status) {
        bail!("request {} is already {}", id, request.status);
    }

    let done = match status {
        RequestStatus::Accepted => "Solicitação aceita",
        _ => "Solicitação recusada",
    };
    report(panel.set_status(client, id, status).await, done)
}

async fn list<R>(
    panel: &mut ListPanel<R>,
    client: &HttpClient,
    filter: Option<Filter<R::Status>>,
    format: Format,
) -> anyhow::Result<()>
where
    R: Resource + Serialize,
{
    panel.load(client).await?;
    if let Some(filter) = filter {
        panel.apply_filter(filter);
    }
    let visible = panel.visible();

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&visible)?),
        Format::Table => {
            if let Some(kind) = panel_kind::<R>() {
                println!("{}", kind.title());
            }
            print_table(&visible);
        }
    }
    Ok(())
}

fn panel_kind<R: Resource>() -> Option<PanelKind> {
    PanelKind::SIDEBAR
        .into_iter()
        .find(|kind| kind.slug() == R::COLLECTION.path())
}

fn print_table<R: Resource>(records: &[&R]) {
    if records.is_empty() {
        println!("Nenhum registro");
        return;
    }

    let rows: Vec<Vec<(&'static str, String)>> = records
        .iter()
        .map(|r| {
            let mut row = vec![("ID", r.id().to_string())];
            row.extend(r.fields());
            row
        })
        .collect();

    let headers: Vec<&str> = rows[0].iter().map(|(label, _)| *label).collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].1.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(headers.clone()));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 3 * (widths.len() - 1)));
    for row in &rows {
        println!("{}", line(row.iter().map(|(_, v)| v.as_str()).collect()));
    }
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}
