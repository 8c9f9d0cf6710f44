use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use interview_gate::access::{PremiumGate, RoleGuard};
use interview_gate::app_log;
use interview_gate::core::ConfigManager;
use interview_gate::credentials::{ChainedCredentials, TokenStore};
use interview_gate::gate::{ConsoleNotifier, GateOutcome, InterviewGate, SystemBrowserLauncher};
use interview_gate::logging::init_logging;
use interview_gate::remediation::RemediationDialog;
use interview_gate::session::SessionState;
use interview_gate::types::{JobPosting, UserType};
use interview_gate::utils::read_json_file;
use interview_gate::{InterviewValidator, ValidationResult};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "interview-gate", about = "Check interview requirements and open interviews")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// Session file with `user` and `accessToken` (overrides the configured one)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full requirement validation against the backend
    Check {
        /// Print the raw validation result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate from local session data only (DISC stays unknown)
    Quick,
    /// Validate and open the interview for a job
    Start {
        /// JSON file with the job record
        #[arg(long)]
        job: PathBuf,
        /// Application the interview belongs to
        #[arg(long)]
        application_id: Option<String>,
        /// Keep running until the interview window closes
        #[arg(long)]
        wait: bool,
    },
    /// Show whether the session user may use a feature
    Access {
        #[arg(long)]
        feature: String,
    },
    /// Show where a role-restricted route would send the session user
    Guard {
        #[arg(long, value_delimiter = ',')]
        roles: Vec<UserType>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = ConfigManager::load_from(&cli.config)?;
    if let Some(path) = cli.session {
        config.storage.session_path = Some(path);
    }

    let session = match &config.storage.session_path {
        Some(path) => SessionState::load(path).await?,
        None => SessionState::anonymous(),
    };
    app_log!(
        info,
        "Environment: {}, backend: {}, authenticated: {}",
        config.environment,
        config.backend.api_url,
        session.is_authenticated()
    );

    match cli.command {
        Commands::Check { json } => {
            let validator = build_validator(&config, &session).await?;
            let result = validator
                .validate_interview_requirements(session.user())
                .await;
            if json {
                print_json(&result)?;
            } else {
                print_result(&result);
            }
        }
        Commands::Quick => {
            print_json(&InterviewValidator::quick_validation(session.user()))?;
        }
        Commands::Start {
            job,
            application_id,
            wait,
        } => {
            let job: JobPosting = read_json_file(&job).await?;
            let validator = Arc::new(build_validator(&config, &session).await?);
            let gate = InterviewGate::from_config(
                &config,
                validator,
                Arc::new(SystemBrowserLauncher::new(config.gate.browser_command.clone())),
                Arc::new(ConsoleNotifier),
            )?;

            let on_complete: Option<Box<dyn FnOnce() + Send>> = if wait {
                Some(Box::new(|| println!("✓ Interview window closed")))
            } else {
                None
            };

            match gate
                .trigger(session.user(), &job, application_id.as_deref(), on_complete)
                .await
            {
                GateOutcome::Blocked(dialog) => print_dialog(&dialog),
                GateOutcome::Opened { url, monitor } => {
                    println!("✓ Interview opened: {}", url);
                    if let Some(monitor) = monitor {
                        println!("👀 Waiting for the interview window to close...");
                        monitor.await.context("Interview monitor stopped")?;
                    }
                }
                GateOutcome::Navigated { url } => {
                    app_log!(info, "Interview shown in current context: {}", url);
                }
                GateOutcome::Failed(message) => anyhow::bail!(message),
            }
        }
        Commands::Access { feature } => {
            let feature = feature.parse()?;
            print_json(&PremiumGate::new(feature).decide(session.user()))?;
        }
        Commands::Guard { roles } => {
            println!("{:?}", RoleGuard::new(roles).decide(&session));
        }
    }

    Ok(())
}

async fn build_validator(
    config: &ConfigManager,
    session: &SessionState,
) -> Result<InterviewValidator> {
    let store = match &config.storage.token_store_path {
        Some(path) => Some(TokenStore::load(path).await),
        None => None,
    };
    let credentials = ChainedCredentials::session_then_store(session.clone(), store.as_ref());
    InterviewValidator::from_config(config, Arc::new(credentials))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn print_result(result: &ValidationResult) {
    if result.is_valid() {
        println!("✓ All interview requirements met");
    } else {
        print_dialog(&RemediationDialog::opened_with(result.clone(), false));
    }
}

fn print_dialog(dialog: &RemediationDialog) {
    let (title, subtitle) = dialog.headline();
    let progress = dialog.progress();

    println!("{}", title);
    println!("  {}", subtitle);
    println!("  {}/{} completos", progress.completed, progress.total);

    for item in dialog.items() {
        let mark = match item.status {
            Some(true) => "✓",
            Some(false) => "✗",
            None => "?",
        };
        match item.action {
            Some(action) => println!("  {} {} → {} ({})", mark, item.title, action.label, action.route),
            None => println!("  {} {}", mark, item.title),
        }
    }

    if let Some(result) = dialog.result() {
        if !result.is_valid() {
            println!("Requisitos Pendentes:");
            for missing in result.missing_requirements() {
                println!("  - {}", missing);
            }
        }
    }
}
