use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod terminal;

use appointment_cell::TurnosPage;
use shared_config::AppConfig;
use shared_models::auth::{Session, UserIdentity};
use shared_models::ui::Route;
use shared_utils::loader::LoadOutcome;
use shared_utils::session::SessionContext;
use specialty_cell::{CatalogBody, SpecialtiesPage};
use terminal::{TerminalNavigator, TerminalNotifier};

/// turnos
///
/// Browse medical specialties, see each doctor's open schedule and book an
/// appointment against the clinic backend.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the specialty catalog.
    #[clap(alias("s"))]
    Specialties,
    /// Doctors of a specialty, optionally with one doctor's schedule.
    #[clap(alias("d"))]
    Doctors {
        /// Specialty name, plain or URL-encoded.
        especialidad: String,
        #[arg(long)]
        doctor: Option<i64>,
    },
    /// Book one slot of a doctor.
    #[clap(alias("b"))]
    Book {
        especialidad: String,
        #[arg(long)]
        doctor: i64,
        #[arg(long)]
        slot: i64,
    },
    /// Manage the stored login.
    #[clap(subcommand)]
    Session(SessionCommand),
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    /// Store a user and bearer token.
    Set {
        #[arg(long)]
        user: String,
        #[arg(long, env = "TURNOS_TOKEN")]
        token: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        id: Option<i64>,
    },
    /// Remove the stored login.
    Clear,
    /// Print the stored login, without the token.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Logs go to stderr so that stdout only carries page output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let session = SessionContext::from_config(&config);

    info!("Using backend {}", config.api_url);
    run_command(cli.command, &config, session).await
}

async fn run_command(command: Command, config: &AppConfig, session: SessionContext) -> anyhow::Result<()> {
    let navigator = Arc::new(TerminalNavigator::default());
    let notifier = Arc::new(TerminalNotifier);

    match command {
        Command::Specialties => {
            let page = SpecialtiesPage::new(config, session, navigator);
            page.load().await;

            let view = page.view();
            print!("{}", render::specialties(&view));
            if matches!(view.body, CatalogBody::Retry { .. }) {
                anyhow::bail!("could not load specialties from {}", config.api_url);
            }
        }
        Command::Doctors { especialidad, doctor } => {
            let page = TurnosPage::new(config, &especialidad, session, navigator, notifier);
            page.mount().await;
            if let Some(doctor_id) = doctor {
                if page.select_doctor(doctor_id).await == LoadOutcome::Rejected {
                    println!("El doctor #{} no atiende {}", doctor_id, page.specialty());
                }
            }

            print!("{}", render::turnos(&page.view()));
        }
        Command::Book {
            especialidad,
            doctor,
            slot,
        } => {
            let page = TurnosPage::new(config, &especialidad, session, navigator.clone(), notifier);
            page.mount().await;
            if page.select_doctor(doctor).await == LoadOutcome::Rejected {
                print!("{}", render::turnos(&page.view()));
                anyhow::bail!("doctor #{} is not listed for {}", doctor, page.specialty());
            }

            let result = page.book(slot).await;
            print!("{}", render::turnos(&page.view()));
            if navigator.last() == Some(Route::Login) {
                println!("Inicia sesión con: turnos session set --user <nombre> --token <token>");
            }

            let confirmation = result.context("booking was not completed")?;
            println!("{}", serde_json::to_string_pretty(&confirmation.body)?);
        }
        Command::Session(command) => run_session_command(command, &session)?,
    }

    Ok(())
}

fn run_session_command(command: SessionCommand, session: &SessionContext) -> anyhow::Result<()> {
    match command {
        SessionCommand::Set {
            user,
            token,
            email,
            id,
        } => {
            let stored = Session::new(
                UserIdentity {
                    id,
                    name: Some(user),
                    email,
                },
                token,
            );
            if stored.bearer_token().is_none() {
                warn!("Storing a session with an empty token; booking will still ask for login");
            }
            session.login(&stored).context("failed to store session")?;
            println!("Sesión iniciada como {}", stored.display_name());
        }
        SessionCommand::Clear => {
            session.logout().context("failed to clear session")?;
            println!("Sesión cerrada");
        }
        SessionCommand::Show => match session.current() {
            Some(current) => {
                println!("Usuario: {}", current.display_name());
                if let Some(email) = &current.user.email {
                    println!("Email: {}", email);
                }
                let token = if current.bearer_token().is_some() { "presente" } else { "ausente" };
                println!("Token: {}", token);
            }
            None if session.has_stored_session() => println!("La sesión guardada no es válida"),
            None => println!("Sin sesión"),
        },
    }

    Ok(())
}
