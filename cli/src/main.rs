mod shell;

use std::sync::Arc;

use arcfunmi::app::{App, AuthOutcome, SubmitError};
use arcfunmi::backend::memory::MemoryBackend;
use arcfunmi::backend::rest::RestBackend;
use arcfunmi::backend::{AuthError, Backend};
use arcfunmi::config::{BackendConfig, ConfigError, DEFAULT_FEED_PAGE_SIZE, Timeouts};
use arcfunmi::feed::{Category, FeedTab, ParseSelectionError};
use arcfunmi::forms::{AuthForm, ContactForm, FieldErrors};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Submit(#[from] SubmitError),
    #[error("invalid input: {0}")]
    Invalid(#[from] FieldErrors),
    #[error("invalid selection: {0}")]
    Selection(#[from] ParseSelectionError),
    #[error("signed out locally, but the backend sign-out failed: {0}")]
    SignOut(AuthError),
    #[error("account created; confirm your email before signing in")]
    ConfirmationRequired,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "arcfunmi", about = "Arcfunmi community client")]
struct Cli {
    /// Use the built-in demo backend instead of the hosted service.
    #[arg(long)]
    demo: bool,

    #[arg(long, env = "ARCFUNMI_BACKEND_URL", hide_env_values = true)]
    backend_url: Option<String>,

    #[arg(long, env = "ARCFUNMI_BACKEND_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one route for a signed-out visitor.
    Open { path: String },
    /// Sign in and render the dashboard.
    Dashboard {
        #[arg(long, env = "ARCFUNMI_EMAIL")]
        email: String,
        #[arg(long, env = "ARCFUNMI_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "feed")]
        tab: FeedTab,
        #[arg(long, default_value = "All")]
        category: Category,
    },
    /// Send the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Interactive session: login, browse, logout.
    Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_app(cli: &Cli) -> Result<App, CliError> {
    if cli.demo {
        tracing::info!("using demo backend");
        let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::demo());
        return Ok(App::new(backend, Timeouts::default().request(), DEFAULT_FEED_PAGE_SIZE));
    }

    let config = match (&cli.backend_url, &cli.anon_key) {
        (Some(url), Some(key)) => BackendConfig::new(url.clone(), key.clone())?,
        _ => BackendConfig::from_env()?,
    };
    let timeout = config.timeouts.request();
    let page_size = config.feed_page_size;
    let backend: Arc<dyn Backend> = Arc::new(RestBackend::new(config)?);
    Ok(App::new(backend, timeout, page_size))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let mut app = build_app(&cli)?;

    match cli.command {
        Command::Open { path } => {
            print!("{}", app.open(&path).await);
            Ok(())
        }
        Command::Dashboard { email, password, tab, category } => {
            run_dashboard(&mut app, AuthForm::login(email, password), tab, category).await
        }
        Command::Contact { name, email, subject, message } => {
            app.submit_contact(&ContactForm { name, email, subject, message })?;
            println!("Thanks for reaching out. We'll get back to you soon.");
            Ok(())
        }
        Command::Shell => shell::run(&mut app).await,
    }
}

async fn run_dashboard(app: &mut App, form: AuthForm, tab: FeedTab, category: Category) -> Result<(), CliError> {
    app.set_feed_selection(tab, category);
    match app.submit_auth(&form).await? {
        AuthOutcome::SignedIn(page) => {
            print!("{page}");
            Ok(())
        }
        AuthOutcome::ConfirmationRequired => Err(CliError::ConfirmationRequired),
    }
}
