/// ModuLock admin - terminal client for the RFID door controller
use anyhow::Context;
use clap::{Parser, Subcommand};
use modulock_admin::AdminController;
use modulock_admin_cli::{
    commands::{self, RegisterArgs},
    config::AdminConfig,
    terminal::{Panels, TerminalView},
};
use std::{io, path::PathBuf, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type StdioView = TerminalView<io::BufReader<io::Stdin>, io::Stdout>;

#[derive(Parser)]
#[command(name = "modulock")]
#[command(version, about = "Admin client for the ModuLock RFID door controller", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Door controller URL, overrides backend.url
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pulse the door relay
    OpenDoor,
    /// List registered users
    Users,
    /// Remove a user by RA
    Remove {
        /// Student/registration number
        ra: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Register a user, waiting for a tag scan unless --uid is given
    Register {
        #[arg(long)]
        ra: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        uid: Option<String>,
        /// Keep enrolling until Ctrl-C or end of input
        #[arg(long)]
        continuous: bool,
    },
    /// Wait for one tag scan and print its UID
    Watch,
    /// Load the dashboard page
    Dashboard,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modulock_admin=info,modulock_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AdminConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = cli.url {
        config.backend.url = url;
    }
    config.validate()?;

    let client = Arc::new(config.client()?);
    info!(url = %config.backend.url, "Using door controller");

    let cancel = CancellationToken::new();
    spawn_ctrl_c_watcher(cancel.clone());

    let controller = |view: StdioView| {
        AdminController::with_poll_interval(
            Arc::clone(&client),
            Arc::new(view),
            config.poll_interval(),
        )
    };

    let result = match cli.command {
        Commands::OpenDoor => {
            commands::open_door(&controller(TerminalView::stdio(Panels::default()))).await
        }
        Commands::Users => {
            commands::list_users(&controller(TerminalView::stdio(Panels::dashboard()))).await
        }
        Commands::Remove { ra, yes } => {
            let view = TerminalView::stdio(Panels::dashboard()).assume_yes(yes);
            commands::remove_user(&controller(view), &ra).await
        }
        Commands::Register {
            ra,
            name,
            uid,
            continuous,
        } => {
            let args = RegisterArgs {
                ra,
                name,
                uid,
                continuous,
            };
            let view = TerminalView::stdio(Panels::registration());
            commands::register(&controller(view), args, &cancel).await
        }
        Commands::Watch => {
            let view = TerminalView::stdio(Panels::registration());
            commands::watch(&controller(view), &cancel).await
        }
        Commands::Dashboard => {
            commands::dashboard(&controller(TerminalView::stdio(Panels::dashboard()))).await
        }
    };

    // An abandoned prompt may still be blocked on stdin; the runtime would
    // wait for it on shutdown.
    if cancel.is_cancelled() {
        std::process::exit(130);
    }
    result
}

/// Ctrl-C cancels the running command, which stops polling on its way out.
fn spawn_ctrl_c_watcher(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping");
            cancel.cancel();
        }
    });
}
