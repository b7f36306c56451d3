use billed::args::{Args, Command};
use billed::{commands, Config, Mode, Result, Session};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().billed_home().path();

    // This allows for testing the program without a running bills API. When BILLED_IN_TEST_MODE
    // is set and non-zero in length, then the mode will be Mode::Mock, otherwise it will be
    // Mode::Api.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => {
            let mut session = Session::new(init_args.user_type(), init_args.email());
            if let Some(jwt) = init_args.jwt() {
                session = session.with_jwt(jwt);
            }
            commands::init(home, &session, init_args.api_url())
                .await?
                .print()
        }

        Command::Bills => {
            let config = Config::load(home).await?;
            commands::bills(&config, mode).await?.print_page()
        }

        Command::Render(render_args) => {
            let config = Config::load(home).await?;
            commands::render(&config, mode, render_args.route())
                .await?
                .print_page()
        }

        Command::NewBill(new_bill_args) => {
            let config = Config::load(home).await?;
            commands::new_bill(&config, mode, new_bill_args)
                .await?
                .print_page()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
