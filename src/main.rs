// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agastya Reports CLI
//!
//! Command-line front end for the report generation service: log in with an
//! organizational email and a one-time code, upload assessment files,
//! request generated reports and list past activity.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agastya_reports::{
    config::Config,
    error::{AppError, Result},
    models::{AssessmentKind, FilterSelection},
    services::history,
    App,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in with an organizational email (prompts for the one-time code)
    Login { email: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Upload an assessment file
    Upload { kind: KindArg, path: PathBuf },
    /// Request report generation for previously uploaded data
    Report {
        kind: KindArg,
        /// Filter selection, repeatable: --filter state=KA,TN
        #[arg(long = "filter", value_name = "NAME=V1,V2")]
        filters: Vec<String>,
    },
    /// List past uploads and generated reports
    History,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Daily,
    Impact,
}

impl From<KindArg> for AssessmentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Daily => AssessmentKind::Daily,
            KindArg::Impact => AssessmentKind::Impact,
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(config);

    if let Err(e) = run(&mut app, cli.command).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Login { email } => {
            let mut flow = app.login_flow();
            flow.request_code(&email).await?;
            println!("A verification code was sent to {}.", email);

            let otp = prompt("Code: ")?;
            let profile = flow.verify_code(&otp).await?;
            let session = app.establish(profile)?;
            println!(
                "Logged in as {} <{}>",
                session.user.name, session.user.email
            );
        }
        Command::Logout => {
            app.logout()?;
            println!("Logged out.");
        }
        Command::Whoami => match app.session() {
            Some(session) => {
                println!("{} <{}>", session.user.name, session.user.email);
                println!("user id:      {}", session.user.user_id);
                println!("member since: {}", session.user.member_since);
            }
            None => println!("Not logged in."),
        },
        Command::Upload { kind, path } => {
            let bytes = std::fs::read(&path)
                .map_err(|e| AppError::Validation(format!("cannot read {}: {}", path.display(), e)))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload.bin");

            let file_id = app.upload(kind.into(), file_name, bytes).await?;
            println!("Uploaded {} (file id {})", file_name, file_id);
        }
        Command::Report { kind, filters } => {
            let filters = parse_filters(&filters)?;
            let report_id = app.report(kind.into(), filters).await?;
            println!("Report requested (report id {})", report_id);
        }
        Command::History => match app.history().await {
            Ok(records) => println!("{}", history::render_table(&records)),
            Err(e) if e.is_local_rejection() => return Err(e),
            Err(e) => println!("{}", history::render_fetch_error(&e)),
        },
    }

    Ok(())
}

/// Parse repeated `--filter name=v1,v2` arguments into a selection.
fn parse_filters(args: &[String]) -> Result<FilterSelection> {
    let mut filters = FilterSelection::new();
    for arg in args {
        let (name, values) = arg.split_once('=').ok_or_else(|| {
            AppError::Validation(format!("filter '{}' must look like name=v1,v2", arg))
        })?;
        if name.is_empty() {
            return Err(AppError::Validation(format!(
                "filter '{}' has an empty name",
                arg
            )));
        }
        let values: Vec<String> = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        filters.set(name.trim(), values);
    }
    Ok(filters)
}

/// Read one line from stdin after printing a prompt.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stdout flush failed: {}", e)))?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stdin read failed: {}", e)))?;
    Ok(line.trim().to_string())
}

/// Initialize logging to stderr; `RUST_LOG` overrides the defaults.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agastya_reports=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
