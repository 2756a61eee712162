//! Reelview - command line client for the Reelview backend.
//!
//! Run with: `reelview <command>`
//!
//! This is a CLI for people, so `println!` and `eprintln!` are used for
//! user-facing output; diagnostics go through `tracing` on stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, bail, Context};
use reelview_core::SessionPhase;
use reelview_infra::{config, InMemoryNavigator};
use reelview_lib::utils::logging::{init_tracing, log_command_execution};
use reelview_lib::AppContext;

#[tokio::main]
async fn main() -> ExitCode {
    // Before the subscriber, so RUST_LOG from .env applies.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let args: Vec<String> = env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        Some("status") => run_status(args.get(1).map(String::as_str)).await,
        Some("login") => run_login(&args[1..]).await,
        Some("google-url") => run_google_url().await,
        Some("logout") => run_logout().await,
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown command"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Reelview");
    println!();
    println!("USAGE:");
    println!("    reelview <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    status [LOCATION]         Restore the session and show who is signed in");
    println!("                              (LOCATION may carry an OAuth ?access= token)");
    println!("    login <EMAIL> <PASSWORD>  Sign in with email and password");
    println!("    google-url                Print the Google sign-in URL");
    println!("    logout                    Sign out");
    println!("    help                      Show this help message");
    println!();
    println!("Configuration comes from REELVIEW_* variables (or .env), else config.{{json,toml}}.");
}

/// Context whose navigator starts at `location`, or the configured home path.
fn context(location: Option<&str>) -> anyhow::Result<(AppContext, Arc<InMemoryNavigator>)> {
    let config = config::load().context("failed to load configuration")?;
    let start = location.map_or_else(|| config.routes.home_path.clone(), str::to_string);

    let navigator = Arc::new(InMemoryNavigator::new(start));
    let ctx = AppContext::new(config, navigator.clone())?;
    Ok((ctx, navigator))
}

async fn run_status(location: Option<&str>) -> anyhow::Result<()> {
    let started = Instant::now();
    let (ctx, navigator) = context(location)?;

    let snapshot = ctx.start().await;
    log_command_execution("status", started.elapsed(), None);

    match (snapshot.phase(), snapshot.user) {
        (SessionPhase::Authenticated, Some(user)) => println!(
            "Signed in as {} <{}> ({})",
            user.display_name(),
            user.email,
            user.role_label()
        ),
        _ => println!("Not signed in"),
    }

    if let Some(location) = navigator.replaced().last() {
        println!("Location is now {location}");
    }
    Ok(())
}

async fn run_login(args: &[String]) -> anyhow::Result<()> {
    let [email, password] = args else {
        bail!("usage: reelview login <EMAIL> <PASSWORD>");
    };

    let started = Instant::now();
    let (ctx, _) = context(None)?;

    let result = ctx.sign_in(email, password).await;
    log_command_execution("login", started.elapsed(), result.as_ref().err());

    let user = result.map_err(|e| anyhow!("{}", e.message()))?;
    println!("Welcome, {}!", user.display_name());
    Ok(())
}

async fn run_google_url() -> anyhow::Result<()> {
    let started = Instant::now();
    let (ctx, _) = context(None)?;

    let result = ctx.google_login_url().await;
    log_command_execution("google-url", started.elapsed(), result.as_ref().err());

    println!("{}", result.context("Google sign-in is unavailable")?);
    Ok(())
}

async fn run_logout() -> anyhow::Result<()> {
    let started = Instant::now();
    let (ctx, navigator) = context(None)?;

    ctx.start().await;
    ctx.sign_out().await;
    log_command_execution("logout", started.elapsed(), None);

    println!("Signed out");
    if let Some(target) = navigator.redirects().last() {
        println!("Continue at {target}");
    }
    Ok(())
}
