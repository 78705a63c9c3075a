//! staffdesk - an interactive admin shell for the employee management service.
//!
//! Logs an admin in, then reads commands from stdin to list, view, add and
//! delete employees through `staffdesk_core::ApiClient`.

mod shell;

use std::io::{self, Write};

use anyhow::Result;
use staffdesk_core::{ApiClient, Config};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shell::Command;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Read one line from stdin. Returns `None` at end of input.
fn read_line() -> Result<Option<String>> {
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    read_line()
}

/// Prompt until a login succeeds. Returns the new token, or `None` if input ends.
async fn login_interactive(client: &ApiClient, config: &mut Config) -> Result<Option<String>> {
    loop {
        let label = match config.last_identifier {
            Some(ref last) => format!("Admin identifier [{}]: ", last),
            None => "Admin identifier: ".to_string(),
        };
        let Some(input) = prompt(&label)? else {
            return Ok(None);
        };
        let identifier = match (input.is_empty(), config.last_identifier.as_ref()) {
            (true, Some(last)) => last.clone(),
            _ => input,
        };
        let secret = rpassword::prompt_password("Secret: ")?;

        match client.login(&identifier, &secret).await {
            Ok(token) => {
                println!("Logged in as {}", identifier);
                config.last_identifier = Some(identifier);
                if let Err(e) = config.save() {
                    warn!("Failed to save config: {:#}", e);
                }
                return Ok(Some(token));
            }
            Err(e) => println!("{}", e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("staffdesk starting");

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {:#}", e);
        Config::default()
    });

    let client = ApiClient::new()?;

    let Some(mut token) = login_interactive(&client, &mut config).await? else {
        return Ok(());
    };
    println!("{}", shell::HELP);

    loop {
        let Some(line) = prompt("staffdesk> ")? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Login => {
                if let Some(new_token) = login_interactive(&client, &mut config).await? {
                    token = new_token;
                }
            }
            other => println!("{}", shell::execute(&client, &token, &other).await),
        }
    }

    info!("staffdesk shutting down");
    Ok(())
}
