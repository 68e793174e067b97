mod commands;

use mystara_client::core::{AppError, AppState, ClientConfig};
use mystara_client::market::MarketClient;
use mystara_client::session::FileSessionStore;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn usage() -> &'static str {
    r#"Usage:
    mystara login <buyer|seller> <EMAIL> <PASSWORD>
    mystara register <buyer|seller> <EMAIL> <PASSWORD> <NAME> [--phone P] [--address A] [--business-name B]
    mystara logout
    mystara whoami

    mystara themes list | get <ID> | delete <ID>
    mystara themes create <NAME> [--description D] [--category C]
    mystara themes update <ID> <NAME> [--description D] [--category C]

    mystara products list [--theme <THEME_ID>] [--mine] | get <ID> | delete <ID>
    mystara products create <JSON>
    mystara products update <ID> <JSON>
    mystara products stock <ID> <STOCK>

    mystara requests create <PRODUCT_ID> <QUANTITY> [--message M]
    mystara requests mine | pending | approved | cancel <ID>
    mystara requests incoming | approve <ID> | reject <ID> [--reason R]

    mystara cart show | add <REQUEST_ID> | update <PRODUCT_ID> <QUANTITY> | remove <PRODUCT_ID> | clear

    mystara payments checkout | confirm <PAYMENT_ID> <RAZORPAY_PAYMENT_ID> | list | get <ID>

Env:
    MYSTARA_API_BASE_URL (default http://localhost:8089)
    MYSTARA_SESSION_FILE (default .mystara/session.json)
    MYSTARA_CURRENCY     (default INR)
    LOG_FORMAT           (json for structured logs)
    RUST_LOG             (default info)
"#
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env()?;
    init_tracing(config.log_json);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cmd) = args.first().map(String::as_str) else {
        eprintln!("{}", usage());
        std::process::exit(2);
    };
    if matches!(cmd, "help" | "-h" | "--help") {
        println!("{}", usage());
        return Ok(());
    }

    let state = build_state(config)?;
    let rest = &args[1..];

    let result = match cmd {
        "login" => commands::login(&state, rest).await,
        "register" => commands::register(&state, rest).await,
        "logout" => commands::logout(&state),
        "whoami" => commands::whoami(&state),
        "themes" => commands::themes(&state, rest).await,
        "products" => commands::products(&state, rest).await,
        "requests" => commands::requests(&state, rest).await,
        "cart" => commands::cart(&state, rest).await,
        "payments" => commands::payments(&state, rest).await,
        _ => Err(AppError::Usage(format!("Unknown command: {cmd}"))),
    };

    match result {
        Ok(()) => Ok(()),
        Err(AppError::Usage(msg)) => {
            eprintln!("{msg}\n\n{}", usage());
            std::process::exit(2);
        }
        Err(e) => {
            error!(command = cmd, error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn build_state(config: ClientConfig) -> Result<AppState, AppError> {
    let store = FileSessionStore::new(&config.session_file);
    debug!(path = %store.path().display(), base_url = %config.base_url, "client configured");

    let client = MarketClient::new(&config, Arc::new(store))?.with_auth_expired_handler(|| {
        eprintln!("Session expired. Please log in again with `mystara login`.");
    });

    Ok(AppState {
        config: Arc::new(config),
        client,
    })
}

/// Logs go to stderr so stdout stays pure JSON.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
