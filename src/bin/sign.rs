//! Signature debugging tool for the partner API.
//!
//! Prints the signed date, canonical message and `Authorization` header for
//! a request, so a signature can be compared against what the partner
//! expects without sending anything.
//!
//! # Usage
//!
//! ```bash
//! # Sign a search call now
//! cargo run --bin sign -- --path /v2/providers/affiliate_open_api/apis/openapi/products/search \
//!     --query "keyword=laptop&limit=2"
//!
//! # Reproduce a signature at a fixed time with the four-digit year format
//! cargo run --bin sign -- --method POST \
//!     --path /v2/providers/affiliate_open_api/apis/openapi/v1/deeplink \
//!     --at 2025-01-17T12:34:56Z --date-format full
//! ```
//!
//! # Environment Variables
//!
//! - `COUPANG_ACCESS_KEY`, `COUPANG_SECRET_KEY`: used when the flags are omitted

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use partners_gateway::domain::entities::Credentials;
use partners_gateway::infrastructure::upstream::signer::canonical_message;
use partners_gateway::infrastructure::upstream::{FixedClock, SignedDateFormat, Signer};

/// Signs a partner API request and shows every intermediate value.
#[derive(Parser)]
#[command(name = "sign")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HTTP method
    #[arg(long, default_value = "GET")]
    method: String,

    /// Request path, without query
    #[arg(long)]
    path: String,

    /// Query string exactly as sent, without the leading '?'
    #[arg(long)]
    query: Option<String>,

    /// Signing time in RFC 3339 (default: now)
    #[arg(long)]
    at: Option<String>,

    /// Signed date format: short or full
    #[arg(long, default_value = "short")]
    date_format: String,

    #[arg(long, env = "COUPANG_ACCESS_KEY", hide_env_values = true)]
    access_key: String,

    #[arg(long, env = "COUPANG_SECRET_KEY", hide_env_values = true)]
    secret_key: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let format: SignedDateFormat = cli
        .date_format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("Invalid --date-format")?;

    let at: DateTime<Utc> = match &cli.at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --at timestamp '{raw}'"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let credentials = Credentials::new(cli.access_key, cli.secret_key);
    let method = cli.method.to_ascii_uppercase();
    let query = cli.query.as_deref().filter(|q| !q.is_empty());

    let signer = Signer::with_clock(format, Arc::new(FixedClock(at)));
    let credential = signer.sign(&method, &cli.path, query, &credentials);
    let message = canonical_message(&credential.signed_date, &method, &cli.path, query);

    println!("{}", "Partner API signature".bold().underline());
    println!();
    println!("{:<16} {}", "Access key:".bold(), credentials.masked_access_key());
    println!("{:<16} {}", "Signed date:".bold(), credential.signed_date.cyan());
    println!("{:<16} {}", "Message:".bold(), message.yellow());
    println!();
    println!("{}", "Authorization:".bold());
    println!("{}", credential.authorization.green());

    Ok(())
}
