//! Offline token issuance.
//!
//! Tokens are minted out of band by an operator holding the private key and
//! handed to administrators; the API server itself only ever verifies.

use anyhow::Context;
use chrono::Duration;
use clap::Parser;
use hive_core::HiveConfig;
use hive_token::{load_private_key, TokenIssuer};

#[derive(Parser)]
#[command(name = "hive-sign", about = "Issue a signed access token for an administrator")]
struct Args {
    /// Administrator id stamped as the token subject.
    subject: String,

    /// Permission label to embed. Repeatable.
    #[arg(short, long = "permission")]
    permissions: Vec<String>,

    /// Override the configured token lifetime, in days.
    #[arg(long)]
    ttl_days: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = HiveConfig::load_from_env()?;

    let key_path = config
        .jwt
        .private_key
        .as_ref()
        .context("jwt.private_key is not configured; this deployment is verify-only")?;
    let key = load_private_key(key_path)?;
    let issuer = TokenIssuer::new(Some(key), config.jwt.issuer.as_str());

    let ttl = Duration::days(args.ttl_days.unwrap_or(config.jwt.ttl_days));
    let token = issuer.issue(&args.subject, &args.permissions, ttl)?;

    println!("{token}");
    Ok(())
}
