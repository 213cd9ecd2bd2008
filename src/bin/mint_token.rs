//! Issue a session token for local development.
//!
//! Usage: `cargo run --bin mint_token -- <email> [ROLE ...]`
//!
//! Requires `JWT_SECRET` (reads .env). Roles default to `ADMIN`.

use foodiehub_admin::models::user::{parse_roles, UserRole};
use foodiehub_admin::services::auth::issue_token;

/// Dev tokens last a day.
const EXPIRY_SECS: i64 = 24 * 60 * 60;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let secret = std::env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

    let mut args = std::env::args().skip(1);
    let email = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: mint_token <email> [ROLE ...]"))?;
    let names: Vec<String> = args.collect();
    let roles = if names.is_empty() {
        vec![UserRole::Admin]
    } else {
        parse_roles(&names)
    };

    let token = issue_token(&email, None, &roles, &secret, EXPIRY_SECS)?;
    println!("{token}");

    Ok(())
}
