use clap::Args;
use jiff::{SignedDuration, Timestamp};
use till_app::{auth::PgAuthService, domain::users::records::UserId};

use crate::cli::DatabaseArgs;

const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24 * 90;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User id that should own the token
    #[arg(long)]
    user: i64,

    /// Token expiration timestamp (RFC 3339); defaults to 90 days from now
    #[arg(long)]
    token_expires_at: Option<String>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let expires_at = match args.token_expires_at.as_deref() {
        Some(raw) => raw
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid token-expires-at timestamp: {error}"))?,
        None => Timestamp::now()
            .checked_add(SignedDuration::from_hours(DEFAULT_TOKEN_LIFETIME_HOURS))
            .map_err(|error| format!("invalid token lifetime: {error}"))?,
    };

    if expires_at <= Timestamp::now() {
        return Err("token-expires-at must be in the future".to_string());
    }

    let service = PgAuthService::new(args.database.pool().await?);

    let issued = service
        .issue_api_token(UserId::from_i64(args.user), expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_id: {}", issued.metadata.user_id);
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("token_expires_at: {}", issued.metadata.expires_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
