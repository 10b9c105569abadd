use clap::{Args, Subcommand};
use till_app::domain::{
    companies::records::{CompanyId, StoreId},
    users::{data::NewUser, records::UserId},
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
    AssignStore(AssignStoreArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Company the user works for
    #[arg(long)]
    company: i64,

    #[arg(long)]
    full_name: String,

    /// Login email, unique across companies
    #[arg(long)]
    email: String,
}

#[derive(Debug, Args)]
struct AssignStoreArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    user: i64,

    /// Store in the user's company
    #[arg(long)]
    store: i64,
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create(args).await,
        UserSubcommand::AssignStore(args) => assign_store(args).await,
    }
}

async fn create(args: CreateUserArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let user = context
        .users
        .create_user(NewUser {
            company: CompanyId::from_i64(args.company),
            full_name: args.full_name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("company_id: {}", user.company_id);
    println!("email: {}", user.email);

    Ok(())
}

async fn assign_store(args: AssignStoreArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    context
        .users
        .assign_store(UserId::from_i64(args.user), StoreId::from_i64(args.store))
        .await
        .map_err(|error| format!("failed to assign store: {error}"))?;

    println!("user_id: {}", args.user);
    println!("store_id: {}", args.store);

    Ok(())
}
