use clap::{Args, Subcommand};
use till_app::domain::companies::{data::NewStore, records::CompanyId};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoreSubcommand {
    Create(CreateStoreArgs),
}

#[derive(Debug, Args)]
struct CreateStoreArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Owning company id
    #[arg(long)]
    company: i64,

    /// Store display name
    #[arg(long)]
    name: String,
}

pub(crate) async fn run(command: StoreCommand) -> Result<(), String> {
    match command.command {
        StoreSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateStoreArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let store = context
        .companies
        .create_store(NewStore {
            company: CompanyId::from_i64(args.company),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create store: {error}"))?;

    println!("store_id: {}", store.id);
    println!("company_id: {}", store.company_id);
    println!("store_name: {}", store.name);

    Ok(())
}
