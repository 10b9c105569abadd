use clap::{Args, Subcommand};
use till_app::domain::companies::data::NewCompany;

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CompanyCommand {
    #[command(subcommand)]
    command: CompanySubcommand,
}

#[derive(Debug, Subcommand)]
enum CompanySubcommand {
    Create(CreateCompanyArgs),
}

#[derive(Debug, Args)]
struct CreateCompanyArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Company display name
    #[arg(long)]
    name: String,
}

pub(crate) async fn run(command: CompanyCommand) -> Result<(), String> {
    match command.command {
        CompanySubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateCompanyArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let context = args.database.context().await?;

    let company = context
        .companies
        .create_company(NewCompany { name: args.name })
        .await
        .map_err(|error| format!("failed to create company: {error}"))?;

    println!("company_id: {}", company.id);
    println!("company_name: {}", company.name);

    Ok(())
}
