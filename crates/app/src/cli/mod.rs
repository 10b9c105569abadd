use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use till_app::{context::AppContext, database};

mod company;
mod product;
mod stock;
mod store;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "till-app", about = "Till operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Company(company::CompanyCommand),
    Store(store::StoreCommand),
    User(user::UserCommand),
    Token(token::TokenCommand),
    Product(product::ProductCommand),
    Stock(stock::StockCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Company(command) => company::run(command).await,
            Commands::Store(command) => store::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Stock(command) => stock::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn pool(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }

    pub(crate) async fn context(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
