use clap::{Args, Subcommand};
use till_app::domain::{companies::records::StoreId, products::records::ProductId};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct StockCommand {
    #[command(subcommand)]
    command: StockSubcommand,
}

#[derive(Debug, Subcommand)]
enum StockSubcommand {
    /// Overwrite the available quantity of a product at a store
    Set(SetStockArgs),
}

#[derive(Debug, Args)]
struct SetStockArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    store: i64,

    #[arg(long)]
    product: i64,

    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(command: StockCommand) -> Result<(), String> {
    match command.command {
        StockSubcommand::Set(args) => set(args).await,
    }
}

async fn set(args: SetStockArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let record = context
        .stock
        .set_quantity(
            StoreId::from_i64(args.store),
            ProductId::from_i64(args.product),
            args.quantity,
        )
        .await
        .map_err(|error| format!("failed to set stock: {error}"))?;

    println!("store_id: {}", record.store_id);
    println!("product_id: {}", record.product_id);
    println!("quantity: {}", record.quantity);

    Ok(())
}
