use clap::{Args, Subcommand};
use till_app::domain::{
    companies::records::CompanyId,
    products::{data::NewProduct, records::ProductId},
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(CreateProductArgs),
    Delete(DeleteProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    company: i64,

    #[arg(long)]
    sku: String,

    #[arg(long)]
    name: String,

    /// Purchase price in the smallest currency unit
    #[arg(long, default_value_t = 0)]
    purchase_price: i64,

    /// Sale price in the smallest currency unit
    #[arg(long)]
    sale_price: i64,

    #[arg(long, default_value = "pcs")]
    unit_name: String,
}

#[derive(Debug, Args)]
struct DeleteProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    company: i64,

    #[arg(long)]
    product: i64,
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create(args).await,
        ProductSubcommand::Delete(args) => delete(args).await,
    }
}

async fn create(args: CreateProductArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let product = context
        .products
        .create_product(NewProduct {
            company: CompanyId::from_i64(args.company),
            sku: args.sku,
            name: args.name,
            purchase_price: args.purchase_price,
            sale_price: args.sale_price,
            unit_name: args.unit_name,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("sku: {}", product.sku);
    println!("sale_price: {}", product.sale_price);

    Ok(())
}

async fn delete(args: DeleteProductArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    context
        .products
        .delete_product(
            CompanyId::from_i64(args.company),
            ProductId::from_i64(args.product),
        )
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    println!("deleted product {}", args.product);

    Ok(())
}
