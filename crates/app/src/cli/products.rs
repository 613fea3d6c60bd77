use clap::{Args, Subcommand};
use storefront::{
    categories::ALL_CATEGORY,
    filter::CatalogFilter,
    pricing::format_kwanza,
    products::{Product, ProductId},
};
use storefront_app::{catalog::ProductForm, context::AppContext};

use crate::cli::{AdminArgs, ensure_catalog, login, report, table};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products, optionally filtered
    List(ListProductsArgs),

    /// Create a product, or update one with --id
    Save(SaveProductArgs),

    /// Delete a product
    Delete(DeleteProductArgs),
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    /// Only products in this category
    #[arg(long, default_value = ALL_CATEGORY)]
    category: String,

    /// Text to look for in names and descriptions
    #[arg(long, default_value = "")]
    query: String,
}

#[derive(Debug, Args)]
struct SaveProductArgs {
    #[command(flatten)]
    admin: AdminArgs,

    /// Product id to update; a new product is created when omitted
    #[arg(long)]
    id: Option<u64>,

    /// Product name
    #[arg(long)]
    name: String,

    /// Price in Kwanza
    #[arg(long)]
    price: u64,

    /// Category name
    #[arg(long)]
    category: String,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Image URI
    #[arg(long)]
    image: Option<String>,

    /// Show the "new" badge
    #[arg(long = "new")]
    is_new: bool,

    /// Mark as sold out
    #[arg(long)]
    sold_out: bool,
}

#[derive(Debug, Args)]
struct DeleteProductArgs {
    #[command(flatten)]
    admin: AdminArgs,

    /// Product id
    #[arg(long)]
    id: u64,
}

pub(crate) async fn run(context: &AppContext, command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list(context, args).await,
        ProductsSubcommand::Save(args) => save(context, args).await,
        ProductsSubcommand::Delete(args) => delete(context, args).await,
    }
}

async fn list(context: &AppContext, args: ListProductsArgs) -> Result<(), String> {
    ensure_catalog(context).await?;

    let products = context
        .catalog
        .visible_products(&CatalogFilter::new(args.category, args.query))
        .await;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    let rows = products.iter().map(product_row).collect();

    println!("{}", table::render(["Id", "Name", "Category", "Price", "Status"], rows, &[0, 3]));

    Ok(())
}

fn product_row(product: &Product) -> [String; 5] {
    let mut status = Vec::new();

    if product.is_new {
        status.push("Novo");
    }

    if product.sold_out {
        status.push("Esgotado");
    }

    [
        product.id.to_string(),
        product.name.clone(),
        product.category.clone(),
        format_kwanza(product.price),
        status.join(", "),
    ]
}

async fn save(context: &AppContext, args: SaveProductArgs) -> Result<(), String> {
    let session = login(context, &args.admin)?;

    ensure_catalog(context).await?;

    let product = context
        .catalog
        .save_product(
            &session,
            ProductForm {
                id: args.id.map(ProductId::new),
                name: args.name,
                price: args.price,
                category: args.category,
                description: args.description,
                image: args.image,
                is_new: args.is_new,
                sold_out: args.sold_out,
            },
        )
        .await
        .map_err(|error| format!("failed to save product: {}", report(&error)))?;

    println!("product_id: {}", product.id);
    println!("product_name: {}", product.name);

    Ok(())
}

async fn delete(context: &AppContext, args: DeleteProductArgs) -> Result<(), String> {
    let session = login(context, &args.admin)?;

    context
        .catalog
        .delete_product(&session, ProductId::new(args.id))
        .await
        .map_err(|error| format!("failed to delete product: {}", report(&error)))?;

    println!("deleted product {}", args.id);

    Ok(())
}
