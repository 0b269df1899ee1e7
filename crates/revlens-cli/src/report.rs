//! `report` command: synthesize reports from persisted analyses.

use clap::Subcommand;
use sqlx::PgPool;

use revlens_core::{AppConfig, Catalog, ProductConfig};
use revlens_gemini::GeminiClient;
use revlens_report::{ReportPaths, Reporter};

#[derive(Debug, Subcommand)]
pub enum ReportCommands {
    /// How a brand's products evolved across generations
    Longitudinal {
        /// Brand name as configured in the catalog
        #[arg(long)]
        brand: String,
    },
    /// Head-to-head comparison of selected products
    Comparative {
        /// Report title, also used for the output directory
        #[arg(long)]
        title: String,

        /// Product to include (by catalog name); repeat for each product
        #[arg(long = "product", required = true, num_args = 1..)]
        products: Vec<String>,
    },
    /// Deep dive on a single product from its persisted analyses
    DeepDive {
        /// Product to report on (by catalog name)
        #[arg(long)]
        product: String,
    },
    /// Key buying factors across one catalog category
    Category {
        /// Category name as configured in the catalog
        #[arg(long)]
        name: String,
    },
}

pub async fn run(pool: &PgPool, config: &AppConfig, command: &ReportCommands) -> anyhow::Result<()> {
    let catalog = revlens_core::load_catalog(&config.catalog_path)?;
    let model = GeminiClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
        config.http_request_timeout_secs,
        config.gemini_max_retries,
        config.gemini_backoff_base_secs,
    )?;
    let reporter = Reporter::new(pool, &model, &config.reports_dir);

    let paths = match command {
        ReportCommands::Longitudinal { brand } => {
            let products = products_for_brand(&catalog, brand)?;
            reporter.longitudinal(brand, &products).await?
        }
        ReportCommands::Comparative { title, products } => {
            let products = resolve_products(&catalog, products)?;
            reporter.comparative(title, &products).await?
        }
        ReportCommands::DeepDive { product } => {
            let (_, product) = catalog
                .find_product(product)
                .ok_or_else(|| anyhow::anyhow!("product '{product}' not found in catalog"))?;
            reporter.deep_dive(product).await?
        }
        ReportCommands::Category { name } => {
            let category = catalog
                .category(name)
                .ok_or_else(|| anyhow::anyhow!("category '{name}' not found in catalog"))?;
            reporter.category_factors(category).await?
        }
    };

    print_paths(&paths);
    Ok(())
}

/// Every catalog product whose brand matches, across all categories.
fn products_for_brand(catalog: &Catalog, brand: &str) -> anyhow::Result<Vec<ProductConfig>> {
    let products: Vec<ProductConfig> = catalog
        .categories
        .iter()
        .flat_map(|c| c.products.iter())
        .filter(|p| p.brand.eq_ignore_ascii_case(brand))
        .cloned()
        .collect();
    if products.is_empty() {
        anyhow::bail!("no catalog products found for brand '{brand}'");
    }
    Ok(products)
}

fn resolve_products(catalog: &Catalog, names: &[String]) -> anyhow::Result<Vec<ProductConfig>> {
    names
        .iter()
        .map(|name| {
            catalog
                .find_product(name)
                .map(|(_, p)| p.clone())
                .ok_or_else(|| anyhow::anyhow!("product '{name}' not found in catalog"))
        })
        .collect()
}

fn print_paths(paths: &ReportPaths) {
    println!("Report written to {}", paths.text_path.display());
    if let Some(json_path) = &paths.json_path {
        println!("Structured output written to {}", json_path.display());
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
