//! `collect` command: run the collection pipelines over the catalog.
//!
//! Per-product failures never abort the run; the pipelines count them and
//! the command reports aggregate totals at the end.

use clap::Args;
use sqlx::PgPool;
use std::time::Duration;

use revlens_core::{AppConfig, Catalog, Category, CategoryPipeline, ProductConfig};
use revlens_gemini::GeminiClient;
use revlens_pipeline::{
    CuratedConfig, CuratedPipeline, GeneralConfig, GeneralSearchPipeline, PgAnalysisStore,
    RunSummary,
};
use revlens_youtube::YoutubeClient;

#[derive(Debug, Args)]
pub struct CollectArgs {
    /// Restrict collection to a single catalog category
    #[arg(long)]
    pub category: Option<String>,

    /// Restrict collection to a single product (by catalog name)
    #[arg(long)]
    pub product: Option<String>,

    /// Process at most this many products per category
    #[arg(long)]
    pub max_products: Option<usize>,

    /// For curated categories, search at most this many reviewer channels
    #[arg(long)]
    pub max_reviewers: Option<usize>,

    /// Print what would be collected without calling any API
    #[arg(long)]
    pub dry_run: bool,
}

/// Selected work: one category with the products to process within it.
#[derive(Debug)]
struct Selection<'a> {
    category: &'a Category,
    products: Vec<&'a ProductConfig>,
}

pub async fn run(pool: &PgPool, config: &AppConfig, args: &CollectArgs) -> anyhow::Result<()> {
    let catalog = revlens_core::load_catalog(&config.catalog_path)?;
    let selections = select_work(&catalog, args)?;

    if args.dry_run {
        print_plan(&selections, args);
        return Ok(());
    }

    let search = YoutubeClient::new(&config.youtube_api_key, config.http_request_timeout_secs)?;
    let model = GeminiClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
        config.http_request_timeout_secs,
        config.gemini_max_retries,
        config.gemini_backoff_base_secs,
    )?;
    let store = PgAnalysisStore::new(pool.clone());
    let inter_call_delay = Duration::from_secs(config.inter_call_delay_secs);

    let mut totals = RunSummary::default();
    let mut products_run: usize = 0;

    for selection in &selections {
        match &selection.category.pipeline {
            CategoryPipeline::Curated { reviewers } => {
                let reviewers = match args.max_reviewers {
                    Some(limit) => &reviewers[..limit.min(reviewers.len())],
                    None => &reviewers[..],
                };
                let pipeline = CuratedPipeline::new(
                    &search,
                    &model,
                    &store,
                    CuratedConfig {
                        max_results_per_reviewer: config.curated_max_results,
                        order: config.video_order.clone(),
                        inter_call_delay,
                    },
                );
                for product in &selection.products {
                    let summary = pipeline.run(product, reviewers).await;
                    accumulate(&mut totals, summary);
                    products_run += 1;
                }
            }
            CategoryPipeline::General => {
                let pipeline = GeneralSearchPipeline::new(
                    &search,
                    &model,
                    &store,
                    GeneralConfig {
                        candidate_pool_size: config.candidate_pool_size,
                        full_analysis_cap: config.full_analysis_cap,
                        order: config.video_order.clone(),
                        default_relevance_language: config.default_search_language.clone(),
                        region_code: config.region_code.clone(),
                        inter_call_delay,
                    },
                );
                for product in &selection.products {
                    let summary = pipeline.run(product).await;
                    accumulate(&mut totals, summary);
                    products_run += 1;
                }
            }
        }
    }

    tracing::info!(
        products = products_run,
        searched = totals.searched,
        skipped_existing = totals.skipped_existing,
        rejected_relevance = totals.rejected_relevance,
        rejected_suitability = totals.rejected_suitability,
        analyzed = totals.analyzed,
        persisted = totals.persisted,
        failed = totals.failed,
        "collect finished"
    );
    println!(
        "Processed {products_run} product(s): {} analyzed, {} persisted, {} failed.",
        totals.analyzed, totals.persisted, totals.failed
    );

    Ok(())
}

/// Resolve the `--category` / `--product` / `--max-products` filters against
/// the catalog. Filters that match nothing are errors rather than silent
/// no-ops.
fn select_work<'a>(catalog: &'a Catalog, args: &CollectArgs) -> anyhow::Result<Vec<Selection<'a>>> {
    let categories: Vec<&Category> = match args.category.as_deref() {
        Some(name) => {
            let category = catalog
                .category(name)
                .ok_or_else(|| anyhow::anyhow!("category '{name}' not found in catalog"))?;
            vec![category]
        }
        None => catalog.categories.iter().collect(),
    };

    let mut selections = Vec::new();
    for category in categories {
        let mut products: Vec<&ProductConfig> = match args.product.as_deref() {
            Some(name) => category
                .products
                .iter()
                .filter(|p| p.name == name)
                .collect(),
            None => category.products.iter().collect(),
        };
        if let Some(limit) = args.max_products {
            products.truncate(limit);
        }
        if !products.is_empty() {
            selections.push(Selection { category, products });
        }
    }

    if selections.is_empty() {
        if let Some(name) = args.product.as_deref() {
            anyhow::bail!("product '{name}' not found in the selected categories");
        }
        anyhow::bail!("catalog selection matched no products");
    }
    Ok(selections)
}

fn print_plan(selections: &[Selection<'_>], args: &CollectArgs) {
    println!("Dry run; nothing will be searched, analyzed, or persisted.");
    for selection in selections {
        let pipeline = match &selection.category.pipeline {
            CategoryPipeline::Curated { reviewers } => {
                let count = args
                    .max_reviewers
                    .map_or(reviewers.len(), |limit| limit.min(reviewers.len()));
                format!("curated ({count} reviewer channel(s))")
            }
            CategoryPipeline::General => "general search".to_string(),
        };
        println!("category '{}' via {pipeline}:", selection.category.name);
        for product in &selection.products {
            println!("  - {}", product.name);
        }
    }
}

fn accumulate(totals: &mut RunSummary, summary: RunSummary) {
    totals.searched += summary.searched;
    totals.skipped_existing += summary.skipped_existing;
    totals.rejected_relevance += summary.rejected_relevance;
    totals.rejected_suitability += summary.rejected_suitability;
    totals.analyzed += summary.analyzed;
    totals.persisted += summary.persisted;
    totals.duplicate_inserts += summary.duplicate_inserts;
    totals.failed += summary.failed;
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
