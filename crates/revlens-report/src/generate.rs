//! Report generation: load persisted analyses, render the synthesis
//! prompt, call the model, write the files.

use std::path::Path;

use chrono::Utc;
use revlens_core::{slugify, Category, ProductConfig};
use revlens_db::{list_analyses_for_product, AnalysisRecordRow};
use revlens_gemini::{render_plain, GeminiClient};
use sqlx::PgPool;

use crate::error::ReportError;
use crate::format::{format_analyses_block, product_detail_line};
use crate::prompts::{
    CATEGORY_FACTORS_TEMPLATE, COMPARATIVE_TEMPLATE, DEEP_DIVE_TEMPLATE, LONGITUDINAL_TEMPLATE,
};
use crate::writer::{write_report, ReportPaths};

pub struct Reporter<'a> {
    pool: &'a PgPool,
    model: &'a GeminiClient,
    reports_dir: &'a Path,
}

impl<'a> Reporter<'a> {
    #[must_use]
    pub fn new(pool: &'a PgPool, model: &'a GeminiClient, reports_dir: &'a Path) -> Self {
        Self {
            pool,
            model,
            reports_dir,
        }
    }

    /// Brand-evolution report across successive generations, ordered by
    /// release year so the prompt reads chronologically.
    ///
    /// # Errors
    ///
    /// [`ReportError::NoData`] when nothing is persisted for any of the
    /// products, [`ReportError::SynthesisFailed`] when the model produced
    /// nothing, and [`ReportError::Db`] / [`ReportError::Io`] from loading
    /// and writing.
    pub async fn longitudinal(
        &self,
        brand: &str,
        products: &[ProductConfig],
    ) -> Result<ReportPaths, ReportError> {
        tracing::info!(brand, products = products.len(), "generating longitudinal report");
        let mut ordered: Vec<&ProductConfig> = products.iter().collect();
        ordered.sort_by_key(|p| (p.release_year.is_none(), p.release_year));

        let (rows, details) = self.load_analyses(&ordered).await?;
        if rows.is_empty() {
            return Err(ReportError::NoData {
                subject: format!("brand '{brand}'"),
            });
        }

        let details_text = details.join("\n");
        let analyses = format_analyses_block(&rows);
        let prompt = render_plain(
            LONGITUDINAL_TEMPLATE,
            &[
                ("brand_name", brand),
                ("product_details", &details_text),
                ("analyses", &analyses),
            ],
        );
        let result = self
            .model
            .synthesize(prompt, &format!("longitudinal: {brand}"))
            .await;
        if result.textual_summary.is_none() && result.structured_block.is_none() {
            return Err(ReportError::SynthesisFailed {
                subject: format!("brand '{brand}'"),
            });
        }

        let header = report_header(
            &format!("Longitudinal Analysis Report for: {brand}"),
            &details_text,
        );
        let slug = slugify(brand);
        write_report(
            self.reports_dir,
            "brand_evolution",
            &slug,
            &format!("{slug}_evolution"),
            &header,
            &result,
        )
    }

    /// Head-to-head comparison of the given products.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Reporter::longitudinal`].
    pub async fn comparative(
        &self,
        title: &str,
        products: &[ProductConfig],
    ) -> Result<ReportPaths, ReportError> {
        tracing::info!(title, products = products.len(), "generating comparative report");
        let refs: Vec<&ProductConfig> = products.iter().collect();
        let (rows, details) = self.load_analyses(&refs).await?;
        if rows.is_empty() {
            return Err(ReportError::NoData {
                subject: format!("comparison '{title}'"),
            });
        }

        let details_text = details.join("\n");
        let analyses = format_analyses_block(&rows);
        let prompt = render_plain(
            COMPARATIVE_TEMPLATE,
            &[
                ("comparison_title", title),
                ("product_details", &details_text),
                ("analyses", &analyses),
            ],
        );
        let result = self
            .model
            .synthesize(prompt, &format!("comparative: {title}"))
            .await;
        if result.textual_summary.is_none() && result.structured_block.is_none() {
            return Err(ReportError::SynthesisFailed {
                subject: format!("comparison '{title}'"),
            });
        }

        let header = report_header(&format!("Comparative Analysis Report: {title}"), &details_text);
        let slug = slugify(title);
        write_report(
            self.reports_dir,
            "comparative_analysis",
            &slug,
            &slug,
            &header,
            &result,
        )
    }

    /// Deep-dive report on a single product, synthesized from every
    /// analysis persisted for it.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Reporter::longitudinal`].
    pub async fn deep_dive(&self, product: &ProductConfig) -> Result<ReportPaths, ReportError> {
        tracing::info!(product_name = %product.name, "generating deep-dive report");
        let rows = list_analyses_for_product(self.pool, &product.name).await?;
        if rows.is_empty() {
            return Err(ReportError::NoData {
                subject: format!("product '{}'", product.name),
            });
        }

        let detail = product_detail_line(product, rows.len());
        let analyses = format_analyses_block(&rows);
        let review_count = rows.len().to_string();
        let prompt = render_plain(
            DEEP_DIVE_TEMPLATE,
            &[
                ("product_name", &product.name),
                ("product_details", &detail),
                ("review_count", &review_count),
                ("analyses", &analyses),
            ],
        );
        let result = self
            .model
            .synthesize(prompt, &format!("deep dive: {}", product.name))
            .await;
        if result.textual_summary.is_none() && result.structured_block.is_none() {
            return Err(ReportError::SynthesisFailed {
                subject: format!("product '{}'", product.name),
            });
        }

        let header = report_header(
            &format!("Product Deep Dive Report: {}", product.name),
            &detail,
        );
        let slug = slugify(&product.name);
        write_report(
            self.reports_dir,
            "deep_dives",
            &slug,
            &format!("{slug}_deep_dive"),
            &header,
            &result,
        )
    }

    /// Key-buying-factors report across every product in a category.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Reporter::longitudinal`].
    pub async fn category_factors(&self, category: &Category) -> Result<ReportPaths, ReportError> {
        tracing::info!(category = %category.name, "generating category key-buying-factors report");
        let refs: Vec<&ProductConfig> = category.products.iter().collect();
        let (rows, details) = self.load_analyses(&refs).await?;
        if rows.is_empty() {
            return Err(ReportError::NoData {
                subject: format!("category '{}'", category.name),
            });
        }

        let details_text = details.join("\n");
        let analyses = format_analyses_block(&rows);
        let prompt = render_plain(
            CATEGORY_FACTORS_TEMPLATE,
            &[
                ("category_name", &category.name),
                ("product_details", &details_text),
                ("analyses", &analyses),
            ],
        );
        let result = self
            .model
            .synthesize(prompt, &format!("category factors: {}", category.name))
            .await;
        if result.textual_summary.is_none() && result.structured_block.is_none() {
            return Err(ReportError::SynthesisFailed {
                subject: format!("category '{}'", category.name),
            });
        }

        let header = report_header(
            &format!("Category Buying-Factors Report: {}", category.name),
            &details_text,
        );
        let slug = slugify(&category.name);
        write_report(
            self.reports_dir,
            "category_factors",
            &slug,
            &slug,
            &header,
            &result,
        )
    }

    /// Loads all analyses for the given products in order, plus one detail
    /// line per product. Products with no data still get a detail line so
    /// the report header shows the gap.
    async fn load_analyses(
        &self,
        products: &[&ProductConfig],
    ) -> Result<(Vec<AnalysisRecordRow>, Vec<String>), ReportError> {
        let mut rows = Vec::new();
        let mut details = Vec::with_capacity(products.len());
        for product in products {
            let product_rows = list_analyses_for_product(self.pool, &product.name).await?;
            if product_rows.is_empty() {
                tracing::warn!(product_name = %product.name, "no persisted analyses for product");
            }
            details.push(product_detail_line(product, product_rows.len()));
            rows.extend(product_rows);
        }
        Ok((rows, details))
    }
}

fn report_header(title: &str, details_text: &str) -> String {
    format!(
        "{title}\nGenerated: {}\nProducts Included:\n{details_text}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}
