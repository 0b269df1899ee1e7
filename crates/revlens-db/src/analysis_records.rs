use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A persisted full-analysis record.
///
/// Created exactly once per `(video_id, product_config_name)` pair; never
/// updated or deleted by the pipelines.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisRecordRow {
    pub id: i64,
    pub video_id: String,
    pub product_config_name: String,
    pub product_brand: String,
    pub product_generation: Option<String>,
    pub product_release_year: Option<i32>,
    pub video_url: String,
    pub video_title: String,
    pub video_published_at: Option<DateTime<Utc>>,
    pub reviewer_channel_id: String,
    pub reviewer_name: String,
    /// Structured analysis payload, stored opaquely. Shape is defined by the
    /// external analysis schema; the core never validates beyond the
    /// invoker's shallow bracket check.
    pub analysis: serde_json::Value,
    pub analysis_timestamp: DateTime<Utc>,
}

pub struct NewAnalysisRecord<'a> {
    pub video_id: &'a str,
    pub product_config_name: &'a str,
    pub product_brand: &'a str,
    pub product_generation: Option<&'a str>,
    pub product_release_year: Option<i32>,
    pub video_url: &'a str,
    pub video_title: &'a str,
    pub video_published_at: Option<DateTime<Utc>>,
    pub reviewer_channel_id: &'a str,
    pub reviewer_name: &'a str,
    pub analysis: &'a serde_json::Value,
}

/// Outcome of an insert attempt against the composite-unique table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was created with this id.
    Inserted(i64),
    /// A row for this `(video_id, product_config_name)` already existed.
    /// Expected race when another run inserted between the idempotency
    /// check and this insert; callers log it, nothing more.
    Duplicate,
}

/// Returns `true` if an analysis exists for the composite key.
///
/// # Errors
///
/// Returns `DbError` on database query failure. Callers that implement the
/// idempotency guard treat that failure as "already processed".
pub async fn analysis_exists(
    pool: &PgPool,
    video_id: &str,
    product_config_name: &str,
) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS ( \
           SELECT 1 FROM analysis_records \
           WHERE video_id = $1 AND product_config_name = $2 \
         )",
    )
    .bind(video_id)
    .bind(product_config_name)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Insert a new analysis record.
///
/// Uses `ON CONFLICT DO NOTHING` on the composite unique key, so a
/// concurrent or repeated insert reports [`InsertOutcome::Duplicate`]
/// instead of failing.
///
/// # Errors
///
/// Returns `DbError` on database query failure (not on duplicates).
pub async fn insert_analysis_record(
    pool: &PgPool,
    record: &NewAnalysisRecord<'_>,
) -> Result<InsertOutcome, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO analysis_records \
           (video_id, product_config_name, product_brand, product_generation, \
            product_release_year, video_url, video_title, video_published_at, \
            reviewer_channel_id, reviewer_name, analysis) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (video_id, product_config_name) DO NOTHING \
         RETURNING id",
    )
    .bind(record.video_id)
    .bind(record.product_config_name)
    .bind(record.product_brand)
    .bind(record.product_generation)
    .bind(record.product_release_year)
    .bind(record.video_url)
    .bind(record.video_title)
    .bind(record.video_published_at)
    .bind(record.reviewer_channel_id)
    .bind(record.reviewer_name)
    .bind(record.analysis)
    .fetch_optional(pool)
    .await?;

    Ok(match id {
        Some(id) => InsertOutcome::Inserted(id),
        None => InsertOutcome::Duplicate,
    })
}

/// All analyses for one product, oldest publish date first.
///
/// Publish-date ordering keeps longitudinal report prompts chronological.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn list_analyses_for_product(
    pool: &PgPool,
    product_config_name: &str,
) -> Result<Vec<AnalysisRecordRow>, DbError> {
    Ok(sqlx::query_as::<_, AnalysisRecordRow>(
        "SELECT id, video_id, product_config_name, product_brand, \
                product_generation, product_release_year, video_url, \
                video_title, video_published_at, reviewer_channel_id, \
                reviewer_name, analysis, analysis_timestamp \
         FROM analysis_records \
         WHERE product_config_name = $1 \
         ORDER BY video_published_at ASC NULLS LAST, id ASC",
    )
    .bind(product_config_name)
    .fetch_all(pool)
    .await?)
}
