use html_table_to_sheet::extract_html_to_sheet_string;

use crate::cache;
use crate::error::ApiError;
use crate::models::{Category, SHEET_CACHE_KEY_PREFIX, SHEET_CACHE_TTL_SECONDS};
use crate::presets;
use crate::source_fetch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetCacheStatus {
    Hit,
    Miss,
    Bypass,
}

impl SheetCacheStatus {
    pub const fn as_header_value(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }
}

pub fn sheet_cache_key(category: Category) -> String {
    format!("{SHEET_CACHE_KEY_PREFIX}{}", category.as_str())
}

pub async fn get_or_build_sheet(
    category: Category,
    base_url: &str,
) -> Result<(String, SheetCacheStatus), ApiError> {
    let cache_key = sheet_cache_key(category);
    if let Some(cached) = cache::get_text(&cache_key).await? {
        return Ok((cached, SheetCacheStatus::Hit));
    }

    let sheet = build_sheet_from_source(category, base_url).await?;
    put_sheet_in_cache(category, &sheet).await?;
    Ok((sheet, SheetCacheStatus::Miss))
}

pub async fn rebuild_sheet(
    category: Category,
    base_url: &str,
) -> Result<(String, SheetCacheStatus), ApiError> {
    let sheet = build_sheet_from_source(category, base_url).await?;
    put_sheet_in_cache(category, &sheet).await?;
    Ok((sheet, SheetCacheStatus::Bypass))
}

async fn put_sheet_in_cache(category: Category, sheet: &str) -> Result<(), ApiError> {
    cache::put_text(
        &sheet_cache_key(category),
        sheet,
        SHEET_CACHE_TTL_SECONDS,
        "text/tab-separated-values; charset=utf-8",
    )
    .await
}

pub async fn sync_all_categories(base_url: &str) -> Result<(), ApiError> {
    for category in Category::ALL {
        if let Err(error) = rebuild_sheet(category, base_url).await {
            worker::console_error!(
                "sheet sync failed for carteira {}: {}",
                category.as_str(),
                error
            );
        }
    }

    Ok(())
}

async fn build_sheet_from_source(category: Category, base_url: &str) -> Result<String, ApiError> {
    let html = source_fetch::fetch_portfolio_html(&category.source_url(base_url)).await?;
    let options = presets::options_for(category);

    let (sheet, report) = extract_html_to_sheet_string(&html, &options)
        .map_err(|error| ApiError::Parse(format!("failed to shape portfolio table: {error}")))?;

    worker::console_log!(
        "sheet build completed: carteira={}, rows={}, columns={}, warnings={}",
        category.as_str(),
        report.row_count,
        report.column_count,
        report.warnings.len()
    );

    Ok(sheet)
}
