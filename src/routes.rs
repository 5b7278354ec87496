use std::collections::HashMap;

use serde::Serialize;
use worker::{Context, Env, Request, Response, Result, RouteContext, Router};

use crate::error::ApiError;
use crate::models::{
    Category, CategoriesResponse, CategoryInfo, DEFAULT_SOURCE_BASE_URL, PresetResponse,
};
use crate::presets;
use crate::sheet_pipeline;

#[derive(Debug, Clone)]
pub struct AppState {
    pub source_base_url: String,
}

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let source_base_url = env
        .var("SOURCE_URL")
        .map(|value| value.to_string())
        .unwrap_or_else(|_| DEFAULT_SOURCE_BASE_URL.to_string());

    let state = AppState { source_base_url };

    Router::with_data(state)
        .get_async("/api/v1/carteiras", carteiras_route)
        .get_async("/api/v1/preset", preset_route)
        .get_async("/api/v1/sheet", sheet_route)
        .run(req, env)
        .await
}

async fn carteiras_route(_req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    json_response(&categories_response(&ctx.data.source_base_url))
}

async fn preset_route(req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    match preset_response(&req) {
        Ok(response) => json_response(&response),
        Err(error) => error.into_response(),
    }
}

async fn sheet_route(req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    match sheet_response(&req, &ctx.data.source_base_url).await {
        Ok(response) => Ok(response),
        Err(error) => error.into_response(),
    }
}

fn categories_response(base_url: &str) -> CategoriesResponse {
    CategoriesResponse {
        items: Category::ALL
            .into_iter()
            .map(|carteira| CategoryInfo {
                carteira,
                source_url: carteira.source_url(base_url),
            })
            .collect(),
    }
}

fn preset_response(req: &Request) -> Result<PresetResponse, ApiError> {
    let query = parse_query(req)?;
    let category = parse_category_query(&query)?;
    presets::preset_summary(category)
}

async fn sheet_response(req: &Request, base_url: &str) -> Result<Response, ApiError> {
    let query = parse_query(req)?;
    let category = parse_category_query(&query)?;
    let force = parse_force_query(&query);

    let (sheet, cache_status) = if force {
        sheet_pipeline::rebuild_sheet(category, base_url).await?
    } else {
        sheet_pipeline::get_or_build_sheet(category, base_url).await?
    };

    let mut response = Response::ok(sheet)?;
    response
        .headers_mut()
        .set("Content-Type", "text/tab-separated-values; charset=utf-8")?;
    response.headers_mut().set(
        "Content-Disposition",
        &format!("inline; filename=\"{}\"", sheet_filename(category)),
    )?;
    response
        .headers_mut()
        .set("X-Cache-Status", cache_status.as_header_value())?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

fn json_response<T>(payload: &T) -> Result<Response>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

fn parse_query(req: &Request) -> Result<HashMap<String, String>, ApiError> {
    let url = req.url()?;
    let query = url
        .query_pairs()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<HashMap<_, _>>();
    Ok(query)
}

/// A missing `carteira` parameter falls back to the dividends preset, the
/// deployment's default layout; an explicit unknown value is rejected.
pub fn parse_category_query(query: &HashMap<String, String>) -> Result<Category, ApiError> {
    let Some(raw) = query.get("carteira") else {
        return Ok(Category::Dividendos);
    };

    Category::from_param(raw)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown carteira '{raw}'")))
}

pub fn parse_force_query(query: &HashMap<String, String>) -> bool {
    query.get("force").is_some_and(|value| {
        let lowered = value.trim().to_ascii_lowercase();
        lowered == "true" || lowered == "1" || lowered == "yes"
    })
}

pub fn sheet_filename(category: Category) -> String {
    format!("carteira-{}.tsv", category.as_str())
}
