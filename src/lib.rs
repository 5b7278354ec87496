pub mod cache;
pub mod error;
pub mod models;
pub mod presets;
pub mod routes;
pub mod sheet_pipeline;
pub mod source_fetch;

use worker::{Context, Env, Request, Response, Result, ScheduleContext, ScheduledEvent, event};

#[event(fetch)]
async fn fetch(req: Request, env: Env, ctx: Context) -> Result<Response> {
    routes::handle(req, env, ctx).await
}

#[event(scheduled)]
async fn scheduled(_event: ScheduledEvent, env: Env, _ctx: ScheduleContext) {
    let source_base_url = env
        .var("SOURCE_URL")
        .map(|value| value.to_string())
        .unwrap_or_else(|_| models::DEFAULT_SOURCE_BASE_URL.to_string());

    if let Err(error) = sheet_pipeline::sync_all_categories(&source_base_url).await {
        worker::console_error!("scheduled sheet sync failed: {error}");
    }
}
