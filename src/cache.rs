use worker::{Cache, Response};

use crate::error::ApiError;

fn cache_url(key: &str) -> String {
    format!("https://cache.local/{}", urlencoding::encode(key))
}

pub async fn get_text(key: &str) -> Result<Option<String>, ApiError> {
    let cache = Cache::default();
    let mut cached = cache.get(cache_url(key), true).await?;

    let Some(mut response) = cached.take() else {
        return Ok(None);
    };

    let body = response.text().await?;
    Ok(Some(body))
}

pub async fn put_text(
    key: &str,
    body: &str,
    ttl_seconds: u32,
    content_type: &str,
) -> Result<(), ApiError> {
    let cache = Cache::default();

    let mut response = Response::ok(body.to_string())?;
    response
        .headers_mut()
        .set("Cache-Control", &format!("public, max-age={ttl_seconds}"))?;
    response.headers_mut().set("Content-Type", content_type)?;

    cache.put(cache_url(key), response).await?;
    Ok(())
}
