//! Rendered public pages, served through the page cache.

use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;

use verse_core::ports::revalidate::{HOME_PATH, post_path};

use crate::middleware::error::AppResult;
use crate::render;
use crate::state::AppState;

const HTML: &str = "text/html; charset=utf-8";

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub page: Option<String>,
}

/// Cache key of a home listing page. Only the page number varies the key, so
/// unrelated query parameters share one entry.
fn home_key(page_number: usize) -> String {
    if page_number == 1 {
        HOME_PATH.to_string()
    } else {
        format!("{HOME_PATH}?page={page_number}")
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(HTML).body(body)
}

async fn store(state: &AppState, key: &str, body: &str) {
    if let Err(e) = state.page_cache.set(key, body, Some(state.page_ttl)).await {
        tracing::warn!(key = %key, error = %e, "Failed to cache rendered page");
    }
}

/// GET /?page=N. Unparseable or zero page numbers show page 1.
pub async fn home(
    state: web::Data<AppState>,
    query: web::Query<HomeQuery>,
) -> AppResult<HttpResponse> {
    let page_number = query
        .page
        .as_deref()
        .and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1);

    let key = home_key(page_number);
    if let Some(cached) = state.page_cache.get(&key).await {
        tracing::debug!(key = %key, "Page cache hit");
        return Ok(html(cached));
    }

    let page = state.posts.list(page_number, state.posts_per_page).await?;
    let settings = state.settings.get().await?;
    let body = render::home_page(&page, &settings.snippets);

    // Pages past the end are all empty; not caching them keeps the key space bounded.
    if page_number <= page.total_pages.max(1) {
        store(&state, &key, &body).await;
    }
    Ok(html(body))
}

/// GET /posts/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = post_path(&slug);
    if let Some(cached) = state.page_cache.get(&key).await {
        tracing::debug!(key = %key, "Page cache hit");
        return Ok(html(cached));
    }

    let settings = state.settings.get().await?;
    let Some(post) = state.posts.get_by_slug(&slug).await? else {
        return Ok(HttpResponse::NotFound()
            .content_type(HTML)
            .body(render::not_found_page(&settings.snippets)));
    };

    let body = render::post_page(&post, &settings.snippets);
    store(&state, &key, &body).await;
    Ok(html(body))
}

/// GET /ads.txt, always read fresh.
pub async fn ads_txt(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let content = state.settings.ads_txt().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(content))
}
