//! Public JSON read API.

use actix_web::{HttpResponse, web};

use verse_shared::dto::{PostListQuery, PostListResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?page&pageSize
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(state.posts_per_page);

    let page = state.posts.list(page, page_size).await?;
    Ok(HttpResponse::Ok().json(PostListResponse::from(page)))
}

/// GET /api/posts/{slug}
pub async fn get(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    match state.posts.get_by_slug(&slug).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound(format!("No post with slug '{}'", slug))),
    }
}
