//! Admin JSON API. Authorization is decided by the services; reads check the
//! admin id here since the read services are public.

use actix_web::{HttpResponse, web};
use validator::Validate;

use verse_shared::dto::{CreatePostRequest, UpdatePostRequest, UpdateSettingsRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn require_admin(state: &AppState, identity: &Identity) -> AppResult<()> {
    if state.users.is_admin(&identity.user.id) {
        Ok(())
    } else {
        tracing::warn!(user_id = %identity.user.id, "Non-admin tried to open the admin area");
        Err(AppError::Forbidden(
            "The admin area is restricted to the site admin".to_string(),
        ))
    }
}

/// GET /api/admin/posts
pub async fn list_posts(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    require_admin(&state, &identity)?;
    let posts = state.posts.list_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/admin/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = state.posts.create(req.into(), &identity.user).await?;
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/admin/posts/{slug}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let req = body.into_inner();
    req.validate()?;

    match state.posts.update(&slug, req.into(), &identity.user).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound(format!("No post with slug '{}'", slug))),
    }
}

/// DELETE /api/admin/posts/{slug}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    if state.posts.delete(&slug, &identity.user).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!("No post with slug '{}'", slug)))
    }
}

/// GET /api/admin/settings
pub async fn get_settings(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity)?;
    let settings = state.settings.get().await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// PUT /api/admin/settings
pub async fn update_settings(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateSettingsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let update = req.into_update(|| uuid::Uuid::new_v4().to_string());
    let settings = state.settings.update(update, &identity.user).await?;
    Ok(HttpResponse::Ok().json(settings))
}
