//! Page revalidation port.

use async_trait::async_trait;

/// Receives a signal after every successful mutation so rendered pages that
/// show the changed data can be thrown away.
#[async_trait]
pub trait Revalidator: Send + Sync {
    /// Invalidate everything rendered for `path` (any query string included).
    async fn revalidate(&self, path: &str);

    /// Invalidate every rendered page.
    async fn revalidate_all(&self);
}

/// Path of the public listing.
pub const HOME_PATH: &str = "/";

/// Path of the admin listing.
pub const ADMIN_POSTS_PATH: &str = "/admin/posts";

/// Path of a post detail page.
pub fn post_path(slug: &str) -> String {
    format!("/posts/{slug}")
}
