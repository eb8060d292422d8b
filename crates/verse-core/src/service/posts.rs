use std::sync::Arc;

use chrono::Utc;

use crate::domain::{NewPost, Page, Post, PostUpdate, User, UserDirectory, non_blank};
use crate::error::DomainError;
use crate::ports::revalidate::{ADMIN_POSTS_PATH, HOME_PATH, post_path};
use crate::ports::{PostRepository, Revalidator};
use crate::slug::{ensure_unique_slug, slugify};

use super::persistence;

/// Slug used when a title has no characters that survive slugification.
const FALLBACK_SLUG: &str = "post";

/// The post store: listing, lookup and admin-only mutations.
///
/// Construct once and share; every mutation signals the [`Revalidator`].
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    users: Arc<UserDirectory>,
    revalidator: Arc<dyn Revalidator>,
}

impl PostService {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        users: Arc<UserDirectory>,
        revalidator: Arc<dyn Revalidator>,
    ) -> Self {
        Self {
            repo,
            users,
            revalidator,
        }
    }

    /// One page of posts, newest first.
    pub async fn list(&self, page: usize, page_size: usize) -> Result<Page<Post>, DomainError> {
        let posts = self.sorted().await?;
        Ok(Page::slice(posts, page, page_size))
    }

    /// Every post, newest first.
    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        self.sorted().await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(|e| persistence("post", e))
    }

    pub async fn create(&self, data: NewPost, acting: &User) -> Result<Post, DomainError> {
        self.authorize(acting, "create posts")?;

        let author = self.users.find(&acting.id).cloned().ok_or_else(|| {
            tracing::error!(user_id = %acting.id, "Admin author missing from user directory");
            DomainError::Validation("Post author could not be determined".to_string())
        })?;

        let existing = self.all().await?;
        let id = existing.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let slug = unique_slug(&data.title, &existing, None);
        let now = Utc::now();

        let post = Post {
            id,
            slug,
            title: data.title,
            content: data.content,
            author,
            created_at: now,
            updated_at: now,
            featured_image: non_blank(data.featured_image),
            excerpt: data.excerpt,
            category: non_blank(data.category),
            tags: data.tags.map(|t| t.normalize()).unwrap_or_default(),
        };

        let post = self
            .repo
            .save(post)
            .await
            .map_err(|e| persistence("post", e))?;

        tracing::info!(post_id = post.id, slug = %post.slug, "Post created");
        self.revalidate_post(&post.slug, None).await;

        Ok(post)
    }

    /// Apply `changes` to the post at `slug`. `Ok(None)` when there is no such post.
    pub async fn update(
        &self,
        slug: &str,
        changes: PostUpdate,
        acting: &User,
    ) -> Result<Option<Post>, DomainError> {
        self.authorize(acting, "update posts")?;

        let existing = self.all().await?;
        let Some(current) = existing.iter().find(|p| p.slug == slug).cloned() else {
            tracing::debug!(slug = %slug, "Update skipped, no such post");
            return Ok(None);
        };

        let mut post = current.clone();

        if let Some(title) = changes.title {
            if title != current.title {
                post.slug = unique_slug(&title, &existing, Some(current.id));
            }
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(excerpt) = changes.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(image) = changes.featured_image {
            post.featured_image = non_blank(Some(image));
        }
        if let Some(category) = changes.category {
            post.category = non_blank(Some(category));
        }
        if let Some(tags) = changes.tags {
            post.tags = tags.normalize();
        }
        if let Some(author_id) = changes.author_id {
            post.author = self.users.find(&author_id).cloned().ok_or_else(|| {
                DomainError::Validation(format!("Unknown author id {author_id}"))
            })?;
        }
        post.updated_at = Utc::now();

        let post = self
            .repo
            .save(post)
            .await
            .map_err(|e| persistence("post", e))?;

        tracing::info!(post_id = post.id, slug = %post.slug, "Post updated");
        let previous = (current.slug != post.slug).then_some(current.slug.as_str());
        self.revalidate_post(&post.slug, previous).await;

        Ok(Some(post))
    }

    /// Remove the post at `slug`, returning whether one was removed.
    pub async fn delete(&self, slug: &str, acting: &User) -> Result<bool, DomainError> {
        self.authorize(acting, "delete posts")?;

        let Some(post) = self.get_by_slug(slug).await? else {
            return Ok(false);
        };

        let removed = self
            .repo
            .delete(post.id)
            .await
            .map_err(|e| persistence("post", e))?;

        if removed {
            tracing::info!(post_id = post.id, slug = %slug, "Post deleted");
            self.revalidate_post(slug, None).await;
        }

        Ok(removed)
    }

    fn authorize(&self, acting: &User, action: &'static str) -> Result<(), DomainError> {
        if self.users.is_admin(&acting.id) {
            Ok(())
        } else {
            tracing::warn!(user_id = %acting.id, action, "Rejected non-admin mutation");
            Err(DomainError::Unauthorized(action))
        }
    }

    async fn all(&self) -> Result<Vec<Post>, DomainError> {
        self.repo
            .find_all()
            .await
            .map_err(|e| persistence("post", e))
    }

    async fn sorted(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.all().await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn revalidate_post(&self, slug: &str, previous_slug: Option<&str>) {
        self.revalidator.revalidate(HOME_PATH).await;
        if let Some(previous) = previous_slug {
            self.revalidator.revalidate(&post_path(previous)).await;
        }
        self.revalidator.revalidate(&post_path(slug)).await;
        self.revalidator.revalidate(ADMIN_POSTS_PATH).await;
    }
}

/// Slug for `title` that no post other than `own_id` holds.
fn unique_slug(title: &str, posts: &[Post], own_id: Option<u64>) -> String {
    let mut candidate = slugify(title);
    if candidate.is_empty() {
        candidate = FALLBACK_SLUG.to_string();
    }

    let taken = posts
        .iter()
        .filter(|p| Some(p.id) != own_id)
        .map(|p| p.slug.as_str());

    ensure_unique_slug(&candidate, taken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagsInput;
    use crate::seed;
    use crate::service::testing::{BrokenPosts, MemoryPosts, RecordingRevalidator};

    struct Fixture {
        service: PostService,
        repo: Arc<MemoryPosts>,
        revalidator: Arc<RecordingRevalidator>,
        admin: User,
        bob: User,
    }

    fn fixture(posts: Vec<Post>) -> Fixture {
        let users = Arc::new(seed::users());
        let repo = Arc::new(MemoryPosts::new(posts));
        let revalidator = Arc::new(RecordingRevalidator::default());
        let admin = users.find("1").cloned().unwrap();
        let bob = users.find("2").cloned().unwrap();

        Fixture {
            service: PostService::new(repo.clone(), users, revalidator.clone()),
            repo,
            revalidator,
            admin,
            bob,
        }
    }

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "Some content that is long enough.".to_string(),
            excerpt: "An excerpt.".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_titles_get_suffixed_slugs() {
        let f = fixture(Vec::new());

        let first = f.service.create(new_post("Hello World"), &f.admin).await.unwrap();
        let second = f.service.create(new_post("Hello World"), &f.admin).await.unwrap();

        assert_eq!(first.slug, "hello-world");
        assert_eq!(second.slug, "hello-world-1");
        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_create_then_list_newest_first() {
        let users = seed::users();
        let mut seeded = seed::posts(&users).remove(0);
        seeded.title = "Hello World".to_string();
        seeded.slug = "hello-world".to_string();
        let f = fixture(vec![seeded]);

        let created = f.service.create(new_post("Hello World"), &f.admin).await.unwrap();
        assert_eq!(created.slug, "hello-world-1");

        let page = f.service.list(1, 10).await.unwrap();

        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        let slugs: Vec<_> = page.items.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["hello-world-1", "hello-world"]);
    }

    #[tokio::test]
    async fn test_storage_failures_become_persistence_errors() {
        let service = PostService::new(
            Arc::new(BrokenPosts),
            Arc::new(seed::users()),
            Arc::new(RecordingRevalidator::default()),
        );
        let admin = seed::users().find("1").cloned().unwrap();

        let list = service.list(1, 6).await;
        let get = service.get_by_slug("first-amazing-post").await;
        let create = service.create(new_post("Hello World"), &admin).await;
        let delete = service.delete("first-amazing-post", &admin).await;

        for result in [list.map(|_| ()), get.map(|_| ()), create.map(|_| ()), delete.map(|_| ())] {
            match result {
                Err(DomainError::Persistence(msg)) => {
                    assert_eq!(msg, "Failed to access post storage");
                    assert!(!msg.contains("disk on fire"));
                }
                other => panic!("expected a persistence error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_create_assigns_author_timestamps_and_tags() {
        let f = fixture(seed::posts(&seed::users()));

        let post = f
            .service
            .create(
                NewPost {
                    featured_image: Some("  ".to_string()),
                    category: Some("Rust".to_string()),
                    tags: Some(TagsInput::Text("a, b ,,c".to_string())),
                    ..new_post("A brand new post")
                },
                &f.admin,
            )
            .await
            .unwrap();

        assert_eq!(post.id, 3);
        assert_eq!(post.author.name, "xay");
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.tags, vec!["a", "b", "c"]);
        assert_eq!(post.featured_image, None);
        assert_eq!(post.category.as_deref(), Some("Rust"));
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create() {
        let f = fixture(seed::posts(&seed::users()));

        let result = f.service.create(new_post("Sneaky post"), &f.bob).await;

        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
        assert_eq!(f.repo.len(), 2);
        assert!(f.revalidator.paths().is_empty());
    }

    #[tokio::test]
    async fn test_non_admin_cannot_update_or_delete() {
        let f = fixture(seed::posts(&seed::users()));

        let update = f
            .service
            .update("first-amazing-post", PostUpdate::default(), &f.bob)
            .await;
        let delete = f.service.delete("first-amazing-post", &f.bob).await;

        assert!(matches!(update, Err(DomainError::Unauthorized(_))));
        assert!(matches!(delete, Err(DomainError::Unauthorized(_))));
        assert_eq!(f.repo.len(), 2);
    }

    #[tokio::test]
    async fn test_content_update_keeps_slug_and_created_at() {
        let f = fixture(seed::posts(&seed::users()));
        let before = f.service.get_by_slug("first-amazing-post").await.unwrap().unwrap();

        let after = f
            .service
            .update(
                "first-amazing-post",
                PostUpdate {
                    content: Some("<p>Rewritten body for the post.</p>".to_string()),
                    ..Default::default()
                },
                &f.admin,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.slug, before.slug);
        assert_eq!(after.created_at, before.created_at);
        assert_ne!(after.updated_at, before.updated_at);
        assert_eq!(after.tags, before.tags);
    }

    #[tokio::test]
    async fn test_title_update_regenerates_slug_and_revalidates_both() {
        let f = fixture(seed::posts(&seed::users()));

        let post = f
            .service
            .update(
                "first-amazing-post",
                PostUpdate {
                    title: Some("Exploring the Mountains".to_string()),
                    ..Default::default()
                },
                &f.admin,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.slug, "exploring-the-mountains-1");
        assert_eq!(
            f.revalidator.paths(),
            vec![
                "/",
                "/posts/first-amazing-post",
                "/posts/exploring-the-mountains-1",
                "/admin/posts",
            ]
        );
    }

    #[tokio::test]
    async fn test_title_update_does_not_collide_with_itself() {
        let f = fixture(seed::posts(&seed::users()));

        let post = f
            .service
            .update(
                "exploring-the-mountains",
                PostUpdate {
                    title: Some("Exploring   the MOUNTAINS".to_string()),
                    ..Default::default()
                },
                &f.admin,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.slug, "exploring-the-mountains");
    }

    #[tokio::test]
    async fn test_update_author_and_clear_optional_fields() {
        let f = fixture(seed::posts(&seed::users()));

        let post = f
            .service
            .update(
                "first-amazing-post",
                PostUpdate {
                    author_id: Some("3".to_string()),
                    featured_image: Some(String::new()),
                    tags: Some(TagsInput::List(vec!["solo".to_string()])),
                    ..Default::default()
                },
                &f.admin,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.author.name, "Charlie Chaplin");
        assert_eq!(post.featured_image, None);
        assert_eq!(post.tags, vec!["solo"]);

        let unknown = f
            .service
            .update(
                "first-amazing-post",
                PostUpdate {
                    author_id: Some("99".to_string()),
                    ..Default::default()
                },
                &f.admin,
            )
            .await;
        assert!(matches!(unknown, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_none() {
        let f = fixture(Vec::new());
        let result = f
            .service
            .update("nope", PostUpdate::default(), &f.admin)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(f.revalidator.paths().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_slug_is_false() {
        let f = fixture(seed::posts(&seed::users()));

        assert!(!f.service.delete("missing", &f.admin).await.unwrap());
        assert_eq!(f.repo.len(), 2);
        assert!(f.revalidator.paths().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_and_revalidates() {
        let f = fixture(seed::posts(&seed::users()));

        assert!(f.service.delete("first-amazing-post", &f.admin).await.unwrap());
        assert_eq!(f.repo.len(), 1);
        assert!(f.service.get_by_slug("first-amazing-post").await.unwrap().is_none());
        assert_eq!(
            f.revalidator.paths(),
            vec!["/", "/posts/first-amazing-post", "/admin/posts"]
        );
    }

    #[tokio::test]
    async fn test_pages_cover_every_post_in_order() {
        let f = fixture(Vec::new());
        for n in 0..7 {
            f.service
                .create(new_post(&format!("Post number {n}")), &f.admin)
                .await
                .unwrap();
        }

        let all = f.service.list_all().await.unwrap();
        let first = f.service.list(1, 3).await.unwrap();
        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            collected.extend(f.service.list(page, 3).await.unwrap().items);
        }

        assert_eq!(first.total_pages, 3);
        assert_eq!(collected, all);
        assert!(f.service.list(4, 3).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_symbol_only_title_falls_back() {
        let f = fixture(Vec::new());
        let post = f.service.create(new_post("!!!!!"), &f.admin).await.unwrap();
        assert_eq!(post.slug, "post");
    }
}
