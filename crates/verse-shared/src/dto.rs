//! Data Transfer Objects - request/response types for the API.
//!
//! Request types derive [`Validate`] with the admin form rules; the services
//! trust their input once validation has passed.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors, ValidationErrorsKind};

use verse_core::domain::{
    CodeSnippet, NewPost, Page, Post, PostUpdate, SettingsUpdate, SnippetLocation, TagsInput,
};

const ADS_TXT_MIN: usize = 10;

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Query string of the public listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One page of the public listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total_pages: usize,
    pub current_page: usize,
}

impl From<Page<Post>> for PostListResponse {
    fn from(page: Page<Post>) -> Self {
        Self {
            posts: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
        }
    }
}

/// Empty clears the image; anything else must be an absolute http(s) URL.
fn empty_or_http_url(image: &str) -> Result<(), ValidationError> {
    let image = image.trim();
    let http = image.starts_with("https://") || image.starts_with("http://");
    if image.is_empty() || (http && image.validate_url()) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

fn empty_or_ads_txt(content: &str) -> Result<(), ValidationError> {
    let len = content.chars().count();
    if len == 0 || len >= ADS_TXT_MIN {
        Ok(())
    } else {
        Err(ValidationError::new("ads_txt_length"))
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 5, max = 150, message = "Title must be between 5 and 150 characters"))]
    pub title: String,
    #[validate(length(min = 20, message = "Content must be at least 20 characters"))]
    pub content: String,
    #[validate(length(min = 10, max = 300, message = "Excerpt must be between 10 and 300 characters"))]
    pub excerpt: String,
    #[serde(default)]
    #[validate(custom(function = "empty_or_http_url", message = "Featured image must be a valid URL"))]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            featured_image: req.featured_image,
            category: req.category,
            tags: req.tags,
        }
    }
}

/// Partial update of a post. Omitted fields are left unchanged and skip
/// validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 5, max = 150, message = "Title must be between 5 and 150 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 20, message = "Content must be at least 20 characters"))]
    pub content: Option<String>,
    #[validate(length(min = 10, max = 300, message = "Excerpt must be between 10 and 300 characters"))]
    pub excerpt: Option<String>,
    #[validate(custom(function = "empty_or_http_url", message = "Featured image must be a valid URL"))]
    pub featured_image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<TagsInput>,
    pub author_id: Option<String>,
}

impl From<UpdatePostRequest> for PostUpdate {
    fn from(req: UpdatePostRequest) -> Self {
        PostUpdate {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            featured_image: req.featured_image,
            category: req.category,
            tags: req.tags,
            author_id: req.author_id,
        }
    }
}

/// A snippet as submitted from the settings form. A missing id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SnippetInput {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(custom(function = "not_blank", message = "Snippet name is required"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Snippet code is required"))]
    pub code: String,
    pub location: SnippetLocation,
    pub is_active: bool,
}

/// Settings change. `snippets`, when present, is the complete new collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(custom(
        function = "empty_or_ads_txt",
        message = "ads.txt content must be at least 10 characters if provided"
    ))]
    pub ads_txt_content: Option<String>,
    #[validate(nested)]
    pub snippets: Option<Vec<SnippetInput>>,
}

impl UpdateSettingsRequest {
    /// Convert into a settings change, calling `new_id` for snippets without one.
    pub fn into_update(self, mut new_id: impl FnMut() -> String) -> SettingsUpdate {
        let snippets = self.snippets.map(|snippets| {
            snippets
                .into_iter()
                .map(|s| CodeSnippet {
                    id: s.id.filter(|id| !id.trim().is_empty()).unwrap_or_else(&mut new_id),
                    name: s.name,
                    code: s.code,
                    location: s.location,
                    is_active: s.is_active,
                })
                .collect()
        });

        SettingsUpdate {
            ads_txt_content: self.ads_txt_content,
            snippets,
        }
    }
}

/// Flatten validation failures into readable messages, ordered by field.
///
/// Nested failures are prefixed with their path, e.g. `snippets[0].name`.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_messages(errors, None, &mut messages);
    messages
}

fn collect_messages(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("{path} is invalid ({})", error.code),
                    };
                    match prefix {
                        Some(_) => out.push(format!("{path}: {message}")),
                        None => out.push(message),
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(inner, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}
