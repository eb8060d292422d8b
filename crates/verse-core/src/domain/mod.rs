//! Domain entities - the core business objects.

mod page;
mod post;
mod settings;
pub mod snippet;
mod user;

pub use page::Page;
pub use post::{NewPost, Post, PostUpdate, TagsInput};
pub(crate) use post::non_blank;
pub use settings::{SettingsUpdate, SiteSettings};
pub use snippet::{CodeSnippet, SnippetLocation};
pub use user::{User, UserDirectory};
