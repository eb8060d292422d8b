//! Post and settings storage backends.

mod json_file;
mod memory;

pub use json_file::{JsonFilePostRepository, JsonFileSettingsRepository};
pub use memory::{InMemoryPostRepository, InMemorySettingsRepository};
