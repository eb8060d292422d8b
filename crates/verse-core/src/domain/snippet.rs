//! Injectable code snippets and the rule for picking them per location.

use serde::{Deserialize, Serialize};

/// Where on a rendered page a snippet is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnippetLocation {
    GlobalHeader,
    GlobalFooter,
    PostHeader,
    PostFooter,
    BeforePostContent,
    AfterPostContent,
}

impl SnippetLocation {
    pub const ALL: [SnippetLocation; 6] = [
        SnippetLocation::GlobalHeader,
        SnippetLocation::GlobalFooter,
        SnippetLocation::PostHeader,
        SnippetLocation::PostFooter,
        SnippetLocation::BeforePostContent,
        SnippetLocation::AfterPostContent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnippetLocation::GlobalHeader => "globalHeader",
            SnippetLocation::GlobalFooter => "globalFooter",
            SnippetLocation::PostHeader => "postHeader",
            SnippetLocation::PostFooter => "postFooter",
            SnippetLocation::BeforePostContent => "beforePostContent",
            SnippetLocation::AfterPostContent => "afterPostContent",
        }
    }

    /// Head locations receive one node per snippet instead of a joined block.
    pub fn is_head(&self) -> bool {
        matches!(
            self,
            SnippetLocation::GlobalHeader | SnippetLocation::PostHeader
        )
    }
}

/// A named fragment of HTML/JS that can be switched on and off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub id: String,
    pub name: String,
    pub code: String,
    pub location: SnippetLocation,
    pub is_active: bool,
}

/// Codes of the active snippets at `location`, in their stored order.
pub fn select(snippets: &[CodeSnippet], location: SnippetLocation) -> Vec<&str> {
    snippets
        .iter()
        .filter(|s| s.is_active && s.location == location)
        .map(|s| s.code.as_str())
        .collect()
}

/// The selected codes joined by newlines, or `None` when nothing applies.
pub fn joined(snippets: &[CodeSnippet], location: SnippetLocation) -> Option<String> {
    let codes = select(snippets, location);
    if codes.is_empty() {
        None
    } else {
        Some(codes.join("\n"))
    }
}
