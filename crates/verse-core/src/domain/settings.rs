use serde::{Deserialize, Serialize};

use super::CodeSnippet;

/// Site-wide settings: the `ads.txt` body and the injectable snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub ads_txt_content: String,
    #[serde(default)]
    pub snippets: Vec<CodeSnippet>,
}

/// A settings change. Snippets are replaced wholesale, never merged per item.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub ads_txt_content: Option<String>,
    pub snippets: Option<Vec<CodeSnippet>>,
}

impl SiteSettings {
    pub fn apply(mut self, update: SettingsUpdate) -> Self {
        if let Some(ads_txt_content) = update.ads_txt_content {
            self.ads_txt_content = ads_txt_content;
        }
        if let Some(snippets) = update.snippets {
            self.snippets = snippets;
        }
        self
    }
}
