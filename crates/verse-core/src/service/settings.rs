use std::sync::Arc;

use crate::domain::{SettingsUpdate, SiteSettings, User, UserDirectory};
use crate::error::DomainError;
use crate::ports::{Revalidator, SettingsRepository};

use super::persistence;

/// The settings store: `ads.txt` content and the injectable snippets.
///
/// Input shape is checked by the caller before [`SettingsService::update`].
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
    users: Arc<UserDirectory>,
    revalidator: Arc<dyn Revalidator>,
}

impl SettingsService {
    pub fn new(
        repo: Arc<dyn SettingsRepository>,
        users: Arc<UserDirectory>,
        revalidator: Arc<dyn Revalidator>,
    ) -> Self {
        Self {
            repo,
            users,
            revalidator,
        }
    }

    pub async fn get(&self) -> Result<SiteSettings, DomainError> {
        self.repo
            .load()
            .await
            .map_err(|e| persistence("settings", e))
    }

    pub async fn ads_txt(&self) -> Result<String, DomainError> {
        Ok(self.get().await?.ads_txt_content)
    }

    pub async fn update(
        &self,
        update: SettingsUpdate,
        acting: &User,
    ) -> Result<SiteSettings, DomainError> {
        if !self.users.is_admin(&acting.id) {
            tracing::warn!(user_id = %acting.id, "Rejected non-admin settings change");
            return Err(DomainError::Unauthorized("change site settings"));
        }

        let merged = self.get().await?.apply(update);
        let saved = self
            .repo
            .store(merged)
            .await
            .map_err(|e| persistence("settings", e))?;

        tracing::info!(snippets = saved.snippets.len(), "Site settings updated");
        // Snippets can appear on any page.
        self.revalidator.revalidate_all().await;

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::{CodeSnippet, SnippetLocation};
    use crate::seed;
    use crate::service::testing::{BrokenSettings, MemorySettings, RecordingRevalidator};

    fn service() -> (SettingsService, Arc<RecordingRevalidator>) {
        let revalidator = Arc::new(RecordingRevalidator::default());
        let service = SettingsService::new(
            Arc::new(MemorySettings(Mutex::new(seed::settings()))),
            Arc::new(seed::users()),
            revalidator.clone(),
        );
        (service, revalidator)
    }

    fn admin() -> User {
        seed::users().admin().cloned().unwrap()
    }

    fn snippet(name: &str) -> CodeSnippet {
        CodeSnippet {
            id: name.to_string(),
            name: name.to_string(),
            code: format!("<!-- {name} -->"),
            location: SnippetLocation::GlobalFooter,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_update_merges_ads_txt_and_replaces_snippets() {
        let (service, revalidator) = service();

        service
            .update(
                SettingsUpdate {
                    ads_txt_content: None,
                    snippets: Some(vec![snippet("one"), snippet("two")]),
                },
                &admin(),
            )
            .await
            .unwrap();

        let saved = service
            .update(
                SettingsUpdate {
                    ads_txt_content: Some("example.com, pub-1, DIRECT".to_string()),
                    snippets: Some(vec![snippet("three")]),
                },
                &admin(),
            )
            .await
            .unwrap();

        assert_eq!(saved.ads_txt_content, "example.com, pub-1, DIRECT");
        assert_eq!(saved.snippets, vec![snippet("three")]);
        assert_eq!(service.get().await.unwrap(), saved);
        assert_eq!(service.ads_txt().await.unwrap(), "example.com, pub-1, DIRECT");
        assert_eq!(revalidator.full_revalidations(), 2);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_change_settings() {
        let (service, revalidator) = service();
        let bob = seed::users().find("2").cloned().unwrap();

        let result = service
            .update(
                SettingsUpdate {
                    ads_txt_content: Some("hijacked".to_string()),
                    snippets: None,
                },
                &bob,
            )
            .await;

        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
        assert_eq!(service.get().await.unwrap(), seed::settings());
        assert_eq!(revalidator.full_revalidations(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let service = SettingsService::new(
            Arc::new(BrokenSettings),
            Arc::new(seed::users()),
            Arc::new(RecordingRevalidator::default()),
        );

        let err = service.get().await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(!err.to_string().contains("disk on fire"));
    }
}
