//! Process-local registry.
//!
//! Holds published templates in memory behind the same contract as the
//! HTTP client. Used by the test suite and available for embedding; it
//! also demonstrates that multiple engines with independent registries
//! can coexist in one process (no ambient state).

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;

use super::client::{RegistryClient, RemoteEntry};
use crate::error::{Result, TdkError};
use crate::template::model::TemplateModel;

struct Published {
    model: TemplateModel,
    published_at: chrono::DateTime<Utc>,
}

/// In-memory registry implementation.
#[derive(Default)]
pub struct InMemoryRegistry {
    templates: Mutex<BTreeMap<(String, String), Published>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of published template versions.
    pub fn len(&self) -> usize {
        self.templates.lock().expect("registry lock").len()
    }

    /// Whether nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fingerprint currently published at an identifier+version.
    pub fn fingerprint_of(&self, identifier: &str, version: &str) -> Option<String> {
        self.templates
            .lock()
            .expect("registry lock")
            .get(&(identifier.to_string(), version.to_string()))
            .map(|p| p.model.fingerprint())
    }
}

impl RegistryClient for InMemoryRegistry {
    fn list(&self) -> Result<Vec<RemoteEntry>> {
        let templates = self.templates.lock().expect("registry lock");
        Ok(templates
            .iter()
            .map(|((identifier, version), published)| RemoteEntry {
                identifier: identifier.clone(),
                version: version.clone(),
                published_at: Some(published.published_at),
            })
            .collect())
    }

    fn fetch(&self, identifier: &str, version: &str) -> Result<TemplateModel> {
        let templates = self.templates.lock().expect("registry lock");
        templates
            .get(&(identifier.to_string(), version.to_string()))
            .map(|p| p.model.clone())
            .ok_or_else(|| TdkError::NotFound {
                identifier: identifier.to_string(),
                version: version.to_string(),
            })
    }

    fn publish(&self, model: &TemplateModel, force: bool) -> Result<()> {
        let mut templates = self.templates.lock().expect("registry lock");
        let key = (model.identifier.clone(), model.version.clone());

        if let Some(existing) = templates.get(&key) {
            if existing.model.fingerprint() != model.fingerprint() && !force {
                return Err(TdkError::VersionConflict {
                    identifier: model.identifier.clone(),
                    version: model.version.clone(),
                });
            }
        }

        templates.insert(
            key,
            Published {
                model: model.clone(),
                published_at: Utc::now(),
            },
        );
        Ok(())
    }
}
