//! Prompt Resolver: feature → exactly one system prompt.
//! Order: skill source (if wired), embedded catalog, generic default. Never fails.

use std::sync::Arc;

use crate::catalog::{FeatureId, PromptCatalog};
use crate::skill_source::{PromptSource, SkillLookup};

#[derive(Clone)]
pub struct PromptResolver {
    skills: Option<Arc<dyn PromptSource>>,
    catalog: PromptCatalog,
}

impl PromptResolver {
    /// Catalog-only resolver.
    pub fn new(catalog: PromptCatalog) -> Self {
        Self {
            skills: None,
            catalog,
        }
    }

    pub fn with_skills(mut self, skills: Arc<dyn PromptSource>) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn skill_source(&self) -> Option<&str> {
        self.skills.as_deref().map(|s| s.name())
    }

    pub async fn resolve(&self, feature: FeatureId) -> String {
        if let Some(skills) = &self.skills {
            if let SkillLookup::Found(text) = skills.load(feature).await {
                tracing::debug!("[PROMPT] feature {} from {}", feature, skills.name());
                return text;
            }
        }
        match self.catalog.lookup(feature) {
            Some(text) => text.to_string(),
            None => self.catalog.default_prompt().to_string(),
        }
    }
}

impl Default for PromptResolver {
    fn default() -> Self {
        Self::new(PromptCatalog::embedded())
    }
}
