//! Skill sources: pluggable providers of prompt text keyed by feature.
//!
//! A source never fails outward. Read errors become `SkillLookup::NotFound`
//! so the resolver can fall back to the embedded catalog.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::FeatureId;

/// Outcome of a skill lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillLookup {
    Found(String),
    NotFound,
}

/// Why a skill could not be loaded. Stays inside the source; only logged.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("no skill file for feature {0}")]
    NoSkillFile(FeatureId),
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("skill file {0} is empty")]
    Empty(PathBuf),
}

#[async_trait]
pub trait PromptSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    async fn load(&self, feature: FeatureId) -> SkillLookup;
}

/// Reads `<dir>/<n>-<name>.md` per feature.
#[derive(Debug, Clone)]
pub struct SkillDirectory {
    dir: PathBuf,
}

impl SkillDirectory {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    async fn read(&self, feature: FeatureId) -> Result<String, SkillError> {
        let file = feature
            .skill_file()
            .ok_or(SkillError::NoSkillFile(feature))?;
        let path = self.dir.join(file);
        // Invalid UTF-8 surfaces as io::ErrorKind::InvalidData.
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SkillError::Io {
                path: path.clone(),
                source,
            })?;
        if text.trim().is_empty() {
            return Err(SkillError::Empty(path));
        }
        Ok(text)
    }
}

#[async_trait]
impl PromptSource for SkillDirectory {
    fn name(&self) -> &str {
        "skill-directory"
    }

    async fn load(&self, feature: FeatureId) -> SkillLookup {
        match self.read(feature).await {
            Ok(text) => SkillLookup::Found(text),
            Err(SkillError::NoSkillFile(_)) => SkillLookup::NotFound,
            Err(e) => {
                tracing::warn!("[SKILL] falling back to embedded prompt: {}", e);
                SkillLookup::NotFound
            }
        }
    }
}

/// In-memory prompt overrides, e.g. assembled at wiring time.
#[derive(Debug, Clone, Default)]
pub struct InlineSkills {
    prompts: HashMap<FeatureId, String>,
}

impl InlineSkills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: FeatureId, prompt: impl Into<String>) -> Self {
        self.prompts.insert(feature, prompt.into());
        self
    }
}

#[async_trait]
impl PromptSource for InlineSkills {
    fn name(&self) -> &str {
        "inline"
    }

    async fn load(&self, feature: FeatureId) -> SkillLookup {
        match self.prompts.get(&feature) {
            Some(p) if !p.trim().is_empty() => SkillLookup::Found(p.clone()),
            _ => SkillLookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_skill_file_verbatim() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("2-storytelling.md"), "rewrite it\n").expect("write");

        let source = SkillDirectory::new(dir.path());
        assert_eq!(
            source.load(FeatureId::Storytelling).await,
            SkillLookup::Found("rewrite it\n".to_string())
        );
    }

    #[tokio::test]
    async fn missing_empty_and_invalid_files_are_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("3-expand.md"), "   \n").expect("write");
        std::fs::write(dir.path().join("4-tts.md"), [0xff, 0xfe, 0x00]).expect("write");

        let source = SkillDirectory::new(dir.path());
        assert_eq!(source.load(FeatureId::Interview).await, SkillLookup::NotFound);
        assert_eq!(source.load(FeatureId::Expand).await, SkillLookup::NotFound);
        assert_eq!(source.load(FeatureId::Tts).await, SkillLookup::NotFound);
        assert_eq!(source.load(FeatureId::Unspecified).await, SkillLookup::NotFound);
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let source = SkillDirectory::new("/nonexistent/skillgate/skills");
        assert_eq!(source.load(FeatureId::Topic).await, SkillLookup::NotFound);
    }

    #[tokio::test]
    async fn inline_skills() {
        let source = InlineSkills::new()
            .with(FeatureId::Visual, "draw")
            .with(FeatureId::Topic, "");
        assert_eq!(
            source.load(FeatureId::Visual).await,
            SkillLookup::Found("draw".into())
        );
        assert_eq!(source.load(FeatureId::Topic).await, SkillLookup::NotFound);
        assert_eq!(source.load(FeatureId::Tts).await, SkillLookup::NotFound);
    }
}
