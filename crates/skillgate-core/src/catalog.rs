//! Prompt Catalog: embedded per-feature system prompts and the generic default.
//! The fallback of last resort for prompt resolution; compiled into the binary.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Feature selector sent by the client. Anything outside `1..=6` is `Unspecified`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FeatureId {
    /// 1: 采访策划
    Interview,
    /// 2: 内容改写
    Storytelling,
    /// 3: 标题扩展
    Expand,
    /// 4: 语音合成
    Tts,
    /// 5: 选题推荐
    Topic,
    /// 6: 素材推荐
    Visual,
    #[default]
    Unspecified,
}

impl FeatureId {
    pub const KNOWN: [FeatureId; 6] = [
        FeatureId::Interview,
        FeatureId::Storytelling,
        FeatureId::Expand,
        FeatureId::Tts,
        FeatureId::Topic,
        FeatureId::Visual,
    ];

    pub fn from_number(n: u64) -> Self {
        match n {
            1 => FeatureId::Interview,
            2 => FeatureId::Storytelling,
            3 => FeatureId::Expand,
            4 => FeatureId::Tts,
            5 => FeatureId::Topic,
            6 => FeatureId::Visual,
            _ => FeatureId::Unspecified,
        }
    }

    /// Accepts the JSON number `3` or the string `"3"`; everything else is unspecified.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => match (n.as_u64(), n.as_f64()) {
                (Some(u), _) => Self::from_number(u),
                (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 => Self::from_number(f as u64),
                _ => FeatureId::Unspecified,
            },
            Value::String(s) => match s.as_str() {
                "1" => FeatureId::Interview,
                "2" => FeatureId::Storytelling,
                "3" => FeatureId::Expand,
                "4" => FeatureId::Tts,
                "5" => FeatureId::Topic,
                "6" => FeatureId::Visual,
                _ => FeatureId::Unspecified,
            },
            _ => FeatureId::Unspecified,
        }
    }

    pub fn number(self) -> Option<u8> {
        match self {
            FeatureId::Interview => Some(1),
            FeatureId::Storytelling => Some(2),
            FeatureId::Expand => Some(3),
            FeatureId::Tts => Some(4),
            FeatureId::Topic => Some(5),
            FeatureId::Visual => Some(6),
            FeatureId::Unspecified => None,
        }
    }

    /// Skill file name under the skills directory (`1-interview.md`, ...).
    pub fn skill_file(self) -> Option<&'static str> {
        match self {
            FeatureId::Interview => Some("1-interview.md"),
            FeatureId::Storytelling => Some("2-storytelling.md"),
            FeatureId::Expand => Some("3-expand.md"),
            FeatureId::Tts => Some("4-tts.md"),
            FeatureId::Topic => Some("5-topic.md"),
            FeatureId::Visual => Some("6-visual.md"),
            FeatureId::Unspecified => None,
        }
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.number() {
            Some(n) => write!(f, "{}", n),
            None => f.write_str("default"),
        }
    }
}

impl<'de> Deserialize<'de> for FeatureId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(FeatureId::from_json(&value))
    }
}

const INTERVIEW: &str = include_str!("../prompts/1-interview.md");
const STORYTELLING: &str = include_str!("../prompts/2-storytelling.md");
const EXPAND: &str = include_str!("../prompts/3-expand.md");
const TTS: &str = include_str!("../prompts/4-tts.md");
const TOPIC: &str = include_str!("../prompts/5-topic.md");
const VISUAL: &str = include_str!("../prompts/6-visual.md");
const DEFAULT: &str = include_str!("../prompts/default.md");

/// Static feature → prompt table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCatalog;

impl PromptCatalog {
    pub fn embedded() -> Self {
        PromptCatalog
    }

    /// Prompt for a known feature; `None` for `Unspecified`.
    pub fn lookup(&self, feature: FeatureId) -> Option<&'static str> {
        let text = match feature {
            FeatureId::Interview => INTERVIEW,
            FeatureId::Storytelling => STORYTELLING,
            FeatureId::Expand => EXPAND,
            FeatureId::Tts => TTS,
            FeatureId::Topic => TOPIC,
            FeatureId::Visual => VISUAL,
            FeatureId::Unspecified => return None,
        };
        Some(text.trim())
    }

    /// Generic prompt describing all six features. Always present.
    pub fn default_prompt(&self) -> &'static str {
        DEFAULT.trim()
    }
}
