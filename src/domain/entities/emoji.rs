//! Emoji corpus entity.

use serde::{Deserialize, Serialize};

/// Glyph shown when an emoji has no native rendering.
pub const FALLBACK_GLYPH: &str = "🚦";

/// One skin variant of an emoji. Only the native glyph is relevant here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiSkin {
    /// Native unicode rendering, absent for image-only skins.
    #[serde(default)]
    pub native: Option<String>,
}

/// A single corpus entry: searchable name and keywords plus its skins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    id: String,
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    skins: Vec<EmojiSkin>,
}

impl Emoji {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            keywords: Vec::new(),
            skins: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    #[must_use]
    pub fn with_native(mut self, glyph: impl Into<String>) -> Self {
        self.skins.push(EmojiSkin {
            native: Some(glyph.into()),
        });
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// The glyph inserted on commit: first skin's native rendering, or the
    /// fallback glyph when no skin carries one.
    #[must_use]
    pub fn native_glyph(&self) -> &str {
        self.skins
            .first()
            .and_then(|skin| skin.native.as_deref())
            .unwrap_or(FALLBACK_GLYPH)
    }

    /// Case-insensitive substring match on name or any keyword.
    #[must_use]
    pub fn matches_token(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.name.to_lowercase().contains(&token)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_glyph() {
        let emoji = Emoji::new("smile", "Smile").with_native("😄");
        assert_eq!(emoji.native_glyph(), "😄");
    }

    #[test]
    fn test_native_glyph_falls_back() {
        let emoji = Emoji::new("custom", "Custom Thing");
        assert_eq!(emoji.native_glyph(), FALLBACK_GLYPH);
    }

    #[test]
    fn test_matches_token_on_name() {
        let emoji = Emoji::new("smile", "Grinning Smile");
        assert!(emoji.matches_token("smi"));
        assert!(emoji.matches_token("SMI"));
        assert!(!emoji.matches_token("frown"));
    }

    #[test]
    fn test_matches_token_on_keyword() {
        let emoji =
            Emoji::new("joy", "Joy").with_keywords(vec!["happy".into(), "tears".into()]);
        assert!(emoji.matches_token("tear"));
        assert!(!emoji.matches_token("sad"));
    }
}
