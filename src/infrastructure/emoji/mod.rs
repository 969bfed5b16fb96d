//! Bundled emoji corpus.
//!
//! The corpus ships inside the binary as a JSON mapping of emoji id to
//! entry, in the emoji-mart data shape. Corpus order is significant:
//! suggestion results surface in insertion order, so the loader reads the
//! map in document order instead of through an ordered collection.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::domain::entities::Emoji;

const BUNDLED_CORPUS: &str = include_str!("../../../assets/emoji.json");

fn ordered_emojis<'de, D>(deserializer: D) -> Result<Vec<Emoji>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CorpusVisitor;

    impl<'de> Visitor<'de> for CorpusVisitor {
        type Value = Vec<Emoji>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a map of emoji id to emoji entry")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut emojis = Vec::new();
            while let Some((_, emoji)) = map.next_entry::<String, Emoji>()? {
                emojis.push(emoji);
            }
            Ok(emojis)
        }
    }

    deserializer.deserialize_map(CorpusVisitor)
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(deserialize_with = "ordered_emojis")]
    emojis: Vec<Emoji>,
}

/// The emoji corpus available to the suggestion engine.
#[derive(Debug, Clone)]
pub struct EmojiCorpus {
    emojis: Vec<Emoji>,
}

impl EmojiCorpus {
    /// Loads the corpus bundled into the binary. A corrupt bundle degrades
    /// to an empty corpus after a logged warning.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CORPUS).unwrap_or_else(|e| {
            warn!(error = %e, "Bundled emoji corpus failed to parse");
            Self { emojis: Vec::new() }
        })
    }

    /// Parses a corpus from JSON text.
    ///
    /// # Errors
    /// Returns the underlying JSON error for a malformed document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: CorpusFile = serde_json::from_str(json)?;
        Ok(Self {
            emojis: file.emojis,
        })
    }

    /// Entries in corpus order.
    #[must_use]
    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    /// Consumes the corpus into its entry list.
    #[must_use]
    pub fn into_emojis(self) -> Vec<Emoji> {
        self.emojis
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_corpus_parses() {
        let corpus = EmojiCorpus::bundled();
        assert!(!corpus.is_empty());
    }

    #[test]
    fn test_corpus_preserves_document_order() {
        let json = r#"{
            "emojis": {
                "zebra": {"id": "zebra", "name": "Zebra", "skins": [{"native": "🦓"}]},
                "apple": {"id": "apple", "name": "Red Apple", "skins": [{"native": "🍎"}]},
                "mango": {"id": "mango", "name": "Mango", "skins": [{"native": "🥭"}]}
            }
        }"#;

        let corpus = EmojiCorpus::from_json(json).expect("valid corpus");
        let ids: Vec<&str> = corpus.emojis().iter().map(Emoji::id).collect();
        assert_eq!(ids, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_malformed_corpus_is_an_error() {
        assert!(EmojiCorpus::from_json("{\"emojis\": 3}").is_err());
    }

    #[test]
    fn test_bundled_corpus_has_smile_entries() {
        // The suggestion flow's canonical example: ":smi" must hit
        // something by name or keyword.
        let corpus = EmojiCorpus::bundled();
        assert!(corpus.emojis().iter().any(|e| e.matches_token("smi")));
    }
}
