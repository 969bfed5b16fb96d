//! Suggestion engine for the chat input.
//!
//! Three detectors run in a fixed priority order on every input mutation:
//! emoji (`:token` at end of input), mention (text after the last `@`), and
//! slash command (the whole input is a partial command). Only the highest
//! priority detector with a non-empty result set is surfaced, as a single
//! tagged [`SuggestionSet`] so that conflicting suggestion surfaces cannot
//! coexist.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::{COMMANDS, Emoji, SlashCommand, UserRecord};

/// Candidate cap for a ranked mention lookup.
pub const MENTION_LOOKUP_LIMIT: u32 = 100;
/// Candidate cap for a bare `@` lookup, shown unranked.
pub const MENTION_BARE_LIMIT: u32 = 5;
/// Minimum greedy-subsequence score for a mention candidate to be kept.
pub const MENTION_SCORE_THRESHOLD: f64 = 0.6;

fn emoji_trigger(text: &str) -> Option<&str> {
    static RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":(\w+)$").unwrap());
    RE.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn command_trigger(text: &str) -> Option<&str> {
    static RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/(\w*)$").unwrap());
    RE.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Greedy subsequence score of `query` against `username`.
///
/// Walks both strings left to right; a character match advances both
/// cursors and counts as a hit, a miss advances only the username cursor.
/// The score is hits divided by query length, so it lands in `[0, 1]` and
/// is 1 exactly when the scan consumes the whole query. Comparison is over
/// lowercased text. An empty query scores 0.
#[must_use]
pub fn fuzzy_match(username: &str, query: &str) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let name: Vec<char> = username.to_lowercase().chars().collect();
    let query: Vec<char> = query.to_lowercase().chars().collect();

    let mut hits = 0usize;
    let mut query_idx = 0usize;
    for ch in &name {
        if query_idx < query.len() && *ch == query[query_idx] {
            hits += 1;
            query_idx += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let score = hits as f64 / query.len() as f64;
    score
}

/// The kind of suggestion surface currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// Emoji glyph grid.
    Emoji,
    /// User mention list.
    Mention,
    /// Slash command list.
    Command,
}

/// The active suggestion surface: an ordered match list plus one focused
/// index. Exactly one variant exists at a time; the engine holds `None`
/// when nothing is suggested.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionSet {
    /// Emoji matches in corpus order.
    Emoji {
        /// Matching corpus entries.
        matches: Vec<Emoji>,
        /// Focused index, always `< matches.len()`.
        focused: usize,
    },
    /// Mention candidates in lookup order.
    Mention {
        /// Candidates passing the score threshold (or the unranked head
        /// for a bare trigger).
        matches: Vec<UserRecord>,
        /// Focused index, always `< matches.len()`.
        focused: usize,
    },
    /// Prefix-matching commands in registry order.
    Command {
        /// Matching commands.
        matches: Vec<SlashCommand>,
        /// Focused index, always `< matches.len()`.
        focused: usize,
    },
}

impl SuggestionSet {
    #[must_use]
    pub const fn kind(&self) -> SuggestionKind {
        match self {
            Self::Emoji { .. } => SuggestionKind::Emoji,
            Self::Mention { .. } => SuggestionKind::Mention,
            Self::Command { .. } => SuggestionKind::Command,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Emoji { matches, .. } => matches.len(),
            Self::Mention { matches, .. } => matches.len(),
            Self::Command { matches, .. } => matches.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn focused(&self) -> usize {
        match self {
            Self::Emoji { focused, .. }
            | Self::Mention { focused, .. }
            | Self::Command { focused, .. } => *focused,
        }
    }

    pub(crate) const fn set_focused(&mut self, index: usize) {
        match self {
            Self::Emoji { focused, .. }
            | Self::Mention { focused, .. }
            | Self::Command { focused, .. } => *focused = index,
        }
    }
}

/// A mention lookup the caller must run against the directory port.
///
/// Every lookup carries a monotonically increasing sequence number; the
/// engine discards any response whose number is not the most recently
/// issued, so a slow early request can never overwrite a fast later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionLookup {
    /// Trigger token after the last `@`; empty for a bare trigger.
    pub query: String,
    /// Candidate cap to request.
    pub limit: u32,
    /// Request tag for latest-wins filtering.
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingMention {
    query: String,
    seq: u64,
}

/// Runs the detectors and owns the active [`SuggestionSet`].
pub struct SuggestionEngine {
    corpus: Vec<Emoji>,
    active: Option<SuggestionSet>,
    pending_mention: Option<PendingMention>,
    next_seq: u64,
}

impl SuggestionEngine {
    #[must_use]
    pub fn new(corpus: Vec<Emoji>) -> Self {
        Self {
            corpus,
            active: None,
            pending_mention: None,
            next_seq: 0,
        }
    }

    /// The currently surfaced suggestion set, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&SuggestionSet> {
        self.active.as_ref()
    }

    pub(crate) const fn active_mut(&mut self) -> Option<&mut SuggestionSet> {
        self.active.as_mut()
    }

    /// Drops the active set and any in-flight mention interest.
    pub fn reset(&mut self) {
        self.active = None;
        self.pending_mention = None;
    }

    /// Re-runs the detectors against the new input text.
    ///
    /// Emoji and command detection resolve synchronously. Mention detection
    /// returns a [`MentionLookup`] the caller must execute; until its result
    /// arrives via [`Self::apply_mention_results`], a previously surfaced
    /// mention list stays visible.
    pub fn process_input(&mut self, text: &str) -> Option<MentionLookup> {
        if let Some(token) = emoji_trigger(text) {
            let matches: Vec<Emoji> = self
                .corpus
                .iter()
                .filter(|emoji| emoji.matches_token(token))
                .cloned()
                .collect();
            if !matches.is_empty() {
                self.active = Some(SuggestionSet::Emoji {
                    matches,
                    focused: 0,
                });
                self.pending_mention = None;
                return None;
            }
        }

        if let Some(at_pos) = text.rfind('@') {
            let query = text[at_pos + 1..].to_string();
            let limit = if query.is_empty() {
                MENTION_BARE_LIMIT
            } else {
                MENTION_LOOKUP_LIMIT
            };
            let seq = self.next_seq;
            self.next_seq += 1;
            self.pending_mention = Some(PendingMention {
                query: query.clone(),
                seq,
            });
            if !matches!(self.active, Some(SuggestionSet::Mention { .. })) {
                self.active = None;
            }
            return Some(MentionLookup { query, limit, seq });
        }

        if let Some(token) = command_trigger(text) {
            let partial = format!("/{token}");
            let matches: Vec<SlashCommand> = COMMANDS
                .iter()
                .filter(|command| command.matches_prefix(&partial))
                .copied()
                .collect();
            if !matches.is_empty() {
                self.active = Some(SuggestionSet::Command {
                    matches,
                    focused: 0,
                });
                self.pending_mention = None;
                return None;
            }
        }

        self.active = None;
        self.pending_mention = None;
        None
    }

    /// Applies a completed mention lookup. Returns `true` when the result
    /// was accepted; stale sequence numbers are discarded unchanged.
    pub fn apply_mention_results(&mut self, seq: u64, candidates: Vec<UserRecord>) -> bool {
        let Some(pending) = self.pending_mention.as_ref() else {
            return false;
        };
        if pending.seq != seq {
            return false;
        }

        let matches: Vec<UserRecord> = if pending.query.is_empty() {
            candidates
        } else {
            let query = pending.query.clone();
            candidates
                .into_iter()
                .filter(|user| fuzzy_match(user.username(), &query) > MENTION_SCORE_THRESHOLD)
                .collect()
        };

        self.active = if matches.is_empty() {
            None
        } else {
            Some(SuggestionSet::Mention {
                matches,
                focused: 0,
            })
        };
        true
    }

    /// Records a failed mention lookup: the suggestion list is cleared and
    /// the error stays out of the UI. Stale failures are ignored.
    pub fn apply_mention_failure(&mut self, seq: u64) {
        if self
            .pending_mention
            .as_ref()
            .is_some_and(|pending| pending.seq == seq)
        {
            self.active = None;
            self.pending_mention = None;
        }
    }

    /// Rewrites `input` with the focused suggestion and returns the new
    /// input text, or `None` when nothing is active.
    ///
    /// Emoji replace only the trailing `:token`; a mention replaces the
    /// whole input with `@username`; a command replaces the whole input
    /// with the command string.
    pub fn commit_focused(&mut self, input: &str) -> Option<String> {
        static TRAILING_TOKEN: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r":\w+$").unwrap());

        let active = self.active.take()?;
        self.pending_mention = None;

        match active {
            SuggestionSet::Emoji { matches, focused } => {
                let emoji = matches.get(focused)?;
                Some(
                    TRAILING_TOKEN
                        .replace(input, emoji.native_glyph())
                        .into_owned(),
                )
            }
            SuggestionSet::Mention { matches, focused } => {
                let user = matches.get(focused)?;
                Some(format!("@{}", user.username()))
            }
            SuggestionSet::Command { matches, focused } => {
                let command = matches.get(focused)?;
                Some(command.command().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use test_case::test_case;

    fn corpus() -> Vec<Emoji> {
        vec![
            Emoji::new("grinning", "Grinning Face")
                .with_keywords(vec!["smile".into(), "happy".into()])
                .with_native("😀"),
            Emoji::new("smirk", "Smirking Face")
                .with_keywords(vec!["sly".into()])
                .with_native("😏"),
            Emoji::new("ghost", "Ghost")
                .with_keywords(vec!["spooky".into()])
                .with_native("👻"),
            Emoji::new("blank", "Unrenderable Smiley"),
        ]
    }

    fn user(id: &str, username: &str) -> UserRecord {
        UserRecord::new(id, username, username, DateTime::<Utc>::UNIX_EPOCH, true)
    }

    #[test_case("vanshika", "van", 1.0; "prefix consumes query")]
    #[test_case("vanshika", "vska", 1.0; "subsequence consumes query")]
    #[test_case("vanshika", "zzz", 0.0; "no hits")]
    #[test_case("bob", "bobby", 0.6; "query longer than name")]
    fn test_fuzzy_match_scores(username: &str, query: &str, expected: f64) {
        let score = fuzzy_match(username, query);
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_fuzzy_match_bounds() {
        for query in ["a", "an", "xyz", "vanshika"] {
            let score = fuzzy_match("vanshika", query);
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_fuzzy_match_is_case_insensitive() {
        assert!((fuzzy_match("VanShika", "vAN") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_emoji_detector_matches_name_and_keywords_in_corpus_order() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input("hello :smi");

        let Some(SuggestionSet::Emoji { matches, focused }) = engine.active() else {
            panic!("expected emoji suggestions");
        };
        // "smi" hits Grinning (keyword smile), Smirking (name), and the
        // unrenderable Smiley, in corpus order.
        let ids: Vec<&str> = matches.iter().map(Emoji::id).collect();
        assert_eq!(ids, ["grinning", "smirk", "blank"]);
        assert_eq!(*focused, 0);
    }

    #[test]
    fn test_emoji_detector_requires_trailing_token() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input(":smi and more");
        assert!(engine.active().is_none());
    }

    #[test]
    fn test_command_detector_prefix_filters() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input("/ti");

        let Some(SuggestionSet::Command { matches, .. }) = engine.active() else {
            panic!("expected command suggestions");
        };
        let commands: Vec<&str> = matches.iter().map(|c| c.command()).collect();
        assert_eq!(commands, ["/title"]);
    }

    #[test]
    fn test_command_detector_rejects_arguments() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input("/mute someone");
        assert!(engine.active().is_none());
    }

    #[test]
    fn test_bare_slash_lists_every_command() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input("/");

        let Some(SuggestionSet::Command { matches, .. }) = engine.active() else {
            panic!("expected command suggestions");
        };
        assert_eq!(matches.len(), COMMANDS.len());
    }

    #[test]
    fn test_mention_detector_issues_lookup_after_last_at() {
        let mut engine = SuggestionEngine::new(corpus());
        let lookup = engine
            .process_input("cc @alice and @bo")
            .expect("expected a lookup");
        assert_eq!(lookup.query, "bo");
        assert_eq!(lookup.limit, MENTION_LOOKUP_LIMIT);
    }

    #[test]
    fn test_bare_mention_requests_unranked_head() {
        let mut engine = SuggestionEngine::new(corpus());
        let lookup = engine.process_input("@").expect("expected a lookup");
        assert_eq!(lookup.query, "");
        assert_eq!(lookup.limit, MENTION_BARE_LIMIT);

        let accepted =
            engine.apply_mention_results(lookup.seq, vec![user("1", "ada"), user("2", "brent")]);
        assert!(accepted);
        let Some(SuggestionSet::Mention { matches, .. }) = engine.active() else {
            panic!("expected mention suggestions");
        };
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_mention_results_score_filtered() {
        let mut engine = SuggestionEngine::new(corpus());
        let lookup = engine.process_input("@van").expect("expected a lookup");

        let candidates = vec![
            user("1", "vanshika"), // score 1.0
            user("2", "ivan"),     // v-a-n subsequence, score 1.0
            user("3", "victor"),   // only v, score 1/3
        ];
        engine.apply_mention_results(lookup.seq, candidates);

        let Some(SuggestionSet::Mention { matches, .. }) = engine.active() else {
            panic!("expected mention suggestions");
        };
        let names: Vec<&str> = matches.iter().map(UserRecord::username).collect();
        assert_eq!(names, ["vanshika", "ivan"]);
    }

    #[test]
    fn test_stale_mention_response_discarded() {
        let mut engine = SuggestionEngine::new(corpus());
        let first = engine.process_input("@va").expect("lookup");
        let second = engine.process_input("@van").expect("lookup");

        // The slow first response lands after the second was issued.
        assert!(!engine.apply_mention_results(first.seq, vec![user("9", "valentin")]));
        assert!(engine.active().is_none());

        assert!(engine.apply_mention_results(second.seq, vec![user("1", "vanshika")]));
        assert_eq!(engine.active().map(SuggestionSet::len), Some(1));
    }

    #[test]
    fn test_mention_response_ignored_after_trigger_left() {
        let mut engine = SuggestionEngine::new(corpus());
        let lookup = engine.process_input("@gh").expect("lookup");
        // Input no longer ends in a mention trigger; emoji takes over.
        engine.process_input("@gh :gho");

        assert!(!engine.apply_mention_results(lookup.seq, vec![user("1", "ghost")]));
        assert!(matches!(
            engine.active(),
            Some(SuggestionSet::Emoji { .. })
        ));
    }

    #[test]
    fn test_mention_failure_clears_suggestions() {
        let mut engine = SuggestionEngine::new(corpus());
        let lookup = engine.process_input("@va").expect("lookup");
        engine.apply_mention_results(lookup.seq, vec![user("1", "vanshika")]);

        let lookup = engine.process_input("@van").expect("lookup");
        engine.apply_mention_failure(lookup.seq);
        assert!(engine.active().is_none());
    }

    #[test]
    fn test_emoji_takes_precedence_over_mention() {
        let mut engine = SuggestionEngine::new(corpus());
        // Both triggers present; emoji wins and no lookup is issued.
        assert!(engine.process_input("@alice :smi").is_none());
        assert!(matches!(
            engine.active(),
            Some(SuggestionSet::Emoji { .. })
        ));
    }

    #[test]
    fn test_empty_emoji_results_fall_through_to_mention() {
        let mut engine = SuggestionEngine::new(corpus());
        let lookup = engine.process_input("@alice :qqq");
        assert!(lookup.is_some());
    }

    #[test]
    fn test_commit_emoji_replaces_trailing_token_only() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input("good morning :grin");
        let new_input = engine.commit_focused("good morning :grin").expect("commit");
        assert_eq!(new_input, "good morning 😀");
        assert!(engine.active().is_none());
    }

    #[test]
    fn test_commit_emoji_uses_fallback_glyph() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input(":unrenderable");
        let new_input = engine.commit_focused(":unrenderable").expect("commit");
        assert_eq!(new_input, crate::domain::entities::FALLBACK_GLYPH);
    }

    #[test]
    fn test_commit_mention_replaces_whole_input() {
        let mut engine = SuggestionEngine::new(corpus());
        let lookup = engine.process_input("hello there @van").expect("lookup");
        engine.apply_mention_results(lookup.seq, vec![user("1", "vanshika")]);

        let new_input = engine.commit_focused("hello there @van").expect("commit");
        assert_eq!(new_input, "@vanshika");
    }

    #[test]
    fn test_commit_command_replaces_input() {
        let mut engine = SuggestionEngine::new(corpus());
        engine.process_input("/de");
        let new_input = engine.commit_focused("/de").expect("commit");
        assert_eq!(new_input, "/description");
    }

    #[test]
    fn test_commit_without_active_set() {
        let mut engine = SuggestionEngine::new(corpus());
        assert!(engine.commit_focused("anything").is_none());
    }
}
