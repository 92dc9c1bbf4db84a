use aho_corasick::AhoCorasick;
use serde::Serialize;

/// A topic name found in text. `start..end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicMatch {
    pub topic: String,
    pub start: usize,
    pub end: usize,
}

/// A run of dialogue text, either plain or linking to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextSegment {
    Plain { text: String },
    Link { text: String, topic: String },
}

/// Multi-pattern matcher over the known topic names.
#[derive(Debug, Clone, Default)]
pub struct TopicMatcher {
    topics: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl TopicMatcher {
    pub fn new<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let topics: Vec<String> = topics
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        if topics.is_empty() {
            return Self::default();
        }
        let automaton = match AhoCorasick::new(&topics) {
            Ok(automaton) => Some(automaton),
            Err(err) => {
                tracing::warn!(%err, topics = topics.len(), "topic matcher could not be built");
                None
            }
        };
        Self { topics, automaton }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Every occurrence of every topic, overlaps included.
    pub fn find_all(&self, text: &str) -> Vec<TopicMatch> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };
        automaton
            .find_overlapping_iter(text)
            .map(|m| TopicMatch {
                topic: self.topics[m.pattern().as_usize()].clone(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// Occurrences that survive overlap resolution and the word-boundary
    /// filter, ordered by start.
    pub fn search(&self, text: &str) -> Vec<TopicMatch> {
        filter_word_boundaries(text, resolve_overlaps(self.find_all(text)))
    }

    /// Split `text` into plain and linked runs.
    ///
    /// A surviving match that starts inside an earlier link (a partial
    /// overlap) is not linked.
    pub fn segment(&self, text: &str) -> Vec<TextSegment> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for m in self.search(text) {
            if m.start < cursor {
                continue;
            }
            if m.start > cursor {
                segments.push(TextSegment::Plain {
                    text: text[cursor..m.start].to_string(),
                });
            }
            segments.push(TextSegment::Link {
                text: text[m.start..m.end].to_string(),
                topic: m.topic,
            });
            cursor = m.end;
        }
        if cursor < text.len() {
            segments.push(TextSegment::Plain {
                text: text[cursor..].to_string(),
            });
        }
        segments
    }
}

/// Sort by start ascending then end descending, and drop every match that
/// lies entirely inside an already kept one.
pub fn resolve_overlaps(mut matches: Vec<TopicMatch>) -> Vec<TopicMatch> {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut kept: Vec<TopicMatch> = Vec::with_capacity(matches.len());
    // Kept matches all start at or before the current one, so it is
    // contained iff it ends no later than the furthest kept end.
    let mut furthest_end = None;
    for m in matches {
        if furthest_end.is_some_and(|end| m.end <= end) {
            continue;
        }
        furthest_end = Some(m.end);
        kept.push(m);
    }
    kept
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Keep matches that are not glued to a word character on either side.
pub fn filter_word_boundaries(text: &str, matches: Vec<TopicMatch>) -> Vec<TopicMatch> {
    matches
        .into_iter()
        .filter(|m| {
            let before = text[..m.start].chars().next_back();
            let after = text[m.end..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
        .collect()
}
