use crate::app::ports::EntityExtractorPort;
use crate::error::{PipelineError, Result};
use crate::types::Entity;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LexiconEntry {
    phrase: String,
    label: String,
}

/// Lexicon-backed entity tagger: greedy longest-match over whitespace tokens,
/// left to right, non-overlapping, entities reported in source order. Phrases
/// are stored lowercase because tagging runs on cleaned text.
pub struct LexiconTagger {
    // First token of each phrase -> (remaining tokens, label), longest first
    index: HashMap<String, Vec<(Vec<String>, String)>>,
    entry_count: usize,
}

impl LexiconTagger {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Model(format!(
                "Failed to read entity lexicon '{}': {}",
                path.display(),
                e
            ))
        })?;
        let entries: Vec<LexiconEntry> = serde_json::from_str(&content)?;
        Ok(Self::from_entries(
            entries.into_iter().map(|e| (e.phrase, e.label)),
        ))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut index: HashMap<String, Vec<(Vec<String>, String)>> = HashMap::new();
        let mut entry_count = 0;
        for (phrase, label) in entries {
            let lowered = phrase.to_lowercase();
            let mut tokens = lowered.split_whitespace().map(str::to_string);
            let Some(first) = tokens.next() else {
                continue;
            };
            index
                .entry(first)
                .or_default()
                .push((tokens.collect(), label));
            entry_count += 1;
        }
        for candidates in index.values_mut() {
            candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        }
        Self { index, entry_count }
    }

    pub fn len(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

impl EntityExtractorPort for LexiconTagger {
    fn extract_entities(&self, cleaned_text: &str) -> Vec<Entity> {
        let tokens: Vec<&str> = cleaned_text.split_whitespace().collect();
        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let mut matched = false;
            if let Some(candidates) = self.index.get(tokens[i]) {
                for (rest, label) in candidates {
                    let end = i + 1 + rest.len();
                    if end <= tokens.len()
                        && rest
                            .iter()
                            .zip(&tokens[i + 1..end])
                            .all(|(expected, actual)| expected == actual)
                    {
                        entities.push(Entity {
                            text: tokens[i..end].join(" "),
                            label: label.clone(),
                        });
                        i = end;
                        matched = true;
                        break;
                    }
                }
            }
            if !matched {
                i += 1;
            }
        }
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> LexiconTagger {
        LexiconTagger::from_entries([
            ("los angeles".to_string(), "GPE".to_string()),
            ("los angeles county".to_string(), "GPE".to_string()),
            ("tokyo".to_string(), "GPE".to_string()),
            ("bob".to_string(), "PERSON".to_string()),
            ("red cross".to_string(), "ORG".to_string()),
        ])
    }

    #[test]
    fn finds_entities_in_source_order() {
        let entities = tagger().extract_entities("fire tokyo helped bob evacuate los angeles");
        let got: Vec<(&str, &str)> = entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![("tokyo", "GPE"), ("bob", "PERSON"), ("los angeles", "GPE")]
        );
    }

    #[test]
    fn prefers_longest_match() {
        let entities = tagger().extract_entities("evacuations across los angeles county today");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "los angeles county");
    }

    #[test]
    fn partial_phrase_does_not_match() {
        let entities = tagger().extract_entities("los banos flooding");
        assert!(entities.is_empty());
    }

    #[test]
    fn empty_text_yields_no_entities() {
        assert!(tagger().extract_entities("").is_empty());
    }

    #[test]
    fn blank_phrases_are_skipped_at_load() {
        let tagger = LexiconTagger::from_entries([
            ("".to_string(), "GPE".to_string()),
            ("paris".to_string(), "GPE".to_string()),
        ]);
        assert_eq!(tagger.len(), 1);
    }
}
