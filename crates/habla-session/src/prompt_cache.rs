use std::collections::HashMap;

/// Caller-owned cache of prompt audio clips, keyed by a card's audio key.
///
/// Eviction-free map contract: entries live until [`clear`](Self::clear).
/// The cache is injected into whatever plays prompts rather than living as
/// ambient global state.
#[derive(Debug, Default)]
pub struct PromptCache {
    entries: HashMap<String, Vec<u8>>,
}

impl PromptCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    pub fn set(&mut self, key: impl Into<String>, audio: Vec<u8>) {
        self.entries.insert(key.into(), audio);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
