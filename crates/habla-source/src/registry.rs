use crate::source_trait::TranscriptSource;
use habla_core::SourceError;
use std::collections::HashMap;

pub struct SourceRegistry {
    factories: HashMap<String, fn() -> Box<dyn TranscriptSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("stdin", || Box::new(crate::stdin_source::StdinSource::new()));
        registry.register("script", || {
            Box::new(crate::script_source::ScriptSource::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn TranscriptSource>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn TranscriptSource>, SourceError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| SourceError::NotFound(name.to_string()))
    }

    pub fn list_sources(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
