use crate::sink_trait::ProgressSink;
use habla_core::SinkError;
use std::collections::HashMap;

pub struct SinkRegistry {
    factories: HashMap<String, fn() -> Box<dyn ProgressSink>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("jsonl", || Box::new(crate::jsonl_sink::JsonlSink::new()));
        registry.register("log", || Box::new(crate::log_sink::LogSink::new()));
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn ProgressSink>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn ProgressSink>, SinkError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| SinkError::NotFound(name.to_string()))
    }

    pub fn list_sinks(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
