use std::collections::HashMap;
use std::sync::Arc;

use crate::player::track::TrackRef;
use crate::player::traits::TrackSource;

// One source per reference scheme
#[derive(Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn TrackSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, scheme: impl Into<String>, source: Arc<dyn TrackSource>) {
        self.sources.insert(scheme.into(), source);
    }

    pub fn get(&self, reference: &TrackRef) -> Option<Arc<dyn TrackSource>> {
        self.sources.get(reference.scheme()).cloned()
    }
}
