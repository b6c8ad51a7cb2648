use prometheus::{IntCounter, Registry};

pub struct Metrics {
    pub files_processed: IntCounter,
    pub fields_requested: IntCounter,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Self {
        let files_processed =
            IntCounter::new("files_processed", "Number of files obfuscated").unwrap();
        let fields_requested =
            IntCounter::new("fields_requested", "Number of PII fields requested").unwrap();
        registry.register(Box::new(files_processed.clone())).unwrap();
        registry.register(Box::new(fields_requested.clone())).unwrap();
        Self {
            files_processed,
            fields_requested,
        }
    }
}
