//! Prometheus registry and counters for `/metrics`.
use labelforge_core::{Label, MultiMarketResult};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    generated_labels: IntCounterVec,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let generated_labels = IntCounterVec::new(
            Opts::new(
                "labelforge_generated_labels_total",
                "Labels generated, by market and source",
            ),
            &["market", "source"],
        )
        .expect("metric definition must be valid");
        registry
            .register(Box::new(generated_labels.clone()))
            .expect("metric registration must succeed");

        Self {
            registry,
            generated_labels,
        }
    }

    pub fn observe_label(&self, label: &Label) {
        let source = label.generated_by.to_string();
        self.generated_labels
            .with_label_values(&[label.market.as_str(), source.as_str()])
            .inc();
    }

    pub fn observe_batch(&self, result: &MultiMarketResult) {
        for label in result.labels.values() {
            self.observe_label(label);
        }
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}
