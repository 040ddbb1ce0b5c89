//! Prometheus metrics for the proof registry.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::registry::Registry;

/// Counters for registry activity.
///
/// Clones share the underlying counters, so one instance can live in the
/// registry while another is registered for scraping.
#[derive(Clone, Default)]
pub struct RegistryMetrics {
    /// Accepted Proof-of-Authority writes.
    pub authorities_stored: Counter,
    /// Accepted Proof-of-Signature writes.
    pub signatures_stored: Counter,
    /// Accepted Proof-of-Agreement writes.
    pub agreements_stored: Counter,
    /// Writes rejected by recovery or validation.
    pub writes_rejected: Counter,
    /// Read operations served, found or not.
    pub reads_served: Counter,
}

impl RegistryMetrics {
    /// Create a new set of registry metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all metrics with a Prometheus registry.
    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "daosign_authorities_stored",
            "Accepted Proof-of-Authority writes",
            self.authorities_stored.clone(),
        );

        registry.register(
            "daosign_signatures_stored",
            "Accepted Proof-of-Signature writes",
            self.signatures_stored.clone(),
        );

        registry.register(
            "daosign_agreements_stored",
            "Accepted Proof-of-Agreement writes",
            self.agreements_stored.clone(),
        );

        registry.register(
            "daosign_writes_rejected",
            "Writes rejected by recovery or validation",
            self.writes_rejected.clone(),
        );

        registry.register(
            "daosign_reads_served",
            "Read operations served",
            self.reads_served.clone(),
        );
    }

    /// Encode metrics in Prometheus text format.
    pub fn encode_prometheus(&self) -> String {
        let mut registry = Registry::default();
        self.register(&mut registry);

        let mut buffer = String::new();
        if encode(&mut buffer, &registry).is_err() {
            return String::from("# Error encoding metrics\n");
        }
        buffer
    }
}
