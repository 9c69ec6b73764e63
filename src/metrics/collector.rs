//! Metrics collection and registry.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("metrics encoding produced invalid UTF-8")]
    Encoding,
}

/// Prometheus metrics registry for the key generation service.
pub struct MetricsRegistry {
    registry: Registry,

    // Generator metrics
    keys_generated: IntCounter,
    generate_rejections: IntCounter,

    // Entropy metrics
    entropy_requests: IntCounter,

    // Cipher metrics
    encrypt_requests: IntCounter,
    decrypt_requests: IntCounter,
    decrypt_failures: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new registry with all service metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let keys_generated = IntCounter::new(
            "grammar_keygen_keys_generated_total",
            "Total keys generated via grammar derivation",
        )?;
        let generate_rejections = IntCounter::new(
            "grammar_keygen_generate_rejections_total",
            "Generate requests rejected for invalid mode selections",
        )?;

        let entropy_requests = IntCounter::new(
            "grammar_keygen_entropy_requests_total",
            "Total entropy scoring requests",
        )?;

        let encrypt_requests = IntCounter::new(
            "grammar_keygen_encrypt_requests_total",
            "Total encryption requests",
        )?;
        let decrypt_requests = IntCounter::new(
            "grammar_keygen_decrypt_requests_total",
            "Total decryption requests",
        )?;
        let decrypt_failures = IntCounter::new(
            "grammar_keygen_decrypt_failures_total",
            "Decryption requests that failed authentication or decoding",
        )?;

        registry.register(Box::new(keys_generated.clone()))?;
        registry.register(Box::new(generate_rejections.clone()))?;
        registry.register(Box::new(entropy_requests.clone()))?;
        registry.register(Box::new(encrypt_requests.clone()))?;
        registry.register(Box::new(decrypt_requests.clone()))?;
        registry.register(Box::new(decrypt_failures.clone()))?;

        Ok(Self {
            registry,
            keys_generated,
            generate_rejections,
            entropy_requests,
            encrypt_requests,
            decrypt_requests,
            decrypt_failures,
        })
    }

    /// Records a successfully generated key.
    pub fn record_key_generated(&self) {
        self.keys_generated.inc();
    }

    /// Records a rejected generate request.
    pub fn record_generate_rejection(&self) {
        self.generate_rejections.inc();
    }

    /// Records an entropy scoring request.
    pub fn record_entropy_request(&self) {
        self.entropy_requests.inc();
    }

    /// Records an encryption request.
    pub fn record_encrypt_request(&self) {
        self.encrypt_requests.inc();
    }

    /// Records a decryption request.
    pub fn record_decrypt_request(&self) {
        self.decrypt_requests.inc();
    }

    /// Records a failed decryption.
    pub fn record_decrypt_failure(&self) {
        self.decrypt_failures.inc();
    }

    /// Encodes all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|_| MetricsError::Encoding)
    }
}
