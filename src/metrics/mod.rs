//! Prometheus metrics for service observability.
//!
//! Exposes per-operation request counters in Prometheus format via the
//! API's `/metrics` endpoint.
//!
//! # Metrics Exposed
//!
//! - `grammar_keygen_keys_generated_total` - Keys generated
//! - `grammar_keygen_generate_rejections_total` - Rejected generate requests
//! - `grammar_keygen_entropy_requests_total` - Entropy scoring requests
//! - `grammar_keygen_encrypt_requests_total` - Encryption requests
//! - `grammar_keygen_decrypt_requests_total` - Decryption requests
//! - `grammar_keygen_decrypt_failures_total` - Failed decryptions

mod collector;

pub use collector::{MetricsError, MetricsRegistry};
