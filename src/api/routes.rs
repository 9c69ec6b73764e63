//! Request/response types and route handlers.
//!
//! Three independent resource groups share one router: grammar key
//! generation, entropy scoring, and AES text encryption. All state a
//! request needs (terminal set, grammar, trace) is built fresh inside
//! the handler; only the metrics registry is shared.

use super::error::ApiError;
use crate::analysis::{shannon_entropy, EntropyTier, MAX_ENTROPY_BITS};
use crate::cipher;
use crate::grammar::{DerivationStep, GrammarMode, KeyGenerator};
use crate::metrics::MetricsRegistry;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for the API router.
pub struct AppState {
    /// Request counters exposed on `/metrics`.
    pub metrics: MetricsRegistry,
}

/// Key generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyGenerationRequest {
    /// One or more of `numeric`, `alphabetic`, `alphanumeric`, `symbolic`.
    pub modes: Vec<String>,
    /// Optional explicit key length; non-positive values clamp to 1.
    #[serde(default)]
    pub length: Option<i64>,
}

/// Key generation response.
#[derive(Debug, Clone, Serialize)]
pub struct KeyGenerationResponse {
    /// The generated key.
    pub key: String,
    /// Full derivation trace.
    pub parse_steps: Vec<DerivationStep>,
    /// The request's mode selection, echoed back.
    pub modes: Vec<String>,
}

/// One mode entry in the `/modes` listing.
#[derive(Debug, Clone, Serialize)]
pub struct ModeInfo {
    /// Wire identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

/// `/modes` response.
#[derive(Debug, Clone, Serialize)]
pub struct ModesResponse {
    /// The four recognized modes.
    pub modes: Vec<ModeInfo>,
}

/// Entropy scoring request.
#[derive(Debug, Clone, Deserialize)]
pub struct EntropyRequest {
    /// Text to score.
    pub text: String,
}

/// Entropy scoring response.
#[derive(Debug, Clone, Serialize)]
pub struct EntropyResponse {
    /// Shannon entropy in bits per symbol, rounded to 4 decimal places.
    pub entropy: f64,
    /// Indicator color (`yellow` below half of max, `green` otherwise).
    pub color: &'static str,
    /// Reference maximum used for classification.
    pub max_entropy: f64,
}

/// Encryption request.
#[derive(Debug, Clone, Deserialize)]
pub struct EncryptRequest {
    /// Text to encrypt.
    pub plaintext: String,
    /// Passphrase the AES key is derived from.
    pub key: String,
}

/// Decryption request.
#[derive(Debug, Clone, Deserialize)]
pub struct DecryptRequest {
    /// Base64 ciphertext from a previous encryption.
    pub encrypted: String,
    /// Base64 nonce from the same encryption.
    pub nonce: String,
    /// Passphrase the AES key is derived from.
    pub key: String,
}

/// Decryption response.
#[derive(Debug, Clone, Serialize)]
pub struct DecryptResponse {
    /// The recovered plaintext.
    pub plaintext: String,
}

/// Builds the service router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/generate", post(generate_key))
        .route("/modes", get(list_modes))
        .route("/entropy/calculate", post(calculate_entropy))
        .route("/aes/encrypt", post(encrypt_text))
        .route("/aes/decrypt", post(decrypt_text))
        .with_state(state)
}

/// Handler for `POST /generate`.
async fn generate_key(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KeyGenerationRequest>,
) -> Result<Json<KeyGenerationResponse>, ApiError> {
    if request.modes.is_empty() {
        state.metrics.record_generate_rejection();
        return Err(ApiError::EmptyModes);
    }

    let mut modes = Vec::new();
    let mut invalid = Vec::new();
    for raw in &request.modes {
        match GrammarMode::parse(raw) {
            Some(mode) => modes.push(mode),
            None => invalid.push(raw.clone()),
        }
    }

    if !invalid.is_empty() {
        state.metrics.record_generate_rejection();
        tracing::warn!(invalid = ?invalid, "Rejected generate request");
        return Err(ApiError::InvalidModes { invalid });
    }

    let generator = KeyGenerator::new(&modes);
    let derivation = generator.generate(request.length);

    state.metrics.record_key_generated();
    tracing::info!(
        modes = ?request.modes,
        length = ?request.length,
        key_len = derivation.key.chars().count(),
        "Key generated"
    );

    Ok(Json(KeyGenerationResponse {
        key: derivation.key,
        parse_steps: derivation.steps,
        modes: request.modes,
    }))
}

/// Handler for `GET /modes`.
async fn list_modes() -> Json<ModesResponse> {
    let modes = GrammarMode::ALL
        .iter()
        .map(|mode| ModeInfo {
            id: mode.id(),
            name: mode.name(),
            description: mode.description(),
        })
        .collect();

    Json(ModesResponse { modes })
}

/// Handler for `POST /entropy/calculate`.
async fn calculate_entropy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EntropyRequest>,
) -> Json<EntropyResponse> {
    state.metrics.record_entropy_request();

    let entropy = shannon_entropy(&request.text);
    let tier = EntropyTier::classify(entropy, MAX_ENTROPY_BITS);

    Json(EntropyResponse {
        entropy: (entropy * 10_000.0).round() / 10_000.0,
        color: tier.color(),
        max_entropy: MAX_ENTROPY_BITS,
    })
}

/// Handler for `POST /aes/encrypt`.
async fn encrypt_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EncryptRequest>,
) -> Result<Json<cipher::EncryptedText>, ApiError> {
    state.metrics.record_encrypt_request();

    let sealed = cipher::encrypt(&request.plaintext, &request.key).map_err(|e| {
        tracing::error!(error = %e, "Encryption failed");
        ApiError::Internal
    })?;

    Ok(Json(sealed))
}

/// Handler for `POST /aes/decrypt`.
async fn decrypt_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DecryptRequest>,
) -> Result<Json<DecryptResponse>, ApiError> {
    state.metrics.record_decrypt_request();

    let plaintext =
        cipher::decrypt(&request.encrypted, &request.nonce, &request.key).map_err(|e| {
            state.metrics.record_decrypt_failure();
            tracing::warn!(error = %e, "Decryption failed");
            ApiError::Decryption(e)
        })?;

    Ok(Json(DecryptResponse { plaintext }))
}

/// Handler for `GET /`.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Grammar Key Generation API" }))
}

/// Handler for `GET /health`.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Handler for `GET /metrics`.
async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::CANDIDATE_LENGTHS;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            metrics: MetricsRegistry::new().unwrap(),
        })
    }

    fn generate_request(modes: &[&str], length: Option<i64>) -> Json<KeyGenerationRequest> {
        Json(KeyGenerationRequest {
            modes: modes.iter().map(|m| m.to_string()).collect(),
            length,
        })
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_modes() {
        let result = generate_key(State(test_state()), generate_request(&[], None)).await;
        assert!(matches!(result, Err(ApiError::EmptyModes)));
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_modes() {
        let result =
            generate_key(State(test_state()), generate_request(&["numeric", "hex"], None)).await;

        match result {
            Err(ApiError::InvalidModes { invalid }) => {
                assert_eq!(invalid, vec!["hex".to_string()]);
            }
            other => panic!("expected InvalidModes, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_generate_numeric_with_length() {
        let response = generate_key(State(test_state()), generate_request(&["numeric"], Some(6)))
            .await
            .unwrap();

        assert_eq!(response.0.key.chars().count(), 6);
        assert!(response.0.key.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(response.0.modes, vec!["numeric".to_string()]);
        // Step 0 plus the two rewrite rounds.
        assert_eq!(response.0.parse_steps.len(), 3);
        assert_eq!(response.0.parse_steps[0].symbols, vec!["Start".to_string()]);
        assert_eq!(response.0.parse_steps.last().unwrap().result, response.0.key);
    }

    #[tokio::test]
    async fn test_generate_without_length_uses_candidates() {
        let response = generate_key(
            State(test_state()),
            generate_request(&["alphanumeric", "symbolic"], None),
        )
        .await
        .unwrap();

        assert!(CANDIDATE_LENGTHS.contains(&response.0.key.chars().count()));
    }

    #[tokio::test]
    async fn test_generate_accepts_mixed_case_modes() {
        let response = generate_key(State(test_state()), generate_request(&["NUMERIC"], Some(4)))
            .await
            .unwrap();

        assert_eq!(response.0.modes, vec!["NUMERIC".to_string()]);
        assert!(response.0.key.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_modes_listing() {
        let response = list_modes().await;

        assert_eq!(response.0.modes.len(), 4);
        assert_eq!(response.0.modes[0].id, "numeric");
        assert_eq!(response.0.modes[3].description, "Special characters only");
    }

    #[tokio::test]
    async fn test_entropy_rounding_and_color() {
        let response = calculate_entropy(
            State(test_state()),
            Json(EntropyRequest {
                text: "aab".to_string(),
            }),
        )
        .await;

        // H("aab") = 0.91829583..., rounded to 4 decimal places.
        assert_eq!(response.0.entropy, 0.9183);
        assert_eq!(response.0.color, "yellow");
        assert_eq!(response.0.max_entropy, 8.0);
    }

    #[tokio::test]
    async fn test_entropy_of_empty_text() {
        let response = calculate_entropy(
            State(test_state()),
            Json(EntropyRequest {
                text: String::new(),
            }),
        )
        .await;

        assert_eq!(response.0.entropy, 0.0);
        assert_eq!(response.0.color, "yellow");
    }

    #[tokio::test]
    async fn test_encrypt_then_decrypt() {
        let state = test_state();

        let sealed = encrypt_text(
            State(Arc::clone(&state)),
            Json(EncryptRequest {
                plaintext: "hello".to_string(),
                key: "secret".to_string(),
            }),
        )
        .await
        .unwrap();

        let opened = decrypt_text(
            State(state),
            Json(DecryptRequest {
                encrypted: sealed.0.encrypted,
                nonce: sealed.0.nonce,
                key: "secret".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(opened.0.plaintext, "hello");
    }

    #[tokio::test]
    async fn test_decrypt_with_wrong_passphrase_maps_to_500() {
        let state = test_state();

        let sealed = encrypt_text(
            State(Arc::clone(&state)),
            Json(EncryptRequest {
                plaintext: "hello".to_string(),
                key: "secret".to_string(),
            }),
        )
        .await
        .unwrap();

        let result = decrypt_text(
            State(state),
            Json(DecryptRequest {
                encrypted: sealed.0.encrypted,
                nonce: sealed.0.nonce,
                key: "wrong".to_string(),
            }),
        )
        .await;

        match result {
            Err(err @ ApiError::Decryption(_)) => {
                assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
                assert!(err.to_string().starts_with("Decryption failed"));
            }
            other => panic!("expected Decryption error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_decrypt_failure_counted() {
        let state = test_state();

        let result = decrypt_text(
            State(Arc::clone(&state)),
            Json(DecryptRequest {
                encrypted: "not base64!!!".to_string(),
                nonce: "also not".to_string(),
                key: "secret".to_string(),
            }),
        )
        .await;
        assert!(result.is_err());

        let output = state.metrics.encode().unwrap();
        assert!(output.contains("grammar_keygen_decrypt_failures_total 1"));
    }

    #[tokio::test]
    async fn test_parse_steps_serialize_with_wire_names() {
        let response = generate_key(State(test_state()), generate_request(&["numeric"], Some(2)))
            .await
            .unwrap();

        let value = serde_json::to_value(&response.0.parse_steps[0]).unwrap();
        assert!(value.get("step").is_some());
        assert!(value.get("symbols").is_some());
        assert!(value.get("rule_applied").is_some());
        assert!(value.get("result").is_some());
    }
}
