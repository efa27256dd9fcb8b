//! Integration tests for the multi-market orchestrator.
//!
//! The generation capability is replaced by in-process doubles so every
//! partial-failure path can be exercised deterministically.

use async_trait::async_trait;
use labelforge_core::{
    GeneratedBy, GenerationContext, MarketCode, ProductData,
};
use labelforge_gen::{CapabilityError, GenerationCapability, GenerationClient, GenerationRequest};
use labelforge_orchestrator::Orchestrator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const VALID_COMPLETION: &str = r#"{"legalLabel":{"ingredients":"Water, Apple Juice","allergens":"Contains: none declared","nutrition":{"energy":{"per100g":{"value":45,"unit":"kcal"}}}},"marketing":{"short":"Fresh pressed."},"warnings":[],"complianceNotes":["Reviewed"]}"#;

/// Always returns a valid completion, counting invocations.
struct CountingCapability {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GenerationCapability for CountingCapability {
    async fn complete(&self, _: &GenerationRequest) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(VALID_COMPLETION.to_string())
    }
}

/// Fails only for Brazilian requests (identified by their instruction text).
struct BrazilOutageCapability;

#[async_trait]
impl GenerationCapability for BrazilOutageCapability {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, CapabilityError> {
        if request.instructions.contains("ANVISA") {
            Err(CapabilityError::Status(503))
        } else {
            Ok(VALID_COMPLETION.to_string())
        }
    }
}

/// Valid completion after a fixed delay, for latency assertions.
struct SlowCapability;

#[async_trait]
impl GenerationCapability for SlowCapability {
    async fn complete(&self, _: &GenerationRequest) -> Result<String, CapabilityError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(VALID_COMPLETION.to_string())
    }
}

fn orchestrator(capability: Arc<dyn GenerationCapability>) -> Orchestrator {
    Orchestrator::new(GenerationClient::new(
        capability,
        GenerationContext::new("labelforge-test"),
    ))
}

fn juice() -> ProductData {
    ProductData {
        name: "Juice".to_string(),
        ingredients: vec!["Water".to_string(), "Apple Juice".to_string()],
        nutrition: None,
        allergens: None,
        market: MarketCode::Eu,
        language: None,
        product_id: None,
    }
}

fn markets(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn test_all_requested_markets_generate() {
    let orchestrator = orchestrator(Arc::new(CountingCapability {
        calls: Arc::new(AtomicUsize::new(0)),
    }));

    let result = orchestrator
        .generate_for_markets(&juice(), &markets(&["EU", "US", "JP"]))
        .await
        .unwrap();

    assert_eq!(result.labels.len(), 3);
    assert!(result.failures.is_empty());
    assert!(result.labels.contains_key(&MarketCode::Jp));
    for (market, label) in &result.labels {
        assert_eq!(label.market, *market);
        assert_eq!(label.generated_by, GeneratedBy::Ai);
    }
}

#[tokio::test]
async fn test_single_market_path() {
    let orchestrator = orchestrator(Arc::new(CountingCapability {
        calls: Arc::new(AtomicUsize::new(0)),
    }));

    let label = orchestrator.generate_single(&juice(), "es").await.unwrap();
    assert_eq!(label.market, MarketCode::Es);

    let err = orchestrator.generate_single(&juice(), "XX").await.unwrap_err();
    assert!(err.to_string().starts_with("MARKET/"));
}

// =============================================================================
// Partial failure
// =============================================================================

#[tokio::test]
async fn test_unknown_markets_reported_not_dropped() {
    let orchestrator = orchestrator(Arc::new(CountingCapability {
        calls: Arc::new(AtomicUsize::new(0)),
    }));
    let requested = markets(&["EU", "XX", "BR"]);

    let result = orchestrator
        .generate_for_markets(&juice(), &requested)
        .await
        .unwrap();

    // Every recognized market is in the mapping; the unknown one is in the
    // failure list. Nothing is silently dropped.
    assert_eq!(result.labels.len(), 2);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].market, "XX");
    assert!(result.failures[0].error.contains("unknown market"));

    for market in result.labels.keys() {
        assert!(requested.contains(&market.to_string()));
    }
}

#[tokio::test]
async fn test_one_market_outage_does_not_affect_siblings() {
    let orchestrator = orchestrator(Arc::new(BrazilOutageCapability));

    let result = orchestrator
        .generate_for_markets(&juice(), &markets(&["EU", "BR", "US"]))
        .await
        .unwrap();

    // The BR outage degrades that market to fallback quality; it is still a
    // success from the batch's point of view.
    assert_eq!(result.labels.len(), 3);
    assert!(result.failures.is_empty());
    assert_eq!(
        result.labels[&MarketCode::Br].generated_by,
        GeneratedBy::Fallback
    );
    assert_eq!(result.labels[&MarketCode::Eu].generated_by, GeneratedBy::Ai);
    assert_eq!(result.labels[&MarketCode::Us].generated_by, GeneratedBy::Ai);
}

// =============================================================================
// Fail-fast validation
// =============================================================================

#[tokio::test]
async fn test_invalid_product_fails_fast_without_capability_calls() {
    let calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = orchestrator(Arc::new(CountingCapability {
        calls: Arc::clone(&calls),
    }));

    let mut product = juice();
    product.ingredients = vec![];

    let err = orchestrator
        .generate_for_markets(&product, &markets(&["EU", "US"]))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("VALIDATION/"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Dispatch behavior
// =============================================================================

#[tokio::test]
async fn test_duplicate_markets_collapse_to_one_generation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = orchestrator(Arc::new(CountingCapability {
        calls: Arc::clone(&calls),
    }));

    let result = orchestrator
        .generate_for_markets(&juice(), &markets(&["EU", "eu", " EU "]))
        .await
        .unwrap();

    assert_eq!(result.labels.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_markets_run_concurrently() {
    let orchestrator = orchestrator(Arc::new(SlowCapability));
    let start = std::time::Instant::now();

    let result = orchestrator
        .generate_for_markets(&juice(), &markets(&["US", "EU", "ES", "BR"]))
        .await
        .unwrap();

    // Four sequential calls would take >= 400ms; concurrent dispatch tracks
    // the slowest single call.
    assert_eq!(result.labels.len(), 4);
    assert!(
        start.elapsed() < Duration::from_millis(300),
        "batch took {:?}, markets appear to run sequentially",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_empty_market_list_yields_empty_result() {
    let orchestrator = orchestrator(Arc::new(CountingCapability {
        calls: Arc::new(AtomicUsize::new(0)),
    }));

    let result = orchestrator
        .generate_for_markets(&juice(), &[])
        .await
        .unwrap();

    assert!(result.labels.is_empty());
    assert!(result.failures.is_empty());
}
