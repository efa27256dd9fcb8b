//! Boundary validation for LabelForge payloads.
//!
//! Untrusted JSON never becomes a typed value directly. It deserializes into
//! a lenient *draft* shape first (every field optional), then `validate`
//! promotes the draft to the typed value, collecting every field-level
//! violation in one pass.
//!
//! ```text
//! raw JSON → Draft (serde, lenient) → validate → typed value
//!                                        ↓
//!                                  ValidationError { violations: [path, message] }
//! ```
//!
//! This layer runs at every boundary: inbound request bodies, the normalized
//! output of the generation capability, and labels about to be persisted.
//!
//! # Example
//!
//! ```
//! use labelforge_schema::validate_product;
//! use serde_json::json;
//!
//! let product = validate_product(json!({
//!     "name": "Juice",
//!     "ingredients": ["Water", "Apple Juice"],
//!     "market": "EU"
//! })).unwrap();
//! assert_eq!(product.name, "Juice");
//!
//! let err = validate_product(json!({ "name": "Juice", "ingredients": [] }))
//!     .unwrap_err();
//! assert!(err.violations.iter().any(|v| v.path == "ingredients"));
//! assert!(err.violations.iter().any(|v| v.path == "market"));
//! ```

pub mod draft;
pub mod validate;

pub use draft::{
    CrisisScenarioDraft, LabelDataDraft, LegalLabelDraft, MarketingDraft, ProductDataDraft,
    ServingInfoDraft,
};
pub use validate::{check_label, check_product, crisis_scenario, label_data, product_data};

use labelforge_core::{CrisisScenario, LabelData, ProductData, ValidationError};

/// Validate a raw JSON product submission.
pub fn validate_product(value: serde_json::Value) -> Result<ProductData, ValidationError> {
    let draft: ProductDataDraft = serde_json::from_value(value)
        .map_err(|e| ValidationError::single("productData", e.to_string()))?;
    product_data(draft)
}

/// Validate raw JSON label content (the normalized capability output shape).
pub fn validate_label_data(value: serde_json::Value) -> Result<LabelData, ValidationError> {
    let draft: LabelDataDraft = serde_json::from_value(value)
        .map_err(|e| ValidationError::single("labelData", e.to_string()))?;
    label_data(draft)
}

/// Validate a raw JSON crisis-drill submission.
pub fn validate_crisis(value: serde_json::Value) -> Result<CrisisScenario, ValidationError> {
    let draft: CrisisScenarioDraft = serde_json::from_value(value)
        .map_err(|e| ValidationError::single("scenario", e.to_string()))?;
    crisis_scenario(draft)
}
