//! LabelForge Core: data model, unified errors, generation context.
//!
//! Canonical shapes shared by every crate in the workspace. Labels are
//! immutable once created; regeneration always mints a new label id.

pub mod context;
pub mod data_model;
pub mod error;

pub use context::{GenerationContext, DEFAULT_GENERATION_TIMEOUT};
pub use data_model::{
    CategoryScores, ComplianceScore, CrisisResponse, CrisisScenario, CrisisSeverity, GeneratedBy,
    Label, LabelData, Language, LegalLabel, Marketing, MarketCode, MarketFailure,
    MarketSpecificData, MultiMarketResult, NutritionFactSheet, NutritionServingInfo,
    NutritionValue, ProductData,
};
pub use error::{LabelError, ValidationError, Violation};

/// Engine version reported by the health endpoint.
pub const LABELFORGE_VERSION: &str = env!("CARGO_PKG_VERSION");
