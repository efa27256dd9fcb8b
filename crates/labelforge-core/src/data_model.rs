//! Data Model: ProductData in, Label out.
//!
//! Every type here crosses the HTTP boundary and serializes with camelCase
//! field names, the JSON shape the web client consumes.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;
use uuid::Uuid;

use crate::error::LabelError;

/// Supported regulatory markets, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketCode {
    Us,
    Eu,
    Es,
    Br,
    Ca,
    Jp,
}

impl MarketCode {
    /// Canonical enumeration order, used wherever stable iteration matters.
    pub const ALL: [MarketCode; 6] = [
        MarketCode::Us,
        MarketCode::Eu,
        MarketCode::Es,
        MarketCode::Br,
        MarketCode::Ca,
        MarketCode::Jp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCode::Us => "US",
            MarketCode::Eu => "EU",
            MarketCode::Es => "ES",
            MarketCode::Br => "BR",
            MarketCode::Ca => "CA",
            MarketCode::Jp => "JP",
        }
    }

    /// Parse a market code as it appears on the wire (case-insensitive).
    pub fn parse(code: &str) -> Result<MarketCode, LabelError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(MarketCode::Us),
            "EU" => Ok(MarketCode::Eu),
            "ES" => Ok(MarketCode::Es),
            "BR" => Ok(MarketCode::Br),
            "CA" => Ok(MarketCode::Ca),
            "JP" => Ok(MarketCode::Jp),
            _ => Err(LabelError::UnknownMarket(code.trim().to_string())),
        }
    }
}

impl fmt::Display for MarketCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label languages (ISO 639-1 codes on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Pt,
    Fr,
    Ja,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Pt => "pt",
            Language::Fr => "fr",
            Language::Ja => "ja",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            "pt" => Some(Language::Pt),
            "fr" => Some(Language::Fr),
            "ja" => Some(Language::Ja),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which path produced a label: the external capability or the deterministic
/// fallback synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratedBy {
    Ai,
    Fallback,
}

impl fmt::Display for GeneratedBy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeneratedBy::Ai => f.write_str("ai"),
            GeneratedBy::Fallback => f.write_str("fallback"),
        }
    }
}

/// A single measured quantity, e.g. `{ "value": 250, "unit": "kcal" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionValue {
    pub value: f64,
    pub unit: String,
}

impl NutritionValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Per-nutrient serving information. `per100g` is mandatory for every
/// declared nutrient; the rest is market-dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionServingInfo {
    pub per_100g: NutritionValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_serving: Option<NutritionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_daily_value: Option<f64>,
}

impl NutritionServingInfo {
    pub fn per_100g(value: f64, unit: impl Into<String>) -> Self {
        Self {
            per_100g: NutritionValue::new(value, unit),
            per_serving: None,
            percent_daily_value: None,
        }
    }
}

/// Extensible nutrient table keyed by nutrient name.
///
/// Well-known keys are listed in [`NutritionFactSheet::WELL_KNOWN`]; unknown
/// keys are permitted so market-specific nutrients survive the round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutritionFactSheet(pub BTreeMap<String, NutritionServingInfo>);

impl NutritionFactSheet {
    pub const WELL_KNOWN: [&'static str; 8] = [
        "energy",
        "fat",
        "saturatedFat",
        "carbohydrates",
        "sugars",
        "protein",
        "salt",
        "fiber",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, info: NutritionServingInfo) {
        self.0.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> Option<&NutritionServingInfo> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, NutritionServingInfo> {
        self.0.iter()
    }

    /// Copy entries from `other` that this sheet does not declare yet.
    pub fn merge_missing(&mut self, other: &NutritionFactSheet) {
        for (name, info) in other.iter() {
            self.0.entry(name.clone()).or_insert_with(|| info.clone());
        }
    }
}

/// Caller-supplied product description, the input to generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionFactSheet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergens: Option<BTreeSet<String>>,
    pub market: MarketCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

/// The legally mandated portion of a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalLabel {
    pub ingredients: String,
    pub allergens: String,
    pub nutrition: NutritionFactSheet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marketing {
    pub short: String,
}

/// Regulatory content of one generated label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelData {
    pub legal_label: LegalLabel,
    pub marketing: Marketing,
    pub warnings: Vec<String>,
    pub compliance_notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSpecificData {
    pub certifications: Vec<String>,
    pub local_regulations: Vec<String>,
    pub cultural_considerations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_variant: Option<String>,
}

/// One generated, market-specific label.
///
/// Immutable after creation: the id and timestamp are assigned exactly once
/// by [`Label::create`], and regeneration produces a fresh label instead of
/// mutating an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub label_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub market: MarketCode,
    pub language: Language,
    pub label_data: LabelData,
    pub market_specific_data: MarketSpecificData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_data: Option<LabelData>,
    pub created_at: DateTime<Utc>,
    pub generated_by: GeneratedBy,
}

impl Label {
    /// Assemble a label from fully populated parts, minting its id and
    /// creation timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        product_id: Option<String>,
        market: MarketCode,
        language: Language,
        label_data: LabelData,
        market_specific_data: MarketSpecificData,
        translated_data: Option<LabelData>,
        generated_by: GeneratedBy,
    ) -> Self {
        Self {
            label_id: Uuid::new_v4().to_string(),
            product_id,
            market,
            language,
            label_data,
            market_specific_data,
            translated_data,
            created_at: Utc::now(),
            generated_by,
        }
    }
}

/// Per-market failure entry for a batch generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFailure {
    pub market: String,
    pub error: String,
}

/// Aggregate of one multi-market generation run.
///
/// Only schema-valid labels appear in `labels`; markets that could not be
/// processed at all are listed in `failures` and never inserted as nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiMarketResult {
    pub labels: BTreeMap<MarketCode, Label>,
    pub failures: Vec<MarketFailure>,
    pub generated_at: DateTime<Utc>,
}

/// Per-category compliance estimate, 0-100 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub nutrition: u32,
    pub ingredients: u32,
    pub allergens: u32,
    pub certifications: u32,
    pub legal: u32,
}

/// Derived compliance estimate for one label. Recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceScore {
    pub overall: u32,
    pub categories: CategoryScores,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Severity of a simulated product crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CrisisSeverity {
    pub fn from_code(code: &str) -> Option<CrisisSeverity> {
        match code.trim().to_ascii_lowercase().as_str() {
            "low" => Some(CrisisSeverity::Low),
            "medium" => Some(CrisisSeverity::Medium),
            "high" => Some(CrisisSeverity::High),
            "critical" => Some(CrisisSeverity::Critical),
            _ => None,
        }
    }
}

/// Input for a crisis-response drill (recall, contamination, mislabeling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisScenario {
    pub product_name: String,
    pub market: MarketCode,
    pub scenario: String,
    pub severity: CrisisSeverity,
}

/// Generated crisis-response plan for one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisResponse {
    pub market: MarketCode,
    pub headline: String,
    pub consumer_advisory: String,
    pub regulator_steps: Vec<String>,
    pub generated_by: GeneratedBy,
}
