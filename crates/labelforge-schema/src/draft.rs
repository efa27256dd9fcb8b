//! Lenient draft shapes for untrusted JSON.
//!
//! Every field is optional so deserialization never fails on a missing or
//! null field; the validators in [`crate::validate`] decide what is actually
//! required and report all gaps at once.
use labelforge_core::NutritionValue;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDataDraft {
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub nutrition: Option<BTreeMap<String, ServingInfoDraft>>,
    pub allergens: Option<Vec<String>>,
    pub market: Option<String>,
    pub language: Option<String>,
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServingInfoDraft {
    #[serde(rename = "per100g")]
    pub per_100g: Option<NutritionValue>,
    pub per_serving: Option<NutritionValue>,
    pub percent_daily_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDataDraft {
    pub legal_label: Option<LegalLabelDraft>,
    pub marketing: Option<MarketingDraft>,
    pub warnings: Option<Vec<String>>,
    pub compliance_notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalLabelDraft {
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub nutrition: Option<BTreeMap<String, ServingInfoDraft>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketingDraft {
    pub short: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisScenarioDraft {
    pub product_name: Option<String>,
    pub market: Option<String>,
    pub scenario: Option<String>,
    pub severity: Option<String>,
}
