//! Side-by-side comparison of labels for the same product.
use labelforge_core::{ComplianceScore, Label, MarketCode};
use labelforge_markets::all_markets;
use serde::{Deserialize, Serialize};

use crate::score::score;

/// One label's column in the comparison view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub market: MarketCode,
    pub label_id: String,
    pub score: ComplianceScore,
    pub ingredients: String,
    pub allergens: String,
    pub nutrient_count: usize,
    pub warning_count: usize,
}

/// Comparison across markets, ordered by the registry's canonical market
/// order regardless of input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelComparison {
    pub markets: Vec<MarketCode>,
    pub entries: Vec<ComparisonEntry>,
}

/// Build the comparison structure for a set of labels. When several labels
/// share a market, the first one provided wins.
pub fn compare(labels: &[Label]) -> LabelComparison {
    let mut entries = Vec::new();
    for market in all_markets() {
        let Some(label) = labels.iter().find(|l| l.market == *market) else {
            continue;
        };
        entries.push(ComparisonEntry {
            market: *market,
            label_id: label.label_id.clone(),
            score: score(label),
            ingredients: label.label_data.legal_label.ingredients.clone(),
            allergens: label.label_data.legal_label.allergens.clone(),
            nutrient_count: label.label_data.legal_label.nutrition.len(),
            warning_count: label.label_data.warnings.len(),
        });
    }

    LabelComparison {
        markets: entries.iter().map(|e| e.market).collect(),
        entries,
    }
}
