//! Per-category compliance scoring.
use labelforge_core::{CategoryScores, ComplianceScore, Label, MarketCode};

/// Score one label across the five compliance categories.
///
/// Deterministic and pure; the label is only read. `overall` is the
/// unweighted mean of the category scores, rounded to the nearest integer.
pub fn score(label: &Label) -> ComplianceScore {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    let nutrition = score_nutrition(label, &mut issues, &mut recommendations);
    let ingredients = score_ingredients(label, &mut issues, &mut recommendations);
    let allergens = score_allergens(label, &mut recommendations);
    let certifications = score_certifications(label.market, &mut recommendations);
    let legal = score_legal(label, &mut issues);

    let sum = nutrition + ingredients + allergens + certifications + legal;
    let overall = (f64::from(sum) / 5.0).round() as u32;

    ComplianceScore {
        overall,
        categories: CategoryScores {
            nutrition,
            ingredients,
            allergens,
            certifications,
            legal,
        },
        issues,
        recommendations,
    }
}

/// Nutrient coverage: the more of the declaration is populated, the better.
fn score_nutrition(
    label: &Label,
    issues: &mut Vec<String>,
    recommendations: &mut Vec<String>,
) -> u32 {
    let populated = label.label_data.legal_label.nutrition.len();
    if populated >= 6 {
        95
    } else if populated >= 4 {
        recommendations.push("Declare the remaining well-known nutrients".to_string());
        75
    } else {
        issues.push("Nutrition declaration covers too few nutrients".to_string());
        45
    }
}

/// Ingredient statement completeness, judged by its length.
fn score_ingredients(
    label: &Label,
    issues: &mut Vec<String>,
    recommendations: &mut Vec<String>,
) -> u32 {
    let len = label.label_data.legal_label.ingredients.len();
    if len > 100 {
        90
    } else if len > 50 {
        recommendations.push("Expand the ingredient statement with percentages".to_string());
        70
    } else {
        issues.push("Ingredient statement is too short".to_string());
        40
    }
}

/// Allergen statement quality: an explicit Contains/May contain phrase beats
/// free text.
fn score_allergens(label: &Label, recommendations: &mut Vec<String>) -> u32 {
    let statement = label.label_data.legal_label.allergens.to_lowercase();
    if statement.contains("contains") || statement.contains("may contain") {
        95
    } else if statement.len() > 10 {
        75
    } else {
        recommendations.push("Use an explicit Contains/May contain statement".to_string());
        60
    }
}

/// Static per-market certification baseline, independent of label content.
fn score_certifications(market: MarketCode, recommendations: &mut Vec<String>) -> u32 {
    match market {
        MarketCode::Eu | MarketCode::Es => 85,
        MarketCode::Br => {
            recommendations.push("Confirm ANVISA registration is current".to_string());
            80
        }
        _ => {
            recommendations.push("Document market certifications on file".to_string());
            70
        }
    }
}

/// Warning/notes balance: few warnings plus substantive compliance notes.
fn score_legal(label: &Label, issues: &mut Vec<String>) -> u32 {
    let warnings = label.label_data.warnings.len();
    let notes = label.label_data.compliance_notes.len();
    if warnings == 0 && notes > 2 {
        90
    } else if warnings <= 1 && notes > 1 {
        75
    } else {
        issues.push("Review outstanding warnings and compliance notes".to_string());
        55
    }
}
