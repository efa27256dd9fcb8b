//! Deterministic fallback synthesis.
//!
//! Engages whenever the capability call or its output fails. Input fields are
//! reused verbatim where present; gaps are filled with fixed defaults, so two
//! runs over the same product yield identical content.
use labelforge_core::{
    CrisisResponse, CrisisScenario, CrisisSeverity, GeneratedBy, LabelData, Language, LegalLabel,
    Marketing, NutritionFactSheet, NutritionServingInfo, ProductData,
};
use labelforge_markets::MarketConfig;

/// Conservative macro defaults used when the caller declared no nutrition.
fn default_macros() -> NutritionFactSheet {
    let mut sheet = NutritionFactSheet::new();
    sheet.insert("energy", NutritionServingInfo::per_100g(250.0, "kcal"));
    sheet.insert("fat", NutritionServingInfo::per_100g(9.0, "g"));
    sheet.insert("saturatedFat", NutritionServingInfo::per_100g(3.0, "g"));
    sheet.insert("carbohydrates", NutritionServingInfo::per_100g(34.0, "g"));
    sheet.insert("sugars", NutritionServingInfo::per_100g(12.0, "g"));
    sheet.insert("protein", NutritionServingInfo::per_100g(6.0, "g"));
    sheet.insert("salt", NutritionServingInfo::per_100g(0.8, "g"));
    sheet
}

/// Synthesize label content from the product fields alone.
pub fn fallback_label_data(product: &ProductData, config: &MarketConfig) -> LabelData {
    let ingredients = product
        .ingredients
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let allergens = match &product.allergens {
        Some(set) if !set.is_empty() => {
            let listed: Vec<&str> = set.iter().map(|a| a.as_str()).collect();
            format!("Contains: {}", listed.join(", "))
        }
        _ => "May contain traces of common allergens; verify with supplier.".to_string(),
    };

    let mut nutrition = product.nutrition.clone().unwrap_or_default();
    nutrition.merge_missing(&default_macros());

    LabelData {
        legal_label: LegalLabel {
            ingredients,
            allergens,
            nutrition,
        },
        marketing: Marketing {
            short: format!("{} is labeled for sale in {}.", product.name, config.label),
        },
        warnings: vec![format!(
            "Automatically generated label; confirm against {} requirements before printing.",
            config.label
        )],
        compliance_notes: config
            .regulations
            .iter()
            .map(|r| format!("Reviewed against {r}"))
            .collect(),
    }
}

/// Secondary-language content for bilingual markets; `None` elsewhere.
pub fn fallback_translated(product: &ProductData, config: &MarketConfig) -> Option<LabelData> {
    let dual = config.dual_language.as_ref()?;
    let mut data = fallback_label_data(product, config);
    if dual.language == Language::Fr {
        data.marketing.short = format!(
            "{} est \u{e9}tiquet\u{e9} pour la vente en {}.",
            product.name, config.label
        );
    }
    Some(data)
}

/// Synthesize a crisis-response plan from the scenario fields alone.
pub fn fallback_crisis(scenario: &CrisisScenario, config: &MarketConfig) -> CrisisResponse {
    let mut regulator_steps = vec![
        format!("Notify the competent authority under {}", config.regulations[0]),
        "Prepare lot traceability and distribution records".to_string(),
        "Document the incident timeline and containment actions".to_string(),
    ];
    if scenario.severity >= CrisisSeverity::High {
        regulator_steps.push("Initiate the market withdrawal/recall procedure".to_string());
    }
    if scenario.severity == CrisisSeverity::Critical {
        regulator_steps.push("Issue a public safety notice through official channels".to_string());
    }

    CrisisResponse {
        market: scenario.market,
        headline: format!(
            "{}: precautionary notice for {}",
            scenario.product_name, config.label
        ),
        consumer_advisory: format!(
            "Consumers who purchased {} should stop using the product and contact the point \
             of sale. Reported issue: {}.",
            scenario.product_name, scenario.scenario
        ),
        regulator_steps,
        generated_by: GeneratedBy::Fallback,
    }
}
