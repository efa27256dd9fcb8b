//! Draft-to-typed validators.
//!
//! Validators never stop at the first problem: each one walks the whole
//! draft, records a [`Violation`] per gap, and only then decides. Structural
//! checks only (required fields, enum membership, non-empty constraints); no
//! coercion beyond what is explicitly optional.
use labelforge_core::{
    CrisisScenario, CrisisSeverity, Label, LabelData, Language, LegalLabel, Marketing, MarketCode,
    NutritionFactSheet, NutritionServingInfo, ProductData, ValidationError, Violation,
};
use std::collections::{BTreeMap, BTreeSet};

use crate::draft::{CrisisScenarioDraft, LabelDataDraft, ProductDataDraft, ServingInfoDraft};

/// Accumulates violations across one validation pass.
#[derive(Debug, Default)]
struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.items.push(Violation::new(path, message));
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_error(self) -> ValidationError {
        ValidationError::new(self.items)
    }
}

/// Promote a product draft to [`ProductData`].
pub fn product_data(draft: ProductDataDraft) -> Result<ProductData, ValidationError> {
    let mut v = Violations::new();

    let name = match draft.name {
        Some(n) if !n.trim().is_empty() => Some(n),
        Some(_) => {
            v.push("name", "must not be blank");
            None
        }
        None => {
            v.push("name", "required");
            None
        }
    };

    let ingredients = match draft.ingredients {
        Some(list) if list.is_empty() => {
            v.push("ingredients", "must contain at least one entry");
            None
        }
        Some(list) if list.iter().all(|i| i.trim().is_empty()) => {
            v.push("ingredients", "must contain at least one non-blank entry");
            None
        }
        Some(list) => Some(list),
        None => {
            v.push("ingredients", "required");
            None
        }
    };

    let market = match draft.market.as_deref() {
        Some(code) => match MarketCode::parse(code) {
            Ok(m) => Some(m),
            Err(_) => {
                v.push("market", format!("unknown market code '{}'", code.trim()));
                None
            }
        },
        None => {
            v.push("market", "required");
            None
        }
    };

    let language = match draft.language.as_deref() {
        Some(code) => match Language::from_code(code) {
            Some(l) => Some(l),
            None => {
                v.push("language", format!("unknown language code '{}'", code.trim()));
                None
            }
        },
        None => None,
    };

    let nutrition = draft
        .nutrition
        .map(|sheet| fact_sheet(sheet, "nutrition", &mut v));

    let allergens = draft
        .allergens
        .map(|list| list.into_iter().collect::<BTreeSet<String>>());

    if !v.is_empty() {
        return Err(v.into_error());
    }
    let (Some(name), Some(ingredients), Some(market)) = (name, ingredients, market) else {
        // Every None above recorded a violation, so this arm cannot be hit.
        return Err(ValidationError::single("productData", "invalid payload"));
    };

    Ok(ProductData {
        name,
        ingredients,
        nutrition,
        allergens,
        market,
        language,
        product_id: draft.product_id,
    })
}

/// Promote label-content drafts (typically parsed from the generation
/// capability's response) to [`LabelData`].
pub fn label_data(draft: LabelDataDraft) -> Result<LabelData, ValidationError> {
    let mut v = Violations::new();

    let legal_label = match draft.legal_label {
        Some(legal) => {
            let ingredients = match legal.ingredients {
                Some(i) if !i.trim().is_empty() => Some(i),
                Some(_) => {
                    v.push("legalLabel.ingredients", "must not be empty");
                    None
                }
                None => {
                    v.push("legalLabel.ingredients", "required");
                    None
                }
            };
            let allergens = match legal.allergens {
                Some(a) if !a.trim().is_empty() => Some(a),
                Some(_) => {
                    v.push("legalLabel.allergens", "must not be empty");
                    None
                }
                None => {
                    v.push("legalLabel.allergens", "required");
                    None
                }
            };
            let nutrition = match legal.nutrition {
                Some(sheet) => Some(fact_sheet(sheet, "legalLabel.nutrition", &mut v)),
                None => {
                    v.push("legalLabel.nutrition", "required");
                    None
                }
            };
            match (ingredients, allergens, nutrition) {
                (Some(ingredients), Some(allergens), Some(nutrition)) => Some(LegalLabel {
                    ingredients,
                    allergens,
                    nutrition,
                }),
                _ => None,
            }
        }
        None => {
            v.push("legalLabel", "required");
            None
        }
    };

    if !v.is_empty() {
        return Err(v.into_error());
    }
    let Some(legal_label) = legal_label else {
        return Err(ValidationError::single("legalLabel", "invalid payload"));
    };

    Ok(LabelData {
        legal_label,
        marketing: Marketing {
            short: draft
                .marketing
                .and_then(|m| m.short)
                .unwrap_or_default(),
        },
        warnings: draft.warnings.unwrap_or_default(),
        compliance_notes: draft.compliance_notes.unwrap_or_default(),
    })
}

/// Promote a crisis-drill draft to [`CrisisScenario`].
pub fn crisis_scenario(draft: CrisisScenarioDraft) -> Result<CrisisScenario, ValidationError> {
    let mut v = Violations::new();

    let product_name = match draft.product_name {
        Some(n) if !n.trim().is_empty() => Some(n),
        _ => {
            v.push("productName", "required");
            None
        }
    };
    let scenario = match draft.scenario {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => {
            v.push("scenario", "required");
            None
        }
    };
    let market = match draft.market.as_deref() {
        Some(code) => match MarketCode::parse(code) {
            Ok(m) => Some(m),
            Err(_) => {
                v.push("market", format!("unknown market code '{}'", code.trim()));
                None
            }
        },
        None => {
            v.push("market", "required");
            None
        }
    };
    let severity = match draft.severity.as_deref() {
        Some(code) => match CrisisSeverity::from_code(code) {
            Some(s) => Some(s),
            None => {
                v.push("severity", format!("unknown severity '{}'", code.trim()));
                None
            }
        },
        None => {
            v.push("severity", "required");
            None
        }
    };

    if !v.is_empty() {
        return Err(v.into_error());
    }
    let (Some(product_name), Some(scenario), Some(market), Some(severity)) =
        (product_name, scenario, market, severity)
    else {
        return Err(ValidationError::single("scenario", "invalid payload"));
    };

    Ok(CrisisScenario {
        product_name,
        market,
        scenario,
        severity,
    })
}

/// Re-check an already typed product (fail-fast entry of the orchestrator).
pub fn check_product(product: &ProductData) -> Result<(), ValidationError> {
    let mut v = Violations::new();
    if product.name.trim().is_empty() {
        v.push("name", "must not be blank");
    }
    if product.ingredients.is_empty() {
        v.push("ingredients", "must contain at least one entry");
    } else if product.ingredients.iter().all(|i| i.trim().is_empty()) {
        v.push("ingredients", "must contain at least one non-blank entry");
    }
    if v.is_empty() {
        Ok(())
    } else {
        Err(v.into_error())
    }
}

/// Re-check a generated label before it is returned or persisted.
pub fn check_label(label: &Label) -> Result<(), ValidationError> {
    let mut v = Violations::new();
    check_label_data(&label.label_data, "labelData", &mut v);
    if let Some(translated) = &label.translated_data {
        check_label_data(translated, "translatedData", &mut v);
    }
    if v.is_empty() {
        Ok(())
    } else {
        Err(v.into_error())
    }
}

fn check_label_data(data: &LabelData, prefix: &str, v: &mut Violations) {
    if data.legal_label.ingredients.trim().is_empty() {
        v.push(format!("{prefix}.legalLabel.ingredients"), "must not be empty");
    }
    if data.legal_label.allergens.trim().is_empty() {
        v.push(format!("{prefix}.legalLabel.allergens"), "must not be empty");
    }
}

fn fact_sheet(
    draft: BTreeMap<String, ServingInfoDraft>,
    prefix: &str,
    v: &mut Violations,
) -> NutritionFactSheet {
    let mut sheet = NutritionFactSheet::new();
    for (name, info) in draft {
        match info.per_100g {
            Some(per_100g) => sheet.insert(
                name,
                NutritionServingInfo {
                    per_100g,
                    per_serving: info.per_serving,
                    percent_daily_value: info.percent_daily_value,
                },
            ),
            None => v.push(format!("{prefix}.{name}.per100g"), "required"),
        }
    }
    sheet
}
