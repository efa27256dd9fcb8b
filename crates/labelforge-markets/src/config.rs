//! Per-market configuration table
use labelforge_core::{Language, MarketCode};
use serde::Serialize;

/// Display and regulatory metadata for one market.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConfig {
    pub code: MarketCode,
    pub label: &'static str,
    pub language: Language,
    pub requirements: &'static [&'static str],
    pub regulations: &'static [&'static str],
    pub certifications: &'static [&'static str],
    pub cultural_considerations: &'static [&'static str],
    pub flag: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dual_language: Option<DualLanguage>,
}

/// Secondary label language for bilingual markets.
#[derive(Debug, Clone, Serialize)]
pub struct DualLanguage {
    pub language: Language,
    pub variant: &'static str,
}

static US: MarketConfig = MarketConfig {
    code: MarketCode::Us,
    label: "United States",
    language: Language::En,
    requirements: &[
        "Nutrition Facts panel with serving size and servings per container",
        "Ingredient list in descending order by weight",
        "Major allergens declared per FASTER Act (9 allergens)",
    ],
    regulations: &["FDA 21 CFR 101", "FALCPA", "FASTER Act 2021"],
    certifications: &["FDA registered facility"],
    cultural_considerations: &["Imperial units shown alongside metric"],
    flag: "\u{1F1FA}\u{1F1F8}",
    description: "FDA nutrition facts labeling",
    dual_language: None,
};

static EU: MarketConfig = MarketConfig {
    code: MarketCode::Eu,
    label: "European Union",
    language: Language::En,
    requirements: &[
        "Mandatory nutrition declaration per 100g/100ml",
        "Allergens emphasised within the ingredient list",
        "Minimum font size for mandatory particulars",
    ],
    regulations: &["EU Regulation 1169/2011", "EU Regulation 1924/2006"],
    certifications: &["EU organic (where applicable)", "CE conformity"],
    cultural_considerations: &["Metric units only"],
    flag: "\u{1F1EA}\u{1F1FA}",
    description: "EU food information to consumers",
    dual_language: None,
};

static ES: MarketConfig = MarketConfig {
    code: MarketCode::Es,
    label: "Spain",
    language: Language::Es,
    requirements: &[
        "Etiquetado nutricional por 100g",
        "Al\u{e9}rgenos destacados en la lista de ingredientes",
        "Spanish-language mandatory particulars",
    ],
    regulations: &["EU Regulation 1169/2011", "Real Decreto 1334/1999"],
    certifications: &["AESAN compliance"],
    cultural_considerations: &["Castilian Spanish wording"],
    flag: "\u{1F1EA}\u{1F1F8}",
    description: "Spanish-language EU labeling",
    dual_language: None,
};

static BR: MarketConfig = MarketConfig {
    code: MarketCode::Br,
    label: "Brazil",
    language: Language::Pt,
    requirements: &[
        "Tabela de informa\u{e7}\u{e3}o nutricional",
        "Front-of-pack high-in warnings (sugar, fat, sodium)",
        "Portuguese-language ingredient list",
    ],
    regulations: &["ANVISA RDC 429/2020", "ANVISA IN 75/2020"],
    certifications: &["ANVISA registration"],
    cultural_considerations: &["Front-of-pack magnifier symbols expected"],
    flag: "\u{1F1E7}\u{1F1F7}",
    description: "ANVISA nutrition labeling",
    dual_language: None,
};

static CA: MarketConfig = MarketConfig {
    code: MarketCode::Ca,
    label: "Canada",
    language: Language::En,
    requirements: &[
        "Bilingual English/French labeling",
        "Nutrition Facts table in prescribed format",
        "Priority allergens and gluten sources declared",
    ],
    regulations: &["Food and Drug Regulations (C.R.C., c. 870)", "SFCR"],
    certifications: &["CFIA compliance"],
    cultural_considerations: &["French text equal prominence"],
    flag: "\u{1F1E8}\u{1F1E6}",
    description: "Bilingual Canadian labeling",
    dual_language: Some(DualLanguage {
        language: Language::Fr,
        variant: "fr-CA",
    }),
};

static JP: MarketConfig = MarketConfig {
    code: MarketCode::Jp,
    label: "Japan",
    language: Language::Ja,
    requirements: &[
        "Nutrition facts per 100g or per serving",
        "Specified allergens (7 mandatory, 21 recommended)",
        "Japanese-language labeling",
    ],
    regulations: &["Food Labeling Act (Act No. 70 of 2013)", "CAA labeling standards"],
    certifications: &["JAS (where applicable)"],
    cultural_considerations: &["Allergen pictograms customary"],
    flag: "\u{1F1EF}\u{1F1F5}",
    description: "CAA food labeling",
    dual_language: None,
};

/// Look up the static configuration for a market. Pure, never fails for a
/// typed [`MarketCode`]; unknown wire codes are rejected earlier by
/// [`MarketCode::parse`].
pub fn config_for(market: MarketCode) -> &'static MarketConfig {
    match market {
        MarketCode::Us => &US,
        MarketCode::Eu => &EU,
        MarketCode::Es => &ES,
        MarketCode::Br => &BR,
        MarketCode::Ca => &CA,
        MarketCode::Jp => &JP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_match_markets() {
        assert_eq!(config_for(MarketCode::Br).language, Language::Pt);
        assert_eq!(config_for(MarketCode::Jp).language, Language::Ja);
        assert_eq!(config_for(MarketCode::Es).language, Language::Es);
    }

    #[test]
    fn test_config_serializes_for_ui() {
        let json = serde_json::to_value(config_for(MarketCode::Ca)).unwrap();
        assert_eq!(json["code"], "CA");
        assert_eq!(json["dualLanguage"]["variant"], "fr-CA");
        assert!(json["requirements"].as_array().unwrap().len() >= 3);
    }
}
