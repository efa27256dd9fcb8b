//! Prompt construction for the generation capability.
//!
//! Regulatory instruction text is a static per-market lookup; the product
//! prompt itself is a Handlebars template rendered with the product fields
//! and the market's requirement list.
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use labelforge_core::{CrisisScenario, LabelError, MarketCode, ProductData};
use labelforge_markets::MarketConfig;
use once_cell::sync::Lazy;
use serde_json::json;

const LABEL_PROMPT: &str = "\
Create a {{language}} nutrition label for sale in {{marketLabel}} ({{marketCode}}).\n\
Respond with a single JSON object of this exact shape:\n\
{\"legalLabel\":{\"ingredients\":\"...\",\"allergens\":\"...\",\"nutrition\":{\"energy\":{\"per100g\":{\"value\":0,\"unit\":\"kcal\"}}}},\"marketing\":{\"short\":\"...\"},\"warnings\":[],\"complianceNotes\":[]}\n\
\n\
Product: {{{productName}}}\n\
Ingredients: {{join ingredients \", \"}}\n\
{{#if allergens}}Declared allergens: {{join allergens \", \"}}\n{{/if}}\
{{#if nutrition}}Declared nutrition (per 100g): {{{nutrition}}}\n{{/if}}\
\n\
Market requirements:\n\
{{#each requirements}}- {{this}}\n{{/each}}";

const CRISIS_PROMPT: &str = "\
A food-safety incident is being simulated for {{marketLabel}} ({{marketCode}}).\n\
Respond with a single JSON object of this exact shape:\n\
{\"headline\":\"...\",\"consumerAdvisory\":\"...\",\"regulatorSteps\":[\"...\"]}\n\
\n\
Product: {{{productName}}}\n\
Scenario: {{{scenario}}}\n\
Severity: {{severity}}\n\
Applicable regulations: {{join regulations \", \"}}\n";

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars.register_helper("join", Box::new(JoinHelper));
    handlebars
        .register_template_string("label_prompt", LABEL_PROMPT)
        .expect("label prompt template must compile");
    handlebars
        .register_template_string("crisis_prompt", CRISIS_PROMPT)
        .expect("crisis prompt template must compile");
    handlebars
});

/// Join an array with a separator.
struct JoinHelper;

impl HelperDef for JoinHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let array = h.param(0).and_then(|v| v.value().as_array());
        let separator = h
            .param(1)
            .and_then(|v| v.value().as_str())
            .unwrap_or(", ");

        if let Some(arr) = array {
            let strings: Vec<String> = arr
                .iter()
                .filter_map(|v| v.as_str().map(String::from).or_else(|| Some(v.to_string())))
                .collect();
            out.write(&strings.join(separator))?;
        }
        Ok(())
    }
}

/// Static regulatory instruction text, one entry per market.
pub fn instructions_for(market: MarketCode) -> &'static str {
    match market {
        MarketCode::Us => {
            "Apply FDA 21 CFR 101: Nutrition Facts panel with serving size, \
             ingredient list in descending order by weight, and the nine major \
             allergens declared in a Contains statement."
        }
        MarketCode::Eu => {
            "Apply EU Regulation 1169/2011: nutrition declaration per 100g, \
             allergens emphasised within the ingredient list, metric units only."
        }
        MarketCode::Es => {
            "Apply EU Regulation 1169/2011 with Spanish-language mandatory \
             particulars per Real Decreto 1334/1999. All label text in Castilian \
             Spanish."
        }
        MarketCode::Br => {
            "Apply ANVISA RDC 429/2020: tabela de informa\u{e7}\u{e3}o nutricional in \
             Portuguese, front-of-pack high-in warnings for sugar, saturated fat \
             and sodium where thresholds are met."
        }
        MarketCode::Ca => {
            "Apply the Canadian Food and Drug Regulations: bilingual \
             English/French labeling with equal prominence, prescribed Nutrition \
             Facts table, priority allergens declared."
        }
        MarketCode::Jp => {
            "Apply the Japanese Food Labeling Act: nutrition facts per 100g, \
             the seven specified allergens declared, all label text in Japanese."
        }
    }
}

/// Render the product prompt for one market.
pub fn build_label_prompt(
    product: &ProductData,
    config: &MarketConfig,
) -> Result<String, LabelError> {
    let nutrition = product
        .nutrition
        .as_ref()
        .filter(|sheet| !sheet.is_empty())
        .map(|sheet| serde_json::to_string(sheet).unwrap_or_default());

    let data = json!({
        "marketCode": config.code,
        "marketLabel": config.label,
        "language": product.language.unwrap_or(config.language).as_str(),
        "productName": product.name,
        "ingredients": product.ingredients,
        "allergens": product.allergens,
        "nutrition": nutrition,
        "requirements": config.requirements,
    });

    TEMPLATES
        .render("label_prompt", &data)
        .map_err(|e| LabelError::Generation(format!("prompt render failed: {e}")))
}

/// Render the crisis-drill prompt for one market.
pub fn build_crisis_prompt(
    scenario: &CrisisScenario,
    config: &MarketConfig,
) -> Result<String, LabelError> {
    let data = json!({
        "marketCode": config.code,
        "marketLabel": config.label,
        "productName": scenario.product_name,
        "scenario": scenario.scenario,
        "severity": scenario.severity,
        "regulations": config.regulations,
    });

    TEMPLATES
        .render("crisis_prompt", &data)
        .map_err(|e| LabelError::Generation(format!("prompt render failed: {e}")))
}
