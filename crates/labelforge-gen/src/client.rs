//! The generation client: one product, one market, one label.
use std::sync::Arc;

use labelforge_core::{
    CrisisResponse, CrisisScenario, GeneratedBy, GenerationContext, Label, LabelData, LabelError,
    MarketCode, MarketSpecificData, ProductData,
};
use labelforge_markets::{config_for, MarketConfig};
use tracing::{debug, warn};

use crate::capability::{GenerationCapability, GenerationRequest};
use crate::{fallback, parse, prompt};

/// Market-aware client around an injected [`GenerationCapability`].
///
/// `generate` is infallible by policy: when the capability call, its
/// completion, or validation fails, the deterministic fallback path produces
/// the label instead. Availability wins over content quality so a batch run
/// is never blocked by a single market.
#[derive(Clone)]
pub struct GenerationClient {
    capability: Arc<dyn GenerationCapability>,
    context: GenerationContext,
}

impl GenerationClient {
    pub fn new(capability: Arc<dyn GenerationCapability>, context: GenerationContext) -> Self {
        Self {
            capability,
            context,
        }
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Generate a label for one (product, market) pair.
    pub async fn generate(&self, product: &ProductData, market: MarketCode) -> Label {
        let config = config_for(market);
        let language = product.language.unwrap_or(config.language);

        let label = match self.try_generate(product, config).await {
            Ok(data) => {
                debug!(trace_id = %self.context.trace_id, market = %market, "capability produced a valid label");
                self.assemble(product, config, language, data, GeneratedBy::Ai)
            }
            Err(err) => {
                warn!(trace_id = %self.context.trace_id, market = %market, error = %err,
                    "generation failed, synthesizing fallback label");
                let data = fallback::fallback_label_data(product, config);
                self.assemble(product, config, language, data, GeneratedBy::Fallback)
            }
        };

        match labelforge_schema::check_label(&label) {
            Ok(()) => label,
            Err(err) => {
                // Generated content slipped past completion validation but
                // failed the label-level check; degrade rather than propagate.
                warn!(trace_id = %self.context.trace_id, market = %market, error = %err,
                    "generated label failed validation, synthesizing fallback label");
                let data = fallback::fallback_label_data(product, config);
                self.assemble(product, config, language, data, GeneratedBy::Fallback)
            }
        }
    }

    /// Generate a crisis-response plan. Same never-fail policy as `generate`.
    pub async fn generate_crisis(&self, scenario: &CrisisScenario) -> CrisisResponse {
        let config = config_for(scenario.market);
        match self.try_crisis(scenario, config).await {
            Ok(response) => response,
            Err(err) => {
                warn!(trace_id = %self.context.trace_id, market = %scenario.market, error = %err,
                    "crisis generation failed, synthesizing fallback response");
                fallback::fallback_crisis(scenario, config)
            }
        }
    }

    async fn try_generate(
        &self,
        product: &ProductData,
        config: &MarketConfig,
    ) -> Result<LabelData, LabelError> {
        let request = GenerationRequest {
            model_id: self.context.model_id.clone(),
            instructions: prompt::instructions_for(config.code).to_string(),
            prompt: prompt::build_label_prompt(product, config)?,
        };
        let completion = self.invoke(&request).await?;
        parse::label_data_from_completion(&completion)
    }

    async fn try_crisis(
        &self,
        scenario: &CrisisScenario,
        config: &MarketConfig,
    ) -> Result<CrisisResponse, LabelError> {
        let request = GenerationRequest {
            model_id: self.context.model_id.clone(),
            instructions: prompt::instructions_for(config.code).to_string(),
            prompt: prompt::build_crisis_prompt(scenario, config)?,
        };
        let completion = self.invoke(&request).await?;
        parse::crisis_from_completion(&completion, scenario.market)
    }

    async fn invoke(&self, request: &GenerationRequest) -> Result<String, LabelError> {
        tokio::time::timeout(self.context.timeout, self.capability.complete(request))
            .await
            .map_err(|_| {
                LabelError::Generation(format!(
                    "capability call exceeded {:?}",
                    self.context.timeout
                ))
            })?
            .map_err(|e| LabelError::Generation(e.to_string()))
    }

    fn assemble(
        &self,
        product: &ProductData,
        config: &MarketConfig,
        language: labelforge_core::Language,
        data: LabelData,
        generated_by: GeneratedBy,
    ) -> Label {
        Label::create(
            product.product_id.clone(),
            config.code,
            language,
            data,
            market_specific_data(config),
            fallback::fallback_translated(product, config),
            generated_by,
        )
    }
}

fn market_specific_data(config: &MarketConfig) -> MarketSpecificData {
    MarketSpecificData {
        certifications: config.certifications.iter().map(|s| s.to_string()).collect(),
        local_regulations: config.regulations.iter().map(|s| s.to_string()).collect(),
        cultural_considerations: config
            .cultural_considerations
            .iter()
            .map(|s| s.to_string())
            .collect(),
        language_variant: config.dual_language.as_ref().map(|d| d.variant.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityError;
    use async_trait::async_trait;
    use labelforge_core::{CrisisSeverity, Language};
    use std::time::Duration;

    const VALID_COMPLETION: &str = r#"{"legalLabel":{"ingredients":"Water, Apple Juice","allergens":"Contains: none declared","nutrition":{"energy":{"per100g":{"value":45,"unit":"kcal"}},"sugars":{"per100g":{"value":10.5,"unit":"g"}}}},"marketing":{"short":"Fresh pressed."},"warnings":[],"complianceNotes":["Complies with EU 1169/2011"]}"#;

    struct StaticCapability(&'static str);

    #[async_trait]
    impl GenerationCapability for StaticCapability {
        async fn complete(&self, _: &GenerationRequest) -> Result<String, CapabilityError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingCapability;

    #[async_trait]
    impl GenerationCapability for FailingCapability {
        async fn complete(&self, _: &GenerationRequest) -> Result<String, CapabilityError> {
            Err(CapabilityError::Transport("connection refused".to_string()))
        }
    }

    struct SlowCapability;

    #[async_trait]
    impl GenerationCapability for SlowCapability {
        async fn complete(&self, _: &GenerationRequest) -> Result<String, CapabilityError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(VALID_COMPLETION.to_string())
        }
    }

    fn client(capability: Arc<dyn GenerationCapability>) -> GenerationClient {
        GenerationClient::new(capability, GenerationContext::new("labelforge-test"))
    }

    fn juice() -> ProductData {
        ProductData {
            name: "Juice".to_string(),
            ingredients: vec!["Water".to_string(), "Apple Juice".to_string()],
            nutrition: None,
            allergens: None,
            market: MarketCode::Eu,
            language: None,
            product_id: Some("sku-juice".to_string()),
        }
    }

    #[tokio::test]
    async fn test_ai_path_maps_completion_into_label() {
        let client = client(Arc::new(StaticCapability(VALID_COMPLETION)));
        let label = client.generate(&juice(), MarketCode::Eu).await;

        assert_eq!(label.generated_by, GeneratedBy::Ai);
        assert_eq!(label.market, MarketCode::Eu);
        assert_eq!(label.language, Language::En);
        assert_eq!(label.product_id.as_deref(), Some("sku-juice"));
        assert_eq!(label.label_data.legal_label.ingredients, "Water, Apple Juice");
        assert_eq!(label.label_data.compliance_notes.len(), 1);
    }

    #[tokio::test]
    async fn test_juice_eu_label_has_per100g_nutrition_and_timestamp() {
        let client = client(Arc::new(StaticCapability(VALID_COMPLETION)));
        let label = client.generate(&juice(), MarketCode::Eu).await;

        assert!(!label.label_data.legal_label.nutrition.is_empty());
        let (_, info) = label.label_data.legal_label.nutrition.iter().next().unwrap();
        assert!(info.per_100g.value > 0.0);

        let json = serde_json::to_value(&label).unwrap();
        let created = json["createdAt"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
    }

    #[tokio::test]
    async fn test_capability_failure_falls_back_to_valid_label() {
        let client = client(Arc::new(FailingCapability));
        let label = client.generate(&juice(), MarketCode::Eu).await;

        assert_eq!(label.generated_by, GeneratedBy::Fallback);
        assert!(!label.label_data.legal_label.ingredients.is_empty());
        assert!(!label.label_data.legal_label.allergens.is_empty());
        assert!(labelforge_schema::check_label(&label).is_ok());
    }

    #[tokio::test]
    async fn test_malformed_completion_falls_back() {
        let client = client(Arc::new(StaticCapability("I'd be happy to help!")));
        let label = client.generate(&juice(), MarketCode::Us).await;
        assert_eq!(label.generated_by, GeneratedBy::Fallback);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let context =
            GenerationContext::new("labelforge-test").with_timeout(Duration::from_millis(10));
        let client = GenerationClient::new(Arc::new(SlowCapability), context);

        let label = client.generate(&juice(), MarketCode::Eu).await;
        assert_eq!(label.generated_by, GeneratedBy::Fallback);
    }

    #[tokio::test]
    async fn test_language_derived_from_market_when_absent() {
        let client = client(Arc::new(FailingCapability));
        let label = client.generate(&juice(), MarketCode::Br).await;
        assert_eq!(label.language, Language::Pt);
    }

    #[tokio::test]
    async fn test_bilingual_market_gets_translated_data() {
        let client = client(Arc::new(StaticCapability(VALID_COMPLETION)));
        let label = client.generate(&juice(), MarketCode::Ca).await;

        assert!(label.translated_data.is_some());
        assert_eq!(
            label.market_specific_data.language_variant.as_deref(),
            Some("fr-CA")
        );
    }

    #[tokio::test]
    async fn test_market_specific_data_comes_from_registry() {
        let client = client(Arc::new(FailingCapability));
        let label = client.generate(&juice(), MarketCode::Br).await;

        assert!(label
            .market_specific_data
            .local_regulations
            .iter()
            .any(|r| r.contains("ANVISA")));
        assert!(!label.market_specific_data.certifications.is_empty());
    }

    #[tokio::test]
    async fn test_crisis_ai_and_fallback_paths() {
        let scenario = CrisisScenario {
            product_name: "Juice".to_string(),
            market: MarketCode::Jp,
            scenario: "foreign material complaint".to_string(),
            severity: CrisisSeverity::High,
        };

        let completion = r#"{"headline":"Recall notice","consumerAdvisory":"Do not consume lot 7.","regulatorSteps":["Notify the CAA"]}"#;
        let response = client(Arc::new(StaticCapability(completion)))
            .generate_crisis(&scenario)
            .await;
        assert_eq!(response.generated_by, GeneratedBy::Ai);
        assert_eq!(response.headline, "Recall notice");

        let response = client(Arc::new(FailingCapability))
            .generate_crisis(&scenario)
            .await;
        assert_eq!(response.generated_by, GeneratedBy::Fallback);
        assert!(!response.regulator_steps.is_empty());
    }
}
