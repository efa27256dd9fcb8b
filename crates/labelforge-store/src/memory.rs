//! In-memory store implementation
use async_trait::async_trait;
use labelforge_core::Label;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{LabelStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryLabelStore {
    labels: RwLock<HashMap<String, Label>>,
}

impl MemoryLabelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LabelStore for MemoryLabelStore {
    async fn put(&self, label: &Label) -> Result<(), StoreError> {
        debug!(label_id = %label.label_id, market = %label.market, "storing label");
        self.labels
            .write()
            .await
            .insert(label.label_id.clone(), label.clone());
        Ok(())
    }

    async fn get(&self, label_id: &str) -> Result<Label, StoreError> {
        self.labels
            .read()
            .await
            .get(label_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(label_id.to_string()))
    }

    async fn list(&self) -> Result<Vec<Label>, StoreError> {
        Ok(self.labels.read().await.values().cloned().collect())
    }

    async fn delete(&self, label_id: &str) -> Result<(), StoreError> {
        match self.labels.write().await.remove(label_id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(label_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelforge_core::{
        GeneratedBy, Label, LabelData, Language, LegalLabel, Marketing, MarketCode,
        MarketSpecificData, NutritionFactSheet, NutritionServingInfo,
    };

    fn sample_label() -> Label {
        let mut nutrition = NutritionFactSheet::new();
        nutrition.insert("energy", NutritionServingInfo::per_100g(45.0, "kcal"));

        Label::create(
            Some("sku-1".to_string()),
            MarketCode::Eu,
            Language::En,
            LabelData {
                legal_label: LegalLabel {
                    ingredients: "Water, Apple Juice".to_string(),
                    allergens: "Contains: none declared".to_string(),
                    nutrition,
                },
                marketing: Marketing {
                    short: "Fresh pressed.".to_string(),
                },
                warnings: vec![],
                compliance_notes: vec!["Reviewed".to_string()],
            },
            MarketSpecificData::default(),
            None,
            GeneratedBy::Ai,
        )
    }

    #[tokio::test]
    async fn test_put_get_round_trip_is_lossless() {
        let store = MemoryLabelStore::new();
        let label = sample_label();

        store.put(&label).await.unwrap();
        let fetched = store.get(&label.label_id).await.unwrap();

        assert_eq!(fetched, label);
        // The wire form survives too.
        assert_eq!(
            serde_json::to_value(&fetched).unwrap(),
            serde_json::to_value(&label).unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryLabelStore::new();
        assert!(matches!(
            store.get("does-not-exist").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_a_clean_miss_when_repeated() {
        let store = MemoryLabelStore::new();
        let label = sample_label();
        store.put(&label).await.unwrap();

        store.delete(&label.label_id).await.unwrap();
        assert!(matches!(
            store.delete(&label.label_id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get(&label.label_id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_returns_every_label() {
        let store = MemoryLabelStore::new();
        let a = sample_label();
        let b = sample_label();
        store.put(&a).await.unwrap();
        store.put(&b).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        let ids: Vec<&str> = listed.iter().map(|l| l.label_id.as_str()).collect();
        assert!(ids.contains(&a.label_id.as_str()));
        assert!(ids.contains(&b.label_id.as_str()));
    }

    #[tokio::test]
    async fn test_put_overwrites_same_id() {
        let store = MemoryLabelStore::new();
        let label = sample_label();
        store.put(&label).await.unwrap();
        store.put(&label).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
