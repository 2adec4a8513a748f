//! Fare reference data handed to the assistant.
//!
//! The interpreter never reads fares itself. The table is rendered into a
//! JSON document that goes into the assistant's context as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::AssistantError;

/// Prices for one route, by passenger category ("Adult", "Child", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRecord {
    pub route: String,
    pub discount_tier: String,
    pub fares: BTreeMap<String, Amount>,
}

impl FareRecord {
    pub fn new(route: impl Into<String>, discount_tier: impl Into<String>) -> Self {
        FareRecord {
            route: route.into(),
            discount_tier: discount_tier.into(),
            fares: BTreeMap::new(),
        }
    }

    pub fn with_fare(mut self, category: impl Into<String>, amount: Amount) -> Self {
        self.fares.insert(category.into(), amount);
        self
    }

    pub fn fare(&self, category: &str) -> Option<Amount> {
        self.fares.get(category).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FareTable {
    records: BTreeMap<String, FareRecord>,
}

impl FareTable {
    pub fn new() -> Self {
        FareTable::default()
    }

    /// Add `record` under `route_id`, returning the record it replaced.
    pub fn insert(&mut self, route_id: impl Into<String>, record: FareRecord) -> Option<FareRecord> {
        self.records.insert(route_id.into(), record)
    }

    pub fn get(&self, route_id: &str) -> Option<&FareRecord> {
        self.records.get(route_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_document(&self) -> Result<String, AssistantError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_document(document: &str) -> Result<Self, AssistantError> {
        Ok(serde_json::from_str(document)?)
    }
}

/// Something that can produce reference data by name.
pub trait FareSource {
    /// The rendered document for `dataset`.
    fn document(&self, dataset: &str) -> Result<String, AssistantError>;
}

/// A table answers to the "fares" dataset only.
impl FareSource for FareTable {
    fn document(&self, dataset: &str) -> Result<String, AssistantError> {
        match dataset {
            "fares" => self.to_document(),
            _ => Err(AssistantError::UnknownDataset {
                dataset: dataset.to_string(),
            }),
        }
    }
}
