//! Immutable lists of known categories, merchants and emotion tags.
//!
//! Injected into the parser and the form validation instead of living in
//! globals, so deployments can ship their own lists.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Matched in list order by the smart-log parser
    pub categories: Vec<String>,
    /// Matched longest name first by the smart-log parser
    pub merchants: Vec<String>,
    #[serde(default = "default_emotions")]
    pub emotions: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            categories: to_strings(&[
                "Groceries",
                "Transport",
                "Entertainment",
                "Utilities",
                "Dining",
                "Shopping",
                "Health",
                "Travel",
                "Education",
                "Savings Goal",
                "Other",
            ]),
            merchants: to_strings(&[
                "Big Bazaar",
                "Uber",
                "INOX",
                "BSES",
                "Swiggy",
                "Amazon",
                "Apollo Pharmacy",
                "Starbucks",
                "Udemy",
                "Self/Bank",
                "Local Market",
            ]),
            emotions: default_emotions(),
        }
    }
}

impl ReferenceData {
    /// Load reference data from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference data from {}", path.display()))?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let data: ReferenceData = serde_yaml::from_str(raw).context("Invalid reference data YAML")?;
        if data.categories.is_empty() {
            anyhow::bail!("Reference data must list at least one category");
        }
        Ok(data)
    }

    /// Merchants sorted by name length, longest first. The sort is stable so
    /// equally long names keep their configured order.
    pub fn merchants_longest_first(&self) -> Vec<&str> {
        let mut merchants: Vec<&str> = self.merchants.iter().map(String::as_str).collect();
        merchants.sort_by(|a, b| b.len().cmp(&a.len()));
        merchants
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn is_known_emotion(&self, emotion: &str) -> bool {
        self.emotions.iter().any(|e| e == emotion)
    }
}

fn default_emotions() -> Vec<String> {
    to_strings(&[
        "happy",
        "neutral",
        "sad",
        "stressed",
        "excited",
        "regretful",
        "necessary",
        "motivated",
    ])
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchants_longest_first_is_stable() {
        let data = ReferenceData {
            categories: vec!["Other".to_string()],
            merchants: to_strings(&["Uber", "INOX", "Uber Eats", "BSES"]),
            emotions: vec![],
        };

        assert_eq!(data.merchants_longest_first(), vec!["Uber Eats", "Uber", "INOX", "BSES"]);
    }

    #[test]
    fn test_from_yaml_defaults_emotions() {
        let data = ReferenceData::from_yaml_str(
            "categories: [Food, Rent]\nmerchants: [Corner Shop]\n",
        )
        .unwrap();

        assert_eq!(data.categories, vec!["Food", "Rent"]);
        assert!(data.is_known_emotion("happy"));
        assert!(!data.is_known_category("Dining"));
    }

    #[test]
    fn test_from_yaml_rejects_empty_categories() {
        assert!(ReferenceData::from_yaml_str("categories: []\nmerchants: []\n").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.yaml");
        std::fs::write(&path, "categories: [Books]\nmerchants: [Library]\nemotions: [calm]\n").unwrap();

        let data = ReferenceData::from_yaml_file(&path).unwrap();
        assert_eq!(data.emotions, vec!["calm"]);
        assert!(ReferenceData::from_yaml_file(&dir.path().join("missing.yaml")).is_err());
    }
}
