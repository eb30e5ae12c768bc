//! Data type configuration ("pre-values")
//!
//! Property editors are configured per data type. The host stores that
//! configuration as an ordered list of alias/value pairs.

use serde::{Deserialize, Serialize};

/// Single configuration entry of a data type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreValue {
    pub id: i64,
    pub alias: String,
    pub value: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// Ordered configuration of one data type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreValueCollection {
    pub data_type_id: i64,
    #[serde(default)]
    pub pre_values: Vec<PreValue>,
}

impl PreValueCollection {
    pub fn new(data_type_id: i64, mut pre_values: Vec<PreValue>) -> Self {
        pre_values.sort_by_key(|p| p.sort_order);
        Self {
            data_type_id,
            pre_values,
        }
    }

    /// Value configured under `alias`, if any
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.pre_values
            .iter()
            .find(|p| p.alias == alias)
            .map(|p| p.value.as_str())
    }

    /// Alias/value pairs in sort order
    pub fn as_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pre_values
            .iter()
            .map(|p| (p.alias.as_str(), p.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pre_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pre_values.is_empty()
    }
}
