//! # Search Filters
//!
//! Search criteria arrive as optional query parameters and are compiled into
//! a set of typed predicates combined with AND logic.

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use super::model::Popsicle;

/// Optional search criteria. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_quantity: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_quantity: Option<i64>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    pub fn price_between(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn quantity_between(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_quantity = min;
        self.max_quantity = max;
        self
    }

    /// Compile into a filter set. Empty text filters are dropped.
    pub fn to_filter_set(&self) -> FilterSet {
        let mut set = FilterSet::new();

        if let Some(name) = self.name.as_deref().filter(|s| !s.is_empty()) {
            set = set.and(PopsicleFilter::NameContains(name.to_lowercase()));
        }
        if let Some(flavor) = self.flavor.as_deref().filter(|s| !s.is_empty()) {
            set = set.and(PopsicleFilter::FlavorContains(flavor.to_lowercase()));
        }
        if let Some(min) = self.min_price {
            set = set.and(PopsicleFilter::PriceAtLeast(min));
        }
        if let Some(max) = self.max_price {
            set = set.and(PopsicleFilter::PriceAtMost(max));
        }
        if let Some(min) = self.min_quantity {
            set = set.and(PopsicleFilter::QuantityAtLeast(min));
        }
        if let Some(max) = self.max_quantity {
            set = set.and(PopsicleFilter::QuantityAtMost(max));
        }

        set
    }
}

/// Reads an optional numeric query value. A blank value counts as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// A single predicate over a record
#[derive(Debug, Clone, PartialEq)]
pub enum PopsicleFilter {
    /// Case-insensitive substring; needle is stored lowercased
    NameContains(String),
    FlavorContains(String),
    /// Inclusive bounds
    PriceAtLeast(Decimal),
    PriceAtMost(Decimal),
    QuantityAtLeast(i64),
    QuantityAtMost(i64),
}

impl PopsicleFilter {
    /// Check if a record matches this filter
    pub fn matches(&self, popsicle: &Popsicle) -> bool {
        match self {
            PopsicleFilter::NameContains(needle) => contains_ignore_case(&popsicle.name, needle),
            PopsicleFilter::FlavorContains(needle) => {
                contains_ignore_case(&popsicle.flavor, needle)
            }
            PopsicleFilter::PriceAtLeast(min) => popsicle.price >= *min,
            PopsicleFilter::PriceAtMost(max) => popsicle.price <= *max,
            PopsicleFilter::QuantityAtLeast(min) => i64::from(popsicle.quantity) >= *min,
            PopsicleFilter::QuantityAtMost(max) => i64::from(popsicle.quantity) <= *max,
        }
    }
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub filters: Vec<PopsicleFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: PopsicleFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check if a record matches all filters
    pub fn matches(&self, popsicle: &Popsicle) -> bool {
        self.filters.iter().all(|f| f.matches(popsicle))
    }
}
