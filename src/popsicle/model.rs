//! # Popsicle Record
//!
//! The stored record shape plus the two write shapes the store accepts:
//! a full record body without identity, and a field-by-field patch.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A popsicle as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popsicle {
    /// Store-assigned identifier, never reused
    pub id: u64,
    pub name: String,
    pub flavor: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub quantity: u32,
    /// Set once when the record is created
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Record body without identity or timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewPopsicle {
    pub name: String,
    pub flavor: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub quantity: u32,
}

/// Tri-state field for partial updates.
///
/// A key missing from the JSON body deserializes to `Absent` (through
/// `#[serde(default)]` on the field) while an explicit `null` becomes `Null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopsiclePatch {
    pub name: Patch<String>,
    pub flavor: Patch<String>,
    pub price: Patch<Decimal>,
    pub description: Patch<String>,
    pub quantity: Patch<u32>,
}

impl Popsicle {
    pub(crate) fn from_new(id: u64, new: NewPopsicle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            flavor: new.flavor,
            price: new.price,
            description: new.description,
            quantity: new.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field, keeping id and created_at
    pub(crate) fn replace_with(&mut self, new: NewPopsicle, now: DateTime<Utc>) {
        self.name = new.name;
        self.flavor = new.flavor;
        self.price = new.price;
        self.description = new.description;
        self.quantity = new.quantity;
        self.touch(now);
    }

    /// Apply only the fields present in `patch`.
    ///
    /// Name and flavor change only on a non-empty value. Price and quantity
    /// change on any value. Description is set by a value and cleared by null.
    pub(crate) fn apply_patch(&mut self, patch: &PopsiclePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name.as_value().filter(|s| !s.is_empty()) {
            self.name = name.clone();
        }
        if let Some(flavor) = patch.flavor.as_value().filter(|s| !s.is_empty()) {
            self.flavor = flavor.clone();
        }
        if let Some(price) = patch.price.as_value() {
            self.price = *price;
        }
        match &patch.description {
            Patch::Absent => {}
            Patch::Null => self.description = None,
            Patch::Value(d) => self.description = Some(d.clone()),
        }
        if let Some(quantity) = patch.quantity.as_value() {
            self.quantity = *quantity;
        }
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        // updated_at >= created_at even if the wall clock steps backwards
        self.updated_at = now.max(self.created_at);
    }
}
