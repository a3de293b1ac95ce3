//! # Transfer Shapes
//!
//! Request and view bodies exchanged with clients. JSON keys are camelCase.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::model::{Patch, Popsicle};

/// Body for create and full replace
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePopsicleRequest {
    pub name: String,
    pub flavor: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    /// Signed so a negative value is reported as a field error
    pub quantity: i64,
}

/// Body for partial update; every field may be omitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePopsicleRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub flavor: Patch<String>,
    #[serde(default)]
    pub price: Patch<Decimal>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub quantity: Patch<i64>,
}

/// Read-only external view of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopsicleView {
    pub id: u64,
    pub name: String,
    pub flavor: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Popsicle> for PopsicleView {
    fn from(p: &Popsicle) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            flavor: p.flavor.clone(),
            price: p.price,
            description: p.description.clone(),
            quantity: p.quantity,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<Popsicle> for PopsicleView {
    fn from(p: Popsicle) -> Self {
        Self {
            id: p.id,
            name: p.name,
            flavor: p.flavor,
            price: p.price,
            description: p.description,
            quantity: p.quantity,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
