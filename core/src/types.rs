//! Domain DTOs for the food API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. `price`
//! stays a string because the backend owns its decimal formatting.

use serde::{Deserialize, Serialize};

/// Backend-assigned record identifier. Never generated client-side.
pub type FoodId = u64;

/// A single menu item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    pub available: bool,
    #[serde(default)]
    pub image: String,
}

/// A candidate record collected by the add dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFood {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
}

/// Request payload for `POST /foods`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateFood {
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

impl CreateFood {
    /// New records always start out available.
    pub fn from_new(food: NewFood) -> Self {
        Self {
            name: food.name,
            description: food.description,
            price: food.price,
            available: true,
            image: food.image,
        }
    }
}

impl From<NewFood> for CreateFood {
    fn from(food: NewFood) -> Self {
        Self::from_new(food)
    }
}

/// Partial record collected by the edit dialog. Present fields override the
/// record being edited; absent fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FoodPatch {
    /// Overlay this patch on `base`. The id always comes from `base`.
    pub fn merge_onto(&self, base: &Food) -> Food {
        Food {
            id: base.id,
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| base.description.clone()),
            price: self.price.clone().unwrap_or_else(|| base.price.clone()),
            available: self.available.unwrap_or(base.available),
            image: self.image.clone().unwrap_or_else(|| base.image.clone()),
        }
    }
}
