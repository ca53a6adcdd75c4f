//! Session user and roles

use serde::{Deserialize, Serialize};

/// Role of the signed-in user; drives field-level edit permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Sales Executive")]
    SalesExecutive,
    #[serde(rename = "Sales Manager")]
    SalesManager,
    #[serde(rename = "Delivery Head")]
    DeliveryHead,
    #[serde(rename = "Delivery Manager")]
    DeliveryManager,
    #[serde(rename = "Delivery Team")]
    DeliveryTeam,
    #[serde(rename = "Super Admin")]
    SuperAdmin,
}

impl Role {
    pub fn is_sales(self) -> bool {
        matches!(self, Self::SalesExecutive | Self::SalesManager)
    }

    pub fn is_delivery(self) -> bool {
        matches!(self, Self::DeliveryHead | Self::DeliveryManager | Self::DeliveryTeam)
    }
}

/// The authenticated user handed to tab controllers by the parent view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub role: Role,
}
