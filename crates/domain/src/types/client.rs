//! Client company records

use serde::{Deserialize, Serialize};

/// A contact at a client company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPerson {
    pub name: String,
    pub designation: Option<String>,
    pub is_primary: bool,
}

/// A client company with its contact persons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    #[serde(alias = "_id")]
    pub id: String,
    pub company_name: String,
    pub contact_persons: Vec<ContactPerson>,
}

impl Client {
    /// The primary contact, falling back to the first listed one
    pub fn primary_contact(&self) -> Option<&ContactPerson> {
        self.contact_persons
            .iter()
            .find(|c| c.is_primary)
            .or_else(|| self.contact_persons.first())
    }
}
