use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_text, ValidationError};
use crate::ports::repository::{EntityKind, Record};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSupplier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SupplierPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl NewSupplier {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl SupplierPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}

impl Record for Supplier {
    type New = NewSupplier;
    type Patch = SupplierPatch;

    const KIND: EntityKind = EntityKind::Supplier;
    const ID_PREFIX: &'static str = "SUP";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, new: NewSupplier) -> Self {
        Self {
            id,
            name: new.name,
            contact: new.contact,
            created_at: Utc::now(),
        }
    }

    fn apply(&mut self, patch: SupplierPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(contact) = patch.contact {
            self.contact = Some(contact);
        }
    }
}
