//! Type-specific detail payloads
//!
//! The meaningful field set of an opportunity depends on its `type`
//! discriminant, so the details are an explicit tagged union rather than a
//! bag of optional fields. The wire format keeps the discriminant at the
//! record root; `typeSpecificDetails` carries only the payload object, which
//! is why [`TypeDetails`] serialises as the bare payload and is rebuilt from
//! the sibling `type` field on read (see [`TypeDetails::from_value`]).
//!
//! Stale keys left over from a previous type selection are tolerated on read
//! (unknown fields are ignored) and can never be emitted on write because
//! each payload struct only serialises its own fields.

use serde::{Deserialize, Serialize};

use super::opportunity::OpportunityType;

/// Delivery mode for a training engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModeOfTraining {
    #[default]
    Online,
    Classroom,
    Hybrid,
}

/// Details for a training engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingDetails {
    pub technology: Option<String>,
    pub training_name: Option<String>,
    pub mode_of_training: ModeOfTraining,
    pub training_location: Option<String>,
}

/// Details for an exam-voucher sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VoucherDetails {
    pub technology: Option<String>,
    pub exam_details: Option<String>,
    pub number_of_vouchers: u32,
    pub exam_location: Option<String>,
}

/// Details for a lab-support engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LabSupportDetails {
    pub technology: Option<String>,
    pub lab_type: Option<String>,
    pub number_of_labs: u32,
}

/// Details for a resource-support engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSupportDetails {
    pub technology: Option<String>,
    pub resource_role: Option<String>,
    pub number_of_resources: u32,
}

/// Details for a content-development engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentDevelopmentDetails {
    pub technology: Option<String>,
    pub content_type: Option<String>,
    pub number_of_modules: u32,
}

/// Details for a product-support engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSupportDetails {
    pub product_name: Option<String>,
    pub support_level: Option<String>,
    pub license_count: u32,
}

/// Tagged union of per-type detail payloads
///
/// Serialises as the bare payload object; the discriminant lives at the
/// record root. There is deliberately no `Deserialize` impl: reading
/// requires the sibling `type` field, so use [`TypeDetails::from_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDetails {
    Training(TrainingDetails),
    Vouchers(VoucherDetails),
    LabSupport(LabSupportDetails),
    ResourceSupport(ResourceSupportDetails),
    ContentDevelopment(ContentDevelopmentDetails),
    ProductSupport(ProductSupportDetails),
}

impl TypeDetails {
    /// The discriminant this payload belongs to
    pub fn opportunity_type(&self) -> OpportunityType {
        match self {
            Self::Training(_) => OpportunityType::Training,
            Self::Vouchers(_) => OpportunityType::Vouchers,
            Self::LabSupport(_) => OpportunityType::LabSupport,
            Self::ResourceSupport(_) => OpportunityType::ResourceSupport,
            Self::ContentDevelopment(_) => OpportunityType::ContentDevelopment,
            Self::ProductSupport(_) => OpportunityType::ProductSupport,
        }
    }

    /// An empty payload for the given discriminant
    pub fn empty_for(ty: OpportunityType) -> Self {
        match ty {
            OpportunityType::Training => Self::Training(TrainingDetails::default()),
            OpportunityType::Vouchers => Self::Vouchers(VoucherDetails::default()),
            OpportunityType::LabSupport => Self::LabSupport(LabSupportDetails::default()),
            OpportunityType::ResourceSupport => {
                Self::ResourceSupport(ResourceSupportDetails::default())
            }
            OpportunityType::ContentDevelopment => {
                Self::ContentDevelopment(ContentDevelopmentDetails::default())
            }
            OpportunityType::ProductSupport => {
                Self::ProductSupport(ProductSupportDetails::default())
            }
        }
    }

    /// Rebuild the typed payload from a raw `typeSpecificDetails` object.
    ///
    /// Unknown keys (stale leftovers from a previous type selection) are
    /// ignored; missing keys fall back to the payload defaults. `null` or a
    /// missing object yields the empty payload for the discriminant.
    pub fn from_value(
        ty: OpportunityType,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::empty_for(ty));
        }
        Ok(match ty {
            OpportunityType::Training => Self::Training(serde_json::from_value(value)?),
            OpportunityType::Vouchers => Self::Vouchers(serde_json::from_value(value)?),
            OpportunityType::LabSupport => Self::LabSupport(serde_json::from_value(value)?),
            OpportunityType::ResourceSupport => {
                Self::ResourceSupport(serde_json::from_value(value)?)
            }
            OpportunityType::ContentDevelopment => {
                Self::ContentDevelopment(serde_json::from_value(value)?)
            }
            OpportunityType::ProductSupport => {
                Self::ProductSupport(serde_json::from_value(value)?)
            }
        })
    }
}

impl Serialize for TypeDetails {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Training(d) => d.serialize(serializer),
            Self::Vouchers(d) => d.serialize(serializer),
            Self::LabSupport(d) => d.serialize(serializer),
            Self::ResourceSupport(d) => d.serialize(serializer),
            Self::ContentDevelopment(d) => d.serialize(serializer),
            Self::ProductSupport(d) => d.serialize(serializer),
        }
    }
}
