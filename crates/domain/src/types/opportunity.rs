//! The opportunity record
//!
//! Wire structs use camelCase names and tolerate missing fields so a partial
//! server document still deserialises. Server-only identity fields (`_id`,
//! `__v`) are never part of the save payload types, so sanitisation before a
//! PUT holds by construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::details::TypeDetails;

/// Opportunity kind; decides which detail payload is meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpportunityType {
    Training,
    Vouchers,
    #[serde(rename = "Lab Support")]
    LabSupport,
    #[serde(rename = "Resource Support")]
    ResourceSupport,
    #[serde(rename = "Content Development")]
    ContentDevelopment,
    #[serde(rename = "Product Support")]
    ProductSupport,
}

impl OpportunityType {
    /// Wire / display label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Training => "Training",
            Self::Vouchers => "Vouchers",
            Self::LabSupport => "Lab Support",
            Self::ResourceSupport => "Resource Support",
            Self::ContentDevelopment => "Content Development",
            Self::ProductSupport => "Product Support",
        }
    }
}

impl std::fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit the TOV rate is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TovUnit {
    #[default]
    Fixed,
    #[serde(rename = "Per Day")]
    PerDay,
    #[serde(rename = "Per Participant")]
    PerParticipant,
}

/// Lifecycle status of an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OpportunityStatus {
    #[default]
    Active,
    Cancelled,
    Discontinued,
    Completed,
}

/// Approval routing state derived from the gross-profit margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ApprovalStatus {
    #[default]
    #[serde(rename = "none")]
    NotRequired,
    #[serde(rename = "Pending Manager")]
    PendingManager,
    #[serde(rename = "Pending Director")]
    PendingDirector,
    Approved,
}

/// Reference to the owning sales user.
///
/// The server may return either a bare id or a populated user object; this
/// always serialises back as the id, which is exactly the flattening the
/// save boundary requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesOwnerRef {
    pub id: String,
    pub name: Option<String>,
}

impl SalesOwnerRef {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self { id: id.into(), name: None }
    }
}

impl Serialize for SalesOwnerRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for SalesOwnerRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Id(String),
            Expanded {
                #[serde(alias = "_id")]
                id: String,
                #[serde(default)]
                name: Option<String>,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Id(id) => Self { id, name: None },
            Repr::Expanded { id, name } => Self { id, name },
        })
    }
}

/// Reference to the client company; id-or-populated, flattened on write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRef {
    pub id: String,
    pub company_name: Option<String>,
}

impl Serialize for ClientRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for ClientRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Id(String),
            Expanded {
                #[serde(alias = "_id")]
                id: String,
                #[serde(default, rename = "companyName")]
                company_name: Option<String>,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Id(id) => Self { id, company_name: None },
            Repr::Expanded { id, company_name } => Self { id, company_name },
        })
    }
}

/// Attributes shared by every opportunity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonDetails {
    pub billing_entity: Option<String>,
    pub po_number: Option<String>,
    pub po_date: Option<NaiveDate>,
    pub po_value: Option<f64>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub tov_rate: Option<f64>,
    pub tov_unit: TovUnit,
    /// Derived total order value; recomputed client-side, persisted on save
    pub tov: f64,
    pub status: OpportunityStatus,
    pub training_sector: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sales_owner: Option<SalesOwnerRef>,
}

/// Named absolute cost categories plus the two percentage categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Expenses {
    pub trainer_cost: f64,
    pub gk_royalty: f64,
    pub material: f64,
    pub labs: f64,
    pub venue: f64,
    pub travel: f64,
    pub accommodation: f64,
    pub per_diem: f64,
    pub local_conveyance: f64,
    /// Percentage of revenue, not part of the absolute-cost sum
    pub marketing_percent: f64,
    /// Percentage of revenue, not part of the absolute-cost sum
    pub contingency_percent: f64,
}

/// Addressable expense category, used by field-change commands and the
/// permission gate (the two percentage categories are Sales-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    TrainerCost,
    GkRoyalty,
    Material,
    Labs,
    Venue,
    Travel,
    Accommodation,
    PerDiem,
    LocalConveyance,
    MarketingPercent,
    ContingencyPercent,
}

impl ExpenseField {
    /// Strategic percentage fields may only be edited by Sales roles
    pub fn is_strategic(self) -> bool {
        matches!(self, Self::MarketingPercent | Self::ContingencyPercent)
    }

    /// Write the given amount into the matching category
    pub fn apply(self, expenses: &mut Expenses, amount: f64) {
        let slot = match self {
            Self::TrainerCost => &mut expenses.trainer_cost,
            Self::GkRoyalty => &mut expenses.gk_royalty,
            Self::Material => &mut expenses.material,
            Self::Labs => &mut expenses.labs,
            Self::Venue => &mut expenses.venue,
            Self::Travel => &mut expenses.travel,
            Self::Accommodation => &mut expenses.accommodation,
            Self::PerDiem => &mut expenses.per_diem,
            Self::LocalConveyance => &mut expenses.local_conveyance,
            Self::MarketingPercent => &mut expenses.marketing_percent,
            Self::ContingencyPercent => &mut expenses.contingency_percent,
        };
        *slot = amount;
    }
}

/// Server-derived financial figures; read-mostly on the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Financials {
    pub total_expense: f64,
    pub gkt_revenue: f64,
    pub gross_profit_percent: f64,
}

/// A user-selected file held in memory pending an explicit upload.
///
/// Staged files are distinct from persisted document references; a slot
/// holds at most one staged file while editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// The central record: one sales opportunity
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub id: String,
    pub opportunity_type: OpportunityType,
    pub client: Option<ClientRef>,
    pub common_details: CommonDetails,
    pub type_specific_details: TypeDetails,
    pub expenses: Expenses,
    pub financials: Financials,
    pub approval_required: bool,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<String>,
    pub participants: u32,
    pub days: u32,
    pub requirement_summary: Option<String>,
    pub delivery_documents: Vec<String>,
    pub expense_documents: Vec<String>,
    pub requirement_document: Option<String>,
}

// The `type` discriminant at the record root decides how to read the
// `typeSpecificDetails` payload, so (de)serialisation goes through a wire
// representation instead of a plain derive.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OpportunityWire {
    #[serde(alias = "_id")]
    id: String,
    #[serde(rename = "type")]
    opportunity_type: Option<OpportunityType>,
    client: Option<ClientRef>,
    common_details: CommonDetails,
    type_specific_details: serde_json::Value,
    expenses: Expenses,
    financials: Financials,
    approval_required: bool,
    approval_status: ApprovalStatus,
    approved_by: Option<String>,
    participants: u32,
    days: u32,
    requirement_summary: Option<String>,
    delivery_documents: Vec<String>,
    expense_documents: Vec<String>,
    requirement_document: Option<String>,
}

impl Default for OpportunityWire {
    fn default() -> Self {
        Self {
            id: String::new(),
            opportunity_type: None,
            client: None,
            common_details: CommonDetails::default(),
            type_specific_details: serde_json::Value::Null,
            expenses: Expenses::default(),
            financials: Financials::default(),
            approval_required: false,
            approval_status: ApprovalStatus::default(),
            approved_by: None,
            participants: 0,
            days: 0,
            requirement_summary: None,
            delivery_documents: Vec::new(),
            expense_documents: Vec::new(),
            requirement_document: None,
        }
    }
}

impl<'de> Deserialize<'de> for Opportunity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = OpportunityWire::deserialize(deserializer)?;
        let opportunity_type = wire
            .opportunity_type
            .ok_or_else(|| serde::de::Error::missing_field("type"))?;
        let type_specific_details =
            TypeDetails::from_value(opportunity_type, wire.type_specific_details)
                .map_err(serde::de::Error::custom)?;

        Ok(Self {
            id: wire.id,
            opportunity_type,
            client: wire.client,
            common_details: wire.common_details,
            type_specific_details,
            expenses: wire.expenses,
            financials: wire.financials,
            approval_required: wire.approval_required,
            approval_status: wire.approval_status,
            approved_by: wire.approved_by,
            participants: wire.participants,
            days: wire.days,
            requirement_summary: wire.requirement_summary,
            delivery_documents: wire.delivery_documents,
            expense_documents: wire.expense_documents,
            requirement_document: wire.requirement_document,
        })
    }
}

impl Serialize for Opportunity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            id: &'a str,
            #[serde(rename = "type")]
            opportunity_type: OpportunityType,
            client: &'a Option<ClientRef>,
            common_details: &'a CommonDetails,
            type_specific_details: &'a TypeDetails,
            expenses: &'a Expenses,
            financials: &'a Financials,
            approval_required: bool,
            approval_status: ApprovalStatus,
            approved_by: &'a Option<String>,
            participants: u32,
            days: u32,
            requirement_summary: &'a Option<String>,
            delivery_documents: &'a [String],
            expense_documents: &'a [String],
            requirement_document: &'a Option<String>,
        }

        Wire {
            id: &self.id,
            opportunity_type: self.opportunity_type,
            client: &self.client,
            common_details: &self.common_details,
            type_specific_details: &self.type_specific_details,
            expenses: &self.expenses,
            financials: &self.financials,
            approval_required: self.approval_required,
            approval_status: self.approval_status,
            approved_by: &self.approved_by,
            participants: self.participants,
            days: self.days,
            requirement_summary: &self.requirement_summary,
            delivery_documents: &self.delivery_documents,
            expense_documents: &self.expense_documents,
            requirement_document: &self.requirement_document,
        }
        .serialize(serializer)
    }
}
