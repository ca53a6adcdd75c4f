//! Per-tab draft controller
//!
//! Holds the copy-on-edit working state for one tab of the opportunity
//! view. Field mutations arrive as explicit [`FieldChange`] commands, get
//! permission-checked and validated, and re-run the derived-state
//! calculator. Save and cancel drive the Viewing / Editing / Saving / Error
//! state machine; the draft survives a failed save so the user never loses
//! edits.

use std::sync::Arc;

use chrono::NaiveDate;
use salesdesk_domain::{
    CommonDetails, CrmError, ExpenseField, Expenses, Opportunity, OpportunityStatus, Result,
    SalesOwnerRef, SessionUser, StagedFile, TovUnit, TypeDetails,
};
use tracing::{debug, warn};

use super::ports::OpportunityGateway;
use super::sanitize::SavePayload;
use super::validate::{validate_invoice_date, validate_po_date};
use crate::finance::{compute_end_date, compute_tov};
use crate::permissions::{can_edit, expense_section, Section};

/// The tabs of the opportunity view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Sales,
    Finance,
    Scope,
}

impl Tab {
    /// Sections a tab is allowed to mutate; Overview is a read-only summary
    pub fn sections(self) -> &'static [Section] {
        match self {
            Self::Overview => &[],
            Self::Sales => &[Section::Sales],
            Self::Finance => &[Section::Sales, Section::Delivery],
            Self::Scope => &[Section::Scope, Section::Delivery],
        }
    }

    fn allows(self, section: Section) -> bool {
        self.sections().contains(&section)
    }
}

/// Edit-session state of a tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPhase {
    /// Draft mirrors server state, read-only
    Viewing,
    /// Draft is a mutable copy
    Editing,
    /// Awaiting the server round-trip
    Saving,
    /// Save failed; draft retained for correction
    Error(String),
}

/// The locally mutable working copy of the editable sub-documents
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityDraft {
    pub common: CommonDetails,
    pub expenses: Expenses,
    pub details: TypeDetails,
    pub participants: u32,
    pub days: u32,
    pub requirement_summary: Option<String>,
    pub requirement_document: Option<String>,
    end_date_overridden: bool,
}

impl OpportunityDraft {
    /// Snapshot the editable parts of a server record
    pub fn from_record(record: &Opportunity) -> Self {
        Self {
            common: record.common_details.clone(),
            expenses: record.expenses.clone(),
            details: record.type_specific_details.clone(),
            participants: record.participants,
            days: record.days,
            requirement_summary: record.requirement_summary.clone(),
            requirement_document: record.requirement_document.clone(),
            end_date_overridden: false,
        }
    }

    /// Re-run the derived-state calculator after a mutation.
    ///
    /// TOV always follows the raw inputs; the end date only follows while
    /// the user has not set it by hand, and a failed computation leaves the
    /// prior value in place.
    fn recompute(&mut self) {
        self.common.tov = compute_tov(
            self.common.tov_rate,
            self.common.tov_unit,
            self.days,
            self.participants,
        );
        if !self.end_date_overridden {
            if let Some(end) = compute_end_date(self.common.start_date, self.days) {
                self.common.end_date = Some(end);
            }
        }
    }
}

/// An explicit field mutation command.
///
/// Commands replace the string-keyed update entry point: each carries its
/// typed value and knows which permission section it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    // Sales-tagged fields
    BillingEntity(Option<String>),
    PoNumber(Option<String>),
    PoDate(Option<NaiveDate>),
    PoValue(Option<f64>),
    InvoiceNumber(Option<String>),
    InvoiceDate(Option<NaiveDate>),
    TovRate(Option<f64>),
    TovUnit(TovUnit),
    Status(OpportunityStatus),
    TrainingSector(Option<String>),
    SalesOwner(Option<String>),
    // Delivery-tagged fields
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Days(u32),
    Participants(u32),
    Expense(ExpenseField, f64),
    // Scope-tagged fields
    Details(TypeDetails),
    RequirementSummary(Option<String>),
}

impl FieldChange {
    /// Permission section this command falls under
    pub fn section(&self) -> Section {
        match self {
            Self::BillingEntity(_)
            | Self::PoNumber(_)
            | Self::PoDate(_)
            | Self::PoValue(_)
            | Self::InvoiceNumber(_)
            | Self::InvoiceDate(_)
            | Self::TovRate(_)
            | Self::TovUnit(_)
            | Self::Status(_)
            | Self::TrainingSector(_)
            | Self::SalesOwner(_) => Section::Sales,
            Self::StartDate(_)
            | Self::EndDate(_)
            | Self::Days(_)
            | Self::Participants(_) => Section::Delivery,
            Self::Expense(field, _) => expense_section(*field),
            Self::Details(_) | Self::RequirementSummary(_) => Section::Scope,
        }
    }
}

/// Edit-state holder for one tab of the opportunity view
pub struct TabController {
    tab: Tab,
    user: SessionUser,
    gateway: Arc<dyn OpportunityGateway>,
    baseline: Opportunity,
    draft: OpportunityDraft,
    phase: EditPhase,
    staged_document: Option<StagedFile>,
}

impl TabController {
    /// Create a controller in the Viewing phase
    pub fn new(
        tab: Tab,
        user: SessionUser,
        record: Opportunity,
        gateway: Arc<dyn OpportunityGateway>,
    ) -> Self {
        let draft = OpportunityDraft::from_record(&record);
        Self {
            tab,
            user,
            gateway,
            baseline: record,
            draft,
            phase: EditPhase::Viewing,
            staged_document: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn draft(&self) -> &OpportunityDraft {
        &self.draft
    }

    pub fn baseline(&self) -> &Opportunity {
        &self.baseline
    }

    pub fn staged_document(&self) -> Option<&StagedFile> {
        self.staged_document.as_ref()
    }

    /// Whether the draft differs from the last-fetched server state
    pub fn is_dirty(&self) -> bool {
        self.draft != OpportunityDraft::from_record(&self.baseline)
    }

    fn in_edit_mode(&self) -> bool {
        matches!(self.phase, EditPhase::Editing | EditPhase::Error(_))
    }

    /// Whether the given section is editable for this controller's user
    /// right now
    pub fn can_edit(&self, section: Section) -> bool {
        self.tab.allows(section) && can_edit(self.user.role, section, self.in_edit_mode())
    }

    /// Viewing -> Editing
    pub fn begin_edit(&mut self) -> Result<()> {
        if self.phase != EditPhase::Viewing {
            return Err(CrmError::InvalidInput(
                "an edit session is already in progress".to_string(),
            ));
        }
        self.phase = EditPhase::Editing;
        Ok(())
    }

    /// Discard the draft and return to Viewing
    pub fn cancel(&mut self) -> Result<()> {
        if !self.in_edit_mode() {
            return Err(CrmError::InvalidInput("no edit session to cancel".to_string()));
        }
        self.draft = OpportunityDraft::from_record(&self.baseline);
        self.staged_document = None;
        self.phase = EditPhase::Viewing;
        Ok(())
    }

    /// Commit one field change to the draft.
    ///
    /// The change is permission-checked against the tab and role, validated,
    /// applied, and followed by a derived-state recompute. A rejected change
    /// leaves the draft exactly as it was. Applying a change while in the
    /// Error phase resumes the edit session.
    pub fn apply(&mut self, change: FieldChange) -> Result<()> {
        if !self.in_edit_mode() {
            return Err(CrmError::InvalidInput(
                "fields are read-only outside an edit session".to_string(),
            ));
        }

        let section = change.section();
        if !self.tab.allows(section) {
            return Err(CrmError::InvalidInput(format!(
                "the {:?} tab does not edit {:?} fields",
                self.tab, section
            )));
        }
        if !can_edit(self.user.role, section, true) {
            return Err(CrmError::Forbidden(format!(
                "role {:?} may not edit {:?} fields",
                self.user.role, section
            )));
        }

        self.validate(&change)?;
        self.commit(change);
        self.draft.recompute();

        if matches!(self.phase, EditPhase::Error(_)) {
            self.phase = EditPhase::Editing;
        }
        Ok(())
    }

    fn validate(&self, change: &FieldChange) -> Result<()> {
        match change {
            FieldChange::PoDate(Some(date)) => {
                validate_po_date(*date, self.draft.common.start_date)
            }
            FieldChange::InvoiceDate(Some(date)) => {
                validate_invoice_date(*date, self.draft.common.end_date)
            }
            FieldChange::Details(details)
                if details.opportunity_type() != self.baseline.opportunity_type =>
            {
                Err(CrmError::InvalidInput(format!(
                    "detail payload is for {} but the record is {}",
                    details.opportunity_type(),
                    self.baseline.opportunity_type
                )))
            }
            _ => Ok(()),
        }
    }

    fn commit(&mut self, change: FieldChange) {
        let draft = &mut self.draft;
        match change {
            FieldChange::BillingEntity(v) => draft.common.billing_entity = v,
            FieldChange::PoNumber(v) => draft.common.po_number = v,
            FieldChange::PoDate(v) => draft.common.po_date = v,
            FieldChange::PoValue(v) => draft.common.po_value = v,
            FieldChange::InvoiceNumber(v) => draft.common.invoice_number = v,
            FieldChange::InvoiceDate(v) => draft.common.invoice_date = v,
            FieldChange::TovRate(v) => draft.common.tov_rate = v,
            FieldChange::TovUnit(v) => draft.common.tov_unit = v,
            FieldChange::Status(v) => draft.common.status = v,
            FieldChange::TrainingSector(v) => draft.common.training_sector = v,
            FieldChange::SalesOwner(v) => {
                draft.common.sales_owner = v.map(SalesOwnerRef::by_id);
            }
            FieldChange::StartDate(v) => draft.common.start_date = v,
            FieldChange::EndDate(v) => {
                // A manual end date wins over auto-calculation until cleared
                draft.end_date_overridden = v.is_some();
                draft.common.end_date = v;
            }
            FieldChange::Days(v) => draft.days = v,
            FieldChange::Participants(v) => draft.participants = v,
            FieldChange::Expense(field, amount) => field.apply(&mut draft.expenses, amount),
            FieldChange::Details(v) => draft.details = v,
            FieldChange::RequirementSummary(v) => draft.requirement_summary = v,
        }
    }

    /// Submit the sanitised draft to the backend.
    ///
    /// Guarded against double submission: a save while one is already in
    /// flight fails without issuing a second request. On success the
    /// baseline is replaced with the server response and the controller
    /// returns to Viewing; on failure the draft is retained and the phase
    /// carries the error for the view to surface.
    pub async fn save(&mut self) -> Result<()> {
        if self.phase == EditPhase::Saving {
            return Err(CrmError::InvalidInput("a save is already in flight".to_string()));
        }
        if !self.in_edit_mode() {
            return Err(CrmError::InvalidInput("nothing to save outside an edit session".to_string()));
        }

        self.phase = EditPhase::Saving;
        let payload = SavePayload::from_draft(&self.draft);
        debug!(opportunity = %self.baseline.id, tab = ?self.tab, "saving draft");

        match self.gateway.update(&self.baseline.id, &payload).await {
            Ok(record) => {
                self.draft = OpportunityDraft::from_record(&record);
                self.baseline = record;
                self.phase = EditPhase::Viewing;
                Ok(())
            }
            Err(err) => {
                warn!(opportunity = %self.baseline.id, error = %err, "save failed");
                self.phase = EditPhase::Error(err.to_string());
                Err(err)
            }
        }
    }

    /// Stage a requirement document for later upload.
    ///
    /// Replaces any previously staged file; a slot holds at most one.
    pub fn stage_requirement_document(&mut self, file: StagedFile) -> Result<()> {
        if !self.in_edit_mode() {
            return Err(CrmError::InvalidInput(
                "documents can only be staged during an edit session".to_string(),
            ));
        }
        self.staged_document = Some(file);
        Ok(())
    }

    /// Drop the staged file without uploading it
    pub fn discard_staged_document(&mut self) {
        self.staged_document = None;
    }

    /// Upload the staged requirement document.
    ///
    /// A side channel independent of save: on success the draft's document
    /// reference is replaced optimistically and the staged slot cleared; on
    /// failure the staged file and the persisted reference both survive.
    pub async fn upload_requirement_document(&mut self) -> Result<String> {
        let file = self
            .staged_document
            .clone()
            .ok_or_else(|| CrmError::InvalidInput("no document staged for upload".to_string()))?;

        match self.gateway.upload_requirement_document(&self.baseline.id, file).await {
            Ok(path) => {
                self.draft.requirement_document = Some(path.clone());
                self.staged_document = None;
                Ok(path)
            }
            Err(err) => {
                warn!(opportunity = %self.baseline.id, error = %err, "document upload failed");
                Err(err)
            }
        }
    }
}
