//! Field permission gate
//!
//! Pure functions of `(role, section, edit_mode)` - no hidden state, so the
//! policy is independently testable. Outside edit mode everything renders
//! read-only regardless of role.

use salesdesk_domain::{ExpenseField, Role};

/// Section tag a field group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Sales,
    Delivery,
    Scope,
}

/// Whether a field group is editable for the given role.
///
/// Sales roles edit Sales- and Scope-tagged fields, Delivery roles edit
/// Delivery-tagged fields, and Super Admin edits everything.
pub fn can_edit(role: Role, section: Section, edit_mode: bool) -> bool {
    if !edit_mode {
        return false;
    }
    match role {
        Role::SuperAdmin => true,
        Role::SalesExecutive | Role::SalesManager => {
            matches!(section, Section::Sales | Section::Scope)
        }
        Role::DeliveryHead | Role::DeliveryManager | Role::DeliveryTeam => {
            matches!(section, Section::Delivery)
        }
    }
}

/// Section an expense category belongs to.
///
/// The strategic percentage fields are Sales-only; the absolute cost
/// categories belong to Delivery.
pub fn expense_section(field: ExpenseField) -> Section {
    if field.is_strategic() {
        Section::Sales
    } else {
        Section::Delivery
    }
}

/// Whether a single expense category is editable for the given role.
pub fn can_edit_expense_field(role: Role, field: ExpenseField, edit_mode: bool) -> bool {
    can_edit(role, expense_section(field), edit_mode)
}
