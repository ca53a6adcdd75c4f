//! Derived-state calculator
//!
//! Pure functions that turn raw inputs into TOV, expense totals, end dates
//! and approval routing. Controllers call these explicitly after every
//! mutation; nothing here persists or performs I/O.

use chrono::{Duration, NaiveDate};
use salesdesk_domain::{ApprovalStatus, Expenses, TovUnit};

/// Compute the total order value from the rate, unit and quantities.
///
/// `Fixed` ignores the quantities; `PerDay` multiplies by `days`;
/// `PerParticipant` multiplies by `participants`. A missing rate counts as
/// zero and a zero quantity falls back to one, so the result is never
/// negative and never collapses to zero just because a count is unset.
pub fn compute_tov(rate: Option<f64>, unit: TovUnit, days: u32, participants: u32) -> f64 {
    let rate = rate.unwrap_or(0.0).max(0.0);
    let multiplier = match unit {
        TovUnit::Fixed => 1,
        TovUnit::PerDay => days.max(1),
        TovUnit::PerParticipant => participants.max(1),
    };
    rate * f64::from(multiplier)
}

/// Compute the inclusive end date from a start date and a day count.
///
/// Returns `None` when either input is absent or `days` is zero; callers
/// must leave the previous end date untouched in that case (best-effort
/// auto-calculation, never a regression to empty).
pub fn compute_end_date(start_date: Option<NaiveDate>, days: u32) -> Option<NaiveDate> {
    let start = start_date?;
    if days < 1 {
        return None;
    }
    Some(start + Duration::days(i64::from(days) - 1))
}

/// Sum of the nine absolute cost categories.
///
/// The two percentage categories apply to revenue elsewhere and are
/// excluded from the literal sum shown in the expense breakdown.
pub fn compute_total_expense(expenses: &Expenses) -> f64 {
    expenses.trainer_cost
        + expenses.gk_royalty
        + expenses.material
        + expenses.labs
        + expenses.venue
        + expenses.travel
        + expenses.accommodation
        + expenses.per_diem
        + expenses.local_conveyance
}

/// Markup percentage of a PO value over the total expense.
///
/// Guards against divide-by-zero: a non-positive expense total yields 0.
pub fn compute_markup(po_value: f64, total_expense: f64) -> f64 {
    if total_expense > 0.0 {
        (po_value - total_expense) / total_expense * 100.0
    } else {
        0.0
    }
}

/// Approval routing for a gross-profit margin.
///
/// Below 10% the director signs off, between 10% and 15% the manager does,
/// and from 15% upward no approval is required.
pub fn approval_for_gross_profit(gross_profit_percent: f64) -> ApprovalStatus {
    if gross_profit_percent < 10.0 {
        ApprovalStatus::PendingDirector
    } else if gross_profit_percent < 15.0 {
        ApprovalStatus::PendingManager
    } else {
        ApprovalStatus::NotRequired
    }
}
