//! Compliance evaluation for the Shift Compliance Engine.
//!
//! This module contains the evaluation of a proposed shift against a labor
//! rule: calendar period arithmetic, the read-only ledger view, weekly and
//! monthly hour caps, classification of hours into regular, night, Saturday
//! premium and overtime, double-booking detection, and override authorization.

mod classification;
mod double_booking;
mod evaluator;
mod hour_caps;
mod ledger_view;
mod override_authorization;
mod periods;

pub use classification::{HourClassification, classify_hours};
pub use double_booking::{DoubleBookingCheck, detect_double_booking};
pub use evaluator::evaluate;
pub use hour_caps::{CapCheck, HourCap, HourTotals, calculate_hour_totals, check_hour_cap};
pub use ledger_view::{LedgerView, LocalEntry};
pub use override_authorization::{authorize_override, authorize_override_at};
pub use periods::{
    Period, calendar_day_containing, calendar_month_containing, iso_week_containing,
    local_time, seconds_to_hours, split_by_hour, to_instant,
};
