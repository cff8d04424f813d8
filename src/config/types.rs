//! Configuration types for labor agreements.
//!
//! This module contains the persisted agreement record shape, deserialized from
//! YAML configuration files or API payloads, and the validated [`LaborRule`]
//! the evaluator consumes.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A labor agreement as persisted by the administrative application.
///
/// Field names follow the stored documents (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborAgreementRecord {
    /// The agreement code (e.g., "SUVICO").
    pub code: String,
    /// Human-readable agreement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Weekly hour cap; absent means unconstrained.
    #[serde(default)]
    pub max_hours_weekly: Option<u32>,
    /// Monthly hour cap.
    pub max_hours_monthly: u32,
    /// Daily hours after which time counts as overtime.
    #[serde(default)]
    pub overtime_threshold_daily: Option<Decimal>,
    /// Hour of day after which Saturday work is premium time.
    pub saturday_cutoff_hour: u32,
    /// First hour of the night window.
    pub night_shift_start: u32,
    /// Hour at which the night window ends (exclusive).
    pub night_shift_end: u32,
    /// Only active agreements are registered.
    pub is_active: bool,
}

/// Agreements configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AgreementsConfig {
    /// The persisted agreement records.
    pub agreements: Vec<LaborAgreementRecord>,
}

/// The validated, immutable thresholds of one labor agreement.
///
/// Agreements differ only in data, so a single value type serves all of them.
///
/// # Example
///
/// ```
/// use shift_compliance::config::{LaborAgreementRecord, LaborRule};
///
/// let record = LaborAgreementRecord {
///     code: "SUVICO".to_string(),
///     name: None,
///     max_hours_weekly: Some(48),
///     max_hours_monthly: 204,
///     overtime_threshold_daily: None,
///     saturday_cutoff_hour: 13,
///     night_shift_start: 21,
///     night_shift_end: 6,
///     is_active: true,
/// };
/// let rule = LaborRule::from_record(&record).unwrap();
/// assert!(rule.is_night_hour(23));
/// assert!(!rule.is_night_hour(6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborRule {
    code: String,
    max_hours_weekly: Option<u32>,
    max_hours_monthly: u32,
    overtime_threshold_daily: Option<Decimal>,
    saturday_cutoff_hour: u32,
    night_shift_start: u32,
    night_shift_end: u32,
}

impl LaborRule {
    /// Validates a persisted record into a rule.
    ///
    /// Only positivity, hour ranges and a non-empty night window are checked;
    /// weekly and monthly caps are not cross-validated.
    pub fn from_record(record: &LaborAgreementRecord) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidAgreement {
            code: record.code.clone(),
            message,
        };

        if record.code.trim().is_empty() {
            return Err(invalid("code must not be blank".to_string()));
        }
        if record.max_hours_monthly == 0 {
            return Err(invalid("maxHoursMonthly must be positive".to_string()));
        }
        if record.max_hours_weekly == Some(0) {
            return Err(invalid("maxHoursWeekly must be positive".to_string()));
        }
        if let Some(threshold) = record.overtime_threshold_daily {
            if threshold <= Decimal::ZERO {
                return Err(invalid(format!(
                    "overtimeThresholdDaily must be positive, got {}",
                    threshold
                )));
            }
        }
        for (field, hour) in [
            ("saturdayCutoffHour", record.saturday_cutoff_hour),
            ("nightShiftStart", record.night_shift_start),
            ("nightShiftEnd", record.night_shift_end),
        ] {
            if hour > 23 {
                return Err(invalid(format!("{} must be within 0..=23, got {}", field, hour)));
            }
        }
        if record.night_shift_start == record.night_shift_end {
            return Err(invalid(
                "nightShiftStart must differ from nightShiftEnd".to_string(),
            ));
        }

        Ok(Self {
            code: record.code.clone(),
            max_hours_weekly: record.max_hours_weekly,
            max_hours_monthly: record.max_hours_monthly,
            overtime_threshold_daily: record.overtime_threshold_daily,
            saturday_cutoff_hour: record.saturday_cutoff_hour,
            night_shift_start: record.night_shift_start,
            night_shift_end: record.night_shift_end,
        })
    }

    /// The agreement code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Weekly hour cap, if any.
    pub fn max_hours_weekly(&self) -> Option<u32> {
        self.max_hours_weekly
    }

    /// Monthly hour cap.
    pub fn max_hours_monthly(&self) -> u32 {
        self.max_hours_monthly
    }

    /// Daily overtime threshold in hours, if any.
    pub fn overtime_threshold_daily(&self) -> Option<Decimal> {
        self.overtime_threshold_daily
    }

    /// The daily overtime threshold in whole seconds.
    ///
    /// Sub-second fractions are truncated.
    pub fn overtime_threshold_seconds(&self) -> Option<i64> {
        self.overtime_threshold_daily
            .and_then(|hours| (hours * Decimal::from(3600)).trunc().to_i64())
    }

    /// Saturday cutoff hour.
    pub fn saturday_cutoff_hour(&self) -> u32 {
        self.saturday_cutoff_hour
    }

    /// First hour of the night window.
    pub fn night_shift_start(&self) -> u32 {
        self.night_shift_start
    }

    /// End hour of the night window (exclusive).
    pub fn night_shift_end(&self) -> u32 {
        self.night_shift_end
    }

    /// Returns true if the wall-clock hour falls in `[start, end)`, wrapping
    /// past midnight when the window starts later than it ends.
    pub fn is_night_hour(&self, hour: u32) -> bool {
        if self.night_shift_start < self.night_shift_end {
            hour >= self.night_shift_start && hour < self.night_shift_end
        } else {
            hour >= self.night_shift_start || hour < self.night_shift_end
        }
    }
}
