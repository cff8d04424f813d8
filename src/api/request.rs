//! Request types for the Shift Compliance Engine API.
//!
//! This module defines the JSON request bodies for the evaluation, override,
//! and agreement replacement endpoints.

use serde::{Deserialize, Serialize};

use crate::config::LaborAgreementRecord;
use crate::models::{OverrideRecord, ProposedShift, ShiftLedgerEntry, ViolationKind};

/// Request body for the `/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The shift assignment being attempted.
    pub proposed: ProposedShift,
    /// The employee's committed ledger window.
    #[serde(default)]
    pub ledger: Vec<ShiftLedgerEntry>,
    /// Already-authorized overrides for this assignment.
    #[serde(default)]
    pub overrides: Vec<OverrideRecord>,
}

/// Request body for the `/overrides` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRequest {
    /// The privileged actor authorizing the override.
    pub actor_id: String,
    /// The violation kind to override.
    pub violation_kind: ViolationKind,
    /// Why the override is justified.
    pub justification: String,
}

/// Request body for `PUT /agreements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceAgreementsRequest {
    /// The complete new set of agreement records.
    pub agreements: Vec<LaborAgreementRecord>,
}
