//! The agreement registry.
//!
//! Rules are held in an immutable [`AgreementSet`] snapshot. Administrative
//! updates build a complete new snapshot and swap the `Arc` in one step, so a
//! reader either sees the whole old set or the whole new one.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{LaborAgreementRecord, LaborRule};

/// An immutable set of active labor rules keyed by agreement code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgreementSet {
    rules: HashMap<String, LaborRule>,
}

impl AgreementSet {
    /// Builds a set from persisted records.
    ///
    /// Inactive records are skipped. Fails with
    /// [`EngineError::InvalidAgreement`] if an active record is invalid or an
    /// active code appears twice.
    pub fn from_records(records: &[LaborAgreementRecord]) -> EngineResult<Self> {
        let mut rules = HashMap::new();

        for record in records.iter().filter(|r| r.is_active) {
            let rule = LaborRule::from_record(record)?;
            if rules.insert(rule.code().to_string(), rule).is_some() {
                return Err(EngineError::InvalidAgreement {
                    code: record.code.clone(),
                    message: "duplicate active agreement code".to_string(),
                });
            }
        }

        Ok(Self { rules })
    }

    /// Looks up the rule for an agreement code.
    pub fn get(&self, code: &str) -> EngineResult<&LaborRule> {
        self.rules
            .get(code)
            .ok_or_else(|| EngineError::UnknownAgreement {
                code: code.to_string(),
            })
    }

    /// Registered agreement codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of registered agreements.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no agreement is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Shared registry of labor rules with swap-on-update semantics.
///
/// Readers clone the current snapshot `Arc` and release the lock immediately;
/// the writer replaces the `Arc` wholesale. No rule is ever mutated in place.
///
/// # Example
///
/// ```
/// use shift_compliance::config::{AgreementRegistry, LaborAgreementRecord};
///
/// let record = LaborAgreementRecord {
///     code: "UOCRA".to_string(),
///     name: None,
///     max_hours_weekly: Some(44),
///     max_hours_monthly: 176,
///     overtime_threshold_daily: None,
///     saturday_cutoff_hour: 13,
///     night_shift_start: 21,
///     night_shift_end: 6,
///     is_active: true,
/// };
/// let registry = AgreementRegistry::from_records(&[record]).unwrap();
/// assert_eq!(registry.lookup("UOCRA").unwrap().max_hours_monthly(), 176);
/// assert!(registry.lookup("SUVICO").is_err());
/// ```
#[derive(Debug, Default)]
pub struct AgreementRegistry {
    current: RwLock<Arc<AgreementSet>>,
}

impl AgreementRegistry {
    /// Creates a registry serving the given set.
    pub fn new(set: AgreementSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
        }
    }

    /// Creates a registry from persisted records.
    pub fn from_records(records: &[LaborAgreementRecord]) -> EngineResult<Self> {
        Ok(Self::new(AgreementSet::from_records(records)?))
    }

    /// Returns the current snapshot.
    ///
    /// A held snapshot is unaffected by later replacements.
    pub fn snapshot(&self) -> Arc<AgreementSet> {
        // The guarded value is a plain Arc, so a poisoned lock still holds a
        // complete snapshot.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Looks up the rule for an agreement code.
    ///
    /// Fails with [`EngineError::UnknownAgreement`] if the code is not
    /// registered or its agreement is inactive.
    pub fn lookup(&self, code: &str) -> EngineResult<LaborRule> {
        self.snapshot().get(code).cloned()
    }

    /// Replaces the whole rule set.
    ///
    /// The new set is fully validated before the swap; on error the previous
    /// set stays in place. Returns the number of registered agreements.
    pub fn replace(&self, records: &[LaborAgreementRecord]) -> EngineResult<usize> {
        let next = Arc::new(AgreementSet::from_records(records)?);
        let count = next.len();

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
        drop(guard);

        info!(
            agreements = count,
            skipped_inactive = records.iter().filter(|r| !r.is_active).count(),
            "Agreement registry replaced"
        );
        Ok(count)
    }
}
