//! Configuration loading functionality.
//!
//! This module provides the [`AgreementLoader`] type for loading persisted
//! labor agreement records from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::registry::AgreementRegistry;
use super::types::{AgreementsConfig, LaborAgreementRecord};

/// Loads labor agreement records for the registry.
///
/// # File Structure
///
/// ```text
/// agreements:
///   - code: SUVICO
///     maxHoursWeekly: 48
///     maxHoursMonthly: 204
///     saturdayCutoffHour: 13
///     nightShiftStart: 21
///     nightShiftEnd: 6
///     isActive: true
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_compliance::config::AgreementLoader;
///
/// let loader = AgreementLoader::load("./config/agreements.yaml")?;
/// let registry = loader.registry()?;
/// let rule = registry.lookup("SUVICO")?;
/// println!("Monthly cap: {}", rule.max_hours_monthly());
/// # Ok::<(), shift_compliance::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AgreementLoader {
    records: Vec<LaborAgreementRecord>,
}

impl AgreementLoader {
    /// Loads agreement records from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns an `AgreementLoader` on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file contains invalid YAML or missing fields (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses agreement records from YAML text.
    ///
    /// `source` names the origin of the text in error messages.
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: AgreementsConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            records: config.agreements,
        })
    }

    /// Returns every loaded record, active or not.
    pub fn records(&self) -> &[LaborAgreementRecord] {
        &self.records
    }

    /// Builds a registry from the active records.
    pub fn registry(&self) -> EngineResult<AgreementRegistry> {
        AgreementRegistry::from_records(&self.records)
    }
}
