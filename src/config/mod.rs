//! Labor agreement configuration and the agreement registry.
//!
//! This module loads persisted agreement records from YAML, validates them into
//! immutable [`LaborRule`] values, and serves them from an [`AgreementRegistry`]
//! that is replaced wholesale on administrative updates.
//!
//! # Example
//!
//! ```no_run
//! use shift_compliance::config::AgreementLoader;
//!
//! let registry = AgreementLoader::load("./config/agreements.yaml")?.registry()?;
//! println!("Registered: {:?}", registry.snapshot().codes());
//! # Ok::<(), shift_compliance::error::EngineError>(())
//! ```

mod loader;
mod registry;
mod types;

pub use loader::AgreementLoader;
pub use registry::{AgreementRegistry, AgreementSet};
pub use types::{AgreementsConfig, LaborAgreementRecord, LaborRule};
