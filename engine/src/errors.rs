//! Error types for the assessment engine

use thiserror::Error;

use crate::models::Gender;
use crate::rating::AgeBracket;

/// Evaluation errors surfaced to callers of the engine.
///
/// All variants are validation-class: deterministic for a given input, never
/// transient. A single failing test aborts the whole batch; no partial
/// result lists are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// No normative data exists for the submitted test identifier.
    #[error("no normative data found for test: '{0}'")]
    UnknownTest(String),

    /// The test's norms are missing the whole gender entry, a data-integrity
    /// problem in the loaded tables, not defaulted away.
    #[error("no norms for gender '{gender}' in test '{test_id}'")]
    MissingGenderNorms { test_id: String, gender: Gender },

    /// The test's norms are missing the resolved age bracket for this gender.
    #[error("no norms for age bracket '{bracket}' in test '{test_id}' ({gender})")]
    MissingBracketNorms {
        test_id: String,
        gender: Gender,
        bracket: AgeBracket,
    },
}

/// Errors from loading normative tables off disk.
#[derive(Error, Debug)]
pub enum NormsLoadError {
    #[error("failed to read norms file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse norms file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A norms file without a usable `<test_id>.json` stem.
    #[error("norms file has no valid test_id stem: '{0}'")]
    InvalidFileName(String),
}
