//! Fitness Assessment Engine
//!
//! Pure, synchronous rating engine for a fitness test battery: normative
//! threshold lookup, five-tier classification (standard and inverted tests),
//! body-composition metrics derived from client measurements, and progress
//! deltas between assessments.
//!
//! The engine performs no I/O of its own beyond the optional norms-file
//! loader; it operates on in-memory records already validated by the caller
//! and is safe to call from multiple threads: every store is immutable
//! after load.

pub mod assessment;
pub mod body_comp;
pub mod errors;
pub mod models;
pub mod norms;
pub mod progress;
pub mod rating;

// Re-export commonly used items
pub use assessment::{evaluate_all, evaluate_test, test_battery};
pub use body_comp::{
    body_composition, classify_bmi, classify_body_fat, classify_whr, compute_bmi,
    compute_body_fat_pct, compute_whr, mass_split,
};
pub use errors::{EngineError, NormsLoadError};
pub use models::*;
pub use norms::{NormsProvider, NormsStore, ThresholdTable};
pub use progress::compute_progress;
pub use rating::{classify, AgeBracket, Rating, TierThresholds};
