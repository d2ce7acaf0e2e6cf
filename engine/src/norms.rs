//! Normative data store: threshold tables keyed by test identifier
//!
//! The engine only needs the [`NormsProvider`] lookup contract; where the
//! tables come from is the caller's concern. [`NormsStore`] covers the common
//! cases: the bundled ACSM-derived dataset, a directory of JSON files, or
//! tables built in memory (tests, database-backed callers).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{EngineError, NormsLoadError};
use crate::models::{Gender, TestCategory};
use crate::rating::{AgeBracket, TierThresholds};

/// Full normative table for one test: metadata plus per-gender, per-bracket
/// tier thresholds. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub test_name: String,
    pub category: TestCategory,
    pub unit: String,
    /// True when a lower raw value is better (e.g. step-test recovery BPM).
    /// Directionality is uniform across all brackets of one test.
    #[serde(default)]
    pub inverted: bool,
    pub norms: HashMap<Gender, HashMap<AgeBracket, TierThresholds>>,
}

impl ThresholdTable {
    /// Look up the threshold row for a gender and age bracket.
    ///
    /// A missing gender or bracket entry is a data-integrity error, never
    /// silently defaulted to a neighboring row. `test_id` is only used for
    /// error context.
    pub fn row(
        &self,
        test_id: &str,
        gender: Gender,
        bracket: AgeBracket,
    ) -> Result<&TierThresholds, EngineError> {
        let gender_norms =
            self.norms
                .get(&gender)
                .ok_or_else(|| EngineError::MissingGenderNorms {
                    test_id: test_id.to_string(),
                    gender,
                })?;
        gender_norms
            .get(&bracket)
            .ok_or_else(|| EngineError::MissingBracketNorms {
                test_id: test_id.to_string(),
                gender,
                bracket,
            })
    }
}

/// Lookup contract the rating engine evaluates against.
///
/// Implementations are expected to be immutable after construction, which
/// makes them safe to share across threads without locking.
pub trait NormsProvider {
    /// Fetch the threshold table for a test, failing with
    /// [`EngineError::UnknownTest`] when no normative data exists for it.
    fn threshold_table(&self, test_id: &str) -> Result<&ThresholdTable, EngineError>;
}

/// In-memory normative data store.
#[derive(Debug, Clone, Default)]
pub struct NormsStore {
    tables: HashMap<String, ThresholdTable>,
}

// Bundled ACSM-derived tables, one JSON file per non-computed test in the
// battery. Shape and monotonicity are validated by the tests below.
const BUNDLED_TABLES: [(&str, &str); 6] = [
    ("pushup", include_str!("../data/norms/pushup.json")),
    ("wall_sit", include_str!("../data/norms/wall_sit.json")),
    ("plank", include_str!("../data/norms/plank.json")),
    (
        "sit_and_reach",
        include_str!("../data/norms/sit_and_reach.json"),
    ),
    ("zipper", include_str!("../data/norms/zipper.json")),
    ("step_test", include_str!("../data/norms/step_test.json")),
];

impl NormsStore {
    /// Build a store from already-parsed tables.
    pub fn from_tables<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = (String, ThresholdTable)>,
    {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// The normative dataset compiled into the engine.
    pub fn bundled() -> Self {
        let tables = BUNDLED_TABLES
            .into_iter()
            .map(|(test_id, raw)| {
                let table: ThresholdTable = serde_json::from_str(raw)
                    .unwrap_or_else(|e| panic!("bundled norms for '{test_id}' are invalid: {e}"));
                (test_id.to_string(), table)
            })
            .collect();
        Self { tables }
    }

    /// Load every `<test_id>.json` file in a directory.
    ///
    /// The file stem is the test identifier. Non-JSON entries are skipped;
    /// an unreadable or unparseable file fails the whole load.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, NormsLoadError> {
        let dir = dir.as_ref();
        let mut tables = HashMap::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let test_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| NormsLoadError::InvalidFileName(path.display().to_string()))?
                .to_string();

            let raw = std::fs::read_to_string(&path)?;
            let table: ThresholdTable = serde_json::from_str(&raw)?;
            debug!(test_id = %test_id, test_name = %table.test_name, "loaded normative table");
            tables.insert(test_id, table);
        }

        info!(count = tables.len(), dir = %dir.display(), "normative data store loaded");
        Ok(Self { tables })
    }

    /// Identifiers of every test with normative data, unordered.
    pub fn test_ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl NormsProvider for NormsStore {
    fn threshold_table(&self, test_id: &str) -> Result<&ThresholdTable, EngineError> {
        self.tables
            .get(test_id)
            .ok_or_else(|| EngineError::UnknownTest(test_id.to_string()))
    }
}
