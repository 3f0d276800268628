//! Report encoding
//!
//! This module wraps computed phase statistics into a versioned JSON report.
//! Ensures producer and provenance metadata are present and properly
//! formatted.

use crate::error::EngineError;
use crate::types::{PairMatrix, Phase};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Identifies the producing engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Where the numbers came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProvenance {
    /// Individuals covered by every matrix, in row/column order
    pub individuals: Vec<String>,
    /// Location vocabulary the interval statistics ranged over
    pub locations: Vec<String>,
    pub computed_at_utc: String,
}

/// All statistics for one phase window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub phase: Phase,
    pub duration_sec: f64,
    /// Measured fraction of time together, symmetric
    pub time_together: PairMatrix,
    /// Fraction expected under independent movement, symmetric
    pub expected_time_together: PairMatrix,
    /// Per-individual time alone in a compartment, summed over locations
    pub solitary_time_sec: HashMap<String, f64>,
    /// Following event counts, row leads and column follows
    pub following: PairMatrix,
    /// Shared tunnel time per following pair, normalized by phase duration
    pub following_time: PairMatrix,
    /// Leader-entry to follower-exit durations keyed by `"leader|follower"`
    pub following_spans_sec: HashMap<String, Vec<f64>>,
}

/// Top-level report payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub provenance: ReportProvenance,
    pub windows: Vec<PhaseWindow>,
}

/// Report encoder for producing versioned JSON payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Wrap computed phase windows into a full report
    pub fn encode(
        &self,
        individuals: &[String],
        locations: &[String],
        windows: Vec<PhaseWindow>,
    ) -> SocialReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = ReportProvenance {
            individuals: individuals.to_vec(),
            locations: locations.to_vec(),
            computed_at_utc: Utc::now().to_rfc3339(),
        };

        SocialReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            provenance,
            windows,
        }
    }

    /// Encode to JSON string
    pub fn encode_to_json(
        &self,
        individuals: &[String],
        locations: &[String],
        windows: Vec<PhaseWindow>,
    ) -> Result<String, EngineError> {
        let report = self.encode(individuals, locations, windows);
        serde_json::to_string_pretty(&report).map_err(EngineError::JsonError)
    }
}
