//! Event record schema
//!
//! This module defines the versioned JSON schema for ingesting cleaned RFID
//! event streams. Two record types exist: visits (continuous presence at a
//! location) and antenna reads (point registrations). Records arrive as
//! NDJSON, one per line, or as a JSON array.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Supported event schema version
pub const SCHEMA_VERSION: &str = "cohab.event.v1";

/// One event record as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Must equal [`SCHEMA_VERSION`]
    pub schema_version: String,
    /// Individual the event belongs to (RFID tag or given name)
    pub individual: String,
    #[serde(flatten)]
    pub payload: EventPayload,
}

/// The two event kinds, discriminated by `record_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record_type", rename_all = "snake_case")]
pub enum EventPayload {
    Visit {
        location: String,
        start: f64,
        end: f64,
    },
    AntennaRead {
        antenna: String,
        time: f64,
    },
}

impl EventRecord {
    /// Check the version tag and payload-level field constraints
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(EngineError::UnsupportedSchema(self.schema_version.clone()));
        }
        if let EventPayload::Visit {
            location,
            start,
            end,
        } = &self.payload
        {
            if start > end {
                return Err(EngineError::NegativeInterval {
                    location: location.clone(),
                    start: *start,
                    end: *end,
                });
            }
        }
        Ok(())
    }
}

/// Parse newline-delimited JSON event records. Blank lines are skipped;
/// every parsed record is validated.
pub fn parse_ndjson(input: &str) -> Result<Vec<EventRecord>, EngineError> {
    let mut records = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: EventRecord = serde_json::from_str(trimmed).map_err(|e| {
            EngineError::ParseError(format!("line {}: {e}", number + 1))
        })?;
        record.validate()?;
        records.push(record);
    }
    Ok(records)
}

/// Parse a JSON array of event records
pub fn parse_array(input: &str) -> Result<Vec<EventRecord>, EngineError> {
    let records: Vec<EventRecord> = serde_json::from_str(input)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}
