//! End-to-end analysis pipeline
//!
//! Ties the stages together: ingest event records, extract per-individual
//! traversals once, then compute co-occurrence, solitary-time, and
//! following statistics per phase window and wrap them into a report.

use crate::directions::{extract_traversals, DirectionMap};
use crate::error::EngineError;
use crate::following::{following_matrices, FollowingConfig};
use crate::intervals::validate_visits;
use crate::matrix::{cooccurrence_matrices, solitary_summary};
use crate::report::{PhaseWindow, ReportEncoder, SocialReport};
use crate::schema::{parse_ndjson, EventPayload, EventRecord};
use crate::topology::{RingTopology, Topology};
use crate::types::{AntennaRead, Phase, Visit};
use std::collections::HashMap;

/// Cleaned event streams for one experiment, grouped by individual.
///
/// Visit logs and read streams are independent views of the same animals;
/// an individual may appear in either or both. Individuals and locations
/// are kept sorted so matrix row order is reproducible.
#[derive(Debug, Clone, Default)]
pub struct ExperimentData {
    pub visits: HashMap<String, Vec<Visit>>,
    pub reads: HashMap<String, Vec<AntennaRead>>,
    pub individuals: Vec<String>,
    pub locations: Vec<String>,
}

impl ExperimentData {
    /// Group parsed event records by individual and derive the sorted
    /// individual and location vocabularies.
    pub fn from_records(records: &[EventRecord]) -> Result<Self, EngineError> {
        let mut data = Self::default();
        for record in records {
            match &record.payload {
                EventPayload::Visit {
                    location,
                    start,
                    end,
                } => {
                    data.visits
                        .entry(record.individual.clone())
                        .or_default()
                        .push(Visit::new(location.clone(), *start, *end));
                    if !data.locations.contains(location) {
                        data.locations.push(location.clone());
                    }
                }
                EventPayload::AntennaRead { antenna, time } => {
                    data.reads
                        .entry(record.individual.clone())
                        .or_default()
                        .push(AntennaRead::new(*time, antenna.clone()));
                }
            }
            if !data.individuals.contains(&record.individual) {
                data.individuals.push(record.individual.clone());
            }
        }
        data.individuals.sort();
        data.locations.sort();
        data.validate()?;
        Ok(data)
    }

    /// Re-check the upstream cleaning contract on every visit log
    pub fn validate(&self) -> Result<(), EngineError> {
        for visits in self.visits.values() {
            validate_visits(visits)?;
        }
        Ok(())
    }

    /// Keep only the named individuals, in the given order
    pub fn restrict_individuals(&mut self, keep: &[String]) -> Result<(), EngineError> {
        for name in keep {
            if !self.individuals.contains(name) {
                return Err(EngineError::UnknownIndividual(name.clone()));
            }
        }
        self.visits.retain(|name, _| keep.contains(name));
        self.reads.retain(|name, _| keep.contains(name));
        self.individuals = keep.to_vec();
        Ok(())
    }
}

/// Intersect each visit with the phase window, truncating partial overlaps
fn clip_visits(visits: &[Visit], phase: &Phase) -> Vec<Visit> {
    visits
        .iter()
        .filter_map(|v| {
            let start = v.start.max(phase.start);
            let end = v.end.min(phase.end);
            (end > start).then(|| Visit::new(v.location.clone(), start, end))
        })
        .collect()
}

/// Select the phases whose name marks them as dark
pub fn filter_dark(phases: &[Phase]) -> Vec<Phase> {
    phases
        .iter()
        .filter(|p| p.name.to_lowercase().contains("dark"))
        .cloned()
        .collect()
}

/// Select the phases whose name marks them as light
pub fn filter_light(phases: &[Phase]) -> Vec<Phase> {
    phases
        .iter()
        .filter(|p| p.name.to_lowercase().contains("light"))
        .cloned()
        .collect()
}

/// Top-level analyzer owning the apparatus topology, the following
/// detector configuration, and the report encoder.
pub struct SocialAnalyzer {
    topology: Box<dyn Topology>,
    following: FollowingConfig,
    encoder: ReportEncoder,
}

impl Default for SocialAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialAnalyzer {
    /// Standard eight-antenna apparatus with default detector settings
    pub fn new() -> Self {
        Self {
            topology: Box::new(RingTopology::standard_eight_antenna()),
            following: FollowingConfig::default(),
            encoder: ReportEncoder::new(),
        }
    }

    pub fn with_topology(mut self, topology: Box<dyn Topology>) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_following_config(mut self, config: FollowingConfig) -> Self {
        self.following = config;
        self
    }

    pub fn with_encoder(mut self, encoder: ReportEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Compute every statistic for one phase window
    pub fn analyze_phase(
        &self,
        data: &ExperimentData,
        traversals: &HashMap<String, DirectionMap>,
        phase: &Phase,
    ) -> Result<PhaseWindow, EngineError> {
        phase.validate()?;
        let duration = phase.duration();

        let clipped: HashMap<String, Vec<Visit>> = data
            .visits
            .iter()
            .map(|(name, visits)| (name.clone(), clip_visits(visits, phase)))
            .collect();

        let (time_together, expected_time_together) =
            cooccurrence_matrices(&clipped, &data.individuals, &data.locations, duration);
        let solitary_time_sec = solitary_summary(&clipped, &data.individuals, &data.locations);

        let (following, following_time, following_spans_sec) = following_matrices(
            traversals,
            &data.individuals,
            phase.start,
            phase.end,
            &self.following,
        )?;

        Ok(PhaseWindow {
            phase: phase.clone(),
            duration_sec: duration,
            time_together,
            expected_time_together,
            solitary_time_sec,
            following,
            following_time,
            following_spans_sec,
        })
    }

    /// Run the whole pipeline over a list of phase windows
    pub fn analyze(
        &self,
        data: &ExperimentData,
        phases: &[Phase],
    ) -> Result<SocialReport, EngineError> {
        data.validate()?;

        let mut traversals = HashMap::new();
        for individual in &data.individuals {
            let reads: &[AntennaRead] = data.reads.get(individual).map_or(&[], Vec::as_slice);
            traversals.insert(
                individual.clone(),
                extract_traversals(reads, self.topology.as_ref())?,
            );
        }

        let mut windows = Vec::with_capacity(phases.len());
        for phase in phases {
            windows.push(self.analyze_phase(data, &traversals, phase)?);
        }

        Ok(self
            .encoder
            .encode(&data.individuals, &data.locations, windows))
    }

    /// Run the pipeline and serialize the report
    pub fn analyze_to_json(
        &self,
        data: &ExperimentData,
        phases: &[Phase],
    ) -> Result<String, EngineError> {
        let report = self.analyze(data, phases)?;
        serde_json::to_string_pretty(&report).map_err(EngineError::JsonError)
    }
}

/// Convenience entry point: NDJSON event records in, JSON report out
pub fn records_to_report_json(input: &str, phases: &[Phase]) -> Result<String, EngineError> {
    let records = parse_ndjson(input)?;
    let data = ExperimentData::from_records(&records)?;
    SocialAnalyzer::new().analyze_to_json(&data, phases)
}
