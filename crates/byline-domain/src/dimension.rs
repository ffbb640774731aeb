//! Assessment dimensions scored by the sidecar

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the five assessment dimensions
///
/// Dimensions are scored on a 0-5 scale. Wire form uses the two-letter
/// abbreviations the client expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Health Literacy
    #[serde(rename = "HL")]
    HealthLiteracy,

    /// Clinical Markers
    #[serde(rename = "CM")]
    ClinicalMarkers,

    /// Data Integration
    #[serde(rename = "DI")]
    DataIntegration,

    /// Digital Literacy
    #[serde(rename = "DL")]
    DigitalLiteracy,

    /// Preventive Readiness
    #[serde(rename = "PR")]
    PreventiveReadiness,
}

impl Dimension {
    /// All five dimensions in reporting order
    pub const ALL: [Dimension; 5] = [
        Dimension::HealthLiteracy,
        Dimension::ClinicalMarkers,
        Dimension::DataIntegration,
        Dimension::DigitalLiteracy,
        Dimension::PreventiveReadiness,
    ];

    /// Get the two-letter abbreviation used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::HealthLiteracy => "HL",
            Dimension::ClinicalMarkers => "CM",
            Dimension::DataIntegration => "DI",
            Dimension::DigitalLiteracy => "DL",
            Dimension::PreventiveReadiness => "PR",
        }
    }

    /// Get the human-readable label for this dimension
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::HealthLiteracy => "Health Literacy",
            Dimension::ClinicalMarkers => "Clinical Markers",
            Dimension::DataIntegration => "Data Integration",
            Dimension::DigitalLiteracy => "Digital Literacy",
            Dimension::PreventiveReadiness => "Preventive Readiness",
        }
    }

    /// Parse a dimension from its abbreviation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HL" => Some(Dimension::HealthLiteracy),
            "CM" => Some(Dimension::ClinicalMarkers),
            "DI" => Some(Dimension::DataIntegration),
            "DL" => Some(Dimension::DigitalLiteracy),
            "PR" => Some(Dimension::PreventiveReadiness),
            _ => None,
        }
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid dimension: {}", s))
    }
}

/// Kind of an evidence item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    /// Supports a higher score
    Positive,

    /// Supports a lower score
    Negative,

    /// Context without direct score impact
    Contextual,
}

/// A single piece of evidence supporting a score update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// When the observation was made, in the same fixed form as attribution
    /// timestamps
    pub timestamp: String,

    /// Dimension this evidence applies to
    pub dimension: Dimension,

    /// Whether the evidence is positive, negative, or contextual
    #[serde(rename = "type")]
    pub kind: EvidenceKind,

    /// Short summary of the observation
    pub summary: String,

    /// Estimated score impact, when the producer reports one
    ///
    /// Wire name is `scoreImpact`, the form the client expects.
    #[serde(default, rename = "scoreImpact", skip_serializing_if = "Option::is_none")]
    pub score_impact: Option<f64>,
}

impl Evidence {
    /// Create a new evidence item, capturing the observation time
    pub fn new(dimension: Dimension, kind: EvidenceKind, summary: impl Into<String>) -> Self {
        Self {
            timestamp: crate::attribution::current_timestamp(),
            dimension,
            kind,
            summary: summary.into(),
            score_impact: None,
        }
    }

    /// Attach an estimated score impact
    pub fn with_score_impact(mut self, impact: f64) -> Self {
        self.score_impact = Some(impact);
        self
    }
}

/// Builder for a well-formed scores payload
///
/// Serializes to `{"scores": {...}, "evidence": [...]}`, the shape the
/// sidecar emits. The signing layer accepts any JSON object, so this type
/// is a convenience, not a requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    /// Dimension scores on the 0-5 scale
    pub scores: BTreeMap<Dimension, f64>,

    /// Evidence items backing the scores
    pub evidence: Vec<Evidence>,
}

impl ScoreUpdate {
    /// Create an empty score update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score for a dimension
    ///
    /// # Panics
    /// Panics if the score is outside [0, 5]
    pub fn with_score(mut self, dimension: Dimension, score: f64) -> Self {
        assert!(
            (0.0..=5.0).contains(&score),
            "Score must be in [0, 5], got {}",
            score
        );
        self.scores.insert(dimension, score);
        self
    }

    /// Append an evidence item
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }
}
