//! Severity banding for PHQ-9 scores.
//!
//! A [`BandTable`] is an ordered list of inclusive score ranges. Lookup scans
//! the bands in declared order and returns the first one containing the score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::warn;

use crate::error::AppError;
use crate::locale::Localized;

/// Severity band identifiers, declared from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityKey {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl SeverityKey {
    pub fn label(&self) -> &'static str {
        match self {
            SeverityKey::Minimal => "minimal",
            SeverityKey::Mild => "mild",
            SeverityKey::Moderate => "moderate",
            SeverityKey::ModeratelySevere => "moderately_severe",
            SeverityKey::Severe => "severe",
        }
    }
}

impl fmt::Display for SeverityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Color tag a results view uses for the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Green,
    Yellow,
    Orange,
    Red,
}

/// A named, inclusive range of total scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityBand {
    pub key: SeverityKey,
    /// `[low, high]`, both inclusive
    pub range: [u32; 2],
    pub label: Localized<String>,
    pub color: ColorTag,
}

impl SeverityBand {
    pub fn low(&self) -> u32 {
        self.range[0]
    }

    pub fn high(&self) -> u32 {
        self.range[1]
    }

    pub fn contains(&self, score: u32) -> bool {
        score >= self.low() && score <= self.high()
    }
}

/// Ordered band table with a `minimal` fallback.
#[derive(Debug, Clone)]
pub struct BandTable {
    bands: Vec<SeverityBand>,
    fallback: usize,
}

impl BandTable {
    /// Builds a table. The only structural requirement is a `minimal` band to fall back on;
    /// coverage of the score range is checked separately by [`BandTable::validate_partition`].
    pub fn new(bands: Vec<SeverityBand>) -> Result<Self, AppError> {
        let fallback = bands
            .iter()
            .position(|band| band.key == SeverityKey::Minimal)
            .ok_or_else(|| {
                AppError::ConfigurationGap("severity table has no minimal band".to_string())
            })?;

        if let Some(band) = bands.iter().find(|band| band.low() > band.high()) {
            return Err(AppError::ConfigurationGap(format!(
                "severity band {} has an inverted range {:?}",
                band.key, band.range
            )));
        }

        Ok(Self { bands, fallback })
    }

    pub fn bands(&self) -> &[SeverityBand] {
        &self.bands
    }

    /// First band in declared order whose range contains `score`.
    pub fn lookup(&self, score: u32) -> Option<&SeverityBand> {
        self.bands.iter().find(|band| band.contains(score))
    }

    /// Like [`BandTable::lookup`], falling back to the `minimal` band when nothing matches.
    ///
    /// The fallback only triggers on malformed tables and is logged as a configuration gap.
    pub fn classify(&self, score: u32) -> &SeverityBand {
        match self.lookup(score) {
            Some(band) => band,
            None => {
                warn!(score, "no severity band covers score, falling back to minimal");
                &self.bands[self.fallback]
            }
        }
    }

    /// Checks that the bands cover `range` exactly once per score.
    pub fn validate_partition(&self, range: RangeInclusive<u32>) -> Result<(), AppError> {
        for score in range {
            let matching = self.bands.iter().filter(|band| band.contains(score)).count();
            match matching {
                1 => {}
                0 => {
                    return Err(AppError::ConfigurationGap(format!(
                        "no severity band covers score {}",
                        score
                    )))
                }
                n => {
                    return Err(AppError::ConfigurationGap(format!(
                        "{} severity bands overlap at score {}",
                        n, score
                    )))
                }
            }
        }
        Ok(())
    }
}
