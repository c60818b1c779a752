//! Numeric series and fixed-size array construction.
//!
//! A [`Series`] is an index-addressed sequence of samples with an optional
//! parallel timestamp sequence. Series taking part in one operation are
//! assumed to share a time step; when an operation needs equal lengths it
//! pads explicitly with [`Series::zero_padded`] or [`pad_to_common_length`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Build a 1-D array of `len` entries, all equal to `value`.
pub fn numeric_array(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}

/// Ordered numeric samples with optional timestamps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Sample values
    pub values: Vec<f64>,
    /// Optional timestamps, same length as `values`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<DateTime<Utc>>>,
}

impl Series {
    /// Create a series without timestamps.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            timestamps: None,
        }
    }

    /// Create a series with timestamps.
    ///
    /// Fails if the two sequences have different lengths.
    pub fn with_timestamps(values: Vec<f64>, timestamps: Vec<DateTime<Utc>>) -> Result<Self> {
        if values.len() != timestamps.len() {
            return Err(ValidationError::LengthMismatch {
                what: "series timestamps",
                expected: values.len(),
                actual: timestamps.len(),
            }
            .into());
        }
        Ok(Self {
            values,
            timestamps: Some(timestamps),
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample values as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Step lengths in hours between consecutive timestamps.
    ///
    /// Returns `None` when the series carries no timestamps.
    pub fn step_hours(&self) -> Option<Vec<f64>> {
        self.timestamps.as_ref().map(|ts| {
            ts.windows(2)
                .map(|w| (w[1] - w[0]).num_milliseconds() as f64 / 3.6e6)
                .collect()
        })
    }

    /// Copy of the values extended with zeros to `len` samples.
    ///
    /// Longer series are returned unchanged; they are never truncated.
    pub fn zero_padded(&self, len: usize) -> Vec<f64> {
        let mut out = self.values.clone();
        if out.len() < len {
            out.resize(len, 0.0);
        }
        out
    }

    /// Reverse the sample order in place (timestamps follow the values).
    pub fn reverse(&mut self) {
        self.values.reverse();
        if let Some(ts) = self.timestamps.as_mut() {
            ts.reverse();
        }
    }

    /// Running sum of the samples.
    pub fn cumulative(&self) -> Vec<f64> {
        self.values
            .iter()
            .scan(0.0, |acc, &v| {
                *acc += v;
                Some(*acc)
            })
            .collect()
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// Time order of an output series.
///
/// The observed unit hydrograph and the SCS flood hydrograph have
/// historically been returned latest-first. `Reversed` keeps that
/// convention; `Chronological` returns the natural order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputOrder {
    /// Earliest sample first
    Chronological,
    /// Latest sample first
    #[default]
    Reversed,
}

impl OutputOrder {
    /// Put a chronologically ordered vector into this order.
    pub fn arrange<T>(self, mut values: Vec<T>) -> Vec<T> {
        if self == Self::Reversed {
            values.reverse();
        }
        values
    }
}

/// Zero-pad every series to the length of the longest one.
pub fn pad_to_common_length(series: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let len = series.iter().map(Vec::len).max().unwrap_or(0);
    series
        .iter()
        .map(|s| {
            let mut padded = s.clone();
            padded.resize(len, 0.0);
            padded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_numeric_array() {
        let a = numeric_array(4, 2.5);
        assert_eq!(a, vec![2.5; 4]);
        assert!(numeric_array(0, 1.0).is_empty());
    }

    #[test]
    fn test_timestamps_must_match() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let ts = vec![t0, t0 + Duration::hours(1)];
        assert!(Series::with_timestamps(vec![1.0, 2.0], ts.clone()).is_ok());
        assert!(Series::with_timestamps(vec![1.0, 2.0, 3.0], ts).is_err());
    }

    #[test]
    fn test_step_hours() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let ts = vec![t0, t0 + Duration::minutes(30), t0 + Duration::hours(2)];
        let s = Series::with_timestamps(vec![0.0, 1.0, 2.0], ts).unwrap();
        let steps = s.step_hours().unwrap();
        assert!((steps[0] - 0.5).abs() < 1e-12);
        assert!((steps[1] - 1.5).abs() < 1e-12);
        assert!(Series::new(vec![1.0]).step_hours().is_none());
    }

    #[test]
    fn test_zero_padding_never_truncates() {
        let s = Series::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(s.zero_padded(5), vec![1.0, 2.0, 3.0, 0.0, 0.0]);
        assert_eq!(s.zero_padded(2), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pad_to_common_length() {
        let padded = pad_to_common_length(&[vec![1.0], vec![1.0, 2.0, 3.0], vec![]]);
        assert!(padded.iter().all(|s| s.len() == 3));
        assert_eq!(padded[0], vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_output_order() {
        assert_eq!(OutputOrder::default(), OutputOrder::Reversed);
        assert_eq!(OutputOrder::Reversed.arrange(vec![1, 2, 3]), vec![3, 2, 1]);
        assert_eq!(OutputOrder::Chronological.arrange(vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_cumulative_and_reverse() {
        let mut s = Series::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(s.cumulative(), vec![1.0, 3.0, 6.0]);
        s.reverse();
        assert_eq!(s.values, vec![3.0, 2.0, 1.0]);
    }
}
