//! Extremes and quartile cut points of a monthly series

use crate::ClimateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

/// Largest or smallest value of `values`.
pub fn extremum(values: &[f64], direction: Extremum) -> crate::Result<f64> {
    let (&first, rest) = values.split_first().ok_or_else(|| {
        ClimateError::invalid_argument("cannot take the extremum of an empty series")
    })?;

    Ok(rest.iter().fold(first, |best, &value| match direction {
        Extremum::Max if value > best => value,
        Extremum::Min if value < best => value,
        _ => best,
    }))
}

/// Equal-width subdivision of `[min, max]` into four bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub max: f64,
}

impl Quartiles {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let range = max - min;
        Self {
            min,
            q1: min + range / 4.0,
            q2: min + range / 2.0,
            q3: min + range * 3.0 / 4.0,
            max,
        }
    }
}
