//! Numeric grade aggregation.
//!
//! Everything here is a pure transform over already-grouped score data.
//! Missing data flows through as `None` at every step; a gap is never an
//! error and never a zero. Summation order is pinned by sorting, so a
//! permuted input snapshot yields bit-identical composites.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::codes::ComponentCode;
use super::domain::{DisciplineId, StudentId, Trimester};
use super::weights::ComponentWeightIndex;

/// Round to two decimals, half away from zero. `13.875 -> 13.88`.
pub fn round_half_up(value: f64) -> f64 {
    let scaled = value * 100.0;
    let rounded = if value < 0.0 {
        (scaled - 0.5).ceil()
    } else {
        (scaled + 0.5).floor()
    };
    rounded / 100.0
}

/// Arithmetic mean over the given scores; `None` when there are none.
/// Values are sorted before summation so the result does not depend on the
/// order rows came out of storage.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted.iter().sum::<f64>() / sorted.len() as f64)
}

/// Weighted composite over per-type averaged values for one period.
///
/// Only active codes with a value participate. With a positive weight sum
/// the composite is the weighted mean; if every present weight is
/// non-positive (a degenerate configuration the index normally prevents)
/// it falls back to the simple mean. No usable value at all yields `None`.
pub fn period_composite(
    values: &BTreeMap<ComponentCode, Option<f64>>,
    index: &ComponentWeightIndex,
) -> Option<f64> {
    let mut present: Vec<(f64, f64)> = Vec::new();
    for code in index.active_codes() {
        if let Some(Some(value)) = values.get(code) {
            present.push((*value, index.weight_of(code)));
        }
    }
    if present.is_empty() {
        return None;
    }

    // Pin summation order for order independence.
    present.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let weight_sum: f64 = present.iter().map(|(_, w)| w).sum();
    let composite = if weight_sum > 0.0 {
        present.iter().map(|(v, w)| v * w).sum::<f64>() / weight_sum
    } else {
        present.iter().map(|(v, _)| v).sum::<f64>() / present.len() as f64
    };

    Some(round_half_up(composite))
}

/// Annual figure for a period-mode discipline: mean of the three term
/// composites, computable only when all three exist.
pub fn annual_composite(period_composites: [Option<f64>; 3]) -> Option<f64> {
    let mut terms = [0.0; 3];
    for (slot, composite) in terms.iter_mut().zip(period_composites) {
        *slot = composite?;
    }
    Some(round_half_up(terms.iter().sum::<f64>() / 3.0))
}

/// Per-type averages plus the composite for one (student, discipline,
/// period) cell. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPeriodGrade {
    pub student: StudentId,
    pub discipline: DisciplineId,
    /// `None` is the single virtual period of annual-mode grading.
    pub period: Option<Trimester>,
    pub component_values: BTreeMap<ComponentCode, Option<f64>>,
    pub composite: Option<f64>,
}

impl AggregatedPeriodGrade {
    /// Aggregate grouped raw scores for one cell. `grouped` maps canonical
    /// codes to every raw value recorded for them; codes outside the active
    /// set are assumed to have been dropped during grouping.
    pub fn from_grouped(
        student: StudentId,
        discipline: DisciplineId,
        period: Option<Trimester>,
        grouped: &BTreeMap<ComponentCode, Vec<f64>>,
        index: &ComponentWeightIndex,
    ) -> Self {
        let mut component_values = BTreeMap::new();
        for code in index.active_codes() {
            let averaged = grouped.get(code).and_then(|values| mean(values));
            component_values.insert(code.clone(), averaged);
        }
        let composite = period_composite(&component_values, index);

        Self {
            student,
            discipline,
            period,
            component_values,
            composite,
        }
    }
}

/// Year-level roll-up for one student/discipline under period-mode grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub student: StudentId,
    pub discipline: DisciplineId,
    pub period_composites: [Option<f64>; 3],
    pub final_average: Option<f64>,
}

impl AnnualSummary {
    pub fn from_terms(
        student: StudentId,
        discipline: DisciplineId,
        period_composites: [Option<f64>; 3],
    ) -> Self {
        let final_average = annual_composite(period_composites);
        Self {
            student,
            discipline,
            period_composites,
            final_average,
        }
    }
}
