//! Objective aggregation.
//!
//! Reduces per-task records to the optimizer's fitness vector.
//!
//! # Objectives
//!
//! | Index | Objective | Definition |
//! |-------|-----------|-----------|
//! | 0 | Makespan | Latest finish time |
//! | 1 | Total time | Sum of task durations |
//! | 2 | Cost | Sum of duration × resource rate |
//!
//! Objectives are cumulative: a count of 2 reports makespan and total
//! time, a count of 3 adds cost. All objectives are minimized.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::TaskRecord;
use crate::error::ScheduleError;

/// Number of active objectives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum ObjectiveCount {
    /// Makespan only.
    One = 1,
    /// Makespan and total time.
    #[default]
    Two = 2,
    /// Makespan, total time and cost.
    Three = 3,
}

impl ObjectiveCount {
    /// Vector length.
    pub fn get(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for ObjectiveCount {
    type Error = ScheduleError;

    fn try_from(count: usize) -> Result<Self, ScheduleError> {
        match count {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(ScheduleError::UnsupportedObjectiveCount(other)),
        }
    }
}

impl From<ObjectiveCount> for usize {
    fn from(count: ObjectiveCount) -> usize {
        count.get()
    }
}

/// Fitness vector handed back to the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectiveVector(Vec<f64>);

impl ObjectiveVector {
    /// Wraps raw objective values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Objective 0.
    pub fn makespan(&self) -> f64 {
        self.0.first().copied().unwrap_or(0.0)
    }

    /// Objective at an index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Raw values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Whether `self` Pareto-dominates `other` (minimization).
    pub fn dominates(&self, other: &Self) -> bool {
        let pairs = || self.0.iter().zip(other.0.iter());
        pairs().all(|(a, b)| a <= b) && pairs().any(|(a, b)| a < b)
    }
}

impl Index<usize> for ObjectiveVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<ObjectiveVector> for Vec<f64> {
    fn from(vector: ObjectiveVector) -> Self {
        vector.0
    }
}

/// Aggregated schedule totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveTotals {
    /// Latest finish time (0 when nothing was scheduled).
    pub makespan: f64,
    /// Sum of durations.
    pub total_time: f64,
    /// Sum of duration × rate.
    pub cost: f64,
    /// Number of records aggregated.
    pub scheduled: usize,
}

impl ObjectiveTotals {
    /// Aggregates task records.
    pub fn calculate<'a>(records: impl IntoIterator<Item = &'a TaskRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut totals, record| {
                totals.makespan = totals.makespan.max(record.finish);
                totals.total_time += record.duration;
                totals.cost += record.cost;
                totals.scheduled += 1;
                totals
            })
    }

    /// Builds the objective vector for `count` objectives.
    pub fn objectives(&self, count: ObjectiveCount) -> ObjectiveVector {
        let mut values = vec![0.0; count.get()];
        values[0] = self.makespan;
        if count >= ObjectiveCount::Two {
            values[1] = self.total_time;
        }
        if count >= ObjectiveCount::Three {
            values[2] = self.cost;
        }
        ObjectiveVector(values)
    }
}
