//! Committing an optimized assignment back to the workflow.
//!
//! After an optimizer returns its final front, the planner picks the
//! solution with the smallest makespan and records, for every target task,
//! the resource it should run on. The write-back is one-way: the sink
//! receives each pair in task order and nothing is rolled back.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::evaluator::{EvaluationPlan, ObjectiveVector};
use crate::models::{Genome, ResourceId, TaskId};

/// Picks the front member with the smallest makespan (objective 0).
///
/// Ties keep the earliest member.
///
/// # Errors
/// [`ScheduleError::EmptyFront`] if `front` is empty.
pub fn select_best<C>(front: &[(C, ObjectiveVector)]) -> Result<&(C, ObjectiveVector)> {
    let mut best: Option<&(C, ObjectiveVector)> = None;
    for member in front {
        match best {
            Some(current) if current.1.makespan() <= member.1.makespan() => {}
            _ => best = Some(member),
        }
    }
    best.ok_or(ScheduleError::EmptyFront)
}

/// Receiver of committed task-to-resource decisions.
pub trait AllocationSink {
    /// Records that `task` runs on `resource`.
    fn assign(&mut self, task: TaskId, resource: ResourceId);
}

impl<S: BuildHasher> AllocationSink for HashMap<TaskId, ResourceId, S> {
    fn assign(&mut self, task: TaskId, resource: ResourceId) {
        self.insert(task, resource);
    }
}

impl AllocationSink for BTreeMap<TaskId, ResourceId> {
    fn assign(&mut self, task: TaskId, resource: ResourceId) {
        self.insert(task, resource);
    }
}

/// Resource decision for every target task of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    assignments: BTreeMap<TaskId, ResourceId>,
}

impl Allocation {
    /// Decodes a genome against the plan it was evaluated with.
    ///
    /// # Errors
    /// [`ScheduleError::GenomeLength`] if the genome doesn't cover the plan's targets.
    pub fn from_genome(plan: &EvaluationPlan, genome: &Genome) -> Result<Self> {
        if genome.len() != plan.target_count() {
            return Err(ScheduleError::GenomeLength {
                expected: plan.target_count(),
                actual: genome.len(),
            });
        }
        let assignments = plan.target_tasks().zip(genome.iter()).collect();
        Ok(Self { assignments })
    }

    /// Resource chosen for a task.
    pub fn resource_for(&self, task: TaskId) -> Option<ResourceId> {
        self.assignments.get(&task).copied()
    }

    /// Number of decisions.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether there are no decisions.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Decisions in task order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, ResourceId)> + '_ {
        self.assignments.iter().map(|(&t, &r)| (t, r))
    }

    /// Writes every decision into `sink`.
    pub fn commit<S: AllocationSink + ?Sized>(&self, sink: &mut S) {
        for (task, resource) in self.iter() {
            sink.assign(task, resource);
        }
        tracing::debug!(tasks = self.len(), "allocation committed");
    }
}
