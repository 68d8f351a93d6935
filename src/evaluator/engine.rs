//! Precedence-driven schedule simulation.
//!
//! # Algorithm
//!
//! 1. Reset every resource clock of the timeline.
//! 2. Queue the plan's seeds (roots, plus fixed tasks at their committed
//!    start time).
//! 3. Pop a task, pick its resource (genome or fixed), ask the timeline
//!    for its finish time and record start, duration, finish and cost.
//! 4. For each tracked child not yet queued: if every *tracked* parent has
//!    been processed, queue it with ready time = latest parent finish.
//!    Untracked parents (finished in an earlier round) never gate a child.
//! 5. Stop when the queue is empty. Tasks never reached keep an empty
//!    record and are left out of every objective.
//!
//! # Complexity
//! O(V + E·P) timeline queries and bookkeeping, where P is the largest
//! parent count.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::objectives::{ObjectiveCount, ObjectiveTotals, ObjectiveVector};
use super::plan::{EvaluationPlan, RunningSchedule, SlotSource};
use crate::error::{Result, ScheduleError};
use crate::models::{Genome, ResourceId, TaskGraph, TaskId};
use crate::timeline::ResourceTimeline;

/// Simulated execution of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// The task.
    pub task_id: TaskId,
    /// Resource it ran on.
    pub resource: ResourceId,
    /// Ready time handed to the timeline.
    pub start: f64,
    /// `finish - start`, including any wait for the resource.
    pub duration: f64,
    /// Finish time reported by the timeline.
    pub finish: f64,
    /// `duration × rate(resource)`.
    pub cost: f64,
}

/// Outcome of one evaluation: one optional record per plan slot.
///
/// Serializes as the bare slot-ordered record array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Option<TaskRecord>>", into = "Vec<Option<TaskRecord>>")]
pub struct Evaluation {
    records: Vec<Option<TaskRecord>>,
    slot_of: Arc<HashMap<TaskId, usize>>,
}

impl From<Vec<Option<TaskRecord>>> for Evaluation {
    fn from(records: Vec<Option<TaskRecord>>) -> Self {
        let slot_of = records
            .iter()
            .enumerate()
            .filter_map(|(slot, r)| r.as_ref().map(|r| (r.task_id, slot)))
            .collect();
        Self {
            records,
            slot_of: Arc::new(slot_of),
        }
    }
}

impl From<Evaluation> for Vec<Option<TaskRecord>> {
    fn from(evaluation: Evaluation) -> Self {
        evaluation.records
    }
}

impl Evaluation {
    /// Records in slot order; `None` for tasks that never became ready.
    pub fn records(&self) -> &[Option<TaskRecord>] {
        &self.records
    }

    /// Scheduled records in slot order.
    pub fn scheduled(&self) -> impl Iterator<Item = &TaskRecord> {
        self.records.iter().flatten()
    }

    /// Record of a task, if it was scheduled.
    pub fn record(&self, task_id: TaskId) -> Option<&TaskRecord> {
        let slot = *self.slot_of.get(&task_id)?;
        self.records.get(slot)?.as_ref()
    }

    /// Number of scheduled tasks.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled().count()
    }

    /// Aggregated totals over scheduled tasks.
    pub fn totals(&self) -> ObjectiveTotals {
        ObjectiveTotals::calculate(self.scheduled())
    }

    /// Latest finish time.
    pub fn makespan(&self) -> f64 {
        self.totals().makespan
    }

    /// Sum of durations.
    pub fn total_time(&self) -> f64 {
        self.totals().total_time
    }

    /// Sum of costs.
    pub fn cost(&self) -> f64 {
        self.totals().cost
    }

    /// Objective vector for `count` objectives.
    pub fn objectives(&self, count: ObjectiveCount) -> ObjectiveVector {
        self.totals().objectives(count)
    }
}

/// Schedule evaluator over a borrowed task graph.
///
/// # Example
///
/// ```
/// use u_workflow::evaluator::{Evaluator, ObjectiveCount};
/// use u_workflow::models::{Genome, Resource, Task, TaskGraph};
/// use u_workflow::timeline::SimulatedTimeline;
///
/// let graph = TaskGraph::new(vec![
///     Task::new(1).with_length(4.0).with_child(2),
///     Task::new(2).with_depth(1).with_length(6.0).with_parent(1),
/// ]).unwrap();
/// let mut timeline = SimulatedTimeline::new(vec![Resource::new(0).with_rate(2.0)]);
///
/// let evaluator = Evaluator::new(&graph);
/// let evaluation = evaluator.evaluate(&Genome::from_indices([0, 0]), &mut timeline).unwrap();
/// assert_eq!(evaluation.objectives(ObjectiveCount::Three).as_slice(), &[10.0, 10.0, 20.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator<'g> {
    graph: &'g TaskGraph,
    plan: EvaluationPlan,
}

impl<'g> Evaluator<'g> {
    /// Evaluator for from-scratch schedules of the whole graph.
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self {
            graph,
            plan: EvaluationPlan::full(graph),
        }
    }

    /// Evaluator for a running workflow.
    ///
    /// # Errors
    /// See [`EvaluationPlan::running`].
    pub fn running(graph: &'g TaskGraph, schedule: &RunningSchedule) -> Result<Self> {
        Ok(Self {
            graph,
            plan: EvaluationPlan::running(graph, schedule)?,
        })
    }

    /// The task graph.
    pub fn graph(&self) -> &'g TaskGraph {
        self.graph
    }

    /// The evaluation plan.
    pub fn plan(&self) -> &EvaluationPlan {
        &self.plan
    }

    /// Simulates the schedule encoded by `genome`.
    ///
    /// Resets every clock of `timeline` first, so repeated calls with the
    /// same inputs return identical results.
    ///
    /// # Errors
    /// - [`ScheduleError::GenomeLength`] if the genome doesn't match the plan.
    /// - [`ScheduleError::ResourceOutOfRange`] for a genome resource outside the timeline.
    /// - [`ScheduleError::FixedResourceOutOfRange`] for a fixed task outside the timeline.
    pub fn evaluate<T>(&self, genome: &Genome, timeline: &mut T) -> Result<Evaluation>
    where
        T: ResourceTimeline + ?Sized,
    {
        self.check_preconditions(genome, timeline.resource_count())?;
        timeline.reset_all();

        let slots = self.plan.slots();
        let tasks = self.graph.tasks();
        let mut records: Vec<Option<TaskRecord>> = vec![None; slots.len()];
        let mut queued = vec![false; slots.len()];
        let mut queue: VecDeque<(usize, f64)> = VecDeque::with_capacity(slots.len());

        for &(slot, ready) in self.plan.seeds() {
            if !queued[slot] {
                queued[slot] = true;
                queue.push_back((slot, ready));
            }
        }

        while let Some((slot, ready)) = queue.pop_front() {
            let entry = &slots[slot];
            let task = &tasks[entry.graph_index];
            let resource = match entry.source {
                SlotSource::Genome { position } => genome[position],
                SlotSource::Fixed { resource, .. } => resource,
            };

            let finish = timeline.estimate_finish(task, resource, ready);
            let duration = finish - ready;
            let record = TaskRecord {
                task_id: task.id,
                resource,
                start: ready,
                duration,
                finish,
                cost: duration * timeline.rate(resource),
            };
            tracing::trace!(
                task = %task.id,
                resource = %resource,
                start = ready,
                finish,
                "task scheduled"
            );
            records[slot] = Some(record);

            for &child_id in &task.children {
                let Some(child_slot) = self.plan.slot_of(child_id) else {
                    continue;
                };
                if queued[child_slot] {
                    continue;
                }
                let child = &tasks[slots[child_slot].graph_index];
                if let Some(child_ready) = ready_time(child.parents.iter(), &self.plan, &records) {
                    queued[child_slot] = true;
                    queue.push_back((child_slot, child_ready));
                }
            }
        }

        let evaluation = Evaluation {
            records,
            slot_of: self.plan.shared_slot_map(),
        };
        tracing::debug!(
            scheduled = evaluation.scheduled_count(),
            tracked = slots.len(),
            makespan = evaluation.makespan(),
            "evaluation finished"
        );
        Ok(evaluation)
    }

    /// Simulates and aggregates in one step.
    pub fn objectives<T>(
        &self,
        genome: &Genome,
        timeline: &mut T,
        count: ObjectiveCount,
    ) -> Result<ObjectiveVector>
    where
        T: ResourceTimeline + ?Sized,
    {
        Ok(self.evaluate(genome, timeline)?.objectives(count))
    }

    fn check_preconditions(&self, genome: &Genome, resource_count: usize) -> Result<()> {
        if genome.len() != self.plan.target_count() {
            return Err(ScheduleError::GenomeLength {
                expected: self.plan.target_count(),
                actual: genome.len(),
            });
        }
        if let Some((position, resource)) = genome.first_out_of_range(resource_count) {
            return Err(ScheduleError::ResourceOutOfRange {
                position,
                resource,
                count: resource_count,
            });
        }
        for slot in self.plan.slots() {
            if let SlotSource::Fixed { resource, .. } = slot.source {
                if resource.index() >= resource_count {
                    return Err(ScheduleError::FixedResourceOutOfRange {
                        task: slot.task_id,
                        resource,
                        count: resource_count,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Latest finish among tracked parents, or `None` while any tracked parent
/// is still unprocessed.
fn ready_time<'a>(
    parents: impl Iterator<Item = &'a TaskId>,
    plan: &EvaluationPlan,
    records: &[Option<TaskRecord>],
) -> Option<f64> {
    let mut ready = 0.0_f64;
    for &parent_id in parents {
        let Some(parent_slot) = plan.slot_of(parent_id) else {
            continue;
        };
        ready = ready.max(records[parent_slot].as_ref()?.finish);
    }
    Some(ready)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::plan::FixedTask;
    use crate::models::{Resource, Task};
    use crate::timeline::{ContentionModel, SimulatedTimeline};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// A(1) → {B(2), C(3)} → D(4), every task 5 units of work.
    fn diamond() -> TaskGraph {
        TaskGraph::new(vec![
            Task::new(1).with_depth(0).with_length(5.0).with_child(2).with_child(3),
            Task::new(2).with_depth(1).with_length(5.0).with_parent(1).with_child(4),
            Task::new(3).with_depth(1).with_length(5.0).with_parent(1).with_child(4),
            Task::new(4).with_depth(2).with_length(5.0).with_parent(2).with_parent(3),
        ])
        .unwrap()
    }

    fn unit_vms(count: usize, contention: ContentionModel) -> SimulatedTimeline {
        let resources = (0..count)
            .map(|i| Resource::new(i).with_speed(1.0).with_rate(1.0))
            .collect();
        SimulatedTimeline::new(resources).with_contention(contention)
    }

    fn finish_of(evaluation: &Evaluation, id: u32) -> f64 {
        evaluation.record(TaskId(id)).map(|r| r.finish).unwrap()
    }

    #[test]
    fn test_diamond_dag() {
        let graph = diamond();
        let mut timeline = unit_vms(1, ContentionModel::Shared);
        let evaluator = Evaluator::new(&graph);

        let evaluation = evaluator
            .evaluate(&Genome::from_indices([0, 0, 0, 0]), &mut timeline)
            .unwrap();

        assert!((finish_of(&evaluation, 1) - 5.0).abs() < 1e-10);
        assert!((finish_of(&evaluation, 2) - 10.0).abs() < 1e-10);
        assert!((finish_of(&evaluation, 3) - 10.0).abs() < 1e-10);
        assert!((finish_of(&evaluation, 4) - 15.0).abs() < 1e-10);
        assert_eq!(
            evaluation.objectives(ObjectiveCount::Three).as_slice(),
            &[15.0, 20.0, 20.0]
        );
    }

    #[test]
    fn test_objective_count_fallthrough() {
        let graph = diamond();
        let mut timeline = unit_vms(1, ContentionModel::Shared);
        let evaluator = Evaluator::new(&graph);
        let genome = Genome::from_indices([0, 0, 0, 0]);

        let one = evaluator.objectives(&genome, &mut timeline, ObjectiveCount::One).unwrap();
        let two = evaluator.objectives(&genome, &mut timeline, ObjectiveCount::Two).unwrap();
        assert_eq!(one.as_slice(), &[15.0]);
        assert_eq!(two.as_slice(), &[15.0, 20.0]);
    }

    #[test]
    fn test_exclusive_contention_serializes_siblings() {
        let graph = diamond();
        let mut timeline = unit_vms(2, ContentionModel::Exclusive);
        let evaluator = Evaluator::new(&graph);

        // B and C share vm0: C waits for B
        let same = evaluator
            .evaluate(&Genome::from_indices([0, 0, 0, 0]), &mut timeline)
            .unwrap();
        assert!((finish_of(&same, 3) - 15.0).abs() < 1e-10);
        assert!((same.makespan() - 20.0).abs() < 1e-10);
        // C's duration includes the wait
        assert!((same.record(TaskId(3)).unwrap().duration - 10.0).abs() < 1e-10);

        // C on vm1 runs in parallel with B
        let split = evaluator
            .evaluate(&Genome::from_indices([0, 0, 1, 0]), &mut timeline)
            .unwrap();
        assert!((split.makespan() - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_determinism_after_dirty_timeline() {
        let graph = diamond();
        let mut timeline = unit_vms(2, ContentionModel::Exclusive);
        let evaluator = Evaluator::new(&graph);
        let genome = Genome::from_indices([1, 0, 1, 1]);

        let first = evaluator.objectives(&genome, &mut timeline, ObjectiveCount::Three).unwrap();
        // Leave both clocks far in the future
        let stray = Task::new(99).with_length(1000.0);
        timeline.estimate_finish(&stray, ResourceId(0), 0.0);
        timeline.estimate_finish(&stray, ResourceId(1), 0.0);

        let second = evaluator.objectives(&genome, &mut timeline, ObjectiveCount::Three).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_aggregation_identity_and_lower_bound() {
        let graph = diamond();
        let resources = vec![
            Resource::new(0).with_speed(1.0).with_rate(0.5),
            Resource::new(1).with_speed(2.5).with_rate(4.0),
            Resource::new(2).with_speed(0.5).with_rate(1.5),
        ];
        let mut timeline = SimulatedTimeline::new(resources);
        let evaluator = Evaluator::new(&graph);

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let genome = Genome::random(4, 3, &mut rng);
            let evaluation = evaluator.evaluate(&genome, &mut timeline).unwrap();
            let totals = evaluation.totals();

            let durations: f64 = evaluation.scheduled().map(|r| r.duration).sum();
            let cost: f64 = evaluation
                .scheduled()
                .map(|r| r.duration * timeline.rate(r.resource))
                .sum();
            let longest = evaluation
                .scheduled()
                .map(|r| r.duration)
                .fold(0.0_f64, f64::max);

            assert_eq!(totals.scheduled, 4);
            assert!((totals.total_time - durations).abs() < 1e-9);
            assert!((totals.cost - cost).abs() < 1e-9);
            assert!(totals.makespan + 1e-9 >= longest);
        }
    }

    #[test]
    fn test_children_wait_for_all_parents() {
        let graph = diamond();
        let mut timeline = SimulatedTimeline::new(vec![
            Resource::new(0).with_speed(1.0),
            Resource::new(1).with_speed(0.25),
        ]);
        let evaluator = Evaluator::new(&graph);

        // C on the slow vm1 finishes at 5 + 20 = 25; D must wait for it
        let evaluation = evaluator
            .evaluate(&Genome::from_indices([0, 0, 1, 0]), &mut timeline)
            .unwrap();
        let d = evaluation.record(TaskId(4)).unwrap();
        assert!((d.start - 25.0).abs() < 1e-10);
        assert!((d.finish - 30.0).abs() < 1e-10);
        assert_eq!(evaluation.scheduled_count(), 4);
    }

    #[test]
    fn test_running_unreachable_parent() {
        // Parent 1 finished in an earlier round and is not tracked
        let graph = TaskGraph::new(vec![
            Task::new(1).with_depth(0).with_length(5.0).with_child(2),
            Task::new(2).with_depth(1).with_length(5.0).with_parent(1),
            Task::new(3).with_depth(0).with_length(3.0),
        ])
        .unwrap();
        let schedule = RunningSchedule::new().with_targets([2, 3]);
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(1, ContentionModel::Shared);

        let evaluation = evaluator
            .evaluate(&Genome::from_indices([0, 0]), &mut timeline)
            .unwrap();

        assert!(evaluation.records()[0].is_none());
        assert!(evaluation.record(TaskId(2)).is_none());
        assert_eq!(evaluation.scheduled_count(), 1);
        assert_eq!(
            evaluation.objectives(ObjectiveCount::Three).as_slice(),
            &[3.0, 3.0, 3.0]
        );
    }

    #[test]
    fn test_running_fixed_tasks_gate_targets() {
        // 1 executing on vm1 since t=2, 2 allocated on vm0, 3 waits on both,
        // 3 also has an untracked, already-finished parent 5.
        let graph = TaskGraph::new(vec![
            Task::new(5).with_depth(0).with_length(1.0).with_child(3),
            Task::new(1).with_depth(0).with_length(4.0).with_child(3),
            Task::new(2).with_depth(0).with_length(6.0).with_child(3),
            Task::new(3)
                .with_depth(1)
                .with_length(2.0)
                .with_parent(5)
                .with_parent(1)
                .with_parent(2),
        ])
        .unwrap();
        let schedule = RunningSchedule::new()
            .with_allocated(FixedTask::new(2, 0, 3.0))
            .with_executing(FixedTask::new(1, 1, 2.0))
            .with_target(3);
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(2, ContentionModel::Exclusive);

        let evaluation = evaluator
            .evaluate(&Genome::from_indices([1]), &mut timeline)
            .unwrap();

        let allocated = evaluation.record(TaskId(2)).unwrap();
        assert_eq!(allocated.resource, ResourceId(0));
        assert!((allocated.start - 3.0).abs() < 1e-10);
        assert!((allocated.finish - 9.0).abs() < 1e-10);

        let executing = evaluation.record(TaskId(1)).unwrap();
        assert!((executing.finish - 6.0).abs() < 1e-10);

        let target = evaluation.record(TaskId(3)).unwrap();
        assert!((target.start - 9.0).abs() < 1e-10);
        assert!((target.finish - 11.0).abs() < 1e-10);
        assert!(evaluation.record(TaskId(5)).is_none());
    }

    #[test]
    fn test_fixed_child_is_not_requeued() {
        // Both tasks are fixed; 2 is also a child of 1
        let graph = TaskGraph::new(vec![
            Task::new(1).with_depth(0).with_length(4.0).with_child(2),
            Task::new(2).with_depth(1).with_length(4.0).with_parent(1),
        ])
        .unwrap();
        let schedule = RunningSchedule::new()
            .with_executing(FixedTask::new(1, 0, 0.0))
            .with_allocated(FixedTask::new(2, 0, 10.0));
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(1, ContentionModel::Exclusive);

        let evaluation = evaluator.evaluate(&Genome::new(Vec::new()), &mut timeline).unwrap();
        let fixed = evaluation.record(TaskId(2)).unwrap();
        assert!((fixed.start - 10.0).abs() < 1e-10);
        assert!((fixed.finish - 14.0).abs() < 1e-10);
        assert_eq!(evaluation.scheduled_count(), 2);
    }

    #[test]
    fn test_executing_task_not_delayed_by_allocated() {
        let graph = TaskGraph::new(vec![
            Task::new(1).with_depth(0).with_length(4.0),
            Task::new(2).with_depth(0).with_length(4.0),
        ])
        .unwrap();
        // Allocated listed first; the running task still owns vm0 from t=0
        let schedule = RunningSchedule::new()
            .with_allocated(FixedTask::new(2, 0, 5.0))
            .with_executing(FixedTask::new(1, 0, 0.0));
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(1, ContentionModel::Exclusive);

        let evaluation = evaluator.evaluate(&Genome::new(Vec::new()), &mut timeline).unwrap();
        let executing = evaluation.record(TaskId(1)).unwrap();
        assert!((executing.start - 0.0).abs() < 1e-10);
        assert!((executing.finish - 4.0).abs() < 1e-10);
        let allocated = evaluation.record(TaskId(2)).unwrap();
        assert!((allocated.start - 5.0).abs() < 1e-10);
        assert!((allocated.finish - 9.0).abs() < 1e-10);
        assert!((evaluation.makespan() - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_fixed_tasks_claim_resource_in_start_order() {
        let graph = TaskGraph::new(vec![
            Task::new(1).with_depth(0).with_length(3.0),
            Task::new(2).with_depth(0).with_length(3.0),
            Task::new(3).with_depth(0).with_length(3.0),
        ])
        .unwrap();
        let schedule = RunningSchedule::new()
            .with_allocated(FixedTask::new(3, 0, 8.0))
            .with_allocated(FixedTask::new(2, 0, 4.0))
            .with_executing(FixedTask::new(1, 0, 0.0));
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(1, ContentionModel::Exclusive);

        let evaluation = evaluator.evaluate(&Genome::new(Vec::new()), &mut timeline).unwrap();
        assert!((finish_of(&evaluation, 1) - 3.0).abs() < 1e-10);
        assert!((finish_of(&evaluation, 2) - 7.0).abs() < 1e-10);
        assert!((finish_of(&evaluation, 3) - 11.0).abs() < 1e-10);
    }

    #[test]
    fn test_target_root_queues_behind_fixed_work() {
        let graph = TaskGraph::new(vec![
            Task::new(1).with_depth(0).with_length(4.0),
            Task::new(2).with_depth(0).with_length(4.0),
            Task::new(3).with_depth(0).with_length(2.0),
        ])
        .unwrap();
        let schedule = RunningSchedule::new()
            .with_executing(FixedTask::new(1, 0, 0.0))
            .with_allocated(FixedTask::new(2, 0, 5.0))
            .with_target(3)
            .with_clock(1.0);
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(2, ContentionModel::Exclusive);

        // Same VM: the new task waits for both committed tasks
        let shared = evaluator.evaluate(&Genome::from_indices([0]), &mut timeline).unwrap();
        assert!((finish_of(&shared, 1) - 4.0).abs() < 1e-10);
        assert!((finish_of(&shared, 2) - 9.0).abs() < 1e-10);
        let target = shared.record(TaskId(3)).unwrap();
        assert!((target.start - 1.0).abs() < 1e-10);
        assert!((target.finish - 11.0).abs() < 1e-10);

        // Idle VM: starts at the clock
        let spread = evaluator.evaluate(&Genome::from_indices([1]), &mut timeline).unwrap();
        assert!((finish_of(&spread, 3) - 3.0).abs() < 1e-10);
        assert!((spread.makespan() - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_genome_length_mismatch() {
        let graph = diamond();
        let mut timeline = unit_vms(1, ContentionModel::Shared);
        let err = Evaluator::new(&graph)
            .evaluate(&Genome::from_indices([0, 0]), &mut timeline)
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::GenomeLength {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_resource_out_of_range() {
        let graph = diamond();
        let mut timeline = unit_vms(2, ContentionModel::Shared);
        let err = Evaluator::new(&graph)
            .evaluate(&Genome::from_indices([0, 1, 2, 0]), &mut timeline)
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::ResourceOutOfRange {
                position: 2,
                count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_fixed_resource_out_of_range() {
        let graph = diamond();
        let schedule = RunningSchedule::new().with_executing(FixedTask::new(1, 5, 0.0));
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(2, ContentionModel::Shared);

        let err = evaluator.evaluate(&Genome::new(Vec::new()), &mut timeline).unwrap_err();
        assert!(matches!(err, ScheduleError::FixedResourceOutOfRange { .. }));
    }

    #[test]
    fn test_record_serde() {
        let graph = diamond();
        let mut timeline = unit_vms(1, ContentionModel::Shared);
        let evaluation = Evaluator::new(&graph)
            .evaluate(&Genome::from_indices([0, 0, 0, 0]), &mut timeline)
            .unwrap();

        let json = serde_json::to_value(evaluation.record(TaskId(4)).unwrap()).unwrap();
        assert_eq!(json["task_id"], 4);
        assert_eq!(json["resource"], 0);
        assert_eq!(json["finish"], 15.0);
    }

    #[test]
    fn test_record_lookup_survives_serde() {
        let graph = diamond();
        // Slot order differs from graph order; 3 and 4 are untracked
        let schedule = RunningSchedule::new().with_targets([2, 1]);
        let evaluator = Evaluator::running(&graph, &schedule).unwrap();
        let mut timeline = unit_vms(1, ContentionModel::Shared);
        let evaluation = evaluator
            .evaluate(&Genome::from_indices([0, 0]), &mut timeline)
            .unwrap();
        assert!((finish_of(&evaluation, 2) - 10.0).abs() < 1e-10);
        assert_eq!(evaluation.records()[0].as_ref().map(|r| r.task_id), Some(TaskId(2)));

        let json = serde_json::to_string(&evaluation).unwrap();
        let back: Evaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records(), evaluation.records());
        assert!((finish_of(&back, 1) - 5.0).abs() < 1e-10);
        assert!((finish_of(&back, 2) - 10.0).abs() < 1e-10);
        assert!(back.record(TaskId(4)).is_none());
    }
}
