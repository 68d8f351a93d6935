//! Evaluation plans: which tasks an evaluation tracks and where each one's
//! resource comes from.
//!
//! A plan maps every tracked task to a *slot* (a dense index into the
//! evaluation's record array) exactly once. Two shapes exist:
//!
//! - **Full**: every graph task is optimized; genome position `i` is the
//!   `i`-th task of the graph.
//! - **Running**: a scheduling round in the middle of execution. Tasks are
//!   partitioned into already-allocated and currently-executing tasks (fixed
//!   resource and start time) and target tasks (resource from the genome).

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{ResourceId, TaskGraph, TaskId};

/// A task whose placement and start time were decided outside the genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedTask {
    /// The task.
    pub task_id: TaskId,
    /// Resource it is (or will be) running on.
    pub resource: ResourceId,
    /// Start time it was committed with.
    pub start_time: f64,
}

impl FixedTask {
    /// Creates a fixed task.
    pub fn new(task_id: impl Into<TaskId>, resource: impl Into<ResourceId>, start_time: f64) -> Self {
        Self {
            task_id: task_id.into(),
            resource: resource.into(),
            start_time,
        }
    }
}

/// Task partitions of a running workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningSchedule {
    /// Tasks committed in a previous round but not yet started.
    pub allocated: Vec<FixedTask>,
    /// Tasks currently executing.
    pub executing: Vec<FixedTask>,
    /// Tasks to optimize, in genome order.
    pub targets: Vec<TaskId>,
    /// Ready time for target roots (default: 0).
    pub clock: f64,
}

impl RunningSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an already-allocated task.
    pub fn with_allocated(mut self, task: FixedTask) -> Self {
        self.allocated.push(task);
        self
    }

    /// Adds a currently-executing task.
    pub fn with_executing(mut self, task: FixedTask) -> Self {
        self.executing.push(task);
        self
    }

    /// Appends a target task.
    pub fn with_target(mut self, task_id: impl Into<TaskId>) -> Self {
        self.targets.push(task_id.into());
        self
    }

    /// Appends several target tasks.
    pub fn with_targets<I, T>(mut self, task_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.targets.extend(task_ids.into_iter().map(Into::into));
        self
    }

    /// Sets the ready time for target roots.
    pub fn with_clock(mut self, clock: f64) -> Self {
        self.clock = clock;
        self
    }
}

/// Partition a tracked task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// Committed earlier, not yet started.
    Allocated,
    /// Currently running.
    Executing,
    /// Placed by the genome.
    Target,
}

/// Where a slot's resource comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotSource {
    /// Genome position.
    Genome { position: usize },
    /// Externally fixed resource and start time.
    Fixed {
        resource: ResourceId,
        start_time: f64,
    },
}

/// One tracked task.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// The task.
    pub task_id: TaskId,
    /// Index of the task in the graph.
    pub graph_index: usize,
    /// Partition of the task.
    pub partition: Partition,
    /// Resource source.
    pub source: SlotSource,
}

/// Identity mapping and seed set for one family of evaluations.
#[derive(Debug, Clone)]
pub struct EvaluationPlan {
    slots: Vec<Slot>,
    slot_of: Arc<HashMap<TaskId, usize>>,
    seeds: Vec<(usize, f64)>,
    targets: Vec<usize>,
}

impl EvaluationPlan {
    /// Plans a from-scratch evaluation of the whole graph.
    pub fn full(graph: &TaskGraph) -> Self {
        let slots: Vec<Slot> = graph
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, task)| Slot {
                task_id: task.id,
                graph_index: i,
                partition: Partition::Target,
                source: SlotSource::Genome { position: i },
            })
            .collect();
        let slot_of = Arc::new(slots.iter().map(|s| (s.task_id, s.graph_index)).collect());
        let seeds = graph
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.depth == graph.min_depth())
            .map(|(i, _)| (i, 0.0))
            .collect();
        let targets = (0..slots.len()).collect();

        Self {
            slots,
            slot_of,
            seeds,
            targets,
        }
    }

    /// Plans evaluations of a running workflow.
    ///
    /// Executing tasks take the first slots, then allocated tasks, then
    /// targets. Fixed tasks are seeded by ascending start time (executing
    /// before allocated on ties), followed by the target roots at `clock`.
    ///
    /// # Errors
    /// - [`ScheduleError::UnknownTask`] if a partition names a task outside the graph.
    /// - [`ScheduleError::DuplicateTask`] if a task is listed more than once,
    ///   within or across partitions.
    pub fn running(graph: &TaskGraph, schedule: &RunningSchedule) -> Result<Self> {
        let mut plan = Self {
            slots: Vec::new(),
            slot_of: Arc::default(),
            seeds: Vec::new(),
            targets: Vec::with_capacity(schedule.targets.len()),
        };

        let fixed = schedule
            .executing
            .iter()
            .map(|f| (f, Partition::Executing))
            .chain(schedule.allocated.iter().map(|f| (f, Partition::Allocated)));
        for (task, partition) in fixed {
            let source = SlotSource::Fixed {
                resource: task.resource,
                start_time: task.start_time,
            };
            let slot = plan.insert(graph, task.task_id, partition, source)?;
            plan.seeds.push((slot, task.start_time));
        }
        // Committed work claims its resources in start order, running tasks
        // first on ties; target roots queue behind all of it.
        plan.seeds.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (position, &task_id) in schedule.targets.iter().enumerate() {
            let source = SlotSource::Genome { position };
            let slot = plan.insert(graph, task_id, Partition::Target, source)?;
            plan.targets.push(slot);

            let depth = graph.tasks()[plan.slots[slot].graph_index].depth;
            if depth == graph.min_depth() {
                plan.seeds.push((slot, schedule.clock));
            }
        }

        tracing::debug!(
            allocated = schedule.allocated.len(),
            executing = schedule.executing.len(),
            targets = schedule.targets.len(),
            seeds = plan.seeds.len(),
            "running evaluation plan built"
        );

        Ok(plan)
    }

    fn insert(
        &mut self,
        graph: &TaskGraph,
        task_id: TaskId,
        partition: Partition,
        source: SlotSource,
    ) -> Result<usize> {
        let graph_index = graph
            .index_of(task_id)
            .ok_or(ScheduleError::UnknownTask(task_id))?;
        if self.slot_of.contains_key(&task_id) {
            return Err(ScheduleError::DuplicateTask(task_id));
        }

        let slot = self.slots.len();
        self.slots.push(Slot {
            task_id,
            graph_index,
            partition,
            source,
        });
        Arc::make_mut(&mut self.slot_of).insert(task_id, slot);
        Ok(slot)
    }

    /// Number of tracked tasks.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of genome positions this plan expects.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// All tracked tasks, in slot order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot of a tracked task.
    pub fn slot_of(&self, task_id: TaskId) -> Option<usize> {
        self.slot_of.get(&task_id).copied()
    }

    pub(crate) fn shared_slot_map(&self) -> Arc<HashMap<TaskId, usize>> {
        Arc::clone(&self.slot_of)
    }

    /// Whether a task is tracked by this plan.
    pub fn tracks(&self, task_id: TaskId) -> bool {
        self.slot_of.contains_key(&task_id)
    }

    /// Initial queue entries: (slot, ready time).
    pub fn seeds(&self) -> &[(usize, f64)] {
        &self.seeds
    }

    /// Task optimized at a genome position.
    pub fn target_task(&self, position: usize) -> Option<TaskId> {
        self.targets.get(position).map(|&slot| self.slots[slot].task_id)
    }

    /// Target tasks in genome order.
    pub fn target_tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.targets.iter().map(|&slot| self.slots[slot].task_id)
    }
}
