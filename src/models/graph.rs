//! Immutable workflow DAG.
//!
//! Built once from pre-linked tasks (parents, children and depths already
//! resolved by the workflow parser) and consumed read-only by every
//! evaluation.

use std::collections::HashMap;

use super::{Task, TaskId};
use crate::error::{Result, ScheduleError};
use crate::validation::validate_graph;

/// A validated, acyclic workflow task graph.
///
/// Task order is the order the tasks were supplied in; it is also the
/// genome order of [`EvaluationPlan::full`](crate::evaluator::EvaluationPlan::full).
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
    min_depth: u32,
    max_depth: u32,
}

impl TaskGraph {
    /// Validates and indexes a task list.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidGraph`] with every detected problem.
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        validate_graph(&tasks).map_err(ScheduleError::InvalidGraph)?;

        let index = tasks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let min_depth = tasks.iter().map(|t| t.depth).min().unwrap_or(0);
        let max_depth = tasks.iter().map(|t| t.depth).max().unwrap_or(0);

        tracing::debug!(
            tasks = tasks.len(),
            min_depth,
            max_depth,
            "task graph built"
        );

        Ok(Self {
            tasks,
            index,
            min_depth,
            max_depth,
        })
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in supply order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by ID.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&i| &self.tasks[i])
    }

    /// Position of a task in supply order.
    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Whether the graph contains a task.
    pub fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    /// Smallest depth in the graph (the depth of every root).
    pub fn min_depth(&self) -> u32 {
        self.min_depth
    }

    /// Largest depth in the graph.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Tasks at the minimal depth.
    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.at_depth(self.min_depth)
    }

    /// Tasks at a given depth, in supply order.
    pub fn at_depth(&self, depth: u32) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.depth == depth)
    }
}
