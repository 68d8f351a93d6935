//! Workflow task model.
//!
//! A task is a node of the workflow DAG. Precedence links are stored as
//! task IDs on both ends (parents and children) and resolved by
//! [`TaskGraph`](super::TaskGraph) at construction time.
//!
//! # Reference
//! Topcuoglu et al. (2002), "Performance-Effective and Low-Complexity Task
//! Scheduling for Heterogeneous Computing"

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for TaskId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A workflow task.
///
/// Immutable once handed to a [`TaskGraph`](super::TaskGraph).
///
/// # Work Representation
/// `length` is the amount of work in abstract units (e.g. million
/// instructions). How long it takes on a given resource is decided by the
/// resource timeline, not by the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Human-readable name.
    pub name: String,
    /// Topological depth (roots carry the minimal depth).
    pub depth: u32,
    /// Work amount.
    pub length: f64,
    /// Tasks that must finish before this one starts.
    pub parents: Vec<TaskId>,
    /// Tasks that wait on this one.
    pub children: Vec<TaskId>,
}

impl Task {
    /// Creates a root task with zero work.
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            depth: 0,
            length: 0.0,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the topological depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the work amount.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Adds a parent link.
    pub fn with_parent(mut self, parent: impl Into<TaskId>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Adds a child link.
    pub fn with_child(mut self, child: impl Into<TaskId>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Whether the task has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
