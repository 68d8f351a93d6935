//! Input validation for workflow task graphs.
//!
//! Runs once when a [`TaskGraph`](crate::models::TaskGraph) is built, never
//! per evaluation. Detects:
//! - Duplicate task IDs
//! - Dangling parent/child references
//! - Parent/child links recorded on one side only
//! - Depth not strictly increasing along an edge
//! - Non-root tasks without parents
//! - Circular precedence dependencies (DAG validation)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Task, TaskId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// A parent or child link points to a task that doesn't exist.
    UnknownReference,
    /// A link is recorded on one side only.
    AsymmetricLink,
    /// A child's depth is not greater than its parent's.
    DepthOrder,
    /// A task below the minimal depth has no parents.
    OrphanTask,
    /// Precedence graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a workflow task list.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_graph(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut by_id: HashMap<TaskId, &Task> = HashMap::new();
    for task in tasks {
        if by_id.insert(task.id, task).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
    }

    let min_depth = tasks.iter().map(|t| t.depth).min().unwrap_or(0);

    for task in tasks {
        if task.parents.is_empty() && task.depth > min_depth {
            errors.push(ValidationError::new(
                ValidationErrorKind::OrphanTask,
                format!(
                    "Task {} has depth {} but no parents (roots have depth {min_depth})",
                    task.id, task.depth
                ),
            ));
        }

        for parent_id in &task.parents {
            match by_id.get(parent_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReference,
                    format!("Task {} references unknown parent {parent_id}", task.id),
                )),
                Some(parent) => {
                    if !parent.children.contains(&task.id) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::AsymmetricLink,
                            format!(
                                "Task {} lists parent {parent_id}, which does not list it as a child",
                                task.id
                            ),
                        ));
                    }
                    if parent.depth >= task.depth {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::DepthOrder,
                            format!(
                                "Task {} (depth {}) is not deeper than its parent {parent_id} (depth {})",
                                task.id, task.depth, parent.depth
                            ),
                        ));
                    }
                }
            }
        }

        for child_id in &task.children {
            match by_id.get(child_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReference,
                    format!("Task {} references unknown child {child_id}", task.id),
                )),
                Some(child) if !child.parents.contains(&task.id) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::AsymmetricLink,
                        format!(
                            "Task {} lists child {child_id}, which does not list it as a parent",
                            task.id
                        ),
                    ));
                }
                Some(_) => {}
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles along child links using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
fn detect_cycles(tasks: &[Task]) -> Option<ValidationError> {
    let adj: HashMap<TaskId, &[TaskId]> = tasks
        .iter()
        .map(|t| (t.id, t.children.as_slice()))
        .collect();

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for task in tasks {
        if !visited.contains(&task.id)
            && has_cycle_dfs(task.id, &adj, &mut visited, &mut in_stack)
        {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving task {}", task.id),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: TaskId,
    adj: &HashMap<TaskId, &[TaskId]>,
    visited: &mut HashSet<TaskId>,
    in_stack: &mut HashSet<TaskId>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors.iter() {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}
