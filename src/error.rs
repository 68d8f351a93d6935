//! Crate error type.
//!
//! All failures are precondition violations detected at a boundary:
//! graph construction, plan construction, or the entry of an evaluation.
//! Nothing inside the traversal itself can fail.

use thiserror::Error;

use crate::models::{ResourceId, TaskId};
use crate::validation::ValidationError;

/// Scheduling error.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid task graph: {}", summarize(.0))]
    InvalidGraph(Vec<ValidationError>),

    #[error("genome has {actual} positions but the plan has {expected} target tasks")]
    GenomeLength { expected: usize, actual: usize },

    #[error("genome position {position} assigns {resource}, but only {count} resources exist")]
    ResourceOutOfRange {
        position: usize,
        resource: ResourceId,
        count: usize,
    },

    #[error("fixed task {task} is pinned to {resource}, but only {count} resources exist")]
    FixedResourceOutOfRange {
        task: TaskId,
        resource: ResourceId,
        count: usize,
    },

    #[error("task {0} is not part of the task graph")]
    UnknownTask(TaskId),

    #[error("task {0} appears more than once in the scheduling partitions")]
    DuplicateTask(TaskId),

    #[error("{0} objectives requested; supported counts are 1, 2 and 3")]
    UnsupportedObjectiveCount(usize),

    #[error("{targets} target tasks but no resources to place them on")]
    NoResources { targets: usize },

    #[error("cannot select from an empty front")]
    EmptyFront,
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;
