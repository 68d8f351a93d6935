//! Workflow schedule evaluation.
//!
//! Simulates the execution of a task-to-resource assignment over the task
//! graph and reduces it to a multi-objective fitness vector.
//!
//! # Variants
//!
//! One engine serves both shapes of the problem through an
//! [`EvaluationPlan`]:
//!
//! - **Full**: plan a workflow from scratch; the genome covers every task.
//! - **Running**: re-plan mid-execution; committed and running tasks keep
//!   their resource and start time, only target tasks come from the genome.
//!
//! # Objectives
//!
//! Makespan, total processing time and monetary cost, selected by
//! [`ObjectiveCount`].
//!
//! # References
//!
//! - Chen & Deelman (2012), "WorkflowSim: A Toolkit for Simulating
//!   Scientific Workflows in Distributed Environments"
//! - Durillo & Prodan (2014), "Multi-objective workflow scheduling in
//!   Amazon EC2"

mod engine;
mod objectives;
mod plan;

pub use engine::{Evaluation, Evaluator, TaskRecord};
pub use objectives::{ObjectiveCount, ObjectiveTotals, ObjectiveVector};
pub use plan::{EvaluationPlan, FixedTask, Partition, RunningSchedule, Slot, SlotSource};
