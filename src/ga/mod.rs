//! Optimizer integration for workflow scheduling.
//!
//! Exposes the workflow assignment problem to population-based
//! metaheuristics through [`OptimizationProblem`], together with the
//! group-consistent crossover used to recombine assignment genomes.
//!
//! # Encoding
//!
//! A [`Genome`](crate::models::Genome) holds one resource per target task.
//! Tasks sharing a resource form a *group*; [`GroupCrossover`] exchanges
//! whole groups between parents so co-located tasks stay together.
//!
//! # Reference
//! - Durillo & Prodan (2014), "Multi-objective workflow scheduling in
//!   Amazon EC2"

mod crossover;
mod problem;

pub use crossover::GroupCrossover;
pub use problem::{OptimizationProblem, ProblemConfig, WorkflowProblem};
