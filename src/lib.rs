//! Workflow scheduling evaluation for the U-Engine ecosystem.
//!
//! Scores task-to-resource assignments of scientific workflows (DAGs of
//! tasks run on heterogeneous VMs) and recombines them with a
//! group-consistent crossover, so that a population-based multi-objective
//! optimizer can search for low-makespan, low-cost schedules. The optimizer
//! itself lives outside this crate.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskGraph`, `Resource`, `Genome`
//! - **`timeline`**: Per-resource clocks and the execution cost model
//! - **`evaluator`**: Schedule simulation and objective aggregation
//!   (full and running-workflow variants)
//! - **`ga`**: Optimizer-facing problem and the group-consistent crossover
//! - **`planning`**: Picking the final solution and committing it
//! - **`validation`**: Task graph integrity checks (references, depths, cycles)
//!
//! # Example
//!
//! ```
//! use u_workflow::evaluator::{Evaluator, ObjectiveCount};
//! use u_workflow::models::{Genome, Resource, Task, TaskGraph};
//! use u_workflow::timeline::SimulatedTimeline;
//!
//! // A → {B, C} → D
//! let graph = TaskGraph::new(vec![
//!     Task::new(1).with_length(4.0).with_child(2).with_child(3),
//!     Task::new(2).with_depth(1).with_length(6.0).with_parent(1).with_child(4),
//!     Task::new(3).with_depth(1).with_length(6.0).with_parent(1).with_child(4),
//!     Task::new(4).with_depth(2).with_length(2.0).with_parent(2).with_parent(3),
//! ]).unwrap();
//! let mut timeline = SimulatedTimeline::new(vec![Resource::new(0), Resource::new(1)]);
//!
//! let evaluator = Evaluator::new(&graph);
//! let objectives = evaluator
//!     .objectives(&Genome::from_indices([0, 0, 1, 0]), &mut timeline, ObjectiveCount::Two)
//!     .unwrap();
//! assert_eq!(objectives.as_slice(), &[12.0, 18.0]);
//! ```
//!
//! # References
//!
//! - Chen & Deelman (2012), "WorkflowSim: A Toolkit for Simulating
//!   Scientific Workflows in Distributed Environments"
//! - Deb & Jain (2014), "An Evolutionary Many-Objective Optimization
//!   Algorithm Using Reference-Point-Based Nondominated Sorting Approach"

pub mod error;
pub mod evaluator;
pub mod ga;
pub mod models;
pub mod planning;
pub mod timeline;
pub mod validation;

pub use error::{Result, ScheduleError};
