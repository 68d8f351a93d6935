//! Resource timelines: the cost-model boundary of the evaluator.
//!
//! A timeline owns, per resource, a mutable "busy until" clock and knows
//! how long a task takes on a resource and what that time costs. The
//! evaluator only talks to the [`ResourceTimeline`] trait, so contention
//! models are pluggable.
//!
//! # Concurrency
//!
//! Timelines are plain mutable state. A parallel optimizer must give each
//! worker its own instance (every implementation here is `Clone`).

mod simulated;

pub use simulated::{ContentionModel, SimulatedTimeline};

use crate::models::{ResourceId, Task};

/// Per-resource clock and cost model.
pub trait ResourceTimeline {
    /// Number of resources; valid IDs are `0..resource_count()`.
    fn resource_count(&self) -> usize;

    /// Cost per time unit of a resource.
    fn rate(&self, resource: ResourceId) -> f64;

    /// Clears the resource's clock back to the idle state.
    fn reset(&mut self, resource: ResourceId);

    /// Estimates when `task` finishes on `resource` if it becomes ready at
    /// `ready`, and advances the resource's clock accordingly.
    fn estimate_finish(&mut self, task: &Task, resource: ResourceId, ready: f64) -> f64;

    /// Resets every resource.
    fn reset_all(&mut self) {
        for r in 0..self.resource_count() {
            self.reset(ResourceId(r));
        }
    }
}
