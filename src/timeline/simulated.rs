//! Speed/rate based simulated timeline.
//!
//! Processing time is `task.length / resource.speed`. The contention model
//! decides whether a busy resource delays the next task.

use serde::{Deserialize, Serialize};

use super::ResourceTimeline;
use crate::models::{Resource, ResourceId, Task};

/// How a resource's clock affects newly placed tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentionModel {
    /// One task at a time: a task starts no earlier than the resource frees up.
    #[default]
    Exclusive,
    /// Tasks overlap freely; the clock is tracked but never delays.
    Shared,
}

/// Timeline over a fixed resource list.
#[derive(Debug, Clone)]
pub struct SimulatedTimeline {
    resources: Vec<Resource>,
    busy_until: Vec<f64>,
    contention: ContentionModel,
}

impl SimulatedTimeline {
    /// Creates an exclusive-contention timeline.
    ///
    /// Resource IDs are positions in `resources`; the `id` field of each
    /// resource is informational.
    pub fn new(resources: Vec<Resource>) -> Self {
        let busy_until = vec![0.0; resources.len()];
        Self {
            resources,
            busy_until,
            contention: ContentionModel::Exclusive,
        }
    }

    /// Sets the contention model.
    pub fn with_contention(mut self, contention: ContentionModel) -> Self {
        self.contention = contention;
        self
    }

    /// The active contention model.
    pub fn contention(&self) -> ContentionModel {
        self.contention
    }

    /// The resource list.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Current clock of a resource (`None` for an unknown ID).
    pub fn busy_until(&self, resource: ResourceId) -> Option<f64> {
        self.busy_until.get(resource.index()).copied()
    }
}

impl ResourceTimeline for SimulatedTimeline {
    fn resource_count(&self) -> usize {
        self.resources.len()
    }

    fn rate(&self, resource: ResourceId) -> f64 {
        self.resources.get(resource.index()).map_or(0.0, |r| r.rate)
    }

    fn reset(&mut self, resource: ResourceId) {
        if let Some(clock) = self.busy_until.get_mut(resource.index()) {
            *clock = 0.0;
        }
    }

    fn estimate_finish(&mut self, task: &Task, resource: ResourceId, ready: f64) -> f64 {
        let i = resource.index();
        let processing = self.resources[i].processing_time(task.length);
        let clock = &mut self.busy_until[i];

        let finish = match self.contention {
            ContentionModel::Exclusive => ready.max(*clock) + processing,
            ContentionModel::Shared => ready + processing,
        };
        *clock = clock.max(finish);
        finish
    }
}
