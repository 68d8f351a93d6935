//! Compute resource model.
//!
//! Resources are the virtual machines (or any other executors) a workflow
//! task can be placed on. A resource carries a processing speed and a cost
//! rate; its mutable "busy until" clock lives in the
//! [`ResourceTimeline`](crate::timeline::ResourceTimeline), not here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 0-based resource identifier.
///
/// Also the value type of every genome position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub usize);

impl ResourceId {
    /// The raw index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vm{}", self.0)
    }
}

impl From<usize> for ResourceId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

/// A compute resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identifier (position in the resource list).
    pub id: ResourceId,
    /// Human-readable name.
    pub name: String,
    /// Work units processed per time unit (default: 1.0).
    pub speed: f64,
    /// Monetary cost per time unit (default: 0.0).
    pub rate: f64,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

impl Resource {
    /// Creates a resource with unit speed and zero cost.
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            speed: 1.0,
            rate: 0.0,
            attributes: HashMap::new(),
        }
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the processing speed. Non-positive values are ignored.
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Sets the cost rate (clamped to be non-negative).
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate.max(0.0);
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Time needed to process `length` work units on this resource.
    #[inline]
    pub fn processing_time(&self, length: f64) -> f64 {
        length / self.speed
    }
}
