//! Workflow scheduling domain models.
//!
//! Provides the immutable task graph, the compute resources tasks are
//! placed on, and the assignment genome an optimizer searches over.
//!
//! # Domain Mappings
//!
//! | u-workflow | Cloud workflow | Batch cluster |
//! |------------|----------------|---------------|
//! | Task | Workflow job | Batch step |
//! | Resource | Virtual machine | Node |
//! | Genome | VM allocation | Placement plan |

mod genome;
mod graph;
mod resource;
mod task;

pub use genome::{Genome, GroupIndex};
pub use graph::TaskGraph;
pub use resource::{Resource, ResourceId};
pub use task::{Task, TaskId};
