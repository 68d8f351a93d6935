//! Resource-assignment genome.
//!
//! # Encoding
//!
//! One position per target task, holding exactly one [`ResourceId`].
//! Positions that hold the same resource form a *group*: the set of tasks
//! co-located on that resource. Groups are not stored in the genome; they
//! are derived on demand as a [`GroupIndex`].
//!
//! # Reference
//! Yu & Buyya (2006), "Scheduling Scientific Workflow Applications with
//! Deadline and Budget Constraints using Genetic Algorithms"

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Task-to-resource assignment vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome {
    genes: Vec<ResourceId>,
}

impl Genome {
    /// Creates a genome from explicit assignments.
    pub fn new(genes: Vec<ResourceId>) -> Self {
        Self { genes }
    }

    /// Creates a genome from raw resource indices.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        indices.into_iter().map(ResourceId).collect()
    }

    /// Creates a genome with a uniformly random resource per position.
    ///
    /// # Panics
    /// If `resource_count` is zero while `len` is not.
    pub fn random<R: Rng>(len: usize, resource_count: usize, rng: &mut R) -> Self {
        (0..len)
            .map(|_| ResourceId(rng.random_range(0..resource_count)))
            .collect()
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no positions.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Resource at a position.
    pub fn get(&self, position: usize) -> Option<ResourceId> {
        self.genes.get(position).copied()
    }

    /// Reassigns a position, returning the previous resource.
    ///
    /// # Panics
    /// If `position` is out of bounds.
    pub fn set(&mut self, position: usize, resource: ResourceId) -> ResourceId {
        std::mem::replace(&mut self.genes[position], resource)
    }

    /// All assignments in position order.
    pub fn genes(&self) -> &[ResourceId] {
        &self.genes
    }

    /// Iterates assignments in position order.
    pub fn iter(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.genes.iter().copied()
    }

    /// First position whose resource is outside `[0, resource_count)`.
    pub fn first_out_of_range(&self, resource_count: usize) -> Option<(usize, ResourceId)> {
        self.genes
            .iter()
            .enumerate()
            .find(|(_, r)| r.index() >= resource_count)
            .map(|(i, &r)| (i, r))
    }

    /// Whether every position references a resource below `resource_count`.
    pub fn is_valid(&self, resource_count: usize) -> bool {
        self.first_out_of_range(resource_count).is_none()
    }

    /// Builds the value → positions index for this genome.
    pub fn group_index(&self) -> GroupIndex {
        GroupIndex::build(&self.genes)
    }
}

impl Index<usize> for Genome {
    type Output = ResourceId;

    fn index(&self, position: usize) -> &ResourceId {
        &self.genes[position]
    }
}

impl FromIterator<ResourceId> for Genome {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Self {
            genes: iter.into_iter().collect(),
        }
    }
}

/// Resource → positions index over a genome.
///
/// Ordered maps keep iteration deterministic, so seeded operators replay
/// exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    groups: BTreeMap<ResourceId, BTreeSet<usize>>,
}

impl GroupIndex {
    /// Indexes a slice of assignments.
    pub fn build(genes: &[ResourceId]) -> Self {
        let mut groups: BTreeMap<ResourceId, BTreeSet<usize>> = BTreeMap::new();
        for (position, &resource) in genes.iter().enumerate() {
            groups.entry(resource).or_default().insert(position);
        }
        Self { groups }
    }

    /// Positions currently holding `resource`, ascending.
    pub fn members(&self, resource: ResourceId) -> impl Iterator<Item = usize> + '_ {
        self.groups
            .get(&resource)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of positions holding `resource`.
    pub fn group_len(&self, resource: ResourceId) -> usize {
        self.groups.get(&resource).map_or(0, BTreeSet::len)
    }

    /// Resources that hold at least one position.
    pub fn resources(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.groups.keys().copied()
    }

    /// Number of non-empty groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Moves `position` from the `from` group to the `to` group.
    pub fn relocate(&mut self, position: usize, from: ResourceId, to: ResourceId) {
        if from == to {
            return;
        }
        if let Some(set) = self.groups.get_mut(&from) {
            set.remove(&position);
            if set.is_empty() {
                self.groups.remove(&from);
            }
        }
        self.groups.entry(to).or_default().insert(position);
    }
}
