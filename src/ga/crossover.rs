//! Group-consistent crossover for resource-assignment genomes.
//!
//! # Algorithm
//!
//! Positions are visited in a random permutation. At an untouched position
//! `i` where the offspring disagree (`a = child1[i]`, `b = child2[i]`),
//! with the operator's probability:
//!
//! 1. Every other position of `a`'s group in child1 is set to `a` in
//!    child2, and every other position of `b`'s group in child2 is set to
//!    `b` in child1. Migrated positions are marked touched on the
//!    receiving side and never serve as pivots afterwards.
//! 2. The pivot values themselves are exchanged with probability 1/2
//!    (subset crossover on the two single-element pivot sets).
//!
//! A group with no members besides the pivot migrates nothing.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::models::{Genome, GroupIndex, ResourceId};

/// Group-consistent crossover operator (arity 2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupCrossover {
    probability: f64,
}

impl Default for GroupCrossover {
    fn default() -> Self {
        Self { probability: 0.5 }
    }
}

impl GroupCrossover {
    /// Number of parents consumed and offspring produced.
    pub const ARITY: usize = 2;

    /// Creates the operator with a per-position probability (clamped to `[0, 1]`,
    /// NaN treated as 0).
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }

    /// Per-position application probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Recombines two parents into two offspring of the same length.
    ///
    /// Parents of unequal length only exchange over their common prefix.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Genome,
        parent2: &Genome,
        rng: &mut R,
    ) -> (Genome, Genome) {
        let mut state = Offspring::new(parent1, parent2);

        let mut order: Vec<usize> = (0..state.len).collect();
        order.shuffle(rng);

        for pivot in order {
            if !rng.random_bool(self.probability) {
                continue;
            }
            if let Some(migration) = state.exchange(pivot, rng) {
                tracing::trace!(
                    pivot,
                    from = %migration.from,
                    to = %migration.to,
                    migrated1 = migration.into_child1.len(),
                    migrated2 = migration.into_child2.len(),
                    swapped = migration.swapped,
                    "group migration"
                );
            }
        }

        (state.child1, state.child2)
    }
}

/// Group moves made around one pivot.
#[derive(Debug)]
struct Migration {
    /// child1's pivot value before the exchange.
    from: ResourceId,
    /// child2's pivot value before the exchange.
    to: ResourceId,
    /// Positions of child1 that adopted child2's pivot value.
    into_child1: Vec<usize>,
    /// Positions of child2 that adopted child1's pivot value.
    into_child2: Vec<usize>,
    swapped: bool,
}

/// Offspring under construction with their group indexes and touched marks.
struct Offspring {
    len: usize,
    child1: Genome,
    child2: Genome,
    groups1: GroupIndex,
    groups2: GroupIndex,
    touched1: Vec<bool>,
    touched2: Vec<bool>,
}

impl Offspring {
    fn new(parent1: &Genome, parent2: &Genome) -> Self {
        let len = parent1.len().min(parent2.len());
        Self {
            len,
            groups1: parent1.group_index(),
            groups2: parent2.group_index(),
            child1: parent1.clone(),
            child2: parent2.clone(),
            touched1: vec![false; len],
            touched2: vec![false; len],
        }
    }

    /// Migrates the pivot's groups and flips the pivot exchange coin.
    ///
    /// Returns `None` when the pivot is touched or both offspring agree.
    fn exchange<R: Rng>(&mut self, pivot: usize, rng: &mut R) -> Option<Migration> {
        if self.touched1[pivot] || self.touched2[pivot] {
            return None;
        }
        let a = self.child1[pivot];
        let b = self.child2[pivot];
        if a == b {
            return None;
        }

        let len = self.len;
        let into_child2: Vec<usize> = self
            .groups1
            .members(a)
            .filter(|&p| p != pivot && p < len)
            .collect();
        let into_child1: Vec<usize> = self
            .groups2
            .members(b)
            .filter(|&p| p != pivot && p < len)
            .collect();

        for &p in &into_child2 {
            assign(&mut self.child2, &mut self.groups2, p, a);
            self.touched2[p] = true;
        }
        for &p in &into_child1 {
            assign(&mut self.child1, &mut self.groups1, p, b);
            self.touched1[p] = true;
        }

        // Residual sets of two distinct singletons: one fair exchange.
        let swapped = rng.random_bool(0.5);
        if swapped {
            assign(&mut self.child1, &mut self.groups1, pivot, b);
            assign(&mut self.child2, &mut self.groups2, pivot, a);
        }

        Some(Migration {
            from: a,
            to: b,
            into_child1,
            into_child2,
            swapped,
        })
    }
}

fn assign(genome: &mut Genome, groups: &mut GroupIndex, position: usize, resource: ResourceId) {
    let previous = genome.set(position, resource);
    groups.relocate(position, previous, resource);
}
