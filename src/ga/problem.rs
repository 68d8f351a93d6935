//! Optimizer-facing workflow scheduling problem.
//!
//! Bridges the evaluator and the crossover operator to any population-based
//! optimizer (NSGA-II/III, IBEA, SPEA2, ...) through the narrow
//! [`OptimizationProblem`] interface. Selection, ranking and population
//! management stay on the optimizer's side.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GroupCrossover;
use crate::error::{Result, ScheduleError};
use crate::evaluator::{Evaluation, Evaluator, ObjectiveCount, ObjectiveVector, RunningSchedule};
use crate::models::{Genome, TaskGraph};
use crate::timeline::ResourceTimeline;

/// What an optimizer needs from a problem.
pub trait OptimizationProblem {
    /// Candidate solution type.
    type Candidate: Clone;

    /// Number of decision variables per candidate.
    fn variable_count(&self) -> usize;

    /// Number of objectives per evaluation.
    fn objective_count(&self) -> ObjectiveCount;

    /// Draws a random candidate.
    fn new_candidate<R: Rng>(&self, rng: &mut R) -> Self::Candidate;

    /// Computes the objective vector of a candidate (all objectives minimized).
    fn evaluate(&mut self, candidate: &Self::Candidate) -> Result<ObjectiveVector>;

    /// Recombines two parents into two offspring.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Candidate,
        parent2: &Self::Candidate,
        rng: &mut R,
    ) -> (Self::Candidate, Self::Candidate);
}

/// Problem settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    /// Active objectives (default: makespan and total time).
    pub objectives: ObjectiveCount,
    /// Per-position crossover probability (default: 0.5).
    pub crossover_probability: f64,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            objectives: ObjectiveCount::Two,
            crossover_probability: 0.5,
        }
    }
}

impl ProblemConfig {
    /// Sets the active objectives.
    pub fn with_objectives(mut self, objectives: ObjectiveCount) -> Self {
        self.objectives = objectives;
        self
    }

    /// Sets the crossover probability (clamped to `[0, 1]`).
    pub fn with_crossover_probability(mut self, probability: f64) -> Self {
        self.crossover_probability = GroupCrossover::new(probability).probability();
        self
    }
}

/// Workflow resource-assignment problem.
///
/// Owns its timeline, so a clone is an independent evaluation worker.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_workflow::ga::{OptimizationProblem, WorkflowProblem};
/// use u_workflow::models::{Resource, Task, TaskGraph};
/// use u_workflow::timeline::SimulatedTimeline;
///
/// let graph = TaskGraph::new(vec![Task::new(1).with_length(10.0)]).unwrap();
/// let timeline = SimulatedTimeline::new(vec![Resource::new(0), Resource::new(1).with_speed(2.0)]);
/// let mut problem = WorkflowProblem::new(&graph, timeline).unwrap();
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let candidate = problem.new_candidate(&mut rng);
/// let objectives = problem.evaluate(&candidate).unwrap();
/// assert_eq!(objectives.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowProblem<'g, T> {
    evaluator: Evaluator<'g>,
    timeline: T,
    config: ProblemConfig,
    crossover: GroupCrossover,
}

impl<'g, T: ResourceTimeline> WorkflowProblem<'g, T> {
    /// Problem over every task of the graph.
    ///
    /// # Errors
    /// [`ScheduleError::NoResources`] if there are tasks but no resources.
    pub fn new(graph: &'g TaskGraph, timeline: T) -> Result<Self> {
        Self::from_evaluator(Evaluator::new(graph), timeline)
    }

    /// Problem over the target tasks of a running workflow.
    ///
    /// # Errors
    /// Plan construction errors (see
    /// [`EvaluationPlan::running`](crate::evaluator::EvaluationPlan::running))
    /// and [`ScheduleError::NoResources`].
    pub fn running(graph: &'g TaskGraph, schedule: &RunningSchedule, timeline: T) -> Result<Self> {
        Self::from_evaluator(Evaluator::running(graph, schedule)?, timeline)
    }

    fn from_evaluator(evaluator: Evaluator<'g>, timeline: T) -> Result<Self> {
        let targets = evaluator.plan().target_count();
        if targets > 0 && timeline.resource_count() == 0 {
            return Err(ScheduleError::NoResources { targets });
        }
        let config = ProblemConfig::default();
        Ok(Self {
            evaluator,
            timeline,
            crossover: GroupCrossover::new(config.crossover_probability),
            config,
        })
    }

    /// Replaces the settings.
    pub fn with_config(mut self, config: ProblemConfig) -> Self {
        self.crossover = GroupCrossover::new(config.crossover_probability);
        self.config = config;
        self
    }

    /// Current settings.
    pub fn config(&self) -> &ProblemConfig {
        &self.config
    }

    /// The underlying evaluator.
    pub fn evaluator(&self) -> &Evaluator<'g> {
        &self.evaluator
    }

    /// The owned timeline.
    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    /// Full per-task simulation of a candidate.
    pub fn simulate(&mut self, genome: &Genome) -> Result<Evaluation> {
        self.evaluator.evaluate(genome, &mut self.timeline)
    }
}

impl<'g, T: ResourceTimeline> OptimizationProblem for WorkflowProblem<'g, T> {
    type Candidate = Genome;

    fn variable_count(&self) -> usize {
        self.evaluator.plan().target_count()
    }

    fn objective_count(&self) -> ObjectiveCount {
        self.config.objectives
    }

    fn new_candidate<R: Rng>(&self, rng: &mut R) -> Genome {
        Genome::random(self.variable_count(), self.timeline.resource_count(), rng)
    }

    fn evaluate(&mut self, candidate: &Genome) -> Result<ObjectiveVector> {
        Ok(self.simulate(candidate)?.objectives(self.config.objectives))
    }

    fn crossover<R: Rng>(&self, parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Genome, Genome) {
        self.crossover.crossover(parent1, parent2, rng)
    }
}
