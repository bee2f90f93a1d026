use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ordered_float::OrderedFloat;

use crate::cost::edge_cost;
use crate::{Action, Goal, GoapError, Plan, PlanStep, Result, State};

/// Trait defining the interface for search algorithms used by the planner.
///
/// Implementations take an immutable action catalog, the agent's real
/// current state, and the goal predicate, and either return a plan or report
/// that the goal is unreachable.
pub trait SearchAlgorithm {
    /// Finds a sequence of actions transforming `initial` into a state that
    /// satisfies `goal`.
    ///
    /// # Errors
    ///
    /// * `GoapError::NoPlanFound` when every reachable state has been closed
    ///   without satisfying the goal
    /// * `GoapError::SearchBudgetExhausted` when an expansion budget was set
    ///   and ran out
    fn search(&self, actions: &[Action], initial: &State, goal: &Goal) -> Result<Plan>;
}

/// A heuristic estimate of the remaining work from a state to the goal.
///
/// Heuristics operate on the symbolic facts only. Position is deliberately
/// excluded: a distance-aware heuristic would have to provably underestimate
/// the remaining travel of every possible completion to stay admissible, and
/// the base design does not attempt that. Travel is accounted for on edges
/// instead, by [`edge_cost`].
pub trait HeuristicStrategy: Send + Sync {
    /// Estimates the remaining cost from `state` to `goal`.
    fn estimate(&self, state: &State, goal: &Goal) -> f32;
}

/// Default heuristic: the number of goal facts the state does not satisfy.
pub struct UnsatisfiedGoalHeuristic;

impl HeuristicStrategy for UnsatisfiedGoalHeuristic {
    fn estimate(&self, state: &State, goal: &Goal) -> f32 {
        goal.unsatisfied_count(state) as f32
    }
}

/// Zero heuristic, turning A* into Dijkstra's algorithm.
pub struct ZeroHeuristic;

impl HeuristicStrategy for ZeroHeuristic {
    fn estimate(&self, _state: &State, _goal: &Goal) -> f32 {
        0.0
    }
}

/// A node in the search space: a state plus the bookkeeping needed to
/// reconstruct the path to it.
#[derive(Debug, Clone)]
struct Node {
    /// The state at this node
    state: State,
    /// Index of the predecessor node, `None` for the initial state
    parent: Option<usize>,
    /// Action that produced this state from the predecessor
    action: Option<Action>,
    /// Cheapest known path cost from the initial state to this node
    g_cost: f32,
    /// Heuristic estimate from this node to the goal
    h_cost: f32,
}

impl Node {
    fn f_cost(&self) -> f32 {
        self.g_cost + self.h_cost
    }
}

/// An entry in the open list.
///
/// Ordering is lexicographic on (f, g, seq): lowest f first, ties broken by
/// lower g (prefer the node whose cost is confirmed rather than estimated),
/// then by discovery order. The last key makes the search fully
/// deterministic for a given action slice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f_cost: OrderedFloat<f32>,
    g_cost: OrderedFloat<f32>,
    seq: u64,
    idx: usize,
}

/// Owns the frontier, the best-cost table and the closed set for one search.
struct SearchContext<'a> {
    goal: &'a Goal,
    heuristic: &'a dyn HeuristicStrategy,
    /// Arena of every node created during the search
    nodes: Vec<Node>,
    /// Priority queue over node indices, min-ordered by (f, g, seq)
    open: BinaryHeap<Reverse<OpenEntry>>,
    /// State -> index of the cheapest known node for that state
    best: HashMap<State, usize>,
    /// States whose cheapest path has been finalized
    closed: HashSet<State>,
    seq: u64,
}

impl<'a> SearchContext<'a> {
    fn new(initial: &State, goal: &'a Goal, heuristic: &'a dyn HeuristicStrategy) -> Self {
        let root = Node {
            state: initial.clone(),
            parent: None,
            action: None,
            g_cost: 0.0,
            h_cost: heuristic.estimate(initial, goal),
        };

        let mut context = Self {
            goal,
            heuristic,
            nodes: vec![root],
            open: BinaryHeap::new(),
            best: HashMap::new(),
            closed: HashSet::new(),
            seq: 0,
        };
        context.best.insert(initial.clone(), 0);
        context.push_open(0);
        context
    }

    fn push_open(&mut self, idx: usize) {
        let node = &self.nodes[idx];
        let entry = OpenEntry {
            f_cost: OrderedFloat(node.f_cost()),
            g_cost: OrderedFloat(node.g_cost),
            seq: self.seq,
            idx,
        };
        self.seq += 1;
        self.open.push(Reverse(entry));
    }

    /// Pops the lowest-f node that is still current.
    ///
    /// Entries whose state has been closed, or that were superseded by a
    /// cheaper rediscovery of the same state, are stale and skipped.
    fn pop_best(&mut self) -> Option<usize> {
        while let Some(Reverse(entry)) = self.open.pop() {
            let state = &self.nodes[entry.idx].state;
            if self.closed.contains(state) {
                continue;
            }
            if self.best.get(state) != Some(&entry.idx) {
                continue;
            }
            return Some(entry.idx);
        }
        None
    }

    fn close(&mut self, idx: usize) {
        let state = self.nodes[idx].state.clone();
        self.closed.insert(state);
    }

    /// Generates every applicable successor of `parent_idx` and runs the
    /// best-cost relaxation on each.
    ///
    /// A successor's position is always snapped to the producing action's
    /// target position. That keeps the set of positions finite (initial
    /// position plus one per action), so plain state equality already
    /// deduplicates the positional dimension.
    fn expand(&mut self, parent_idx: usize, actions: &[Action]) {
        for action in actions {
            if !action.can_perform(&self.nodes[parent_idx].state) {
                continue;
            }

            let parent = &self.nodes[parent_idx];
            let outcome = action
                .apply_effects(&parent.state)
                .with_position(action.target_position);
            let g_new = parent.g_cost + edge_cost(action, &parent.state);

            // Standard A* relaxation: skip finalized states and states we
            // already reach at least as cheaply.
            if self.closed.contains(&outcome) {
                continue;
            }
            if let Some(&existing) = self.best.get(&outcome) {
                if self.nodes[existing].g_cost <= g_new {
                    continue;
                }
            }

            log::trace!(
                "relaxing '{}' -> g = {:.3} at {:?}",
                action.name,
                g_new,
                outcome.position()
            );

            let h_new = self.heuristic.estimate(&outcome, self.goal);
            let idx = self.nodes.len();
            self.nodes.push(Node {
                state: outcome.clone(),
                parent: Some(parent_idx),
                action: Some(action.clone()),
                g_cost: g_new,
                h_cost: h_new,
            });
            self.best.insert(outcome, idx);
            self.push_open(idx);
        }
    }

    /// Walks back-pointers from the goal node to the root and reverses the
    /// action sequence into initial-to-goal order.
    fn reconstruct_plan(&self, goal_idx: usize) -> Plan {
        let mut steps = Vec::new();
        let mut current = goal_idx;

        while let Some(node) = self.nodes.get(current) {
            if let Some(action) = &node.action {
                steps.push(PlanStep {
                    action: action.clone(),
                    outcome: node.state.clone(),
                });
            }
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        steps.reverse();
        Plan::new(steps, self.nodes[goal_idx].g_cost)
    }
}

/// Forward A* search over the composite (facts, position) state space.
///
/// The heuristic is pluggable but always symbolic-only; an optional
/// expansion budget bounds the loop against pathological inputs.
pub struct AStarSearch {
    heuristic: Box<dyn HeuristicStrategy>,
    max_expansions: Option<usize>,
}

impl AStarSearch {
    /// Creates an A* search with the given heuristic.
    pub fn new(heuristic: Box<dyn HeuristicStrategy>) -> Self {
        Self {
            heuristic,
            max_expansions: None,
        }
    }

    /// Creates an A* search with the default unsatisfied-goal-facts
    /// heuristic.
    pub fn with_default_heuristic() -> Self {
        Self::new(Box::new(UnsatisfiedGoalHeuristic))
    }

    /// Bounds the number of node expansions.
    ///
    /// The planner has no internal preemption point; this budget is the
    /// recommended guard when action sets may be malformed or adversarial.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

impl Default for AStarSearch {
    fn default() -> Self {
        Self::with_default_heuristic()
    }
}

impl SearchAlgorithm for AStarSearch {
    fn search(&self, actions: &[Action], initial: &State, goal: &Goal) -> Result<Plan> {
        if goal.is_satisfied_by(initial) {
            return Ok(Plan::empty());
        }

        let mut context = SearchContext::new(initial, goal, self.heuristic.as_ref());
        let mut expansions: usize = 0;

        while let Some(current_idx) = context.pop_best() {
            if goal.is_satisfied_by(&context.nodes[current_idx].state) {
                let plan = context.reconstruct_plan(current_idx);
                log::debug!(
                    "plan found: {} steps, total cost {:.3}, {} expansions",
                    plan.len(),
                    plan.total_cost(),
                    expansions
                );
                return Ok(plan);
            }

            if let Some(limit) = self.max_expansions {
                if expansions >= limit {
                    log::debug!("search budget of {} expansions exhausted", limit);
                    return Err(GoapError::SearchBudgetExhausted(limit));
                }
            }
            expansions += 1;

            context.close(current_idx);
            context.expand(current_idx, actions);
        }

        log::debug!("frontier drained after {} expansions, no plan", expansions);
        Err(GoapError::NoPlanFound)
    }
}

/// Dijkstra's algorithm: A* with a zero heuristic.
///
/// Slower than A* on large action sets but free of any heuristic
/// admissibility concerns.
#[derive(Default)]
pub struct DijkstraSearch;

impl SearchAlgorithm for DijkstraSearch {
    fn search(&self, actions: &[Action], initial: &State, goal: &Goal) -> Result<Plan> {
        AStarSearch::new(Box::new(ZeroHeuristic)).search(actions, initial, goal)
    }
}
