//! # Planner Module for Spatially-Aware GOAP
//!
//! The planner is the orchestration layer: it owns the immutable action
//! catalog for one planning cycle, validates it, and dispatches to a search
//! algorithm (A* by default) to turn (current state, goal) into a [`Plan`].
//!
//! ## Planning model
//!
//! One call to [`Planner::plan`] is a single synchronous computation that
//! runs to completion and returns either a concrete plan or an explicit
//! "no plan" error. It performs no I/O and holds no shared mutable state, so
//! one planner instance per agent can run on separate threads concurrently.
//! Replanning is the caller's concern: discard the old plan, rebuild the
//! action set from the world's current targets, and call `plan` again with
//! the agent's true current state.
//!
//! ## Basic Usage
//!
//! ```
//! use goap_spatial::{Action, Facts, Goal, Planner, State};
//! use glam::Vec3;
//!
//! let enemy = Vec3::new(20.0, 0.0, 0.0);
//!
//! let mut go_to_enemy = Action::new("go_to_enemy", 2.0, enemy).unwrap();
//! go_to_enemy.effects.set("at_enemy", true);
//!
//! let mut melee = Action::new("melee_attack", 1.0, enemy).unwrap();
//! melee.preconditions.set("at_enemy", true);
//! melee.effects.set("enemy_defeated", true);
//!
//! let planner = Planner::new(vec![go_to_enemy, melee]).unwrap();
//!
//! let initial = State::new(Facts::new(), Vec3::ZERO);
//! let mut goal = Goal::new();
//! goal.set("enemy_defeated", true);
//!
//! let plan = planner.plan(&initial, &goal).unwrap();
//! assert_eq!(plan.len(), 2);
//! // 2 base + 20 travel, then 1 base + 0 travel (already at the target)
//! assert_eq!(plan.total_cost(), 23.0);
//! ```

use crate::search::{AStarSearch, SearchAlgorithm};
use crate::{Action, Goal, Result, State, Vocabulary};

/// One step of a reconstructed plan: the action to perform and the state the
/// world is expected to be in afterwards.
///
/// The outcome state's position is always the action's target position, so
/// the execution layer knows where each step leaves the agent.
#[derive(Debug, Clone)]
pub struct PlanStep {
    /// The action to perform
    pub action: Action,
    /// The expected state after performing the action
    pub outcome: State,
}

/// An ordered action sequence from the initial state to a goal-satisfying
/// state, with its total cost.
///
/// The total cost is the goal node's accumulated path cost: the sum of
/// [`edge_cost`](crate::cost::edge_cost) over the steps as evaluated during
/// the search.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    steps: Vec<PlanStep>,
    total_cost: f32,
}

impl Plan {
    /// Assembles a plan from reconstructed steps and the goal node's cost.
    pub fn new(steps: Vec<PlanStep>, total_cost: f32) -> Self {
        Self { steps, total_cost }
    }

    /// The empty plan, returned when the initial state already satisfies
    /// the goal.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The plan's steps in execution order.
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Cumulative cost of the whole plan.
    pub fn total_cost(&self) -> f32 {
        self.total_cost
    }

    /// Number of steps in the plan.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the zero-step plan.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The planning entry point: an immutable action catalog plus a search
/// algorithm.
///
/// Construction is fallible because it is also the validation gate:
/// malformed actions (negative base cost or target radius, and with
/// [`Planner::with_vocabulary`] unknown fact keys) are rejected here, before
/// any search runs.
///
/// # Examples
///
/// ```
/// use goap_spatial::{Action, Facts, Goal, Planner, State};
/// use glam::Vec3;
///
/// let mut light_fire = Action::new("light_fire", 1.0, Vec3::ZERO).unwrap();
/// light_fire.preconditions.set("has_matches", true);
/// light_fire.effects.set("fire_lit", true);
///
/// let planner = Planner::new(vec![light_fire]).unwrap();
///
/// let initial = State::new([("has_matches", true)].into_iter().collect(), Vec3::ZERO);
/// let mut goal = Goal::new();
/// goal.set("fire_lit", true);
///
/// let plan = planner.plan(&initial, &goal).unwrap();
/// assert_eq!(plan.steps()[0].action.name, "light_fire");
/// ```
pub struct Planner {
    /// Available actions for this planning cycle
    actions: Vec<Action>,
    /// The algorithm used to search for a plan
    search_algorithm: Box<dyn SearchAlgorithm + Send + Sync>,
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

impl Planner {
    /// Creates a planner over the given action catalog using A* search.
    ///
    /// # Errors
    ///
    /// Returns the first structural configuration error found: a negative
    /// base cost or a negative target radius.
    pub fn new(actions: Vec<Action>) -> Result<Self> {
        for action in &actions {
            action.validate_costs()?;
        }
        Ok(Self {
            actions,
            search_algorithm: Box::new(AStarSearch::default()),
        })
    }

    /// Creates a planner, additionally checking every precondition and
    /// effect key against the world's fact vocabulary.
    ///
    /// # Errors
    ///
    /// Structural errors as in [`Planner::new`], plus
    /// [`crate::GoapError::UnknownFact`] for the first out-of-vocabulary key.
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_spatial::{Action, Planner, Vocabulary};
    /// use glam::Vec3;
    ///
    /// let vocab: Vocabulary = ["fire_lit"].into_iter().collect();
    ///
    /// let mut typo = Action::new("light_fire", 1.0, Vec3::ZERO).unwrap();
    /// typo.effects.set("fire_litt", true);
    ///
    /// assert!(Planner::with_vocabulary(vec![typo], &vocab).is_err());
    /// ```
    pub fn with_vocabulary(actions: Vec<Action>, vocabulary: &Vocabulary) -> Result<Self> {
        for action in &actions {
            action.validate(vocabulary)?;
        }
        Ok(Self {
            actions,
            search_algorithm: Box::new(AStarSearch::default()),
        })
    }

    /// Creates a planner with a custom search algorithm.
    ///
    /// # Errors
    ///
    /// Same structural validation as [`Planner::new`].
    pub fn with_search_algorithm(
        actions: Vec<Action>,
        search_algorithm: Box<dyn SearchAlgorithm + Send + Sync>,
    ) -> Result<Self> {
        for action in &actions {
            action.validate_costs()?;
        }
        Ok(Self {
            actions,
            search_algorithm,
        })
    }

    /// The catalog this planner searches over.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Finds a plan transforming `initial` into a state satisfying `goal`.
    ///
    /// Returns the empty plan if the goal is already satisfied.
    ///
    /// # Errors
    ///
    /// * [`crate::GoapError::NoPlanFound`] when the goal is unreachable from
    ///   `initial` under this catalog. This is an expected outcome, not a
    ///   crash condition; the caller decides the fallback.
    /// * [`crate::GoapError::SearchBudgetExhausted`] when the configured
    ///   search carries an expansion budget and ran out.
    pub fn plan(&self, initial: &State, goal: &Goal) -> Result<Plan> {
        log::debug!(
            "planning: {} actions, {} goal facts, agent at {:?}",
            self.actions.len(),
            goal.required().len(),
            initial.position()
        );
        self.search_algorithm.search(&self.actions, initial, goal)
    }
}

/// Cloning preserves the actions but resets the search algorithm to the
/// default A*, since the boxed trait object cannot be cloned.
impl Clone for Planner {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
            search_algorithm: Box::new(AStarSearch::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DijkstraSearch;
    use crate::{Facts, GoapError};
    use glam::Vec3;

    fn make_action(
        name: &str,
        base_cost: f32,
        target: Vec3,
        pre: Vec<(&str, bool)>,
        eff: Vec<(&str, bool)>,
    ) -> Action {
        let mut action = Action::new(name, base_cost, target).unwrap();
        for (k, v) in pre {
            action.preconditions.set(k, v);
        }
        for (k, v) in eff {
            action.effects.set(k, v);
        }
        action
    }

    #[test]
    fn test_simple_plan() {
        // a -> b -> c, all at the agent's position
        let a = make_action("a", 1.0, Vec3::ZERO, vec![("start", true)], vec![("mid", true)]);
        let b = make_action("b", 1.0, Vec3::ZERO, vec![("mid", true)], vec![("end", true)]);
        let c = make_action("c", 1.0, Vec3::ZERO, vec![("end", true)], vec![("goal", true)]);
        let planner = Planner::new(vec![a, b, c]).unwrap();

        let initial = State::new([("start", true)].into_iter().collect(), Vec3::ZERO);
        let mut goal = Goal::new();
        goal.set("goal", true);

        let plan = planner.plan(&initial, &goal).unwrap();
        let names: Vec<_> = plan.steps().iter().map(|s| s.action.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(plan.total_cost(), 3.0);
    }

    #[test]
    fn test_no_plan_found() {
        let a = make_action("a", 1.0, Vec3::ZERO, vec![("foo", true)], vec![("bar", true)]);
        let planner = Planner::new(vec![a]).unwrap();

        let initial = State::new([("foo", false)].into_iter().collect(), Vec3::ZERO);
        let mut goal = Goal::new();
        goal.set("bar", true);

        let result = planner.plan(&initial, &goal);
        assert!(matches!(result, Err(GoapError::NoPlanFound)));
    }

    #[test]
    fn test_construction_rejects_negative_radius() {
        let mut a = make_action("a", 1.0, Vec3::ZERO, vec![], vec![("x", true)]);
        a.target_radius = -1.0;
        assert!(matches!(
            Planner::new(vec![a]),
            Err(GoapError::NegativeTargetRadius(_))
        ));
    }

    #[test]
    fn test_vocabulary_gate() {
        let vocab: Vocabulary = ["known"].into_iter().collect();
        let good = make_action("good", 1.0, Vec3::ZERO, vec![], vec![("known", true)]);
        assert!(Planner::with_vocabulary(vec![good], &vocab).is_ok());

        let bad = make_action("bad", 1.0, Vec3::ZERO, vec![("unknown", true)], vec![]);
        let err = Planner::with_vocabulary(vec![bad], &vocab).unwrap_err();
        match err {
            GoapError::UnknownFact { action, fact } => {
                assert_eq!(action, "bad");
                assert_eq!(fact, "unknown");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_plan_steps_carry_outcome_states() {
        let target = Vec3::new(5.0, 0.0, 0.0);
        let go = make_action("go", 1.0, target, vec![], vec![("there", true)]);
        let planner = Planner::new(vec![go]).unwrap();

        let initial = State::new(Facts::new(), Vec3::ZERO);
        let mut goal = Goal::new();
        goal.set("there", true);

        let plan = planner.plan(&initial, &goal).unwrap();
        let step = &plan.steps()[0];
        assert_eq!(step.outcome.facts().get("there"), Some(true));
        assert_eq!(step.outcome.position(), target);
    }

    #[test]
    fn test_different_search_algorithms_agree() {
        let a = make_action("a", 1.0, Vec3::ZERO, vec![("start", true)], vec![("goal", true)]);
        let b = make_action("b", 5.0, Vec3::ZERO, vec![("start", true)], vec![("goal", true)]);
        let actions = vec![a, b];

        let initial = State::new([("start", true)].into_iter().collect(), Vec3::ZERO);
        let mut goal = Goal::new();
        goal.set("goal", true);

        let astar = Planner::new(actions.clone()).unwrap();
        assert_eq!(astar.plan(&initial, &goal).unwrap().steps()[0].action.name, "a");

        let dijkstra =
            Planner::with_search_algorithm(actions, Box::new(DijkstraSearch)).unwrap();
        assert_eq!(
            dijkstra.plan(&initial, &goal).unwrap().steps()[0].action.name,
            "a"
        );
    }

    #[test]
    fn test_clone_preserves_actions() {
        let a = make_action("a", 1.0, Vec3::ZERO, vec![], vec![("goal", true)]);
        let planner = Planner::new(vec![a]).unwrap();
        let cloned = planner.clone();

        let initial = State::new(Facts::new(), Vec3::ZERO);
        let mut goal = Goal::new();
        goal.set("goal", true);

        assert_eq!(cloned.plan(&initial, &goal).unwrap().len(), 1);
        assert_eq!(cloned.actions().len(), 1);
    }
}
