//! # Action Module for Spatially-Aware GOAP
//!
//! An [`Action`] is an immutable descriptor of something the agent can do:
//! symbolic preconditions and effects, a base cost, and a concrete location
//! in the world where the action is performed.
//!
//! ## Target binding
//!
//! Unlike classic GOAP actions, every action here is bound to a
//! `target_position` and a `target_radius`. The position is where the agent
//! must go to perform the action; the radius is the "close enough" tolerance
//! that discounts travel. Candidate gathering (which entity is the target,
//! and where it currently is) happens outside the planner: a fresh action
//! set with re-sampled target positions must be built for each planning
//! cycle if targets may have moved.
//!
//! ## Basic Usage
//!
//! ```
//! use goap_spatial::{Action, Facts, State};
//! use glam::Vec3;
//!
//! let mut pick_up_ammo = Action::new("pick_up_ammo", 2.0, Vec3::new(10.0, 0.0, 0.0)).unwrap();
//! pick_up_ammo.target_radius = 1.5;
//! pick_up_ammo.preconditions.set("ammo_nearby", true);
//! pick_up_ammo.effects.set("has_ammo", true);
//!
//! let mut facts = Facts::new();
//! facts.set("ammo_nearby", true);
//! let state = State::new(facts, Vec3::ZERO);
//!
//! assert!(pick_up_ammo.can_perform(&state));
//! let outcome = pick_up_ammo.apply_effects(&state);
//! assert_eq!(outcome.facts().get("has_ammo"), Some(true));
//! ```

use glam::Vec3;

use crate::{Facts, GoapError, Result, State, Vocabulary};

/// An immutable action descriptor: preconditions, effects, base cost, and
/// the world-space target the action is performed at.
///
/// Actions are constructed once per planning cycle from the currently
/// eligible world targets and treated as read-only for the duration of one
/// planning call. The planner never mutates them.
///
/// The full cost of taking an action from a given state is not `base_cost`
/// alone; travel to `target_position` is added by
/// [`edge_cost`](crate::cost::edge_cost), discounted by `target_radius`.
///
/// # Examples
///
/// ```
/// use goap_spatial::Action;
/// use glam::Vec3;
///
/// let mut melee = Action::new("melee_attack", 1.0, Vec3::new(20.0, 0.0, 0.0)).unwrap();
/// melee.preconditions.set("at_enemy", true);
/// melee.effects.set("enemy_defeated", true);
///
/// // A negative base cost is a configuration error
/// assert!(Action::new("bogus", -1.0, Vec3::ZERO).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Action {
    /// The name of the action, used in plan output and diagnostics
    pub name: String,
    /// The symbolic cost of performing this action, excluding travel
    pub base_cost: f32,
    /// Where in the world this action is performed
    pub target_position: Vec3,
    /// Distance from the target considered "arrived"; discounts travel cost
    pub target_radius: f32,
    /// The facts that must hold for this action to be applicable
    pub preconditions: Facts,
    /// The facts this action sets when applied
    pub effects: Facts,
}

impl Action {
    /// Creates a new action with the given name, base cost and target.
    ///
    /// Preconditions and effects start empty and are filled in through the
    /// public fields; `target_radius` defaults to zero.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::NegativeBaseCost`] if `base_cost` is negative.
    /// Zero is allowed: an action can be symbolically free and still carry
    /// travel cost.
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_spatial::Action;
    /// use glam::Vec3;
    ///
    /// let action = Action::new("go_to_enemy", 20.0, Vec3::new(0.0, 0.0, 20.0)).unwrap();
    /// assert_eq!(action.name, "go_to_enemy");
    /// assert_eq!(action.target_radius, 0.0);
    /// ```
    pub fn new(name: impl Into<String>, base_cost: f32, target_position: Vec3) -> Result<Self> {
        let name = name.into();
        if base_cost < 0.0 {
            return Err(GoapError::NegativeBaseCost(name));
        }

        Ok(Self {
            name,
            base_cost,
            target_position,
            target_radius: 0.0,
            preconditions: Facts::new(),
            effects: Facts::new(),
        })
    }

    /// Checks if this action can be performed in the given state.
    ///
    /// True iff every precondition key exists in the state's facts with the
    /// matching value. Missing keys fail the check.
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_spatial::{Action, Facts, State};
    /// use glam::Vec3;
    ///
    /// let mut action = Action::new("reload", 1.0, Vec3::ZERO).unwrap();
    /// action.preconditions.set("has_ammo", true);
    ///
    /// let armed = State::new([("has_ammo", true)].into_iter().collect(), Vec3::ZERO);
    /// let empty = State::new(Facts::new(), Vec3::ZERO);
    ///
    /// assert!(action.can_perform(&armed));
    /// assert!(!action.can_perform(&empty));
    /// ```
    pub fn can_perform(&self, state: &State) -> bool {
        state.facts().satisfies(&self.preconditions)
    }

    /// Returns a new state with this action's effects applied.
    ///
    /// The input state is not modified. The returned state keeps the input's
    /// position; the snap to `target_position` is part of successor
    /// generation in the search layer, not of effect application.
    pub fn apply_effects(&self, state: &State) -> State {
        State::new(state.facts().apply(&self.effects), state.position())
    }

    /// Validates this action against the world's known fact vocabulary.
    ///
    /// This is the configuration gate from the error taxonomy: actions with
    /// a negative base cost or target radius, or referencing a fact key the
    /// world does not know, must be rejected here before they are handed to
    /// the planner. Cost and radius are re-checked because the fields are
    /// public.
    ///
    /// # Errors
    ///
    /// * [`GoapError::NegativeBaseCost`] / [`GoapError::NegativeTargetRadius`]
    ///   for sign violations
    /// * [`GoapError::UnknownFact`] for the first precondition or effect key
    ///   missing from `vocabulary`
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_spatial::{Action, Vocabulary};
    /// use glam::Vec3;
    ///
    /// let vocab: Vocabulary = ["has_ammo"].into_iter().collect();
    ///
    /// let mut action = Action::new("reload", 1.0, Vec3::ZERO).unwrap();
    /// action.effects.set("has_ammo", true);
    /// assert!(action.validate(&vocab).is_ok());
    ///
    /// action.effects.set("has_mana", true);
    /// assert!(action.validate(&vocab).is_err());
    /// ```
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<()> {
        self.validate_costs()?;
        for key in self
            .preconditions
            .values()
            .keys()
            .chain(self.effects.values().keys())
        {
            if !vocabulary.contains(key) {
                return Err(GoapError::UnknownFact {
                    action: self.name.clone(),
                    fact: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Checks the sign constraints on `base_cost` and `target_radius`.
    pub(crate) fn validate_costs(&self) -> Result<()> {
        if self.base_cost < 0.0 {
            return Err(GoapError::NegativeBaseCost(self.name.clone()));
        }
        if self.target_radius < 0.0 {
            return Err(GoapError::NegativeTargetRadius(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_action() {
        let action = Action::new("test_action", 1.0, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(action.name, "test_action");
        assert_eq!(action.base_cost, 1.0);
        assert_eq!(action.target_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(action.target_radius, 0.0);
        assert!(action.preconditions.is_empty());
        assert!(action.effects.is_empty());
    }

    #[test]
    fn test_zero_base_cost_is_allowed() {
        assert!(Action::new("free", 0.0, Vec3::ZERO).is_ok());
    }

    #[test]
    fn test_negative_base_cost_is_rejected() {
        let result = Action::new("test_action", -1.0, Vec3::ZERO);
        assert!(matches!(result, Err(GoapError::NegativeBaseCost(_))));
    }

    #[test]
    fn test_can_perform_with_empty_preconditions() {
        let action = Action::new("test_action", 1.0, Vec3::ZERO).unwrap();
        let state = State::new(Facts::new(), Vec3::ZERO);
        assert!(action.can_perform(&state));
    }

    #[test]
    fn test_can_perform_with_matching_preconditions() {
        let mut action = Action::new("test_action", 1.0, Vec3::ZERO).unwrap();
        action.preconditions.set("has_tool", true);

        let state = State::new([("has_tool", true)].into_iter().collect(), Vec3::ZERO);
        assert!(action.can_perform(&state));
    }

    #[test]
    fn test_can_perform_with_unmatching_preconditions() {
        let mut action = Action::new("test_action", 1.0, Vec3::ZERO).unwrap();
        action.preconditions.set("has_tool", true);

        let state = State::new([("has_tool", false)].into_iter().collect(), Vec3::ZERO);
        assert!(!action.can_perform(&state));
    }

    #[test]
    fn test_can_perform_with_missing_preconditions() {
        let mut action = Action::new("test_action", 1.0, Vec3::ZERO).unwrap();
        action.preconditions.set("has_tool", true);

        let state = State::new(Facts::new(), Vec3::ZERO);
        assert!(!action.can_perform(&state));
    }

    #[test]
    fn test_apply_effects_returns_new_state() {
        let mut action = Action::new("test_action", 1.0, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        action.effects.set("has_result", true);

        let state = State::new([("has_result", false)].into_iter().collect(), Vec3::ZERO);
        let outcome = action.apply_effects(&state);

        assert_eq!(outcome.facts().get("has_result"), Some(true));
        assert_eq!(state.facts().get("has_result"), Some(false));
        // Position is untouched here; the search layer does the snap.
        assert_eq!(outcome.position(), Vec3::ZERO);
    }

    #[test]
    fn test_validate_against_vocabulary() {
        let vocab: Vocabulary = ["has_tool", "has_result"].into_iter().collect();

        let mut action = Action::new("test_action", 1.0, Vec3::ZERO).unwrap();
        action.preconditions.set("has_tool", true);
        action.effects.set("has_result", true);
        assert!(action.validate(&vocab).is_ok());

        action.preconditions.set("has_magic", true);
        let err = action.validate(&vocab).unwrap_err();
        assert!(matches!(err, GoapError::UnknownFact { .. }));
    }

    #[test]
    fn test_validate_rejects_negative_radius() {
        let vocab = Vocabulary::new();
        let mut action = Action::new("test_action", 1.0, Vec3::ZERO).unwrap();
        action.target_radius = -0.5;
        assert!(matches!(
            action.validate(&vocab),
            Err(GoapError::NegativeTargetRadius(_))
        ));
    }
}
