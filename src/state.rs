//! # State Module for Spatially-Aware GOAP
//!
//! This module provides the fundamental data types of the planner: symbolic
//! fact sets, the composite search state, goal predicates, and the fact
//! vocabulary used for configuration validation.
//!
//! ## What is State here?
//!
//! Classic GOAP plans over purely symbolic states: sets of boolean facts such
//! as "has ammo" or "enemy defeated". This planner extends that picture with
//! one positional value per state, so that travel distance can participate in
//! the cost of a plan. A [`State`] is therefore a pair:
//!
//! - **facts**: a mapping from fact key to boolean value
//! - **position**: the agent's position in world space (a [`glam::Vec3`])
//!
//! Preconditions, effects and goals remain purely symbolic and use the
//! position-less [`Facts`] type.
//!
//! ## Keeping the position dimension finite
//!
//! During a search, the position of every generated state is always the
//! `target_position` of the action that produced it, never an interpolated
//! point. Positions therefore form a finite set (the initial position plus
//! one per candidate action), which is what allows exact equality and
//! bit-exact hashing on the position without any epsilon logic.
//!
//! ## Basic Usage
//!
//! ```
//! use goap_spatial::{Facts, Goal, State};
//! use glam::Vec3;
//!
//! // The agent's current symbolic facts
//! let mut facts = Facts::new();
//! facts.set("has_weapon", true);
//! facts.set("enemy_defeated", false);
//!
//! // ...bound to its current position
//! let state = State::new(facts, Vec3::new(2.0, 0.0, 1.0));
//!
//! // The goal only constrains facts, never position
//! let mut goal = Goal::new();
//! goal.set("enemy_defeated", true);
//!
//! assert!(!goal.is_satisfied_by(&state));
//! assert_eq!(goal.unsatisfied_count(&state), 1);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use glam::Vec3;
use ordered_float::OrderedFloat;

/// An ordered set of boolean fact assignments.
///
/// `Facts` is the symbolic half of the planner's world model and is used in
/// four roles: the fact component of a [`State`], action preconditions,
/// action effects, and (wrapped in [`Goal`]) the goal predicate.
///
/// Keys are strings naming propositions about the world ("has_ammo",
/// "door_open"); values are their truth assignment. The backing map is a
/// `BTreeMap` so iteration order, equality and hashing are deterministic,
/// which the planner relies on for reproducible plans.
///
/// # Examples
///
/// ```
/// use goap_spatial::Facts;
///
/// let mut facts = Facts::new();
/// facts.set("has_key", true);
/// facts.set("door_open", false);
///
/// assert_eq!(facts.get("has_key"), Some(true));
/// assert_eq!(facts.get("window_open"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Facts {
    values: BTreeMap<String, bool>,
}

impl Facts {
    /// Creates an empty fact set.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets a fact, inserting it or overwriting an existing assignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_spatial::Facts;
    ///
    /// let mut facts = Facts::new();
    /// facts.set("has_ammo", true);
    /// facts.set("has_ammo", false); // ammo spent
    /// assert_eq!(facts.get("has_ammo"), Some(false));
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        self.values.insert(key.into(), value);
    }

    /// Gets the assignment of a fact, or `None` if the fact is unknown.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }

    /// Checks whether this fact set satisfies a set of requirements.
    ///
    /// Every key in `required` must be present here with the matching value.
    /// A missing key fails the check: unknown facts are never implicitly
    /// satisfied. This is the test behind both precondition applicability
    /// and goal satisfaction.
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_spatial::Facts;
    ///
    /// let mut world = Facts::new();
    /// world.set("has_key", true);
    /// world.set("door_open", false);
    ///
    /// let mut required = Facts::new();
    /// required.set("has_key", true);
    /// assert!(world.satisfies(&required));
    ///
    /// // An unknown fact is not satisfied, even though it is not "false"
    /// required.set("torch_lit", true);
    /// assert!(!world.satisfies(&required));
    /// ```
    pub fn satisfies(&self, required: &Facts) -> bool {
        required
            .values
            .iter()
            .all(|(key, value)| self.get(key) == Some(*value))
    }

    /// Returns a new fact set equal to this one overwritten by `effects`.
    ///
    /// The receiver is left untouched; successor states in the search are
    /// built from fresh values, never by mutating a predecessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_spatial::Facts;
    ///
    /// let mut facts = Facts::new();
    /// facts.set("has_key", false);
    ///
    /// let mut effects = Facts::new();
    /// effects.set("has_key", true);
    /// effects.set("door_open", true);
    ///
    /// let after = facts.apply(&effects);
    /// assert_eq!(after.get("has_key"), Some(true));
    /// assert_eq!(after.get("door_open"), Some(true));
    /// assert_eq!(facts.get("has_key"), Some(false)); // unchanged
    /// ```
    pub fn apply(&self, effects: &Facts) -> Facts {
        let mut result = self.clone();
        for (key, value) in effects.values.iter() {
            result.values.insert(key.clone(), *value);
        }
        result
    }

    /// Read-only access to the underlying key/value map.
    pub fn values(&self) -> &BTreeMap<String, bool> {
        &self.values
    }

    /// Returns true if no facts are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of facts set.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Facts {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A composite search state: symbolic facts plus the agent's position.
///
/// States are immutable values. Two states are equal iff their fact maps are
/// equal and their positions are exactly equal; hashing follows the same
/// rule, hashing position components bit-exactly. Exact comparison is safe
/// because the planner only ever assigns positions drawn from the finite set
/// of action target positions (plus the initial position) and performs no
/// arithmetic on them.
///
/// # Examples
///
/// ```
/// use goap_spatial::{Facts, State};
/// use glam::Vec3;
///
/// let mut facts = Facts::new();
/// facts.set("has_ammo", true);
///
/// let a = State::new(facts.clone(), Vec3::ZERO);
/// let b = State::new(facts.clone(), Vec3::ZERO);
/// let c = State::new(facts, Vec3::new(1.0, 0.0, 0.0));
///
/// assert_eq!(a, b);
/// assert_ne!(a, c); // same facts, different position
/// ```
#[derive(Debug, Clone)]
pub struct State {
    facts: Facts,
    position: Vec3,
}

impl State {
    /// Creates a state from a fact set and a position.
    pub fn new(facts: Facts, position: Vec3) -> Self {
        Self { facts, position }
    }

    /// The symbolic facts of this state.
    pub fn facts(&self) -> &Facts {
        &self.facts
    }

    /// The agent position of this state.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns this state relocated to `position`.
    ///
    /// Used by the search layer to snap a successor onto the producing
    /// action's target position.
    pub fn with_position(mut self, position: Vec3) -> State {
        self.position = position;
        self
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.facts == other.facts && self.position == other.position
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.facts.hash(hasher);
        OrderedFloat(self.position.x).hash(hasher);
        OrderedFloat(self.position.y).hash(hasher);
        OrderedFloat(self.position.z).hash(hasher);
    }
}

/// The goal predicate of a planning request.
///
/// A goal is a set of required fact assignments; a state satisfies the goal
/// iff every required key is present in the state's facts with the matching
/// value. Goals never constrain position; travel enters the search through
/// edge costs only.
///
/// # Examples
///
/// ```
/// use goap_spatial::{Facts, Goal, State};
/// use glam::Vec3;
///
/// let mut goal = Goal::new();
/// goal.set("enemy_defeated", true);
///
/// let mut facts = Facts::new();
/// facts.set("enemy_defeated", true);
/// facts.set("has_ammo", false); // extra facts are fine
///
/// assert!(goal.is_satisfied_by(&State::new(facts, Vec3::ZERO)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Goal {
    required: Facts,
}

impl Goal {
    /// Creates an empty goal, satisfied by every state.
    pub fn new() -> Self {
        Self {
            required: Facts::new(),
        }
    }

    /// Requires a fact to hold with the given value.
    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        self.required.set(key, value);
    }

    /// The required fact assignments.
    pub fn required(&self) -> &Facts {
        &self.required
    }

    /// Tests whether a state satisfies every required fact.
    pub fn is_satisfied_by(&self, state: &State) -> bool {
        state.facts().satisfies(&self.required)
    }

    /// Counts the required facts a state does not yet satisfy.
    ///
    /// This is the default search heuristic's estimate of the remaining
    /// symbolic work. It looks at facts only, never at position.
    pub fn unsatisfied_count(&self, state: &State) -> usize {
        self.required
            .values()
            .iter()
            .filter(|(key, value)| state.facts().get(key) != Some(**value))
            .count()
    }
}

impl From<Facts> for Goal {
    fn from(required: Facts) -> Self {
        Self { required }
    }
}

/// The set of fact keys known to the world.
///
/// Actions are validated against a vocabulary before planning: an action
/// whose preconditions or effects reference a key outside the vocabulary is
/// a configuration error and must be rejected before it reaches the search
/// loop (see [`crate::GoapError::UnknownFact`]).
///
/// # Examples
///
/// ```
/// use goap_spatial::Vocabulary;
///
/// let vocab: Vocabulary = ["has_ammo", "enemy_defeated"].into_iter().collect();
/// assert!(vocab.contains("has_ammo"));
/// assert!(!vocab.contains("has_mana"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    keys: BTreeSet<String>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    pub fn new() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }

    /// Adds a fact key to the vocabulary.
    pub fn add(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Returns true if the key is part of the vocabulary.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl<K: Into<String>> FromIterator<K> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
