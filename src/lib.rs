mod action;
pub mod cost;
mod error;
mod planner;
mod search;
mod state;

pub use action::Action;
pub use error::{GoapError, Result};
pub use planner::{Plan, PlanStep, Planner};
pub use search::{
    AStarSearch, DijkstraSearch, HeuristicStrategy, SearchAlgorithm, UnsatisfiedGoalHeuristic,
    ZeroHeuristic,
};
pub use state::{Facts, Goal, State, Vocabulary};
