use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoapError {
    /// No sequence of applicable actions reaches a goal-satisfying state.
    /// An expected planning outcome, not a crash condition.
    #[error("No valid plan found to achieve the goal")]
    NoPlanFound,
    /// Configuration error: an action was authored with a negative base cost.
    #[error("Action '{0}' has a negative base cost")]
    NegativeBaseCost(String),
    /// Configuration error: an action was authored with a negative target
    /// radius, which could produce a negative travel cost.
    #[error("Action '{0}' has a negative target radius")]
    NegativeTargetRadius(String),
    /// Configuration error: an action references a fact key outside the
    /// world's known vocabulary.
    #[error("Action '{action}' references unknown fact '{fact}'")]
    UnknownFact { action: String, fact: String },
    /// The search's expansion budget ran out before reaching the goal.
    #[error("Search budget of {0} expansions exhausted before reaching the goal")]
    SearchBudgetExhausted(usize),
}

pub type Result<T> = std::result::Result<T, GoapError>;
