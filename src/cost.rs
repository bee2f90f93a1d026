//! Edge cost computation: base action cost plus clamped travel cost.
//!
//! This is the piece that folds geometry into an otherwise symbolic search.
//! A nominally cheap action far across the map can lose to a nominally
//! expensive one right next to the agent, because the distance between the
//! agent and the action's target is charged on the edge.

use crate::{Action, State};

/// Computes the cost of applying `action` from `from`.
///
/// The travel component is the Euclidean distance from the agent's position
/// to the action's target, discounted by the target radius and clamped at
/// zero. The clamp is mandatory: being inside the radius must yield exactly
/// `base_cost`, never less, or the monotonic-cost assumption behind A* (and
/// with it plan optimality) is corrupted.
///
/// # Examples
///
/// ```
/// use goap_spatial::{cost::edge_cost, Action, Facts, State};
/// use glam::Vec3;
///
/// let mut action = Action::new("pick_up", 5.0, Vec3::new(3.0, 0.0, 0.0)).unwrap();
/// action.target_radius = 5.0;
///
/// let state = State::new(Facts::new(), Vec3::ZERO);
/// // Distance 3 is inside the radius of 5: travel is fully absorbed.
/// assert_eq!(edge_cost(&action, &state), 5.0);
/// ```
pub fn edge_cost(action: &Action, from: &State) -> f32 {
    let raw_distance = action.target_position.distance(from.position());
    let travel_cost = (raw_distance - action.target_radius).max(0.0);
    action.base_cost + travel_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Facts;
    use glam::Vec3;

    fn state_at(position: Vec3) -> State {
        State::new(Facts::new(), position)
    }

    #[test]
    fn test_travel_cost_added_to_base() {
        let action = Action::new("go", 20.0, Vec3::new(20.0, 0.0, 0.0)).unwrap();
        let cost = edge_cost(&action, &state_at(Vec3::ZERO));
        assert_eq!(cost, 40.0);
    }

    #[test]
    fn test_inside_radius_costs_exactly_base() {
        let mut action = Action::new("grab", 5.0, Vec3::new(3.0, 0.0, 0.0)).unwrap();
        action.target_radius = 5.0;
        assert_eq!(edge_cost(&action, &state_at(Vec3::ZERO)), 5.0);
    }

    #[test]
    fn test_on_radius_boundary_costs_exactly_base() {
        let mut action = Action::new("grab", 2.0, Vec3::new(4.0, 0.0, 0.0)).unwrap();
        action.target_radius = 4.0;
        assert_eq!(edge_cost(&action, &state_at(Vec3::ZERO)), 2.0);
    }

    #[test]
    fn test_radius_discounts_partial_travel() {
        let mut action = Action::new("approach", 1.0, Vec3::new(10.0, 0.0, 0.0)).unwrap();
        action.target_radius = 4.0;
        assert_eq!(edge_cost(&action, &state_at(Vec3::ZERO)), 7.0);
    }

    #[test]
    fn test_cost_never_below_base() {
        let mut action = Action::new("grab", 0.5, Vec3::ZERO).unwrap();
        action.target_radius = 100.0;
        let cost = edge_cost(&action, &state_at(Vec3::new(1.0, 1.0, 1.0)));
        assert_eq!(cost, 0.5);
    }

    #[test]
    fn test_distance_is_euclidean_in_three_dimensions() {
        let action = Action::new("go", 0.0, Vec3::new(2.0, 3.0, 6.0)).unwrap();
        // |(2, 3, 6)| = 7
        assert_eq!(edge_cost(&action, &state_at(Vec3::ZERO)), 7.0);
    }
}
