use crate::geometry::{step, Direction};
use crate::sim::SimulationState;

/// Next heading for a hands-off game.
///
/// Keeps the current heading while the cell ahead is free of the body, otherwise takes the
/// first free neighbour in `Right, Down, Left, Up` order. With no free neighbour the current
/// heading is returned unchanged.
pub fn auto_direction(state: &SimulationState) -> Direction {
    let body = state.body();
    let head = body.head().pos;
    let current = state.direction();
    let is_free = |dir: Direction| !body.contains(step(head, dir, state.grid_size()));

    if is_free(current) {
        return current;
    }

    Direction::ALL.iter().copied().find(|&dir| is_free(dir)).unwrap_or(current)
}
