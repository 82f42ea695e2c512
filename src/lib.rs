//! Simulation core for a snake living on a wrap-around grid.
//!
//! The body, food and score live in a single [`sim::SimulationState`]; a driver feeds it
//! direction requests and calls [`sim::SimulationState::step`] once per tick. Each segment
//! carries a [`shape::ShapeCode`] that a renderer turns into a sprite.

pub mod autopilot;
pub mod body;
pub mod food;
pub mod geometry;
pub mod shape;
pub mod sim;

pub type GridInt = i16;
pub type Coords = (GridInt, GridInt);

pub const DEFAULT_GRID_SIZE: GridInt = 30;
