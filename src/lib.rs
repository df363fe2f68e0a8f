//! Intersection Scheduler Library
//!
//! Discrete-step right-of-way scheduling for a four-way intersection, driven
//! by a log of `addVehicle` and `step` commands.

pub mod simulation;
