//! The remapping core: placement ordering and scaffold splicing.
//!
//! [`planner`] turns a scaffold's validated placements into an ordered splice
//! plan; [`weaver`] executes the plan against the scaffold's raw sequence.

pub mod planner;
pub mod weaver;
