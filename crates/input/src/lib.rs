//! Input mapped to actions.
//!
//! The desktop app translates raw keys into [`Action`]s; scenes and cameras
//! consume actions, never raw input events.

pub mod action;

pub use action::{Action, HeldActions};
