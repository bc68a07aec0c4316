//! Fairness selection - who does it next.
//!
//! Participants who owe the group more get a larger slice of the wheel, but
//! nobody's slice is ever empty.

#![warn(missing_docs)]

pub mod error;
pub mod weight;
pub mod random;
pub mod roulette;
pub mod wheel;
pub mod selector;

pub use error::{SelectionError, Result};
pub use weight::{compute_weight, WeightPolicy, DEFAULT_FLOOR_WEIGHT};
pub use random::{RandomSource, RngSource, SequenceSource};
pub use roulette::{pick_index, select_at, weighted_random_index, weighted_random_select};
pub use wheel::{
    arc_path, label_anchor, layout_sectors, polar_to_cartesian, rotation_for, Point, Sector,
};
pub use selector::{FairnessSelector, SpinConfig, SpinOutcome, MIN_FULL_SPINS};
