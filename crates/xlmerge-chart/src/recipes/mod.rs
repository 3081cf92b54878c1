//! One module per chart recipe.
//!
//! Each recipe extracts what it needs from the dataset first, so data
//! problems surface as typed errors before any drawing happens.

pub(crate) mod bar;
pub(crate) mod heatmap;
pub(crate) mod histogram;
pub(crate) mod line;
pub(crate) mod pie;
pub(crate) mod scatter;
