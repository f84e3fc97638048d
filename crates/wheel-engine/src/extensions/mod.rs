// extensions/mod.rs
//
// Animation helpers that are not tied to the wheel itself.

pub mod easing;

pub use easing::{Easing, lerp, ease};
