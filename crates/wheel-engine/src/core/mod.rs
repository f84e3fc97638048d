pub mod animator;
pub mod geometry;
pub mod resolver;
pub mod rng;
pub mod time;
pub mod wheel;
