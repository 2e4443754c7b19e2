pub mod rng;
pub mod transition;
