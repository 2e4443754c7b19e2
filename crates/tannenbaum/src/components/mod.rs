pub mod color;
pub mod group;
pub mod particle;
