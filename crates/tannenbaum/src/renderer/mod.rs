pub mod camera;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{CameraUniform, OrbitCamera};
pub use instance::{InstanceTransform, SnowPoint, TopperInstance, SNOW_FLOATS};
