pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod services;

// Re-export key types at crate root for convenience
pub use api::config::{OrnamentSplit, TreeConfig};
pub use api::overlay::{OverlayState, WishState, WishTicket};
pub use api::showcase::TreeShowcase;
pub use api::types::{Mode, SceneEvent};
pub use bridge::protocol::{ProtocolLayout, HEADER_FLOATS};
pub use components::color::{palette, Rgb};
pub use components::group::{GroupKind, GroupMotion, SpinRule, VisualGroup};
pub use components::particle::ParticleRecord;
pub use core::rng::Rng;
pub use core::transition::TransitionState;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraUniform, OrbitCamera};
pub use renderer::instance::{InstanceTransform, SnowPoint, TopperInstance};
pub use systems::animate::{evaluate, TreeAnimator};
pub use systems::composition::SceneDescription;
pub use systems::layout::generate_tree;
pub use systems::lighting::{Light, LightState};
pub use systems::topper::Topper;

#[cfg(feature = "phrase")]
pub use services::phrase::{PhraseConfig, PhraseError, PhraseService};
