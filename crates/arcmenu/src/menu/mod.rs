pub mod animation;
pub mod hit;
pub mod layout;
pub mod view;

pub use animation::{Animation, AnimationState, Direction, Tick, Transition};
pub use hit::SelectionChange;
pub use layout::{IconSlot, IconVisual, Sector};
pub use view::paint;

pub const RADIUS_STEP: f64 = 10.0; // radius change per animation frame
pub const OVERSAMPLE: f64 = 2.0; // backing pixels per logical pixel
