//! Orbit camera for the news globe: eased yaw/pitch/zoom/offset state and
//! the camera placement and pointer rays derived from it.

pub mod orbit;
pub mod view;

pub use orbit::*;
pub use view::*;
