//! Headless news-globe session.
//!
//! A [`session::GlobeSession`] owns all per-page state (markers, hover,
//! orbit camera, side panel) and is driven by two inputs: an explicit stream
//! of [`input::InputEvent`]s and a per-frame [`session::GlobeSession::tick`].
//! Rendering and the news store stay outside; the session hands out
//! [`render::FrameState`]s and [`panel::NewsRequest`]s for the host to act on.

pub mod config;
pub mod input;
pub mod panel;
pub mod render;
pub mod session;

pub use config::*;
pub use input::*;
pub use panel::*;
pub use render::*;
pub use session::*;
