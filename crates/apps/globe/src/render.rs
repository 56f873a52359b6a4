use camera::view::CameraPose;
use foundation::math::Vec3;
use runtime::frame::Frame;
use scene::highlight::{CursorHint, MarkerVisual};
use scene::markers::MarkerId;

use crate::session::GlobeSession;

/// Marker as the renderer should draw it this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: MarkerId,
    pub position: Vec3,
    pub visual: MarkerVisual,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub frame: Frame,
    pub pose: CameraPose,
    /// Column-major view-projection for the current viewport.
    pub view_proj: [[f32; 4]; 4],
    pub markers: Vec<MarkerView>,
    pub cursor: CursorHint,
}

/// Consumer of per-frame state (a GPU renderer, a trace writer, a test).
pub trait FrameSink {
    fn draw(&mut self, frame: &FrameState);
}

impl<F> FrameSink for F
where
    F: FnMut(&FrameState),
{
    fn draw(&mut self, frame: &FrameState) {
        self(frame)
    }
}

/// Drives `tick` and `draw` in lockstep, one call per display refresh.
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    last: Option<Frame>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the frame the next `run_frame` will produce.
    pub fn next_index(&self) -> u64 {
        self.last.map_or(0, |f| f.index + 1)
    }

    pub fn run_frame(
        &mut self,
        session: &mut GlobeSession,
        sink: &mut dyn FrameSink,
        dt_s: f64,
    ) -> Frame {
        let frame = match self.last {
            None => Frame::first(dt_s),
            Some(prev) => prev.next_with_dt(dt_s),
        };
        let state = session.tick(frame);
        sink.draw(&state);
        self.last = Some(frame);
        frame
    }
}
