use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Host input fed to [`crate::session::GlobeSession::handle_input`].
///
/// Positions are canvas pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    Resize { width: f64, height: f64 },
    ClosePanel,
    OpenArticle { index: usize },
    CloseArticle,
}

/// What a pointer release turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    Click(Vec2),
    DragEnd,
    /// Release without a matching press (e.g. the press happened off-canvas).
    Stray,
}

/// Press/drag/click bookkeeping for a single pointer.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    slop_px: f64,
    position: Option<Vec2>,
    press: Option<Press>,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    travelled: f64,
    dragged: bool,
}

impl PointerTracker {
    pub fn new(slop_px: f64) -> Self {
        Self {
            slop_px: slop_px.max(0.0),
            position: None,
            press: None,
        }
    }

    /// Last known pointer position over the canvas.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragged)
    }

    pub fn press(&mut self, pos: Vec2) {
        self.position = Some(pos);
        self.press = Some(Press {
            travelled: 0.0,
            dragged: false,
        });
    }

    /// Records a move and returns the pixel delta since the previous position.
    pub fn move_to(&mut self, pos: Vec2) -> Vec2 {
        let delta = self.position.map_or(Vec2::ZERO, |prev| pos - prev);
        self.position = Some(pos);
        if let Some(press) = self.press.as_mut() {
            press.travelled += delta.length();
            if press.travelled > self.slop_px {
                press.dragged = true;
            }
        }
        delta
    }

    pub fn release(&mut self, pos: Vec2) -> Release {
        self.position = Some(pos);
        match self.press.take() {
            Some(press) if press.dragged => Release::DragEnd,
            Some(_) => Release::Click(pos),
            None => Release::Stray,
        }
    }

    pub fn leave(&mut self) {
        self.position = None;
        self.press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{InputEvent, PointerTracker, Release};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    #[test]
    fn small_jitter_still_counts_as_click() {
        let mut tracker = PointerTracker::new(3.0);
        tracker.press(Vec2::new(100.0, 100.0));
        tracker.move_to(Vec2::new(101.0, 100.0));
        tracker.move_to(Vec2::new(101.0, 101.0));
        assert!(!tracker.is_dragging());
        assert_eq!(
            tracker.release(Vec2::new(101.0, 101.0)),
            Release::Click(Vec2::new(101.0, 101.0))
        );
    }

    #[test]
    fn travel_past_slop_becomes_drag() {
        let mut tracker = PointerTracker::new(3.0);
        tracker.press(Vec2::new(0.0, 0.0));
        let delta = tracker.move_to(Vec2::new(10.0, -4.0));
        assert_eq!(delta, Vec2::new(10.0, -4.0));
        assert!(tracker.is_dragging());
        // Returning to the start does not undo the drag.
        tracker.move_to(Vec2::new(0.0, 0.0));
        assert_eq!(tracker.release(Vec2::new(0.0, 0.0)), Release::DragEnd);
    }

    #[test]
    fn release_without_press_is_stray() {
        let mut tracker = PointerTracker::new(3.0);
        assert_eq!(tracker.release(Vec2::new(5.0, 5.0)), Release::Stray);

        tracker.press(Vec2::new(5.0, 5.0));
        tracker.leave();
        assert_eq!(tracker.position(), None);
        assert_eq!(tracker.release(Vec2::new(5.0, 5.0)), Release::Stray);
    }

    #[test]
    fn events_decode_from_tagged_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                {"type": "pointer_down", "x": 1.0, "y": 2.0},
                {"type": "resize", "width": 800.0, "height": 600.0},
                {"type": "open_article", "index": 3},
                {"type": "close_panel"}
            ]"#,
        )
        .expect("events");
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { x: 1.0, y: 2.0 },
                InputEvent::Resize {
                    width: 800.0,
                    height: 600.0
                },
                InputEvent::OpenArticle { index: 3 },
                InputEvent::ClosePanel,
            ]
        );
    }
}
