use crate::markers::MarkerId;

/// Visual state of a marker mesh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MarkerVisual {
    #[default]
    Normal,
    Highlighted,
}

/// Cursor shape over the canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Grab,
    Pointer,
}

/// Hover feedback for the marker set.
///
/// `apply` always resets every marker before highlighting the hit one, so
/// applying the same hit twice leaves the same visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverState {
    visuals: Vec<MarkerVisual>,
    hovered: Option<MarkerId>,
    cursor: CursorHint,
}

impl HoverState {
    pub fn new(marker_count: usize) -> Self {
        Self {
            visuals: vec![MarkerVisual::Normal; marker_count],
            hovered: None,
            cursor: CursorHint::Grab,
        }
    }

    /// Returns `true` if the hovered marker changed.
    pub fn apply(&mut self, hit: Option<MarkerId>) -> bool {
        self.visuals.fill(MarkerVisual::Normal);

        let hit = hit.filter(|id| id.index() < self.visuals.len());
        if let Some(id) = hit {
            self.visuals[id.index()] = MarkerVisual::Highlighted;
        }
        self.cursor = if hit.is_some() {
            CursorHint::Pointer
        } else {
            CursorHint::Grab
        };

        let changed = self.hovered != hit;
        self.hovered = hit;
        changed
    }

    pub fn reset(&mut self) {
        self.apply(None);
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn visual(&self, id: MarkerId) -> MarkerVisual {
        self.visuals.get(id.index()).copied().unwrap_or_default()
    }

    pub fn visuals(&self) -> &[MarkerVisual] {
        &self.visuals
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorHint, HoverState, MarkerVisual};
    use crate::markers::MarkerId;

    #[test]
    fn highlights_only_the_hit_marker() {
        let mut hover = HoverState::new(3);
        assert!(hover.apply(Some(MarkerId(1))));
        assert_eq!(
            hover.visuals(),
            &[MarkerVisual::Normal, MarkerVisual::Highlighted, MarkerVisual::Normal]
        );
        assert_eq!(hover.cursor(), CursorHint::Pointer);

        assert!(hover.apply(Some(MarkerId(2))));
        assert_eq!(hover.visual(MarkerId(1)), MarkerVisual::Normal);
        assert_eq!(hover.visual(MarkerId(2)), MarkerVisual::Highlighted);
    }

    #[test]
    fn apply_is_idempotent() {
        let mut hover = HoverState::new(4);
        hover.apply(Some(MarkerId(3)));
        let first = hover.clone();
        assert!(!hover.apply(Some(MarkerId(3))));
        assert_eq!(hover, first);
    }

    #[test]
    fn reset_clears_highlight_and_cursor() {
        let mut hover = HoverState::new(2);
        hover.apply(Some(MarkerId(0)));
        hover.reset();
        assert_eq!(hover.hovered(), None);
        assert_eq!(hover.cursor(), CursorHint::Grab);
        assert!(hover.visuals().iter().all(|v| *v == MarkerVisual::Normal));
    }

    #[test]
    fn unknown_marker_is_ignored() {
        let mut hover = HoverState::new(2);
        hover.apply(Some(MarkerId(9)));
        assert_eq!(hover.hovered(), None);
        assert_eq!(hover.cursor(), CursorHint::Grab);
    }
}
