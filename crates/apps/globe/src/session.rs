use camera::orbit::OrbitController;
use camera::view::{CameraPose, Viewport};
use foundation::math::{GLOBE_RADIUS, Vec2};
use news::TableMap;
use runtime::event_bus::{EventBus, Stamped};
use runtime::frame::Frame;
use scene::highlight::HoverState;
use scene::markers::{MarkerId, MarkerRegistry};
use scene::picking::{PickOptions, hit_test};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GlobeConfig};
use crate::input::{InputEvent, PointerTracker, Release};
use crate::panel::{ArticleView, NewsRequest, NewsResponse, PanelController, PanelState};
use crate::render::{FrameState, MarkerView};

/// Work the host must carry out on the session's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Run the request and hand the result to [`GlobeSession::apply_news`].
    LoadNews(NewsRequest),
}

/// Entries of the session trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    HoverChanged { marker: Option<String> },
    MarkerSelected { country: String },
    FocusRejected { country: String },
    NewsRequested { seq: u64, table: String },
    NewsApplied { seq: u64 },
    StaleNewsDropped { seq: u64 },
    PanelClosed,
    ArticleOpened { index: usize },
    ArticleClosed,
    Resized { width: f64, height: f64 },
}

/// All state of one globe page: markers, hover, camera, panel.
///
/// Single-threaded by construction. Input, news results and frame ticks are
/// applied in the order the host delivers them.
#[derive(Debug)]
pub struct GlobeSession {
    config: GlobeConfig,
    registry: MarkerRegistry,
    tables: TableMap,
    pick: PickOptions,
    hover: HoverState,
    pointer: PointerTracker,
    orbit: OrbitController,
    panel: PanelController,
    viewport: Viewport,
    frame: Frame,
    events: EventBus<SessionEvent>,
}

impl GlobeSession {
    pub fn new(config: GlobeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let registry = MarkerRegistry::build_with(
            &config.marker_specs(),
            config.marker_surface_radius,
            config.hit_radius,
        );
        let pick = PickOptions {
            occluder_radius: config.occlude_with_globe.then_some(GLOBE_RADIUS),
            ..PickOptions::default()
        };
        info!(markers = registry.len(), "globe session ready");

        Ok(Self {
            tables: config.table_map(),
            hover: HoverState::new(registry.len()),
            pointer: PointerTracker::new(config.click_slop_px),
            orbit: OrbitController::new(config.orbit_settings()),
            panel: PanelController::new(),
            viewport: Viewport::default(),
            frame: Frame::default(),
            events: EventBus::with_capacity(config.event_log_capacity),
            registry,
            pick,
            config,
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn panel(&self) -> &PanelState {
        self.panel.state()
    }

    pub fn article(&self) -> Option<&ArticleView> {
        self.panel.article()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pose(&self) -> CameraPose {
        self.orbit.pose()
    }

    pub fn events(&self) -> impl Iterator<Item = &Stamped<SessionEvent>> + '_ {
        self.events.iter()
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<SessionEvent>> {
        self.events.drain()
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer.press(Vec2::new(x, y));
                self.orbit.begin_drag();
            }
            InputEvent::PointerMove { x, y } => {
                let delta = self.pointer.move_to(Vec2::new(x, y));
                if self.pointer.is_pressed() {
                    self.orbit.drag(delta.x, delta.y);
                } else {
                    self.update_hover();
                }
            }
            InputEvent::PointerUp { x, y } => {
                self.orbit.end_drag();
                if let Release::Click(pos) = self.pointer.release(Vec2::new(x, y)) {
                    if let Some(id) = self.pick_at(pos) {
                        effects.extend(self.select(id));
                    }
                }
                self.update_hover();
            }
            InputEvent::PointerLeave => {
                self.orbit.end_drag();
                self.pointer.leave();
                self.set_hover(None);
            }
            InputEvent::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.emit(SessionEvent::Resized {
                    width: self.viewport.width,
                    height: self.viewport.height,
                });
            }
            InputEvent::ClosePanel => self.close_panel(),
            InputEvent::OpenArticle { index } => {
                self.open_article(index);
            }
            InputEvent::CloseArticle => self.close_article(),
        }
        effects
    }

    /// Focus the camera on a marker and open its panel.
    ///
    /// The camera moves even when the country has no news table.
    pub fn select(&mut self, id: MarkerId) -> Option<SessionEffect> {
        let (name, direction) = {
            let marker = self.registry.get(id)?;
            (marker.name.clone(), marker.geo.direction())
        };
        info!(country = name.as_str(), "marker selected");
        self.emit(SessionEvent::MarkerSelected {
            country: name.clone(),
        });

        if let Err(err) = self.orbit.focus(direction) {
            warn!(country = name.as_str(), error = %err, "camera focus rejected");
            self.emit(SessionEvent::FocusRejected {
                country: name.clone(),
            });
        }

        let request = self
            .panel
            .select(&name, self.tables.table_for(&name), self.config.news_limit)?;
        debug!(seq = request.seq, table = request.table.as_str(), "news requested");
        self.emit(SessionEvent::NewsRequested {
            seq: request.seq,
            table: request.table.clone(),
        });
        Some(SessionEffect::LoadNews(request))
    }

    /// Apply a finished news load. Returns `false` for stale responses.
    pub fn apply_news(&mut self, response: NewsResponse) -> bool {
        let seq = response.seq;
        let applied = self.panel.accept(response);
        self.emit(if applied {
            SessionEvent::NewsApplied { seq }
        } else {
            SessionEvent::StaleNewsDropped { seq }
        });
        applied
    }

    /// Close the panel, release the camera and invalidate in-flight loads.
    pub fn close_panel(&mut self) {
        self.panel.close();
        self.orbit.clear();
        self.emit(SessionEvent::PanelClosed);
    }

    pub fn open_article(&mut self, index: usize) -> Option<&ArticleView> {
        if self.panel.open_article(index).is_none() {
            debug!(index, "no article at index");
            return None;
        }
        self.emit(SessionEvent::ArticleOpened { index });
        self.panel.article()
    }

    pub fn close_article(&mut self) {
        if self.panel.article().is_some() {
            self.panel.close_article();
            self.emit(SessionEvent::ArticleClosed);
        }
    }

    /// Advance one frame and return what to draw.
    pub fn tick(&mut self, frame: Frame) -> FrameState {
        self.frame = frame;
        self.orbit.advance();
        // The globe may have turned under a resting pointer.
        if !self.pointer.is_pressed() {
            self.update_hover();
        }

        let pose = self.orbit.pose();
        FrameState {
            frame,
            pose,
            view_proj: pose.view_proj_matrix(self.viewport.aspect()),
            markers: self
                .registry
                .iter()
                .map(|m| MarkerView {
                    id: m.id,
                    position: m.position,
                    visual: self.hover.visual(m.id),
                })
                .collect(),
            cursor: self.hover.cursor(),
        }
    }

    /// Marker under a canvas position, under the current camera.
    pub fn pick_at(&self, pos_px: Vec2) -> Option<MarkerId> {
        let ray = self.orbit.pose().ray_through(pos_px, self.viewport);
        hit_test(&self.registry, ray, self.pick).map(|hit| hit.marker)
    }

    fn update_hover(&mut self) {
        let hit = self.pointer.position().and_then(|pos| self.pick_at(pos));
        self.set_hover(hit);
    }

    fn set_hover(&mut self, hit: Option<MarkerId>) {
        if self.hover.apply(hit) {
            let marker = hit
                .and_then(|id| self.registry.get(id))
                .map(|m| m.name.clone());
            self.emit(SessionEvent::HoverChanged { marker });
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.events.emit(self.frame, event);
    }
}
