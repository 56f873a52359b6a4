//! Orbit controller with direct drag and eased target-seeking.
//!
//! Two independent motions drive the state:
//! - Drag: yaw/pitch follow pointer deltas 1:1 (scaled by a sensitivity).
//! - Target-seeking: each frame every field moves a fixed fraction `k` of
//!   the remaining distance toward the target (single-pole exponential decay).
//!
//! An active drag suspends yaw/pitch seeking only; radius and offset keep
//! easing, since they follow the panel (open/closed) rather than the gesture.

use core::f64::consts::FRAC_PI_2;

use foundation::math::{Vec2, Vec3, clamp_symmetric, ease_toward, unwrap_angle_near};

use crate::view::CameraPose;

/// Free-orbit camera distance from the globe center.
pub const FREE_RADIUS: f64 = 3.0;

/// Camera distance while a marker is focused.
pub const FOCUS_RADIUS: f64 = 2.5;

/// Lateral shift while a marker is focused; moves the globe left to make
/// room for the side panel.
pub const FOCUS_OFFSET: Vec2 = Vec2 { x: -1.5, y: 0.0 };

/// Radians of rotation per pointer pixel while dragging.
pub const DRAG_SENSITIVITY: f64 = 0.004;

/// Pitch bound while dragging.
pub const DRAG_PITCH_LIMIT: f64 = 1.2;

/// Pitch bound while seeking a focus target.
pub const FOCUS_PITCH_LIMIT: f64 = FRAC_PI_2;

/// Fraction of the remaining distance covered per frame.
pub const EASING: f64 = 0.05;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitSettings {
    pub sensitivity: f64,
    pub drag_pitch_limit: f64,
    pub focus_pitch_limit: f64,
    pub easing: f64,
    pub free_radius: f64,
    pub focus_radius: f64,
    pub focus_offset: Vec2,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            sensitivity: DRAG_SENSITIVITY,
            drag_pitch_limit: DRAG_PITCH_LIMIT,
            focus_pitch_limit: FOCUS_PITCH_LIMIT,
            easing: EASING,
            free_radius: FREE_RADIUS,
            focus_radius: FOCUS_RADIUS,
            focus_offset: FOCUS_OFFSET,
        }
    }
}

/// Current camera orbit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitState {
    pub yaw: f64,
    pub pitch: f64,
    pub radius: f64,
    pub offset: Vec2,
}

/// Where the orbit is heading after a marker focus.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitTarget {
    pub yaw: f64,
    pub pitch: f64,
    pub radius: f64,
    pub offset: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusError {
    /// The direction had zero length or a non-finite component.
    DegenerateDirection(Vec3),
}

impl std::fmt::Display for FocusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusError::DegenerateDirection(v) => {
                write!(f, "cannot focus on degenerate direction ({}, {}, {})", v.x, v.y, v.z)
            }
        }
    }
}

impl std::error::Error for FocusError {}

#[derive(Debug, Clone)]
pub struct OrbitController {
    settings: OrbitSettings,
    state: OrbitState,
    target: Option<OrbitTarget>,
    dragging: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}

impl OrbitController {
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            settings,
            state: OrbitState {
                yaw: 0.0,
                pitch: 0.0,
                radius: settings.free_radius,
                offset: Vec2::ZERO,
            },
            target: None,
            dragging: false,
        }
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn state(&self) -> OrbitState {
        self.state
    }

    pub fn target(&self) -> Option<OrbitTarget> {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer pressed: yaw/pitch now follow the pointer.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Apply a pointer delta in pixels. Has no effect unless a drag is active.
    pub fn drag(&mut self, dx_px: f64, dy_px: f64) {
        if !self.dragging {
            return;
        }
        self.state.yaw += dx_px * self.settings.sensitivity;
        self.state.pitch = clamp_symmetric(
            self.state.pitch + dy_px * self.settings.sensitivity,
            self.settings.drag_pitch_limit,
        );
    }

    /// Aim at `direction` (from the globe center) and zoom in with the
    /// panel offset applied.
    ///
    /// The target yaw is `atan2(v.x, v.z)` shifted by whole turns to lie
    /// within π of the current yaw, so the eased approach takes the short way.
    pub fn focus(&mut self, direction: Vec3) -> Result<OrbitTarget, FocusError> {
        let v = direction
            .normalized()
            .ok_or(FocusError::DegenerateDirection(direction))?;

        let pitch = clamp_symmetric(v.y.clamp(-1.0, 1.0).asin(), self.settings.focus_pitch_limit);
        let yaw = unwrap_angle_near(v.x.atan2(v.z), self.state.yaw);

        let target = OrbitTarget {
            yaw,
            pitch,
            radius: self.settings.focus_radius,
            offset: self.settings.focus_offset,
        };
        self.target = Some(target);
        Ok(target)
    }

    /// Drop the focus target. Radius and offset ease back to the free-orbit
    /// defaults; yaw/pitch stay where they are.
    pub fn clear(&mut self) {
        self.target = None;
    }

    /// One frame of easing.
    pub fn advance(&mut self) {
        let k = self.settings.easing;

        if let Some(target) = self.target {
            if !self.dragging {
                self.state.yaw = ease_toward(self.state.yaw, target.yaw, k);
                self.state.pitch = clamp_symmetric(
                    ease_toward(self.state.pitch, target.pitch, k),
                    self.settings.focus_pitch_limit,
                );
            }
        }

        let (radius, offset) = match self.target {
            Some(t) => (t.radius, t.offset),
            None => (self.settings.free_radius, Vec2::ZERO),
        };
        self.state.radius = ease_toward(self.state.radius, radius, k);
        self.state.offset = Vec2::new(
            ease_toward(self.state.offset.x, offset.x, k),
            ease_toward(self.state.offset.y, offset.y, k),
        );
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::from_orbit(&self.state)
    }
}
