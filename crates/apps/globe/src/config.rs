use camera::orbit::{
    DRAG_PITCH_LIMIT, DRAG_SENSITIVITY, EASING, FOCUS_OFFSET, FOCUS_PITCH_LIMIT, FOCUS_RADIUS,
    FREE_RADIUS, OrbitSettings,
};
use foundation::math::{MARKER_SURFACE_RADIUS, Vec2};
use news::{DEFAULT_NEWS_LIMIT, TableMap};
use scene::markers::{DEFAULT_HIT_RADIUS, MarkerSpec};
use scene::prefabs::default_country_markers;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryConfig {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// News table for this country; `None` means the panel reports no news.
    #[serde(default)]
    pub table: Option<String>,
}

impl CountryConfig {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        let name = name.into();
        let table = Some(format!("{name}_news"));
        Self {
            name,
            lat,
            lon,
            table,
        }
    }

    pub fn without_table(mut self) -> Self {
        self.table = None;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub sensitivity: f64,
    pub drag_pitch_limit: f64,
    pub focus_pitch_limit: f64,
    pub easing: f64,
    pub free_radius: f64,
    pub focus_radius: f64,
    pub focus_offset: [f64; 2],
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            sensitivity: DRAG_SENSITIVITY,
            drag_pitch_limit: DRAG_PITCH_LIMIT,
            focus_pitch_limit: FOCUS_PITCH_LIMIT,
            easing: EASING,
            free_radius: FREE_RADIUS,
            focus_radius: FOCUS_RADIUS,
            focus_offset: [FOCUS_OFFSET.x, FOCUS_OFFSET.y],
        }
    }
}

/// Session configuration. Every field has a default, so `{}` is a valid
/// config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub countries: Vec<CountryConfig>,
    pub marker_surface_radius: f64,
    pub hit_radius: f64,
    /// Reject marker hits hidden behind the globe.
    pub occlude_with_globe: bool,
    /// Pointer travel (px) after which a press counts as a drag, not a click.
    pub click_slop_px: f64,
    pub news_limit: usize,
    pub event_log_capacity: usize,
    pub orbit: OrbitConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            countries: default_country_markers()
                .into_iter()
                .map(|spec| CountryConfig::new(spec.name, spec.geo.lat_deg, spec.geo.lon_deg))
                .collect(),
            marker_surface_radius: MARKER_SURFACE_RADIUS,
            hit_radius: DEFAULT_HIT_RADIUS,
            occlude_with_globe: false,
            click_slop_px: 3.0,
            news_limit: DEFAULT_NEWS_LIMIT,
            event_log_capacity: 256,
            orbit: OrbitConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GlobeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GlobeConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("marker_surface_radius", self.marker_surface_radius),
            ("hit_radius", self.hit_radius),
            ("orbit.sensitivity", self.orbit.sensitivity),
            ("orbit.drag_pitch_limit", self.orbit.drag_pitch_limit),
            ("orbit.focus_pitch_limit", self.orbit.focus_pitch_limit),
            ("orbit.free_radius", self.orbit.free_radius),
            ("orbit.focus_radius", self.orbit.focus_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }
        if !(self.orbit.easing > 0.0 && self.orbit.easing < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "orbit.easing must be in (0, 1), got {}",
                self.orbit.easing
            )));
        }
        if !(self.click_slop_px.is_finite() && self.click_slop_px >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "click_slop_px must be >= 0, got {}",
                self.click_slop_px
            )));
        }
        if self.news_limit == 0 {
            return Err(ConfigError::Invalid("news_limit must be > 0".to_string()));
        }
        Ok(())
    }

    pub fn marker_specs(&self) -> Vec<MarkerSpec> {
        self.countries
            .iter()
            .map(|c| MarkerSpec::new(c.name.clone(), c.lat, c.lon))
            .collect()
    }

    pub fn table_map(&self) -> TableMap {
        let mut map = TableMap::new();
        for country in &self.countries {
            if let Some(table) = &country.table {
                map.insert(country.name.clone(), table.clone());
            }
        }
        map
    }

    pub fn orbit_settings(&self) -> OrbitSettings {
        OrbitSettings {
            sensitivity: self.orbit.sensitivity,
            drag_pitch_limit: self.orbit.drag_pitch_limit,
            focus_pitch_limit: self.orbit.focus_pitch_limit,
            easing: self.orbit.easing,
            free_radius: self.orbit.free_radius,
            focus_radius: self.orbit.focus_radius,
            focus_offset: Vec2::new(self.orbit.focus_offset[0], self.orbit.focus_offset[1]),
        }
    }
}
