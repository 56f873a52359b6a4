use crate::markers::{MarkerRegistry, MarkerSpec};

/// The five countries the news globe ships with.
pub fn default_country_markers() -> Vec<MarkerSpec> {
    vec![
        MarkerSpec::new("India", 20.6, 78.96),
        MarkerSpec::new("Russia", 61.524, 105.3188),
        MarkerSpec::new("China", 35.86, 104.19),
        MarkerSpec::new("USA", 38.895, -77.036),
        MarkerSpec::new("Australia", -25.2744, 133.775),
    ]
}

pub fn spawn_country_markers() -> MarkerRegistry {
    MarkerRegistry::build(&default_country_markers())
}
