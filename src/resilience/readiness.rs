use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Both lookup tables loaded.
    Ready,
    /// Cities resolve, but every day falls back to the generic icon.
    Degraded,
    /// No cities known; every lookup fails.
    Unavailable,
}

impl Readiness {
    #[must_use]
    pub fn can_serve_forecasts(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

#[must_use]
pub fn evaluate_readiness(cities: usize, weather_types: usize) -> Readiness {
    if cities == 0 {
        Readiness::Unavailable
    } else if weather_types == 0 {
        Readiness::Degraded
    } else {
        Readiness::Ready
    }
}
