//! Sensor reading data structures for solar power prediction

use serde::{Deserialize, Serialize};

/// Valid range for ambient temperature, °C
pub const AMBIENT_TEMP_RANGE: (f64, f64) = (-10.0, 60.0);
/// Valid range for module temperature, °C
pub const MODULE_TEMP_RANGE: (f64, f64) = (0.0, 90.0);
/// Valid range for irradiation, W/m²
pub const IRRADIATION_RANGE: (f64, f64) = (0.0, 1500.0);
/// Valid range for hour of day
pub const HOUR_RANGE: (u32, u32) = (0, 23);
/// Valid range for month
pub const MONTH_RANGE: (u32, u32) = (1, 12);

/// One set of environmental readings to predict DC power output for.
///
/// Fields missing from the request body fall back to the same defaults
/// the input form starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Ambient temperature in °C
    #[serde(alias = "AMBIENT_TEMPERATURE", default = "default_ambient_temp")]
    pub ambient_temp: f64,

    /// Module (panel surface) temperature in °C
    #[serde(alias = "MODULE_TEMPERATURE", default = "default_module_temp")]
    pub module_temp: f64,

    /// Solar irradiation in W/m²
    #[serde(alias = "IRRADIATION", default = "default_irradiation")]
    pub irradiation: f64,

    /// Hour of day (0-23)
    #[serde(default = "default_hour")]
    pub hour: u32,

    /// Month (1-12)
    #[serde(default = "default_month")]
    pub month: u32,
}

fn default_ambient_temp() -> f64 {
    25.0
}

fn default_module_temp() -> f64 {
    40.0
}

fn default_irradiation() -> f64 {
    800.0
}

fn default_hour() -> u32 {
    12
}

fn default_month() -> u32 {
    6
}

impl SensorReading {
    /// Return a copy with every field clamped into its valid range.
    ///
    /// Mirrors what the form's number widgets enforce client-side, so that
    /// requests bypassing the page get the same treatment. Values already
    /// in range (bounds included) pass through unchanged.
    pub fn clamped(&self) -> Self {
        Self {
            ambient_temp: self
                .ambient_temp
                .clamp(AMBIENT_TEMP_RANGE.0, AMBIENT_TEMP_RANGE.1),
            module_temp: self
                .module_temp
                .clamp(MODULE_TEMP_RANGE.0, MODULE_TEMP_RANGE.1),
            irradiation: self
                .irradiation
                .clamp(IRRADIATION_RANGE.0, IRRADIATION_RANGE.1),
            hour: self.hour.clamp(HOUR_RANGE.0, HOUR_RANGE.1),
            month: self.month.clamp(MONTH_RANGE.0, MONTH_RANGE.1),
        }
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            ambient_temp: default_ambient_temp(),
            module_temp: default_module_temp(),
            irradiation: default_irradiation(),
            hour: default_hour(),
            month: default_month(),
        }
    }
}
