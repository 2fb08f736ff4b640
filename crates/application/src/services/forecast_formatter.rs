//! Forecast formatting utilities
//!
//! Pure functions turning weather reports into terminal text.

use chrono::{DateTime, FixedOffset};
use domain::{Place, UnitSystem, WeatherCondition};
use serde::{Deserialize, Serialize};

use super::forecast_service::WeatherReport;
use crate::ports::{CurrentWeather, DailyForecast};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Options for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Prefix conditions and headers with emoji
    pub emoji: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { emoji: true }
    }
}

// ── Current conditions ──────────────────────────────────────────

/// Format current conditions for a place
#[must_use]
pub fn format_current(report: &WeatherReport, options: FormatOptions) -> String {
    [
        format_header(&report.place, options),
        format_conditions(
            &report.current,
            report.units,
            report.timezone_abbreviation.as_deref(),
            options,
        ),
    ]
    .join("\n")
}

/// Place name with its coordinates
fn format_header(place: &Place, options: FormatOptions) -> String {
    let pin = if options.emoji { "📍 " } else { "" };
    let coordinates = place.location.to_string();
    let name = place.display_name();
    let mut header = if name == coordinates {
        format!("{pin}{coordinates}")
    } else {
        format!("{pin}{name} ({coordinates})")
    };
    if let Some(ref tz) = place.timezone {
        header.push_str(&format!(" · {tz}"));
    }
    header
}

fn format_conditions(
    current: &CurrentWeather,
    units: UnitSystem,
    tz_abbreviation: Option<&str>,
    options: FormatOptions,
) -> String {
    let observed = match tz_abbreviation {
        Some(abbr) => format!("{} {abbr}", current.observed_at.format("%H:%M")),
        None => current.observed_at.format("%H:%M").to_string(),
    };

    let gusts = if current.wind_gusts.round() > current.wind_speed.round() {
        format!(" (gusts {})", speed(current.wind_gusts, units))
    } else {
        String::new()
    };

    format!(
        "Now ({observed}): {}, {} (feels like {}), humidity {}%, wind {} {}{gusts}, \
         precipitation {}, cloud cover {}%, pressure {} hPa",
        condition_label(current.condition, current.is_day, options),
        temperature(current.temperature, units),
        temperature(current.apparent_temperature, units),
        current.humidity,
        speed(current.wind_speed, units),
        compass_direction(current.wind_direction),
        precipitation(current.precipitation, units),
        current.cloud_cover,
        rounded(current.pressure, 0),
    )
}

// ── Forecast ────────────────────────────────────────────────────

/// Format current conditions followed by one line per forecast day
#[must_use]
pub fn format_forecast(report: &WeatherReport, options: FormatOptions) -> String {
    let mut lines = vec![format_current(report, options)];

    if report.daily.is_empty() {
        return lines.join("\n");
    }

    lines.push(String::new());
    lines.extend(
        report
            .daily
            .iter()
            .map(|day| format_day(day, report.units, options)),
    );

    if let Some(sun) = report.daily.first().and_then(|d| format_sun(d, options)) {
        lines.push(String::new());
        lines.push(sun);
    }

    lines.join("\n")
}

fn format_day(day: &DailyForecast, units: UnitSystem, options: FormatOptions) -> String {
    let rain = match day.precipitation_probability {
        Some(p) => format!("{} ({p}%)", precipitation(day.precipitation_sum, units)),
        None => precipitation(day.precipitation_sum, units),
    };

    format!(
        "{}  {:<24} {:>6} / {:<6}  precip {rain}  wind {}",
        day.date.format("%a %d %b"),
        condition_label(day.condition, true, options),
        temperature(day.temperature_max, units),
        temperature(day.temperature_min, units),
        speed(day.wind_speed_max, units),
    )
}

fn format_sun(day: &DailyForecast, options: FormatOptions) -> Option<String> {
    let (rise_icon, set_icon) = if options.emoji {
        ("🌅 ", "🌇 ")
    } else {
        ("", "")
    };

    let parts: Vec<String> = [
        day.sunrise.map(|t| format!("{rise_icon}Sunrise {}", clock(t))),
        day.sunset.map(|t| format!("{set_icon}Sunset {}", clock(t))),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" · "))
}

// ── Places ──────────────────────────────────────────────────────

/// Format geocoding candidates as a numbered list
#[must_use]
pub fn format_places(places: &[Place], options: FormatOptions) -> String {
    if places.is_empty() {
        return "No matching locations found.".to_string();
    }

    let pin = if options.emoji { "📍 " } else { "" };
    places
        .iter()
        .enumerate()
        .map(|(i, place)| {
            let mut line = format!("{}. {pin}{} ({})", i + 1, place.display_name(), place.location);
            if let Some(ref tz) = place.timezone {
                line.push_str(&format!(" {tz}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Helpers ─────────────────────────────────────────────────────

/// 16-point compass name for a meteorological wind direction in degrees
#[must_use]
pub fn compass_direction(degrees: u16) -> &'static str {
    // Each point covers 22.5°, centred on its bearing
    let index = ((u32::from(degrees % 360) * 10 + 112) / 225) % 16;
    COMPASS_POINTS[index as usize]
}

fn condition_label(condition: WeatherCondition, is_day: bool, options: FormatOptions) -> String {
    if !options.emoji {
        return condition.description().to_string();
    }
    let icon = match condition {
        WeatherCondition::ClearSky | WeatherCondition::MainlyClear if !is_day => "🌙",
        other => other.emoji(),
    };
    format!("{icon} {}", condition.description())
}

fn temperature(value: f64, units: UnitSystem) -> String {
    format!("{}{}", rounded(value, 0), units.temperature_symbol())
}

fn speed(value: f64, units: UnitSystem) -> String {
    format!("{} {}", rounded(value, 0), units.wind_speed_symbol())
}

fn precipitation(value: f64, units: UnitSystem) -> String {
    let decimals = match units {
        UnitSystem::Metric => 1,
        UnitSystem::Imperial => 2,
    };
    format!("{} {}", rounded(value, decimals), units.precipitation_symbol())
}

/// Fixed-point rendering without a negative sign on zero
fn rounded(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

fn clock(time: DateTime<FixedOffset>) -> String {
    time.format("%H:%M").to_string()
}
