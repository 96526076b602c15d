//! Vehicle listing data structures.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// One page of inventory search results.
///
/// Doubles as the persisted snapshot format; the upstream JSON shape
/// round-trips through it unchanged. `total_matches_found` is taken as
/// reported and never reconciled against `results`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryResults {
    /// Total matches reported by the search
    #[serde(default)]
    pub total_matches_found: u64,

    /// Listings in relevance order
    #[serde(default)]
    pub results: Vec<Vehicle>,
}

/// A single vehicle listing.
///
/// The consumed fields are optional on purpose: the upstream schema is not
/// validated at fetch time, so a gap only surfaces as
/// [`AppError::Malformed`] when the pipeline actually reads the field.
/// Fields the pipeline never reads are retained verbatim in `extra`, keeping
/// snapshots and error records faithful to the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Stable identifier for the physical unit; the sole identity key
    #[serde(rename = "Hash", default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    #[serde(rename = "TrimName", default, skip_serializing_if = "Option::is_none")]
    pub trim_name: Option<String>,

    #[serde(rename = "IsDemo", default, skip_serializing_if = "Option::is_none")]
    pub is_demo: Option<bool>,

    /// Paint color codes
    #[serde(rename = "PAINT", default, skip_serializing_if = "Option::is_none")]
    pub paint: Option<Vec<String>>,

    /// Interior color/material codes
    #[serde(rename = "INTERIOR", default, skip_serializing_if = "Option::is_none")]
    pub interior: Option<Vec<String>>,

    #[serde(rename = "Odometer", default, skip_serializing_if = "Option::is_none")]
    pub odometer: Option<u64>,

    #[serde(
        rename = "OdometerTypeShort",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub odometer_unit: Option<String>,

    #[serde(rename = "Price", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    /// Upstream fields the pipeline does not consume
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Vehicle {
    /// Identity key used for snapshot comparison.
    pub fn identity(&self) -> Result<&str> {
        self.hash
            .as_deref()
            .ok_or_else(|| AppError::malformed("listing has no Hash"))
    }

    /// Human-readable description of the listing.
    ///
    /// Three lines: title with a demo marker, colors, odometer and price.
    pub fn description(&self) -> Result<String> {
        let year = required(self.year, "Year")?;
        let trim_name = required(self.trim_name.as_deref(), "TrimName")?;
        let is_demo = required(self.is_demo, "IsDemo")?;
        let paint = required(self.paint.as_deref(), "PAINT")?;
        let interior = required(self.interior.as_deref(), "INTERIOR")?;
        let odometer = required(self.odometer, "Odometer")?;
        let unit = required(self.odometer_unit.as_deref(), "OdometerTypeShort")?;
        let price = required(self.price, "Price")?;

        let mut title = format!("{year} {trim_name}");
        if is_demo {
            title.push_str(" (demo)");
        }

        let paint = paint.join(", ");
        let interior = interior
            .iter()
            .map(|c| c.strip_prefix("PREMIUM_").unwrap_or(c))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "{title}\n{paint} / {interior}\n{odometer} {unit}, ${price}"
        ))
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| AppError::malformed(format!("listing is missing {name}")))
}
