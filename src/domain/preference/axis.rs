//! Taste axis enumeration for the five preference dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five axes a cake preference is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TasteAxis {
    Sweetness,
    Sourness,
    Texture,
    Temperature,
    Artistry,
}

impl TasteAxis {
    /// All axes in canonical order.
    pub const ALL: [TasteAxis; 5] = [
        TasteAxis::Sweetness,
        TasteAxis::Sourness,
        TasteAxis::Texture,
        TasteAxis::Temperature,
        TasteAxis::Artistry,
    ];

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            TasteAxis::Sweetness => "Sweetness",
            TasteAxis::Sourness => "Sourness",
            TasteAxis::Texture => "Texture",
            TasteAxis::Temperature => "Temperature",
            TasteAxis::Artistry => "Artistry",
        }
    }

    /// Returns the canonical position of this axis (0-4).
    pub fn index(&self) -> usize {
        match self {
            TasteAxis::Sweetness => 0,
            TasteAxis::Sourness => 1,
            TasteAxis::Texture => 2,
            TasteAxis::Temperature => 3,
            TasteAxis::Artistry => 4,
        }
    }
}

impl fmt::Display for TasteAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_each_axis_once() {
        assert_eq!(TasteAxis::ALL.len(), 5);
        for (i, axis) in TasteAxis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn axis_displays_label() {
        assert_eq!(format!("{}", TasteAxis::Sweetness), "Sweetness");
        assert_eq!(format!("{}", TasteAxis::Artistry), "Artistry");
    }

    #[test]
    fn axis_serializes_snake_case() {
        let json = serde_json::to_string(&TasteAxis::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
    }
}
