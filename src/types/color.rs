// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Saturation used for every generated card color.
const SATURATION: u8 = 70;

/// Lightness used for every generated card color.
const LIGHTNESS: u8 = 45;

/// The fixed palette of 14 hues used by the deterministic color scheme.
/// Evenly spaced around the hue circle, so adjacent values are visually
/// distinct.
const PALETTE_HUES: [u16; 14] = [
    0, 26, 51, 77, 103, 129, 154, 180, 206, 231, 257, 283, 309, 334,
];

/// An HSL color. Immutable after creation; renders as a CSS `hsl()` value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl Color {
    pub fn from_hue(hue: u16) -> Self {
        Self {
            hue,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        }
    }
}

/// Deterministic palette lookup: value 1 maps to the first hue, cycling
/// every 14 values.
pub fn palette_color(value: u32) -> Color {
    let index = ((value.max(1) - 1) as usize) % PALETTE_HUES.len();
    Color::from_hue(PALETTE_HUES[index])
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rendering() {
        let color = Color::from_hue(206);
        assert_eq!(color.to_string(), "hsl(206, 70%, 45%)");
    }

    #[test]
    fn test_palette_cycles_every_fourteen_values() {
        assert_eq!(palette_color(1), Color::from_hue(PALETTE_HUES[0]));
        assert_eq!(palette_color(14), Color::from_hue(PALETTE_HUES[13]));
        assert_eq!(palette_color(15), palette_color(1));
        assert_eq!(palette_color(29), palette_color(15));
    }

    #[test]
    fn test_palette_adjacent_values_differ() {
        for value in 1..=14 {
            assert_ne!(palette_color(value), palette_color(value + 1));
        }
    }

    #[test]
    fn test_palette_value_zero_does_not_panic() {
        assert_eq!(palette_color(0), palette_color(1));
    }
}
