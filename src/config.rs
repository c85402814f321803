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

use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::Fallible;

/// How card colors are generated.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Random hue per card, fixed saturation and lightness.
    Random,
    /// Deterministic lookup into a fixed palette of 14 hues, indexed by the
    /// card's value.
    Palette14,
}

/// What happens to the list after a card is removed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicy {
    /// Append a freshly generated card so the list stays at capacity.
    AutoReplace,
    /// Leave the list shorter; a later regeneration refills it.
    NoReplace,
}

/// How "get more" replaces unpinned cards.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RegenerationPolicy {
    /// Replace exactly the highest-valued unpinned card and pin the
    /// replacement.
    SingleHighest,
    /// Replace a random non-empty subset of unpinned cards, then re-sort the
    /// unpinned cards by value across the unpinned slots.
    RandomSubset,
    /// Append fresh cards until the list reaches capacity.
    TopUp,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SorterConfig {
    /// Number of cards in the list.
    pub capacity: usize,
    pub color_scheme: ColorScheme,
    pub removal_policy: RemovalPolicy,
    pub regeneration_policy: RegenerationPolicy,
    /// Treat an explicit move as an implicit like.
    pub move_implies_pin: bool,
    /// Liking a card also clears its recommendation flag.
    pub pin_clears_recommendation: bool,
    /// Seed for the card generator. Random when absent.
    pub seed: Option<u64>,
}

// By default, removal leaves a gap and "get more" tops the list back up.
impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            color_scheme: ColorScheme::Palette14,
            removal_policy: RemovalPolicy::NoReplace,
            regeneration_policy: RegenerationPolicy::TopUp,
            move_implies_pin: false,
            pin_clears_recommendation: false,
            seed: None,
        }
    }
}

pub fn load_config(path: &Path) -> Fallible<SorterConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SorterConfig = toml::from_str(&content)?;
    Ok(config)
}
