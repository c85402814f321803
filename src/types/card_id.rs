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
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;

use crate::error::ErrorReport;
use crate::error::fail;

/// An opaque card identifier. Stable across reorders, never reused within a
/// sorter instance: ids come from a strictly monotonic counter, so two cards
/// created in the same bulk regeneration can never collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CardId(u64);

impl CardId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(number) = s.strip_prefix("card-") else {
            return fail(format!("Invalid card id: {}", s));
        };
        match number.parse::<u64>() {
            Ok(number) => Ok(CardId(number)),
            Err(_) => fail(format!("Invalid card id: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        CardId::from_str(&string).map_err(serde::de::Error::custom)
    }
}
