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

use crate::types::card_id::CardId;
use crate::types::color::Color;

/// A single value card.
///
/// `pinned` is monotonic: once a card is liked it stays liked until the
/// whole list is reset. `recommendation` distinguishes system-suggested
/// cards from user-affirmed ones and gates the like control in the UI.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Card {
    pub id: CardId,
    pub value: u32,
    pub color: Color,
    pub pinned: bool,
    pub recommendation: bool,
}
