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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::serve::state::ServerState;
use crate::serve::template::page_template;
use crate::types::card::Card;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let cards = mutable.sorter.cards();
    let total = cards.len();
    let locked = mutable.sorter.generation_locked();
    let handles = mutable.show_drag_handles;
    let body = html! {
        div.root {
            div.header {
                h1 { "Card Sorter" }
                form.toolbar action="/" method="post" {
                    @if handles {
                        button type="submit" name="action" value="toggle-handles" title="Hide drag handles" { "✋" }
                    } @else {
                        button type="submit" name="action" value="toggle-handles" title="Show drag handles" { "👆" }
                    }
                    @if locked {
                        button type="submit" name="action" value="toggle-lock" title="Unlock generation" { "🔒" }
                    } @else {
                        button type="submit" name="action" value="toggle-lock" title="Lock generation" { "🔓" }
                    }
                    button type="submit" name="action" value="get-more" { "Get more" }
                    button type="submit" name="action" value="reset" { "Reset" }
                }
            }
            div.preview {
                @for card in cards {
                    div.preview-card style=(background(card)) {
                        div.value { (card.value) }
                        @if card.pinned {
                            div.badge { "Liked" }
                        }
                    }
                }
            }
            div.cards {
                @for (index, card) in cards.iter().enumerate() {
                    (card_row(index, card, total, handles))
                }
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn background(card: &Card) -> String {
    format!("background-color: {}", card.color)
}

fn card_row(index: usize, card: &Card, total: usize, handles: bool) -> Markup {
    html! {
        div.card-row draggable=(if handles { "true" } else { "false" }) data-id=(card.id) style=(background(card)) {
            form.move-controls action="/" method="post" {
                input type="hidden" name="index" value=(index);
                button type="submit" name="action" value="move-up" title="Move up" disabled[index == 0] { "↑" }
                button type="submit" name="action" value="move-down" title="Move down" disabled[index + 1 == total] { "↓" }
            }
            div.label {
                span.value { (card.value) }
                @if handles {
                    span.handle { "⋮⋮" }
                }
            }
            @if card.pinned {
                div.badge { "Liked" }
            }
            form.card-actions action="/" method="post" {
                input type="hidden" name="index" value=(index);
                @if card.recommendation {
                    @if card.pinned {
                        button type="submit" name="action" value="like" title="Already liked" disabled { "😊" }
                    } @else {
                        button type="submit" name="action" value="like" title="Like this card" { "😊" }
                    }
                }
                @if card.pinned {
                    button type="submit" name="action" value="remove" title="Remove liked card" { "❌" }
                } @else {
                    button type="submit" name="action" value="remove" title="Remove recommendation" { "❌" }
                }
            }
        }
    }
}
