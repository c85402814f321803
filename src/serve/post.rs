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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::serve::state::ServerState;
use crate::types::card_id::CardId;

/// The discrete intents the UI can emit. Index-carrying actions read the
/// `index` field from the same form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum Action {
    MoveUp,
    MoveDown,
    Like,
    Remove,
    GetMore,
    ToggleLock,
    ToggleHandles,
    Reset,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    index: Option<usize>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(state, form.action, form.index) {
        Ok(_) => {}
        Err(e) => {
            log::error!("error: {e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: ServerState, action: Action, index: Option<usize>) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    log::debug!("{action:?} index={index:?}");
    match action {
        Action::MoveUp => {
            let index = require_index(index)?;
            if index > 0 {
                mutable.sorter.move_card(index, index - 1);
            }
        }
        Action::MoveDown => {
            let index = require_index(index)?;
            mutable.sorter.move_card(index, index + 1);
        }
        Action::Like => {
            let index = require_index(index)?;
            mutable.sorter.pin_card(index);
        }
        Action::Remove => {
            let index = require_index(index)?;
            mutable.sorter.remove_card(index);
        }
        Action::GetMore => {
            mutable.sorter.regenerate_unpinned();
        }
        Action::ToggleLock => {
            let locked = mutable.sorter.generation_locked();
            mutable.sorter.set_generation_locked(!locked);
        }
        Action::ToggleHandles => {
            mutable.show_drag_handles = !mutable.show_drag_handles;
        }
        Action::Reset => {
            mutable.sorter.reset();
        }
    }
    Ok(())
}

fn require_index(index: Option<usize>) -> Fallible<usize> {
    match index {
        Some(index) => Ok(index),
        None => fail("action is missing a card index."),
    }
}

/// The payload posted by the browser-side drag script after a drop: the
/// full id order as it now appears in the DOM, plus the id of the card the
/// user was dragging.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<CardId>,
    pub dragged: Option<CardId>,
}

pub async fn reorder_handler(State(state): State<ServerState>, body: String) -> StatusCode {
    let request: ReorderRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            log::error!("bad reorder payload: {e}");
            return StatusCode::BAD_REQUEST;
        }
    };
    let mut mutable = state.mutable.lock().unwrap();
    if let Some(dragged) = request.dragged {
        mutable.sorter.drag_started(dragged);
    }
    mutable.sorter.reorder(&request.order);
    mutable.sorter.drag_ended();
    StatusCode::NO_CONTENT
}
