//! JSON bodies exchanged over the HTTP API.

use serde::{Deserialize, Serialize};

use crate::manager::{Outcome, Skip};
use crate::prompt::Notice;
use crate::view::{Filter, TaskView};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetFilterRequest {
    pub filter: Filter,
}

/// Query flag carrying the caller's answer to a confirmation.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub applied: bool,
    pub skipped: Option<Skip>,
    pub notices: Vec<Notice>,
    pub view: TaskView,
}

impl ActionResponse {
    pub fn new<T>(outcome: &Outcome<T>, notices: Vec<Notice>, view: TaskView) -> Self {
        Self {
            applied: outcome.is_applied(),
            skipped: outcome.skipped(),
            notices,
            view,
        }
    }
}
