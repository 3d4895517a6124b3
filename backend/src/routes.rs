use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use shared::{
    ActionResponse, ConfirmQuery, CreateTaskRequest, KeyValueStore, Outcome, PromptRecorder,
    SetFilterRequest, Skip, TaskId, TaskList, TaskView, UpdateTaskRequest,
};
use tracing::error;

pub type BoxedStore = Box<dyn KeyValueStore + Send>;

type ActionResult = Result<(StatusCode, Json<ActionResponse>), StatusCode>;

#[derive(Clone)]
pub struct AppState {
    list: Arc<Mutex<TaskList<BoxedStore>>>,
}

impl AppState {
    pub fn new(list: TaskList<BoxedStore>) -> Self {
        Self {
            list: Arc::new(Mutex::new(list)),
        }
    }

    /// Runs `f` against the list off the async workers; store writes may block.
    async fn run<T, F>(&self, f: F) -> Result<T, StatusCode>
    where
        F: FnOnce(&mut TaskList<BoxedStore>) -> shared::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let list = Arc::clone(&self.list);
        tokio::task::spawn_blocking(move || {
            let mut list = list.lock().map_err(|_| {
                error!("task list lock poisoned");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            f(&mut *list).map_err(|e| {
                error!(error = %e, "task list operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })
        })
        .await
        .map_err(|e| {
            error!(error = %e, "task list worker panicked");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
    }

    /// Runs a mutating operation with the caller's confirmation answer and
    /// reports what happened along with the fresh view.
    async fn act<T, F>(&self, confirm: bool, f: F) -> ActionResult
    where
        F: FnOnce(&mut TaskList<BoxedStore>, &mut PromptRecorder) -> shared::Result<Outcome<T>>
            + Send
            + 'static,
        T: Send + 'static,
    {
        let response = self
            .run(move |list| {
                let mut prompt = PromptRecorder::answering(confirm);
                let outcome = f(&mut *list, &mut prompt)?;
                Ok(ActionResponse::new(&outcome, prompt.notices, list.view()))
            })
            .await?;

        let status = match response.skipped {
            Some(Skip::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::OK,
        };
        Ok((status, Json(response)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tasks", get(get_view).post(create_task).delete(clear_all))
        .route("/api/tasks/:id", put(edit_task).delete(delete_task))
        .route("/api/tasks/:id/toggle", post(toggle_task))
        .route("/api/completed", delete(clear_completed))
        .route("/api/filter", put(set_filter))
        .with_state(state)
}

async fn get_view(State(state): State<AppState>) -> Result<Json<TaskView>, StatusCode> {
    state.run(|list| Ok(list.view())).await.map(Json)
}

async fn set_filter(
    State(state): State<AppState>,
    Json(payload): Json<SetFilterRequest>,
) -> Result<Json<TaskView>, StatusCode> {
    state
        .run(move |list| {
            list.set_filter(payload.filter);
            Ok(list.view())
        })
        .await
        .map(Json)
}

async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> ActionResult {
    state
        .act(false, move |list, prompt| list.add(&payload.text, prompt))
        .await
}

async fn toggle_task(Path(id): Path<TaskId>, State(state): State<AppState>) -> ActionResult {
    state
        .act(false, move |list, prompt| list.toggle(id, prompt))
        .await
}

async fn edit_task(
    Path(id): Path<TaskId>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ActionResult {
    state
        .act(false, move |list, prompt| list.edit(id, &payload.text, prompt))
        .await
}

async fn delete_task(
    Path(id): Path<TaskId>,
    Query(query): Query<ConfirmQuery>,
    State(state): State<AppState>,
) -> ActionResult {
    state
        .act(query.confirm, move |list, prompt| list.delete(id, prompt))
        .await
}

async fn clear_completed(
    Query(query): Query<ConfirmQuery>,
    State(state): State<AppState>,
) -> ActionResult {
    state
        .act(query.confirm, |list, prompt| list.clear_completed(prompt))
        .await
}

async fn clear_all(Query(query): Query<ConfirmQuery>, State(state): State<AppState>) -> ActionResult {
    state
        .act(query.confirm, |list, prompt| list.clear_all(prompt))
        .await
}
