//! Task list state shared by the browser app and the API server.

pub mod api;
pub mod error;
pub mod manager;
pub mod prompt;
pub mod store;
pub mod task;
pub mod view;

pub use api::{ActionResponse, ConfirmQuery, CreateTaskRequest, SetFilterRequest, UpdateTaskRequest};
pub use error::{Result, StoreError};
pub use manager::{EditSession, Outcome, Skip, TaskList};
pub use prompt::{Notice, Prompt, PromptRecorder, Severity};
pub use store::{KeyValueStore, MemoryStore, STORAGE_KEY};
pub use task::{normalize_text, Clock, SystemClock, Task, TaskId, MAX_TEXT_LEN};
pub use view::{EmptyState, Filter, TaskView, UnknownFilter};
