use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn empty_state(&self) -> EmptyState {
        match self {
            Filter::All => EmptyState {
                icon: "📝",
                title: "No tasks yet",
                text: "Add a task above to get started!",
            },
            Filter::Active => EmptyState {
                icon: "✅",
                title: "No active tasks",
                text: "All tasks are completed!",
            },
            Filter::Completed => EmptyState {
                icon: "🎉",
                title: "No completed tasks",
                text: "Complete some tasks to see them here!",
            },
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}'")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Placeholder shown instead of an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

/// Everything a view layer needs to draw the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub filter: Filter,
    pub tasks: Vec<Task>,
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub empty_state: Option<EmptyState>,
}
