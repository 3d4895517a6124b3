use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
}

/// Transient user feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// What the manager needs from whoever is in front of the user: a yes/no
/// answer before destructive actions, and somewhere to put feedback.
pub trait Prompt {
    fn confirm(&mut self, question: &str) -> bool;
    fn notify(&mut self, notice: Notice);
}

/// Answers every question the same way and keeps everything it was told.
#[derive(Debug, Clone, Default)]
pub struct PromptRecorder {
    answer: bool,
    pub questions: Vec<String>,
    pub notices: Vec<Notice>,
}

impl PromptRecorder {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Prompt for PromptRecorder {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answer
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
