mod local_store;

use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{
    EditSession, Filter, KeyValueStore, MemoryStore, Notice, Outcome, Prompt, Severity,
    SystemClock, Task, TaskId, TaskList, MAX_TEXT_LEN, STORAGE_KEY,
};
use web_sys::{console, window};

use crate::local_store::LocalStore;

type List = TaskList<Box<dyn KeyValueStore>>;

#[derive(Debug, Clone)]
pub enum Msg {
    SetDraft(String),
    AddTask,
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    EditTask(TaskId),
    SetEditText(String),
    SaveEdit,
    CancelEdit,
    SetFilter(Filter),
    ClearCompleted,
    ClearAll,
    DismissNotice,
    Ignore,
}

/// Confirms with `window.confirm` and queues feedback for the toast.
#[derive(Default)]
struct BrowserPrompt {
    notices: Vec<Notice>,
}

impl Prompt for BrowserPrompt {
    fn confirm(&mut self, question: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(question).ok())
            .unwrap_or(false)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

struct Editing {
    session: EditSession,
    text: String,
}

pub struct Model {
    list: List,
    draft: String,
    editing: Option<Editing>,
    notice: Option<Notice>,
}

impl Model {
    fn new() -> Self {
        Self {
            list: open_list(),
            draft: String::new(),
            editing: None,
            notice: None,
        }
    }

    /// Runs one list operation; its last notice, if any, replaces the toast.
    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut List, &mut BrowserPrompt) -> shared::Result<Outcome<T>>,
    ) -> Option<T> {
        let mut prompt = BrowserPrompt::default();
        let result = op(&mut self.list, &mut prompt);
        if let Err(e) = &result {
            console::error_1(&format!("Failed to save tasks: {}", e).into());
        }
        self.notice = toast_after(&result, prompt.notices);
        result.ok().and_then(Outcome::applied)
    }
}

/// What the toast shows once an operation finishes. A quiet operation
/// clears whatever an earlier one left behind.
fn toast_after<T>(result: &shared::Result<Outcome<T>>, mut notices: Vec<Notice>) -> Option<Notice> {
    match result {
        Ok(_) => notices.pop(),
        Err(_) => Some(Notice::warning("Could not save your tasks!")),
    }
}

fn open_list() -> List {
    let Some(store) = LocalStore::open() else {
        console::warn_1(&"localStorage unavailable, tasks will not be kept".into());
        return in_memory();
    };
    let store: Box<dyn KeyValueStore> = Box::new(store);
    match TaskList::load(store) {
        Ok(list) => list,
        Err(e) => {
            console::error_1(&format!("Ignoring stored tasks: {}", e).into());
            in_memory()
        }
    }
}

fn in_memory() -> List {
    TaskList::empty(Box::new(MemoryStore::new()), STORAGE_KEY, SystemClock)
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        console::log_1(&format!("Todo list ready with {} task(s)", self.list.tasks().len()).into());
        Cmd::none()
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::SetDraft(draft) => {
                self.draft = draft;
            }
            Msg::AddTask => {
                let draft = self.draft.clone();
                if self.apply(|list, prompt| list.add(&draft, prompt)).is_some() {
                    self.draft.clear();
                }
            }
            Msg::ToggleTask(id) => {
                self.apply(|list, prompt| list.toggle(id, prompt));
            }
            Msg::DeleteTask(id) => {
                self.apply(|list, prompt| list.delete(id, prompt));
            }
            Msg::EditTask(id) => {
                if let Some(previous) = self.editing.take() {
                    self.list.cancel_edit(previous.session);
                }
                self.editing = self.list.begin_edit(id).map(|session| Editing {
                    text: session.original().to_string(),
                    session,
                });
            }
            Msg::SetEditText(edited) => {
                if let Some(editing) = self.editing.as_mut() {
                    editing.text = edited;
                }
            }
            Msg::SaveEdit => {
                if let Some(Editing { session, text }) = self.editing.take() {
                    self.apply(|list, prompt| list.commit_edit(session, &text, prompt));
                }
            }
            Msg::CancelEdit => {
                if let Some(editing) = self.editing.take() {
                    self.list.cancel_edit(editing.session);
                }
            }
            Msg::SetFilter(mode) => {
                self.list.set_filter(mode);
            }
            Msg::ClearCompleted => {
                self.apply(|list, prompt| list.clear_completed(prompt));
            }
            Msg::ClearAll => {
                self.apply(|list, prompt| list.clear_all(prompt));
            }
            Msg::DismissNotice => {
                self.notice = None;
            }
            Msg::Ignore => {}
        }
        Cmd::none()
    }

    fn view(&self) -> Node<Msg> {
        let view = self.list.view();
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                self.view_notice(),
                div(
                    [class("max-w-2xl mx-auto px-6 py-8")],
                    [div(
                        [class("bg-ctp-surface0 rounded-lg shadow-lg p-6 border border-ctp-surface1")],
                        [
                            h1([class("text-2xl font-bold text-ctp-text mb-6")], [text("Todo List")]),
                            self.view_input(),
                            div([class("grid grid-cols-2 gap-4 mb-6")], [
                                stat_card("Total", view.total),
                                stat_card("Completed", view.completed),
                            ]),
                            view_filters(view.filter),
                            match view.empty_state {
                                Some(empty) => div([class("text-center py-12")], [
                                    div([class("text-ctp-overlay0 text-6xl mb-4")], [text(empty.icon)]),
                                    h3([class("text-lg font-medium text-ctp-text mb-2")], [text(empty.title)]),
                                    p([class("text-ctp-subtext0")], [text(empty.text)]),
                                ]),
                                None => ul(
                                    [class("space-y-3")],
                                    view.tasks.iter().map(|task| self.view_task(task)).collect::<Vec<_>>(),
                                ),
                            },
                            div([class("flex justify-end gap-3 mt-6 pt-4 border-t border-ctp-surface1")], [
                                button([
                                    on_click(|_| Msg::ClearCompleted),
                                    class("bg-ctp-yellow/20 text-ctp-yellow hover:bg-ctp-yellow/30 px-3 py-1 rounded-full text-sm font-medium transition-colors duration-200"),
                                ], [text("Clear Completed")]),
                                button([
                                    on_click(|_| Msg::ClearAll),
                                    class("bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 px-3 py-1 rounded-full text-sm font-medium transition-colors duration-200"),
                                ], [text("Clear All")]),
                            ]),
                        ],
                    )],
                ),
            ],
        )
    }
}

impl Model {
    fn view_input(&self) -> Node<Msg> {
        div([class("flex gap-3 mb-6")], [
            input([
                r#type("text"),
                placeholder("What needs to be done?"),
                value(&self.draft),
                attr("maxlength", MAX_TEXT_LEN.to_string()),
                on_input(|event| Msg::SetDraft(event.value())),
                on_keydown(|event| {
                    if event.key() == "Enter" {
                        Msg::AddTask
                    } else {
                        Msg::Ignore
                    }
                }),
                class("flex-1 px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent"),
            ], []),
            button([
                on_click(|_| Msg::AddTask),
                disabled(!List::accepts(&self.draft)),
                class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200 disabled:opacity-50"),
            ], [text("Add")]),
        ])
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        let task_id = task.id;
        let editing = self.editing.as_ref().filter(|e| e.session.id() == task_id);

        li(
            [
                key(task_id.to_string()),
                class(&format!(
                    "flex items-center gap-4 border rounded-xl p-4 transition-all duration-300 {}",
                    if task.completed {
                        "border-ctp-green bg-ctp-green/10"
                    } else {
                        "border-ctp-surface1 hover:border-ctp-blue"
                    }
                )),
            ],
            match editing {
                Some(editing) => vec![
                    input([
                        r#type("text"),
                        value(&editing.text),
                        attr("maxlength", MAX_TEXT_LEN.to_string()),
                        on_input(|event| Msg::SetEditText(event.value())),
                        on_keydown(|event| match event.key().as_str() {
                            "Enter" => Msg::SaveEdit,
                            "Escape" => Msg::CancelEdit,
                            _ => Msg::Ignore,
                        }),
                        class("flex-1 px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text focus:outline-none focus:ring-2 focus:ring-ctp-blue"),
                    ], []),
                    button([
                        on_click(|_| Msg::SaveEdit),
                        class("bg-ctp-green hover:bg-ctp-teal text-ctp-base font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Save")]),
                    button([
                        on_click(|_| Msg::CancelEdit),
                        class("bg-ctp-overlay0 hover:bg-ctp-overlay1 text-ctp-text font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Cancel")]),
                ],
                None => vec![
                    input([
                        r#type("checkbox"),
                        checked(task.completed),
                        on_click(move |_| Msg::ToggleTask(task_id)),
                        class("w-5 h-5 accent-ctp-green cursor-pointer"),
                    ], []),
                    span([class(&format!(
                        "flex-1 break-words {}",
                        if task.completed {
                            "line-through text-ctp-overlay1"
                        } else {
                            "text-ctp-text"
                        }
                    ))], [text(&task.text)]),
                    button([
                        on_click(move |_| Msg::EditTask(task_id)),
                        class("inline-flex items-center justify-center w-8 h-8 rounded-lg bg-ctp-blue/20 text-ctp-blue hover:bg-ctp-blue/30 transition-colors duration-200"),
                        r#type("button"),
                    ], [text("✏️")]),
                    button([
                        on_click(move |_| Msg::DeleteTask(task_id)),
                        class("inline-flex items-center justify-center w-8 h-8 rounded-lg bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 transition-colors duration-200"),
                        r#type("button"),
                    ], [text("🗑️")]),
                ],
            },
        )
    }

    fn view_notice(&self) -> Node<Msg> {
        match &self.notice {
            Some(notice) => div([
                on_click(|_| Msg::DismissNotice),
                class(&format!(
                    "fixed top-5 right-5 z-50 px-5 py-3 rounded-md shadow-lg text-ctp-base cursor-pointer {}",
                    match notice.severity {
                        Severity::Success => "bg-ctp-green",
                        Severity::Info => "bg-ctp-sapphire",
                        Severity::Warning => "bg-ctp-yellow",
                    }
                )),
            ], [text(&notice.message)]),
            None => span([], []),
        }
    }
}

fn stat_card(card_title: &str, count: usize) -> Node<Msg> {
    div([class("bg-ctp-surface1 rounded-lg p-4 border border-ctp-surface2")], [
        p([class("text-sm font-medium text-ctp-subtext0")], [text(card_title)]),
        p([class("text-2xl font-bold text-ctp-text mt-1")], [text(&count.to_string())]),
    ])
}

fn view_filters(current: Filter) -> Node<Msg> {
    div(
        [class("flex gap-2 mb-4")],
        Filter::ALL
            .iter()
            .map(|&mode| {
                button([
                    on_click(move |_| Msg::SetFilter(mode)),
                    class(&format!(
                        "px-3 py-2 rounded-md text-sm font-medium transition-colors duration-200 {}",
                        if mode == current {
                            "bg-ctp-blue text-ctp-base"
                        } else {
                            "text-ctp-subtext1 hover:text-ctp-text hover:bg-ctp-surface1"
                        }
                    )),
                ], [text(filter_label(mode))])
            })
            .collect::<Vec<_>>(),
    )
}

fn filter_label(mode: Filter) -> &'static str {
    match mode {
        Filter::All => "All",
        Filter::Active => "Active",
        Filter::Completed => "Completed",
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::new());
}
