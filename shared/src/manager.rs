//! The task list: an ordered, most-recent-first collection of tasks that
//! writes a full snapshot to its store after every change.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::prompt::{Notice, Prompt};
use crate::store::{KeyValueStore, STORAGE_KEY};
use crate::task::{normalize_text, Clock, SystemClock, Task, TaskId};
use crate::view::{Filter, TaskView};

/// Why an operation left the list alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "id", rename_all = "camelCase")]
pub enum Skip {
    EmptyInput,
    NotFound(TaskId),
    Unchanged,
    NothingToClear,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Applied(T),
    Skipped(Skip),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn skipped(&self) -> Option<Skip> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Skipped(skip) => Some(*skip),
        }
    }
}

/// An in-progress edit of one task. Dropping it, or handing it to
/// [`TaskList::cancel_edit`], discards the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    id: TaskId,
    original: String,
}

impl EditSession {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Text of the task when the session began.
    pub fn original(&self) -> &str {
        &self.original
    }
}

pub struct TaskList<S, C = SystemClock> {
    store: S,
    key: String,
    clock: C,
    tasks: Vec<Task>,
    next_id: TaskId,
    filter: Filter,
}

impl<S: KeyValueStore> TaskList<S> {
    pub fn load(store: S) -> Result<Self> {
        Self::open(store, STORAGE_KEY, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> TaskList<S, C> {
    /// Reads the snapshot under `key`; a missing key is an empty list.
    pub fn open(mut store: S, key: &str, clock: C) -> Result<Self> {
        let tasks: Vec<Task> = match store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let next_id = match tasks.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted(max))?,
            None => 1,
        };
        debug!(count = tasks.len(), next_id, key, "loaded task list");

        Ok(Self {
            store,
            key: key.to_string(),
            clock,
            tasks,
            next_id,
            filter: Filter::All,
        })
    }

    /// Starts an empty list without reading `store`. Nothing is written
    /// until the first change.
    pub fn empty(store: S, key: &str, clock: C) -> Self {
        Self {
            store,
            key: key.to_string(),
            clock,
            tasks: Vec::new(),
            next_id: 1,
            filter: Filter::All,
        }
    }

    /// Tears the list down and hands back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Whether `text` would be accepted by [`TaskList::add`].
    pub fn accepts(text: &str) -> bool {
        !text.trim().is_empty()
    }

    pub fn snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.tasks)?)
    }

    pub fn add(&mut self, text: &str, prompt: &mut impl Prompt) -> Result<Outcome<TaskId>> {
        let Some(text) = normalize_text(text) else {
            return Ok(Outcome::Skipped(Skip::EmptyInput));
        };

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted(id))?;
        self.tasks.insert(0, Task::new(id, text, self.clock.now()));
        self.persist()?;

        debug!(id, "added task");
        prompt.notify(Notice::success("Task added successfully!"));
        Ok(Outcome::Applied(id))
    }

    /// Flips completion; the applied value is the new state.
    pub fn toggle(&mut self, id: TaskId, prompt: &mut impl Prompt) -> Result<Outcome<bool>> {
        let now = self.clock.now();
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(Outcome::Skipped(Skip::NotFound(id)));
        };
        let completed = task.toggle(now);
        self.persist()?;

        debug!(id, completed, "toggled task");
        prompt.notify(Notice::success(if completed {
            "Task completed!"
        } else {
            "Task marked as active!"
        }));
        Ok(Outcome::Applied(completed))
    }

    pub fn begin_edit(&self, id: TaskId) -> Option<EditSession> {
        self.get(id).map(|task| EditSession {
            id,
            original: task.text.clone(),
        })
    }

    pub fn commit_edit(
        &mut self,
        session: EditSession,
        text: &str,
        prompt: &mut impl Prompt,
    ) -> Result<Outcome> {
        self.edit(session.id, text, prompt)
    }

    pub fn cancel_edit(&self, session: EditSession) {
        debug!(id = session.id, "edit cancelled");
    }

    pub fn edit(&mut self, id: TaskId, text: &str, prompt: &mut impl Prompt) -> Result<Outcome> {
        let now = self.clock.now();
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(Outcome::Skipped(Skip::NotFound(id)));
        };
        let Some(text) = normalize_text(text) else {
            return Ok(Outcome::Skipped(Skip::EmptyInput));
        };
        if text == task.text {
            return Ok(Outcome::Skipped(Skip::Unchanged));
        }
        task.rename(text, now);
        self.persist()?;

        debug!(id, "edited task");
        prompt.notify(Notice::success("Task updated!"));
        Ok(Outcome::Applied(()))
    }

    pub fn delete(&mut self, id: TaskId, prompt: &mut impl Prompt) -> Result<Outcome> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(Outcome::Skipped(Skip::NotFound(id)));
        };
        if !prompt.confirm("Are you sure you want to delete this task?") {
            return Ok(Outcome::Skipped(Skip::Declined));
        }
        self.tasks.remove(index);
        self.persist()?;

        debug!(id, "deleted task");
        prompt.notify(Notice::info("Task deleted!"));
        Ok(Outcome::Applied(()))
    }

    /// Removes every completed task; the applied value is how many went.
    pub fn clear_completed(&mut self, prompt: &mut impl Prompt) -> Result<Outcome<usize>> {
        let count = self.completed_count();
        if count == 0 {
            prompt.notify(Notice::info("No completed tasks to clear!"));
            return Ok(Outcome::Skipped(Skip::NothingToClear));
        }
        if !prompt.confirm(&format!(
            "Are you sure you want to delete {count} completed task(s)?"
        )) {
            return Ok(Outcome::Skipped(Skip::Declined));
        }
        self.tasks.retain(|t| !t.completed);
        self.persist()?;

        debug!(count, "cleared completed tasks");
        prompt.notify(Notice::info(format!("{count} completed task(s) deleted!")));
        Ok(Outcome::Applied(count))
    }

    pub fn clear_all(&mut self, prompt: &mut impl Prompt) -> Result<Outcome<usize>> {
        let count = self.tasks.len();
        if count == 0 {
            prompt.notify(Notice::info("No tasks to clear!"));
            return Ok(Outcome::Skipped(Skip::NothingToClear));
        }
        if !prompt.confirm(&format!(
            "Are you sure you want to delete all {count} task(s)?"
        )) {
            return Ok(Outcome::Skipped(Skip::Declined));
        }
        self.tasks.clear();
        self.persist()?;

        debug!(count, "cleared all tasks");
        prompt.notify(Notice::info("All tasks deleted!"));
        Ok(Outcome::Applied(count))
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn view(&self) -> TaskView {
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .cloned()
            .collect();
        let completed = self.completed_count();
        let empty_state = tasks.is_empty().then(|| self.filter.empty_state());

        TaskView {
            filter: self.filter,
            tasks,
            total: self.tasks.len(),
            completed,
            active: self.tasks.len() - completed,
            empty_state,
        }
    }

    fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    fn persist(&mut self) -> Result<()> {
        let snapshot = self.snapshot()?;
        self.store.set(&self.key, &snapshot).inspect_err(|e| {
            warn!(key = %self.key, error = %e, "failed to write task snapshot");
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::prompt::{PromptRecorder, Severity};
    use crate::store::MemoryStore;

    /// Advances one second every time it is read.
    struct TickingClock(Cell<DateTime<Utc>>);

    impl TickingClock {
        fn new() -> Self {
            Self(Cell::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()))
        }
    }

    impl Clock for TickingClock {
        fn now(&self) -> DateTime<Utc> {
            let now = self.0.get();
            self.0.set(now + Duration::seconds(1));
            now
        }
    }

    fn empty_list() -> TaskList<MemoryStore, TickingClock> {
        TaskList::open(MemoryStore::new(), STORAGE_KEY, TickingClock::new()).unwrap()
    }

    fn yes() -> PromptRecorder {
        PromptRecorder::answering(true)
    }

    fn texts(view: &TaskView) -> Vec<&str> {
        view.tasks.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn starts_empty_without_a_snapshot() {
        let list = empty_list();
        let view = list.view();
        assert_eq!(view.total, 0);
        assert_eq!(view.empty_state, Some(Filter::All.empty_state()));
    }

    #[test]
    fn counter_resumes_after_highest_stored_id() {
        let raw = r#"[
            {"id":4,"text":"b","completed":false,"createdAt":"2024-01-01T00:00:00.000Z","completedAt":null},
            {"id":9,"text":"a","completed":true,"createdAt":"2024-01-01T00:00:00.000Z","completedAt":"2024-01-02T00:00:00.000Z"}
        ]"#;
        let store = MemoryStore::with_entry(STORAGE_KEY, raw);
        let mut list = TaskList::open(store, STORAGE_KEY, TickingClock::new()).unwrap();
        let id = list.add("c", &mut yes()).unwrap().applied();
        assert_eq!(id, Some(10));
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "not json");
        let err = TaskList::open(store, STORAGE_KEY, TickingClock::new()).err();
        assert!(matches!(err, Some(StoreError::Snapshot(_))));
    }

    fn snapshot_with_id(id: TaskId) -> MemoryStore {
        let raw = format!(
            r#"[{{"id":{id},"text":"last","completed":false,"createdAt":"2024-01-01T00:00:00.000Z","completedAt":null}}]"#
        );
        MemoryStore::with_entry(STORAGE_KEY, &raw)
    }

    #[test]
    fn snapshot_at_the_id_ceiling_is_refused() {
        let err = TaskList::open(snapshot_with_id(TaskId::MAX), STORAGE_KEY, TickingClock::new()).err();
        assert!(matches!(err, Some(StoreError::IdsExhausted(id)) if id == TaskId::MAX));
    }

    #[test]
    fn add_stops_handing_out_ids_at_the_ceiling() {
        let store = snapshot_with_id(TaskId::MAX - 1);
        let mut list = TaskList::open(store, STORAGE_KEY, TickingClock::new()).unwrap();
        let mut prompt = yes();

        let err = list.add("one too many", &mut prompt).err();
        assert!(matches!(err, Some(StoreError::IdsExhausted(id)) if id == TaskId::MAX));
        assert_eq!(list.view().total, 1);
        assert!(prompt.notices.is_empty());

        let err = list.add("still none", &mut prompt).err();
        assert!(matches!(err, Some(StoreError::IdsExhausted(_))));
    }

    #[test]
    fn empty_list_ignores_existing_snapshot_until_written() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "not json");
        let mut list = TaskList::empty(store, STORAGE_KEY, TickingClock::new());
        assert_eq!(list.view().total, 0);
        assert_eq!(list.add("fresh", &mut yes()).unwrap(), Outcome::Applied(1));

        let store = list.into_store();
        assert!(store.entry(STORAGE_KEY).unwrap().contains("fresh"));
    }

    #[test]
    fn ids_stay_unique_and_increasing_across_deletes() {
        let mut list = empty_list();
        let mut prompt = yes();
        let mut ids = Vec::new();
        for round in 0..5 {
            let id = list.add(&format!("task {round}"), &mut prompt).unwrap().applied().unwrap();
            ids.push(id);
            if round % 2 == 0 {
                list.delete(id, &mut prompt).unwrap();
            }
        }
        list.clear_all(&mut prompt).unwrap();
        ids.push(list.add("after clear", &mut prompt).unwrap().applied().unwrap());

        assert!(ids.windows(2).all(|w| w[0] < w[1]), "{ids:?}");
    }

    #[test]
    fn blank_input_never_adds() {
        let mut list = empty_list();
        let mut prompt = yes();
        assert_eq!(list.add("", &mut prompt).unwrap(), Outcome::Skipped(Skip::EmptyInput));
        assert_eq!(list.add("   ", &mut prompt).unwrap(), Outcome::Skipped(Skip::EmptyInput));
        assert_eq!(list.view().total, 0);
        assert!(prompt.notices.is_empty());
        assert!(!TaskList::<MemoryStore>::accepts("  "));
        assert!(TaskList::<MemoryStore>::accepts(" x "));
    }

    #[test]
    fn add_trims_inserts_at_front_and_persists() {
        let mut list = empty_list();
        let mut prompt = yes();
        list.add("  first ", &mut prompt).unwrap();
        list.add("second", &mut prompt).unwrap();

        assert_eq!(texts(&list.view()), ["second", "first"]);
        assert_eq!(
            prompt.last_notice(),
            Some(&Notice::success("Task added successfully!"))
        );

        let stored = list.into_store();
        let raw = stored.entry(STORAGE_KEY).unwrap();
        let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "second");
    }

    #[test]
    fn double_toggle_restores_state_and_clears_completed_at() {
        let mut list = empty_list();
        let mut prompt = yes();
        let id = list.add("x", &mut prompt).unwrap().applied().unwrap();

        assert_eq!(list.toggle(id, &mut prompt).unwrap(), Outcome::Applied(true));
        assert!(list.get(id).unwrap().completed_at.is_some());
        assert_eq!(prompt.last_notice().unwrap().message, "Task completed!");

        assert_eq!(list.toggle(id, &mut prompt).unwrap(), Outcome::Applied(false));
        let task = list.get(id).unwrap();
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
        assert_eq!(prompt.last_notice().unwrap().message, "Task marked as active!");
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut list = empty_list();
        let mut prompt = yes();
        list.add("x", &mut prompt).unwrap();
        let before = list.view();

        assert_eq!(list.toggle(42, &mut prompt).unwrap(), Outcome::Skipped(Skip::NotFound(42)));
        assert_eq!(list.edit(42, "y", &mut prompt).unwrap(), Outcome::Skipped(Skip::NotFound(42)));
        assert_eq!(list.delete(42, &mut prompt).unwrap(), Outcome::Skipped(Skip::NotFound(42)));
        assert!(prompt.questions.is_empty());
        assert_eq!(list.view(), before);
    }

    #[test]
    fn edit_with_same_text_leaves_updated_at_unset() {
        let mut list = empty_list();
        let mut prompt = yes();
        let id = list.add("Buy milk", &mut prompt).unwrap().applied().unwrap();

        assert_eq!(
            list.edit(id, "  Buy milk ", &mut prompt).unwrap(),
            Outcome::Skipped(Skip::Unchanged)
        );
        assert_eq!(list.edit(id, " ", &mut prompt).unwrap(), Outcome::Skipped(Skip::EmptyInput));
        assert_eq!(list.get(id).unwrap().updated_at, None);
    }

    #[test]
    fn edit_session_commits_or_cancels() {
        let mut list = empty_list();
        let mut prompt = yes();
        let id = list.add("Buy milk", &mut prompt).unwrap().applied().unwrap();

        let session = list.begin_edit(id).unwrap();
        assert_eq!(session.original(), "Buy milk");
        list.cancel_edit(session);
        assert_eq!(list.get(id).unwrap().text, "Buy milk");

        let session = list.begin_edit(id).unwrap();
        let outcome = list.commit_edit(session, "Buy oat milk", &mut prompt).unwrap();
        assert!(outcome.is_applied());
        let task = list.get(id).unwrap();
        assert_eq!(task.text, "Buy oat milk");
        assert!(task.updated_at.is_some());
        assert_eq!(prompt.last_notice(), Some(&Notice::success("Task updated!")));

        assert_eq!(list.begin_edit(99), None);
    }

    #[test]
    fn updated_at_survives_later_edits_back() {
        let mut list = empty_list();
        let mut prompt = yes();
        let id = list.add("a", &mut prompt).unwrap().applied().unwrap();
        list.edit(id, "b", &mut prompt).unwrap();
        let first = list.get(id).unwrap().updated_at;
        list.edit(id, "a", &mut prompt).unwrap();
        let task = list.get(id).unwrap();
        assert!(task.updated_at > first);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut list = empty_list();
        let id = list.add("x", &mut yes()).unwrap().applied().unwrap();

        let mut no = PromptRecorder::answering(false);
        assert_eq!(list.delete(id, &mut no).unwrap(), Outcome::Skipped(Skip::Declined));
        assert_eq!(no.questions, ["Are you sure you want to delete this task?"]);
        assert_eq!(list.view().total, 1);

        let mut prompt = yes();
        assert!(list.delete(id, &mut prompt).unwrap().is_applied());
        assert_eq!(list.view().total, 0);
        assert_eq!(prompt.last_notice(), Some(&Notice::info("Task deleted!")));
    }

    #[test]
    fn clear_completed_with_nothing_completed_is_a_noop() {
        let mut list = empty_list();
        let mut prompt = yes();
        list.add("a", &mut prompt).unwrap();
        list.add("b", &mut prompt).unwrap();
        let before = list.view();

        let mut probe = yes();
        assert_eq!(
            list.clear_completed(&mut probe).unwrap(),
            Outcome::Skipped(Skip::NothingToClear)
        );
        assert!(probe.questions.is_empty());
        assert_eq!(probe.notices, [Notice::info("No completed tasks to clear!")]);
        assert_eq!(list.view(), before);
    }

    #[test]
    fn clear_completed_keeps_active_tasks_in_order() {
        let mut list = empty_list();
        let mut prompt = yes();
        let a = list.add("a", &mut prompt).unwrap().applied().unwrap();
        list.add("b", &mut prompt).unwrap();
        let c = list.add("c", &mut prompt).unwrap().applied().unwrap();
        list.add("d", &mut prompt).unwrap();
        list.toggle(a, &mut prompt).unwrap();
        list.toggle(c, &mut prompt).unwrap();

        let mut declined = PromptRecorder::answering(false);
        assert_eq!(
            list.clear_completed(&mut declined).unwrap(),
            Outcome::Skipped(Skip::Declined)
        );
        assert_eq!(list.view().total, 4);

        let mut prompt = yes();
        assert_eq!(list.clear_completed(&mut prompt).unwrap(), Outcome::Applied(2));
        assert_eq!(
            prompt.questions,
            ["Are you sure you want to delete 2 completed task(s)?"]
        );
        assert_eq!(texts(&list.view()), ["d", "b"]);
        assert_eq!(prompt.last_notice().unwrap().message, "2 completed task(s) deleted!");
    }

    #[test]
    fn clear_all_on_empty_list_only_notifies() {
        let mut list = empty_list();
        let mut prompt = yes();
        assert_eq!(
            list.clear_all(&mut prompt).unwrap(),
            Outcome::Skipped(Skip::NothingToClear)
        );
        assert_eq!(prompt.notices, [Notice::info("No tasks to clear!")]);
        assert_eq!(prompt.notices[0].severity, Severity::Info);
        assert_eq!(list.view().total, 0);
    }

    #[test]
    fn clear_all_empties_after_confirmation() {
        let mut list = empty_list();
        let mut prompt = yes();
        list.add("a", &mut prompt).unwrap();
        list.add("b", &mut prompt).unwrap();
        assert_eq!(list.clear_all(&mut prompt).unwrap(), Outcome::Applied(2));
        assert_eq!(prompt.questions, ["Are you sure you want to delete all 2 task(s)?"]);
        assert_eq!(list.view().total, 0);
    }

    #[test]
    fn filters_partition_the_list() {
        let mut list = empty_list();
        let mut prompt = yes();
        for n in 0..6 {
            let id = list.add(&format!("t{n}"), &mut prompt).unwrap().applied().unwrap();
            if n % 3 == 0 {
                list.toggle(id, &mut prompt).unwrap();
            }
        }

        list.set_filter(Filter::Active);
        let active = list.view();
        assert!(active.tasks.iter().all(|t| !t.completed));

        list.set_filter(Filter::Completed);
        let completed = list.view();
        assert!(completed.tasks.iter().all(|t| t.completed));

        list.set_filter(Filter::All);
        let all = list.view();
        assert_eq!(all.tasks.len(), active.tasks.len() + completed.tasks.len());
        assert_eq!(all.total, all.active + all.completed);
        assert_eq!((all.active, all.completed), (4, 2));
        assert_eq!(list.add("t6", &mut prompt).unwrap(), Outcome::Applied(7));
    }

    #[test]
    fn empty_state_follows_the_filter() {
        let mut list = empty_list();
        let mut prompt = yes();
        list.add("a", &mut prompt).unwrap();

        list.set_filter(Filter::Completed);
        let view = list.view();
        assert!(view.tasks.is_empty());
        assert_eq!(view.total, 1);
        assert_eq!(view.empty_state, Some(Filter::Completed.empty_state()));

        list.set_filter(Filter::Active);
        assert_eq!(list.view().empty_state, None);
    }

    #[test]
    fn newest_first_scenario() {
        let mut list = empty_list();
        let mut prompt = yes();
        list.add("Buy milk", &mut prompt).unwrap();
        let walk = list.add("Walk dog", &mut prompt).unwrap().applied().unwrap();
        list.toggle(walk, &mut prompt).unwrap();

        let view = list.view();
        let rows: Vec<(&str, bool)> = view
            .tasks
            .iter()
            .map(|t| (t.text.as_str(), t.completed))
            .collect();
        assert_eq!(rows, [("Walk dog", true), ("Buy milk", false)]);
        assert_eq!((view.total, view.completed), (2, 1));
    }

    #[test]
    fn reload_reproduces_the_same_view() {
        let mut list = empty_list();
        let mut prompt = yes();
        let a = list.add("a", &mut prompt).unwrap().applied().unwrap();
        let b = list.add("b", &mut prompt).unwrap().applied().unwrap();
        list.toggle(a, &mut prompt).unwrap();
        list.edit(b, "b2", &mut prompt).unwrap();
        let before = list.view();

        let store = list.into_store();
        let reloaded = TaskList::open(store, STORAGE_KEY, TickingClock::new()).unwrap();
        assert_eq!(reloaded.view(), before);
    }

    #[test]
    fn reload_with_system_clock_is_exact() {
        let mut list = TaskList::load(MemoryStore::new()).unwrap();
        let mut prompt = yes();
        let id = list.add("now", &mut prompt).unwrap().applied().unwrap();
        list.toggle(id, &mut prompt).unwrap();
        let before = list.view();

        let reloaded = TaskList::load(list.into_store()).unwrap();
        assert_eq!(reloaded.view(), before);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&mut self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::backend("quota exceeded"))
        }
    }

    #[test]
    fn write_failures_surface_as_errors() {
        let mut list = TaskList::open(FailingStore, STORAGE_KEY, TickingClock::new()).unwrap();
        let mut prompt = yes();
        let err = list.add("x", &mut prompt).err();
        assert!(matches!(err, Some(StoreError::Backend(_))));
        assert!(prompt.notices.is_empty());
    }
}
