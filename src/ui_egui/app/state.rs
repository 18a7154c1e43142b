use chrono::NaiveDate;

use crate::models::filter::FilterCriteria;
use crate::models::task::{Task, TaskId, TaskUpdate};
use crate::services::demo::sample_tasks;
use crate::services::filter::visible_tasks;
use crate::services::storage::StorageError;
use crate::services::task::TaskStore;
use crate::ui_egui::drag::{dispatch, DragOutcome, DragSession, PointerEvent};
use crate::ui_egui::task_dialog::{TaskDialogState, TaskDialogSubmission};
use crate::utils::date::{first_of_month, shift_month, MonthGrid};

/// Everything the calendar window mutates between frames
pub struct AppState {
    pub store: TaskStore,
    pub criteria: FilterCriteria,
    pub session: DragSession,
    /// First day of the displayed month
    pub current_month: NaiveDate,
    pub task_dialog: Option<TaskDialogState>,
    /// Last storage failure, shown until the next successful write
    pub storage_error: Option<String>,
}

impl AppState {
    pub fn new(store: TaskStore, today: NaiveDate) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            session: DragSession::Idle,
            current_month: first_of_month(today),
            task_dialog: None,
            storage_error: None,
        }
    }

    /// Seed sample tasks when the store loaded empty
    pub fn seed_demo_if_empty(&mut self, today: NaiveDate) {
        if !self.store.is_empty() {
            return;
        }
        let samples = sample_tasks(today);
        log::info!("Seeding {} sample tasks", samples.len());
        let result = self.store.extend(samples);
        self.record(result);
    }

    pub fn visible_tasks(&self, today: NaiveDate) -> Vec<Task> {
        visible_tasks(self.store.tasks(), &self.criteria, today)
    }

    pub fn month_grid(&self) -> Option<MonthGrid> {
        MonthGrid::containing(self.current_month)
    }

    pub fn navigate_month(&mut self, delta: i32) {
        self.current_month = shift_month(self.current_month, delta);
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.current_month = first_of_month(today);
    }

    /// Feed one pointer event through the drag session and apply the result
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> DragOutcome {
        let session = std::mem::take(&mut self.session);
        let (next, outcome) = dispatch(session, event);
        self.session = next;
        self.apply_outcome(&outcome);
        outcome
    }

    fn apply_outcome(&mut self, outcome: &DragOutcome) {
        match outcome {
            DragOutcome::None => {}
            DragOutcome::OpenCreateForm { start, end } => {
                self.task_dialog = Some(TaskDialogState::new_task(*start, *end));
            }
            DragOutcome::OpenEditForm { task_id } => self.open_task_editor(task_id),
            DragOutcome::UpdateSpan {
                task_id,
                start,
                end,
            } => {
                let result = self.store.update(task_id, &TaskUpdate::span(*start, *end));
                self.record(result.map(|_| ()));
            }
        }
    }

    pub fn open_task_editor(&mut self, task_id: &TaskId) {
        match self.store.get(task_id) {
            Some(task) => self.task_dialog = Some(TaskDialogState::edit(task)),
            None => log::warn!("Cannot edit unknown task {}", task_id),
        }
    }

    pub fn apply_submission(&mut self, submission: TaskDialogSubmission) {
        let result = match submission {
            TaskDialogSubmission::Create(task) => self.store.create(task),
            TaskDialogSubmission::Update(id, update) => self.store.update(&id, &update).map(|_| ()),
            TaskDialogSubmission::Delete(id) => self.store.delete(&id).map(|_| ()),
        };
        self.record(result);
    }

    fn record(&mut self, result: Result<(), StorageError>) {
        match result {
            Ok(()) => self.storage_error = None,
            Err(err) => {
                log::error!("Failed to save tasks: {}", err);
                self.storage_error = Some(err.to_string());
            }
        }
    }
}
