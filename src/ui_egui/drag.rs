// Drag Interaction
//
// Turns a pointer down/move/up gesture over month grid cells into one of:
// - Create: select a span of empty days, then open the task form
// - Move: shift an existing task so its start follows the cursor
// - Resize: drag one edge of an existing task
//
// The session is a plain value; `dispatch` returns the next session plus the
// mutation (if any) the gesture produced.

use chrono::{Duration, NaiveDate};

use crate::models::task::{Task, TaskId};
use crate::utils::date::inclusive_days;

/// Which edge of the task is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

impl ResizeEdge {
    pub fn label(&self) -> &'static str {
        match self {
            ResizeEdge::Start => "Resizing Start Date",
            ResizeEdge::End => "Resizing End Date",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Create,
    Move,
    Resize,
}

/// Task grabbed at pointer-down, with its span at that moment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSubject {
    pub task_id: TaskId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DragSubject {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            start: task.start_date,
            end: task.end_date,
        }
    }

    /// Whole days the task covers. Both ends count, so a task starting and
    /// ending on the same day lasts one day.
    pub fn duration_days(&self) -> i64 {
        inclusive_days(self.start, self.end)
    }
}

/// What the pointer went down on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragTarget {
    /// Body of a task bar
    Body(DragSubject),
    /// Resize handle of a task bar
    Edge(DragSubject, ResizeEdge),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer pressed over `date`; `target` is `None` on an empty cell
    Down {
        date: NaiveDate,
        target: Option<DragTarget>,
    },
    /// Pointer moved over the cell for `date`
    Move { date: NaiveDate },
    Up,
    /// Pointer left the grid; handled exactly like `Up`
    Leave,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Creating {
        anchor: NaiveDate,
        cursor: NaiveDate,
    },
    Moving {
        subject: DragSubject,
        anchor: NaiveDate,
        cursor: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
        /// Set once the pointer has reached another cell, even if it came back
        moved: bool,
    },
    Resizing {
        subject: DragSubject,
        edge: ResizeEdge,
        /// Date of the edge that stays put
        anchor: NaiveDate,
        /// Date of the edge under the pointer
        cursor: NaiveDate,
    },
}

/// Side effect requested when a gesture ends
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    None,
    /// Ask for a name and category for a new task over this range
    OpenCreateForm { start: NaiveDate, end: NaiveDate },
    /// Pointer pressed and released on a task without moving it
    OpenEditForm { task_id: TaskId },
    /// Replace the task's date range
    UpdateSpan {
        task_id: TaskId,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Advance `session` by one pointer event
pub fn dispatch(session: DragSession, event: PointerEvent) -> (DragSession, DragOutcome) {
    session.dispatch(event)
}

impl DragSession {
    pub fn dispatch(self, event: PointerEvent) -> (DragSession, DragOutcome) {
        match event {
            PointerEvent::Down { date, target } => (self.begin(date, target), DragOutcome::None),
            PointerEvent::Move { date } => (self.hover(date), DragOutcome::None),
            PointerEvent::Up | PointerEvent::Leave => self.finish(),
        }
    }

    fn begin(self, date: NaiveDate, target: Option<DragTarget>) -> DragSession {
        if self.is_active() {
            return self;
        }

        match target {
            None => DragSession::Creating {
                anchor: date,
                cursor: date,
            },
            Some(DragTarget::Body(subject)) => DragSession::Moving {
                anchor: date,
                cursor: date,
                start: subject.start,
                end: subject.end,
                moved: false,
                subject,
            },
            Some(DragTarget::Edge(subject, edge)) => {
                let (anchor, cursor) = match edge {
                    ResizeEdge::Start => (subject.end, subject.start),
                    ResizeEdge::End => (subject.start, subject.end),
                };
                DragSession::Resizing {
                    subject,
                    edge,
                    anchor,
                    cursor,
                }
            }
        }
    }

    fn hover(self, date: NaiveDate) -> DragSession {
        match self {
            DragSession::Idle => DragSession::Idle,
            DragSession::Creating { anchor, .. } => DragSession::Creating {
                anchor,
                cursor: date,
            },
            DragSession::Moving {
                subject,
                anchor,
                cursor,
                start,
                end,
                moved,
            } => {
                let span = date.checked_add_signed(Duration::days(subject.duration_days() - 1));
                match span {
                    Some(new_end) => DragSession::Moving {
                        subject,
                        anchor,
                        cursor: date,
                        start: date,
                        end: new_end,
                        moved: moved || date != anchor,
                    },
                    None => DragSession::Moving {
                        subject,
                        anchor,
                        cursor,
                        start,
                        end,
                        moved,
                    },
                }
            }
            DragSession::Resizing {
                subject,
                edge,
                anchor,
                cursor,
            } => {
                let accepted = match edge {
                    ResizeEdge::Start => date <= subject.end,
                    ResizeEdge::End => date >= subject.start,
                };
                DragSession::Resizing {
                    cursor: if accepted { date } else { cursor },
                    subject,
                    edge,
                    anchor,
                }
            }
        }
    }

    fn finish(self) -> (DragSession, DragOutcome) {
        let outcome = match self {
            DragSession::Idle => DragOutcome::None,
            DragSession::Creating { anchor, cursor } => {
                let (start, end) = ordered(anchor, cursor);
                DragOutcome::OpenCreateForm { start, end }
            }
            DragSession::Moving {
                subject,
                start,
                end,
                moved,
                ..
            } => {
                if !moved {
                    DragOutcome::OpenEditForm {
                        task_id: subject.task_id,
                    }
                } else {
                    DragOutcome::UpdateSpan {
                        task_id: subject.task_id,
                        start,
                        end,
                    }
                }
            }
            DragSession::Resizing {
                subject,
                anchor,
                cursor,
                ..
            } => {
                let (start, end) = ordered(anchor, cursor);
                DragOutcome::UpdateSpan {
                    task_id: subject.task_id,
                    start,
                    end,
                }
            }
        };

        if !matches!(outcome, DragOutcome::None) {
            log::debug!("Drag finished: {:?}", outcome);
        }
        (DragSession::Idle, outcome)
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragSession::Idle)
    }

    pub fn mode(&self) -> Option<DragMode> {
        match self {
            DragSession::Idle => None,
            DragSession::Creating { .. } => Some(DragMode::Create),
            DragSession::Moving { .. } => Some(DragMode::Move),
            DragSession::Resizing { .. } => Some(DragMode::Resize),
        }
    }

    /// Pressed date while creating or moving; the fixed edge while resizing
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        match self {
            DragSession::Idle => None,
            DragSession::Creating { anchor, .. }
            | DragSession::Moving { anchor, .. }
            | DragSession::Resizing { anchor, .. } => Some(*anchor),
        }
    }

    pub fn cursor_date(&self) -> Option<NaiveDate> {
        match self {
            DragSession::Idle => None,
            DragSession::Creating { cursor, .. }
            | DragSession::Moving { cursor, .. }
            | DragSession::Resizing { cursor, .. } => Some(*cursor),
        }
    }

    pub fn subject_task_id(&self) -> Option<&TaskId> {
        match self {
            DragSession::Moving { subject, .. } | DragSession::Resizing { subject, .. } => {
                Some(&subject.task_id)
            }
            _ => None,
        }
    }

    pub fn resize_edge(&self) -> Option<ResizeEdge> {
        match self {
            DragSession::Resizing { edge, .. } => Some(*edge),
            _ => None,
        }
    }

    /// Range the gesture would commit if released now
    pub fn preview_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DragSession::Idle => None,
            DragSession::Creating { anchor, cursor } | DragSession::Resizing { anchor, cursor, .. } => {
                Some(ordered(*anchor, *cursor))
            }
            DragSession::Moving { start, end, .. } => Some((*start, *end)),
        }
    }
}

fn ordered(a: NaiveDate, b: NaiveDate) -> (NaiveDate, NaiveDate) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subject(start: NaiveDate, end: NaiveDate) -> DragSubject {
        DragSubject {
            task_id: TaskId::from("t1"),
            start,
            end,
        }
    }

    fn run(events: Vec<PointerEvent>) -> (DragSession, Vec<DragOutcome>) {
        let mut session = DragSession::Idle;
        let mut outcomes = Vec::new();
        for event in events {
            let (next, outcome) = dispatch(session, event);
            session = next;
            if outcome != DragOutcome::None {
                outcomes.push(outcome);
            }
        }
        (session, outcomes)
    }

    #[test]
    fn create_drag_normalizes_backwards_selection() {
        let (session, outcomes) = run(vec![
            PointerEvent::Down { date: ymd(2024, 3, 14), target: None },
            PointerEvent::Move { date: ymd(2024, 3, 12) },
            PointerEvent::Move { date: ymd(2024, 3, 11) },
            PointerEvent::Up,
        ]);
        assert_eq!(session, DragSession::Idle);
        assert_eq!(
            outcomes,
            vec![DragOutcome::OpenCreateForm { start: ymd(2024, 3, 11), end: ymd(2024, 3, 14) }]
        );
    }

    #[test]
    fn create_without_moving_is_single_day() {
        let (_, outcomes) = run(vec![
            PointerEvent::Down { date: ymd(2024, 3, 5), target: None },
            PointerEvent::Up,
        ]);
        assert_eq!(
            outcomes,
            vec![DragOutcome::OpenCreateForm { start: ymd(2024, 3, 5), end: ymd(2024, 3, 5) }]
        );
    }

    #[test]
    fn move_keeps_duration_and_aligns_start_to_cursor() {
        let grabbed = subject(ymd(2024, 3, 5), ymd(2024, 3, 7));
        assert_eq!(grabbed.duration_days(), 3);

        let (_, outcomes) = run(vec![
            PointerEvent::Down { date: ymd(2024, 3, 6), target: Some(DragTarget::Body(grabbed)) },
            PointerEvent::Move { date: ymd(2024, 3, 8) },
            PointerEvent::Move { date: ymd(2024, 3, 10) },
            PointerEvent::Up,
        ]);
        assert_eq!(
            outcomes,
            vec![DragOutcome::UpdateSpan {
                task_id: TaskId::from("t1"),
                start: ymd(2024, 3, 10),
                end: ymd(2024, 3, 12),
            }]
        );
    }

    #[test]
    fn press_and_release_on_task_opens_editor() {
        let grabbed = subject(ymd(2024, 3, 5), ymd(2024, 3, 7));
        let (_, outcomes) = run(vec![
            PointerEvent::Down { date: ymd(2024, 3, 5), target: Some(DragTarget::Body(grabbed)) },
            PointerEvent::Up,
        ]);
        assert_eq!(outcomes, vec![DragOutcome::OpenEditForm { task_id: TaskId::from("t1") }]);
    }

    #[test]
    fn move_that_returns_to_pressed_cell_still_commits() {
        let grabbed = subject(ymd(2024, 3, 5), ymd(2024, 3, 7));
        let (session, _) = run(vec![
            PointerEvent::Down { date: ymd(2024, 3, 6), target: Some(DragTarget::Body(grabbed)) },
            PointerEvent::Move { date: ymd(2024, 3, 10) },
            PointerEvent::Move { date: ymd(2024, 3, 6) },
        ]);
        assert_eq!(session.preview_span(), Some((ymd(2024, 3, 6), ymd(2024, 3, 8))));

        let (_, outcome) = dispatch(session, PointerEvent::Up);
        assert_eq!(
            outcome,
            DragOutcome::UpdateSpan {
                task_id: TaskId::from("t1"),
                start: ymd(2024, 3, 6),
                end: ymd(2024, 3, 8),
            }
        );
    }

    #[test]
    fn hovering_only_the_pressed_cell_opens_editor() {
        let grabbed = subject(ymd(2024, 3, 5), ymd(2024, 3, 7));
        let (_, outcomes) = run(vec![
            PointerEvent::Down { date: ymd(2024, 3, 6), target: Some(DragTarget::Body(grabbed)) },
            PointerEvent::Move { date: ymd(2024, 3, 6) },
            PointerEvent::Up,
        ]);
        assert_eq!(outcomes, vec![DragOutcome::OpenEditForm { task_id: TaskId::from("t1") }]);
    }

    #[test]
    fn resize_start_past_end_is_rejected() {
        let grabbed = subject(ymd(2024, 3, 5), ymd(2024, 3, 7));
        let (session, _) = run(vec![
            PointerEvent::Down {
                date: ymd(2024, 3, 5),
                target: Some(DragTarget::Edge(grabbed, ResizeEdge::Start)),
            },
            PointerEvent::Move { date: ymd(2024, 3, 9) },
        ]);
        assert_eq!(session.preview_span(), Some((ymd(2024, 3, 5), ymd(2024, 3, 7))));

        let (_, outcome) = dispatch(session, PointerEvent::Up);
        assert_eq!(
            outcome,
            DragOutcome::UpdateSpan {
                task_id: TaskId::from("t1"),
                start: ymd(2024, 3, 5),
                end: ymd(2024, 3, 7),
            }
        );
    }

    #[test]
    fn rejected_resize_keeps_last_accepted_cursor() {
        let grabbed = subject(ymd(2024, 3, 5), ymd(2024, 3, 7));
        let (session, _) = run(vec![
            PointerEvent::Down {
                date: ymd(2024, 3, 7),
                target: Some(DragTarget::Edge(grabbed, ResizeEdge::End)),
            },
            PointerEvent::Move { date: ymd(2024, 3, 10) },
            PointerEvent::Move { date: ymd(2024, 3, 1) },
        ]);
        assert_eq!(session.cursor_date(), Some(ymd(2024, 3, 10)));
        assert_eq!(session.preview_span(), Some((ymd(2024, 3, 5), ymd(2024, 3, 10))));
    }

    #[test]
    fn resize_start_earlier_extends_task() {
        let grabbed = subject(ymd(2024, 3, 5), ymd(2024, 3, 7));
        let (_, outcomes) = run(vec![
            PointerEvent::Down {
                date: ymd(2024, 3, 5),
                target: Some(DragTarget::Edge(grabbed, ResizeEdge::Start)),
            },
            PointerEvent::Move { date: ymd(2024, 3, 2) },
            PointerEvent::Leave,
        ]);
        assert_eq!(
            outcomes,
            vec![DragOutcome::UpdateSpan {
                task_id: TaskId::from("t1"),
                start: ymd(2024, 3, 2),
                end: ymd(2024, 3, 7),
            }]
        );
    }

    #[test]
    fn leave_behaves_like_up() {
        let events = |last: PointerEvent| {
            vec![
                PointerEvent::Down { date: ymd(2024, 3, 5), target: None },
                PointerEvent::Move { date: ymd(2024, 3, 6) },
                last,
            ]
        };
        assert_eq!(run(events(PointerEvent::Up)), run(events(PointerEvent::Leave)));
    }

    #[test]
    fn idle_ignores_move_and_up() {
        let (session, outcome) = dispatch(DragSession::Idle, PointerEvent::Move { date: ymd(2024, 3, 5) });
        assert_eq!((session.clone(), outcome), (DragSession::Idle, DragOutcome::None));
        assert_eq!(dispatch(session, PointerEvent::Up), (DragSession::Idle, DragOutcome::None));
    }

    #[test]
    fn second_press_during_session_is_ignored() {
        let (session, _) = run(vec![PointerEvent::Down { date: ymd(2024, 3, 5), target: None }]);
        let (next, _) = dispatch(
            session.clone(),
            PointerEvent::Down {
                date: ymd(2024, 3, 9),
                target: Some(DragTarget::Body(subject(ymd(2024, 3, 9), ymd(2024, 3, 9)))),
            },
        );
        assert_eq!(next, session);
    }

    #[test]
    fn session_fields_follow_mode() {
        let create = DragSession::Creating { anchor: ymd(2024, 3, 5), cursor: ymd(2024, 3, 6) };
        assert_eq!(create.mode(), Some(DragMode::Create));
        assert_eq!(create.anchor_date(), Some(ymd(2024, 3, 5)));
        assert_eq!(create.subject_task_id(), None);
        assert_eq!(create.resize_edge(), None);

        let (moving, _) = dispatch(
            DragSession::Idle,
            PointerEvent::Down {
                date: ymd(2024, 3, 5),
                target: Some(DragTarget::Body(subject(ymd(2024, 3, 5), ymd(2024, 3, 5)))),
            },
        );
        assert_eq!(moving.mode(), Some(DragMode::Move));
        assert_eq!(moving.subject_task_id(), Some(&TaskId::from("t1")));
        assert_eq!(moving.resize_edge(), None);

        let (resizing, _) = dispatch(
            DragSession::Idle,
            PointerEvent::Down {
                date: ymd(2024, 3, 5),
                target: Some(DragTarget::Edge(subject(ymd(2024, 3, 5), ymd(2024, 3, 5)), ResizeEdge::End)),
            },
        );
        assert_eq!(resizing.mode(), Some(DragMode::Resize));
        assert_eq!(resizing.resize_edge(), Some(ResizeEdge::End));
        assert_eq!(resizing.anchor_date(), Some(ymd(2024, 3, 5)));
        assert_eq!(DragSession::Idle.anchor_date(), None);
        assert!(resizing.is_active());
        assert!(!DragSession::Idle.is_active());
    }
}
