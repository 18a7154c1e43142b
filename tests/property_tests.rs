// Property-based tests for the month grid, resize gestures, and filtering
mod fixtures;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use task_calendar::models::filter::{FilterCriteria, TimeFilter};
use task_calendar::models::task::{Task, TaskCategory};
use task_calendar::services::filter::visible_tasks;
use task_calendar::ui_egui::drag::{dispatch, DragOutcome, DragSession, DragSubject, DragTarget, PointerEvent, ResizeEdge};
use task_calendar::utils::date::{last_of_month, month_grid, GRID_CELLS};

fn day(offset: u64) -> NaiveDate {
    fixtures::dates::march_1_2024() + Days::new(offset)
}

fn category_strategy() -> impl Strategy<Value = TaskCategory> {
    prop::sample::select(TaskCategory::ALL.to_vec())
}

fn time_filter_strategy() -> impl Strategy<Value = Option<TimeFilter>> {
    prop::option::of(prop::sample::select(TimeFilter::ALL.to_vec()))
}

fn task_strategy() -> impl Strategy<Value = Task> {
    ("[a-z]{1,8}", category_strategy(), 0u64..60, 0u64..10).prop_map(|(name, category, start, len)| {
        Task::new(name, category, day(start), day(start + len)).unwrap()
    })
}

proptest! {
    /// Every month grid holds 42 days and includes the month's last day
    #[test]
    fn prop_grid_has_42_cells(year in 1900..2200i32, month0 in 0..12u32) {
        let grid = month_grid(year, month0).unwrap();
        let last = last_of_month(NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap()).unwrap();
        prop_assert_eq!(grid.days().len(), GRID_CELLS);
        prop_assert!(grid.contains(last));
    }

    /// No sequence of pointer moves makes a resize commit an inverted range
    #[test]
    fn prop_resize_never_inverts(
        start in 0u64..30,
        len in 0u64..10,
        moves in prop::collection::vec(0u64..45, 0..12),
        edge_is_start in any::<bool>(),
    ) {
        let subject = DragSubject {
            task_id: "t".into(),
            start: day(start),
            end: day(start + len),
        };
        let edge = if edge_is_start { ResizeEdge::Start } else { ResizeEdge::End };
        let grab = if edge_is_start { subject.start } else { subject.end };

        let (mut session, _) = dispatch(
            DragSession::Idle,
            PointerEvent::Down { date: grab, target: Some(DragTarget::Edge(subject.clone(), edge)) },
        );
        for offset in moves {
            session = dispatch(session, PointerEvent::Move { date: day(offset) }).0;
            let (preview_start, preview_end) = session.preview_span().unwrap();
            prop_assert!(preview_start <= preview_end);
        }

        match dispatch(session, PointerEvent::Up).1 {
            DragOutcome::UpdateSpan { start, end, .. } => {
                prop_assert!(start <= end);
                // The fixed edge never moves
                if edge_is_start {
                    prop_assert_eq!(end, subject.end);
                } else {
                    prop_assert_eq!(start, subject.start);
                }
            }
            other => prop_assert!(false, "unexpected outcome {:?}", other),
        }
    }

    /// Filtering twice changes nothing, and the result keeps input order
    #[test]
    fn prop_visible_tasks_is_idempotent_subset(
        tasks in prop::collection::vec(task_strategy(), 0..20),
        categories in prop::collection::btree_set(category_strategy(), 0..3),
        time_filter in time_filter_strategy(),
        search_term in "[a-z ]{0,3}",
    ) {
        let criteria = FilterCriteria { categories, time_filter, search_term };
        let today = day(5);

        let once = visible_tasks(&tasks, &criteria, today);
        let twice = visible_tasks(&once, &criteria, today);
        prop_assert_eq!(&once, &twice);

        let mut remaining = tasks.iter();
        for task in &once {
            prop_assert!(remaining.any(|candidate| candidate == task));
        }
    }
}
