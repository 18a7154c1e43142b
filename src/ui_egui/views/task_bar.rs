//! Task bar placement on the month grid.
//!
//! A task gets a continuous bar only when its start and end both fall on the
//! grid and in the same week row. Tasks that cross a week boundary show up
//! only in the per-day lists inside each cell.

use chrono::NaiveDate;

use crate::models::task::{Task, TaskId};
use crate::utils::date::{MonthGrid, GRID_COLUMNS, GRID_ROWS};

#[derive(Clone, Debug, PartialEq)]
pub struct TaskBarPlacement {
    pub task_id: TaskId,
    pub row: usize,
    pub start_col: usize,
    pub end_col: usize,
    /// Stacking slot inside the row; bars in the same lane never overlap
    pub lane: usize,
}

impl TaskBarPlacement {
    pub fn span_cols(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Horizontal offset as a fraction of the grid width
    pub fn left_fraction(&self) -> f32 {
        self.start_col as f32 / GRID_COLUMNS as f32
    }

    pub fn width_fraction(&self) -> f32 {
        self.span_cols() as f32 / GRID_COLUMNS as f32
    }

    /// Vertical offset of the row as a fraction of the grid height
    pub fn top_fraction(&self) -> f32 {
        self.row as f32 / GRID_ROWS as f32
    }

    fn overlaps(&self, other: &TaskBarPlacement) -> bool {
        self.row == other.row && self.start_col <= other.end_col && other.start_col <= self.end_col
    }
}

/// Bar placement for a single task, in lane 0
pub fn place_task_bar(grid: &MonthGrid, task: &Task) -> Option<TaskBarPlacement> {
    let start_index = grid.index_of(task.start_date)?;
    let end_index = grid.index_of(task.end_date)?;

    let row = MonthGrid::row_of(start_index);
    if row != MonthGrid::row_of(end_index) {
        return None;
    }

    Some(TaskBarPlacement {
        task_id: task.id.clone(),
        row,
        start_col: MonthGrid::col_of(start_index),
        end_col: MonthGrid::col_of(end_index),
        lane: 0,
    })
}

/// Bars for every placeable task, in input order, stacked into lanes
pub fn place_task_bars(grid: &MonthGrid, tasks: &[Task]) -> Vec<TaskBarPlacement> {
    let mut placed: Vec<TaskBarPlacement> = Vec::new();

    for task in tasks {
        let Some(mut bar) = place_task_bar(grid, task) else {
            continue;
        };

        while placed
            .iter()
            .any(|other| other.lane == bar.lane && other.overlaps(&bar))
        {
            bar.lane += 1;
        }
        placed.push(bar);
    }

    placed
}

/// Grid indices covered by `start..=end`, clipped to the grid
pub fn range_cells(grid: &MonthGrid, start: NaiveDate, end: NaiveDate) -> Vec<usize> {
    grid.days()
        .iter()
        .enumerate()
        .filter(|(_, day)| start <= **day && **day <= end)
        .map(|(index, _)| index)
        .collect()
}
