use chrono::NaiveDate;
use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::{task_color, with_alpha, CalendarCellPalette};
use super::task_bar::{place_task_bars, range_cells, TaskBarPlacement};
use crate::models::task::{Task, TaskId};
use crate::services::filter::tasks_for_date;
use crate::ui_egui::drag::{DragMode, DragSession, DragSubject, DragTarget, PointerEvent, ResizeEdge};
use crate::ui_egui::theme::CalendarTheme;
use crate::utils::date::{is_today_at, MonthGrid, GRID_CELLS, GRID_COLUMNS, GRID_ROWS};

const WEEKDAY_NAMES: [&str; GRID_COLUMNS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const HEADER_HEIGHT: f32 = 30.0;
const MIN_CELL_HEIGHT: f32 = 90.0;
const DAY_LABEL_HEIGHT: f32 = 22.0;
const BAR_HEIGHT: f32 = 18.0;
const BAR_GAP: f32 = 2.0;
const HANDLE_WIDTH: f32 = 6.0;
const INDICATOR_HEIGHT: f32 = 15.0;

/// Result returned from month view
#[derive(Debug, Default)]
pub struct MonthViewResult {
    /// Pointer events for the drag session, in the order they happened
    pub pointer_events: Vec<PointerEvent>,
    /// Task whose indicator was clicked
    pub edit_request: Option<TaskId>,
}

struct BarHit {
    rect: Rect,
    subject: DragSubject,
}

struct IndicatorHit {
    rect: Rect,
    task_id: TaskId,
}

pub struct MonthView;

impl MonthView {
    /// Paint the month grid for `tasks` and translate this frame's pointer
    /// input into drag events.
    pub fn show(
        ui: &mut egui::Ui,
        grid: &MonthGrid,
        tasks: &[Task],
        session: &DragSession,
        theme: &CalendarTheme,
        max_indicators: usize,
        today: NaiveDate,
    ) -> MonthViewResult {
        let palette = CalendarCellPalette::from_theme(theme);
        let available = ui.available_size();
        let cell_height = if available.y.is_finite() {
            ((available.y - HEADER_HEIGHT) / GRID_ROWS as f32).max(MIN_CELL_HEIGHT)
        } else {
            MIN_CELL_HEIGHT
        };
        let desired = Vec2::new(available.x, HEADER_HEIGHT + cell_height * GRID_ROWS as f32);
        let (rect, _response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

        let header_rect = Rect::from_min_size(rect.min, Vec2::new(rect.width(), HEADER_HEIGHT));
        let grid_rect = Rect::from_min_max(Pos2::new(rect.left(), header_rect.bottom()), rect.max);
        let painter = ui.painter_at(rect);

        Self::paint_header(&painter, header_rect, &palette);
        Self::paint_cells(&painter, grid_rect, grid, session, today, &palette);

        let lane_capacity = lane_capacity(cell_height);
        // Bars past the lane capacity fall back to the per-day lists
        let bars: Vec<TaskBarPlacement> = place_task_bars(grid, tasks)
            .into_iter()
            .filter(|bar| bar.lane < lane_capacity)
            .collect();
        let lanes_per_row = lanes_per_row(&bars);

        let bar_hits = Self::paint_bars(ui, &painter, grid_rect, tasks, &bars, session);
        let indicator_hits = Self::paint_indicators(
            ui,
            &painter,
            grid_rect,
            grid,
            tasks,
            &bars,
            &lanes_per_row,
            max_indicators,
            &palette,
        );

        if let DragSession::Resizing { edge, .. } = session {
            if let Some((start, end)) = session.preview_span() {
                Self::paint_resize_badge(ui, &painter, grid_rect, *edge, start, end, &palette);
            }
        }

        Self::collect_pointer_events(ui, grid_rect, grid, session, &bar_hits, &indicator_hits)
    }

    fn paint_header(painter: &egui::Painter, header_rect: Rect, palette: &CalendarCellPalette) {
        let col_width = header_rect.width() / GRID_COLUMNS as f32;
        for (col, name) in WEEKDAY_NAMES.iter().enumerate() {
            let cell = Rect::from_min_size(
                Pos2::new(header_rect.left() + col as f32 * col_width, header_rect.top()),
                Vec2::new(col_width, HEADER_HEIGHT),
            )
            .shrink(1.0);
            painter.rect_filled(cell, 6.0, palette.header_bg);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                *name,
                FontId::proportional(14.0),
                palette.header_text,
            );
        }
    }

    fn paint_cells(
        painter: &egui::Painter,
        grid_rect: Rect,
        grid: &MonthGrid,
        session: &DragSession,
        today: NaiveDate,
        palette: &CalendarCellPalette,
    ) {
        painter.rect_filled(grid_rect, 0.0, palette.grid_bg);

        let preview = session
            .preview_span()
            .map(|(start, end)| range_cells(grid, start, end))
            .unwrap_or_default();
        let preview_fill = match session.mode() {
            Some(DragMode::Move) => with_alpha(palette.selection, 60),
            _ => palette.selection,
        };

        for (index, date) in grid.days().iter().enumerate() {
            let cell = cell_rect(grid_rect, index).shrink(0.5);
            let is_today = is_today_at(*date, today);
            let in_month = grid.is_in_month(*date);

            let bg = if is_today {
                palette.today_bg
            } else if in_month {
                palette.regular_bg
            } else {
                palette.outside_bg
            };
            painter.rect_filled(cell, 2.0, bg);

            if preview.contains(&index) {
                painter.rect_filled(cell, 2.0, preview_fill);
            }
            if session.mode() == Some(DragMode::Create) && session.anchor_date() == Some(*date) {
                painter.rect_stroke(cell, 2.0, Stroke::new(1.5, palette.hover_border));
            }
            if is_today {
                painter.rect_stroke(cell, 2.0, Stroke::new(2.0, palette.today_border));
            }

            let text_color = if in_month { palette.text } else { palette.muted_text };
            painter.text(
                Pos2::new(cell.left() + 5.0, cell.top() + 4.0),
                Align2::LEFT_TOP,
                date.format("%-d").to_string(),
                FontId::proportional(14.0),
                text_color,
            );
        }
    }

    fn paint_bars(
        ui: &egui::Ui,
        painter: &egui::Painter,
        grid_rect: Rect,
        tasks: &[Task],
        bars: &[TaskBarPlacement],
        session: &DragSession,
    ) -> Vec<BarHit> {
        let font = FontId::proportional(12.0);
        let dragged = session.subject_task_id();
        let mut hits = Vec::with_capacity(bars.len());

        for bar in bars {
            let Some(task) = tasks.iter().find(|task| task.id == bar.task_id) else {
                continue;
            };
            let rect = bar_rect(grid_rect, bar);
            let base = task_color(task);
            let fill = if dragged == Some(&task.id) {
                with_alpha(base, 110)
            } else {
                base
            };

            painter.rect_filled(rect, 4.0, fill);
            let label = truncate_single_line_to_width(
                ui,
                &task.name,
                &font,
                Color32::WHITE,
                rect.width() - 2.0 * HANDLE_WIDTH - 4.0,
            );
            painter.text(
                Pos2::new(rect.left() + HANDLE_WIDTH + 2.0, rect.center().y),
                Align2::LEFT_CENTER,
                label,
                font.clone(),
                Color32::WHITE,
            );

            // Handles
            let handle_color = with_alpha(Color32::WHITE, 90);
            let (start_handle, end_handle) = handle_rects(rect);
            painter.rect_filled(start_handle, 2.0, handle_color);
            painter.rect_filled(end_handle, 2.0, handle_color);

            hits.push(BarHit {
                rect,
                subject: DragSubject::from_task(task),
            });
        }

        hits
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_indicators(
        ui: &egui::Ui,
        painter: &egui::Painter,
        grid_rect: Rect,
        grid: &MonthGrid,
        tasks: &[Task],
        bars: &[TaskBarPlacement],
        lanes_per_row: &[usize; GRID_ROWS],
        max_indicators: usize,
        palette: &CalendarCellPalette,
    ) -> Vec<IndicatorHit> {
        let font = FontId::proportional(11.0);
        let mut hits = Vec::new();

        for (index, date) in grid.days().iter().enumerate() {
            let cell = cell_rect(grid_rect, index);
            let row = MonthGrid::row_of(index);

            // Tasks already drawn as a bar are not listed again
            let listed: Vec<&Task> = tasks_for_date(tasks, *date)
                .into_iter()
                .filter(|task| !bars.iter().any(|bar| bar.task_id == task.id))
                .collect();
            if listed.is_empty() {
                continue;
            }

            let mut y = cell.top()
                + DAY_LABEL_HEIGHT
                + lanes_per_row[row] as f32 * (BAR_HEIGHT + BAR_GAP)
                + 2.0;
            for task in listed.iter().take(max_indicators) {
                if y + INDICATOR_HEIGHT > cell.bottom() {
                    break;
                }
                let rect = Rect::from_min_size(
                    Pos2::new(cell.left() + 3.0, y),
                    Vec2::new(cell.width() - 6.0, INDICATOR_HEIGHT),
                );
                let color = task_color(task);
                painter.rect_filled(rect, 3.0, with_alpha(color, 60));
                painter.rect_filled(
                    Rect::from_min_size(rect.min, Vec2::new(3.0, rect.height())),
                    1.0,
                    color,
                );
                let label = truncate_single_line_to_width(ui, &task.name, &font, palette.text, rect.width() - 8.0);
                painter.text(
                    Pos2::new(rect.left() + 6.0, rect.center().y),
                    Align2::LEFT_CENTER,
                    label,
                    font.clone(),
                    palette.text,
                );
                hits.push(IndicatorHit {
                    rect,
                    task_id: task.id.clone(),
                });
                y += INDICATOR_HEIGHT + 1.0;
            }

            if listed.len() > max_indicators && y + INDICATOR_HEIGHT <= cell.bottom() {
                painter.text(
                    Pos2::new(cell.left() + 5.0, y),
                    Align2::LEFT_TOP,
                    format!("+{} more", listed.len() - max_indicators),
                    font.clone(),
                    palette.muted_text,
                );
            }
        }

        hits
    }

    fn paint_resize_badge(
        ui: &egui::Ui,
        painter: &egui::Painter,
        grid_rect: Rect,
        edge: ResizeEdge,
        start: NaiveDate,
        end: NaiveDate,
        palette: &CalendarCellPalette,
    ) {
        let text = format!(
            "{}: {} to {}",
            edge.label(),
            start.format("%b %-d"),
            end.format("%b %-d")
        );
        let anchor = ui
            .input(|i| i.pointer.hover_pos())
            .map(|pos| pos + Vec2::new(14.0, 14.0))
            .unwrap_or(grid_rect.left_top() + Vec2::new(8.0, 8.0));

        let font = FontId::proportional(12.0);
        let galley = ui.fonts(|f| f.layout_no_wrap(text, font, palette.text));
        let badge = Rect::from_min_size(anchor, galley.size() + Vec2::new(12.0, 8.0));
        painter.rect_filled(badge, 4.0, palette.regular_bg);
        painter.rect_stroke(badge, 4.0, Stroke::new(1.0, palette.hover_border));
        painter.galley(badge.min + Vec2::new(6.0, 4.0), galley, palette.text);
    }

    fn collect_pointer_events(
        ui: &egui::Ui,
        grid_rect: Rect,
        grid: &MonthGrid,
        session: &DragSession,
        bar_hits: &[BarHit],
        indicator_hits: &[IndicatorHit],
    ) -> MonthViewResult {
        let mut result = MonthViewResult::default();
        let (hover_pos, pressed, released) = ui.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let hovered_date = hover_pos
            .and_then(|pos| cell_at(grid_rect, pos))
            .and_then(|index| grid.days().get(index).copied());

        let mut active = session.is_active();

        if let (Some(pos), Some(date)) = (hover_pos, hovered_date) {
            let target = hit_target(bar_hits, pos);

            if !active {
                ui.ctx().set_cursor_icon(match &target {
                    Some(DragTarget::Edge(..)) => CursorIcon::ResizeHorizontal,
                    Some(DragTarget::Body(_)) => CursorIcon::Grab,
                    None if indicator_hits.iter().any(|hit| hit.rect.contains(pos)) => {
                        CursorIcon::PointingHand
                    }
                    None => CursorIcon::Crosshair,
                });
            }

            if pressed && !active {
                let indicator = indicator_hits.iter().find(|hit| hit.rect.contains(pos));
                match indicator {
                    Some(indicator) if target.is_none() => {
                        result.edit_request = Some(indicator.task_id.clone());
                    }
                    _ => {
                        result.pointer_events.push(PointerEvent::Down { date, target });
                        active = true;
                    }
                }
            } else if active && session.cursor_date() != Some(date) {
                result.pointer_events.push(PointerEvent::Move { date });
            }
        }

        if active {
            match session.mode() {
                Some(DragMode::Resize) => ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal),
                Some(DragMode::Move) => ui.ctx().set_cursor_icon(CursorIcon::Grabbing),
                _ => {}
            }

            if released {
                result.pointer_events.push(PointerEvent::Up);
            } else if hovered_date.is_none() {
                result.pointer_events.push(PointerEvent::Leave);
            }
        }

        result
    }
}

/// Resize handles win over the bar body; later bars are drawn on top
fn hit_target(bar_hits: &[BarHit], pos: Pos2) -> Option<DragTarget> {
    let hit = bar_hits.iter().rev().find(|hit| hit.rect.contains(pos))?;
    let (start_handle, end_handle) = handle_rects(hit.rect);
    let subject = hit.subject.clone();

    Some(if start_handle.contains(pos) {
        DragTarget::Edge(subject, ResizeEdge::Start)
    } else if end_handle.contains(pos) {
        DragTarget::Edge(subject, ResizeEdge::End)
    } else {
        DragTarget::Body(subject)
    })
}

fn cell_size(grid_rect: Rect) -> Vec2 {
    Vec2::new(
        grid_rect.width() / GRID_COLUMNS as f32,
        grid_rect.height() / GRID_ROWS as f32,
    )
}

fn cell_rect(grid_rect: Rect, index: usize) -> Rect {
    let size = cell_size(grid_rect);
    let min = Pos2::new(
        grid_rect.left() + MonthGrid::col_of(index) as f32 * size.x,
        grid_rect.top() + MonthGrid::row_of(index) as f32 * size.y,
    );
    Rect::from_min_size(min, size)
}

/// Grid index under `pos`, if it is inside the grid
fn cell_at(grid_rect: Rect, pos: Pos2) -> Option<usize> {
    if !grid_rect.contains(pos) {
        return None;
    }
    let size = cell_size(grid_rect);
    let col = (((pos.x - grid_rect.left()) / size.x) as usize).min(GRID_COLUMNS - 1);
    let row = (((pos.y - grid_rect.top()) / size.y) as usize).min(GRID_ROWS - 1);
    let index = row * GRID_COLUMNS + col;
    (index < GRID_CELLS).then_some(index)
}

fn bar_rect(grid_rect: Rect, bar: &TaskBarPlacement) -> Rect {
    let size = cell_size(grid_rect);
    let min = Pos2::new(
        grid_rect.left() + bar.left_fraction() * grid_rect.width() + 2.0,
        grid_rect.top()
            + bar.top_fraction() * grid_rect.height()
            + DAY_LABEL_HEIGHT
            + bar.lane as f32 * (BAR_HEIGHT + BAR_GAP),
    );
    Rect::from_min_size(min, Vec2::new(bar.span_cols() as f32 * size.x - 4.0, BAR_HEIGHT))
}

fn handle_rects(bar: Rect) -> (Rect, Rect) {
    let width = HANDLE_WIDTH.min(bar.width() / 3.0);
    (
        Rect::from_min_size(bar.min, Vec2::new(width, bar.height())),
        Rect::from_min_size(Pos2::new(bar.right() - width, bar.top()), Vec2::new(width, bar.height())),
    )
}

/// How many bar lanes fit in a cell while leaving room for one indicator
fn lane_capacity(cell_height: f32) -> usize {
    let room = cell_height - DAY_LABEL_HEIGHT - INDICATOR_HEIGHT;
    (room / (BAR_HEIGHT + BAR_GAP)).floor().max(0.0) as usize
}

fn lanes_per_row(bars: &[TaskBarPlacement]) -> [usize; GRID_ROWS] {
    let mut lanes = [0; GRID_ROWS];
    for bar in bars {
        lanes[bar.row] = lanes[bar.row].max(bar.lane + 1);
    }
    lanes
}

/// Truncate text to fit within a given pixel width, appending "…" when
/// anything was cut.
fn truncate_single_line_to_width(
    ui: &egui::Ui,
    text: &str,
    font_id: &FontId,
    color: Color32,
    max_width: f32,
) -> String {
    if max_width <= 0.0 {
        return String::new();
    }

    let measure_width = |candidate: &str| {
        let layout_job =
            egui::text::LayoutJob::simple(candidate.to_string(), font_id.clone(), color, f32::INFINITY);
        ui.fonts(|f| f.layout_job(layout_job).size().x)
    };

    if measure_width(text) <= max_width {
        return text.to_string();
    }

    let ellipsis = "…";
    if measure_width(ellipsis) > max_width {
        return String::new();
    }

    let mut boundaries: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
    boundaries.push(text.len());

    let mut low = 0usize;
    let mut high = boundaries.len().saturating_sub(1);
    while low < high {
        let mid = (low + high).div_ceil(2);
        let candidate = format!("{}{}", &text[..boundaries[mid]], ellipsis);
        if measure_width(&candidate) <= max_width {
            low = mid;
        } else {
            high = mid.saturating_sub(1);
        }
    }

    format!("{}{}", &text[..boundaries[low]], ellipsis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::TaskCategory;
    use crate::utils::date::month_grid;

    fn grid_rect() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 40.0), Vec2::new(700.0, 600.0))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cell_at_maps_positions_to_indices() {
        let rect = grid_rect();
        assert_eq!(cell_at(rect, Pos2::new(15.0, 45.0)), Some(0));
        assert_eq!(cell_at(rect, Pos2::new(10.0 + 250.0, 40.0 + 150.0)), Some(9));
        assert_eq!(cell_at(rect, Pos2::new(709.0, 639.0)), Some(41));
        assert_eq!(cell_at(rect, Pos2::new(5.0, 45.0)), None);
        assert_eq!(cell_at(rect, Pos2::new(100.0, 700.0)), None);
    }

    #[test]
    fn cell_rect_round_trips_through_cell_at() {
        let rect = grid_rect();
        for index in 0..GRID_CELLS {
            assert_eq!(cell_at(rect, cell_rect(rect, index).center()), Some(index));
        }
    }

    #[test]
    fn handles_take_precedence_over_body() {
        let grid = month_grid(2024, 2).unwrap();
        let task = Task::new("Sprint", TaskCategory::Review, ymd(2024, 3, 5), ymd(2024, 3, 7)).unwrap();
        let bars = place_task_bars(&grid, std::slice::from_ref(&task));
        let rect = bar_rect(grid_rect(), &bars[0]);
        let hits = vec![BarHit {
            rect,
            subject: DragSubject::from_task(&task),
        }];

        let left = Pos2::new(rect.left() + 1.0, rect.center().y);
        let right = Pos2::new(rect.right() - 1.0, rect.center().y);
        assert!(matches!(hit_target(&hits, left), Some(DragTarget::Edge(_, ResizeEdge::Start))));
        assert!(matches!(hit_target(&hits, right), Some(DragTarget::Edge(_, ResizeEdge::End))));
        assert!(matches!(hit_target(&hits, rect.center()), Some(DragTarget::Body(_))));
        assert!(hit_target(&hits, rect.center() + Vec2::new(0.0, 100.0)).is_none());
    }

    #[test]
    fn bar_sits_inside_its_start_cell_row() {
        let grid = month_grid(2024, 2).unwrap();
        let task = Task::new("Sprint", TaskCategory::ToDo, ymd(2024, 3, 5), ymd(2024, 3, 7)).unwrap();
        let bar = &place_task_bars(&grid, &[task])[0];
        let rect = bar_rect(grid_rect(), bar);

        assert_eq!(cell_at(grid_rect(), rect.left_center()), Some(9));
        assert_eq!(cell_at(grid_rect(), rect.right_center()), Some(11));
    }

    #[test]
    fn lane_capacity_and_row_lanes() {
        assert_eq!(lane_capacity(MIN_CELL_HEIGHT), 2);
        assert_eq!(lane_capacity(10.0), 0);

        let grid = month_grid(2024, 2).unwrap();
        let tasks = vec![
            Task::new("A", TaskCategory::ToDo, ymd(2024, 3, 4), ymd(2024, 3, 6)).unwrap(),
            Task::new("B", TaskCategory::ToDo, ymd(2024, 3, 5), ymd(2024, 3, 5)).unwrap(),
            Task::new("C", TaskCategory::ToDo, ymd(2024, 3, 20), ymd(2024, 3, 20)).unwrap(),
        ];
        let lanes = lanes_per_row(&place_task_bars(&grid, &tasks));
        assert_eq!(lanes, [0, 2, 0, 1, 0, 0]);
    }
}
