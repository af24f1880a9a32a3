//! Form rendering

use crate::former::Former;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

/// Stack the form's cells top to bottom, highlighting the row at `cursor`.
/// Rows that do not fit are not drawn.
pub fn draw_form(frame: &mut Frame, area: Rect, former: &Former, cursor: Option<usize>) {
    let cells = former.cells();
    let constraints: Vec<Constraint> = cells
        .iter()
        .map(|cell| Constraint::Length(cell.try_borrow().map_or(3, |cell| cell.height())))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let areas = Layout::vertical(constraints).split(area);

    for (index, cell) in cells.iter().enumerate() {
        let cell_area = areas[index];
        if cell_area.height == 0 {
            continue;
        }
        match cell.try_borrow() {
            Ok(cell) => cell.render(frame, cell_area, cursor == Some(index)),
            Err(_) => tracing::warn!(index, "cell busy, not drawn"),
        }
    }
}
