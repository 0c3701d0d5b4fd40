use eframe::egui::pos2;

use crate::presentation::FrameModel;
use crate::render::{FontRole, Surface, SurfaceError};
use crate::theme::palette::Theme;
use crate::todo::TodoList;

pub const RIGHT_PADDING: f32 = 50.0;
pub const TODO_LEFT: f32 = 50.0;
pub const TODO_TOP: f32 = 250.0;
pub const TODO_SPACING: f32 = 10.0;

/// Draws the time and date flush against the right padding, the date under
/// the measured time block, then the todo lines stacked from the top left.
pub fn compose_and_draw<S: Surface>(
    surface: &mut S,
    frame: &FrameModel,
    todos: &TodoList,
    theme: &Theme,
) -> Result<(), SurfaceError> {
    let size = surface.size();
    let color = theme.text_color;
    let right_edge = (size.x - RIGHT_PADDING).max(0.0);

    let time = surface.layout_text(&frame.time_text, FontRole::Title, right_edge)?;
    surface.draw_text(pos2(right_edge - time.size.x, 0.0), &time, color);

    let date = surface.layout_text(&frame.date_text, FontRole::Subtitle, right_edge)?;
    surface.draw_text(pos2(right_edge - date.size.x, time.size.y), &date, color);

    if todos.is_empty() {
        return Ok(());
    }
    let wrap_width = (size.x - TODO_LEFT).max(0.0);
    let mut y = TODO_TOP;
    for line in todos.iter() {
        let block = surface.layout_text(line, FontRole::Body, wrap_width)?;
        surface.draw_text(pos2(TODO_LEFT, y), &block, color);
        y += block.size.y + TODO_SPACING;
    }
    Ok(())
}
