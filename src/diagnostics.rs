use std::fmt::Write as _;

use anyhow::Result;
use eframe::egui::Color32;

use crate::presentation::FrameModel;
use crate::render::background::{Background, band_rows};
use crate::theme::palette::BackgroundFill;
use crate::time_provider::SelectedTimeProvider;
use crate::todo::TodoList;

pub fn run_diagnostics(
    selected: &SelectedTimeProvider,
    background: &Background,
    todos: &TodoList,
) -> Result<()> {
    print!("{}", report(selected, background, todos)?);
    Ok(())
}

/// One frame of the display, described as text instead of drawn.
pub fn report(
    selected: &SelectedTimeProvider,
    background: &Background,
    todos: &TodoList,
) -> Result<String> {
    let frame = FrameModel::derive(selected.provider.now()?);
    let themes = background.themes()?;
    let theme = themes.select(frame.period);
    let hours = frame.period.hours();

    let mut out = String::new();
    writeln!(out, "Wallclock diagnostics")?;
    writeln!(out, "Time source: {}", selected.label)?;
    writeln!(out, "Background: {}", background.kind().label())?;
    writeln!(
        out,
        "Period: {} ({:02}:00-{:02}:00)",
        frame.period.label(),
        hours.start,
        hours.end
    )?;
    writeln!(out, "Time: {}", frame.time_text)?;
    writeln!(out, "Date: {}", frame.date_text)?;
    writeln!(out, "Text color: {}", hex(theme.text_color))?;

    match (&theme.background, background) {
        (BackgroundFill::Solid(None), _) => writeln!(out, "Fill: none")?,
        (BackgroundFill::Solid(Some(color)), _) => writeln!(out, "Fill: {}", hex(*color))?,
        (BackgroundFill::Gradient(stops), _) => {
            let stops: Vec<String> = stops
                .as_slice()
                .iter()
                .map(|stop| format!("{:.2} {}", stop.offset, hex(stop.color)))
                .collect();
            writeln!(out, "Gradient stops: {}", stops.join(", "))?;
        }
        (BackgroundFill::BitmapBand, Background::Bitmap(bitmap)) => {
            let image = bitmap.decode()?;
            let height = image.size[1] as u32;
            let rows = band_rows(frame.period, height);
            writeln!(out, "Wallpaper: {}", bitmap.source().display())?;
            writeln!(
                out,
                "Bitmap band: rows {}..{} of {}",
                rows.start, rows.end, height
            )?;
        }
        (BackgroundFill::BitmapBand, _) => writeln!(out, "Bitmap band: no wallpaper")?,
    }

    writeln!(out, "Todos ({}):", todos.len())?;
    for line in todos.iter() {
        writeln!(out, "  - {line}")?;
    }
    Ok(out)
}

fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
