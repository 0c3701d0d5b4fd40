use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use eframe::egui::{
    self, CursorIcon, Key, LayerId, Rgba, TextureHandle, ViewportBuilder, ViewportCommand,
    ViewportInfo,
};
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::render::device::PaintOutcome;
use crate::render::egui_surface::EguiSurface;
use crate::todo::ReloadOutcome;
use crate::ui::dialogs;

const WINDOWED_SIZE: [f32; 2] = [1280.0, 720.0];

pub fn run_gui(context: AppContext<TextureHandle>, windowed: bool) -> Result<()> {
    let viewport = ViewportBuilder::default().with_title("Wallclock");
    let viewport = if windowed {
        viewport.with_inner_size(WINDOWED_SIZE)
    } else {
        viewport.with_fullscreen(true).with_decorations(false)
    };
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let fatal = Rc::new(Cell::new(None));
    let app = WallclockApp::new(context, Rc::clone(&fatal));

    eframe::run_native(
        "Wallclock",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow!("failed to launch wallclock window: {err}"))?;

    match fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// Unknown focus counts as background until the windowing system says otherwise.
fn has_focus(viewport: &ViewportInfo) -> bool {
    viewport.focused.unwrap_or(false)
}

struct WallclockApp {
    context: AppContext<TextureHandle>,
    focused: Option<bool>,
    closing: bool,
    fatal: Rc<Cell<Option<anyhow::Error>>>,
}

impl WallclockApp {
    fn new(context: AppContext<TextureHandle>, fatal: Rc<Cell<Option<anyhow::Error>>>) -> Self {
        Self {
            context,
            focused: None,
            closing: false,
            fatal,
        }
    }

    fn fail(&mut self, ctx: &egui::Context, err: anyhow::Error) {
        if self.closing {
            return;
        }
        self.closing = true;
        error!(error = format!("{err:#}"), "unrecoverable rendering failure");
        dialogs::show_fatal(&format!("{err:#}"));
        self.fatal.set(Some(err));
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }

    fn handle_keys(&mut self, ctx: &egui::Context, reload: bool, quit: bool) {
        if reload {
            match self.context.reload_todos() {
                ReloadOutcome::Replaced { count } => info!(count, "todos reloaded"),
                ReloadOutcome::KeptPrevious { count } => {
                    warn!(count, "todo reload failed, showing previous list")
                }
            }
            ctx.request_repaint();
        }
        if quit && !self.closing && dialogs::confirm_quit() {
            self.closing = true;
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }
}

impl eframe::App for WallclockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_cursor_icon(CursorIcon::None);

        let (focused, reload, quit) = ctx.input(|input| {
            (
                has_focus(input.viewport()),
                input.key_released(Key::F5),
                input.key_pressed(Key::Escape),
            )
        });

        if self.focused != Some(focused) {
            self.focused = Some(focused);
            self.context.on_focus_changed(focused);
        }
        self.handle_keys(ctx, reload, quit);

        if let Err(err) = self.context.poll_tick(Instant::now(), focused) {
            warn!(error = format!("{err:#}"), "clock sample failed, keeping previous frame");
        }

        let mut surface = EguiSurface::new(ctx.layer_painter(LayerId::background()));
        match self.context.paint(&mut surface) {
            PaintOutcome::Drawn | PaintOutcome::Skipped => {}
            PaintOutcome::DeviceLost => ctx.request_repaint(),
            PaintOutcome::Fatal(err) => self.fail(ctx, err.into()),
        }

        ctx.request_repaint_after(self.context.until_next_tick(Instant::now()));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        Rgba::BLACK.to_array()
    }
}

impl Drop for WallclockApp {
    fn drop(&mut self) {
        self.context.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_is_only_claimed_once_reported() {
        let mut viewport = ViewportInfo::default();
        assert!(!has_focus(&viewport));

        viewport.focused = Some(true);
        assert!(has_focus(&viewport));

        viewport.focused = Some(false);
        assert!(!has_focus(&viewport));
    }
}
