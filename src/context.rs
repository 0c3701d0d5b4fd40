use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui::Color32;
use tracing::debug;

use crate::power::SleepInhibitor;
use crate::presentation::FrameModel;
use crate::render::background::{Background, BackgroundRenderer};
use crate::render::device::{DeviceLifecycle, PaintOutcome};
use crate::render::{Surface, text};
use crate::theme::palette::ThemeTable;
use crate::ticker::Ticker;
use crate::time_provider::SelectedTimeProvider;
use crate::todo::{ReloadOutcome, TodoStore};

/// Everything the running window owns. `T` is the texture handle type of
/// the surface it paints on.
pub struct AppContext<T> {
    clock: SelectedTimeProvider,
    themes: ThemeTable,
    frame: FrameModel,
    todos: TodoStore,
    device: DeviceLifecycle<T>,
    ticker: Ticker,
    sleep: SleepInhibitor,
}

impl<T> AppContext<T> {
    pub fn new(
        clock: SelectedTimeProvider,
        background: Background,
        todos: TodoStore,
        sleep: SleepInhibitor,
    ) -> Result<Self> {
        let themes = background.themes()?;
        let frame = FrameModel::derive(clock.provider.now()?);
        Ok(Self {
            clock,
            themes,
            frame,
            todos,
            device: DeviceLifecycle::new(background),
            ticker: Ticker::default(),
            sleep,
        })
    }

    /// Runs the tick if one is due. Returns whether it ran.
    pub fn poll_tick(&mut self, now: Instant, focused: bool) -> Result<bool> {
        if !self.ticker.poll(now) {
            return Ok(false);
        }
        self.tick(focused)?;
        Ok(true)
    }

    pub fn tick(&mut self, focused: bool) -> Result<()> {
        let sample = self.clock.provider.now()?;
        let frame = FrameModel::derive(sample);
        if frame.period != self.frame.period {
            debug!(
                hour = frame.sample.hour,
                from = self.frame.period.label(),
                to = frame.period.label(),
                "period changed"
            );
        }
        self.frame = frame;
        self.sleep.update(focused);
        Ok(())
    }

    pub fn on_focus_changed(&mut self, focused: bool) {
        self.sleep.update(focused);
    }

    pub fn reload_todos(&mut self) -> ReloadOutcome {
        self.todos.reload()
    }

    pub fn until_next_tick(&self, now: Instant) -> Duration {
        self.ticker.until_next(now)
    }

    pub fn paint<S>(&mut self, surface: &mut S) -> PaintOutcome
    where
        S: Surface<Texture = T>,
    {
        let size = surface.size();
        if size != self.device.size() {
            self.device.resize(size);
        }

        let theme = self.themes.select(self.frame.period);
        let frame = &self.frame;
        let todos = self.todos.list();
        self.device
            .paint(surface, &self.themes, |surface, background, resources| {
                surface.clear(Color32::BLACK);
                background.draw(surface, resources, theme);
                text::compose_and_draw(surface, frame, todos, theme)
            })
    }

    pub fn shutdown(&mut self) {
        self.device.teardown();
        self.sleep.release();
    }
}

#[cfg(test)]
impl<T> AppContext<T> {
    pub fn frame(&self) -> &FrameModel {
        &self.frame
    }

    pub fn device(&self) -> &DeviceLifecycle<T> {
        &self.device
    }

    pub fn sleep(&self) -> &SleepInhibitor {
        &self.sleep
    }
}
