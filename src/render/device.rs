use eframe::egui::Vec2;
use tracing::{debug, info, warn};

use crate::render::background::{Background, BackgroundRenderer, DeviceResources};
use crate::render::{Surface, SurfaceError};
use crate::theme::palette::ThemeTable;

// A second consecutive creation failure ends the session.
const MAX_CREATION_ATTEMPTS: u32 = 2;

pub enum DeviceState<T> {
    Uninitialized,
    Ready(DeviceResources<T>),
    Lost,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DevicePhase {
    Uninitialized,
    Ready,
    Lost,
}

#[derive(Debug)]
pub enum PaintOutcome {
    Drawn,
    Skipped,
    DeviceLost,
    Fatal(SurfaceError),
}

pub struct DeviceLifecycle<T> {
    background: Background,
    state: DeviceState<T>,
    size: Vec2,
    creation_failures: u32,
}

impl<T> DeviceLifecycle<T> {
    pub fn new(background: Background) -> Self {
        Self {
            background,
            state: DeviceState::Uninitialized,
            size: Vec2::ZERO,
            creation_failures: 0,
        }
    }

    pub fn phase(&self) -> DevicePhase {
        match self.state {
            DeviceState::Uninitialized => DevicePhase::Uninitialized,
            DeviceState::Ready(_) => DevicePhase::Ready,
            DeviceState::Lost => DevicePhase::Lost,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn resources(&self) -> Option<&DeviceResources<T>> {
        match &self.state {
            DeviceState::Ready(resources) => Some(resources),
            _ => None,
        }
    }

    pub fn ensure<S>(&mut self, surface: &mut S, themes: &ThemeTable) -> Result<(), SurfaceError>
    where
        S: Surface<Texture = T>,
    {
        let recovering = match self.phase() {
            DevicePhase::Ready => return Ok(()),
            DevicePhase::Lost => true,
            DevicePhase::Uninitialized => false,
        };
        self.size = surface.size();
        match self.background.create_resources(surface, themes) {
            Ok(resources) => {
                info!(
                    background = self.background.kind().label(),
                    width = self.size.x,
                    height = self.size.y,
                    recovering,
                    "device resources created"
                );
                self.state = DeviceState::Ready(resources);
                self.creation_failures = 0;
                Ok(())
            }
            Err(err) => {
                self.creation_failures += 1;
                self.state = if recovering {
                    DeviceState::Lost
                } else {
                    DeviceState::Uninitialized
                };
                Err(err)
            }
        }
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
        if let DeviceState::Ready(resources) = &mut self.state {
            debug!(width = size.x, height = size.y, "resizing device resources");
            self.background.resize(resources, size);
        }
    }

    pub fn mark_lost(&mut self) {
        if matches!(self.state, DeviceState::Ready(_)) {
            warn!("rendering device lost, releasing device resources");
        }
        self.state = DeviceState::Lost;
    }

    pub fn teardown(&mut self) {
        if !matches!(self.state, DeviceState::Uninitialized) {
            debug!("device resources released");
        }
        self.state = DeviceState::Uninitialized;
    }

    /// Runs one frame: lazily creates resources, hands them to `draw`, then
    /// checks the surface for device loss. `draw` only runs when Ready.
    pub fn paint<S, F>(&mut self, surface: &mut S, themes: &ThemeTable, draw: F) -> PaintOutcome
    where
        S: Surface<Texture = T>,
        F: FnOnce(&mut S, &Background, &DeviceResources<T>) -> Result<(), SurfaceError>,
    {
        if let Err(err) = self.ensure(surface, themes) {
            if self.creation_failures >= MAX_CREATION_ATTEMPTS {
                return PaintOutcome::Fatal(err);
            }
            warn!(error = %err, "device resource creation failed, retrying on next paint");
            return PaintOutcome::Skipped;
        }

        let Some(resources) = self.resources() else {
            return PaintOutcome::Skipped;
        };
        if let Err(err) = draw(surface, &self.background, resources) {
            return PaintOutcome::Fatal(err);
        }

        match surface.end_frame() {
            Ok(()) => PaintOutcome::Drawn,
            Err(err) => {
                debug!(error = %err, "end of frame reported failure");
                self.mark_lost();
                PaintOutcome::DeviceLost
            }
        }
    }
}
