pub mod background;
pub mod device;
pub mod egui_surface;
#[cfg(test)]
pub mod recording;
pub mod text;

use eframe::egui::{ColorImage, Color32, Pos2, Rect, Vec2};
use thiserror::Error;

use crate::render::background::GradientBrush;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("rendering device lost")]
    DeviceLost,
    #[error("failed to create {resource}: {reason}")]
    ResourceCreation {
        resource: &'static str,
        reason: String,
    },
    #[error("text layout failed: {0}")]
    TextLayout(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FontRole {
    Title,
    Subtitle,
    Body,
}

impl FontRole {
    pub fn size(self) -> f32 {
        match self {
            FontRole::Title => 128.0,
            FontRole::Subtitle => 70.0,
            FontRole::Body => 50.0,
        }
    }
}

pub struct TextBlock<L> {
    pub size: Vec2,
    pub layout: L,
}

/// The drawable client area plus the text layout service behind it.
///
/// `Texture` handles are owned by whoever created them; dropping a handle
/// releases the device object.
pub trait Surface {
    type Texture;
    type Layout;

    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Color32);
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn fill_vertical_gradient(&mut self, rect: Rect, brush: &GradientBrush);
    fn upload_texture(
        &mut self,
        name: &str,
        image: ColorImage,
    ) -> Result<Self::Texture, SurfaceError>;
    fn draw_texture(&mut self, texture: &Self::Texture, uv: Rect, dest: Rect);
    fn layout_text(
        &mut self,
        text: &str,
        role: FontRole,
        wrap_width: f32,
    ) -> Result<TextBlock<Self::Layout>, SurfaceError>;
    fn draw_text(&mut self, pos: Pos2, block: &TextBlock<Self::Layout>, color: Color32);
    fn end_frame(&mut self) -> Result<(), SurfaceError>;
}
