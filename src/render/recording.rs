use std::io::Cursor;

use eframe::egui::{ColorImage, Color32, Pos2, Rect, Vec2, vec2};

use crate::render::background::GradientBrush;
use crate::render::{FontRole, Surface, SurfaceError, TextBlock};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color32),
    FillRect { rect: Rect, color: Color32 },
    Gradient { rect: Rect, spans: Vec<(f32, Color32)> },
    Texture { texture: u32, uv: Rect, dest: Rect },
    Text { pos: Pos2, text: String, role: FontRole, color: Color32 },
}

/// Surface double that records every call. Text is measured as half the
/// font size per character and 1.25 times the font size per line.
pub struct RecordingSurface {
    pub size: Vec2,
    pub ops: Vec<DrawOp>,
    pub uploads: Vec<String>,
    pub failing_uploads: usize,
    pub lose_device_on_next_frame: bool,
    pub frames_ended: usize,
    next_texture: u32,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
            uploads: Vec::new(),
            failing_uploads: 0,
            lose_device_on_next_frame: false,
            frames_ended: 0,
            next_texture: 1,
        }
    }

    pub fn texts(&self) -> Vec<(Pos2, String)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { pos, text, .. } => Some((*pos, text.clone())),
                _ => None,
            })
            .collect()
    }
}

pub fn measure(text: &str, role: FontRole) -> Vec2 {
    let size = role.size();
    vec2(text.chars().count() as f32 * size * 0.5, size * 1.25)
}

impl Surface for RecordingSurface {
    type Texture = u32;
    type Layout = (String, FontRole);

    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color32) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, brush: &GradientBrush) {
        self.ops.push(DrawOp::Gradient {
            rect,
            spans: brush.spans(),
        });
    }

    fn upload_texture(&mut self, name: &str, _image: ColorImage) -> Result<u32, SurfaceError> {
        if self.failing_uploads > 0 {
            self.failing_uploads -= 1;
            return Err(SurfaceError::ResourceCreation {
                resource: "texture",
                reason: format!("upload of {name} refused"),
            });
        }
        self.uploads.push(name.to_string());
        let id = self.next_texture;
        self.next_texture += 1;
        Ok(id)
    }

    fn draw_texture(&mut self, texture: &u32, uv: Rect, dest: Rect) {
        self.ops.push(DrawOp::Texture {
            texture: *texture,
            uv,
            dest,
        });
    }

    fn layout_text(
        &mut self,
        text: &str,
        role: FontRole,
        _wrap_width: f32,
    ) -> Result<TextBlock<Self::Layout>, SurfaceError> {
        Ok(TextBlock {
            size: measure(text, role),
            layout: (text.to_string(), role),
        })
    }

    fn draw_text(&mut self, pos: Pos2, block: &TextBlock<Self::Layout>, color: Color32) {
        self.ops.push(DrawOp::Text {
            pos,
            text: block.layout.0.clone(),
            role: block.layout.1,
            color,
        });
    }

    fn end_frame(&mut self) -> Result<(), SurfaceError> {
        self.frames_ended += 1;
        if self.lose_device_on_next_frame {
            self.lose_device_on_next_frame = false;
            return Err(SurfaceError::DeviceLost);
        }
        Ok(())
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 80, 120, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}
