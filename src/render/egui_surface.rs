use std::sync::Arc;

use eframe::egui::epaint::Mesh;
use eframe::egui::{
    Color32, ColorImage, FontId, Galley, Painter, Pos2, Rect, Shape, TextureHandle,
    TextureId, TextureOptions, Vec2, pos2,
};
use image::imageops::{self, FilterType};
use tracing::info;

use crate::render::background::GradientBrush;
use crate::render::{FontRole, Surface, SurfaceError, TextBlock};

/// Surface backed by an egui painter for the current frame. Textures it
/// uploads are `TextureHandle`s, freed by egui when the last handle drops.
pub struct EguiSurface {
    painter: Painter,
    drawn_textures: Vec<TextureId>,
}

impl EguiSurface {
    pub fn new(painter: Painter) -> Self {
        Self {
            painter,
            drawn_textures: Vec::new(),
        }
    }

    fn bounds(&self) -> Rect {
        self.painter.clip_rect()
    }
}

fn font_for(role: FontRole) -> FontId {
    FontId::monospace(role.size())
}

fn gradient_mesh(rect: Rect, brush: &GradientBrush) -> Mesh {
    let mut mesh = Mesh::default();
    for (index, (y, color)) in brush.spans().into_iter().enumerate() {
        mesh.colored_vertex(pos2(rect.left(), y), color);
        mesh.colored_vertex(pos2(rect.right(), y), color);
        if index > 0 {
            let base = (index as u32 - 1) * 2;
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base + 1, base + 3, base + 2);
        }
    }
    mesh
}

/// Scales `image` down so neither side exceeds `max_side`, keeping its aspect.
fn fit_to_side(image: ColorImage, max_side: usize) -> Result<ColorImage, SurfaceError> {
    let [width, height] = image.size;
    let largest = width.max(height);
    if largest <= max_side {
        return Ok(image);
    }
    if max_side == 0 {
        return Err(SurfaceError::ResourceCreation {
            resource: "texture",
            reason: "maximum texture side is zero".to_string(),
        });
    }

    let scale = max_side as f64 / largest as f64;
    let target = |side: usize| ((side as f64 * scale).round() as u32).clamp(1, max_side as u32);
    let source = image::RgbaImage::from_raw(width as u32, height as u32, image.as_raw().to_vec())
        .ok_or_else(|| SurfaceError::ResourceCreation {
            resource: "texture",
            reason: format!("pixel buffer does not match {width}x{height}"),
        })?;
    let resized = imageops::resize(&source, target(width), target(height), FilterType::Triangle);
    info!(
        from_width = width,
        from_height = height,
        width = resized.width(),
        height = resized.height(),
        "texture scaled down to the maximum texture side"
    );
    Ok(ColorImage::from_rgba_premultiplied(
        [resized.width() as usize, resized.height() as usize],
        resized.as_raw(),
    ))
}

impl Surface for EguiSurface {
    type Texture = TextureHandle;
    type Layout = Arc<Galley>;

    fn size(&self) -> Vec2 {
        self.bounds().size()
    }

    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.bounds(), 0.0, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(rect, 0.0, color);
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, brush: &GradientBrush) {
        self.painter.add(Shape::mesh(gradient_mesh(rect, brush)));
    }

    fn upload_texture(
        &mut self,
        name: &str,
        image: ColorImage,
    ) -> Result<TextureHandle, SurfaceError> {
        if image.size[0] == 0 || image.size[1] == 0 {
            return Err(SurfaceError::ResourceCreation {
                resource: "texture",
                reason: format!("{name} has an empty size {:?}", image.size),
            });
        }
        let ctx = self.painter.ctx();
        let max_side = ctx.input(|input| input.max_texture_side);
        let image = fit_to_side(image, max_side)?;
        Ok(ctx.load_texture(name, image, TextureOptions::LINEAR))
    }

    fn draw_texture(&mut self, texture: &TextureHandle, uv: Rect, dest: Rect) {
        self.drawn_textures.push(texture.id());
        self.painter.image(texture.id(), dest, uv, Color32::WHITE);
    }

    fn layout_text(
        &mut self,
        text: &str,
        role: FontRole,
        wrap_width: f32,
    ) -> Result<TextBlock<Arc<Galley>>, SurfaceError> {
        if !wrap_width.is_finite() {
            return Err(SurfaceError::TextLayout(format!(
                "wrap width {wrap_width} is not finite"
            )));
        }
        let galley = self.painter.layout(
            text.to_owned(),
            font_for(role),
            Color32::PLACEHOLDER,
            wrap_width,
        );
        Ok(TextBlock {
            size: galley.size(),
            layout: galley,
        })
    }

    fn draw_text(&mut self, pos: Pos2, block: &TextBlock<Arc<Galley>>, color: Color32) {
        self.painter.galley(pos, Arc::clone(&block.layout), color);
    }

    // glow never reports device loss, and a texture held by the resources
    // stays registered, so this only catches a texture freed while in use.
    fn end_frame(&mut self) -> Result<(), SurfaceError> {
        let manager = self.painter.ctx().tex_manager();
        let manager = manager.read();
        if self
            .drawn_textures
            .drain(..)
            .any(|id| manager.meta(id).is_none())
        {
            return Err(SurfaceError::DeviceLost);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Context, LayerId, RawInput, vec2};

    use super::*;
    use crate::theme::palette::{GradientStops, stop};

    fn in_frame(mut body: impl FnMut(&mut EguiSurface, usize)) {
        let ctx = Context::default();
        let _ = ctx.run(RawInput::default(), |ctx| {
            let max_side = ctx.input(|input| input.max_texture_side);
            let mut surface = EguiSurface::new(ctx.layer_painter(LayerId::background()));
            body(&mut surface, max_side);
        });
    }

    #[test]
    fn gradient_mesh_has_a_quad_per_span() {
        let stops = GradientStops::new(vec![
            stop(0.0, Color32::BLACK),
            stop(0.4, Color32::RED),
            stop(1.0, Color32::WHITE),
        ])
        .expect("valid stops");
        let brush = GradientBrush::vertical(stops, vec2(800.0, 600.0));
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        let mesh = gradient_mesh(rect, &brush);
        assert_eq!(mesh.vertices.len(), 2 * 3);
        assert_eq!(mesh.indices.len(), 6 * 2);
        assert!(mesh.indices.iter().all(|index| (*index as usize) < mesh.vertices.len()));
        assert_eq!(mesh.vertices[0].pos, pos2(0.0, 0.0));
        assert_eq!(mesh.vertices[5].pos, pos2(800.0, 600.0));
    }

    #[test]
    fn empty_images_are_rejected() {
        in_frame(|surface, _| {
            let result = surface.upload_texture("empty", ColorImage::new([0, 0], Color32::BLACK));
            assert!(matches!(
                result,
                Err(SurfaceError::ResourceCreation { resource: "texture", .. })
            ));
        });
    }

    #[test]
    fn oversized_images_are_scaled_to_the_maximum_side() {
        in_frame(|surface, max_side| {
            let image = ColorImage::new([4, max_side * 4 + 4], Color32::BLUE);
            let texture = surface.upload_texture("wallpaper", image).expect("upload");
            let [width, height] = texture.size();
            assert_eq!(height, max_side);
            assert!(width >= 1 && width <= max_side);
        });
    }

    #[test]
    fn fitting_keeps_small_images_untouched() {
        let image = ColorImage::new([16, 64], Color32::GREEN);
        let fitted = fit_to_side(image.clone(), 2048).expect("fit");
        assert_eq!(fitted, image);

        let fitted = fit_to_side(ColorImage::new([400, 1600], Color32::GREEN), 800).expect("fit");
        assert_eq!(fitted.size, [200, 800]);
    }

    #[test]
    fn non_finite_wrap_width_is_a_layout_error() {
        in_frame(|surface, _| {
            let result = surface.layout_text("07:05", FontRole::Title, f32::INFINITY);
            assert!(matches!(result, Err(SurfaceError::TextLayout(_))));
        });
    }

    #[test]
    fn frame_with_a_live_texture_ends_cleanly() {
        in_frame(|surface, _| {
            let texture = surface
                .upload_texture("wallpaper", ColorImage::new([4, 8], Color32::WHITE))
                .expect("upload");
            let full = Rect::from_min_size(Pos2::ZERO, surface.size());
            surface.draw_texture(&texture, Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0)), full);
            assert!(surface.end_frame().is_ok());
        });
    }
}
