use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use eframe::egui::{Color32, ColorImage, Pos2, Rect, Vec2, pos2};

use crate::render::{Surface, SurfaceError};
use crate::theme::palette::{BackgroundFill, GradientStops, Theme, ThemeTable};
use crate::theme::period::Period;

pub const BITMAP_OVERLAY: Color32 = Color32::from_black_alpha(128);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BackgroundKind {
    Flat,
    Gradient,
    Bitmap,
}

impl BackgroundKind {
    pub fn label(self) -> &'static str {
        match self {
            BackgroundKind::Flat => "flat",
            BackgroundKind::Gradient => "gradient",
            BackgroundKind::Bitmap => "bitmap",
        }
    }
}

/// Device-bound objects for one background variant. Dropping the value
/// releases every handle it holds.
pub enum DeviceResources<T> {
    Flat,
    Gradient(Vec<GradientBrush>),
    Bitmap(BitmapResources<T>),
}

pub struct BitmapResources<T> {
    pub texture: T,
    pub pixel_size: [usize; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientBrush {
    pub stops: GradientStops,
    pub start: Pos2,
    pub end: Pos2,
}

impl GradientBrush {
    pub fn vertical(stops: GradientStops, size: Vec2) -> Self {
        let mut brush = Self {
            stops,
            start: Pos2::ZERO,
            end: Pos2::ZERO,
        };
        brush.fit(size);
        brush
    }

    pub fn fit(&mut self, size: Vec2) {
        self.start = pos2(size.x / 2.0, 0.0);
        self.end = pos2(size.x / 2.0, size.y);
    }

    pub fn spans(&self) -> Vec<(f32, Color32)> {
        let length = self.end.y - self.start.y;
        self.stops
            .as_slice()
            .iter()
            .map(|stop| (self.start.y + stop.offset * length, stop.color))
            .collect()
    }
}

pub trait BackgroundRenderer {
    fn create_resources<S: Surface>(
        &self,
        surface: &mut S,
        themes: &ThemeTable,
    ) -> Result<DeviceResources<S::Texture>, SurfaceError>;

    fn resize<T>(&self, _resources: &mut DeviceResources<T>, _size: Vec2) {}

    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        resources: &DeviceResources<S::Texture>,
        theme: &Theme,
    );
}

pub struct FlatBackground;

impl BackgroundRenderer for FlatBackground {
    fn create_resources<S: Surface>(
        &self,
        _surface: &mut S,
        _themes: &ThemeTable,
    ) -> Result<DeviceResources<S::Texture>, SurfaceError> {
        Ok(DeviceResources::Flat)
    }

    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        _resources: &DeviceResources<S::Texture>,
        theme: &Theme,
    ) {
        if let BackgroundFill::Solid(Some(color)) = theme.background {
            let rect = Rect::from_min_size(Pos2::ZERO, surface.size());
            surface.fill_rect(rect, color);
        }
    }
}

pub struct GradientBackground;

impl BackgroundRenderer for GradientBackground {
    fn create_resources<S: Surface>(
        &self,
        surface: &mut S,
        themes: &ThemeTable,
    ) -> Result<DeviceResources<S::Texture>, SurfaceError> {
        let size = surface.size();
        let mut brushes = Vec::with_capacity(Period::ALL.len());
        for theme in themes.iter() {
            let BackgroundFill::Gradient(stops) = &theme.background else {
                return Err(SurfaceError::ResourceCreation {
                    resource: "gradient brush",
                    reason: format!("{} theme has no gradient stops", theme.period.label()),
                });
            };
            brushes.push(GradientBrush::vertical(stops.clone(), size));
        }
        Ok(DeviceResources::Gradient(brushes))
    }

    fn resize<T>(&self, resources: &mut DeviceResources<T>, size: Vec2) {
        if let DeviceResources::Gradient(brushes) = resources {
            for brush in brushes {
                brush.fit(size);
            }
        }
    }

    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        resources: &DeviceResources<S::Texture>,
        theme: &Theme,
    ) {
        let DeviceResources::Gradient(brushes) = resources else {
            return;
        };
        if let Some(brush) = brushes.get(theme.period.ordinal()) {
            let rect = Rect::from_min_size(Pos2::ZERO, surface.size());
            surface.fill_vertical_gradient(rect, brush);
        }
    }
}

pub struct BitmapBackground {
    source: PathBuf,
    bytes: Vec<u8>,
}

impl BitmapBackground {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("unable to read wallpaper {}", path.display()))?;
        Ok(Self::from_bytes(path.to_path_buf(), bytes))
    }

    pub fn from_bytes(source: PathBuf, bytes: Vec<u8>) -> Self {
        Self { source, bytes }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn decode(&self) -> Result<ColorImage, SurfaceError> {
        let decoded = image::load_from_memory(&self.bytes).map_err(|err| {
            SurfaceError::ResourceCreation {
                resource: "wallpaper bitmap",
                reason: format!("{}: {err}", self.source.display()),
            }
        })?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
    }
}

impl BackgroundRenderer for BitmapBackground {
    fn create_resources<S: Surface>(
        &self,
        surface: &mut S,
        _themes: &ThemeTable,
    ) -> Result<DeviceResources<S::Texture>, SurfaceError> {
        let image = self.decode()?;
        let pixel_size = image.size;
        let texture = surface.upload_texture("wallpaper", image)?;
        Ok(DeviceResources::Bitmap(BitmapResources {
            texture,
            pixel_size,
        }))
    }

    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        resources: &DeviceResources<S::Texture>,
        theme: &Theme,
    ) {
        let DeviceResources::Bitmap(bitmap) = resources else {
            return;
        };
        let height = bitmap.pixel_size[1] as u32;
        let uv = band_uv(band_rows(theme.period, height), height);
        let dest = Rect::from_min_size(Pos2::ZERO, surface.size());
        surface.draw_texture(&bitmap.texture, uv, dest);
        surface.fill_rect(dest, BITMAP_OVERLAY);
    }
}

/// Rows of the source bitmap shown during `period`. Both ends use the same
/// integer division so the four bands tile the full height with no gap.
pub fn band_rows(period: Period, height: u32) -> Range<u32> {
    let ordinal = period.ordinal() as u64;
    let height = u64::from(height);
    let start = ordinal * height / 4;
    let end = (ordinal + 1) * height / 4;
    start as u32..end as u32
}

pub fn band_uv(rows: Range<u32>, height: u32) -> Rect {
    if height == 0 {
        return Rect::from_min_max(Pos2::ZERO, pos2(1.0, 0.0));
    }
    let height = height as f32;
    Rect::from_min_max(
        pos2(0.0, rows.start as f32 / height),
        pos2(1.0, rows.end as f32 / height),
    )
}

pub enum Background {
    Flat(FlatBackground),
    Gradient(GradientBackground),
    Bitmap(BitmapBackground),
}

impl Background {
    pub fn load(kind: BackgroundKind, wallpaper: Option<&Path>) -> Result<Self> {
        match (kind, wallpaper) {
            (BackgroundKind::Flat, _) => Ok(Background::Flat(FlatBackground)),
            (BackgroundKind::Gradient, _) => Ok(Background::Gradient(GradientBackground)),
            (BackgroundKind::Bitmap, Some(path)) => {
                Ok(Background::Bitmap(BitmapBackground::load(path)?))
            }
            (BackgroundKind::Bitmap, None) => {
                bail!("bitmap background requires --wallpaper <PATH>")
            }
        }
    }

    pub fn kind(&self) -> BackgroundKind {
        match self {
            Background::Flat(_) => BackgroundKind::Flat,
            Background::Gradient(_) => BackgroundKind::Gradient,
            Background::Bitmap(_) => BackgroundKind::Bitmap,
        }
    }

    pub fn themes(&self) -> Result<ThemeTable> {
        Ok(match self {
            Background::Flat(_) => ThemeTable::flat(),
            Background::Gradient(_) => ThemeTable::gradient()?,
            Background::Bitmap(_) => ThemeTable::bitmap(),
        })
    }
}

impl BackgroundRenderer for Background {
    fn create_resources<S: Surface>(
        &self,
        surface: &mut S,
        themes: &ThemeTable,
    ) -> Result<DeviceResources<S::Texture>, SurfaceError> {
        match self {
            Background::Flat(flat) => flat.create_resources(surface, themes),
            Background::Gradient(gradient) => gradient.create_resources(surface, themes),
            Background::Bitmap(bitmap) => bitmap.create_resources(surface, themes),
        }
    }

    fn resize<T>(&self, resources: &mut DeviceResources<T>, size: Vec2) {
        match self {
            Background::Flat(flat) => flat.resize(resources, size),
            Background::Gradient(gradient) => gradient.resize(resources, size),
            Background::Bitmap(bitmap) => bitmap.resize(resources, size),
        }
    }

    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        resources: &DeviceResources<S::Texture>,
        theme: &Theme,
    ) {
        match self {
            Background::Flat(flat) => flat.draw(surface, resources, theme),
            Background::Gradient(gradient) => gradient.draw(surface, resources, theme),
            Background::Bitmap(bitmap) => bitmap.draw(surface, resources, theme),
        }
    }
}
