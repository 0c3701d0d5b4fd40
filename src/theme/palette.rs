use eframe::egui::Color32;
use thiserror::Error;

use crate::theme::period::Period;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    #[error("gradient needs at least two stops, got {count}")]
    TooFewStops { count: usize },
    #[error("gradient stop {index} has offset {offset} outside [0, 1]")]
    OffsetOutOfRange { index: usize, offset: f32 },
    #[error("gradient must start at offset 0, starts at {offset}")]
    FirstOffsetNotZero { offset: f32 },
    #[error("gradient must end at offset 1, ends at {offset}")]
    LastOffsetNotOne { offset: f32 },
    #[error("gradient stop {index} offset {offset} does not increase past {previous}")]
    NotIncreasing {
        index: usize,
        previous: f32,
        offset: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color32,
}

pub const fn stop(offset: f32, color: Color32) -> GradientStop {
    GradientStop { offset, color }
}

/// Stops of a top-to-bottom gradient. Offsets are strictly increasing,
/// running from exactly 0.0 to exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStops {
    stops: Vec<GradientStop>,
}

impl GradientStops {
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, ThemeError> {
        if stops.len() < 2 {
            return Err(ThemeError::TooFewStops { count: stops.len() });
        }
        for (index, stop) in stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(ThemeError::OffsetOutOfRange {
                    index,
                    offset: stop.offset,
                });
            }
        }
        let first = stops[0].offset;
        if first != 0.0 {
            return Err(ThemeError::FirstOffsetNotZero { offset: first });
        }
        let last = stops[stops.len() - 1].offset;
        if last != 1.0 {
            return Err(ThemeError::LastOffsetNotOne { offset: last });
        }
        for (index, pair) in stops.windows(2).enumerate() {
            if pair[1].offset <= pair[0].offset {
                return Err(ThemeError::NotIncreasing {
                    index: index + 1,
                    previous: pair[0].offset,
                    offset: pair[1].offset,
                });
            }
        }
        Ok(Self { stops })
    }

    pub fn as_slice(&self) -> &[GradientStop] {
        &self.stops
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundFill {
    Solid(Option<Color32>),
    Gradient(GradientStops),
    BitmapBand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub period: Period,
    pub background: BackgroundFill,
    pub text_color: Color32,
}

#[derive(Debug, Clone)]
pub struct ThemeTable {
    themes: [Theme; 4],
}

pub const FLAT_TEXT: Color32 = Color32::from_rgb(255, 255, 0);
pub const BITMAP_TEXT: Color32 = Color32::from_rgb(245, 245, 240);

impl ThemeTable {
    pub fn flat() -> Self {
        Self::uniform(BackgroundFill::Solid(None), FLAT_TEXT)
    }

    pub fn bitmap() -> Self {
        Self::uniform(BackgroundFill::BitmapBand, BITMAP_TEXT)
    }

    pub fn gradient() -> Result<Self, ThemeError> {
        let morning = GradientStops::new(vec![
            stop(0.0, Color32::from_rgb(250, 208, 196)),
            stop(0.45, Color32::from_rgb(255, 236, 210)),
            stop(1.0, Color32::from_rgb(160, 212, 240)),
        ])?;
        let afternoon = GradientStops::new(vec![
            stop(0.0, Color32::from_rgb(86, 171, 255)),
            stop(1.0, Color32::from_rgb(196, 232, 255)),
        ])?;
        let evening = GradientStops::new(vec![
            stop(0.0, Color32::from_rgb(44, 30, 88)),
            stop(0.55, Color32::from_rgb(196, 84, 96)),
            stop(1.0, Color32::from_rgb(255, 170, 90)),
        ])?;
        let night = GradientStops::new(vec![
            stop(0.0, Color32::from_rgb(4, 6, 20)),
            stop(0.6, Color32::from_rgb(12, 20, 48)),
            stop(1.0, Color32::from_rgb(28, 36, 72)),
        ])?;
        Ok(Self {
            themes: [
                Theme {
                    period: Period::Morning,
                    background: BackgroundFill::Gradient(morning),
                    text_color: Color32::from_rgb(30, 40, 70),
                },
                Theme {
                    period: Period::Afternoon,
                    background: BackgroundFill::Gradient(afternoon),
                    text_color: Color32::from_rgb(20, 36, 64),
                },
                Theme {
                    period: Period::Evening,
                    background: BackgroundFill::Gradient(evening),
                    text_color: Color32::from_rgb(255, 240, 220),
                },
                Theme {
                    period: Period::Night,
                    background: BackgroundFill::Gradient(night),
                    text_color: Color32::from_rgb(200, 210, 255),
                },
            ],
        })
    }

    fn uniform(background: BackgroundFill, text_color: Color32) -> Self {
        Self {
            themes: Period::ALL.map(|period| Theme {
                period,
                background: background.clone(),
                text_color,
            }),
        }
    }

    pub fn select(&self, period: Period) -> &Theme {
        &self.themes[period.ordinal()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }
}
