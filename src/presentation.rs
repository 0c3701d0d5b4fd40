use crate::theme::period::Period;
use crate::time_provider::WallClockSample;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Everything one tick derives from the clock, before any drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameModel {
    pub sample: WallClockSample,
    pub period: Period,
    pub time_text: String,
    pub date_text: String,
}

impl FrameModel {
    pub fn derive(sample: WallClockSample) -> Self {
        Self {
            sample,
            period: Period::classify(sample.hour),
            time_text: format_time(&sample),
            date_text: format_date(&sample),
        }
    }
}

pub fn format_time(sample: &WallClockSample) -> String {
    format!("{:02}:{:02}", sample.hour, sample.minute)
}

pub fn format_date(sample: &WallClockSample) -> String {
    format!(
        "{} {}{} {}",
        weekday_name(sample.weekday),
        sample.day,
        ordinal_suffix(sample.day),
        month_name(sample.month)
    )
}

// Suffix follows the last digit only; the teens are not special-cased, so
// 11, 12 and 13 read "11st", "12nd" and "13rd".
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn weekday_name(weekday: u32) -> &'static str {
    WEEKDAY_NAMES
        .get(weekday as usize)
        .copied()
        .unwrap_or("Unknown")
}

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("Unknown")
}
