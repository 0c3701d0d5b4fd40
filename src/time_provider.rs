use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WallClockSample {
    pub hour: u32,
    pub minute: u32,
    pub weekday: u32,
    pub day: u32,
    pub month: u32,
}

impl WallClockSample {
    pub fn new(hour: u32, minute: u32, weekday: u32, day: u32, month: u32) -> Result<Self> {
        let sample = Self {
            hour,
            minute,
            weekday,
            day,
            month,
        };
        validate_sample(&sample)?;
        Ok(sample)
    }

    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self> {
        Self::from_naive(&datetime.naive_local())
    }

    pub fn from_naive(datetime: &NaiveDateTime) -> Result<Self> {
        Self::new(
            datetime.hour(),
            datetime.minute(),
            datetime.weekday().num_days_from_sunday(),
            datetime.day(),
            datetime.month(),
        )
    }
}

pub trait TimeProvider {
    fn now(&self) -> Result<WallClockSample>;
}

pub struct LocalTimeProvider;

impl TimeProvider for LocalTimeProvider {
    fn now(&self) -> Result<WallClockSample> {
        WallClockSample::from_datetime(&Local::now())
    }
}

pub struct FixedTimeProvider {
    at: NaiveDateTime,
}

impl FixedTimeProvider {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now(&self) -> Result<WallClockSample> {
        WallClockSample::from_naive(&self.at)
    }
}

pub struct SelectedTimeProvider {
    pub provider: Box<dyn TimeProvider>,
    pub label: &'static str,
}

pub fn select_provider(fixed_at: Option<NaiveDateTime>) -> SelectedTimeProvider {
    match fixed_at {
        Some(at) => SelectedTimeProvider {
            provider: Box::new(FixedTimeProvider::new(at)),
            label: "FIXED",
        },
        None => SelectedTimeProvider {
            provider: Box::new(LocalTimeProvider),
            label: "LOCAL_CLOCK",
        },
    }
}

pub fn parse_fixed_time(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .map_err(|_| anyhow::anyhow!("invalid local time '{input}', expected YYYY-MM-DDTHH:MM[:SS]"))
}

pub fn validate_sample(sample: &WallClockSample) -> Result<()> {
    if sample.hour > 23 {
        bail!("hour field out of range: {}", sample.hour);
    }
    if sample.minute > 59 {
        bail!("minute field out of range: {}", sample.minute);
    }
    if sample.weekday > 6 {
        bail!("weekday field out of range: {}", sample.weekday);
    }
    if !(1..=31).contains(&sample.day) {
        bail!("day field out of range: {}", sample.day);
    }
    if !(1..=12).contains(&sample.month) {
        bail!("month field out of range: {}", sample.month);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use chrono_tz::America::New_York;

    use super::*;

    #[test]
    fn local_provider_produces_valid_samples() {
        let sample = LocalTimeProvider.now().expect("sample");
        validate_sample(&sample).expect("sample should stay in valid range");
    }

    #[test]
    fn weekday_counts_from_sunday() {
        let monday = NaiveDate::from_ymd_opt(2022, 1, 3)
            .and_then(|date| date.and_hms_opt(7, 5, 0))
            .expect("valid datetime");
        let sample = WallClockSample::from_naive(&monday).expect("valid sample");
        assert_eq!(
            sample,
            WallClockSample {
                hour: 7,
                minute: 5,
                weekday: 1,
                day: 3,
                month: 1,
            }
        );
    }

    #[test]
    fn sample_uses_wall_time_of_the_zone() {
        let instant = Utc
            .with_ymd_and_hms(2026, 1, 1, 3, 30, 0)
            .single()
            .expect("valid instant");
        let sample = WallClockSample::from_datetime(&instant.with_timezone(&New_York))
            .expect("valid sample");
        assert_eq!(sample.hour, 22);
        assert_eq!(sample.day, 31);
        assert_eq!(sample.month, 12);
        assert_eq!(sample.weekday, 3);
    }

    #[test]
    fn fixed_provider_repeats_the_same_sample() {
        let at = parse_fixed_time("2022-08-22T23:59").expect("valid time");
        let provider = FixedTimeProvider::new(at);
        let first = provider.now().expect("first");
        let second = provider.now().expect("second");
        assert_eq!(first, second);
        assert_eq!((first.hour, first.minute, first.day), (23, 59, 22));
    }

    #[test]
    fn validating_constructor_rejects_out_of_range_fields() {
        assert!(WallClockSample::new(24, 0, 0, 1, 1).is_err());
        assert!(WallClockSample::new(0, 60, 0, 1, 1).is_err());
        assert!(WallClockSample::new(0, 0, 7, 1, 1).is_err());
        assert!(WallClockSample::new(0, 0, 0, 0, 1).is_err());
        assert!(WallClockSample::new(0, 0, 0, 1, 13).is_err());
        assert!(WallClockSample::new(23, 59, 6, 31, 12).is_ok());
    }

    #[test]
    fn fixed_time_parser_accepts_minutes_and_seconds() {
        assert!(parse_fixed_time("2022-01-03T07:05").is_ok());
        assert!(parse_fixed_time("2022-01-03T07:05:30").is_ok());
        assert!(parse_fixed_time("2022-01-03 07:05").is_ok());
        assert!(parse_fixed_time("07:05").is_err());
    }
}
