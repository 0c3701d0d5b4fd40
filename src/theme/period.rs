use std::ops::Range;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Morning,
        Period::Afternoon,
        Period::Evening,
        Period::Night,
    ];

    /// Maps an hour of the day (0..=23) onto its band. Each band is
    /// half-open: the lower hour belongs to it, the upper one does not.
    pub fn classify(hour: u32) -> Period {
        debug_assert!(hour < 24, "hour out of range: {hour}");
        match hour % 24 {
            6..=11 => Period::Morning,
            12..=17 => Period::Afternoon,
            18..=23 => Period::Evening,
            _ => Period::Night,
        }
    }

    pub fn ordinal(self) -> usize {
        match self {
            Period::Morning => 0,
            Period::Afternoon => 1,
            Period::Evening => 2,
            Period::Night => 3,
        }
    }

    pub fn hours(self) -> Range<u32> {
        match self {
            Period::Morning => 6..12,
            Period::Afternoon => 12..18,
            Period::Evening => 18..24,
            Period::Night => 0..6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
            Period::Night => "Night",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hour_lands_in_exactly_one_band() {
        for hour in 0..24 {
            let owners: Vec<Period> = Period::ALL
                .into_iter()
                .filter(|period| period.hours().contains(&hour))
                .collect();
            assert_eq!(owners.len(), 1, "hour {hour} owned by {owners:?}");
            assert_eq!(Period::classify(hour), owners[0]);
        }
    }

    #[test]
    fn bands_cover_the_whole_day() {
        let total: u32 = Period::ALL
            .into_iter()
            .map(|period| period.hours().len() as u32)
            .sum();
        assert_eq!(total, 24);
    }

    #[test]
    fn boundaries_are_lower_inclusive() {
        assert_eq!(Period::classify(0), Period::Night);
        assert_eq!(Period::classify(5), Period::Night);
        assert_eq!(Period::classify(6), Period::Morning);
        assert_eq!(Period::classify(11), Period::Morning);
        assert_eq!(Period::classify(12), Period::Afternoon);
        assert_eq!(Period::classify(17), Period::Afternoon);
        assert_eq!(Period::classify(18), Period::Evening);
        assert_eq!(Period::classify(23), Period::Evening);
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        for (index, period) in Period::ALL.into_iter().enumerate() {
            assert_eq!(period.ordinal(), index);
        }
    }
}
