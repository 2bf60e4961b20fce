//! Classification bands for today's temperature

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where today's maximum falls within the month's day-time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayBand {
    RecordHeat,
    ConsiderablyWarm,
    ModeratelyWarm,
    Average,
    ModeratelyCold,
    ConsiderablyCold,
    ExtremelyCold,
}

/// Where today's minimum falls within the month's night-time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NightBand {
    RecordCold,
    ConsiderablyCold,
    ModeratelyCold,
    Average,
    ModeratelyWarm,
    ConsiderablyWarm,
    ExtremelyHot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureBand {
    Day(DayBand),
    Night(NightBand),
}

impl DayBand {
    pub const ALL: [DayBand; 7] = [
        DayBand::RecordHeat,
        DayBand::ConsiderablyWarm,
        DayBand::ModeratelyWarm,
        DayBand::Average,
        DayBand::ModeratelyCold,
        DayBand::ConsiderablyCold,
        DayBand::ExtremelyCold,
    ];

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            DayBand::RecordHeat => "Record heat in the day for this month",
            DayBand::ConsiderablyWarm => "Considerably warm in the day for this month",
            DayBand::ModeratelyWarm => "Moderately warm in the day for this month",
            DayBand::Average => "Average temperature in the day for this month",
            DayBand::ModeratelyCold => "Moderately cold in the day for this month",
            DayBand::ConsiderablyCold => "Considerably cold in the day for this month",
            DayBand::ExtremelyCold => "Extremely cold in the day for this month",
        }
    }
}

impl NightBand {
    pub const ALL: [NightBand; 7] = [
        NightBand::RecordCold,
        NightBand::ConsiderablyCold,
        NightBand::ModeratelyCold,
        NightBand::Average,
        NightBand::ModeratelyWarm,
        NightBand::ConsiderablyWarm,
        NightBand::ExtremelyHot,
    ];

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            NightBand::RecordCold => "Record cold at night for this month",
            NightBand::ConsiderablyCold => "Considerably cold at night for this month",
            NightBand::ModeratelyCold => "Moderately cold at night for this month",
            NightBand::Average => "Average temperature at night for this month",
            NightBand::ModeratelyWarm => "Moderately warm at night for this month",
            NightBand::ConsiderablyWarm => "Considerably warm at night for this month",
            NightBand::ExtremelyHot => "Extremely hot at night for this month",
        }
    }
}

impl TemperatureBand {
    /// Human-readable comparison message
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            TemperatureBand::Day(band) => band.message(),
            TemperatureBand::Night(band) => band.message(),
        }
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<DayBand> for TemperatureBand {
    fn from(band: DayBand) -> Self {
        TemperatureBand::Day(band)
    }
}

impl From<NightBand> for TemperatureBand {
    fn from(band: NightBand) -> Self {
        TemperatureBand::Night(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_messages_are_distinct() {
        let day: HashSet<_> = DayBand::ALL.iter().map(DayBand::message).collect();
        let night: HashSet<_> = NightBand::ALL.iter().map(NightBand::message).collect();
        assert_eq!(day.len(), 7);
        assert_eq!(night.len(), 7);
        assert!(day.is_disjoint(&night));
    }

    #[test]
    fn test_display_uses_message() {
        let band = TemperatureBand::from(NightBand::ExtremelyHot);
        assert_eq!(band.to_string(), "Extremely hot at night for this month");
    }
}
