use crate::model::error::schedule::ScheduleError;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const SCHEDULE_TIME_FORMAT: &str = "%H:%M";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
        };
        f.write_str(name)
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "once" => Ok(Frequency::Once),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(ScheduleError::unknown_frequency(value)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl ScheduleDay {
    pub fn weekday(self) -> Weekday {
        match self {
            ScheduleDay::Monday => Weekday::Mon,
            ScheduleDay::Tuesday => Weekday::Tue,
            ScheduleDay::Wednesday => Weekday::Wed,
            ScheduleDay::Thursday => Weekday::Thu,
            ScheduleDay::Friday => Weekday::Fri,
            ScheduleDay::Saturday => Weekday::Sat,
            ScheduleDay::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for ScheduleDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for ScheduleDay {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let weekday = value
            .parse::<Weekday>()
            .map_err(|_| ScheduleError::unknown_day(value))?;
        let day = match weekday {
            Weekday::Mon => ScheduleDay::Monday,
            Weekday::Tue => ScheduleDay::Tuesday,
            Weekday::Wed => ScheduleDay::Wednesday,
            Weekday::Thu => ScheduleDay::Thursday,
            Weekday::Fri => ScheduleDay::Friday,
            Weekday::Sat => ScheduleDay::Saturday,
            Weekday::Sun => ScheduleDay::Sunday,
        };
        Ok(day)
    }
}

/// Wall-clock time of day with minute precision, persisted as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduleTime(NaiveTime);

impl ScheduleTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ScheduleTime)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SCHEDULE_TIME_FORMAT))
    }
}

impl FromStr for ScheduleTime {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(value.trim(), SCHEDULE_TIME_FORMAT)
            .map(ScheduleTime)
            .map_err(|err| ScheduleError::invalid_time(value, err))
    }
}

impl Serialize for ScheduleTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduleTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub frequency: Frequency,
    pub time: ScheduleTime,
    #[serde(default)]
    pub day: Option<ScheduleDay>,
}

impl Schedule {
    pub fn once(time: ScheduleTime) -> Self {
        Self {
            frequency: Frequency::Once,
            time,
            day: None,
        }
    }

    pub fn daily(time: ScheduleTime) -> Self {
        Self {
            frequency: Frequency::Daily,
            time,
            day: None,
        }
    }

    pub fn weekly(day: ScheduleDay, time: ScheduleTime) -> Self {
        Self {
            frequency: Frequency::Weekly,
            time,
            day: Some(day),
        }
    }

    /// Enforces the day invariant: required for weekly schedules, dropped otherwise.
    pub fn normalized(self) -> Result<Self, ScheduleError> {
        match (self.frequency, self.day) {
            (Frequency::Weekly, None) => Err(ScheduleError::MissingWeekday),
            (Frequency::Weekly, Some(_)) => Ok(self),
            (_, _) => Ok(Self { day: None, ..self }),
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency != Frequency::Once
    }

    /// First instant strictly after `after` at which this schedule triggers.
    pub fn next_run_after(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        let time = self.time.time();
        match (self.frequency, self.day) {
            (Frequency::Once, _) => None,
            (Frequency::Daily, _) => {
                let candidate = after.date().and_time(time);
                if candidate > after {
                    Some(candidate)
                } else {
                    Some(candidate + Duration::days(1))
                }
            }
            (Frequency::Weekly, Some(day)) => {
                let today = after.date().weekday().num_days_from_monday() as i64;
                let target = day.weekday().num_days_from_monday() as i64;
                let offset = (target - today).rem_euclid(7);
                let candidate = (after.date() + Duration::days(offset)).and_time(time);
                if candidate > after {
                    Some(candidate)
                } else {
                    Some(candidate + Duration::days(7))
                }
            }
            (Frequency::Weekly, None) => None,
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.frequency, self.day) {
            (Frequency::Weekly, Some(day)) => write!(f, "Weekly at {} on {}", self.time, day),
            (frequency, _) => write!(f, "{} at {}", frequency, self.time),
        }
    }
}
