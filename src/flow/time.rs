use crate::error::TimeError;
use std::fmt;
use std::str::FromStr;

/// Units a step delay can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    /// Length of one unit in milliseconds.
    pub fn millis(self) -> u64 {
        match self {
            TimeUnit::Days => 86_400_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Seconds => 1_000,
        }
    }

    fn plural(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }

    fn singular(self) -> &'static str {
        let plural = self.plural();
        &plural[..plural.len() - 1]
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plural())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" => Ok(TimeUnit::Days),
            "hours" => Ok(TimeUnit::Hours),
            "minutes" => Ok(TimeUnit::Minutes),
            "seconds" => Ok(TimeUnit::Seconds),
            other => Err(TimeError::InvalidUnit(other.to_string())),
        }
    }
}

/// A step delay as a human would enter it: a positive integer and a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanTime {
    pub value: u64,
    pub unit: TimeUnit,
}

impl HumanTime {
    pub fn new(value: u64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// Parses raw editor input. Non-numeric values and values below one
    /// are rejected before any conversion happens.
    pub fn parse(value: &str, unit: &str) -> Result<Self, TimeError> {
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|_| TimeError::InvalidValue(value.to_string()))?;
        if parsed < 1 {
            return Err(TimeError::NonPositive(parsed));
        }
        Ok(Self::new(parsed as u64, unit.parse()?))
    }

    /// Converts a millisecond delay to the largest unit that divides it
    /// exactly. Delays that are not whole seconds round to the nearest
    /// second.
    pub fn from_millis(millis: u64) -> Self {
        for unit in [TimeUnit::Days, TimeUnit::Hours, TimeUnit::Minutes] {
            if millis % unit.millis() == 0 {
                return Self::new(millis / unit.millis(), unit);
            }
        }
        let seconds = (millis as f64 / 1_000.0).round() as u64;
        Self::new(seconds, TimeUnit::Seconds)
    }

    pub fn to_millis(self) -> u64 {
        self.value * self.unit.millis()
    }
}

impl fmt::Display for HumanTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.value == 1 {
            self.unit.singular()
        } else {
            self.unit.plural()
        };
        write!(f, "{} {}", self.value, unit)
    }
}
