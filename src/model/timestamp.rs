use std::fmt;

use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Month-granular game date. One simulation turn is one month.
///
/// Stored as a flat month count from game start, so natural `u32`
/// ordering equals chronological ordering and turn arithmetic is
/// plain integer math.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "DateRepr", from = "DateRepr")]
pub struct GameDate(u32);

#[derive(Serialize, Deserialize)]
struct DateRepr {
    year: u32,
    month: u32,
}

impl From<GameDate> for DateRepr {
    fn from(date: GameDate) -> Self {
        DateRepr {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl From<DateRepr> for GameDate {
    fn from(repr: DateRepr) -> Self {
        GameDate::new(repr.year, repr.month)
    }
}

impl GameDate {
    /// Create a date from year (0-based) and month of year (1–12).
    pub fn new(year: u32, month: u32) -> Self {
        assert!(
            (1..=MONTHS_PER_YEAR).contains(&month),
            "month out of range: {month}"
        );
        Self(year * MONTHS_PER_YEAR + (month - 1))
    }

    /// Start of a year (month 1).
    pub fn from_year(year: u32) -> Self {
        Self::new(year, 1)
    }

    /// Create a date from a flat turn index (months since start).
    pub fn from_turn(turn: u32) -> Self {
        Self(turn)
    }

    pub fn year(self) -> u32 {
        self.0 / MONTHS_PER_YEAR
    }

    /// Month of year (1–12).
    pub fn month(self) -> u32 {
        self.0 % MONTHS_PER_YEAR + 1
    }

    /// Flat turn index: months elapsed since game start.
    pub fn turn(self) -> u32 {
        self.0
    }

    /// The following month.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Whole months from `earlier` to `self`. Zero if `earlier` is later.
    pub fn months_since(self, earlier: GameDate) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Default for GameDate {
    fn default() -> Self {
        Self::from_year(0)
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}.M{}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_round_trip() {
        let date = GameDate::new(12, 7);
        assert_eq!(date.year(), 12);
        assert_eq!(date.month(), 7);
        assert_eq!(date.turn(), 12 * 12 + 6);
    }

    #[test]
    fn from_year_defaults_to_month_one() {
        let date = GameDate::from_year(30);
        assert_eq!(date.year(), 30);
        assert_eq!(date.month(), 1);
    }

    #[test]
    fn chronological_ordering() {
        let a = GameDate::new(5, 1);
        let b = GameDate::new(5, 2);
        let c = GameDate::new(6, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn next_rolls_over_year() {
        let date = GameDate::new(3, 12);
        assert_eq!(date.next(), GameDate::new(4, 1));
    }

    #[test]
    fn months_since_saturates() {
        let early = GameDate::new(1, 3);
        let late = GameDate::new(2, 3);
        assert_eq!(late.months_since(early), 12);
        assert_eq!(early.months_since(late), 0);
    }

    #[test]
    fn serde_shape() {
        let date = GameDate::new(8, 4);
        let value = serde_json::to_value(date).unwrap();
        assert_eq!(value["year"], 8);
        assert_eq!(value["month"], 4);
        let parsed: GameDate = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn display_format() {
        assert_eq!(GameDate::new(25, 11).to_string(), "Y25.M11");
    }

    #[test]
    #[should_panic(expected = "month out of range")]
    fn month_zero_panics() {
        GameDate::new(1, 0);
    }
}
