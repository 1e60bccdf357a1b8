//! Day-bucketed epoch tags and the clock seam that produces them.
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const DATE_TAG_FORMAT: &str = "%Y%m%d";

/// Calendar day rendered as `YYYYMMDD`, mixed into every seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateTag(String);

impl DateTag {
    pub fn from_date(date: NaiveDate) -> Self {
        DateTag(date.format(DATE_TAG_FORMAT).to_string())
    }

    /// Parse an explicit `YYYYMMDD` tag. The value must name a real calendar day.
    pub fn parse(tag: &str) -> Result<Self, Error> {
        if tag.len() != 8 || !tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidDateTag(format!(
                "expected 8 digits (YYYYMMDD), got {tag:?}"
            )));
        }
        let date = NaiveDate::parse_from_str(tag, DATE_TAG_FORMAT)
            .map_err(|e| Error::InvalidDateTag(format!("{tag}: {e}")))?;
        Ok(Self::from_date(date))
    }

    /// Read today's UTC date from `clock`. This is the only place a clock is consulted.
    pub fn today(clock: &dyn Clock) -> Result<Self, Error> {
        clock.today_utc().map(Self::from_date)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for DateTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DateTag {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DateTag::parse(&value)
    }
}

impl From<DateTag> for String {
    fn from(tag: DateTag) -> Self {
        tag.0
    }
}

/// Source of the current UTC calendar day. Consulted once per run, never by the core.
pub trait Clock: Send + Sync {
    fn today_utc(&self) -> Result<NaiveDate, Error>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today_utc(&self) -> Result<NaiveDate, Error> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::ClockUnavailable(e.to_string()))?;
        let secs = i64::try_from(elapsed.as_secs())
            .map_err(|e| Error::ClockUnavailable(e.to_string()))?;
        DateTime::from_timestamp(secs, 0)
            .map(|now| now.date_naive())
            .ok_or_else(|| Error::ClockUnavailable("timestamp out of range".into()))
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today_utc(&self) -> Result<NaiveDate, Error> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_date_zero_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(DateTag::from_date(date).as_str(), "20240105");
    }

    #[test]
    fn parse_accepts_real_days() {
        let tag = DateTag::parse("20240229").expect("leap day");
        assert_eq!(tag.to_string(), "20240229");
    }

    #[test]
    fn parse_rejects_malformed_tags() {
        for bad in ["2024061", "2024-06-15", "20230229", "20241301", "+2024061", ""] {
            let err = DateTag::parse(bad).expect_err(bad);
            assert!(matches!(err, Error::InvalidDateTag(_)), "{bad}");
        }
    }

    #[test]
    fn fixed_clock_drives_today() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(DateTag::today(&clock).unwrap().as_str(), "20240615");
    }

    #[test]
    fn system_clock_yields_eight_digit_tag() {
        let tag = DateTag::today(&SystemClock).expect("system clock");
        assert_eq!(tag.as_str().len(), 8);
    }

    #[test]
    fn serde_uses_plain_string() {
        let tag = DateTag::parse("20240615").unwrap();
        let s = serde_json::to_string(&tag).unwrap();
        assert_eq!(s, "\"20240615\"");
        let back: DateTag = serde_json::from_str(&s).unwrap();
        assert_eq!(back, tag);
        assert!(serde_json::from_str::<DateTag>("\"2024\"").is_err());
    }
}
