//! The timestamp value type.
//!
//! A `Timestamp` carries the wall-clock date-time fields together with
//! its time zone, the way TIMESTAMP WITH TIME ZONE stores them. The zone
//! is either a resolved IANA zone or, when the label cannot be resolved,
//! a fixed offset that keeps the original label.

use chrono::{Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike};
use chrono_tz::Tz;
use std::fmt;

use crate::{Error, Result};

/// Time zone of a [`Timestamp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Zone {
    /// A zone resolved against the IANA database.
    Named(Tz),
    /// A zone known only by its offset. `name` keeps the label the
    /// server reported, which may itself be an offset spec like "+02:30".
    Fixed { name: String, offset: FixedOffset },
}

impl Zone {
    /// Resolves a zone label, falling back to a fixed offset labeled
    /// with the original string when the label is not an IANA name.
    pub fn resolve(name: &str, offset_hours: i32, offset_minutes: i32) -> Result<Zone> {
        if let Ok(tz) = name.parse::<Tz>() {
            return Ok(Zone::Named(tz));
        }
        let offset = fixed_offset(offset_hours, offset_minutes)?;
        Ok(Zone::Fixed { name: name.to_string(), offset })
    }

    /// A fixed UTC offset labeled with its own `±HH:MM` spec.
    pub fn fixed(offset_hours: i32, offset_minutes: i32) -> Result<Zone> {
        let offset = fixed_offset(offset_hours, offset_minutes)?;
        Ok(Zone::Fixed { name: offset_spec(offset), offset })
    }

    pub fn utc() -> Zone {
        Zone::Named(Tz::UTC)
    }

    pub fn name(&self) -> &str {
        match self {
            Zone::Named(tz) => tz.name(),
            Zone::Fixed { name, .. } => name,
        }
    }
}

fn fixed_offset(hours: i32, minutes: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(hours * 3600 + minutes * 60)
        .ok_or_else(|| Error::msg(format!("time zone offset {}:{} is out of range", hours, minutes)))
}

fn offset_spec(offset: FixedOffset) -> String {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.abs();
    format!("{}{:02}:{:02}", sign, total / 3600, total % 3600 / 60)
}

/// A date-time with a time zone, the driver's timestamp value.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    local: NaiveDateTime,
    zone: Zone,
}

impl Timestamp {
    pub fn new(local: NaiveDateTime, zone: Zone) -> Self {
        Self { local, zone }
    }

    pub fn from_parts(
        year: i32, month: u32, day: u32,
        hour: u32, min: u32, sec: u32, nsec: u32,
        zone: Zone,
    ) -> Result<Self> {
        let local = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_nano_opt(hour, min, sec, nsec))
            .ok_or_else(|| Error::msg(format!(
                "invalid timestamp fields {}-{}-{} {}:{}:{}.{}", year, month, day, hour, min, sec, nsec
            )))?;
        Ok(Self { local, zone })
    }

    /// Wall-clock date-time in the value's own zone.
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn zone_name(&self) -> &str {
        self.zone.name()
    }

    /// The UTC offset in effect for this value. For named zones the
    /// offset is looked up at the value's own date, so DST is honored.
    pub fn offset(&self) -> FixedOffset {
        match &self.zone {
            Zone::Fixed { offset, .. } => *offset,
            Zone::Named(tz) => match tz.offset_from_local_datetime(&self.local) {
                LocalResult::Single(offset) => offset.fix(),
                LocalResult::Ambiguous(earliest, _) => earliest.fix(),
                // A wall-clock time inside a DST gap; fall back to the
                // offset the instant-based lookup produces.
                LocalResult::None => tz.offset_from_utc_datetime(&self.local).fix(),
            },
        }
    }

    /// The instant this value denotes, as a UTC date-time.
    pub fn to_utc(&self) -> NaiveDateTime {
        self.local - Duration::seconds(i64::from(self.offset().local_minus_utc()))
    }

    /// The `±HH:MM` rendition of this value's offset, used as the
    /// construction retry spec when the zone label is not accepted.
    pub(crate) fn offset_spec(&self) -> String {
        offset_spec(self.offset())
    }

    pub(crate) fn year(&self) -> i16      { self.local.year() as i16 }
    pub(crate) fn month(&self) -> u8      { self.local.month() as u8 }
    pub(crate) fn day(&self) -> u8        { self.local.day() as u8 }
    pub(crate) fn hour(&self) -> u8       { self.local.hour() as u8 }
    pub(crate) fn minute(&self) -> u8     { self.local.minute() as u8 }
    pub(crate) fn second(&self) -> u8     { self.local.second() as u8 }
    pub(crate) fn nanosecond(&self) -> u32 { self.local.nanosecond() }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.local.format("%Y-%m-%d %H:%M:%S%.9f"), self.zone.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn named_zone_resolves() {
        let zone = Zone::resolve("America/New_York", 0, 0).unwrap();
        assert_eq!(zone, Zone::Named(chrono_tz::America::New_York));
        assert_eq!(zone.name(), "America/New_York");
    }

    #[test]
    fn synthetic_label_falls_back_to_fixed_offset() {
        let zone = Zone::resolve("NOT/AZone", 5, 30).unwrap();
        match &zone {
            Zone::Fixed { name, offset } => {
                assert_eq!(name, "NOT/AZone");
                assert_eq!(offset.local_minus_utc(), 5 * 3600 + 30 * 60);
            }
            other => panic!("unexpected zone: {:?}", other),
        }
    }

    #[test]
    fn negative_offset_components() {
        // OCI reports both components signed, e.g. -8:-30.
        let zone = Zone::resolve("PST8PDT-ISH", -8, -30).unwrap();
        let ts = Timestamp::new(local(2024, 6, 1, 12, 0, 0), zone);
        assert_eq!(ts.offset().local_minus_utc(), -(8 * 3600 + 30 * 60));
        assert_eq!(ts.offset_spec(), "-08:30");
    }

    #[test]
    fn offset_spec_formats() {
        let ts = Timestamp::new(local(2024, 1, 15, 9, 0, 0), Zone::fixed(5, 30).unwrap());
        assert_eq!(ts.offset_spec(), "+05:30");
        assert_eq!(ts.zone_name(), "+05:30");

        let ts = Timestamp::new(local(2024, 1, 15, 9, 0, 0), Zone::utc());
        assert_eq!(ts.offset_spec(), "+00:00");
    }

    #[test]
    fn named_zone_offset_honors_dst() {
        let zone = Zone::resolve("America/New_York", 0, 0).unwrap();
        let winter = Timestamp::new(local(2024, 1, 15, 12, 0, 0), zone.clone());
        assert_eq!(winter.offset().local_minus_utc(), -5 * 3600);
        let summer = Timestamp::new(local(2024, 7, 15, 12, 0, 0), zone);
        assert_eq!(summer.offset().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn to_utc_is_the_instant() {
        let ts = Timestamp::new(local(2024, 3, 1, 10, 30, 0), Zone::fixed(2, 0).unwrap());
        assert_eq!(ts.to_utc(), local(2024, 3, 1, 8, 30, 0));

        let ny = Zone::resolve("America/New_York", 0, 0).unwrap();
        let ts = Timestamp::new(local(2024, 1, 15, 7, 0, 0), ny);
        assert_eq!(ts.to_utc(), local(2024, 1, 15, 12, 0, 0));
    }

    #[test]
    fn from_parts_rejects_invalid_fields() {
        assert!(Timestamp::from_parts(2024, 13, 1, 0, 0, 0, 0, Zone::utc()).is_err());
        assert!(Timestamp::from_parts(2024, 2, 30, 0, 0, 0, 0, Zone::utc()).is_err());
    }
}
