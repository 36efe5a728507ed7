//! Legacy 7-byte DATE codec.
//!
//! A DATE column travels as seven bytes:
//! `[century+100, year-of-century+100, month, day, hour+1, minute+1, second+1]`.
//! The `+100`/`+1` biases are the client library's convention for this
//! type, not arbitrary offsets.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Error, Result};

pub(crate) const DATE_LEN: usize = 7;

pub(crate) fn decode(buf: &[u8]) -> Result<NaiveDateTime> {
    if buf.len() < DATE_LEN {
        return Err(Error::msg(format!("short DATE buffer: {} bytes", buf.len())));
    }
    if buf[4] == 0 || buf[5] == 0 || buf[6] == 0 {
        return Err(Error::msg(format!("invalid DATE bytes: {:?}", &buf[..DATE_LEN])));
    }
    let year = (buf[0] as i32 - 100) * 100 + (buf[1] as i32 - 100);
    let month = buf[2] as u32;
    let day = buf[3] as u32;
    let hour = buf[4] as u32 - 1;
    let min = buf[5] as u32 - 1;
    let sec = buf[6] as u32 - 1;
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, sec))
        .ok_or_else(|| Error::msg(format!("invalid DATE bytes: {:?}", &buf[..DATE_LEN])))
}

#[allow(dead_code)]
pub(crate) fn encode(datetime: &NaiveDateTime) -> [u8; DATE_LEN] {
    use chrono::{Datelike, Timelike};
    let year = datetime.year();
    [
        (year / 100 + 100) as u8,
        (year % 100 + 100) as u8,
        datetime.month() as u8,
        datetime.day() as u8,
        (datetime.hour() + 1) as u8,
        (datetime.minute() + 1) as u8,
        (datetime.second() + 1) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn decode_applies_biases() {
        // 1950-08-07 15:30:45
        let buf = [119u8, 150, 8, 7, 16, 31, 46];
        let expected = NaiveDate::from_ymd_opt(1950, 8, 7).unwrap().and_hms_opt(15, 30, 45).unwrap();
        assert_eq!(decode(&buf).unwrap(), expected);
    }

    #[test]
    fn midnight_round_trip() {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let buf = encode(&datetime);
        assert_eq!(buf, [120, 124, 1, 1, 1, 1, 1]);
        assert_eq!(decode(&buf).unwrap(), datetime);
    }

    #[test]
    fn round_trip() {
        let datetime = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap().and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(decode(&encode(&datetime)).unwrap(), datetime);
    }

    #[test]
    fn short_buffer_is_an_error() {
        assert!(decode(&[119, 150, 8]).is_err());
    }

    #[test]
    fn invalid_fields_are_an_error() {
        // month 13
        assert!(decode(&[119, 150, 13, 7, 16, 31, 46]).is_err());
    }
}
