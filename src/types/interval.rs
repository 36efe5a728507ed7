//! INTERVAL DAY TO SECOND and INTERVAL YEAR TO MONTH extraction.
//!
//! The components come out of the interval descriptor independently
//! signed; they are combined by weighted summation without normalizing
//! them first, so the sign convention of the client library is kept.

use chrono::Duration;
use libc::c_void;

use crate::oci::*;
use crate::Result;

/// Combines day-second components into one signed duration.
pub(crate) fn combine_day_second(days: i32, hours: i32, minutes: i32, seconds: i32, nanos: i32) -> Duration {
    Duration::days(i64::from(days))
        + Duration::hours(i64::from(hours))
        + Duration::minutes(i64::from(minutes))
        + Duration::seconds(i64::from(seconds))
        + Duration::nanoseconds(i64::from(nanos))
}

/// Combines year-month components into a signed count of months.
pub(crate) fn combine_year_month(years: i32, months: i32) -> i64 {
    i64::from(years) * 12 + i64::from(months)
}

/// Reads an INTERVAL DAY TO SECOND descriptor into a signed duration.
pub(crate) fn day_second(env: *mut OCIEnv, err: *mut OCIError, interval: *const OCIInterval) -> Result<Duration> {
    let mut days = 0i32;
    let mut hours = 0i32;
    let mut minutes = 0i32;
    let mut seconds = 0i32;
    let mut nanos = 0i32;
    catch! {err =>
        OCIIntervalGetDaySecond(
            env as *mut c_void, err,
            &mut days, &mut hours, &mut minutes, &mut seconds, &mut nanos,
            interval
        )
    }
    Ok(combine_day_second(days, hours, minutes, seconds, nanos))
}

/// Reads an INTERVAL YEAR TO MONTH descriptor into a signed month count.
pub(crate) fn year_month(env: *mut OCIEnv, err: *mut OCIError, interval: *const OCIInterval) -> Result<i64> {
    let mut years = 0i32;
    let mut months = 0i32;
    catch! {err =>
        OCIIntervalGetYearMonth(env as *mut c_void, err, &mut years, &mut months, interval)
    }
    Ok(combine_year_month(years, months))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_second_positive() {
        let d = combine_day_second(3, 11, 45, 28, 150_000_000);
        let expected = Duration::days(3) + Duration::hours(11) + Duration::minutes(45)
            + Duration::seconds(28) + Duration::nanoseconds(150_000_000);
        assert_eq!(d, expected);
    }

    #[test]
    fn day_second_negative() {
        // A negative interval carries every component negated.
        let d = combine_day_second(-1, -2, -30, -15, -500_000_000);
        let expected = -(Duration::days(1) + Duration::hours(2) + Duration::minutes(30)
            + Duration::seconds(15) + Duration::nanoseconds(500_000_000));
        assert_eq!(d, expected);
    }

    #[test]
    fn day_second_nanosecond_precision() {
        let d = combine_day_second(0, 0, 0, 0, 1);
        assert_eq!(d.num_nanoseconds(), Some(1));
        let d = combine_day_second(0, 0, 0, 1, -1);
        assert_eq!(d.num_nanoseconds(), Some(999_999_999));
    }

    #[test]
    fn year_month_combination() {
        assert_eq!(combine_year_month(2, 3), 27);
        assert_eq!(combine_year_month(-2, -3), -27);
        assert_eq!(combine_year_month(0, -11), -11);
        assert_eq!(combine_year_month(100, 0), 1200);
    }
}
