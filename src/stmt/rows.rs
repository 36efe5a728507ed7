//! Fetching and decoding of result rows.

use libc::c_void;
use std::ops::Index;

use crate::env::Env;
use crate::lob;
use crate::oci::*;
use crate::types::{binfloat, date, interval, Timestamp, Zone};
use crate::{Error, Result, Value};

use super::cols::{Column, ColumnBuffer, Columns};
use super::Statement;

/// The result set of one executed query.
///
/// Column buffers live here and are reused by every fetch; they are
/// released when the row-set drops.
pub struct Rows<'a> {
    stmt: &'a Statement<'a>,
    cols: Columns,
    done: bool,
}

impl std::fmt::Debug for Rows<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("columns", &self.cols.len())
            .field("done", &self.done)
            .finish()
    }
}

impl<'a> Rows<'a> {
    pub(crate) fn new(stmt: &'a Statement<'a>, cols: Columns, done: bool) -> Self {
        Self { stmt, cols, done }
    }

    /// Names of the projection columns, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.cols.names()
    }

    /**
        Fetches and decodes the next row. Returns `None` once the result
        set is exhausted.

        The returned row owns its values; they stay valid after further
        fetches.

        # Example
        ```no_run
        # let oracle = oci8::env()?;
        # let conn = oracle.connect("scott:tiger@localhost:1521/XE")?;
        # let stmt = conn.prepare("SELECT ename FROM emp")?;
        let mut rows = stmt.query(&[])?;
        while let Some(row) = rows.next()? {
            println!("{}", row[0]);
        }
        # Ok::<(),oci8::Error>(())
        ```
    */
    pub fn next(&mut self) -> Result<Option<Row>> {
        if self.done {
            return Ok(None);
        }
        let res = unsafe {
            OCIStmtFetch2(self.stmt.stmt_ptr(), self.stmt.err_ptr(), 1, OCI_FETCH_NEXT, 0, OCI_DEFAULT)
        };
        match res {
            OCI_NO_DATA => {
                self.done = true;
                Ok(None)
            }
            OCI_SUCCESS | OCI_SUCCESS_WITH_INFO => {
                let mut values = Vec::with_capacity(self.cols.len());
                for col in self.cols.iter_mut() {
                    values.push(decode_column(col, self.stmt)?);
                }
                Ok(Some(Row { values }))
            }
            // Fetch failures are always fatal, the "row not found" class
            // included; NULL columns are reported through indicators.
            _ => Err(Error::oci(self.stmt.err_ptr(), res)),
        }
    }
}

/// One fetched row, decoded into owned values.
#[derive(Debug)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn get(&self, pos: usize) -> Option<&Value> {
        self.values.get(pos)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, pos: usize) -> &Value {
        &self.values[pos]
    }
}

/// Decodes one column of the current row by the inverse of the buffer
/// shape its define chose.
fn decode_column(col: &mut Column, stmt: &Statement) -> Result<Value> {
    match col.ind {
        OCI_IND_NULL => return Ok(Value::Null),
        OCI_IND_NOTNULL => {}
        // -2, or the positive original length: the value did not fit.
        ind => return Err(Error::msg(format!("column {} value truncated (indicator {})", col.name, ind))),
    }

    let location = stmt.conn().location().clone();
    match &mut col.buf {
        ColumnBuffer::Bytes(data) => {
            let returned = &data[..col.rlen as usize];
            match col.dtype {
                SQLT_CHR | SQLT_AFC | SQLT_AVC => Ok(Value::Text(String::from_utf8_lossy(returned).to_string())),
                SQLT_BIN => Ok(Value::Bytes(returned.to_vec())),
                SQLT_IBFLOAT | SQLT_IBDOUBLE => Ok(Value::Float(binfloat::decode(&data[..col.size])?)),
                // A DATE that bypassed the timestamp normalization
                // arrives in the legacy 7-byte layout.
                SQLT_DAT => Ok(Value::Timestamp(Timestamp::new(date::decode(returned)?, location))),
                dtype => Err(Error::msg(format!("unhandled column type {} of {}", dtype, col.name))),
            }
        }
        ColumnBuffer::Timestamp(desc) => decode_datetime(stmt, desc.get(), location),
        ColumnBuffer::TimestampLTZ(desc) => decode_datetime(stmt, desc.get(), location),
        ColumnBuffer::TimestampTZ(desc) => decode_datetime_tz(stmt, desc.get()),
        ColumnBuffer::IntervalDS(desc) => {
            Ok(Value::IntervalDS(interval::day_second(stmt.env_ptr(), stmt.err_ptr(), desc.get())?))
        }
        ColumnBuffer::IntervalYM(desc) => {
            Ok(Value::IntervalYM(interval::year_month(stmt.env_ptr(), stmt.err_ptr(), desc.get())?))
        }
        ColumnBuffer::Clob { loc, scratch } => {
            let data = lob::read_all(stmt.conn().svc_ptr(), stmt.err_ptr(), loc.get(), scratch)?;
            Ok(Value::Text(String::from_utf8_lossy(&data).to_string()))
        }
        ColumnBuffer::Blob { loc, scratch } => {
            let data = lob::read_all(stmt.conn().svc_ptr(), stmt.err_ptr(), loc.get(), scratch)?;
            Ok(Value::Bytes(data))
        }
    }
}

fn read_datetime_fields(stmt: &Statement, datetime: *const OCIDateTime) -> Result<(i16, u8, u8, u8, u8, u8, u32)> {
    let mut year = 0i16;
    let mut month = 0u8;
    let mut day = 0u8;
    catch! {stmt.err_ptr() =>
        OCIDateTimeGetDate(stmt.env_ptr() as *mut c_void, stmt.err_ptr(), datetime, &mut year, &mut month, &mut day)
    }
    let mut hour = 0u8;
    let mut min = 0u8;
    let mut sec = 0u8;
    let mut fsec = 0u32;
    catch! {stmt.err_ptr() =>
        OCIDateTimeGetTime(stmt.env_ptr() as *mut c_void, stmt.err_ptr(), datetime, &mut hour, &mut min, &mut sec, &mut fsec)
    }
    Ok((year, month, day, hour, min, sec, fsec))
}

/// Zoneless timestamp: the column carries no zone information, so the
/// driver's configured location is attached, not the session time zone.
fn decode_datetime(stmt: &Statement, datetime: *const OCIDateTime, location: Zone) -> Result<Value> {
    let (year, month, day, hour, min, sec, fsec) = read_datetime_fields(stmt, datetime)?;
    let ts = Timestamp::from_parts(
        year as i32, month as u32, day as u32,
        hour as u32, min as u32, sec as u32, fsec,
        location,
    )?;
    Ok(Value::Timestamp(ts))
}

fn decode_datetime_tz(stmt: &Statement, datetime: *const OCIDateTime) -> Result<Value> {
    let (year, month, day, hour, min, sec, fsec) = read_datetime_fields(stmt, datetime)?;

    let mut zone_buf = [0u8; 128];
    let mut zone_len = zone_buf.len() as u32;
    catch! {stmt.err_ptr() =>
        OCIDateTimeGetTimeZoneName(stmt.env_ptr() as *mut c_void, stmt.err_ptr(), datetime, zone_buf.as_mut_ptr(), &mut zone_len)
    }
    let zone_name = String::from_utf8_lossy(&zone_buf[..zone_len as usize]).to_string();

    let zone = if let Ok(tz) = zone_name.parse::<chrono_tz::Tz>() {
        Zone::Named(tz)
    } else {
        // Not an IANA name; keep the label over the explicit offset.
        let mut tzh = 0i8;
        let mut tzm = 0i8;
        catch! {stmt.err_ptr() =>
            OCIDateTimeGetTimeZoneOffset(stmt.env_ptr() as *mut c_void, stmt.err_ptr(), datetime, &mut tzh, &mut tzm)
        }
        Zone::resolve(&zone_name, tzh as i32, tzm as i32)?
    };

    let ts = Timestamp::from_parts(
        year as i32, month as u32, day as u32,
        hour as u32, min as u32, sec as u32, fsec,
        zone,
    )?;
    Ok(Value::Timestamp(ts))
}
