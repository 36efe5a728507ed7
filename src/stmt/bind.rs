//! Binding of parameter values to positional placeholders.
//!
//! Each execution classifies its arguments, acquires whatever native
//! payload each one needs and attaches it with `OCIBindByPos2`. The
//! payloads are collected in a [`Binds`] guard as they are acquired, so
//! that a failure part-way through a bind loop still releases everything
//! acquired for the earlier positions.

use libc::c_void;
use std::{mem, ptr};

use crate::env::Env;
use crate::lob::TempLob;
use crate::oci::*;
use crate::types::binfloat;
use crate::types::Timestamp;
use crate::{Error, Result, Value};

use super::Statement;

/// Raw binaries up to this length bind inline as SQLT_BIN; longer ones
/// go through a temporary BLOB.
const INLINE_RAW_MAX: usize = 2000;
/// Text up to this length binds inline as SQLT_STR; longer text goes
/// through a temporary CLOB.
const INLINE_TEXT_MAX: usize = 4000;

/// One bound argument's native payload, released on drop.
enum BoundParam {
    /// Nothing was allocated (NULL bind).
    None,
    /// A private copy of the caller's bytes. The native layer may keep
    /// the pointer until execute, so the copy must not be the caller's.
    Buf(Vec<u8>),
    /// A TIMESTAMP WITH TIME ZONE descriptor together with the zone
    /// buffer it was constructed from; both are released together.
    Timestamp {
        desc: Descriptor<OCITimestampTZ>,
        #[allow(dead_code)] // held for the duration of the execute
        tz: String,
    },
    /// A temporary LOB holding an oversized payload.
    Lob(TempLob),
}

/// The releaser for one execution's bound parameters.
pub(crate) struct Binds {
    bound: Vec<BoundParam>,
}

impl Binds {
    /// Binds `args` to placeholders `:0`, `:1`, ... in order. On any
    /// failure the partially built guard drops, releasing the buffers
    /// and descriptors of every position bound so far.
    pub(crate) fn bind_args(stmt: &Statement, args: &[Value]) -> Result<Binds> {
        // Capacity is reserved up front: payloads are handed to OCI by
        // address and must not move while positions are still binding.
        let mut binds = Binds { bound: Vec::with_capacity(args.len()) };
        for (pos, value) in args.iter().enumerate() {
            binds.bind_value(stmt, pos, value)?;
        }
        Ok(binds)
    }

    fn bind_value(&mut self, stmt: &Statement, pos: usize, value: &Value) -> Result<()> {
        match value {
            Value::Null => {
                self.bound.push(BoundParam::None);
                bind_by_pos(stmt, pos, ptr::null_mut(), 0, SQLT_STR)
            }
            Value::Bytes(data) if data.len() < INLINE_RAW_MAX => {
                self.bound.push(BoundParam::Buf(data.clone()));
                let (data_ptr, data_len) = self.last_buf();
                bind_by_pos(stmt, pos, data_ptr, data_len, SQLT_BIN)
            }
            Value::Bytes(data) => {
                let lob = TempLob::with_data(
                    OCI_TEMP_BLOB, data,
                    stmt.env_ptr(), Ptr::new(stmt.conn().svc_ptr()), Ptr::new(stmt.err_ptr()),
                )?;
                self.bound.push(BoundParam::Lob(lob));
                let loc_ptr = self.last_lob_ptr();
                bind_by_pos(stmt, pos, loc_ptr, 0, SQLT_BLOB)
            }
            Value::Float(val) => {
                self.bound.push(BoundParam::Buf(binfloat::encode_double(*val).to_vec()));
                let (data_ptr, data_len) = self.last_buf();
                bind_by_pos(stmt, pos, data_ptr, data_len, SQLT_IBDOUBLE)
            }
            Value::Timestamp(ts) => {
                let (desc, tz) = construct_datetime(stmt, ts)?;
                self.bound.push(BoundParam::Timestamp { desc, tz });
                let desc_ptr = self.last_desc_ptr();
                bind_by_pos(stmt, pos, desc_ptr, mem::size_of::<*mut OCIDateTime>(), SQLT_TIMESTAMP_TZ)
            }
            Value::Text(text) if text.len() < INLINE_TEXT_MAX => {
                self.bound.push(BoundParam::Buf(nul_terminated(text.as_bytes())));
                let (data_ptr, data_len) = self.last_buf();
                bind_by_pos(stmt, pos, data_ptr, data_len, SQLT_STR)
            }
            Value::Text(text) => {
                let lob = TempLob::with_data(
                    OCI_TEMP_CLOB, text.as_bytes(),
                    stmt.env_ptr(), Ptr::new(stmt.conn().svc_ptr()), Ptr::new(stmt.err_ptr()),
                )?;
                self.bound.push(BoundParam::Lob(lob));
                let loc_ptr = self.last_lob_ptr();
                bind_by_pos(stmt, pos, loc_ptr, 0, SQLT_CLOB)
            }
            // Everything else binds through its textual representation.
            other => {
                self.bound.push(BoundParam::Buf(nul_terminated(other.to_string().as_bytes())));
                let (data_ptr, data_len) = self.last_buf();
                bind_by_pos(stmt, pos, data_ptr, data_len, SQLT_STR)
            }
        }
    }

    fn last_buf(&mut self) -> (*mut c_void, usize) {
        match self.bound.last_mut() {
            Some(BoundParam::Buf(data)) if !data.is_empty() => (data.as_mut_ptr() as *mut c_void, data.len()),
            _ => (ptr::null_mut(), 0),
        }
    }

    fn last_desc_ptr(&mut self) -> *mut c_void {
        match self.bound.last_mut() {
            Some(BoundParam::Timestamp { desc, .. }) => desc.as_mut_ptr() as *mut c_void,
            _ => ptr::null_mut(),
        }
    }

    fn last_lob_ptr(&mut self) -> *mut c_void {
        match self.bound.last_mut() {
            Some(BoundParam::Lob(lob)) => lob.as_bind_ptr(),
            _ => ptr::null_mut(),
        }
    }
}

fn nul_terminated(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(data.len() + 1);
    buf.extend_from_slice(data);
    buf.push(0);
    buf
}

fn bind_by_pos(stmt: &Statement, pos: usize, data: *mut c_void, data_len: usize, dty: u16) -> Result<()> {
    let mut bind = Ptr::<OCIBind>::null();
    catch! {stmt.err_ptr() =>
        OCIBindByPos2(
            stmt.stmt_ptr(), bind.as_mut_ptr(), stmt.err_ptr(),
            (pos + 1) as u32,
            data, data_len as i64, dty,
            ptr::null_mut(), ptr::null_mut(), ptr::null_mut(),
            0, ptr::null_mut(), OCI_DEFAULT
        )
    }
    Ok(())
}

/// Builds the native datetime from the timestamp's fields and zone name.
/// A zone label the client library does not recognize gets one retry
/// with the `±HH:MM` spec of the value's own offset; a second failure is
/// fatal for the bind.
fn construct_datetime(stmt: &Statement, ts: &Timestamp) -> Result<(Descriptor<OCITimestampTZ>, String)> {
    let desc = Descriptor::<OCITimestampTZ>::new(stmt.env_ptr())?;
    let tz = ts.zone_name().to_string();
    match datetime_construct(stmt, &desc, ts, &tz) {
        OCI_SUCCESS | OCI_SUCCESS_WITH_INFO => return Ok((desc, tz)),
        OCI_INVALID_HANDLE => return Err(Error::oci(stmt.err_ptr(), OCI_INVALID_HANDLE)),
        _ => {}
    }
    let tz = ts.offset_spec();
    log::debug!("zone {} rejected by OCIDateTimeConstruct, retrying as {}", ts.zone_name(), tz);
    match datetime_construct(stmt, &desc, ts, &tz) {
        OCI_SUCCESS | OCI_SUCCESS_WITH_INFO => Ok((desc, tz)),
        res => Err(Error::oci(stmt.err_ptr(), res)),
    }
}

fn datetime_construct(stmt: &Statement, desc: &Descriptor<OCITimestampTZ>, ts: &Timestamp, tz: &str) -> i32 {
    unsafe {
        OCIDateTimeConstruct(
            stmt.env_ptr() as *mut c_void, stmt.err_ptr(), desc.get(),
            ts.year(), ts.month(), ts.day(),
            ts.hour(), ts.minute(), ts.second(), ts.nanosecond(),
            tz.as_ptr(), tz.len()
        )
    }
}
