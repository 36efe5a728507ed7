//! Definition of result-column output buffers.
//!
//! After a query executes, each column's native type code, declared size
//! and name are read from its parameter descriptor and a buffer shaped
//! for that type is attached with `OCIDefineByPos2`, together with the
//! per-row null/truncation indicator and returned-length outputs the row
//! decoder consults on every fetch.

use libc::c_void;
use std::{mem, ptr};

use crate::env::Env;
use crate::lob;
use crate::oci::*;
use crate::Result;

use super::Statement;

/// Output buffer of one result column. The variant decides both the
/// decode path and, through its drop, the release call for whatever the
/// column owns.
pub(crate) enum ColumnBuffer {
    /// Flat buffer: character, numeric-as-character, raw, binary
    /// float/double, and the unrecognized-type fallback.
    Bytes(Vec<u8>),
    Timestamp(Descriptor<OCITimestamp>),
    TimestampTZ(Descriptor<OCITimestampTZ>),
    TimestampLTZ(Descriptor<OCITimestampLTZ>),
    IntervalDS(Descriptor<OCIIntervalDayToSecond>),
    IntervalYM(Descriptor<OCIIntervalYearToMonth>),
    Clob { loc: Descriptor<OCICLobLocator>, scratch: Vec<u8> },
    Blob { loc: Descriptor<OCIBLobLocator>, scratch: Vec<u8> },
}

/// One column of the projection: metadata, the per-row indicator and
/// returned length, and the owned output buffer. The buffer is
/// overwritten by every fetch, so decoded values are copied out eagerly.
pub(crate) struct Column {
    pub(crate) name: String,
    /// Native type tag after normalization (DATE reads as TIMESTAMP,
    /// NUMBER and unrecognized types as character).
    pub(crate) dtype: u16,
    /// Declared byte size, after the multi-byte headroom adjustment.
    pub(crate) size: usize,
    pub(crate) ind: i16,
    pub(crate) rlen: u32,
    pub(crate) buf: ColumnBuffer,
}

impl Column {
    fn describe(stmt: &Statement, pos: usize) -> Result<Self> {
        let mut param = ptr::null_mut::<c_void>();
        catch! {stmt.err_ptr() =>
            OCIParamGet(stmt.stmt_ptr() as *const c_void, OCI_HTYPE_STMT, stmt.err_ptr(), &mut param, pos as u32)
        }
        let param: Descriptor<OCIParam> = Descriptor::from(param as *mut OCIParam);
        let dtype: u16 = attr::get(OCI_ATTR_DATA_TYPE, param.get() as *const c_void, OCI_DTYPE_PARAM, stmt.err_ptr())?;
        let size: u16 = attr::get(OCI_ATTR_DATA_SIZE, param.get() as *const c_void, OCI_DTYPE_PARAM, stmt.err_ptr())?;
        let name = attr::get_text(OCI_ATTR_NAME, param.get() as *const c_void, OCI_DTYPE_PARAM, stmt.err_ptr())?;
        let mut size = size as usize;

        let (dtype, buf) = match dtype {
            SQLT_CHR | SQLT_AFC | SQLT_AVC => {
                // Multi-byte encoding headroom: a column declared N wide
                // can come back as up to 4N bytes of AL32UTF8.
                size *= 4;
                (dtype, ColumnBuffer::Bytes(vec![0; size + 1]))
            }
            SQLT_NUM => {
                // Numbers are fetched through the character conversion.
                (SQLT_CHR, ColumnBuffer::Bytes(vec![0; size + 1]))
            }
            SQLT_BIN => (dtype, ColumnBuffer::Bytes(vec![0; size + 1])),
            SQLT_IBFLOAT | SQLT_IBDOUBLE | SQLT_BFLOAT | SQLT_BDOUBLE => {
                let dtype = if dtype == SQLT_BFLOAT || dtype == SQLT_IBFLOAT { SQLT_IBFLOAT } else { SQLT_IBDOUBLE };
                (dtype, ColumnBuffer::Bytes(vec![0; 8]))
            }
            SQLT_CLOB => (dtype, ColumnBuffer::Clob {
                loc: Descriptor::new(stmt.env_ptr())?,
                scratch: vec![0; lob::READ_PIECE_SIZE],
            }),
            SQLT_BLOB => (dtype, ColumnBuffer::Blob {
                loc: Descriptor::new(stmt.env_ptr())?,
                scratch: vec![0; lob::READ_PIECE_SIZE],
            }),
            SQLT_DAT | SQLT_TIMESTAMP => {
                (SQLT_TIMESTAMP, ColumnBuffer::Timestamp(Descriptor::new(stmt.env_ptr())?))
            }
            SQLT_TIMESTAMP_TZ => (dtype, ColumnBuffer::TimestampTZ(Descriptor::new(stmt.env_ptr())?)),
            SQLT_TIMESTAMP_LTZ => (dtype, ColumnBuffer::TimestampLTZ(Descriptor::new(stmt.env_ptr())?)),
            SQLT_INTERVAL_DS => (dtype, ColumnBuffer::IntervalDS(Descriptor::new(stmt.env_ptr())?)),
            SQLT_INTERVAL_YM => (dtype, ColumnBuffer::IntervalYM(Descriptor::new(stmt.env_ptr())?)),
            _ => {
                log::warn!("column {} has unrecognized type {} (size {}), fetching as character", name, dtype, size);
                (SQLT_CHR, ColumnBuffer::Bytes(vec![0; size + 1]))
            }
        };

        Ok(Self { name, dtype, size, ind: OCI_IND_NOTNULL, rlen: 0, buf })
    }

    fn define(&mut self, stmt: &Statement, pos: usize) -> Result<()> {
        let (value_ptr, value_sz) = match &mut self.buf {
            ColumnBuffer::Bytes(data) => {
                let sz = match self.dtype {
                    SQLT_IBFLOAT | SQLT_IBDOUBLE => self.size as i64,
                    _ => data.len() as i64,
                };
                (data.as_mut_ptr() as *mut c_void, sz)
            }
            ColumnBuffer::Timestamp(desc) => (desc.as_mut_ptr() as *mut c_void, desc_sz()),
            ColumnBuffer::TimestampTZ(desc) => (desc.as_mut_ptr() as *mut c_void, desc_sz()),
            ColumnBuffer::TimestampLTZ(desc) => (desc.as_mut_ptr() as *mut c_void, desc_sz()),
            ColumnBuffer::IntervalDS(desc) => (desc.as_mut_ptr() as *mut c_void, desc_sz()),
            ColumnBuffer::IntervalYM(desc) => (desc.as_mut_ptr() as *mut c_void, desc_sz()),
            ColumnBuffer::Clob { loc, .. } => (loc.as_mut_ptr() as *mut c_void, -1),
            ColumnBuffer::Blob { loc, .. } => (loc.as_mut_ptr() as *mut c_void, -1),
        };
        let mut define = Ptr::<OCIDefine>::null();
        catch! {stmt.err_ptr() =>
            OCIDefineByPos2(
                stmt.stmt_ptr(), define.as_mut_ptr(), stmt.err_ptr(),
                pos as u32,
                value_ptr, value_sz, self.dtype,
                &mut self.ind, &mut self.rlen, ptr::null_mut(),
                OCI_DEFAULT
            )
        }
        Ok(())
    }
}

fn desc_sz() -> i64 {
    mem::size_of::<*mut c_void>() as i64
}

/// The ordered column descriptors of one executed query.
pub(crate) struct Columns {
    cols: Vec<Column>,
}

impl Columns {
    /// Inspects every projection column and attaches its output buffer.
    /// A describe or define failure aborts the whole row-set; buffers
    /// already allocated are released by the drop of the partial vector.
    pub(crate) fn describe(stmt: &Statement) -> Result<Self> {
        let count: u32 = attr::get(OCI_ATTR_PARAM_COUNT, stmt.stmt_ptr() as *const c_void, OCI_HTYPE_STMT, stmt.err_ptr())?;
        let mut cols = Vec::with_capacity(count as usize);
        for i in 0..count as usize {
            cols.push(Column::describe(stmt, i + 1)?);
        }
        // Defines take addresses of the indicator, length and buffer
        // fields; the vector is fully built first so nothing moves.
        for (i, col) in cols.iter_mut().enumerate() {
            col.define(stmt, i + 1)?;
        }
        Ok(Self { cols })
    }

    pub(crate) fn names(&self) -> Vec<&str> {
        self.cols.iter().map(|col| col.name.as_str()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.cols.len()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<Column> {
        self.cols.iter_mut()
    }
}
