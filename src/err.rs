//! Translation of OCI error-handle state into structured errors

use libc::c_void;
use std::{cmp, error, ffi::CStr, fmt, ptr};

use crate::oci::*;

fn get_oracle_error(rc: i32, errhp: *mut c_void, htype: u32) -> (i32, String) {
    let mut errcode = rc;
    let mut errmsg: Vec<u8> = Vec::with_capacity(OCI_ERROR_MAXMSG_SIZE);
    let errmsg_ptr = errmsg.as_mut_ptr();
    let res = unsafe {
        *errmsg_ptr = 0;
        OCIErrorGet(errhp, 1, ptr::null(), &mut errcode, errmsg_ptr, OCI_ERROR_MAXMSG_SIZE as u32, htype)
    };
    // Message extraction can itself fail; the caller still gets an error,
    // just a generic one.
    let msg = if res == OCI_SUCCESS {
        let msg = unsafe { CStr::from_ptr(errmsg_ptr as *const libc::c_char) };
        msg.to_string_lossy().trim_end().to_string()
    } else {
        match errcode {
            OCI_NO_DATA   => String::from("No Data"),
            OCI_NEED_DATA => String::from("Need Data"),
            _ => format!("Error {}", errcode),
        }
    };
    (errcode, msg)
}

macro_rules! catch {
    ( $err:expr => $( $stmt:stmt );+ ) => {{
        let res = unsafe { $($stmt)+ };
        match res {
            $crate::oci::OCI_ERROR | $crate::oci::OCI_INVALID_HANDLE => {
                return Err( $crate::Error::oci($err, res) );
            },
            _ => {}
        }
    }};
}

/// Errors returned by this driver
#[derive(Debug)]
pub enum Error {
    /// Driver-side failure: bad argument, decode failure, exhausted retry.
    Interface(String),
    /// Failure reported by the Oracle client or server: (code, message).
    Oracle(i32, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Oracle(errcode, errmsg) => write!(f, "ORA-{:05}: {}", errcode, errmsg),
            Error::Interface(errmsg) => write!(f, "{}", errmsg),
        }
    }
}

impl error::Error for Error {}

impl cmp::PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        match (self, other) {
            (Error::Oracle(this_code, _), Error::Oracle(other_code, _)) => this_code == other_code,
            (Error::Interface(this_msg),  Error::Interface(other_msg))  => this_msg == other_msg,
            _ => false,
        }
    }
}

impl Error {
    pub(crate) fn new(msg: &str) -> Self {
        Error::Interface(msg.to_owned())
    }

    pub(crate) fn msg(msg: String) -> Self {
        Error::Interface(msg)
    }

    pub(crate) fn oci(err: *mut OCIError, rc: i32) -> Self {
        let (code, msg) = get_oracle_error(rc, err as *mut c_void, OCI_HTYPE_ERROR);
        Error::Oracle(code, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display() {
        let err = Error::Oracle(942, String::from("table or view does not exist"));
        assert_eq!(err.to_string(), "ORA-00942: table or view does not exist");

        let err = Error::Interface(String::from("column position is out of bounds"));
        assert_eq!(err.to_string(), "column position is out of bounds");
    }

    #[test]
    fn equality_is_by_code() {
        let lhs = Error::Oracle(1405, String::from("fetched column value is NULL"));
        let rhs = Error::Oracle(1405, String::new());
        assert_eq!(lhs, rhs);
        assert_ne!(lhs, Error::Interface(String::from("ORA-01405")));
    }
}
