//! Large object plumbing: temporary LOBs for oversized binds and the
//! piecewise read used when fetching LOB columns.

use libc::c_void;
use std::ptr;

use crate::oci::*;
use crate::{Error, Result};

/// Buffer size of one streaming-read piece.
pub(crate) const READ_PIECE_SIZE: usize = 4000;

/// A session-duration temporary LOB holding one oversized bind payload.
/// Freed (temporary first, then the locator) when the bind is released.
pub(crate) struct TempLob {
    loc: Descriptor<OCIBLobLocator>,
    svc: Ptr<OCISvcCtx>,
    err: Ptr<OCIError>,
}

impl Drop for TempLob {
    fn drop(&mut self) {
        unsafe {
            OCILobFreeTemporary(self.svc.get(), self.err.get(), self.loc.get());
        }
    }
}

impl TempLob {
    /// Creates a temporary LOB and writes `data` into it in one piece.
    pub(crate) fn with_data(
        lob_type: u8,
        data: &[u8],
        env: *mut OCIEnv,
        svc: Ptr<OCISvcCtx>,
        err: Ptr<OCIError>,
    ) -> Result<Self> {
        let loc = Descriptor::<OCIBLobLocator>::new(env)?;
        catch! {err.get() =>
            OCILobCreateTemporary(
                svc.get(), err.get(), loc.get(),
                0, SQLCS_IMPLICIT, lob_type, OCI_LOB_NOCACHE, OCI_DURATION_SESSION
            )
        }
        let lob = Self { loc, svc, err };
        let mut byte_cnt = data.len() as u64;
        catch! {err.get() =>
            OCILobWrite2(
                svc.get(), err.get(), lob.loc.get(),
                &mut byte_cnt, ptr::null_mut(), 1,
                data.as_ptr(), data.len() as u64, OCI_ONE_PIECE,
                ptr::null_mut(), ptr::null(), 0, SQLCS_IMPLICIT
            )
        }
        Ok(lob)
    }

    pub(crate) fn as_bind_ptr(&mut self) -> *mut c_void {
        self.loc.as_mut_ptr() as *mut c_void
    }
}

/// Streams the whole LOB behind `loc` through `scratch`, appending each
/// piece to the returned accumulator. The loop continues while the read
/// reports more data pending and stops on success, keeping the final
/// partial piece's reported length.
pub(crate) fn read_all(
    svc: *mut OCISvcCtx,
    err: *mut OCIError,
    loc: *mut OCILobLocator,
    scratch: &mut [u8],
) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut piece = OCI_FIRST_PIECE;
    loop {
        // In polling mode the first call passes zero for "read it all";
        // on return it carries the byte count of this piece.
        let mut byte_cnt: u64 = 0;
        let res = unsafe {
            OCILobRead2(
                svc, err, loc,
                &mut byte_cnt, ptr::null_mut(), 1,
                scratch.as_mut_ptr(), scratch.len() as u64, piece,
                ptr::null_mut(), ptr::null(), 0, SQLCS_IMPLICIT
            )
        };
        match res {
            OCI_NEED_DATA => {
                data.extend_from_slice(&scratch[..byte_cnt as usize]);
                piece = OCI_NEXT_PIECE;
            }
            OCI_SUCCESS => {
                data.extend_from_slice(&scratch[..byte_cnt as usize]);
                log::trace!("LOB read complete: {} bytes", data.len());
                return Ok(data);
            }
            _ => return Err(Error::oci(err, res)),
        }
    }
}
