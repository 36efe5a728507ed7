//! OCI handles

use libc::c_void;
use std::ptr;

use super::*;
use crate::{Error, Result};

/// Maps a handle struct to the OCI handle-type constant used to allocate
/// and free it.
pub trait HandleType: OCIStruct {
    const HTYPE: u32;
}

macro_rules! impl_handle_type {
    ($($t:ident => $htype:ident),+) => {
        $(
            impl HandleType for $t {
                const HTYPE: u32 = $htype;
            }
        )+
    };
}

impl_handle_type! {
    OCIEnv      => OCI_HTYPE_ENV,
    OCIError    => OCI_HTYPE_ERROR,
    OCISvcCtx   => OCI_HTYPE_SVCCTX,
    OCIStmt     => OCI_HTYPE_STMT,
    OCIBind     => OCI_HTYPE_BIND,
    OCIDefine   => OCI_HTYPE_DEFINE
}

/// Owner of an OCI handle. The handle is freed on drop with the handle
/// type that allocated it.
pub struct Handle<T: HandleType> {
    ptr: Ptr<T>,
}

impl<T: HandleType> Drop for Handle<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                OCIHandleFree(self.ptr.get() as *mut c_void, T::HTYPE);
            }
        }
    }
}

impl<T: HandleType> Handle<T> {
    pub(crate) fn new(env: *mut OCIEnv) -> Result<Self> {
        let mut hndl = ptr::null_mut::<T>();
        let res = unsafe {
            OCIHandleAlloc(env, &mut hndl as *mut *mut T as *mut *mut c_void, T::HTYPE, 0, ptr::null())
        };
        if res != OCI_SUCCESS || hndl.is_null() {
            Err(Error::new(&format!("cannot allocate OCI handle type {}", T::HTYPE)))
        } else {
            Ok(Self { ptr: Ptr::new(hndl) })
        }
    }

    // Some handles (the environment, notably) are created by dedicated
    // OCI calls rather than OCIHandleAlloc, but are disposed of as handles.
    pub(crate) fn from(ptr: Ptr<T>) -> Self {
        Self { ptr }
    }

    pub(crate) fn get(&self) -> *mut T {
        self.ptr.get()
    }
}

unsafe impl Send for Handle<OCIEnv> {}
unsafe impl Sync for Handle<OCIEnv> {}
unsafe impl Send for Handle<OCIError> {}
unsafe impl Sync for Handle<OCIError> {}
