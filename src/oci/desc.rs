//! OCI descriptors
//!
//! A descriptor is released with `OCIDescriptorFree` and the descriptor
//! type tag it was allocated with. Freeing with the wrong tag corrupts
//! the client library's handle pool, so the tag is carried in the type:
//! a `Descriptor<OCITimestampTZ>` can only ever free as a TIMESTAMP_TZ.

use libc::c_void;
use std::ptr;

use super::*;
use crate::{Error, Result};

/// Maps a virtual descriptor struct to its native OCI type and the
/// descriptor-type tag used to allocate and free it.
pub trait DescriptorType: OCIStruct {
    type OCIType;
    const DTYPE: u32;
}

macro_rules! impl_descr_type {
    ($($virt:ident => $dtype:ident, $native:ident),+) => {
        $(
            impl DescriptorType for $virt {
                type OCIType = $native;
                const DTYPE: u32 = $dtype;
            }
        )+
    };
}

impl_descr_type! {
    OCICLobLocator          => OCI_DTYPE_LOB,           OCILobLocator,
    OCIBLobLocator          => OCI_DTYPE_LOB,           OCILobLocator,
    OCIParam                => OCI_DTYPE_PARAM,         OCIParam,
    OCITimestamp            => OCI_DTYPE_TIMESTAMP,     OCIDateTime,
    OCITimestampTZ          => OCI_DTYPE_TIMESTAMP_TZ,  OCIDateTime,
    OCITimestampLTZ         => OCI_DTYPE_TIMESTAMP_LTZ, OCIDateTime,
    OCIIntervalYearToMonth  => OCI_DTYPE_INTERVAL_YM,   OCIInterval,
    OCIIntervalDayToSecond  => OCI_DTYPE_INTERVAL_DS,   OCIInterval
}

/// Owner of an OCI descriptor.
pub struct Descriptor<T: DescriptorType> {
    ptr: *mut T::OCIType,
}

impl<T: DescriptorType> Drop for Descriptor<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                OCIDescriptorFree(self.ptr as *mut c_void, T::DTYPE);
            }
        }
    }
}

impl<T: DescriptorType> Descriptor<T> {
    pub(crate) fn new(env: *mut OCIEnv) -> Result<Self> {
        let mut desc = ptr::null_mut::<T::OCIType>();
        let res = unsafe {
            OCIDescriptorAlloc(env, &mut desc as *mut *mut T::OCIType as *mut *mut c_void, T::DTYPE, 0, ptr::null())
        };
        if res != OCI_SUCCESS || desc.is_null() {
            Err(Error::new(&format!("cannot allocate OCI descriptor type {}", T::DTYPE)))
        } else {
            Ok(Self { ptr: desc })
        }
    }

    pub(crate) fn from(ptr: *mut T::OCIType) -> Self {
        Self { ptr }
    }

    pub(crate) fn get(&self) -> *mut T::OCIType {
        self.ptr
    }

    /// Address of the stored locator pointer. Descriptor-backed binds and
    /// defines take the locator by reference.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut *mut T::OCIType {
        &mut self.ptr as *mut *mut T::OCIType
    }
}
