//! Send-able pointer cell for OCI handles and descriptors

use std::ptr;

use super::OCIStruct;

/// Cell-like wrapper around a raw pointer to an OCI handle or descriptor.
pub struct Ptr<T: OCIStruct> {
    value: *mut T,
}

impl<T: OCIStruct> Ptr<T> {
    pub(crate) fn new(ptr: *mut T) -> Self {
        Self { value: ptr }
    }

    pub(crate) fn null() -> Self {
        Self { value: ptr::null_mut() }
    }

    pub(crate) fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub(crate) fn get(&self) -> *mut T {
        self.value
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut *mut T {
        &mut self.value as *mut *mut T
    }
}

impl<T: OCIStruct> Clone for Ptr<T> {
    fn clone(&self) -> Self {
        Self { value: self.value }
    }
}

impl<T: OCIStruct> Copy for Ptr<T> {}

unsafe impl<T: OCIStruct> Send for Ptr<T> {}
