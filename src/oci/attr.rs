//! Typed get/set access to OCI handle and descriptor attributes

use libc::c_void;
use std::{mem, ptr};

use super::*;
use crate::Result;

/// Values that can be read from or written into an OCI attribute slot.
pub(crate) trait AttrVal: Copy {
    fn zero() -> Self;
}

macro_rules! impl_attr_val {
    ($($t:ty),+) => {
        $(
            impl AttrVal for $t {
                fn zero() -> Self { 0 }
            }
        )+
    };
}

impl_attr_val! { u8, i8, u16, i16, u32, i32, u64 }

pub(crate) fn get<V: AttrVal>(attr_type: u32, obj: *const c_void, obj_type: u32, err: *mut OCIError) -> Result<V> {
    let mut attr_val = V::zero();
    let mut attr_size = 0u32;
    catch! {err =>
        OCIAttrGet(obj, obj_type, &mut attr_val as *mut V as *mut c_void, &mut attr_size, attr_type, err)
    }
    Ok(attr_val)
}

pub(crate) fn set<V: AttrVal>(attr_type: u32, attr_val: V, obj: *mut c_void, obj_type: u32, err: *mut OCIError) -> Result<()> {
    catch! {err =>
        OCIAttrSet(obj, obj_type, &attr_val as *const V as *const c_void, mem::size_of::<V>() as u32, attr_type, err)
    }
    Ok(())
}

/// Reads a text attribute (such as OCI_ATTR_NAME). OCI returns a pointer
/// into library-owned memory together with its length; the text is copied
/// out immediately.
pub(crate) fn get_text(attr_type: u32, obj: *const c_void, obj_type: u32, err: *mut OCIError) -> Result<String> {
    let mut text_ptr = ptr::null::<u8>();
    let mut text_len = 0u32;
    catch! {err =>
        OCIAttrGet(obj, obj_type, &mut text_ptr as *mut *const u8 as *mut c_void, &mut text_len, attr_type, err)
    }
    if text_ptr.is_null() || text_len == 0 {
        return Ok(String::new());
    }
    let text = unsafe { std::slice::from_raw_parts(text_ptr, text_len as usize) };
    Ok(String::from_utf8_lossy(text).to_string())
}
