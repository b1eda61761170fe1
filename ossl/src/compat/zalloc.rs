// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Context lifecycle for libraries that expose the `HMAC_CTX` layout and
//! have no allocator for it

use std::ffi::{c_char, c_void};
use std::mem::size_of;

use crate::bindings::*;

/// Allocates `sizeof(HMAC_CTX)` bytes with the OpenSSL allocator and zeroes
/// them, the same thing `HMAC_CTX_new()` does in newer releases.
///
/// # Safety
///
/// The returned pointer must be released with [ctx_free].
pub unsafe fn ctx_new() -> *mut HMAC_CTX {
    let size = match size_of::<HMAC_CTX>().try_into() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    let ptr = CRYPTO_malloc(
        size,
        concat!(file!(), "\0").as_ptr() as *const c_char,
        line!().try_into().unwrap_or(0),
    ) as *mut HMAC_CTX;
    if ptr.is_null() {
        return ptr;
    }
    std::ptr::write_bytes(ptr, 0, 1);
    ptr
}

/// Cleans up the context state and releases the memory, NULL is accepted.
///
/// # Safety
///
/// `ctx` must be NULL or come from [ctx_new] and not be used afterwards.
pub unsafe fn ctx_free(ctx: *mut HMAC_CTX) {
    if ctx.is_null() {
        return;
    }
    HMAC_CTX_cleanup(ctx);
    CRYPTO_free(ctx as *mut c_void);
}
