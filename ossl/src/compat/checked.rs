// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! HMAC primitives for libraries (1.0.0 and later) that report failures

use std::ffi::{c_int, c_uchar, c_uint, c_void};

use libc::size_t;

use crate::bindings::*;

/// Sets up `ctx` for a new computation with `key` and digest `md`.
///
/// A NULL `key` reuses the previous key, a NULL `md` reuses the previous
/// digest.
///
/// # Safety
///
/// `ctx` must be a live context, `key` must point to `key_len` readable
/// bytes (or be NULL), `md` and `engine` must be valid or NULL.
pub unsafe fn init_ex(
    ctx: *mut HMAC_CTX,
    key: *const c_void,
    key_len: c_int,
    md: *const EVP_MD,
    engine: *mut ENGINE,
) -> c_int {
    HMAC_Init_ex(ctx, key, key_len, md, engine)
}

/// Feeds `data_len` bytes into the running computation.
///
/// # Safety
///
/// `ctx` must be initialized and `data` must point to `data_len` bytes.
pub unsafe fn update(
    ctx: *mut HMAC_CTX,
    data: *const c_uchar,
    data_len: size_t,
) -> c_int {
    HMAC_Update(ctx, data, data_len)
}

/// Writes the MAC to `digest` and its length to `outlen`.
///
/// # Safety
///
/// `ctx` must be initialized, `digest` must have room for the digest size
/// of the selected algorithm, `outlen` must be writable or NULL.
pub unsafe fn finalize(
    ctx: *mut HMAC_CTX,
    digest: *mut c_uchar,
    outlen: *mut c_uint,
) -> c_int {
    HMAC_Final(ctx, digest, outlen)
}

/// Duplicates the whole state of `src` into `dst`.
///
/// # Safety
///
/// Both contexts must be live, `src` must be initialized.
pub unsafe fn ctx_copy(dst: *mut HMAC_CTX, src: *mut HMAC_CTX) -> c_int {
    HMAC_CTX_copy(dst, src)
}
