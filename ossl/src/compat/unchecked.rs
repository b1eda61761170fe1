// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! HMAC primitives for libraries older than 1.0.0
//!
//! These releases return nothing from `HMAC_Init_ex()`, `HMAC_Update()`
//! and `HMAC_Final()`, so failures are invisible and success is reported
//! unconditionally. There is also no `HMAC_CTX_copy()`; the context layout
//! is public on these releases and is copied field by field.

use std::ffi::{c_int, c_uchar, c_uint, c_void};
use std::sync::Once;

use libc::size_t;

use crate::bindings::*;

static UNCHECKED: Once = Once::new();

/* Emitted once per process so the lost failure channel is not silent */
fn assume_success(func: &str) -> c_int {
    UNCHECKED.call_once(|| {
        #[cfg(feature = "log")]
        log::warn!(
            "{}() cannot report failures on this OpenSSL, assuming success",
            func
        );
        #[cfg(not(feature = "log"))]
        let _ = func;
    });
    1
}

/// Sets up `ctx` for a new computation, always reports success.
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
    HMAC_Init_ex(ctx, key, key_len, md, engine);
    assume_success("HMAC_Init_ex")
}

/// Feeds `data_len` bytes into the running computation, always reports
/// success.
///
/// # Safety
///
/// `ctx` must be initialized and `data` must point to `data_len` bytes.
pub unsafe fn update(
    ctx: *mut HMAC_CTX,
    data: *const c_uchar,
    data_len: size_t,
) -> c_int {
    HMAC_Update(ctx, data, data_len);
    assume_success("HMAC_Update")
}

/// Writes the MAC to `digest` and its length to `outlen`, always reports
/// success.
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
    HMAC_Final(ctx, digest, outlen);
    assume_success("HMAC_Final")
}

/// Duplicates the three digest states, the key and the digest selector of
/// `src` into `dst`. Returns 0 if any digest state copy fails.
///
/// # Safety
///
/// Both contexts must be live, `src` must be initialized.
pub unsafe fn ctx_copy(dst: *mut HMAC_CTX, src: *mut HMAC_CTX) -> c_int {
    HMAC_CTX_init(dst);
    let d = &mut *dst;
    let s = &*src;
    if EVP_MD_CTX_copy_ex(&mut d.i_ctx, &s.i_ctx) == 0 {
        return 0;
    }
    if EVP_MD_CTX_copy_ex(&mut d.o_ctx, &s.o_ctx) == 0 {
        return 0;
    }
    if EVP_MD_CTX_copy_ex(&mut d.md_ctx, &s.md_ctx) == 0 {
        return 0;
    }
    d.key = s.key;
    d.key_length = s.key_length;
    d.md = s.md;
    1
}
