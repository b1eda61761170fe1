// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

#![warn(missing_docs)]

//! This is hmacshim
//!
//! A small C ABI over the OpenSSL HMAC context that behaves the same way
//! whether it was linked against OpenSSL 0.9.8, 1.0.x, 1.1.x, 3.x or
//! LibreSSL. The version differences are resolved at build time by the
//! [ossl::compat] module; the functions exported here only add argument
//! checks and error tracing.
//!
//! Every fallible function returns nonzero on success and zero on failure.

use std::ffi::{c_int, c_uchar, c_uint, c_void};

use libc::size_t;

pub use ossl::bindings::{ENGINE, EVP_MD, HMAC_CTX};
pub use ossl::digest::{DigestAlg, EvpMd};
pub use ossl::engine::Engine;
pub use ossl::hmac::{hmac, HmacCtx, OsslHmac};
pub use ossl::{Error, ErrorKind};

use ossl::compat;
use ossl::trace_ossl;

#[cfg(feature = "log")]
mod log;

/// Allocates a new, zeroed HMAC context.
///
/// Returns NULL if the allocation fails. The context must be released with
/// [hmacshim_ctx_free].
#[unsafe(no_mangle)]
pub extern "C" fn hmacshim_ctx_new() -> *mut HMAC_CTX {
    let ctx = unsafe { compat::ctx_new() };
    if ctx.is_null() {
        trace_ossl!("HMAC_CTX_new()");
    }
    ctx
}

/// Wipes and releases a context allocated by [hmacshim_ctx_new].
///
/// Passing NULL is a no-op.
///
/// # Safety
///
/// `ctx` must be NULL or a live context that is not used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hmacshim_ctx_free(ctx: *mut HMAC_CTX) {
    compat::ctx_free(ctx)
}

/// Initializes `ctx` with `key_len` bytes of `key` and the digest `md`,
/// optionally through the engine `engine`.
///
/// A NULL `key` keeps the previous key, a NULL `md` keeps the previous
/// digest, so `(ctx, NULL, 0, NULL, NULL)` restarts the computation.
///
/// # Safety
///
/// `ctx` must be a live context, `key` must point to `key_len` readable
/// bytes or be NULL, `md` and `engine` must be valid or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hmacshim_init_ex(
    ctx: *mut HMAC_CTX,
    key: *const c_void,
    key_len: c_int,
    md: *const EVP_MD,
    engine: *mut ENGINE,
) -> c_int {
    /* the length is ignored when the previous key is reused */
    if ctx.is_null() || (!key.is_null() && key_len < 0) {
        return 0;
    }
    let ret = compat::init_ex(ctx, key, key_len, md, engine);
    if ret == 0 {
        trace_ossl!("HMAC_Init_ex()");
    }
    ret
}

/// Feeds `data_len` bytes from `data` into the computation.
///
/// # Safety
///
/// `ctx` must be an initialized context and `data` must point to
/// `data_len` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hmacshim_update(
    ctx: *mut HMAC_CTX,
    data: *const c_uchar,
    data_len: size_t,
) -> c_int {
    if ctx.is_null() || (data.is_null() && data_len != 0) {
        return 0;
    }
    let ret = compat::update(ctx, data, data_len);
    if ret == 0 {
        trace_ossl!("HMAC_Update()");
    }
    ret
}

/// Writes the MAC into `digest` and, if `outlen` is not NULL, the number
/// of bytes written into `*outlen`.
///
/// # Safety
///
/// `ctx` must be an initialized context, `digest` must have room for the
/// output of the selected digest.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hmacshim_final(
    ctx: *mut HMAC_CTX,
    digest: *mut c_uchar,
    outlen: *mut c_uint,
) -> c_int {
    if ctx.is_null() || digest.is_null() {
        return 0;
    }
    let ret = compat::finalize(ctx, digest, outlen);
    if ret == 0 {
        trace_ossl!("HMAC_Final()");
    }
    ret
}

/// Copies the whole state of `src` into `dst`, both can then be continued
/// and finalized independently.
///
/// # Safety
///
/// Both contexts must be live and `src` must be initialized.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hmacshim_ctx_copy(
    dst: *mut HMAC_CTX,
    src: *mut HMAC_CTX,
) -> c_int {
    if dst.is_null() || src.is_null() {
        return 0;
    }
    let ret = compat::ctx_copy(dst, src);
    if ret == 0 {
        trace_ossl!("HMAC_CTX_copy()");
    }
    ret
}

#[cfg(test)]
mod tests;
