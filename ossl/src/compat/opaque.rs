// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Context lifecycle for libraries that hide the `HMAC_CTX` layout

use crate::bindings::*;

/// Allocates a new zeroed context, returns NULL on allocation failure.
///
/// # Safety
///
/// The returned pointer must be released with [ctx_free].
pub unsafe fn ctx_new() -> *mut HMAC_CTX {
    HMAC_CTX_new()
}

/// Wipes and releases a context, NULL is accepted.
///
/// # Safety
///
/// `ctx` must be NULL or come from [ctx_new] and not be used afterwards.
pub unsafe fn ctx_free(ctx: *mut HMAC_CTX) {
    HMAC_CTX_free(ctx)
}
