// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Version independent HMAC context primitives
//!
//! OpenSSL changed the HMAC API twice: 1.0.0 made the primitives return a
//! status, and 1.1.0 (LibreSSL 2.7.0) hid the `HMAC_CTX` layout behind
//! `HMAC_CTX_new()`/`HMAC_CTX_free()`. Each change is a capability
//! detected once by the build script and mapped to exactly one backend
//! module here, so callers always see the same six functions:
//!
//! | capability          | present     | absent        |
//! |---------------------|-------------|---------------|
//! | `ossl_hmac_opaque`  | `opaque`    | `zalloc`      |
//! | `ossl_hmac_status`  | `checked`   | `unchecked`   |
//!
//! The digest size query moved too: a field read before 1.0.0,
//! `EVP_MD_size()` up to 1.1.1 and `EVP_MD_get_size()` from 3.0 on.
//!
//! All functions return nonzero on success and zero on failure. None of
//! them validate call ordering: a context must come from [ctx_new] and
//! must not be used after [ctx_free].

use std::ffi::c_int;

use crate::bindings::*;

cfg_if::cfg_if! {
    if #[cfg(ossl_hmac_opaque)] {
        mod opaque;
        pub use opaque::{ctx_free, ctx_new};
    } else {
        mod zalloc;
        pub use zalloc::{ctx_free, ctx_new};
    }
}

cfg_if::cfg_if! {
    if #[cfg(ossl_hmac_status)] {
        mod checked;
        pub use checked::{ctx_copy, finalize, init_ex, update};
    } else {
        mod unchecked;
        pub use unchecked::{ctx_copy, finalize, init_ex, update};
    }
}

/// Returns the output size in bytes of the digest `md`, or a negative
/// value on error.
///
/// # Safety
///
/// `md` must be a valid `EVP_MD` pointer.
pub unsafe fn md_size(md: *const EVP_MD) -> c_int {
    cfg_if::cfg_if! {
        if #[cfg(ossl_v300)] {
            EVP_MD_get_size(md)
        } else if #[cfg(ossl_v100)] {
            EVP_MD_size(md)
        } else {
            /* EVP_MD_size() is a macro before 1.0.0, read the field */
            (*md).md_size
        }
    }
}
