// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module provides a safe abstraction over the OpenSSL HMAC apis

use std::ffi::{c_int, c_uint, c_void};

use constant_time_eq::constant_time_eq;

use crate::bindings::*;
use crate::compat;
use crate::digest::{DigestAlg, EvpMd};
use crate::engine::Engine;
use crate::{trace_ossl, Error, ErrorKind};

/// Wrapper around OpenSSL's `HMAC_CTX`, managing its lifecycle.
#[derive(Debug)]
pub struct HmacCtx {
    ptr: *mut HMAC_CTX,
}

/// Methods for creating and accessing `HmacCtx`.
impl HmacCtx {
    /// Allocates a new, zeroed context
    pub fn new() -> Result<HmacCtx, Error> {
        let ptr = unsafe { compat::ctx_new() };
        if ptr.is_null() {
            trace_ossl!("HMAC_CTX_new()");
            return Err(Error::new(ErrorKind::NullPtr));
        }
        Ok(HmacCtx { ptr })
    }

    /// Returns a const pointer to the underlying `HMAC_CTX`.
    pub unsafe fn as_ptr(&self) -> *const HMAC_CTX {
        self.ptr
    }

    /// Returns a mutable pointer to the underlying `HMAC_CTX`.
    pub unsafe fn as_mut_ptr(&mut self) -> *mut HMAC_CTX {
        self.ptr
    }

    /// Tries to clone the context, including any partial computation.
    pub fn try_clone(&self) -> Result<HmacCtx, Error> {
        let mut new = Self::new()?;
        let ret = unsafe { compat::ctx_copy(new.as_mut_ptr(), self.ptr) };
        if ret == 0 {
            trace_ossl!("HMAC_CTX_copy()");
            return Err(Error::new(ErrorKind::OsslError));
        }
        Ok(new)
    }
}

impl Drop for HmacCtx {
    fn drop(&mut self) {
        unsafe {
            compat::ctx_free(self.ptr);
        }
    }
}

unsafe impl Send for HmacCtx {}

/// Higher level wrapper for HMAC operations
#[derive(Debug)]
pub struct OsslHmac {
    /// The OpenSSL HMAC context (`HMAC_CTX`).
    ctx: HmacCtx,
    /// The selected digest algorithm
    alg: DigestAlg,
    /// The OpenSSL message digest (`EVP_MD`).
    md: EvpMd,
    /// The implementation the context was initialized with
    engine: Engine,
    /// Output size as reported by OpenSSL
    size: usize,
    /// Set once the MAC was produced, cleared by a new init
    finalized: bool,
}

impl OsslHmac {
    /// Fully initializes a new context that is ready to ingest data
    pub fn new(
        alg: DigestAlg,
        key: &[u8],
        engine: Engine,
    ) -> Result<OsslHmac, Error> {
        let md = alg.md()?;
        let mut hctx = OsslHmac {
            ctx: HmacCtx::new()?,
            alg: alg,
            md: md,
            engine: engine,
            size: md.size()?,
            finalized: false,
        };
        hctx.init(Some(key))?;
        Ok(hctx)
    }

    fn init(&mut self, key: Option<&[u8]>) -> Result<(), Error> {
        let (keyptr, keylen) = match key {
            Some(k) => (k.as_ptr() as *const c_void, c_int::try_from(k.len())?),
            None => (std::ptr::null(), 0),
        };
        let ret = unsafe {
            compat::init_ex(
                self.ctx.as_mut_ptr(),
                keyptr,
                keylen,
                self.md.as_ptr(),
                self.engine.as_mut_ptr(),
            )
        };
        if ret == 0 {
            trace_ossl!("HMAC_Init_ex()");
            return Err(Error::new(ErrorKind::OsslError));
        }
        self.finalized = false;
        Ok(())
    }

    /// Re-initializes the context with a new key, discarding any existing
    /// state
    pub fn rekey(&mut self, key: &[u8]) -> Result<(), Error> {
        self.init(Some(key))
    }

    /// Re-initializes the context with the current key, discarding any
    /// existing state
    pub fn reset(&mut self) -> Result<(), Error> {
        self.init(None)
    }

    /// Ingests data into the MAC computation
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::new(ErrorKind::OsslError));
        }
        let ret = unsafe {
            compat::update(self.ctx.as_mut_ptr(), data.as_ptr(), data.len())
        };
        if ret == 0 {
            trace_ossl!("HMAC_Update()");
            return Err(Error::new(ErrorKind::OsslError));
        }
        Ok(())
    }

    /// Finalizes the state and produces the output MAC
    /// No more operations are possible on this object unless
    /// `OsslHmac::reset` or `OsslHmac::rekey` is called first: `update`
    /// and `finalize` return an `ErrorKind::OsslError` until then.
    pub fn finalize(&mut self, output: &mut [u8]) -> Result<usize, Error> {
        if self.finalized {
            return Err(Error::new(ErrorKind::OsslError));
        }
        if output.len() < self.size {
            return Err(Error::new(ErrorKind::BufferSize));
        }
        let mut outlen: c_uint = 0;
        let ret = unsafe {
            compat::finalize(
                self.ctx.as_mut_ptr(),
                output.as_mut_ptr(),
                &mut outlen,
            )
        };
        /* the digest state is consumed even if HMAC_Final() failed */
        self.finalized = true;
        if ret == 0 {
            trace_ossl!("HMAC_Final()");
            return Err(Error::new(ErrorKind::OsslError));
        }
        Ok(usize::try_from(outlen)?)
    }

    /// Finalizes the state and returns the MAC in a new vector
    pub fn finalize_vec(&mut self) -> Result<Vec<u8>, Error> {
        let mut output = vec![0u8; self.size];
        let len = self.finalize(&mut output)?;
        output.truncate(len);
        Ok(output)
    }

    /// Finalizes the state and compares the result with `tag` in constant
    /// time. A tag of a different length never matches.
    /// Like `OsslHmac::finalize`, it fails on an already finalized
    /// context.
    pub fn verify(&mut self, tag: &[u8]) -> Result<bool, Error> {
        let mac = self.finalize_vec()?;
        Ok(constant_time_eq(&mac, tag))
    }

    /// Provides the size of the expected output MAC
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the digest algorithm in use
    pub fn alg(&self) -> DigestAlg {
        self.alg
    }

    /// Tries to clone the computation, the two copies can then be
    /// continued and finalized independently.
    pub fn try_clone(&self) -> Result<OsslHmac, Error> {
        Ok(OsslHmac {
            ctx: self.ctx.try_clone()?,
            alg: self.alg,
            md: self.md,
            engine: self.engine,
            size: self.size,
            finalized: self.finalized,
        })
    }
}

/// Computes the HMAC of `data` under `key` in one call
pub fn hmac(alg: DigestAlg, key: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut ctx = OsslHmac::new(alg, key, Engine::none())?;
    ctx.update(data)?;
    ctx.finalize_vec()
}
