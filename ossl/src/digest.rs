// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! This module selects the message digest used by an HMAC computation

use std::ffi::CStr;

use crate::bindings::*;
use crate::compat;
use crate::{trace_ossl, Error, ErrorKind};

/// Handle on one of OpenSSL's static `EVP_MD` tables.
///
/// These tables live for the whole process and are never freed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvpMd {
    ptr: *const EVP_MD,
}

impl EvpMd {
    fn from_ptr(ptr: *const EVP_MD, func: &str) -> Result<EvpMd, Error> {
        if ptr.is_null() {
            trace_ossl!(func);
            return Err(Error::new(ErrorKind::NullPtr));
        }
        Ok(EvpMd { ptr })
    }

    /// Looks up a digest by its OpenSSL name (e.g. `c"SHA256"`)
    pub fn by_name(name: &CStr) -> Result<EvpMd, Error> {
        let ptr = unsafe { EVP_get_digestbyname(name.as_ptr()) };
        Self::from_ptr(ptr, "EVP_get_digestbyname()")
    }

    /// Returns the digest output size in bytes
    pub fn size(&self) -> Result<usize, Error> {
        let size = unsafe { compat::md_size(self.ptr) };
        Ok(usize::try_from(size)?)
    }

    /// Returns a const pointer to the underlying `EVP_MD`.
    pub fn as_ptr(&self) -> *const EVP_MD {
        self.ptr
    }
}

unsafe impl Send for EvpMd {}
unsafe impl Sync for EvpMd {}

/// Digest algorithms usable with HMAC
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DigestAlg {
    Md5,
    Sha1,
    Sha2_224,
    Sha2_256,
    Sha2_384,
    Sha2_512,
    #[cfg(ossl_v111)]
    Sha2_512_224,
    #[cfg(ossl_v111)]
    Sha2_512_256,
    #[cfg(ossl_v111)]
    Sha3_224,
    #[cfg(ossl_v111)]
    Sha3_256,
    #[cfg(ossl_v111)]
    Sha3_384,
    #[cfg(ossl_v111)]
    Sha3_512,
}

impl DigestAlg {
    /// Parses the conventional lower case name of a digest
    pub fn from_name(name: &str) -> Result<DigestAlg, Error> {
        Ok(match name {
            "md5" => DigestAlg::Md5,
            "sha1" => DigestAlg::Sha1,
            "sha224" => DigestAlg::Sha2_224,
            "sha256" => DigestAlg::Sha2_256,
            "sha384" => DigestAlg::Sha2_384,
            "sha512" => DigestAlg::Sha2_512,
            #[cfg(ossl_v111)]
            "sha512-224" => DigestAlg::Sha2_512_224,
            #[cfg(ossl_v111)]
            "sha512-256" => DigestAlg::Sha2_512_256,
            #[cfg(ossl_v111)]
            "sha3-224" => DigestAlg::Sha3_224,
            #[cfg(ossl_v111)]
            "sha3-256" => DigestAlg::Sha3_256,
            #[cfg(ossl_v111)]
            "sha3-384" => DigestAlg::Sha3_384,
            #[cfg(ossl_v111)]
            "sha3-512" => DigestAlg::Sha3_512,
            _ => return Err(Error::new(ErrorKind::WrapperError)),
        })
    }

    /// Resolves the algorithm to the library's `EVP_MD`
    pub fn md(&self) -> Result<EvpMd, Error> {
        let ptr = unsafe {
            match self {
                DigestAlg::Md5 => EVP_md5(),
                DigestAlg::Sha1 => EVP_sha1(),
                DigestAlg::Sha2_224 => EVP_sha224(),
                DigestAlg::Sha2_256 => EVP_sha256(),
                DigestAlg::Sha2_384 => EVP_sha384(),
                DigestAlg::Sha2_512 => EVP_sha512(),
                #[cfg(ossl_v111)]
                DigestAlg::Sha2_512_224 => EVP_sha512_224(),
                #[cfg(ossl_v111)]
                DigestAlg::Sha2_512_256 => EVP_sha512_256(),
                #[cfg(ossl_v111)]
                DigestAlg::Sha3_224 => EVP_sha3_224(),
                #[cfg(ossl_v111)]
                DigestAlg::Sha3_256 => EVP_sha3_256(),
                #[cfg(ossl_v111)]
                DigestAlg::Sha3_384 => EVP_sha3_384(),
                #[cfg(ossl_v111)]
                DigestAlg::Sha3_512 => EVP_sha3_512(),
            }
        };
        EvpMd::from_ptr(ptr, "EVP_<digest>()")
    }

    /// Provides the size of the digest output
    pub fn size(&self) -> Result<usize, Error> {
        self.md()?.size()
    }
}
