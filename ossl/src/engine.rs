// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Optional `ENGINE` selector for HMAC initialization

use crate::bindings::ENGINE;

/// A borrowed handle on an OpenSSL `ENGINE`.
///
/// The handle is never freed here; whoever obtained the engine keeps the
/// reference and must keep it alive while any context uses it.
#[derive(Clone, Copy, Debug)]
pub struct Engine {
    ptr: *mut ENGINE,
}

impl Engine {
    /// The default, built-in implementation (a NULL engine)
    pub fn none() -> Engine {
        Engine {
            ptr: std::ptr::null_mut(),
        }
    }

    /// Wraps an engine handle obtained from OpenSSL.
    ///
    /// # Safety
    ///
    /// `ptr` must be NULL or a valid, initialized `ENGINE` that outlives
    /// every use of the returned handle.
    pub unsafe fn from_ptr(ptr: *mut ENGINE) -> Engine {
        Engine { ptr }
    }

    /// Returns true for the default implementation
    pub fn is_none(&self) -> bool {
        self.ptr.is_null()
    }

    /// Returns the raw pointer to hand to OpenSSL
    pub fn as_mut_ptr(&self) -> *mut ENGINE {
        self.ptr
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::none()
    }
}

unsafe impl Send for Engine {}
