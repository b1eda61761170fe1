// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

//! Maps the version macros of the linked headers to the cfgs the crate is
//! compiled with. Shared by build.rs and the unit tests.

const OPENSSL_1_0_0: i64 = 0x10000000;
const OPENSSL_1_1_0: i64 = 0x10100000;
const OPENSSL_1_1_1: i64 = 0x10101000;
const OPENSSL_3_0_0: i64 = 0x30000000;
const LIBRESSL_2_7_0: i64 = 0x2070000f;

/// Capabilities of the linked library.
///
/// Versions stack, so code only needs to be conditionalized on the oldest
/// release that introduced the desired behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Capabilities {
    pub libressl: bool,
    pub v100: bool,
    pub v110: bool,
    pub v111: bool,
    pub v300: bool,
    /// `HMAC_CTX` has no public layout, `HMAC_CTX_new()` exists
    pub hmac_opaque: bool,
    /// `HMAC_Init_ex()` & co. return a status
    pub hmac_status: bool,
}

impl Capabilities {
    /// `ossl` is `OPENSSL_VERSION_NUMBER`, `libressl` is
    /// `LIBRESSL_VERSION_NUMBER` or 0 when the macro is absent.
    pub fn from_versions(ossl: i64, libressl: i64) -> Capabilities {
        let is_libressl = libressl != 0;
        let openssl = !is_libressl;
        Capabilities {
            libressl: is_libressl,
            v100: ossl >= OPENSSL_1_0_0,
            v110: openssl && ossl >= OPENSSL_1_1_0,
            v111: openssl && ossl >= OPENSSL_1_1_1,
            v300: openssl && ossl >= OPENSSL_3_0_0,
            /* LibreSSL reports itself as 2.0.0 in OPENSSL_VERSION_NUMBER
             * but only hid the HMAC_CTX layout in 2.7.0 */
            hmac_opaque: if is_libressl {
                libressl >= LIBRESSL_2_7_0
            } else {
                ossl >= OPENSSL_1_1_0
            },
            hmac_status: ossl >= OPENSSL_1_0_0,
        }
    }

    /// The cfg names to emit for these capabilities
    pub fn cfgs(&self) -> Vec<&'static str> {
        let mut cfgs = Vec::new();
        for (set, name) in [
            (self.libressl, "libressl"),
            (self.v100, "ossl_v100"),
            (self.v110, "ossl_v110"),
            (self.v111, "ossl_v111"),
            (self.v300, "ossl_v300"),
            (self.hmac_opaque, "ossl_hmac_opaque"),
            (self.hmac_status, "ossl_hmac_status"),
        ] {
            if set {
                cfgs.push(name);
            }
        }
        cfgs
    }
}
