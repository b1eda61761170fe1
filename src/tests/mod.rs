// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use super::*;
use hex;
use serial_test::parallel;

const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

/* Runs a full init/update/final cycle through the exported ABI */
fn abi_mac(alg: DigestAlg, key: &[u8], chunks: &[&[u8]]) -> Vec<u8> {
    let md = alg.md().unwrap();
    let ctx = hmacshim_ctx_new();
    assert!(!ctx.is_null());
    let mut out = [0u8; 64];
    let mut outlen: c_uint = 0;
    unsafe {
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                key.as_ptr() as *const c_void,
                key.len() as c_int,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            1
        );
        for chunk in chunks {
            assert_eq!(hmacshim_update(ctx, chunk.as_ptr(), chunk.len()), 1);
        }
        assert_eq!(hmacshim_final(ctx, out.as_mut_ptr(), &mut outlen), 1);
        hmacshim_ctx_free(ctx);
    }
    out[..outlen as usize].to_vec()
}

#[test]
#[parallel]
fn test_alloc_free() {
    for _ in 0..32 {
        let ctx = hmacshim_ctx_new();
        assert!(!ctx.is_null());
        unsafe { hmacshim_ctx_free(ctx) };
    }
    unsafe { hmacshim_ctx_free(std::ptr::null_mut()) };
}

#[test]
#[parallel]
fn test_matches_safe_api() {
    let chunks: Vec<&[u8]> = FOX.chunks(4).collect();
    for alg in [DigestAlg::Sha1, DigestAlg::Sha2_256, DigestAlg::Sha2_512] {
        let mac = abi_mac(alg, b"key", &chunks);
        assert_eq!(mac.len(), alg.size().unwrap());
        assert_eq!(mac, hmac(alg, b"key", FOX).unwrap());
    }
    assert_eq!(
        abi_mac(DigestAlg::Md5, b"key", &[FOX]),
        hex::decode("80070713463e7749b90c2dc24911e275").unwrap()
    );
}

#[test]
#[parallel]
fn test_no_update() {
    let mac = abi_mac(DigestAlg::Sha2_256, b"", &[]);
    assert_eq!(
        mac,
        hex::decode(
            "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad"
        )
        .unwrap()
    );
}

#[test]
#[parallel]
fn test_copy() {
    let md = DigestAlg::Sha2_256.md().unwrap();
    let src = hmacshim_ctx_new();
    let dst = hmacshim_ctx_new();
    assert!(!src.is_null() && !dst.is_null());
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    let mut alen: c_uint = 0;
    let mut blen: c_uint = 0;
    unsafe {
        assert_eq!(
            hmacshim_init_ex(
                src,
                b"key".as_ptr() as *const c_void,
                3,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            1
        );
        assert_eq!(hmacshim_update(src, FOX.as_ptr(), 10), 1);
        assert_eq!(hmacshim_ctx_copy(dst, src), 1);
        let rest = &FOX[10..];
        assert_eq!(hmacshim_update(src, rest.as_ptr(), rest.len()), 1);
        assert_eq!(hmacshim_update(dst, rest.as_ptr(), rest.len()), 1);
        assert_eq!(hmacshim_final(src, a.as_mut_ptr(), &mut alen), 1);
        assert_eq!(hmacshim_final(dst, b.as_mut_ptr(), &mut blen), 1);
        hmacshim_ctx_free(src);
        hmacshim_ctx_free(dst);
    }
    assert_eq!(alen, 32);
    assert_eq!(blen, 32);
    assert_eq!(a, b);
    assert_eq!(a.to_vec(), hmac(DigestAlg::Sha2_256, b"key", FOX).unwrap());
}

#[test]
#[parallel]
fn test_rekey_and_restart() {
    let md = DigestAlg::Sha2_384.md().unwrap();
    let ctx = hmacshim_ctx_new();
    assert!(!ctx.is_null());
    let mut out = [0u8; 48];
    let mut outlen: c_uint = 0;
    unsafe {
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                b"old key".as_ptr() as *const c_void,
                7,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            1
        );
        assert_eq!(hmacshim_update(ctx, b"stale".as_ptr(), 5), 1);

        /* new key, the stale input must not leak into the result */
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                b"key".as_ptr() as *const c_void,
                3,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            1
        );
        assert_eq!(hmacshim_update(ctx, FOX.as_ptr(), FOX.len()), 1);
        assert_eq!(hmacshim_final(ctx, out.as_mut_ptr(), &mut outlen), 1);
        assert_eq!(
            out.to_vec(),
            hmac(DigestAlg::Sha2_384, b"key", FOX).unwrap()
        );

        /* NULL key and digest restart with the same key */
        let mut again = [0u8; 48];
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                std::ptr::null(),
                0,
                std::ptr::null(),
                std::ptr::null_mut(),
            ),
            1
        );
        assert_eq!(hmacshim_update(ctx, FOX.as_ptr(), FOX.len()), 1);
        assert_eq!(
            hmacshim_final(ctx, again.as_mut_ptr(), std::ptr::null_mut()),
            1
        );
        assert_eq!(again, out);

        hmacshim_ctx_free(ctx);
    }
    assert_eq!(outlen, 48);
}

#[test]
#[parallel]
fn test_null_arguments() {
    let mut out = [0u8; 64];
    let mut outlen: c_uint = 0;
    let md = DigestAlg::Sha1.md().unwrap();
    unsafe {
        assert_eq!(
            hmacshim_init_ex(
                std::ptr::null_mut(),
                b"key".as_ptr() as *const c_void,
                3,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            0
        );
        assert_eq!(hmacshim_update(std::ptr::null_mut(), FOX.as_ptr(), 1), 0);
        assert_eq!(
            hmacshim_final(std::ptr::null_mut(), out.as_mut_ptr(), &mut outlen),
            0
        );
        assert_eq!(
            hmacshim_ctx_copy(std::ptr::null_mut(), std::ptr::null_mut()),
            0
        );

        let ctx = hmacshim_ctx_new();
        assert!(!ctx.is_null());
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                b"key".as_ptr() as *const c_void,
                -1,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            0
        );
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                b"key".as_ptr() as *const c_void,
                3,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            1
        );
        assert_eq!(hmacshim_update(ctx, std::ptr::null(), 4), 0);
        assert_eq!(hmacshim_update(ctx, std::ptr::null(), 0), 1);
        assert_eq!(hmacshim_final(ctx, std::ptr::null_mut(), &mut outlen), 0);
        hmacshim_ctx_free(ctx);
    }
}

#[test]
#[parallel]
fn test_null_key_ignores_length() {
    let md = DigestAlg::Sha2_256.md().unwrap();
    let mut out = [0u8; 64];
    let mut outlen: c_uint = 0;
    unsafe {
        let ctx = hmacshim_ctx_new();
        assert!(!ctx.is_null());
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                b"key".as_ptr() as *const c_void,
                3,
                md.as_ptr(),
                std::ptr::null_mut(),
            ),
            1
        );
        assert_eq!(hmacshim_update(ctx, b"junk".as_ptr(), 4), 1);

        /* restart with the previous key, the length is not looked at */
        assert_eq!(
            hmacshim_init_ex(
                ctx,
                std::ptr::null(),
                -1,
                std::ptr::null(),
                std::ptr::null_mut(),
            ),
            1
        );
        assert_eq!(hmacshim_update(ctx, FOX.as_ptr(), FOX.len()), 1);
        assert_eq!(hmacshim_final(ctx, out.as_mut_ptr(), &mut outlen), 1);
        hmacshim_ctx_free(ctx);
    }
    assert_eq!(outlen, 32);
    assert_eq!(
        out[..32].to_vec(),
        hmac(DigestAlg::Sha2_256, b"key", FOX).unwrap()
    );
}

#[test]
#[parallel]
fn test_reexported_wrapper() {
    let mut ctx = OsslHmac::new(DigestAlg::Sha1, b"key", Engine::none()).unwrap();
    ctx.update(FOX).unwrap();
    let mut short = [0u8; 4];
    assert_eq!(
        ctx.finalize(&mut short).unwrap_err().kind(),
        ErrorKind::BufferSize
    );
    assert!(ctx
        .verify(&hex::decode("de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9").unwrap())
        .unwrap());
}
