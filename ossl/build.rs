// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use std::env;
use std::panic::set_hook;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

mod capabilities;
use capabilities::Capabilities;

/* Filled in by the parser callbacks, 0 means the macro was not seen */
static OPENSSL_VERSION: AtomicI64 = AtomicI64::new(0);
static LIBRESSL_VERSION: AtomicI64 = AtomicI64::new(0);

#[derive(Debug)]
pub struct OsslCallbacks;

impl bindgen::callbacks::ParseCallbacks for OsslCallbacks {
    fn int_macro(
        &self,
        name: &str,
        value: i64,
    ) -> Option<bindgen::callbacks::IntKind> {
        match name {
            "OPENSSL_VERSION_NUMBER" => {
                OPENSSL_VERSION.store(value, Ordering::Relaxed)
            }
            "LIBRESSL_VERSION_NUMBER" => {
                LIBRESSL_VERSION.store(value, Ordering::Relaxed)
            }
            _ => (),
        }
        None
    }

    fn include_file(&self, filename: &str) {
        println!("cargo:rerun-if-changed={filename}");
    }
}

/// Translates the version macros found in the headers into capability
/// cfgs, see [Capabilities::from_versions].
fn emit_version_cfgs() {
    let ossl = OPENSSL_VERSION.load(Ordering::Relaxed);
    let libressl = LIBRESSL_VERSION.load(Ordering::Relaxed);

    if ossl == 0 {
        panic!("OPENSSL_VERSION_NUMBER not found in the OpenSSL headers");
    }

    let caps = Capabilities::from_versions(ossl, libressl);
    if caps.libressl {
        println!("cargo:warning=Building against LibreSSL {libressl:x}");
    }
    if !caps.hmac_status {
        println!(
            "cargo:warning=OpenSSL {ossl:x} HMAC functions cannot report failures"
        );
    }
    for cfg in caps.cfgs() {
        println!("cargo::rustc-cfg={cfg}");
    }
}

fn ossl_bindings<T: AsRef<str>>(args: &[T], out_file: &Path) {
    bindgen::Builder::default()
        .header("ossl.h")
        .clang_args(args)
        .derive_default(true)
        .formatter(bindgen::Formatter::Prettyplease)
        .allowlist_item("HMAC_.*")
        .allowlist_item("hmac_.*")
        .allowlist_item("EVP_.*")
        .allowlist_item("evp_.*")
        .allowlist_item("env_md_.*")
        .allowlist_item("CRYPTO_.*")
        .allowlist_item("OPENSSL_.*")
        .allowlist_item("LIBRESSL_.*")
        .allowlist_item("ERR_.*")
        .allowlist_type("ENGINE")
        .parse_callbacks(Box::new(OsslCallbacks))
        .generate()
        .expect("Unable to generate bindings")
        .write_to_file(out_file)
        .expect("Couldn't write bindings!");

    emit_version_cfgs();
}

fn build_ossl(out_file: &Path) {
    let sources = std::env::var("HMACSHIM_OPENSSL_SOURCES")
        .expect("Env var HMACSHIM_OPENSSL_SOURCES is not defined");
    let openssl_path = std::path::PathBuf::from(sources)
        .canonicalize()
        .expect("cannot canonicalize OpenSSL path");

    /* The HMAC_* functions are deprecated in 3.0, they must stay enabled */
    let mut buildargs = vec!["no-shared", "no-tests"];

    match std::env::var("CARGO_CFG_TARGET_ARCH") {
        Ok(arch) => match arch.as_str() {
            "x86" => {
                buildargs.insert(0, "linux-elf");
                buildargs.push("-m32");
                buildargs.push("-latomic");
            }
            _ => (),
        },
        _ => panic!("No arch available in CARGO_CFG_TARGET_ARCH"),
    }

    if env::var("PROFILE").unwrap().as_str() == "debug" {
        buildargs.push("--debug");
    }

    let libpath = format!("{}/libcrypto.a", openssl_path.to_string_lossy());

    println!("cargo:rustc-link-search={}", openssl_path.to_string_lossy());
    println!("cargo:rustc-link-lib=static=crypto");
    println!("cargo:rerun-if-changed={}", libpath);

    /* must declare this after the static one or builds will fail */
    match std::env::var("CARGO_CFG_TARGET_ARCH") {
        Ok(arch) => match arch.as_str() {
            "x86" => {
                println!("cargo::rustc-link-lib=atomic");
            }
            _ => (),
        },
        _ => panic!("No arch available in CARGO_CFG_TARGET_ARCH"),
    }

    match std::path::Path::new(&libpath).try_exists() {
        Ok(true) => (),
        _ => {
            /* openssl: ./Configure --debug no-shared */
            if !std::process::Command::new("./Configure")
                .current_dir(&openssl_path)
                .args(buildargs)
                .stdout(std::process::Stdio::inherit())
                .stderr(std::process::Stdio::inherit())
                .output()
                .expect("could not run openssl `Configure`")
                .status
                .success()
            {
                // Panic if the command was not successful.
                panic!("could not configure OpenSSL");
            }

            if !std::process::Command::new("make")
                .current_dir(&openssl_path)
                .arg("build_libs")
                .stdout(std::process::Stdio::inherit())
                .stderr(std::process::Stdio::inherit())
                .output()
                .expect("could not run openssl `make`")
                .status
                .success()
            {
                // Panic if the command was not successful.
                panic!("could not build OpenSSL");
            }
        }
    }

    let include_path = format!(
        "-I{}",
        openssl_path
            .join("include")
            .canonicalize()
            .expect("OpenSSL include path unavailable")
            .to_str()
            .unwrap()
    );

    ossl_bindings(&[include_path.as_str()], out_file);
}

fn use_system_ossl(out_file: &Path) {
    let library = pkg_config::Config::new().probe("libcrypto").unwrap();

    let mut args: Vec<String> = Vec::new();
    for include_path in library.include_paths {
        args.push(["-I", include_path.to_str().unwrap()].concat());
    }

    ossl_bindings(&args, out_file);
}

fn set_pretty_panic() {
    set_hook(Box::new(|panic_info| {
        if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            if s != &"panic in a function that cannot unwind" {
                println!("Compile Error: {s:?}");
            }
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            if s != "panic in a function that cannot unwind" {
                println!("Compile Error: {s:?}");
            }
        } else {
            if let Some(location) = panic_info.location() {
                println!(
                    "Unrecognized compile error in file '{}' at line {}",
                    location.file(),
                    location.line(),
                );
            } else {
                println!("Unknown panic with no location information...");
            }
        }
    }));
}

fn main() {
    set_pretty_panic();

    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    let ossl_bindings = out_path.join("ossl_bindings.rs");

    /* Always emit known configs */
    println!("cargo::rustc-check-cfg=cfg(ossl_v100,ossl_v110,ossl_v111,ossl_v300,libressl,ossl_hmac_opaque,ossl_hmac_status)");

    /* OpenSSL Cryptography */
    if cfg!(feature = "dynamic") {
        use_system_ossl(&ossl_bindings);
    } else {
        build_ossl(&ossl_bindings);
    }

    println!("cargo:rerun-if-changed=ossl.h");
    println!("cargo:rerun-if-changed=capabilities.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
