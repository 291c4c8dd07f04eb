//! Structural checks on compiled output.
//!
//! The library is rebuilt in release mode with `--emit=asm` at several
//! optimization levels. The bodies of `decompose` and `use_hint` must contain
//! no division instruction and no conditional branch; the variable-time
//! `decompose_vartime` must contain both, so the scan is known to work.

#![cfg(all(
    any(target_arch = "x86_64", target_arch = "aarch64"),
    not(target_os = "windows")
))]

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
    sync::OnceLock,
};

const OPT_LEVELS: [&str; 2] = ["2", "3"];

const DECOMPOSE: &str = "12ct_decompose9decompose9decompose";
const USE_HINT: &str = "12ct_decompose9decompose8use_hint";
const DECOMPOSE_VARTIME: &str = "12ct_decompose7vartime17decompose_vartime";

/// Release assembly of the library, one entry per optimization level.
fn release_asm() -> &'static [(&'static str, String)] {
    static ASM: OnceLock<Vec<(&'static str, String)>> = OnceLock::new();
    ASM.get_or_init(|| {
        OPT_LEVELS
            .iter()
            .map(|&opt_level| (opt_level, build_asm(opt_level)))
            .collect()
    })
}

fn build_asm(opt_level: &str) -> String {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
    let target_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(format!("asm-O{opt_level}"));

    let status = Command::new(env!("CARGO"))
        .args(["rustc", "--release", "--lib", "--manifest-path"])
        .arg(&manifest)
        .arg("--target-dir")
        .arg(&target_dir)
        .args(["--", "--emit=asm"])
        .env("CARGO_PROFILE_RELEASE_OPT_LEVEL", opt_level)
        .env("CARGO_PROFILE_RELEASE_CODEGEN_UNITS", "1")
        .env("CARGO_PROFILE_RELEASE_DEBUG_ASSERTIONS", "false")
        .env("CARGO_PROFILE_RELEASE_OVERFLOW_CHECKS", "false")
        .status()
        .expect("failed to spawn cargo");
    assert!(status.success(), "release build failed at opt-level {opt_level}");

    let path = newest_asm(&target_dir.join("release").join("deps"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

fn newest_asm(deps: &Path) -> PathBuf {
    fs::read_dir(deps)
        .expect("missing deps directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "s")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("ct_decompose-"))
        })
        .max_by_key(|path| fs::metadata(path).and_then(|m| m.modified()).ok())
        .expect("no assembly emitted for ct_decompose")
}

/// Mnemonics of the function whose mangled name contains `symbol`.
fn mnemonics<'a>(asm: &'a str, symbol: &str) -> Vec<&'a str> {
    let mut lines = asm.lines().skip_while(|line| {
        line.starts_with(char::is_whitespace)
            || !line
                .split_whitespace()
                .next()
                .is_some_and(|label| label.ends_with(':') && label.contains(symbol))
    });
    assert!(lines.next().is_some(), "no symbol containing {symbol}");

    lines
        .map(str::trim)
        .take_while(|line| *line != ".cfi_endproc" && !line.starts_with(".Lfunc_end"))
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| {
            !token.starts_with('.')
                && !token.ends_with(':')
                && !token.starts_with('#')
                && !token.starts_with("//")
                && !token.starts_with(';')
        })
        .collect()
}

fn is_division(mnemonic: &str) -> bool {
    if cfg!(target_arch = "x86_64") {
        mnemonic.starts_with("div") || mnemonic.starts_with("idiv")
    } else {
        matches!(mnemonic, "udiv" | "sdiv")
    }
}

fn is_conditional_branch(mnemonic: &str) -> bool {
    if cfg!(target_arch = "x86_64") {
        mnemonic.starts_with('j') && !mnemonic.starts_with("jmp")
    } else {
        mnemonic.starts_with("b.")
            || mnemonic.starts_with("bc.")
            || matches!(mnemonic, "cbz" | "cbnz" | "tbz" | "tbnz")
    }
}

fn assert_straight_line(symbol: &str) {
    for (opt_level, asm) in release_asm() {
        let body = mnemonics(asm, symbol);
        assert!(!body.is_empty(), "{symbol} has an empty body at opt-level {opt_level}");

        let divisions: Vec<_> = body.iter().filter(|m| is_division(m)).collect();
        assert!(
            divisions.is_empty(),
            "{symbol} divides at opt-level {opt_level}: {divisions:?}"
        );

        let branches: Vec<_> = body.iter().filter(|m| is_conditional_branch(m)).collect();
        assert!(
            branches.is_empty(),
            "{symbol} branches at opt-level {opt_level}: {branches:?}"
        );
    }
}

#[test]
fn decompose_is_straight_line() {
    assert_straight_line(DECOMPOSE);
}

#[test]
fn use_hint_is_straight_line() {
    assert_straight_line(USE_HINT);
}

#[test]
fn decompose_vartime_divides_and_branches() {
    for (opt_level, asm) in release_asm() {
        let body = mnemonics(asm, DECOMPOSE_VARTIME);
        assert!(
            body.iter().any(|m| is_division(m)),
            "no division in decompose_vartime at opt-level {opt_level}"
        );
        assert!(
            body.iter().any(|m| is_conditional_branch(m)),
            "no conditional branch in decompose_vartime at opt-level {opt_level}"
        );
    }
}
