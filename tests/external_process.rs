#![cfg(unix)]

use pdf2html_front::{
    config::Config,
    doctor::diagnose,
    engine::{external::ExternalConverter, Converter},
    ConversionRequest, ConvertError, Invoker,
};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// Scripts are run through /bin/sh rather than exec'd directly: exec'ing a
// file just written by a multi-threaded test binary can fail with ETXTBSY.
fn script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("pdf2html");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn config_for(exe: &Path) -> Config {
    let mut cfg = Config::default();
    cfg.converter.executable = exe.display().to_string();
    cfg
}

fn sh_config() -> Config {
    config_for(Path::new("/bin/sh"))
}

#[test]
fn echoes_arguments_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "echo \"$@\"");
    let cfg = sh_config();
    let invoker = Invoker::new(&cfg, ExternalConverter::new(&cfg));

    // The script takes the source slot, so sh sees the flags as "$@".
    let req = ConversionRequest::new(&exe, "output/").no_toc(true);
    let out = invoker.invoke(&req).unwrap();
    assert_eq!(out, "-o output/ --no-toc\n");
}

#[test]
fn stderr_becomes_the_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "echo progress\necho 'bad xref table' >&2\nexit 4");
    let cfg = sh_config();
    let invoker = Invoker::new(&cfg, ExternalConverter::new(&cfg));

    let err = invoker
        .invoke(&ConversionRequest::new(&exe, "output/"))
        .unwrap_err();
    match err {
        ConvertError::Failed { code, diagnostic, .. } => {
            assert_eq!(code, Some(4));
            assert_eq!(diagnostic, "bad xref table");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn env_is_forwarded() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "printf '%s' \"$PDF2HTML_MODE\"");
    let mut cfg = sh_config();
    cfg.converter
        .env
        .insert("PDF2HTML_MODE".into(), "strict".into());
    let conv = ExternalConverter::new(&cfg);

    let out = conv.run(&[exe.into_os_string()]).unwrap();
    assert!(out.success);
    assert_eq!(out.stdout, "strict");
}

#[test]
fn timeout_kills_the_child() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "echo starting >&2\nexec sleep 5");
    let mut cfg = sh_config();
    cfg.converter.timeout_seconds = 1;
    let conv = ExternalConverter::new(&cfg);

    let err = conv.run(&[exe.into_os_string()]).unwrap_err();
    match err {
        ConvertError::Timeout { secs, stderr, .. } => {
            assert_eq!(secs, 1);
            assert_eq!(stderr, "starting");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn timeout_returns_while_grandchild_holds_pipes() {
    let dir = tempfile::tempdir().unwrap();
    // No exec: sh forks sleep, which keeps stdout/stderr open after sh is killed.
    let exe = script(dir.path(), "sleep 6\necho done");
    let mut cfg = sh_config();
    cfg.converter.timeout_seconds = 1;
    let conv = ExternalConverter::new(&cfg);

    let started = Instant::now();
    let err = conv.run(&[exe.into_os_string()]).unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ConvertError::Timeout { secs: 1, .. }));
    assert!(elapsed < Duration::from_secs(4), "run blocked for {elapsed:?}");
}

#[test]
fn missing_executable_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_for(&dir.path().join("nope"));
    let conv = ExternalConverter::new(&cfg);

    let diag = diagnose(&conv);
    assert!(!diag.found);
    assert!(diag.message.starts_with("❌ pdf2html not found"));
    assert!(diag.message.contains("chmod +x"));

    let err = conv.run(&["doc.pdf".into()]).unwrap_err();
    assert!(matches!(err, ConvertError::ExecutableMissing { .. }));
    assert!(err.user_message().starts_with("❌ Error:"));
}

#[test]
fn installed_executable_is_found() {
    let dir = tempfile::tempdir().unwrap();
    let exe = script(dir.path(), "exit 0");
    let cfg = config_for(&exe);

    let diag = diagnose(&ExternalConverter::new(&cfg));
    assert!(diag.found);
    assert_eq!(diag.message, format!("✅ pdf2html found at: {}", exe.display()));
}
