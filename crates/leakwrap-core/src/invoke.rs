//! 外部扫描器的同步调用与退出码分类
use std::process::Command;
use tracing::{info, warn};

use crate::error::WrapError;
use crate::options::{InvokeOptions, Outcome};

/// stderr 中标记未识别参数的子串（gitleaks 的 flag 解析约定）
const UNKNOWN_FLAG_MARKER: &str = "unknown flag: ";

/// 同步执行外部扫描器并分类退出状态
/// - 0 → Clean；1 → FindingsPresent（两者均继续走 reshape）
/// - 其他退出码 → 错误：优先识别未知参数，其余携带原始 stderr
/// - 阻塞直至子进程结束，不设超时（已知限制，刻意保留）
pub fn run_scanner(opts: &InvokeOptions) -> Result<Outcome, WrapError> {
    let argv = opts.to_argv();
    info!(?argv, "invoking scanner");

    let output = Command::new(&argv[0])
        .args(&argv[1..])
        .output()
        .map_err(|e| WrapError::Config(format!("unable to launch '{}': {e}", argv[0])))?;

    match output.status.code() {
        Some(0) => {
            info!("scan completed successfully with no leaks");
            Ok(Outcome::Clean)
        }
        Some(1) => {
            // gitleaks 约定：1 表示扫描正常完成且有命中
            warn!("scanner reported findings, proceeding with output processing");
            Ok(Outcome::FindingsPresent)
        }
        // 被信号终止时没有退出码，记为 -1
        code => Err(classify_failure(code.unwrap_or(-1), &output.stderr)),
    }
}

/// 非 0/1 退出的归类
/// 未知参数 → UnknownFlag（标记后直到行尾的片段即违规 token）；否则 Tool 携带裁剪后的 stderr
fn classify_failure(code: i32, stderr: &[u8]) -> WrapError {
    let stderr = String::from_utf8_lossy(stderr);
    let trimmed = stderr.trim();

    if let Some((_, rest)) = trimmed.split_once(UNKNOWN_FLAG_MARKER) {
        let flag = rest.lines().next().unwrap_or("").trim().to_string();
        return WrapError::UnknownFlag { flag };
    }

    let stderr = if trimmed.is_empty() {
        "No error message captured.".to_string()
    } else {
        trimmed.to_string()
    };
    WrapError::Tool { code, stderr }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_token_runs_to_end_of_line() {
        let stderr = b"Error: unknown flag: --jit\nUsage:\n  gitleaks detect [flags]\n";
        match classify_failure(126, stderr) {
            WrapError::UnknownFlag { flag } => assert_eq!(flag, "--jit"),
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn plain_failure_carries_trimmed_stderr_and_code() {
        match classify_failure(3, b"  config file not found\n") {
            WrapError::Tool { code, stderr } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "config file not found");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn empty_stderr_substitutes_placeholder_message() {
        match classify_failure(5, b"") {
            WrapError::Tool { code, stderr } => {
                assert_eq!(code, 5);
                assert_eq!(stderr, "No error message captured.");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[cfg(unix)]
    mod subprocess {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};
        use tempfile::TempDir;

        /// 写一个可执行的假扫描器脚本
        fn stub_scanner(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-gitleaks");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn opts_for(command: &Path, tmp: &TempDir) -> InvokeOptions {
            InvokeOptions {
                command: command.display().to_string(),
                subcommand: "detect".to_string(),
                source: tmp.path().to_path_buf(),
                report_path: tmp.path().join("out.json"),
                additional: Vec::new(),
            }
        }

        #[test]
        fn exit_zero_is_clean() {
            let tmp = TempDir::new().unwrap();
            let stub = stub_scanner(tmp.path(), "exit 0");
            assert_eq!(run_scanner(&opts_for(&stub, &tmp)).unwrap(), Outcome::Clean);
        }

        #[test]
        fn exit_one_is_findings_present_not_an_error() {
            let tmp = TempDir::new().unwrap();
            let stub = stub_scanner(tmp.path(), "exit 1");
            assert_eq!(run_scanner(&opts_for(&stub, &tmp)).unwrap(), Outcome::FindingsPresent);
        }

        #[test]
        fn unknown_flag_from_real_subprocess_maps_to_code_two() {
            let tmp = TempDir::new().unwrap();
            let stub = stub_scanner(tmp.path(), "echo 'Error: unknown flag: --jit' >&2\nexit 126");
            let err = run_scanner(&opts_for(&stub, &tmp)).unwrap_err();
            assert_eq!(err.exit_code(), 2);
            assert_eq!(err.to_string(), "Gitleaks scan failed: unknown argument '--jit'.");
        }

        #[test]
        fn missing_scanner_binary_is_a_config_error() {
            let tmp = TempDir::new().unwrap();
            let missing = tmp.path().join("no-such-scanner");
            let err = run_scanner(&opts_for(&missing, &tmp)).unwrap_err();
            assert_eq!(err.exit_code(), 2);
            assert!(matches!(err, WrapError::Config(_)));
        }
    }
}
