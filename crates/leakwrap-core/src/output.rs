//! 终态文档落盘（整写覆盖，含父目录创建）
use std::fs;
use std::io;
use std::path::Path;

use crate::types::{ErrorReport, Report};

/// 确保父目录存在；返回是否有新建（便于调用方记日志）
pub fn ensure_parent_dir(path: &Path) -> io::Result<bool> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// 覆盖写入成功报告（缩进 JSON，末尾换行）
pub fn write_report(path: &Path, report: &Report) -> io::Result<()> {
    let body = serde_json::to_string_pretty(report)?;
    write_full(path, &body)
}

/// 覆盖写入错误文档（与成功报告同样的落盘方式）
pub fn write_error_report(path: &Path, report: &ErrorReport) -> io::Result<()> {
    let body = serde_json::to_string_pretty(report)?;
    write_full(path, &body)
}

// 整写而非追加：保证文件任何时刻只含一个完整文档
fn write_full(path: &Path, body: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, format!("{body}\n"))
}
