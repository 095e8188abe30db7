//! 扫描器输出归一化（原地覆盖）
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::WrapError;
use crate::output::{ensure_parent_dir, write_report};
use crate::types::{Finding, RawFinding, Report};

/// 将扫描器原始输出文件归一化为 `{"findings": [...]}` 并原地覆盖
/// 不变式：返回后该文件必为一个完整的 JSON 文档（整读整写，无追加）
/// - 文件不存在：视为零命中，先补一个空数组再走正常流程
/// - 已是归一化形态：幂等，不改写（重复调用安全）
/// - 任一记录校验失败：整体失败，不产生部分结果
pub fn reshape_report(path: &Path) -> Result<Report, WrapError> {
    if !path.is_file() {
        info!(path = %path.display(), "scanner wrote no report file, creating an empty one");
        ensure_parent_dir(path).map_err(rerr)?;
        fs::write(path, "[]").map_err(rerr)?;
    }

    let text = fs::read_to_string(path).map_err(rerr)?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(rerr)?;

    // 对象形态只接受已归一化的报告；接受即视为幂等重入，原样返回
    if value.is_object() {
        let report: Report = serde_json::from_value(value).map_err(rerr)?;
        warn!(path = %path.display(), "report already reshaped, leaving file untouched");
        return Ok(report);
    }

    let raw: Vec<RawFinding> = serde_json::from_value(value).map_err(rerr)?;
    let findings: Vec<Finding> = raw.into_iter().map(Finding::from).collect();
    let report = Report { findings };

    write_report(path, &report).map_err(rerr)?;
    info!(count = report.findings.len(), "report reshaped");
    Ok(report)
}

// reshape 路径上的所有底层失败统一降为分类码 1，消息保留原始描述
fn rerr<E: std::fmt::Display>(e: E) -> WrapError {
    WrapError::Reshape(e.to_string())
}
