//! 公共数据模型（对外暴露）
use serde::{Deserialize, Serialize};

/// gitleaks 原生输出中的单条记录（只读输入）
/// 仅取四个必需字段，其余字段忽略；缺字段或类型不符即 reshape 失败
#[derive(Debug, Clone, Deserialize)]
pub struct RawFinding {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "StartLine")]
    pub start_line: i64,
    #[serde(rename = "EndLine")]
    pub end_line: i64,
    #[serde(rename = "Description")]
    pub description: String,
}

/// 归一化后的单条命中（对应 findings 数组的单个元素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub filename: String,
    pub line_range: String,
    pub description: String,
}

impl From<RawFinding> for Finding {
    fn from(raw: RawFinding) -> Self {
        Self {
            filename: raw.file,
            line_range: format!("{}-{}", raw.start_line, raw.end_line),
            description: raw.description,
        }
    }
}

/// 成功终态文档：`{"findings": [...]}`，原地覆盖扫描器的原始输出
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub findings: Vec<Finding>,
}

/// 失败终态文档：`{"exit_code", "error_message"}`
/// exit_code 同时也是进程退出码（见 WrapError::exit_code）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub exit_code: i32,
    pub error_message: String,
}
