//! 错误分类与退出码映射
use thiserror::Error;

use crate::types::ErrorReport;

/// 全流程统一的错误类型
/// 四类失败收敛到同一终态行为：CLI 顶层落盘 ErrorReport 并以对应退出码结束进程
#[derive(Debug, Error)]
pub enum WrapError {
    /// 参数/配置错误：缺失或非法的 CLI 参数、源路径不存在、扫描器无法启动
    #[error("Gitleaks scan failed: {0}")]
    Config(String),

    /// 扫描器拒绝了某个透传参数（stderr 中带 unknown flag 标记）
    #[error("Gitleaks scan failed: unknown argument '{flag}'.")]
    UnknownFlag { flag: String },

    /// 扫描器以未识别的非 0/1 退出码结束，携带其原始 stderr
    #[error("Gitleaks scan failed: {stderr}")]
    Tool { code: i32, stderr: String },

    /// 扫描器输出缺失、不可读或结构不符
    #[error("{0}")]
    Reshape(String),
}

impl WrapError {
    /// 写入 ErrorReport 的分类码，同时也是进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            WrapError::Config(_) | WrapError::UnknownFlag { .. } => 2,
            WrapError::Tool { code, .. } => *code,
            WrapError::Reshape(_) => 1,
        }
    }

    /// 由本错误构造终态错误文档
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            exit_code: self.exit_code(),
            error_message: self.to_string(),
        }
    }
}
