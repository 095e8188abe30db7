//! Gitleaks 封装核心库
//!
//! 设计要点：
//! - invoke：组装外部命令参数向量并同步执行，按退出码分类（0/1 为正常路径）。
//! - reshape：读取扫描器原始输出，逐条校验后归一化为 `{"findings": [...]}` 并原地覆盖。
//! - 任何失败路径最终都收敛为同一形态的错误文档 `{"exit_code", "error_message"}`。
//! - 全程单线程、整读整写：程序结束后输出文件必为一个完整的 JSON 文档。

mod error;
mod invoke;
mod options;
mod output;
mod reshape;
mod types;

// 对外暴露
pub use error::WrapError;
pub use invoke::run_scanner;
pub use options::{InvokeOptions, Outcome};
pub use output::{ensure_parent_dir, write_error_report, write_report};
pub use reshape::reshape_report;
pub use types::{ErrorReport, Finding, RawFinding, Report};
