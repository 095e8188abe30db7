//! 调用选项与结果分类（模块）
use std::path::PathBuf;

/// 外部扫描器的调用参数
#[derive(Debug, Clone)]
pub struct InvokeOptions {
    /// 外部命令名（目前固定为 gitleaks）
    pub command: String,
    /// 子命令（detect、protect 等）
    pub subcommand: String,
    /// 待扫描的源目录或文件
    pub source: PathBuf,
    /// 扫描器报告输出路径（reshape 随后在此文件原地覆盖）
    pub report_path: PathBuf,
    /// 透传给扫描器的额外参数（原样追加在末尾）
    pub additional: Vec<String>,
}

impl InvokeOptions {
    /// 组装完整的参数向量：
    /// `<command> <subcommand> --source <source> --report-path <report_path> <...additional>`
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = vec![
            self.command.clone(),
            self.subcommand.clone(),
            "--source".to_string(),
            self.source.display().to_string(),
            "--report-path".to_string(),
            self.report_path.display().to_string(),
        ];
        argv.extend(self.additional.iter().cloned());
        argv
    }
}

/// 扫描器退出状态的分类
/// - Clean：退出码 0，未发现泄漏。
/// - FindingsPresent：退出码 1，扫描正常完成且有命中（gitleaks 约定），
///   后续处理与 Clean 完全一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    FindingsPresent,
}
