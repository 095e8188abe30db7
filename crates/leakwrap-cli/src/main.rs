use clap::error::ErrorKind;
use clap::Parser;
use leakwrap_core::{
    ensure_parent_dir, reshape_report, run_scanner, write_error_report, InvokeOptions, WrapError,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

/// 参数解析失败时随 clap 诊断一并写入错误文档的提示
const USAGE_HINT: &str = "Please provide the arguments like this:\n \
--source \"the source path\" --report-path \"the report path\" {gitleaks command} \
gitleaks subcommand (e.g., detect, protect, etc.) additional args (e.g --no-git)";

/// 参数解析整体失败时错误文档的落点（此时 --report-path 不可得）
const DEFAULT_REPORT_PATH: &str = "output.json";

/// 结构化日志文件（与控制台输出并行的持久通道）
const LOG_FILE: &str = "leakwrap.log";

/// 命令行入口（基于 clap，参数顺序敏感）
#[derive(Parser, Debug)]
#[command(name = "leakwrap", version, about = "运行 Gitleaks 并归一化其输出报告")]
struct Cli {
    /// 待扫描的源目录或文件
    #[arg(short = 's', long)]
    source: Option<PathBuf>,

    /// 扫描器报告输出路径（归一化后原地覆盖）
    #[arg(short = 'r', long, alias = "rp", default_value = DEFAULT_REPORT_PATH)]
    report_path: PathBuf,

    /// 外部命令名（目前仅支持 gitleaks）
    #[arg(value_parser = ["gitleaks"], default_value = "gitleaks")]
    command: String,

    /// gitleaks 子命令（detect、protect 等）
    #[arg(default_value = "detect")]
    subcommand: String,

    /// 透传给 gitleaks 的额外参数（原样追加）
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    additional: Vec<String>,
}

fn main() {
    let guard = init_tracing();
    let code = real_main();
    // 先刷新文件日志再结束进程（process::exit 不跑析构）
    drop(guard);
    process::exit(code);
}

fn real_main() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let err = WrapError::Config(format!("{e}\n\n {USAGE_HINT}"));
            return fail(Path::new(DEFAULT_REPORT_PATH), &err);
        }
    };

    let report_path = cli.report_path.clone();
    match run(cli) {
        Ok(()) => 0,
        Err(err) => fail(&report_path, &err),
    }
}

/// 主流程：源路径校验 → 调用扫描器 → 归一化输出
/// 错误不在此处落盘，统一交由顶层 fail 处理
fn run(cli: Cli) -> Result<(), WrapError> {
    let source = cli
        .source
        .ok_or_else(|| WrapError::Config("please provide a source folder".to_string()))?;
    if !source.exists() {
        return Err(WrapError::Config("please provide a valid source folder".to_string()));
    }

    match ensure_parent_dir(&cli.report_path) {
        Ok(true) => {
            info!(path = %cli.report_path.display(), "created missing directories for report path")
        }
        Ok(false) => {}
        Err(e) => {
            return Err(WrapError::Config(format!("unable to create report directory: {e}")))
        }
    }

    let report_path = cli.report_path.clone();
    let opts = InvokeOptions {
        command: cli.command,
        subcommand: cli.subcommand,
        source,
        report_path: cli.report_path,
        additional: cli.additional,
    };

    run_scanner(&opts)?;
    let report = reshape_report(&report_path)?;
    if let Ok(body) = serde_json::to_string_pretty(&report) {
        info!("{body}");
    }
    Ok(())
}

/// 单一错误出口：记录日志 → 落盘 ErrorReport → 返回进程退出码
fn fail(report_path: &Path, err: &WrapError) -> i32 {
    let doc = err.to_report();
    match serde_json::to_string_pretty(&doc) {
        Ok(body) => error!("{body}"),
        Err(_) => error!(error = %err, "scan failed"),
    }
    if let Err(io_err) = write_error_report(report_path, &doc) {
        error!(error = %io_err, path = %report_path.display(), "unable to persist error report");
    }
    doc.exit_code
}

/// 初始化日志：控制台（人读，stderr）+ JSON 文件（结构化，leakwrap.log）双通道
/// 返回的 guard 由 main 持有到进程结束，保证文件缓冲刷出
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().json().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}
