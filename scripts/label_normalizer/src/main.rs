use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use env_logger::Env;

use label_normalizer::{CliError, LabelKind, LabelReport, NormalizeOptions, OutputFormat};

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 需要规范化的标签。如果未提供，将从输入文件或标准输入逐行读取。
    labels: Vec<String>,

    /// 输入文件路径，每行一个标签
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出的文件路径。如果未提供，结果将打印到标准输出。
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON 格式的规范化选项文件，命令行参数会覆盖其中的值
    #[arg(long)]
    config: Option<PathBuf>,

    /// 将多字符结果折叠为组合占位符
    #[arg(long)]
    comb: bool,

    /// 未知占位符
    #[arg(long)]
    unk_token: Option<String>,

    /// 组合占位符
    #[arg(long)]
    comb_token: Option<String>,

    /// 输出格式 ('text'、'json' 或 'jsonl')
    #[arg(long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn load_options(args: &Args) -> Result<NormalizeOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => {
            log::info!("正在读取配置文件: {:?}", path);
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<NormalizeOptions>(&content)?
        }
        None => NormalizeOptions::default(),
    };

    if args.comb {
        options.use_comb_token = true;
    }
    if let Some(token) = &args.unk_token {
        options.unk_token.clone_from(token);
    }
    if let Some(token) = &args.comb_token {
        options.comb_token.clone_from(token);
    }

    options.validate()?;
    Ok(options)
}

fn read_labels(args: &Args) -> Result<Vec<String>, CliError> {
    if !args.labels.is_empty() {
        return Ok(args.labels.clone());
    }

    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(fs::File::open(path)?),
        None => {
            log::info!("未提供标签，正在从标准输入读取...");
            Box::new(io::stdin())
        }
    };

    let labels = BufReader::new(reader).lines().collect::<Result<Vec<_>, _>>()?;
    Ok(labels)
}

fn render(report: &LabelReport, format: OutputFormat) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for entry in &report.entries {
                out.push_str(&entry.normalized);
                out.push('\n');
            }
            out
        }
        OutputFormat::Jsonl => {
            let mut out = String::new();
            for entry in &report.entries {
                out.push_str(&serde_json::to_string(entry)?);
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    };
    Ok(rendered)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(output_path) => {
            log::info!("正在将结果写入文件: {:?}", output_path);
            fs::write(output_path, content)?;
        }
        None => io::stdout().write_all(content.as_bytes())?,
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // 解析命令行参数
    let args = Args::parse();

    // --- 1. 加载选项 ---
    let options = match load_options(&args) {
        Ok(options) => options,
        Err(e) => {
            log::error!("加载规范化选项失败: {}", e);
            process::exit(1);
        }
    };

    // --- 2. 读取标签 ---
    let labels = match read_labels(&args) {
        Ok(labels) => labels,
        Err(e) => {
            log::error!("读取标签失败: {}", e);
            process::exit(1);
        }
    };

    // --- 3. 规范化 ---
    let report = LabelReport::from_labels(&labels, &options);
    log::info!(
        "共处理 {} 个标签: 字形 {} 个，未知 {} 个，组合 {} 个。",
        report.entries.len(),
        report.count(LabelKind::Glyph),
        report.count(LabelKind::Unknown),
        report.count(LabelKind::Combination)
    );

    // --- 4. 输出结果 ---
    let rendered = match render(&report, args.format) {
        Ok(content) => content,
        Err(e) => {
            log::error!("生成输出失败: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_output(args.output.as_deref(), &rendered) {
        log::error!("写入输出失败: {}", e);
        process::exit(1);
    }
}
