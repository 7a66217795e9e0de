//! Jackのソースファイルを構文解析し、構文木をXMLとして書き出します。

use std::{fs, io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 解析対象の.jackファイル、または.jackファイルを含むディレクトリ
    path: PathBuf,

    /// XMLの出力先ディレクトリ(省略時は入力ファイルと同じディレクトリ)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// トークン列も<Name>T.xmlに書き出す
    #[arg(long)]
    tokens: bool,

    /// エラーレポートに色を付けない
    #[arg(long)]
    no_color: bool,

    /// 並列に処理するファイル数
    #[arg(long, short)]
    jobs: Option<usize>,
}

impl Cli {
    fn options(&self) -> analyzer::Options {
        analyzer::Options {
            path: self.path.clone(),
            out_dir: self.out_dir.clone(),
            emit_tokens: self.tokens,
            color: !self.no_color,
            jobs: self.jobs,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(!cli.no_color)?;

    let options = cli.options();
    tracing::debug!(?options, "start");

    if let Some(out_dir) = &options.out_dir {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
    }

    let summary = analyzer::run(&options, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    if summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn setup_logging(ansi: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    Registry::default()
        .with(filter)
        .with(
            HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_ansi(ansi)
                .with_writer(io::stderr),
        )
        .try_init()
        .context("failed to initialize logging")
}
