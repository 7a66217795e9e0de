//! `.jack`ファイルを読み込み、構文木のXMLを書き出すドライバです。
//!
//! ファイルごとに独立して字句解析とパースを行うため、複数のファイルは並列に処理されます。
//! 1つのファイルの失敗は他のファイルの処理に影響しません。

use std::{
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
};

use ariadne::{Label, Report, ReportKind, Source};
use parser::SyntaxError;
use rayon::prelude::*;
use thiserror::Error;

const JACK_EXTENSION: &str = "jack";
const XML_EXTENSION: &str = "xml";

/// ドライバの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// `.jack`ファイル、または`.jack`ファイルを含むディレクトリ
    pub path: PathBuf,
    /// 出力先のディレクトリ。`None`の場合は入力ファイルと同じディレクトリに書き出します。
    pub out_dir: Option<PathBuf>,
    /// `<Name>T.xml`にトークン列も書き出すかどうか
    pub emit_tokens: bool,
    /// エラーレポートに色を付けるかどうか
    pub color: bool,
    /// 並列に処理するスレッド数。`None`の場合はCPU数に合わせます。
    pub jobs: Option<usize>,
}

impl Options {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            out_dir: None,
            emit_tokens: false,
            color: true,
            jobs: None,
        }
    }
}

/// 1つのソースを解析した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub name: String,
    pub xml: String,
    pub tokens_xml: Option<String>,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{} is not a .jack file or a directory", .0.display())]
    InvalidPath(PathBuf),

    #[error("no .jack files found in {}", .0.display())]
    NoJackFiles(PathBuf),

    #[error("failed to read directory {}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error")]
    Io(#[from] io::Error),
}

/// 実行結果の集計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// 書き出したファイル。入力ファイルの順に並びます。
    pub written: Vec<PathBuf>,
    /// 解析に失敗した入力ファイル
    pub failed: Vec<PathBuf>,
}

impl Summary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// 解析対象の`.jack`ファイルを集めます。
///
/// `path`がファイルの場合はそのファイルだけを、ディレクトリの場合は直下の`.jack`ファイルを
/// 名前順に返します。サブディレクトリは辿りません。
pub fn collect_jack_files(path: &Path) -> Result<Vec<PathBuf>, DriverError> {
    if path.is_file() {
        return if is_jack_file(path) {
            Ok(vec![path.to_path_buf()])
        } else {
            Err(DriverError::InvalidPath(path.to_path_buf()))
        };
    }
    if !path.is_dir() {
        return Err(DriverError::InvalidPath(path.to_path_buf()));
    }

    let read_dir_error = |source| DriverError::ReadDir {
        path: path.to_path_buf(),
        source,
    };

    let mut jack_files = vec![];
    for entry in fs::read_dir(path).map_err(read_dir_error)? {
        let child_path = entry.map_err(read_dir_error)?.path();
        if child_path.is_file() && is_jack_file(&child_path) {
            jack_files.push(child_path);
        }
    }

    if jack_files.is_empty() {
        return Err(DriverError::NoJackFiles(path.to_path_buf()));
    }
    jack_files.sort();

    Ok(jack_files)
}

fn is_jack_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == JACK_EXTENSION)
}

/// ソース文字列を解析し、XMLを返します。
///
/// `name`はクラスのファイル名(拡張子なし)です。
pub fn analyze_source(name: &str, text: &str, options: &Options) -> Result<Analysis, AnalyzeError> {
    tracing::debug!(name, "analyze source");

    let tokens = lexer::tokenize(text).map_err(SyntaxError::from)?;
    let parse = parser::parse_tokens(&tokens).map_err(SyntaxError::from)?;

    let xml = xml_writer::to_xml(&parse.syntax());
    let tokens_xml = options
        .emit_tokens
        .then(|| xml_writer::tokens_to_xml(&tokens));

    Ok(Analysis {
        name: name.to_string(),
        xml,
        tokens_xml,
    })
}

/// `options.path`の`.jack`ファイルをすべて解析し、XMLファイルを書き出します。
///
/// 書き出したファイルは`write_dest_out`、解析に失敗したファイルのレポートは`write_dest_err`に書き込まれます。
/// どちらも入力ファイルの順に並びます。
pub fn run(
    options: &Options,
    write_dest_out: &mut impl io::Write,
    write_dest_err: &mut impl io::Write,
) -> Result<Summary, DriverError> {
    let jack_files = collect_jack_files(&options.path)?;
    tracing::debug!(files = jack_files.len(), "collected jack files");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.unwrap_or(0))
        .build()?;
    let outcomes: Vec<FileOutcome> = pool.install(|| {
        jack_files
            .par_iter()
            .map(|path| analyze_file(path, options))
            .collect()
    });

    let config = ariadne::Config::default()
        .with_color(options.color)
        .with_index_type(ariadne::IndexType::Byte);

    let mut summary = Summary::default();
    for outcome in outcomes {
        match outcome.result {
            Ok(written) => {
                for path in &written {
                    writeln!(
                        write_dest_out,
                        "{} -> {}",
                        outcome.path.display(),
                        path.display()
                    )?;
                }
                summary.written.extend(written);
            }
            Err(ref error) => {
                tracing::debug!(path = %outcome.path.display(), %error, "analysis failed");
                print_error(&outcome, &error, write_dest_err, config)?;
                summary.failed.push(outcome.path);
            }
        }
    }

    Ok(summary)
}

struct FileOutcome {
    path: PathBuf,
    /// 読み込めなかった場合は空です。
    text: String,
    result: Result<Vec<PathBuf>, AnalyzeError>,
}

fn analyze_file(path: &Path, options: &Options) -> FileOutcome {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) => {
            return FileOutcome {
                path: path.to_path_buf(),
                text: String::new(),
                result: Err(AnalyzeError::Read {
                    path: path.to_path_buf(),
                    source,
                }),
            }
        }
    };

    let result = analyze_source(&class_name(path), &text, options)
        .and_then(|analysis| write_analysis(path, &analysis, options));

    FileOutcome {
        path: path.to_path_buf(),
        text,
        result,
    }
}

fn class_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_analysis(
    source_path: &Path,
    analysis: &Analysis,
    options: &Options,
) -> Result<Vec<PathBuf>, AnalyzeError> {
    let dir = match &options.out_dir {
        Some(out_dir) => out_dir.as_path(),
        None => source_path.parent().unwrap_or(Path::new("")),
    };

    let mut written = vec![];

    let xml_path = dir.join(format!("{}.{XML_EXTENSION}", analysis.name));
    write_file(&xml_path, &analysis.xml)?;
    written.push(xml_path);

    if let Some(tokens_xml) = &analysis.tokens_xml {
        let tokens_path = dir.join(format!("{}T.{XML_EXTENSION}", analysis.name));
        write_file(&tokens_path, tokens_xml)?;
        written.push(tokens_path);
    }

    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<(), AnalyzeError> {
    tracing::debug!(path = %path.display(), "write xml");

    fs::write(path, contents).map_err(|source| AnalyzeError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
struct Diagnostic {
    title: String,
    message: String,
    range: Range<usize>,
}

impl Diagnostic {
    fn from_error(error: &AnalyzeError) -> Option<Self> {
        let AnalyzeError::Syntax(error) = error else {
            return None;
        };

        let title = match error {
            SyntaxError::Lex(_) => "Invalid token",
            SyntaxError::Parse(_) => "Syntax error",
        };
        let range = error.range();

        Some(Diagnostic {
            title: title.to_string(),
            message: error.to_string(),
            range: range.start().into()..range.end().into(),
        })
    }
}

fn print_error(
    outcome: &FileOutcome,
    error: &AnalyzeError,
    write_dest_err: &mut impl io::Write,
    config: ariadne::Config,
) -> io::Result<()> {
    let file_path = outcome.path.display().to_string();

    let Some(diagnostic) = Diagnostic::from_error(error) else {
        // IOエラーには示すべきソース上の位置がない
        return match std::error::Error::source(error) {
            Some(source) => writeln!(write_dest_err, "Error: {error}: {source}"),
            None => writeln!(write_dest_err, "Error: {error}"),
        };
    };

    Report::build(ReportKind::Error, (file_path.as_str(), diagnostic.range.clone()))
        .with_config(config)
        .with_message(diagnostic.title)
        .with_label(
            Label::new((file_path.as_str(), diagnostic.range)).with_message(diagnostic.message),
        )
        .finish()
        .write(
            (file_path.as_str(), Source::from(outcome.text.as_str())),
            write_dest_err,
        )
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn analyze_empty_class() {
        let analysis = analyze_source("Foo", "class Foo { }", &Options::new("Foo.jack")).unwrap();

        assert_eq!(analysis.name, "Foo");
        assert_eq!(analysis.tokens_xml, None);
        expect![[r#"
            <class>
              <keyword> class </keyword>
              <identifier> Foo </identifier>
              <symbol> { </symbol>
              <symbol> } </symbol>
            </class>
        "#]]
        .assert_eq(&analysis.xml);
    }

    #[test]
    fn analyze_with_tokens() {
        let options = Options {
            emit_tokens: true,
            ..Options::new("Foo.jack")
        };
        let analysis = analyze_source("Foo", "class Foo { }", &options).unwrap();

        expect![[r#"
            <tokens>
            <keyword> class </keyword>
            <identifier> Foo </identifier>
            <symbol> { </symbol>
            <symbol> } </symbol>
            </tokens>
        "#]]
        .assert_eq(analysis.tokens_xml.as_deref().unwrap());
    }

    #[test]
    fn analyze_syntax_error() {
        let error = analyze_source("Foo", "class 123 {}", &Options::new("Foo.jack")).unwrap_err();

        expect!["error at 6..9: expected identifier, but found integerConstant '123'"]
            .assert_eq(&error.to_string());

        let diagnostic = Diagnostic::from_error(&error).unwrap();
        assert_eq!(diagnostic.title, "Syntax error");
        assert_eq!(diagnostic.range, 6..9);
    }

    #[test]
    fn analyze_lex_error() {
        let error = analyze_source("Foo", "class Foo { # }", &Options::new("Foo.jack")).unwrap_err();

        let diagnostic = Diagnostic::from_error(&error).unwrap();
        assert_eq!(diagnostic.title, "Invalid token");
        assert_eq!(diagnostic.range, 12..13);
    }

    #[test]
    fn class_name_is_file_stem() {
        assert_eq!(class_name(Path::new("dir/Main.jack")), "Main");
        assert_eq!(class_name(Path::new("Square.jack")), "Square");
    }

    #[test]
    fn recognize_jack_extension() {
        assert!(is_jack_file(Path::new("Main.jack")));
        assert!(!is_jack_file(Path::new("Main.xml")));
        assert!(!is_jack_file(Path::new("jack")));
    }
}
