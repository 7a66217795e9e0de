//! This module is a common module for testing.

use std::path::{Path, PathBuf};

use expect_test::expect_file;

pub(crate) struct Outcome {
    pub(crate) summary: analyzer::Summary,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

/// `dir_name`は`tests/`に続くテスト対象のディレクトリ名を指定します。
/// 例えば、`tests/analyze/square`の場合、`dir_name`に`analyze/square`を指定します。
pub(crate) fn test_dir(dir_name: &str) -> PathBuf {
    std::env::current_dir()
        .unwrap()
        .join(format!("tests/{dir_name}"))
}

/// `path`を解析し、一時ディレクトリに書き出します。
///
/// 書き出されたファイルは、`golden_dir`にある同名のファイルと比較されます。
pub(crate) fn check(path: &Path, golden_dir: &Path, emit_tokens: bool) -> Outcome {
    let out_dir = tempfile::tempdir().unwrap();
    let options = analyzer::Options {
        out_dir: Some(out_dir.path().to_path_buf()),
        emit_tokens,
        color: false,
        jobs: Some(2),
        ..analyzer::Options::new(path)
    };

    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = analyzer::run(&options, &mut out, &mut err).unwrap();

    for written in &summary.written {
        assert_eq!(written.parent(), Some(out_dir.path()));

        let file_name = written.file_name().unwrap();
        let actual = std::fs::read_to_string(written).unwrap();
        expect_file![golden_dir.join(file_name)].assert_eq(&actual);
    }

    Outcome {
        summary,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

/// `tests/{dir_name}`のディレクトリ全体を解析します。
#[allow(dead_code)]
pub(crate) fn check_dir(dir_name: &str, emit_tokens: bool) -> Outcome {
    let dir = test_dir(dir_name);
    check(&dir, &dir, emit_tokens)
}

/// `tests/{dir_name}/{file_name}`の1ファイルだけを解析します。
#[allow(dead_code)]
pub(crate) fn check_file(dir_name: &str, file_name: &str, emit_tokens: bool) -> Outcome {
    let dir = test_dir(dir_name);
    check(&dir.join(file_name), &dir, emit_tokens)
}

/// 書き出されたファイルの名前を並べます。
pub(crate) fn written_names(summary: &analyzer::Summary) -> Vec<String> {
    summary
        .written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
