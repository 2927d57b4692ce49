use nix::errno::Errno;
use std::ffi::NulError;
use thiserror::Error;

/// 構文解析時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// リダイレクト記号やパイプの位置が不正
    #[error("syntax error near unexpected token `{0}'")]
    Syntax(String),
    #[error("pipeline exceeds the limit of {0} stages")]
    TooManyStages(usize),
}

/// cdコマンドのエラー。表示は`cd: `に続く部分
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CdError {
    #[error("too many arguments")]
    TooManyArguments,
    #[error("$HOME env variable is invalid")]
    InvalidHome,
    #[error("tilde expansion is not supported")]
    TildeExpansion,
    #[error("{path}: {}", .errno.desc())]
    Chdir { path: String, errno: Errno },
}

/// 子プロセス生成時のエラー。子プロセス内で起きたエラーは含まない
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("process spawn error: {}", .0.desc())]
    Fork(Errno),
    #[error("pipe error: {}", .0.desc())]
    Pipe(Errno),
    #[error("argument contains a nul byte: {0}")]
    Nul(#[from] NulError),
}
