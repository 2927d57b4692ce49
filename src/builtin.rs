use crate::{
    command::Command,
    error::CdError,
    status::Status,
    token::{Builtin, Token},
};
use log::debug;
use nix::unistd;
use std::path::PathBuf;

/// 組み込みコマンドをシェル自身のプロセスで実行。
/// リダイレクトとパイプは無視する
pub fn run(builtin: Builtin, cmd: &Command) -> Status {
    match builtin {
        Builtin::Exit => Status::Exit,
        Builtin::ChangeDirectory => match run_cd(cmd.args()) {
            Ok(()) => Status::Success,
            Err(e) => {
                eprintln!("cd: {e}");
                Status::Failure
            }
        },
    }
}

/// カレントディレクトリを変更。引数がない場合、`~`の場合は$HOMEへ移動
pub fn run_cd(args: &[Token]) -> Result<(), CdError> {
    let path = match args {
        [_] => "~".to_string(),
        [_, path] => path.as_str().to_string(),
        _ => return Err(CdError::TooManyArguments),
    };

    // $HOMEはUTF-8でなくてもよい
    let path = match path.strip_prefix('~') {
        Some("") => match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => return Err(CdError::InvalidHome),
        },
        Some(_) => return Err(CdError::TildeExpansion),
        None => PathBuf::from(path),
    };

    debug!("cd: {}", path.display());
    match unistd::chdir(path.as_path()) {
        Ok(()) => Ok(()),
        Err(errno) => Err(CdError::Chdir {
            path: path.to_string_lossy().into_owned(),
            errno,
        }),
    }
}
