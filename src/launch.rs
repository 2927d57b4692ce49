use crate::{
    builtin,
    command::{Command, Kind},
    error::LaunchError,
    helper::{SHELL, child_fail, close_fd, syscall},
    status::Status,
};
use log::debug;
use nix::{
    fcntl::{OFlag, open},
    libc,
    sys::{
        signal::{SigHandler, Signal, signal},
        stat::Mode,
    },
    unistd::{ForkResult, Pid, dup2, execvp, fork},
};
use std::{ffi::CString, os::unix::io::RawFd};

/// コマンドの起動結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawned {
    /// 組み込みコマンドを実行した
    Builtin(Status),
    /// 子プロセスを生成した。終了は待っていない
    Child(Pid),
}

/// fork前に用意しておくexecの引数とリダイレクト先
struct Prepared {
    args: Vec<CString>,
    files_in: Vec<CString>,
    files_out: Vec<CString>,
}

fn to_cstrings<'a, I>(items: I) -> Result<Vec<CString>, LaunchError>
where
    I: IntoIterator<Item = &'a str>,
{
    Ok(items.into_iter().map(CString::new).collect::<Result<_, _>>()?)
}

impl Prepared {
    fn new(cmd: &Command) -> Result<Self, LaunchError> {
        Ok(Prepared {
            args: to_cstrings(cmd.args().iter().map(|t| t.as_str()))?,
            files_in: to_cstrings(cmd.files_in().iter().copied())?,
            files_out: to_cstrings(cmd.files_out().iter().copied())?,
        })
    }
}

/// コマンドを起動。
///
/// 組み込みコマンドの場合はこのプロセスで実行し、その結果を返す。
/// それ以外は子プロセスを生成し、終了を待たずに返る。
/// 子プロセスの標準入出力は、リダイレクトがあればそのファイル、なければ`input`と`output`。
pub fn launch(cmd: &Command, input: RawFd, output: RawFd) -> Result<Spawned, LaunchError> {
    let name = match cmd.kind() {
        Kind::Builtin(b) => return Ok(Spawned::Builtin(builtin::run(b, cmd))),
        Kind::External(name) => name,
    };

    let prepared = Prepared::new(cmd)?;
    match syscall(|| unsafe { fork() }).map_err(LaunchError::Fork)? {
        ForkResult::Parent { child } => {
            debug!("spawned {name}: pid = {child}, stdin = {input}, stdout = {output}");
            Ok(Spawned::Child(child))
        }
        ForkResult::Child => exec_child(&prepared, input, output),
    }
}

/// リダイレクト先のファイルを順にオープンし、最後のディスクリプタを返す。
/// 置き換えられたディスクリプタはすぐにクローズ
fn open_last(files: &[CString], flag: OFlag, default: RawFd) -> RawFd {
    let flag = flag | OFlag::O_CLOEXEC;
    let mode = Mode::from_bits_truncate(0o666); // -rw-rw-rw-

    let mut fd = default;
    for file in files {
        match syscall(|| open(file.as_c_str(), flag, mode)) {
            Ok(new_fd) => {
                if fd != default {
                    close_fd(fd);
                }
                fd = new_fd;
            }
            Err(e) => child_fail(&format!("{SHELL}: {}: {}", file.to_string_lossy(), e.desc())),
        }
    }
    fd
}

/// 標準入出力の番号`target`に`fd`を複製
fn redirect(fd: RawFd, target: RawFd) {
    if fd != target {
        if let Err(e) = syscall(|| dup2(fd, target)) {
            child_fail(&format!("{SHELL}: process dup error: {}", e.desc()));
        }
        close_fd(fd);
    }
}

/// 子プロセス側の処理。標準入出力を設定し、プログラムを実行
fn exec_child(prepared: &Prepared, input: RawFd, output: RawFd) -> ! {
    // 無視に設定されたシグナルはexec後も引き継がれるため、SIGPIPEを既定に戻す
    let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };

    let input = open_last(&prepared.files_in, OFlag::O_RDONLY, input);
    let output = open_last(
        &prepared.files_out,
        OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        output,
    );

    redirect(input, libc::STDIN_FILENO);
    redirect(output, libc::STDOUT_FILENO);

    let filename = &prepared.args[0];
    match execvp(filename, &prepared.args) {
        Err(e) => child_fail(&format!("{}: {}", filename.to_string_lossy(), e.desc())),
        Ok(infallible) => match infallible {},
    }
}
