use crate::{
    error::LaunchError,
    helper::{SHELL, close_fd, syscall},
    launch::{Spawned, launch},
    parser::Pipeline,
    status::Status,
};
use log::{debug, warn};
use nix::{
    libc,
    sys::wait::waitpid,
    unistd::Pid,
};
use std::os::unix::io::RawFd;

/// close-on-execなパイプを生成。execした子プロセスには複製した標準入出力のみ残る
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
fn cloexec_pipe() -> nix::Result<(RawFd, RawFd)> {
    nix::unistd::pipe2(nix::fcntl::OFlag::O_CLOEXEC)
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn cloexec_pipe() -> nix::Result<(RawFd, RawFd)> {
    use nix::fcntl::{FcntlArg, FdFlag, fcntl};

    let (r, w) = nix::unistd::pipe()?;
    for fd in [r, w] {
        if let Err(e) = fcntl(fd, FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC)) {
            close_fd(r);
            close_fd(w);
            return Err(e);
        }
    }
    Ok((r, w))
}

/// パイプラインを実行し、すべての子プロセスの終了を待つ。
///
/// 各段を左から順に起動し、i段目の標準出力とi+1段目の標準入力をパイプで接続する。
/// 先頭の入力は標準入力、末尾の出力は標準出力。
/// いずれかの段でexitが実行された場合は、起動済みの子プロセスを待たずに`Status::Exit`を返す。
pub fn execute(pipeline: &Pipeline) -> Status {
    let commands = pipeline.commands();
    let last = commands.len() - 1;

    let mut children = Vec::with_capacity(commands.len());
    let mut status = Status::Success;
    let mut input = libc::STDIN_FILENO; // 次に起動する段の標準入力

    for (i, cmd) in commands.iter().enumerate() {
        let (next_input, output) = if i == last {
            (None, libc::STDOUT_FILENO)
        } else {
            match cloexec_pipe() {
                Ok((r, w)) => (Some(r), w),
                Err(e) => {
                    // 以降の段は起動しない
                    eprintln!("{SHELL}: {}", LaunchError::Pipe(e));
                    close_fd(input);
                    status = Status::Failure;
                    break;
                }
            }
        };

        let result = launch(cmd, input, output);

        // 子プロセスは複製を持っているため、親では不要
        close_fd(input);
        close_fd(output);

        match result {
            Ok(Spawned::Child(pid)) => children.push(pid),
            Ok(Spawned::Builtin(Status::Exit)) => {
                if let Some(r) = next_input {
                    close_fd(r);
                }
                debug!("exit in stage {i}, {} child(ren) left running", children.len());
                return Status::Exit;
            }
            Ok(Spawned::Builtin(s)) => status = status.and(s),
            Err(e) => {
                eprintln!("{SHELL}: {e}");
                status = Status::Failure;
            }
        }

        if let Some(r) = next_input {
            input = r;
        }
    }

    status.and(reap(&children))
}

/// 生成した子プロセスをすべて待ち、終了ステータスを集約
fn reap(children: &[Pid]) -> Status {
    children.iter().fold(Status::Success, |status, &pid| {
        let s = match syscall(|| waitpid(pid, None)) {
            Ok(ws) => {
                debug!("reaped {pid}: {ws:?}");
                Status::from(ws)
            }
            Err(e) => {
                warn!("waitpid({pid}) failed: {e}");
                Status::Failure
            }
        };
        status.and(s)
    })
}
