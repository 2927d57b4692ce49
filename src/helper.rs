use nix::{libc, unistd};
use std::os::unix::io::RawFd;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// シェル名。エラーメッセージの接頭辞に利用
pub const SHELL: &str = "minshell";

/// システムコール呼び出しのラッパ。EINTRならリトライ
pub fn syscall<F, T>(f: F) -> Result<T, nix::Error>
where
    F: Fn() -> Result<T, nix::Error>,
{
    loop {
        match f() {
            Err(nix::Error::EINTR) => (), // リトライ
            result => return result,
        }
    }
}

/// 標準入出力以外のディスクリプタをクローズ。失敗は無視
pub fn close_fd(fd: RawFd) {
    if fd != libc::STDIN_FILENO && fd != libc::STDOUT_FILENO {
        let _ = unistd::close(fd);
    }
}

/// fork後の子プロセスから標準エラー出力へ書き込み、終了コード1で終了。
/// atexitハンドラは実行しない
pub fn child_fail(msg: &str) -> ! {
    let line = format!("{msg}\n");
    let _ = unistd::write(libc::STDERR_FILENO, line.as_bytes());
    unsafe { libc::_exit(1) }
}
