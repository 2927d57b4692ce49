use nix::sys::wait::WaitStatus;

/// コマンド、パイプラインの実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    /// exitが実行された。シェルの読み込みを終了
    Exit,
}

impl Status {
    /// 終了コード
    pub fn code(self) -> i32 {
        match self {
            Status::Failure => 1,
            Status::Success | Status::Exit => 0,
        }
    }

    /// 複数の結果を集約。どれか1つでも失敗なら失敗
    pub fn and(self, other: Status) -> Status {
        match (self, other) {
            (Status::Exit, _) | (_, Status::Exit) => Status::Exit,
            (Status::Failure, _) | (_, Status::Failure) => Status::Failure,
            _ => Status::Success,
        }
    }
}

impl From<WaitStatus> for Status {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(_, 0) => Status::Success,
            _ => Status::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::{sys::signal::Signal, unistd::Pid};

    #[test]
    fn codes() {
        assert_eq!(Status::Success.code(), 0);
        assert_eq!(Status::Failure.code(), 1);
        assert_eq!(Status::Exit.code(), 0);
    }

    #[test]
    fn aggregate() {
        assert_eq!(Status::Success.and(Status::Success), Status::Success);
        assert_eq!(Status::Success.and(Status::Failure), Status::Failure);
        assert_eq!(Status::Failure.and(Status::Success), Status::Failure);
        assert_eq!(Status::Failure.and(Status::Exit), Status::Exit);
    }

    #[test]
    fn from_wait_status() {
        let pid = Pid::from_raw(1);
        assert_eq!(Status::from(WaitStatus::Exited(pid, 0)), Status::Success);
        assert_eq!(Status::from(WaitStatus::Exited(pid, 127)), Status::Failure);
        assert_eq!(
            Status::from(WaitStatus::Signaled(pid, Signal::SIGPIPE, false)),
            Status::Failure
        );
    }
}
