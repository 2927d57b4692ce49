use crate::{
    config::Config,
    helper::{DynError, SHELL},
    parser::parse_with_limit,
    pipeline::execute,
    status::Status,
    token::tokenize,
};
use log::debug;
use nix::{libc, unistd::isatty};
use rustyline::{Editor, error::ReadlineError};
use signal_hook::consts::{SIGINT, SIGQUIT};
use std::{
    cell::Cell,
    io::{self, BufRead, StdinLock},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// 1行読み込んだ結果
enum Line {
    Text(String),
    Interrupted, // Ctrl+c
    Invalid,     // UTF-8として不正
    Eof,
}

/// 入力元。端末の場合のみ行編集とプロンプト表示を行う
enum Reader {
    Tty(Editor<()>),
    Pipe(StdinLock<'static>),
}

impl Reader {
    fn new() -> Result<Self, DynError> {
        if isatty(libc::STDIN_FILENO).unwrap_or(false) {
            Ok(Reader::Tty(Editor::<()>::new()?))
        } else {
            Ok(Reader::Pipe(io::stdin().lock()))
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Line, DynError> {
        match self {
            Reader::Tty(rl) => match rl.readline(prompt) {
                Ok(line) => Ok(Line::Text(line)),
                Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
                Err(ReadlineError::Eof) => Ok(Line::Eof),
                Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                    Ok(Line::Invalid)
                }
                Err(e) => Err(e.into()),
            },
            Reader::Pipe(stdin) => {
                let mut buf = Vec::new();
                if stdin.read_until(b'\n', &mut buf)? == 0 {
                    return Ok(Line::Eof);
                }
                match String::from_utf8(buf) {
                    Ok(line) => Ok(Line::Text(line)),
                    Err(_) => Ok(Line::Invalid),
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct Shell {
    config: Config,
    interrupted: Arc<AtomicBool>, // SIGINT、SIGQUITを受信した
    last: Cell<Status>,           // 最後に実行したコマンド列の結果。exitは含まない
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Shell {
            config,
            interrupted: Arc::new(AtomicBool::new(false)),
            last: Cell::new(Status::Success),
        }
    }

    /// 入力が終わるか、exitが実行されるまで読み込みと実行を繰り返す。
    /// 最後に実行したコマンドの終了コードを返す
    pub fn run(&self) -> Result<i32, DynError> {
        // 子プロセスを待っている間にシェルが終了しないよう、フラグを立てるだけのハンドラを登録。
        // ハンドラはexecで既定の動作に戻るため、子プロセスには影響しない
        for sig in [SIGINT, SIGQUIT] {
            signal_hook::flag::register(sig, Arc::clone(&self.interrupted))?;
        }

        let mut reader = Reader::new()?;
        loop {
            let line = match reader.read_line(&self.config.prompt)? {
                Line::Text(line) => line,
                Line::Interrupted => continue, // 入力中の行を破棄
                Line::Invalid => {
                    eprintln!("{SHELL}: invalid UTF-8 input");
                    self.last.set(Status::Failure);
                    continue;
                }
                Line::Eof => break,
            };

            if line.trim().is_empty() {
                continue;
            }

            if self.run_line(&line) == Status::Exit {
                break;
            }
        }

        Ok(self.last.get().code())
    }

    /// 1行を実行。`;`で区切られたコマンド列は順に実行する
    pub fn run_line(&self, line: &str) -> Status {
        let mut status = Status::Success;
        for tokens in tokenize(line) {
            status = match parse_with_limit(&tokens, self.config.max_stages) {
                Ok(Some(pipeline)) => execute(&pipeline),
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("{SHELL}: {e}");
                    Status::Failure
                }
            };
            debug!("{:?}: {status:?}", tokens);

            if self.interrupted.swap(false, Ordering::Relaxed) {
                eprintln!();
            }
            if status == Status::Exit {
                break;
            }
            self.last.set(status);
        }
        status
    }
}
