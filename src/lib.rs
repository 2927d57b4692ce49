//! minshell: パイプとリダイレクトを扱う小さなコマンドシェル。
//!
//! 入力行を[`token::tokenize`]でトークンに分割し、[`parser::parse`]で
//! パイプラインを生成、[`pipeline::execute`]でプロセスを起動して終了を待つ。

pub mod builtin;
pub mod command;
pub mod config;
pub mod error;
pub mod helper;
pub mod launch;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod shell;
pub mod status;
pub mod token;

pub use shell::Shell;
pub use status::Status;
