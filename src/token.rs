//! 入力行をトークン列に分割する最小限のフロントエンド。
//!
//! 組み込みコマンドは文字列ではなく[`Token::Builtin`]として区別されるため、
//! 引数として書かれた`cd`や`exit`と衝突しない。

use std::fmt;

/// 組み込みコマンドの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    ChangeDirectory,
}

impl Builtin {
    /// コマンド名
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::ChangeDirectory => "cd",
        }
    }

    fn lookup(word: &str) -> Option<Self> {
        match word {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::ChangeDirectory),
            _ => None,
        }
    }
}

/// 1行分のトークン。文字列は入力行から借用する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Builtin(Builtin),
}

impl<'a> Token<'a> {
    /// トークンの文字列表現。組み込みコマンドの場合はその名前
    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::Word(s) => s,
            Token::Builtin(b) => b.name(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 単独でトークンとなる記号
fn is_symbol(c: char) -> bool {
    matches!(c, '|' | '<' | '>' | ';')
}

/// 行をトークンに分割し、`;`ごとのコマンド列として返す。
///
/// 空白で単語を区切り、`|`、`<`、`>`、`;`は前後に空白がなくても1文字のトークンとなる。
/// 行頭、`|`の直後、`;`の直後にある`cd`と`exit`のみを組み込みコマンドとしてタグ付けする。
///
/// # 例
///
/// 入力`"ls|wc -l; cd /tmp"`に対して、
/// `[[Word("ls"), Word("|"), Word("wc"), Word("-l")], [Builtin(ChangeDirectory), Word("/tmp")]]`
/// を返す。
pub fn tokenize(line: &str) -> Vec<Vec<Token<'_>>> {
    let mut lists = Vec::new();
    let mut current = Vec::new();
    let mut command_position = true;

    let mut start = None; // 単語の開始位置
    for (i, c) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
        if c.is_whitespace() || is_symbol(c) {
            if let Some(s) = start.take() {
                let word = &line[s..i];
                let token = match Builtin::lookup(word) {
                    Some(b) if command_position => Token::Builtin(b),
                    _ => Token::Word(word),
                };
                current.push(token);
                command_position = false;
            }

            match c {
                ';' => {
                    lists.push(std::mem::take(&mut current));
                    command_position = true;
                }
                '|' => {
                    current.push(Token::Word(&line[i..i + 1]));
                    command_position = true;
                }
                '<' | '>' => current.push(Token::Word(&line[i..i + 1])),
                _ => (),
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    lists.push(current);

    lists.retain(|l| !l.is_empty());
    lists
}
