use crate::{
    error::ParseError,
    token::{Builtin, Token},
};

/// パイプで区切られた1つのコマンド。
/// 引数とリダイレクト先のファイル名はすべて入力行のトークンから借用する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    args: &'a [Token<'a>],
    files_in: Vec<&'a str>,
    files_out: Vec<&'a str>,
}

/// コマンドの実行方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind<'a> {
    Builtin(Builtin),
    External(&'a str),
}

/// リダイレクト記号の向き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

fn redirect_symbol(token: &Token) -> Option<Direction> {
    match token {
        Token::Word("<") => Some(Direction::In),
        Token::Word(">") => Some(Direction::Out),
        _ => None,
    }
}

impl<'a> Command<'a> {
    /// パイプで区切られたトークン列からコマンドを生成。
    ///
    /// `<`と`>`の後から次の記号までのトークンは、すべてその向きのファイル名となる。
    /// 引数は最初の記号の直前まで。記号が末尾にある場合、
    /// 別の記号の直後にある場合（先頭を含む）は、その記号を示す構文エラー。
    ///
    /// # 例
    ///
    /// `["cat", "<", "a.txt", ">", "b.txt"]`に対して、引数`["cat"]`、
    /// 入力`["a.txt"]`、出力`["b.txt"]`のコマンドを返す。
    pub fn new(tokens: &'a [Token<'a>]) -> Result<Self, ParseError> {
        debug_assert!(!tokens.is_empty());

        let mut argn = tokens.len();
        let mut last_index = 0; // 直前の記号の次の位置
        let mut direction = None;
        let mut files_in = Vec::new();
        let mut files_out = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if let Some(d) = redirect_symbol(token) {
                if i == tokens.len() - 1 || i == last_index {
                    return Err(ParseError::Syntax(token.to_string()));
                }
                if argn == tokens.len() {
                    argn = i;
                }
                direction = Some(d);
                last_index = i + 1;
            } else {
                match direction {
                    Some(Direction::In) => files_in.push(token.as_str()),
                    Some(Direction::Out) => files_out.push(token.as_str()),
                    None => (),
                }
            }
        }

        Ok(Command {
            args: &tokens[..argn],
            files_in,
            files_out,
        })
    }

    /// 引数。先頭はコマンド名
    pub fn args(&self) -> &'a [Token<'a>] {
        self.args
    }

    /// 入力リダイレクトのファイル名。最後のものが標準入力になる
    pub fn files_in(&self) -> &[&'a str] {
        &self.files_in
    }

    /// 出力リダイレクトのファイル名。最後のものが標準出力になる
    pub fn files_out(&self) -> &[&'a str] {
        &self.files_out
    }

    pub fn kind(&self) -> Kind<'a> {
        match self.args[0] {
            Token::Builtin(b) => Kind::Builtin(b),
            Token::Word(name) => Kind::External(name),
        }
    }
}
