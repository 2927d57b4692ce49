use crate::{command::Command, error::ParseError, token::Token};
use log::debug;

/// パイプラインの段数の既定の上限
pub const MAX_STAGES: usize = 32;

/// パイプで接続されたコマンド列。必ず1つ以上のコマンドを持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline<'a> {
    commands: Vec<Command<'a>>,
}

#[allow(clippy::len_without_is_empty)]
impl<'a> Pipeline<'a> {
    pub fn commands(&self) -> &[Command<'a>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

fn is_pipe(token: &Token) -> bool {
    matches!(token, Token::Word("|"))
}

/// 既定の段数上限でパース
pub fn parse<'a>(tokens: &'a [Token<'a>]) -> Result<Option<Pipeline<'a>>, ParseError> {
    parse_with_limit(tokens, MAX_STAGES)
}

/// トークン列を`|`で分割し、パイプラインを生成。
/// 空のトークン列の場合は`Ok(None)`を返す。`limit`が0の場合は段数を制限しない
///
/// # 例
///
/// `["ls", "|", "wc", "-l"]`に対して、`["ls"]`と`["wc", "-l"]`の
/// 2つのコマンドからなるパイプラインを返す。
pub fn parse_with_limit<'a>(
    tokens: &'a [Token<'a>],
    limit: usize,
) -> Result<Option<Pipeline<'a>>, ParseError> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut commands = Vec::new();
    let mut push = |segment: &'a [Token<'a>]| -> Result<(), ParseError> {
        // 空のコマンド。パイプが連続している、あるいは先頭か末尾にある
        if segment.is_empty() {
            return Err(ParseError::Syntax("|".to_string()));
        }
        if limit != 0 && commands.len() == limit {
            return Err(ParseError::TooManyStages(limit));
        }
        // 生成に成功した場合のみ追加
        commands.push(Command::new(segment)?);
        Ok(())
    };

    let mut last_cmd = 0; // 直前のパイプの次の位置
    for (i, token) in tokens.iter().enumerate() {
        if is_pipe(token) {
            push(&tokens[last_cmd..i])?;
            last_cmd = i + 1;
        }
    }
    push(&tokens[last_cmd..])?;

    debug!("parsed a pipeline of {} command(s)", commands.len());
    Ok(Some(Pipeline { commands }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn words(s: &[&'static str]) -> Vec<Token<'static>> {
        s.iter().map(|&w| Token::Word(w)).collect()
    }

    fn syntax(token: &str) -> ParseError {
        ParseError::Syntax(token.to_string())
    }

    #[test]
    fn single_command() {
        let tokens = words(&["ls"]);
        let pipeline = parse(&tokens).unwrap().unwrap();
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline.commands()[0].args(), &tokens[..]);
        assert!(pipeline.commands()[0].files_in().is_empty());
        assert!(pipeline.commands()[0].files_out().is_empty());
    }

    #[test]
    fn without_pipe_arguments_are_verbatim() {
        for line in ["echo a b c", "grep -v x", "true", "printf %s\\n 1 2 3 4 5 6"] {
            let lists = tokenize(line);
            let pipeline = parse(&lists[0]).unwrap().unwrap();
            assert_eq!(pipeline.len(), 1);
            assert_eq!(pipeline.commands()[0].args(), &lists[0][..], "line: {line}");
        }
    }

    #[test]
    fn two_commands() {
        let tokens = words(&["ls", "|", "wc", "-l"]);
        let pipeline = parse(&tokens).unwrap().unwrap();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.commands()[0].args(), &words(&["ls"])[..]);
        assert_eq!(pipeline.commands()[1].args(), &words(&["wc", "-l"])[..]);
    }

    #[test]
    fn redirects_per_stage() {
        let tokens = words(&["cat", "<", "in", "|", "sort", "|", "uniq", ">", "out"]);
        let pipeline = parse(&tokens).unwrap().unwrap();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.commands()[0].files_in(), &["in"]);
        assert!(pipeline.commands()[1].files_in().is_empty());
        assert_eq!(pipeline.commands()[2].files_out(), &["out"]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse(&[]), Ok(None));
    }

    #[test]
    fn adjacent_pipes() {
        let tokens = words(&["cmd", "|", "|", "cmd2"]);
        assert_eq!(parse(&tokens), Err(syntax("|")));
    }

    #[test]
    fn leading_pipe() {
        let tokens = words(&["|", "cmd"]);
        assert_eq!(parse(&tokens), Err(syntax("|")));
    }

    #[test]
    fn trailing_pipe() {
        let tokens = words(&["cmd", "|"]);
        assert_eq!(parse(&tokens), Err(syntax("|")));
    }

    #[test]
    fn only_pipes() {
        let tokens = words(&["|", "|"]);
        assert_eq!(parse(&tokens), Err(syntax("|")));
    }

    #[test]
    fn redirect_error_in_later_stage() {
        let tokens = words(&["ls", "|", "cat", ">"]);
        assert_eq!(parse(&tokens), Err(syntax(">")));
    }

    #[test]
    fn stage_limit() {
        let tokens = words(&["a", "|", "b", "|", "c"]);
        assert_eq!(parse_with_limit(&tokens, 2), Err(ParseError::TooManyStages(2)));
        assert_eq!(parse_with_limit(&tokens, 3).unwrap().unwrap().len(), 3);
        assert_eq!(parse_with_limit(&tokens, 0).unwrap().unwrap().len(), 3);
    }

    #[test]
    fn error_message() {
        let tokens = words(&["cat", "<", "<", "x"]);
        let err = parse(&tokens).unwrap_err();
        assert_eq!(err.to_string(), "syntax error near unexpected token `<'");
    }
}
