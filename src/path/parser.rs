//! Tokenizer and parser for the SVGA path mini-language.
//!
//! The language is the command subset of SVG path data: `M L H V C S Q A Z` in absolute and
//! relative form. Parsing is lenient: unknown characters are skipped, stray numbers without a
//! command are ignored, and a command whose first argument group is incomplete ends the parse.

use std::fmt;

/// One parsed path command: the command letter and its numeric arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCommand {
    /// Command letter as written (`'M'`, `'l'`, `'Z'`, ...).
    pub kind: char,
    /// Arguments, in source order.
    pub args: Vec<f32>,
}

impl PathCommand {
    pub fn new(kind: char, args: impl Into<Vec<f32>>) -> Self {
        Self {
            kind,
            args: args.into(),
        }
    }

    /// Whether the command uses coordinates relative to the current point.
    pub fn is_relative(&self) -> bool {
        self.kind.is_ascii_lowercase()
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.kind, self.args)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Command(char),
    Number(f32),
    /// Numeric-looking text that does not parse (`"."`, `"1e"`).
    Malformed,
}

fn is_command(c: char) -> bool {
    matches!(
        c,
        'M' | 'm'
            | 'L'
            | 'l'
            | 'H'
            | 'h'
            | 'V'
            | 'v'
            | 'C'
            | 'c'
            | 'S'
            | 's'
            | 'Q'
            | 'q'
            | 'A'
            | 'a'
            | 'Z'
            | 'z'
    )
}

/// Number of arguments in one group for the given command letter.
pub fn arity(kind: char) -> usize {
    match kind.to_ascii_uppercase() {
        'M' | 'L' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        _ => 0,
    }
}

/// Parse path data into commands.
///
/// After `M`/`m`, extra coordinate pairs are emitted as `L`/`l`; other commands repeat with
/// their own letter.
pub fn parse_path(src: &str) -> Vec<PathCommand> {
    let tokens = tokenize(src);
    let mut out = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Token::Command(kind) = tokens[i] else {
            i += 1;
            continue;
        };
        i += 1;

        if kind.eq_ignore_ascii_case(&'z') {
            out.push(PathCommand::new(kind, Vec::new()));
            continue;
        }

        let n = arity(kind);
        let Some((args, next)) = take_args(&tokens, i, n) else {
            break;
        };
        out.push(PathCommand::new(kind, args));
        i = next;

        let repeat = match kind {
            'M' => 'L',
            'm' => 'l',
            other => other,
        };
        let repeat_n = arity(repeat);
        while let Some((args, next)) = take_args(&tokens, i, repeat_n) {
            out.push(PathCommand::new(repeat, args));
            i = next;
        }
    }

    out
}

fn take_args(tokens: &[Token], start: usize, count: usize) -> Option<(Vec<f32>, usize)> {
    if count == 0 {
        return None;
    }
    let slice = tokens.get(start..start + count)?;
    let mut args = Vec::with_capacity(count);
    for t in slice {
        match *t {
            Token::Number(v) => args.push(v),
            Token::Command(_) | Token::Malformed => return None,
        }
    }
    Some((args, start + count))
}

fn tokenize(src: &str) -> Vec<Token> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            ' ' | '\t' | '\n' | '\r' | ',' => i += 1,
            c if is_command(c) => {
                tokens.push(Token::Command(c));
                i += 1;
            }
            '-' | '+' | '.' | '0'..='9' => i = read_number(bytes, i, &mut tokens),
            _ => i += 1,
        }
    }

    tokens
}

fn read_number(bytes: &[u8], start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut i = start;
    let digits = |i: &mut usize| {
        let from = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > from
    };

    if i < bytes.len() && matches!(bytes[i], b'-' | b'+') {
        i += 1;
    }

    let mut has_digits = digits(&mut i);

    let mut has_dot = false;
    if i < bytes.len() && bytes[i] == b'.' {
        has_dot = true;
        i += 1;
        has_digits |= digits(&mut i);
    }

    if has_digits && i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'-' | b'+') {
            i += 1;
        }
        digits(&mut i);
    }

    if has_digits || has_dot {
        // The scanned range is ASCII only.
        let text = std::str::from_utf8(&bytes[start..i]).unwrap_or_default();
        tokens.push(match text.parse::<f32>() {
            Ok(v) => Token::Number(v),
            Err(_) => Token::Malformed,
        });
    }

    i
}

#[cfg(test)]
#[path = "../../tests/unit/path/parser.rs"]
mod tests;
