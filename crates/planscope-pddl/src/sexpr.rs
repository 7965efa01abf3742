//! Tokenizer and s-expression reader.
//!
//! Tokenizing surrounds every paren with whitespace and splits on whitespace.
//! Reading is forgiving: running out of tokens inside a group truncates the
//! group instead of failing, and a stray `)` at top level is ignored.
//!
//! # Examples
//!
//! ```
//! use planscope_pddl::sexpr::{parse_list, tokenize, SExpr};
//!
//! let tokens = tokenize("(at r1 (room a))");
//! let (expr, next) = parse_list(&tokens, 0);
//! assert_eq!(next, tokens.len());
//! assert_eq!(expr.to_string(), "(at r1 (room a))");
//! assert_eq!(expr.head(), Some("at"));
//! ```

use std::fmt;

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Atom(String),
}

/// A node of the s-expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

/// Removes `;` line comments.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| match line.find(';') {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits text into paren and atom tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(|t| match t {
            "(" => Token::Open,
            ")" => Token::Close,
            atom => Token::Atom(atom.to_string()),
        })
        .collect()
}

/// Reads one expression starting at `start`.
///
/// For an opening paren this consumes the whole group and returns the index
/// just past its matching `)`; for an atom it returns the atom and `start + 1`.
pub fn parse_list(tokens: &[Token], start: usize) -> (SExpr, usize) {
    match tokens.get(start) {
        Some(Token::Open) => {}
        Some(Token::Atom(atom)) => return (SExpr::Atom(atom.clone()), start + 1),
        Some(Token::Close) | None => return (SExpr::List(Vec::new()), start + 1),
    }

    let mut items = Vec::new();
    let mut i = start + 1;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Close => return (SExpr::List(items), i + 1),
            Token::Open => {
                let (child, next) = parse_list(tokens, i);
                items.push(child);
                i = next;
            }
            Token::Atom(atom) => {
                items.push(SExpr::Atom(atom.clone()));
                i += 1;
            }
        }
    }
    (SExpr::List(items), i)
}

/// Reads every top-level expression of `text`.
pub fn read_all(text: &str) -> Vec<SExpr> {
    let tokens = tokenize(text);
    let mut forms = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == Token::Close {
            i += 1;
            continue;
        }
        let (expr, next) = parse_list(&tokens, i);
        forms.push(expr);
        i = next;
    }
    forms
}

impl SExpr {
    pub fn atom(value: impl Into<String>) -> Self {
        SExpr::Atom(value.into())
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(a) => Some(a),
            SExpr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(items) => Some(items),
            SExpr::Atom(_) => None,
        }
    }

    /// Leading atom of a list, e.g. `:action` for `(:action move ...)`.
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// Items after the head of a list (empty for atoms).
    pub fn tail(&self) -> &[SExpr] {
        match self {
            SExpr::List(items) if !items.is_empty() => &items[1..],
            _ => &[],
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, SExpr::List(_))
    }

    /// Atoms of a flat list; nested lists are skipped.
    pub fn atoms(&self) -> Vec<String> {
        self.as_list()
            .unwrap_or(&[])
            .iter()
            .filter_map(|e| e.as_atom().map(str::to_string))
            .collect()
    }

    /// Depth-first search for any atom equal to `needle`.
    pub fn contains_atom(&self, needle: &str) -> bool {
        match self {
            SExpr::Atom(a) => a == needle,
            SExpr::List(items) => items.iter().any(|i| i.contains_atom(needle)),
        }
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(a) => f.write_str(a),
            SExpr::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_separates_parens() {
        let tokens = tokenize("(a(b c))");
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Atom("a".into()),
                Token::Open,
                Token::Atom("b".into()),
                Token::Atom("c".into()),
                Token::Close,
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_parse_list_returns_index_past_group() {
        let tokens = tokenize("(a b) (c)");
        let (first, next) = parse_list(&tokens, 0);
        assert_eq!(first, SExpr::List(vec![SExpr::atom("a"), SExpr::atom("b")]));
        assert_eq!(next, 4);
        let (second, next) = parse_list(&tokens, next);
        assert_eq!(second.to_string(), "(c)");
        assert_eq!(next, tokens.len());
    }

    #[test]
    fn test_unterminated_group_truncates() {
        let tokens = tokenize("(define (domain d) (:requirements :strips");
        let (expr, next) = parse_list(&tokens, 0);
        assert_eq!(next, tokens.len());
        assert_eq!(expr.to_string(), "(define (domain d) (:requirements :strips))");
    }

    #[test]
    fn test_read_all_skips_stray_close() {
        let forms = read_all(") (a) b");
        assert_eq!(forms, vec![SExpr::List(vec![SExpr::atom("a")]), SExpr::atom("b")]);
    }

    #[test]
    fn test_strip_comments() {
        let text = "(a ; trailing\n; whole line\n b)";
        assert_eq!(read_all(&strip_comments(text))[0].to_string(), "(a b)");
    }

    #[test]
    fn test_head_tail_and_atoms() {
        let (expr, _) = parse_list(&tokenize("(:objects r1 r2 (nested) - robot)"), 0);
        assert_eq!(expr.head(), Some(":objects"));
        assert_eq!(expr.tail().len(), 5);
        assert_eq!(expr.atoms(), vec![":objects", "r1", "r2", "-", "robot"]);
        assert!(expr.contains_atom("nested"));
        assert!(!SExpr::atom("x").is_list());
    }
}
