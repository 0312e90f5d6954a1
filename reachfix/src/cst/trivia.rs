//! Trivia between tokens.
//!
//! tree-sitter reports tokens only; the text between two of them is split
//! here into whitespace, line breaks, comments and directive lines. A token
//! owns the trivia around it:
//! - **Trailing trivia**: everything after the token up to and including
//!   the first line break
//! - **Leading trivia**: everything else that precedes the token

use super::kind::SyntaxKind;

/// Iterator over the trivia pieces of a gap
#[derive(Debug, Clone)]
pub struct TriviaPieces<'a> {
    rest: &'a str,
}

/// Split `gap` into `(kind, text)` pieces that concatenate back to `gap`
#[must_use]
pub const fn pieces(gap: &str) -> TriviaPieces<'_> {
    TriviaPieces { rest: gap }
}

/// Number of bytes at the start of `gap` that trail the preceding token
#[must_use]
pub fn trailing_len(gap: &str) -> usize {
    let mut len = 0;
    for (kind, text) in pieces(gap) {
        len += text.len();
        if kind == SyntaxKind::EndOfLine {
            break;
        }
    }
    len
}

impl<'a> Iterator for TriviaPieces<'a> {
    type Item = (SyntaxKind, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest;
        let first = rest.chars().next()?;
        let (kind, len) = match first {
            '\r' if rest.starts_with("\r\n") => (SyntaxKind::EndOfLine, 2),
            '\n' | '\r' => (SyntaxKind::EndOfLine, 1),
            '/' if rest.starts_with("//") => (SyntaxKind::SingleLineComment, line_len(rest)),
            '/' if rest.starts_with("/*") => (
                SyntaxKind::MultiLineComment,
                rest[2..].find("*/").map_or(rest.len(), |end| end + 4),
            ),
            '#' => (SyntaxKind::DirectiveTrivia, line_len(rest)),
            c if is_space(c) => (SyntaxKind::Whitespace, run_len(rest, is_space)),
            _ => (
                SyntaxKind::SkippedText,
                run_len(rest, |c| !c.is_whitespace()),
            ),
        };
        let (text, tail) = rest.split_at(len);
        self.rest = tail;
        Some((kind, text))
    }
}

const fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_space(c: char) -> bool {
    c.is_whitespace() && !is_line_break(c)
}

/// Bytes up to, not including, the next line break
fn line_len(text: &str) -> usize {
    text.find(is_line_break).unwrap_or(text.len())
}

fn run_len(text: &str, predicate: impl Fn(char) -> bool) -> usize {
    text.find(|c: char| !predicate(c)).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(gap: &str) -> Vec<SyntaxKind> {
        pieces(gap).map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_pieces_cover_the_gap() {
        let gap = " // note\r\n\t/* a\nb */  #region X\n";
        assert_eq!(pieces(gap).map(|(_, text)| text).collect::<String>(), gap);
        assert_eq!(
            kinds(gap),
            vec![
                SyntaxKind::Whitespace,
                SyntaxKind::SingleLineComment,
                SyntaxKind::EndOfLine,
                SyntaxKind::Whitespace,
                SyntaxKind::MultiLineComment,
                SyntaxKind::Whitespace,
                SyntaxKind::DirectiveTrivia,
                SyntaxKind::EndOfLine,
            ]
        );
    }

    #[test]
    fn test_trailing_stops_after_line_break() {
        assert_eq!(trailing_len(" // done\n    B"), " // done\n".len());
        assert_eq!(trailing_len("  "), 2);
        assert_eq!(trailing_len("\n\n"), 1);
        assert_eq!(trailing_len(""), 0);
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(kinds("/* open"), vec![SyntaxKind::MultiLineComment]);
    }

    #[test]
    fn test_unknown_text_is_skipped() {
        assert_eq!(
            kinds("Foo(); \n"),
            vec![
                SyntaxKind::SkippedText,
                SyntaxKind::Whitespace,
                SyntaxKind::EndOfLine
            ]
        );
    }
}
