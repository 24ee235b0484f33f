//! Tokenizer for BVH text.
//!
//! Tokens are whitespace-separated words; `{` and `}` are tokens of their own even
//! when glued to a word. Colons stay inside words (`Frames:`, `mixamorig:Hips`).

/// Kind of a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    Word(&'a str),
    OpenBrace,
    CloseBrace,
}

/// A token and the 1-based line it starts on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn text(&self) -> &'a str {
        match self.kind {
            TokenKind::Word(word) => word,
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
        }
    }
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.src.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if !b.is_ascii_whitespace() {
                break;
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        let bytes = self.src.as_bytes();
        let line = self.line;
        let kind = match *bytes.get(self.pos)? {
            b'{' => {
                self.pos += 1;
                TokenKind::OpenBrace
            }
            b'}' => {
                self.pos += 1;
                TokenKind::CloseBrace
            }
            _ => {
                let start = self.pos;
                while let Some(&b) = bytes.get(self.pos) {
                    if b.is_ascii_whitespace() || b == b'{' || b == b'}' {
                        break;
                    }
                    self.pos += 1;
                }
                // Boundaries are ASCII bytes, so the slice is valid UTF-8.
                TokenKind::Word(&self.src[start..self.pos])
            }
        };
        Some(Token { kind, line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<(&str, usize)> {
        Lexer::new(src).map(|t| (t.text(), t.line)).collect()
    }

    #[test]
    fn splits_words_and_braces() {
        assert_eq!(
            texts("ROOT Hips\n{\n\tOFFSET 0 0 0\n}"),
            vec![
                ("ROOT", 1),
                ("Hips", 1),
                ("{", 2),
                ("OFFSET", 3),
                ("0", 3),
                ("0", 3),
                ("0", 3),
                ("}", 4),
            ]
        );
    }

    #[test]
    fn braces_split_glued_words() {
        assert_eq!(
            texts("Site{OFFSET}"),
            vec![("Site", 1), ("{", 1), ("OFFSET", 1), ("}", 1)]
        );
    }

    #[test]
    fn colons_stay_in_words() {
        assert_eq!(
            texts("Frames: 2\r\nmixamorig:Hips"),
            vec![("Frames:", 1), ("2", 1), ("mixamorig:Hips", 2)]
        );
    }

    #[test]
    fn empty_input() {
        assert!(texts(" \n\t ").is_empty());
    }
}
