//! Template tokenization.
//!
//! Splits a composite format template into literal runs and placeholder
//! tokens. `{{` and `}}` decode to a single literal brace; anything else
//! starting with `{` must be a complete placeholder:
//!
//! ```text
//! placeholder := '{' index [',' span] [':' formatSpec] '}'
//! index       := DIGIT+
//! span        := ['-'] DIGIT+
//! formatSpec  := (ALNUM | '_' | ' ' | '/' | '.' | ',' | '\' | ':' | '#')*
//! ```

use crate::error::{Result, UnformatError};
use std::iter::Peekable;
use std::str::CharIndices;

/// One lexical unit of a template. Literal slices borrow from the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Literal(&'a str),
    Placeholder(PlaceholderToken<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderToken<'a> {
    /// Byte offset of the opening brace.
    pub(crate) offset: usize,
    /// Full token text including both braces.
    pub(crate) anchor: &'a str,
    pub(crate) index: usize,
    pub(crate) span: i32,
    /// `None` when the token has no `:` section or an empty one.
    pub(crate) format: Option<&'a str>,
}

pub(crate) fn is_format_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | ' ' | '/' | '.' | ',' | '\\' | ':' | '#')
}

pub(crate) struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    max_index: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str, max_index: usize) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            max_index,
        }
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token<'a>>> {
        let mut tokens = Vec::new();
        let mut literal_start = 0;

        while let Some((offset, ch)) = self.chars.next() {
            match ch {
                '{' => {
                    self.flush_literal(&mut tokens, literal_start, offset);
                    if self.eat('{') {
                        tokens.push(Token::Literal(&self.source[offset..offset + 1]));
                    } else {
                        let placeholder = self.placeholder(offset)?;
                        tokens.push(Token::Placeholder(placeholder));
                    }
                    literal_start = self.position();
                }
                '}' => {
                    if !self.eat('}') {
                        return Err(UnformatError::UnbalancedBrace { offset });
                    }
                    self.flush_literal(&mut tokens, literal_start, offset);
                    tokens.push(Token::Literal(&self.source[offset..offset + 1]));
                    literal_start = self.position();
                }
                _ => {}
            }
        }

        self.flush_literal(&mut tokens, literal_start, self.source.len());
        Ok(tokens)
    }

    fn flush_literal(&self, tokens: &mut Vec<Token<'a>>, start: usize, end: usize) {
        if start < end {
            tokens.push(Token::Literal(&self.source[start..end]));
        }
    }

    /// Byte offset of the next unread character.
    fn position(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(offset, _)| offset)
            .unwrap_or(self.source.len())
    }

    fn eat(&mut self, expected: char) -> bool {
        if matches!(self.chars.peek(), Some(&(_, ch)) if ch == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn take_digits(&mut self) -> &'a str {
        let start = self.position();
        while matches!(self.chars.peek(), Some(&(_, ch)) if ch.is_ascii_digit()) {
            self.chars.next();
        }
        &self.source[start..self.position()]
    }

    /// Error for the next character, or for end of input inside a placeholder.
    fn unexpected(&mut self, start: usize, expected: &'static str) -> UnformatError {
        match self.chars.peek() {
            Some(&(offset, found)) => UnformatError::UnexpectedCharacter {
                offset,
                found,
                expected,
            },
            None => UnformatError::UnterminatedPlaceholder { offset: start },
        }
    }

    /// Parse the rest of a placeholder whose `{` sits at `start`.
    fn placeholder(&mut self, start: usize) -> Result<PlaceholderToken<'a>> {
        let index_offset = self.position();
        let digits = self.take_digits();
        if digits.is_empty() {
            return Err(self.unexpected(start, "a placeholder index digit"));
        }
        let index = digits
            .parse::<usize>()
            .ok()
            .filter(|&index| index <= self.max_index)
            .ok_or_else(|| UnformatError::IndexOutOfRange {
                offset: index_offset,
                index: digits.to_string(),
                limit: self.max_index,
            })?;

        let span = if self.eat(',') {
            self.span(start)?
        } else {
            0
        };

        let format = if self.eat(':') {
            self.format_spec(start)?
        } else {
            None
        };

        if !self.eat('}') {
            return Err(self.unexpected(start, "',', ':' or '}'"));
        }

        Ok(PlaceholderToken {
            offset: start,
            anchor: &self.source[start..self.position()],
            index,
            span,
            format,
        })
    }

    fn span(&mut self, start: usize) -> Result<i32> {
        let span_offset = self.position();
        self.eat('-');
        let digits = self.take_digits();
        if digits.is_empty() {
            if self.chars.peek().is_none() {
                return Err(UnformatError::UnterminatedPlaceholder { offset: start });
            }
            return Err(UnformatError::InvalidSpan {
                offset: span_offset,
                reason: "expected an optional '-' followed by digits".to_string(),
            });
        }

        let text = &self.source[span_offset..self.position()];
        text.parse::<i32>()
            .map_err(|_| UnformatError::InvalidSpan {
                offset: span_offset,
                reason: format!("{text} does not fit in a 32-bit width"),
            })
    }

    fn format_spec(&mut self, start: usize) -> Result<Option<&'a str>> {
        let format_offset = self.position();
        loop {
            match self.chars.peek() {
                None => return Err(UnformatError::UnterminatedPlaceholder { offset: start }),
                Some(&(_, '}')) => break,
                Some(&(_, ch)) if is_format_char(ch) => {
                    self.chars.next();
                }
                Some(&(offset, found)) => {
                    return Err(UnformatError::InvalidFormatCharacter { offset, found });
                }
            }
        }

        let format = &self.source[format_offset..self.position()];
        Ok((!format.is_empty()).then_some(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
        Lexer::new(source, 999_999).tokenize()
    }

    fn placeholder(source: &str) -> PlaceholderToken<'_> {
        match tokenize(source).unwrap().as_slice() {
            [Token::Placeholder(token)] => token.clone(),
            other => panic!("expected a single placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_literal() {
        assert_eq!(
            tokenize("just text").unwrap(),
            vec![Token::Literal("just text")]
        );
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_simple_placeholder() {
        let tokens = tokenize("Text: {0}!").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::Literal("Text: "));
        assert_eq!(tokens[2], Token::Literal("!"));

        match &tokens[1] {
            Token::Placeholder(token) => {
                assert_eq!(token.offset, 6);
                assert_eq!(token.anchor, "{0}");
                assert_eq!(token.index, 0);
                assert_eq!(token.span, 0);
                assert_eq!(token.format, None);
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_span_and_format() {
        let token = placeholder("{2,20:#00.00}");
        assert_eq!(token.index, 2);
        assert_eq!(token.span, 20);
        assert_eq!(token.format, Some("#00.00"));

        let token = placeholder("{0,-20}");
        assert_eq!(token.span, -20);
        assert_eq!(token.format, None);

        let token = placeholder("{0:HH:mm:ss}");
        assert_eq!(token.format, Some("HH:mm:ss"));
    }

    #[test]
    fn test_empty_format_section_is_absent() {
        let token = placeholder("{0:}");
        assert_eq!(token.anchor, "{0:}");
        assert_eq!(token.format, None);
    }

    #[test]
    fn test_escaped_braces() {
        let tokens = tokenize("a {{0}} b").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("a "),
                Token::Literal("{"),
                Token::Literal("0"),
                Token::Literal("}"),
                Token::Literal(" b"),
            ]
        );
    }

    #[test]
    fn test_escape_next_to_placeholder() {
        let tokens = tokenize("{{{0}}}").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::Literal("{"));
        assert!(matches!(&tokens[1], Token::Placeholder(t) if t.anchor == "{0}"));
        assert_eq!(tokens[2], Token::Literal("}"));
    }

    #[test]
    fn test_non_numeric_index() {
        assert_eq!(
            tokenize("{a}"),
            Err(UnformatError::UnexpectedCharacter {
                offset: 1,
                found: 'a',
                expected: "a placeholder index digit",
            })
        );
        assert!(matches!(
            tokenize("{}"),
            Err(UnformatError::UnexpectedCharacter { found: '}', .. })
        ));
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            tokenize("abc {0"),
            Err(UnformatError::UnterminatedPlaceholder { offset: 4 })
        );
        assert_eq!(
            tokenize("{"),
            Err(UnformatError::UnterminatedPlaceholder { offset: 0 })
        );
        assert_eq!(
            tokenize("{0:dd"),
            Err(UnformatError::UnterminatedPlaceholder { offset: 0 })
        );
        assert_eq!(
            tokenize("{0,"),
            Err(UnformatError::UnterminatedPlaceholder { offset: 0 })
        );
    }

    #[test]
    fn test_unbalanced_closing_brace() {
        assert_eq!(
            tokenize("a } b"),
            Err(UnformatError::UnbalancedBrace { offset: 2 })
        );
    }

    #[test]
    fn test_invalid_span() {
        assert!(matches!(
            tokenize("{0,}"),
            Err(UnformatError::InvalidSpan { offset: 3, .. })
        ));
        assert!(matches!(
            tokenize("{0,x}"),
            Err(UnformatError::InvalidSpan { .. })
        ));
        assert!(matches!(
            tokenize("{0,99999999999}"),
            Err(UnformatError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_invalid_format_character() {
        assert_eq!(
            tokenize("{0:dd-MM}"),
            Err(UnformatError::InvalidFormatCharacter {
                offset: 5,
                found: '-',
            })
        );
        assert!(matches!(
            tokenize("{0:{1}}"),
            Err(UnformatError::InvalidFormatCharacter { found: '{', .. })
        ));
    }

    #[test]
    fn test_trailing_garbage_after_index() {
        assert_eq!(
            tokenize("{0x}"),
            Err(UnformatError::UnexpectedCharacter {
                offset: 2,
                found: 'x',
                expected: "',', ':' or '}'",
            })
        );
    }

    #[test]
    fn test_index_limit() {
        let result = Lexer::new("{11}", 10).tokenize();
        assert_eq!(
            result,
            Err(UnformatError::IndexOutOfRange {
                offset: 1,
                index: "11".to_string(),
                limit: 10,
            })
        );

        let result = tokenize("{99999999999999999999999}");
        assert!(matches!(result, Err(UnformatError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_multibyte_literals_keep_offsets() {
        let tokens = tokenize("não é {0}").unwrap();
        match &tokens[1] {
            Token::Placeholder(token) => assert_eq!(token.offset, "não é ".len()),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_format_char_set() {
        for ch in ['a', 'Z', '0', 'é', '_', ' ', '/', '.', ',', '\\', ':', '#'] {
            assert!(is_format_char(ch), "{ch:?} should be allowed");
        }
        for ch in ['-', '%', '{', '}', '\'', '"', '+'] {
            assert!(!is_format_char(ch), "{ch:?} should be rejected");
        }
    }
}
