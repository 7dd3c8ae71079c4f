//! Line lexer for the notation.
//!
//! Every line is split into marker tokens (`-`, `=`) and runs of name text.
//! Markers are recognized anywhere in the line, not only as a prefix, since
//! every marker counts towards the nesting depth. The public entry point of
//! this module is [`tokenize_line`].

use winnow::{
    Parser as _,
    combinator::alt,
    error::{ContextError, ErrMode},
    stream::Stream,
    token::take_while,
};

use crate::{
    span::Span,
    tokens::{Marker, PositionedToken, Token},
};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parse a single `-` or `=`
fn marker<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    alt((
        '-'.value(Token::Marker(Marker::Dash)),
        '='.value(Token::Marker(Marker::Equals)),
    ))
    .parse_next(input)
}

/// Parse a run of characters up to the next marker
fn text<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    take_while(1.., |c: char| Marker::from_char(c).is_none())
        .map(Token::Text)
        .parse_next(input)
}

/// Parse one token, recording its span relative to the whole source
fn positioned_token<'src>(
    input: &mut Input<'src>,
    line_len: usize,
    line_start: usize,
) -> IResult<PositionedToken<'src>> {
    let start = line_len - input.eof_offset();
    let token = alt((marker, text)).parse_next(input)?;
    let end = line_len - input.eof_offset();

    Ok(PositionedToken::new(
        token,
        Span::new(start..end).offset(line_start),
    ))
}

/// Split one line into tokens.
///
/// `line_start` is the byte offset of the line in the full source, so the
/// spans of the returned tokens can be reported against the whole text.
/// Every character is either a marker or name text, so the tokens always
/// cover the whole line.
pub(crate) fn tokenize_line(line: &str, line_start: usize) -> Vec<PositionedToken<'_>> {
    let mut input = line;
    let mut tokens = Vec::new();

    while let Ok(token) = positioned_token(&mut input, line.len(), line_start) {
        tokens.push(token);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn kinds(line: &str) -> Vec<Token<'_>> {
        tokenize_line(line, 0)
            .into_iter()
            .map(|positioned| positioned.token)
            .collect()
    }

    #[test]
    fn test_root_line_is_single_text() {
        assert_eq!(kinds("Alice"), vec![Token::Text("Alice")]);
    }

    #[test]
    fn test_prefix_markers() {
        assert_eq!(
            kinds("-=Carol"),
            vec![
                Token::Marker(Marker::Dash),
                Token::Marker(Marker::Equals),
                Token::Text("Carol"),
            ]
        );
    }

    #[test]
    fn test_markers_inside_name_are_tokens() {
        assert_eq!(
            kinds("-Mary-Ann"),
            vec![
                Token::Marker(Marker::Dash),
                Token::Text("Mary"),
                Token::Marker(Marker::Dash),
                Token::Text("Ann"),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_text() {
        assert_eq!(
            kinds("  - Bob "),
            vec![
                Token::Text("  "),
                Token::Marker(Marker::Dash),
                Token::Text(" Bob "),
            ]
        );
    }

    #[test]
    fn test_empty_line_has_no_tokens() {
        assert!(kinds("").is_empty());
    }

    #[test]
    fn test_spans_are_absolute() {
        let tokens = tokenize_line("--Dave", 20);

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].span, Span::new(20..21));
        assert_eq!(tokens[1].span, Span::new(21..22));
        assert_eq!(tokens[2].span, Span::new(22..26));
    }

    #[test]
    fn test_multibyte_names() {
        let tokens = tokenize_line("-Zoë", 0);

        assert_eq!(tokens[1].token, Token::Text("Zoë"));
        assert_eq!(tokens[1].span, Span::new(1..5));
    }

    proptest! {
        #[test]
        fn test_tokens_cover_the_whole_line(line in "[^\n]{0,40}", line_start in 0usize..1000) {
            let tokens = tokenize_line(&line, line_start);

            let mut expected = line_start;
            for positioned in &tokens {
                prop_assert_eq!(positioned.span.start(), expected);
                prop_assert!(!positioned.span.is_empty());
                expected = positioned.span.end();
            }
            prop_assert_eq!(expected, line_start + line.len());
        }
    }
}
