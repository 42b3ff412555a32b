use winnow::token::take_while;
use winnow::{Parser, Result};

/// Most tokens kept from one line.
///
/// The longest command uses four tokens. Anything after that is ignored, so
/// dropping tokens past this limit changes nothing.
pub const MAX_TOKENS: usize = 8;

/// Whitespace-separated tokens of a command line.
///
/// The tokens are views into the line; the line itself is never modified.
/// Tokens are consumed front to back through a cursor, and a consumed token
/// is never handed out again.
///
/// Only ASCII whitespace separates tokens. Any other byte, including bytes
/// of 0x80 and above, is part of a token.
#[derive(Debug)]
pub struct Tokens<'a, const N: usize> {
    tokens: heapless::Vec<&'a [u8], N>,
    cursor: usize,
}
impl<'a, const N: usize> Tokens<'a, N> {
    /// Splits a line into tokens.
    ///
    /// At most `N` tokens are kept; any further tokens are dropped.
    pub fn split(line: &'a [u8]) -> Self {
        let mut tokens = heapless::Vec::new();
        let mut input = line;
        while let Ok(token) = parse_token.parse_next(&mut input) {
            if tokens.push(token).is_err() {
                break;
            }
        }
        Self { tokens, cursor: 0 }
    }

    /// Returns the token under the cursor without consuming it.
    pub fn peek(&self) -> Option<&'a [u8]> {
        self.tokens.get(self.cursor).copied()
    }

    /// Returns the tokens that have not been consumed yet.
    pub fn remaining(&self) -> &[&'a [u8]] {
        &self.tokens[self.cursor..]
    }
}

impl<'a, const N: usize> Iterator for Tokens<'a, N> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }
}

/// Parse one token, skipping any whitespace in front of it.
fn parse_token<'s>(input: &mut &'s [u8]) -> Result<&'s [u8]> {
    skip_ws.parse_next(input)?;
    take_while(1.., |b: u8| !b.is_ascii_whitespace()).parse_next(input)
}

/// Skip whitespace when parsing.
fn skip_ws<'s>(input: &mut &'s [u8]) -> Result<()> {
    take_while(0.., |b: u8| b.is_ascii_whitespace())
        .parse_next(input)
        .map(|_| ())
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::collection;
    use proptest::prelude::*;

    fn split(line: &[u8]) -> Vec<&[u8]> {
        let tokens: Tokens<'_, 8> = Tokens::split(line);
        tokens.remaining().to_vec()
    }

    #[test]
    fn test_split_examples() {
        let expected: [&[u8]; 4] = [b"VMX", b"PINMODE", b"13", b"OUTPUT"];
        assert_eq!(expected.to_vec(), split(b"VMX PINMODE 13 OUTPUT"));

        let expected: [&[u8]; 3] = [b"VMX", b"ANALOGREAD", b"3"];
        assert_eq!(expected.to_vec(), split(b"  VMX\t\tANALOGREAD  3 \r"));

        assert!(split(b"").is_empty());
        assert!(split(b"   ").is_empty());
    }

    #[test]
    fn test_high_bytes_do_not_separate() {
        let expected: [&[u8]; 3] = [b"VMX\xA0PINMODE", b"13", b"OUTPUT"];
        assert_eq!(expected.to_vec(), split(b"VMX\xA0PINMODE 13 OUTPUT"));

        let expected: [&[u8]; 2] = [b"VMX\x85DIGITALREAD", b"7"];
        assert_eq!(expected.to_vec(), split(b"VMX\x85DIGITALREAD 7"));
    }

    #[test]
    fn test_cursor_never_revisits() {
        let mut tokens: Tokens<'_, 8> = Tokens::split(b"a b");
        assert_eq!(Some(&b"a"[..]), tokens.peek());
        assert_eq!(Some(&b"a"[..]), tokens.next());
        assert_eq!(Some(&b"b"[..]), tokens.peek());
        assert_eq!(Some(&b"b"[..]), tokens.next());
        assert_eq!(None, tokens.peek());
        assert_eq!(None, tokens.next());
        assert_eq!(None, tokens.next());
    }

    #[test]
    fn test_excess_tokens_dropped() {
        let tokens: Tokens<'_, 2> = Tokens::split(b"a b c d");
        let expected: [&[u8]; 2] = [b"a", b"b"];
        assert_eq!(&expected, tokens.remaining());
    }

    proptest! {
        #[test]
        fn test_split_matches_ascii_whitespace(
            words in collection::vec(
                collection::vec(
                    any::<u8>()
                        .prop_filter("not whitespace", |b| !b.is_ascii_whitespace()),
                    1..6
                ),
                0..8
            ),
            gaps in collection::vec("[ \t\r]{1,3}", 8)
        ) {
            let mut line = Vec::new();
            for (word, gap) in words.iter().zip(gaps.iter()) {
                line.extend_from_slice(gap.as_bytes());
                line.extend_from_slice(word);
            }
            let expected: Vec<&[u8]> = words.iter().map(|w| w.as_slice()).collect();
            assert_eq!(expected, split(&line));
        }
    }
}
