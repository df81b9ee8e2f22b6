//! The token table: which pattern characters have matching semantics.
//!
//! | Char | Matches      | Optional | Recursive | Default | Transform |
//! |------|--------------|----------|-----------|---------|-----------|
//! | `0`  | digit        |          |           | `'0'`   |           |
//! | `9`  | digit        | yes      |           |         |           |
//! | `#`  | digit        | yes      | yes       |         |           |
//! | `A`  | alphanumeric |          |           |         |           |
//! | `S`  | letter       |          |           |         |           |
//! | `U`  | letter       |          |           |         | uppercase |
//! | `L`  | letter       |          |           |         | lowercase |
//! | `$`  | escape       |          |           |         |           |
//!
//! Any other pattern character is a literal.

use phf::{Map, phf_map};

/// The set of value characters a token accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,        // 0-9
    Letter,       // a-z, A-Z
    Alphanumeric, // 0-9, a-z, A-Z
}

impl CharClass {
    pub fn matches(self, ch: char) -> bool {
        match self {
            CharClass::Digit => ch.is_ascii_digit(),
            CharClass::Letter => ch.is_ascii_alphabetic(),
            CharClass::Alphanumeric => ch.is_ascii_alphanumeric(),
        }
    }
}

/// Case mapping applied to a value character before it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Upper,
    Lower,
}

impl Transform {
    pub fn apply(self, ch: char) -> char {
        match self {
            Transform::Upper => ch.to_ascii_uppercase(),
            Transform::Lower => ch.to_ascii_lowercase(),
        }
    }
}

/// Descriptor for one token character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// `None` only for the escape token, which never matches input.
    pub class: Option<CharClass>,
    /// Consumes a value character only when one is present and matches.
    pub optional: bool,
    /// May repeat to absorb the rest of the value.
    pub recursive: bool,
    /// Emitted in place of an exhausted value when defaults are enabled.
    pub default: Option<char>,
    pub transform: Option<Transform>,
    /// Makes the following pattern character a literal.
    pub escape: bool,
}

impl Token {
    const fn new(class: CharClass) -> Self {
        Self {
            class: Some(class),
            optional: false,
            recursive: false,
            default: None,
            transform: None,
            escape: false,
        }
    }

    const fn escape() -> Self {
        Self {
            class: None,
            optional: false,
            recursive: false,
            default: None,
            transform: None,
            escape: true,
        }
    }

    const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    const fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    const fn with_default(mut self, ch: char) -> Self {
        self.default = Some(ch);
        self
    }

    const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Test whether the token accepts `ch` as its value character.
    pub fn accepts(&self, ch: char) -> bool {
        self.class.is_some_and(|class| class.matches(ch))
    }

    /// The character actually written to the output for `ch`.
    pub fn emit(&self, ch: char) -> char {
        match self.transform {
            Some(transform) => transform.apply(ch),
            None => ch,
        }
    }

    /// True for fixed-width digit slots, the ones the optional-digit budget
    /// is measured against.
    pub fn is_required_digit(&self) -> bool {
        self.class == Some(CharClass::Digit) && !self.optional
    }
}

static TOKENS: Map<char, Token> = phf_map! {
    '0' => Token::new(CharClass::Digit).with_default('0'),
    '9' => Token::new(CharClass::Digit).optional(),
    '#' => Token::new(CharClass::Digit).optional().recursive(),
    'A' => Token::new(CharClass::Alphanumeric),
    'S' => Token::new(CharClass::Letter),
    'U' => Token::new(CharClass::Letter).with_transform(Transform::Upper),
    'L' => Token::new(CharClass::Letter).with_transform(Transform::Lower),
    '$' => Token::escape(),
};

/// Look up the token for a pattern character. `None` means a literal.
pub fn lookup(ch: char) -> Option<&'static Token> {
    TOKENS.get(&ch)
}

/// Whether `ch` is the escape token.
pub fn is_escape(ch: char) -> bool {
    lookup(ch).is_some_and(|token| token.escape)
}

/// Whether `ch` is a recursive (repeating) token.
pub fn is_recursive(ch: char) -> bool {
    lookup(ch).is_some_and(|token| token.recursive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_exactly_the_standard_tokens() {
        let mut keys: Vec<char> = TOKENS.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!['#', '$', '0', '9', 'A', 'L', 'S', 'U']);
    }

    #[test]
    fn required_digit_has_zero_default() {
        let token = lookup('0').unwrap();
        assert!(token.accepts('7'));
        assert!(!token.accepts('x'));
        assert!(!token.optional);
        assert_eq!(token.default, Some('0'));
        assert!(token.is_required_digit());
    }

    #[test]
    fn optional_digits() {
        let nine = lookup('9').unwrap();
        assert!(nine.optional && !nine.recursive);
        assert!(!nine.is_required_digit());

        let hash = lookup('#').unwrap();
        assert!(hash.optional && hash.recursive);
        assert!(is_recursive('#'));
        assert!(!is_recursive('9'));
    }

    #[test]
    fn letter_classes() {
        let s = lookup('S').unwrap();
        assert!(s.accepts('m'));
        assert!(s.accepts('G'));
        assert!(!s.accepts('1'));

        let a = lookup('A').unwrap();
        assert!(a.accepts('1'));
        assert!(a.accepts('b'));
        assert!(!a.accepts('-'));
    }

    #[test]
    fn classes_are_ascii_only() {
        assert!(!CharClass::Digit.matches('٣'));
        assert!(!CharClass::Letter.matches('é'));
    }

    #[test]
    fn case_transforms() {
        assert_eq!(lookup('U').unwrap().emit('t'), 'T');
        assert_eq!(lookup('L').unwrap().emit('T'), 't');
        assert_eq!(lookup('S').unwrap().emit('T'), 'T');
    }

    #[test]
    fn escape_token_matches_nothing() {
        let escape = lookup('$').unwrap();
        assert!(escape.escape);
        assert!(!escape.accepts('$'));
        assert!(!escape.accepts('1'));
        assert!(is_escape('$'));
        assert!(!is_escape('#'));
    }

    #[test]
    fn other_characters_are_literals() {
        for ch in ['.', '-', ' ', 'R', 'a', 'u', '1'] {
            assert!(lookup(ch).is_none(), "expected literal: {ch:?}");
        }
    }
}
