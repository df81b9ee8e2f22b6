//! Compiled masks and the `process` / `apply` / `validate` entry points.

mod engine;

use std::fmt;

use crate::direction::Direction;

/// How a [`Mask`] consumes its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskOptions {
    /// Consume pattern and value right-to-left, anchoring the output on the
    /// last pattern character. Suited to numeric masks such as `#.##0,00`.
    pub reverse: bool,
    /// Emit a token's default when the value is exhausted. `None` follows
    /// `reverse`.
    pub use_defaults: Option<bool>,
}

impl MaskOptions {
    pub fn forward() -> Self {
        Self::default()
    }

    pub fn reverse() -> Self {
        Self {
            reverse: true,
            use_defaults: None,
        }
    }

    pub fn with_defaults(mut self, use_defaults: bool) -> Self {
        self.use_defaults = Some(use_defaults);
        self
    }
}

/// The outcome of masking one value.
///
/// `result` holds everything emitted before the pass stopped, so an invalid
/// value still yields the matched prefix (or suffix, in reverse mode).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessResult {
    pub result: String,
    pub valid: bool,
}

impl fmt::Display for ProcessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.result)
    }
}

/// An immutable pattern plus options, reusable across any number of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pattern: Vec<char>,
    direction: Direction,
    use_defaults: bool,
}

impl Mask {
    pub fn new(pattern: &str, options: MaskOptions) -> Self {
        Self {
            pattern: pattern.chars().collect(),
            direction: if options.reverse {
                Direction::Reverse
            } else {
                Direction::Forward
            },
            use_defaults: options.use_defaults.unwrap_or(options.reverse),
        }
    }

    pub fn pattern(&self) -> String {
        self.pattern.iter().collect()
    }

    pub fn is_reverse(&self) -> bool {
        self.direction.is_reverse()
    }

    pub fn uses_defaults(&self) -> bool {
        self.use_defaults
    }

    /// Format `value` against the pattern and report whether it satisfied
    /// every required token.
    ///
    /// An absent or empty value yields an empty, invalid result.
    pub fn process<'a>(&self, value: impl Into<Option<&'a str>>) -> ProcessResult {
        let value: Vec<char> = match value.into() {
            Some(text) if !text.is_empty() => text.chars().collect(),
            _ => return ProcessResult::default(),
        };
        engine::run(&self.pattern, &value, self.direction, self.use_defaults)
    }

    /// The formatted text only.
    pub fn apply<'a>(&self, value: impl Into<Option<&'a str>>) -> String {
        self.process(value).result
    }

    /// The validity flag only.
    pub fn validate<'a>(&self, value: impl Into<Option<&'a str>>) -> bool {
        self.process(value).valid
    }
}

/// One-shot [`Mask::process`].
pub fn process<'a>(
    value: impl Into<Option<&'a str>>,
    pattern: &str,
    options: MaskOptions,
) -> ProcessResult {
    Mask::new(pattern, options).process(value)
}

/// One-shot [`Mask::apply`].
pub fn apply<'a>(value: impl Into<Option<&'a str>>, pattern: &str, options: MaskOptions) -> String {
    Mask::new(pattern, options).apply(value)
}

/// One-shot [`Mask::validate`].
pub fn validate<'a>(value: impl Into<Option<&'a str>>, pattern: &str, options: MaskOptions) -> bool {
    Mask::new(pattern, options).validate(value)
}
