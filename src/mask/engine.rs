//! Single-pass matcher: walks the pattern and the value in lockstep.
//!
//! All positions are **character** (not byte) indices.
//!
//! Once the static pattern holds no further recursive token, the pass
//! switches to *repeat mode*: every recorded recursive token, together with
//! the literals seen between them, forms a cyclic repeat group that is
//! replayed while value characters remain. The static cursor stays parked at
//! the first pattern character past the group, so trailing (forward) or
//! leading (reverse) literals are emitted once the value runs out.

use std::collections::VecDeque;

use log::trace;

use crate::direction::Direction;
use crate::token::{Token, is_escape, is_recursive, lookup};

use super::ProcessResult;

/// Run one pass of `pattern` over `value`. `value` must not be empty.
pub(super) fn run(
    pattern: &[char],
    value: &[char],
    direction: Direction,
    use_defaults: bool,
) -> ProcessResult {
    let mut pass = Pass {
        pattern,
        value,
        direction,
        use_defaults,
        pattern_pos: direction.start(pattern.len()),
        value_pos: direction.start(value.len()),
        budget: optional_budget(pattern, value),
        escape_next: false,
        repeat: VecDeque::new(),
        in_repeat: false,
        out: VecDeque::with_capacity(pattern.len().max(value.len())),
        valid: true,
    };
    while let Some(slot) = pass.next_slot() {
        if let Step::Stop = pass.visit(slot) {
            break;
        }
    }
    ProcessResult {
        result: pass.out.into_iter().collect(),
        valid: pass.valid,
    }
}

/// Where the pattern character being visited comes from.
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// Index into the static pattern.
    Static(usize),
    /// Generated from the repeat group; the static cursor does not move.
    Repeat(char),
}

enum Step {
    Next,
    Stop,
}

struct Pass<'a> {
    pattern: &'a [char],
    value: &'a [char],
    direction: Direction,
    use_defaults: bool,
    pattern_pos: Option<usize>,
    value_pos: Option<usize>,
    /// Value digits left over for optional digit tokens.
    budget: isize,
    /// Forward only: the previous pattern character was an escape token.
    escape_next: bool,
    repeat: VecDeque<char>,
    in_repeat: bool,
    out: VecDeque<char>,
    valid: bool,
}

impl Pass<'_> {
    fn next_slot(&mut self) -> Option<Slot> {
        if !self.in_repeat
            && !self.repeat.is_empty()
            && !has_more_recursive_tokens(self.pattern, self.direction, self.pattern_pos)
        {
            trace!("entering repeat mode with group {:?}", self.repeat);
            self.in_repeat = true;
        }
        if self.in_repeat
            && self.value_pos.is_some()
            && let Some(ch) = self.repeat.pop_front()
        {
            self.repeat.push_back(ch);
            return Some(Slot::Repeat(ch));
        }
        let pos = self.pattern_pos?;
        self.pattern_pos = self.direction.step(pos, self.pattern.len());
        Some(Slot::Static(pos))
    }

    fn visit(&mut self, slot: Slot) -> Step {
        let pc = match slot {
            Slot::Static(pos) => self.pattern[pos],
            Slot::Repeat(ch) => ch,
        };
        let vc = self.value_char();
        let token = self.token_for(pc);

        // Escapes are not honoured while padding out the tail of a repeat.
        if !self.in_repeat || vc.is_some() {
            match self.direction {
                Direction::Reverse => {
                    if escaped_by_lookback(self.pattern, self.lookback_boundary(slot)) {
                        self.emit(pc);
                        self.skip_escape_token();
                        return Step::Next;
                    }
                }
                Direction::Forward => {
                    if self.escape_next {
                        self.emit(pc);
                        self.escape_next = false;
                        return Step::Next;
                    }
                }
            }
            if token.is_some_and(|t| t.escape) {
                // In reverse a real escape is stepped over by lookback; one
                // that reaches here is a token nothing can satisfy.
                if self.direction.is_reverse() {
                    trace!("unescaped {pc:?} in reverse");
                    return self.fail();
                }
                self.escape_next = true;
                return Step::Next;
            }
        }

        if !self.in_repeat && token.is_some_and(|t| t.recursive) {
            self.repeat.push_back(pc);
        } else if self.in_repeat && vc.is_none() {
            self.emit(pc);
            return Step::Next;
        } else if !self.in_repeat && !self.repeat.is_empty() && vc.is_none() {
            return Step::Next;
        }

        let Some(token) = token else {
            self.emit(pc);
            if !self.in_repeat && !self.repeat.is_empty() {
                self.repeat.push_back(pc);
            }
            return Step::Next;
        };

        if token.optional {
            match vc {
                Some(ch) if token.accepts(ch) && self.optional_digit_available() => {
                    self.consume(token, ch);
                    self.budget -= 1;
                }
                Some(ch) if !self.repeat.is_empty() => {
                    trace!("repeat token {pc:?} rejected {ch:?}");
                    return self.fail();
                }
                _ => {}
            }
            return Step::Next;
        }

        match (vc, token.default) {
            (Some(ch), _) if token.accepts(ch) => self.consume(token, ch),
            (None, Some(default)) if self.use_defaults => self.emit(token.emit(default)),
            _ => {
                trace!("token {pc:?} rejected {vc:?}");
                return self.fail();
            }
        }
        Step::Next
    }

    /// A surplus budget feeds every optional digit. Once a repeat group has
    /// started, a deficit does not starve it either; only an exactly spent
    /// budget does.
    fn optional_digit_available(&self) -> bool {
        self.budget > 0 || (self.budget < 0 && !self.repeat.is_empty())
    }

    /// Tokens other than recursive ones read as literals once a repeat group
    /// has started.
    fn token_for(&self, pc: char) -> Option<&'static Token> {
        lookup(pc).filter(|t| self.repeat.is_empty() || t.recursive)
    }

    fn value_char(&self) -> Option<char> {
        self.value_pos.map(|pos| self.value[pos])
    }

    fn consume(&mut self, token: &Token, ch: char) {
        self.emit(token.emit(ch));
        self.value_pos = self
            .value_pos
            .and_then(|pos| self.direction.step(pos, self.value.len()));
    }

    /// Append (forward) or prepend (reverse) one output character.
    fn emit(&mut self, ch: char) {
        match self.direction {
            Direction::Forward => self.out.push_back(ch),
            Direction::Reverse => self.out.push_front(ch),
        }
    }

    fn fail(&mut self) -> Step {
        self.valid = false;
        Step::Stop
    }

    /// Exclusive end of the pattern prefix whose trailing escapes apply to
    /// `slot`. A repeat character sits just past the parked static cursor.
    fn lookback_boundary(&self, slot: Slot) -> usize {
        match slot {
            Slot::Static(pos) => pos,
            Slot::Repeat(_) => self.pattern_pos.map_or(0, |pos| pos + 1),
        }
    }

    /// Reverse only: step the static cursor over the escape token that
    /// precedes the character just emitted.
    fn skip_escape_token(&mut self) {
        self.pattern_pos = self
            .pattern_pos
            .and_then(|pos| self.direction.step(pos, self.pattern.len()));
    }
}

/// Reverse-mode escape test: the character at `boundary` is escaped iff an
/// odd number of escape tokens immediately precede it.
fn escaped_by_lookback(pattern: &[char], boundary: usize) -> bool {
    let prefix = &pattern[..boundary.min(pattern.len())];
    prefix.iter().rev().take_while(|&&ch| is_escape(ch)).count() % 2 == 1
}

/// Whether a recursive token occurs at or beyond `from` in traversal order.
fn has_more_recursive_tokens(pattern: &[char], direction: Direction, from: Option<usize>) -> bool {
    direction
        .walk(from, pattern.len())
        .any(|pos| is_recursive(pattern[pos]))
}

/// Value digits available to optional digit tokens after every required
/// digit has been served. May be negative.
fn optional_budget(pattern: &[char], value: &[char]) -> isize {
    let required = pattern
        .iter()
        .filter(|&&ch| lookup(ch).is_some_and(Token::is_required_digit))
        .count();
    let digits = value.iter().filter(|ch| ch.is_ascii_digit()).count();
    digits as isize - required as isize
}
