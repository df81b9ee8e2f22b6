/// Order in which the pattern and the value are consumed.
///
/// Cursors are `Option<usize>` character indices; `None` means the cursor
/// has walked off the end (forward) or the start (reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// First index visited in a sequence of `len` characters.
    pub fn start(self, len: usize) -> Option<usize> {
        match self {
            Direction::Forward => (len > 0).then_some(0),
            Direction::Reverse => len.checked_sub(1),
        }
    }

    /// The index after `pos` in traversal order.
    pub fn step(self, pos: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Forward => (pos + 1 < len).then_some(pos + 1),
            Direction::Reverse => pos.checked_sub(1),
        }
    }

    /// Indices from `from` (inclusive) to the end of traversal.
    pub fn walk(self, from: Option<usize>, len: usize) -> impl Iterator<Item = usize> {
        std::iter::successors(from.filter(|&pos| pos < len), move |&pos| {
            self.step(pos, len)
        })
    }

    pub fn is_reverse(self) -> bool {
        self == Direction::Reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_of_empty_is_none() {
        assert_eq!(Direction::Forward.start(0), None);
        assert_eq!(Direction::Reverse.start(0), None);
    }

    #[test]
    fn forward_walks_up() {
        let d = Direction::Forward;
        assert_eq!(d.start(3), Some(0));
        assert_eq!(d.step(1, 3), Some(2));
        assert_eq!(d.step(2, 3), None);
        assert_eq!(d.walk(Some(1), 3).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn reverse_walks_down() {
        let d = Direction::Reverse;
        assert_eq!(d.start(3), Some(2));
        assert_eq!(d.step(1, 3), Some(0));
        assert_eq!(d.step(0, 3), None);
        assert_eq!(d.walk(Some(1), 3).collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn walk_from_nowhere_is_empty() {
        assert_eq!(Direction::Forward.walk(None, 3).count(), 0);
        assert_eq!(Direction::Reverse.walk(Some(5), 3).count(), 0);
    }
}
