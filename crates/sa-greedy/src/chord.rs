/// A thread segment from hook `start` to hook `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub start: usize,
    pub end: usize,
}

impl Chord {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Direction-independent identity: `a -> b` and `b -> a` share a key.
    pub fn key(self) -> (usize, usize) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

/// Ordered chords forming one continuous thread.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringOrder {
    chords: Vec<Chord>,
}

impl StringOrder {
    pub fn new() -> Self {
        Self { chords: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chords: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn as_slice(&self) -> &[Chord] {
        &self.chords
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }

    pub fn last(&self) -> Option<Chord> {
        self.chords.last().copied()
    }

    /// True when every chord starts where the previous one ended.
    pub fn is_continuous(&self) -> bool {
        self.chords.windows(2).all(|w| w[1].start == w[0].end)
    }

    pub fn into_vec(self) -> Vec<Chord> {
        self.chords
    }
}

impl From<Vec<Chord>> for StringOrder {
    fn from(chords: Vec<Chord>) -> Self {
        Self { chords }
    }
}

impl<'a> IntoIterator for &'a StringOrder {
    type Item = &'a Chord;
    type IntoIter = std::slice::Iter<'a, Chord>;

    fn into_iter(self) -> Self::IntoIter {
        self.chords.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Chord, StringOrder};

    #[test]
    fn key_ignores_direction() {
        assert_eq!(Chord::new(3, 9).key(), (3, 9));
        assert_eq!(Chord::new(9, 3).key(), Chord::new(3, 9).key());
    }

    #[test]
    fn continuity() {
        let good = StringOrder::from(vec![Chord::new(0, 4), Chord::new(4, 1), Chord::new(1, 6)]);
        assert!(good.is_continuous());
        assert_eq!(good.last(), Some(Chord::new(1, 6)));

        let broken = StringOrder::from(vec![Chord::new(0, 4), Chord::new(5, 1)]);
        assert!(!broken.is_continuous());

        assert!(StringOrder::new().is_continuous());
    }
}
