//! Selection cursor with wrap-around navigation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Index of the actuator currently receiving operator focus.
///
/// The cursor is inactive (both indices `None`) over an empty chain, in which
/// case every navigation is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    len: usize,
    index: Option<usize>,
    previous_index: Option<usize>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SelectionCursor {
    /// Create a cursor over a chain of `len` actuators, starting at
    /// `initial_index` wrapped into range.
    pub fn new(len: usize, initial_index: i64) -> Self {
        let index = maths::wrap_index(initial_index, len);

        SelectionCursor {
            len,
            index,
            previous_index: index,
        }
    }

    /// Wrap any index into `[0, len)`, or `None` if the chain is empty.
    pub fn wrap_index(&self, index: i64) -> Option<usize> {
        maths::wrap_index(index, self.len)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_active(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The index that held focus before the last navigation.
    pub fn previous_index(&self) -> Option<usize> {
        self.previous_index
    }

    pub fn select_next(&mut self) -> Option<usize> {
        self.offset(1)
    }

    pub fn select_previous(&mut self) -> Option<usize> {
        self.offset(-1)
    }

    /// Directly set the index, wrapping it into range.
    pub fn set_index(&mut self, index: i64) -> Option<usize> {
        let new_index = self.wrap_index(index)?;
        self.previous_index = self.index;
        self.index = Some(new_index);

        self.index
    }

    fn offset(&mut self, delta: i64) -> Option<usize> {
        let old_index = self.index?;
        self.previous_index = Some(old_index);
        self.index = maths::offset_index(old_index, delta, self.len);

        self.index
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_three_actuator_scenario() {
        let mut cursor = SelectionCursor::new(3, 1);
        assert_eq!(cursor.index(), Some(1));

        assert_eq!(cursor.select_next(), Some(2));
        assert_eq!(cursor.select_next(), Some(0));
        assert_eq!(cursor.previous_index(), Some(2));
        assert_eq!(cursor.select_previous(), Some(2));
        assert_eq!(cursor.previous_index(), Some(0));
    }

    #[test]
    fn test_round_trip() {
        for len in 1..8 {
            for start in 0..len {
                let mut cursor = SelectionCursor::new(len as usize, start);

                for _ in 0..len {
                    cursor.select_next();
                }
                assert_eq!(cursor.index(), Some(start as usize));

                for _ in 0..len {
                    cursor.select_previous();
                }
                assert_eq!(cursor.index(), Some(start as usize));
            }
        }
    }

    #[test]
    fn test_always_in_range() {
        let len = 5;
        let mut cursor = SelectionCursor::new(len, 0);

        // Deterministic mixed walk of next/previous/set
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..1000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;

            let idx = match seed % 3 {
                0 => cursor.select_next(),
                1 => cursor.select_previous(),
                _ => cursor.set_index(seed as i64 - (u32::MAX / 2) as i64),
            };

            match idx {
                Some(i) => assert!(i < len),
                None => panic!("Cursor became inactive over a non-empty chain"),
            }
        }
    }

    #[test]
    fn test_set_index_wraps() {
        let mut cursor = SelectionCursor::new(4, 0);

        assert_eq!(cursor.set_index(-1), Some(3));
        assert_eq!(cursor.previous_index(), Some(0));
        assert_eq!(cursor.set_index(9), Some(1));
        assert_eq!(cursor.set_index(i64::MIN), Some(0));
        assert_eq!(cursor.wrap_index(-5), Some(3));
    }

    #[test]
    fn test_initial_index_wraps() {
        assert_eq!(SelectionCursor::new(1, 1).index(), Some(0));
        assert_eq!(SelectionCursor::new(3, -1).index(), Some(2));
    }

    #[test]
    fn test_empty_chain() {
        let mut cursor = SelectionCursor::new(0, 1);

        assert!(!cursor.is_active());
        for _ in 0..10 {
            assert_eq!(cursor.select_next(), None);
            assert_eq!(cursor.select_previous(), None);
            assert_eq!(cursor.set_index(3), None);
        }
        assert_eq!(cursor, SelectionCursor::new(0, 1));
        assert_eq!(cursor.wrap_index(7), None);
    }
}
