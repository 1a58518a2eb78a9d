//! Circular index arithmetic
//!
//! Pure helpers for walking a ring of `len` slides. Every function expects
//! `len >= 1` and indices already inside `[0, len)`; the slide list enforces
//! that at construction, so none of these can fail.

/// Direction of travel between two slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward higher indices (wrapping from the last slide to the first)
    Forward,
    /// Toward lower indices (wrapping from the first slide to the last)
    Backward,
    /// No motion is expressed; slots are repainted in place
    Unspecified,
}

/// Index of the slide after `index`, wrapping to 0
#[inline]
pub fn successor(index: usize, len: usize) -> usize {
    debug_assert!(len > 0, "successor() on an empty ring");
    (index + 1) % len
}

/// Index of the slide before `index`, wrapping to `len - 1`
#[inline]
pub fn predecessor(index: usize, len: usize) -> usize {
    debug_assert!(len > 0, "predecessor() on an empty ring");
    (index + len - 1) % len
}

/// Direction to travel from `from` to `to`
///
/// A single successor step is `Forward` and a single predecessor step is
/// `Backward`. Anything further picks the shorter way around the ring, with
/// ties going `Forward`. With two slides both neighbours coincide and the
/// successor check wins.
pub fn direction_between(from: usize, to: usize, len: usize) -> Direction {
    if to == successor(from, len) {
        return Direction::Forward;
    }
    if to == predecessor(from, len) {
        return Direction::Backward;
    }

    let forward_steps = (to + len - from) % len;
    let backward_steps = (from + len - to) % len;

    if forward_steps <= backward_steps {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Clamp a caller-supplied index into `[0, len)`
///
/// Negative values land on the first slide, anything past the end lands on
/// the last one.
pub fn clamp_index(index: i64, len: usize) -> usize {
    if index <= 0 {
        return 0;
    }
    let last = len.saturating_sub(1);
    usize::try_from(index).map_or(last, |i| i.min(last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_predecessor_round_trip() {
        for len in 1..=8 {
            for i in 0..len {
                assert_eq!(predecessor(successor(i, len), len), i);
                assert_eq!(successor(predecessor(i, len), len), i);
            }
        }
    }

    #[test]
    fn test_single_slide_ring() {
        assert_eq!(successor(0, 1), 0);
        assert_eq!(predecessor(0, 1), 0);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(successor(4, 5), 0);
        assert_eq!(predecessor(0, 5), 4);
    }

    #[test]
    fn test_direction_adjacent() {
        assert_eq!(direction_between(2, 3, 5), Direction::Forward);
        assert_eq!(direction_between(3, 2, 5), Direction::Backward);
        // Wrapping neighbours
        assert_eq!(direction_between(4, 0, 5), Direction::Forward);
        assert_eq!(direction_between(0, 4, 5), Direction::Backward);
    }

    #[test]
    fn test_direction_shorter_path() {
        // 0 -> 3 of 8: forward 3, backward 5
        assert_eq!(direction_between(0, 3, 8), Direction::Forward);
        // 0 -> 6 of 8: forward 6, backward 2
        assert_eq!(direction_between(0, 6, 8), Direction::Backward);
        // 1 -> 7 of 8 wraps backward in 2 steps
        assert_eq!(direction_between(1, 7, 8), Direction::Backward);
    }

    #[test]
    fn test_direction_tie_goes_forward() {
        assert_eq!(direction_between(0, 2, 4), Direction::Forward);
        assert_eq!(direction_between(3, 1, 4), Direction::Forward);
    }

    #[test]
    fn test_direction_two_slides() {
        assert_eq!(direction_between(0, 1, 2), Direction::Forward);
        assert_eq!(direction_between(1, 0, 2), Direction::Forward);
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-3, 4), 0);
        assert_eq!(clamp_index(0, 4), 0);
        assert_eq!(clamp_index(2, 4), 2);
        assert_eq!(clamp_index(4, 4), 3);
        assert_eq!(clamp_index(10, 4), 3);
        assert_eq!(clamp_index(i64::MAX, 1), 0);
    }
}
