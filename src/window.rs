/// Inclusive range of prime ranks to emit. Rank 1 is the prime 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankWindow {
    pub start: u64,
    pub end: u64,
}

impl RankWindow {
    pub fn single(n: u64) -> Self {
        RankWindow { start: n, end: n }
    }

    /// Builds a window from the positional arguments. One argument `n` means
    /// just the n-th prime. Two arguments `a b` with a <= b are the rank
    /// range [a, b]; `n c` with c < n means the c primes up to and including
    /// the n-th, i.e. the range [n - c + 1, n].
    pub fn from_args(first: u64, second: Option<u64>) -> Self {
        match second {
            None => RankWindow::single(first),
            Some(end) if first <= end => RankWindow { start: first, end },
            Some(count) => RankWindow {
                start: first - (count - 1),
                end: first,
            },
        }
    }

    #[inline]
    pub fn contains(&self, rank: u64) -> bool {
        self.start <= rank && rank <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_argument_is_a_point_window() {
        assert_eq!(RankWindow::from_args(7, None), RankWindow { start: 7, end: 7 });
    }

    #[test]
    fn test_ascending_arguments_form_a_range() {
        assert_eq!(
            RankWindow::from_args(3, Some(10)),
            RankWindow { start: 3, end: 10 }
        );
        assert_eq!(
            RankWindow::from_args(5, Some(5)),
            RankWindow { start: 5, end: 5 }
        );
    }

    #[test]
    fn test_descending_second_argument_is_a_count() {
        // The 3 primes up to and including the 10th: ranks 8, 9, 10
        assert_eq!(
            RankWindow::from_args(10, Some(3)),
            RankWindow { start: 8, end: 10 }
        );
        // A count of 1 is just the n-th prime
        assert_eq!(
            RankWindow::from_args(10, Some(1)),
            RankWindow { start: 10, end: 10 }
        );
        // The largest possible count, n - 1, reaches back to rank 2
        assert_eq!(
            RankWindow::from_args(10, Some(9)),
            RankWindow { start: 2, end: 10 }
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = RankWindow { start: 3, end: 5 };
        assert!(!window.contains(2));
        assert!(window.contains(3));
        assert!(window.contains(5));
        assert!(!window.contains(6));
    }
}
