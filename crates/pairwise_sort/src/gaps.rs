/// Halving gap schedule for `n` items: `n/2, n/4, ..., 1`.
///
/// Empty for `n <= 1`. The schedule fixes the order in which comparisons are
/// requested, so it must stay the classic halving sequence.
pub fn gaps(n: usize) -> Vec<usize> {
    GapSequence::new(n).collect()
}

/// Lazy form of [`gaps`].
#[derive(Clone, Copy, Debug)]
pub struct GapSequence {
    next: usize,
}

impl GapSequence {
    pub fn new(n: usize) -> Self {
        Self { next: n / 2 }
    }
}

impl Iterator for GapSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next == 0 {
            return None;
        }
        let gap = self.next;
        self.next /= 2;
        Some(gap)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (usize::BITS - self.next.leading_zeros()) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for GapSequence {}
