/// Circular buffer of smallest-prime-factor marks over a sliding window of
/// odd numbers.
///
/// Each slot corresponds to one odd number in a moving window; the window
/// advances one slot per odd number, wrapping via bitmask (the width is
/// always a power of two). A zero slot means the number landing there is a
/// prime candidate; a nonzero slot holds the smallest prime factor of the
/// composite landing there. At any instant at most sqrt(bound) slots are
/// occupied.
pub struct FactorRing {
    slots: Vec<u32>,
    mask: usize,
}

impl FactorRing {
    /// Ring width for a given bound square root: the next power of two at
    /// least 2 * sqrt_bound.
    ///
    /// A multiple of a prime p <= sqrt_bound recurs every p slots; with
    /// p <= width / 2 its next occurrence always lands ahead of the cursor
    /// inside the window, before the wrap reaches slots holding newer
    /// numbers. Re-deriving the width differently must preserve that.
    pub fn width_for(sqrt_bound: u32) -> u64 {
        (2 * u64::from(sqrt_bound)).max(2).next_power_of_two()
    }

    /// Allocates a zeroed ring, or `None` when the allocation cannot be
    /// satisfied. `width` must be a power of two.
    pub fn new(width: u64) -> Option<Self> {
        assert!(width.is_power_of_two());
        let len = usize::try_from(width).ok()?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(len).ok()?;
        slots.resize(len, 0);
        Some(FactorRing { slots, mask: len - 1 })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn advance(&self, index: usize) -> usize {
        (index + 1) & self.mask
    }

    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        self.slots[index & self.mask]
    }

    /// Reads and clears a slot, recycling it for a later odd number on the
    /// same ring position.
    #[inline]
    pub fn take(&mut self, index: usize) -> u32 {
        std::mem::replace(&mut self.slots[index & self.mask], 0)
    }

    /// Walks forward from `index` in strides of the carried factor and
    /// deposits it in the first free slot. When an occupied slot holds a
    /// larger factor, the smaller one stays put and the larger is carried
    /// onward at its own stride, so every composite ends up marked by its
    /// smallest prime factor.
    ///
    /// The walk never wraps: a swap chain can push the carried factor a
    /// full lap ahead of `index`, and writing there would land on a slot
    /// the cursor reads one lap earlier, marking the wrong number. Once
    /// the cumulative displacement reaches the width, the factor is handed
    /// back as `Deferred` together with the displacement of the multiple
    /// it was about to mark.
    pub fn deposit(&mut self, index: usize, factor: u32) -> Deposit {
        let width = self.slots.len() as u64;
        let mut carry = factor;
        let mut j = index;
        let mut offset = 0u64;
        loop {
            offset += u64::from(carry);
            if offset >= width {
                return Deposit::Deferred { factor: carry, offset };
            }
            j = (j + carry as usize) & self.mask;
            let slot = &mut self.slots[j];
            if *slot == 0 {
                *slot = carry;
                return Deposit::Placed;
            }
            if *slot > carry {
                std::mem::swap(slot, &mut carry);
            }
        }
    }
}

/// Outcome of a scheduling walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deposit {
    /// The factor was written into a free slot within the current lap.
    Placed,
    /// Collisions pushed the carried factor at least a full lap ahead of
    /// the start index. The caller must hold it until the odd number
    /// `offset` slots ahead comes due; every slot between the start index
    /// and that number keeps its meaning.
    Deferred { factor: u32, offset: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_for_is_power_of_two_at_least_twice_sqrt() {
        for sqrt_bound in [1u32, 2, 3, 4, 5, 100, 1000, 104729, u32::MAX] {
            let width = FactorRing::width_for(sqrt_bound);
            assert!(width.is_power_of_two());
            assert!(width >= 2 * u64::from(sqrt_bound));
            // Tight: half the width would no longer cover 2 * sqrt_bound
            assert!(width / 2 < 2 * u64::from(sqrt_bound).max(1));
        }
    }

    #[test]
    fn test_deposit_lands_factor_slots_ahead() {
        let mut ring = FactorRing::new(8).unwrap();
        ring.deposit(0, 3);
        assert_eq!(ring.get(3), 3);
        assert_eq!(ring.get(0), 0);
    }

    #[test]
    fn test_deposit_wraps_around() {
        let mut ring = FactorRing::new(8).unwrap();
        ring.deposit(6, 5);
        assert_eq!(ring.get(3), 5);
    }

    #[test]
    fn test_collision_keeps_smaller_factor_and_carries_larger() {
        let mut ring = FactorRing::new(16).unwrap();
        assert_eq!(ring.deposit(0, 5), Deposit::Placed);
        assert_eq!(ring.get(5), 5);
        // 3 collides at slot 5: 3 stays, 5 moves 5 more slots to slot 10
        assert_eq!(ring.deposit(2, 3), Deposit::Placed);
        assert_eq!(ring.get(5), 3);
        assert_eq!(ring.get(10), 5);
    }

    #[test]
    fn test_collision_with_smaller_occupant_steps_over() {
        let mut ring = FactorRing::new(16).unwrap();
        assert_eq!(ring.deposit(2, 3), Deposit::Placed);
        assert_eq!(ring.get(5), 3);
        // 5 collides at slot 5 with the smaller 3: 5 keeps walking to slot 10
        assert_eq!(ring.deposit(0, 5), Deposit::Placed);
        assert_eq!(ring.get(5), 3);
        assert_eq!(ring.get(10), 5);
    }

    #[test]
    fn test_deposit_defers_instead_of_wrapping() {
        let mut ring = FactorRing::new(4).unwrap();
        assert_eq!(ring.deposit(0, 3), Deposit::Placed);
        // A second walk from the same index finds slot 3 taken and its next
        // stop 6 slots out, past the width of 4: handed back, not wrapped
        assert_eq!(
            ring.deposit(0, 3),
            Deposit::Deferred { factor: 3, offset: 6 }
        );
        assert_eq!(ring.get(3), 3);
    }

    #[test]
    fn test_swap_chain_defers_the_carried_factor() {
        let mut ring = FactorRing::new(8).unwrap();
        assert_eq!(ring.deposit(0, 5), Deposit::Placed);
        assert_eq!(ring.deposit(0, 7), Deposit::Placed);
        // 3 swaps into slot 5; the carried 5 would next land 8 slots from
        // the start index, a full lap, and comes back deferred
        assert_eq!(
            ring.deposit(2, 3),
            Deposit::Deferred { factor: 5, offset: 8 }
        );
        assert_eq!(ring.get(5), 3);
    }

    #[test]
    fn test_take_clears_the_slot() {
        let mut ring = FactorRing::new(4).unwrap();
        ring.deposit(0, 3);
        assert_eq!(ring.take(3), 3);
        assert_eq!(ring.get(3), 0);
        assert_eq!(ring.take(3), 0);
    }

    #[test]
    fn test_indexing_wraps_by_mask() {
        let ring = FactorRing::new(4).unwrap();
        assert_eq!(ring.advance(3), 0);
        assert_eq!(ring.get(7), ring.get(3));
    }
}
