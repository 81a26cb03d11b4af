/// Largest rank the estimator can bound within the 64-bit domain.
///
/// The bound for this rank is 18,446,744,073,709,548,545 (just under 2^64);
/// one rank higher, no 64-bit value satisfies the predicate under f64
/// evaluation. The exact figure is an empirically observed floating-point
/// limit, kept as a constant validated by test rather than derived.
pub const MAX_BOUNDABLE_RANK: u64 = 415_828_534_307_635_104;

/// Upper bound on the value of the n-th prime, or `None` when no safe bound
/// fits in 64 bits.
///
/// pi(x), the count of primes <= x, satisfies x/ln(x) < pi(x) for
/// 10 < x < 2^64, so the smallest x with x/ln(x) >= n is an upper bound on
/// the n-th prime. That x is found by binary search over the monotonic
/// predicate, resolved to full 64-bit precision in at most 64 halvings.
///
/// - The estimate is at least 2% above the true n-th prime for n > 3,
///   trading tightness for a simple, bounded sieve allocation.
/// - For n <= 2 the approximation is invalid; the exact primes 2 and 3 are
///   returned directly.
pub fn estimate_bound(n: u64) -> Option<u64> {
    if n <= 2 {
        return Some(if n == 1 { 2 } else { 3 });
    }
    if n > MAX_BOUNDABLE_RANK || !holds(u64::MAX, n) {
        return None;
    }

    let mut lo: u64 = 3;
    let mut hi: u64 = u64::MAX;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if holds(mid, n) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(hi)
}

/// The bound predicate: x/ln(x) >= n, evaluated in f64.
fn holds(x: u64, n: u64) -> bool {
    let xf = x as f64;
    xf / xf.ln() >= n as f64
}

/// 32-bit integer square root of a 64-bit value, rounded down.
///
/// Starts from the f64 square root and corrects for rounding in either
/// direction, so `result^2 <= x` holds for every input including u64::MAX.
pub fn integer_square_root(x: u64) -> u32 {
    let mut y = (x as f64).sqrt() as u64;
    while y > 0 && y.checked_mul(y).map_or(true, |sq| sq > x) {
        y -= 1;
    }
    while (y + 1).checked_mul(y + 1).map_or(false, |sq| sq <= x) {
        y += 1;
    }
    y as u32
}
