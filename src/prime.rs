//! Prime helpers used to size tables.

/// Returns true if `n` is prime (6k ± 1 trial division).
pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5usize;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Smallest prime strictly greater than `n`.
pub fn next_prime(n: usize) -> usize {
    let mut p = n + 1;
    while !is_prime(p) {
        p += 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    /// Invariant: `next_prime` is strictly greater than its input.
    #[test]
    fn next_prime_is_strict() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(4), 5);
        assert_eq!(next_prime(10), 11);
        assert_eq!(next_prime(11), 13);
        assert_eq!(next_prime(24), 29);
    }

    #[test]
    fn squares_of_primes_are_composite() {
        for p in [5usize, 7, 11, 13, 97] {
            assert!(!is_prime(p * p));
        }
    }
}
