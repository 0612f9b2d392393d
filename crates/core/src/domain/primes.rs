// Primality and the CPU-bound workload

/// Check if a number is prime
///
/// Trial division by 6k-1 and 6k+1 up to sqrt(n).
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    // i <= n / i avoids overflowing i * i near i64::MAX
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// CPU-bound task: sum of all primes in [2, n]
///
/// # Example
/// ```text
/// assert_eq!(cpu_intensive_task(10), 17); // 2 + 3 + 5 + 7
/// ```
pub fn cpu_intensive_task(n: i64) -> i64 {
    if n <= 2 {
        return 0;
    }
    (2..=n).filter(|&i| is_prime(i)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small_values() {
        assert!(!is_prime(-7));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(5));
        assert!(!is_prime(9));
        assert!(is_prime(11));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
    }

    #[test]
    fn test_is_prime_larger_values() {
        assert!(is_prime(997));
        assert!(!is_prime(999));
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
        assert!(is_prime(2_147_483_647));
    }

    #[test]
    fn test_cpu_task_sums() {
        assert_eq!(cpu_intensive_task(0), 0);
        assert_eq!(cpu_intensive_task(1), 0);
        assert_eq!(cpu_intensive_task(2), 0);
        assert_eq!(cpu_intensive_task(3), 5);
        assert_eq!(cpu_intensive_task(5), 10);
        assert_eq!(cpu_intensive_task(10), 17);
        assert_eq!(cpu_intensive_task(15), 41);
        assert_eq!(cpu_intensive_task(100), 1060);
    }
}
