/// Default upper bound on `n`. Recursive cost grows exponentially and the
/// hosting platform kills invocations that run past its execution ceiling.
pub const DEFAULT_MAX_N: u32 = 45;

/// Largest `n` whose Fibonacci value still fits in a `u64`.
pub const U64_MAX_N: u32 = 93;

/// Naive double recursion, no memoization. The slowness is the point: this is
/// what gets measured.
pub fn fibonacci(n: u32) -> u64 {
    if n <= 1 {
        return n as u64;
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cases() {
        assert_eq!(fibonacci(0), 0);
        assert_eq!(fibonacci(1), 1);
    }

    #[test]
    fn matches_known_table() {
        let table: [(u32, u64); 8] = [
            (2, 1),
            (3, 2),
            (5, 5),
            (10, 55),
            (15, 610),
            (20, 6765),
            (25, 75025),
            (30, 832040),
        ];
        for (n, expected) in table {
            assert_eq!(fibonacci(n), expected, "fibonacci({})", n);
        }
    }

    #[test]
    fn each_term_is_sum_of_previous_two() {
        for n in 2..=25 {
            assert_eq!(fibonacci(n), fibonacci(n - 1) + fibonacci(n - 2));
        }
    }

    #[test]
    fn repeated_calls_agree() {
        assert_eq!(fibonacci(22), fibonacci(22));
    }

    #[test]
    fn upper_bound_value() {
        assert_eq!(fibonacci(DEFAULT_MAX_N), 1_134_903_170);
    }
}
