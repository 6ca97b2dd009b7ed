//! Integer helpers shared by the tiling searches.
//!
//! Division helpers return `0` for a zero divisor instead of panicking. Call
//! sites that must not divide by zero guard explicitly and report
//! [`crate::Error::ZeroDivisor`].

pub const fn ceil_div(a: u64, b: u64) -> u64 {
    if b == 0 { 0 } else { a.div_ceil(b) }
}

pub const fn ceil_align(a: u64, b: u64) -> u64 {
    ceil_div(a, b) * b
}

pub const fn floor_align(a: u64, b: u64) -> u64 {
    if b == 0 { 0 } else { a / b * b }
}

pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

pub const fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 { 0 } else { a / gcd(a, b) * b }
}

/// All divisors of `n`, largest first.
pub fn factors_desc(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            small.push(i);
            if i != n / i {
                large.push(n / i);
            }
        }
        i += 1;
    }
    small.reverse();
    large.extend(small);
    large
}

/// First of `factors` (largest first) that divides `value`, else 1.
pub fn dim_factor(value: u64, factors: &[u64]) -> u64 {
    factors.iter().copied().find(|&f| f != 0 && value % f == 0).unwrap_or(1)
}

/// Largest multiple-of-`step` walk from `b` down that divides `a`, else 0.
pub fn max_divisor(a: u64, mut b: u64, step: u64) -> u64 {
    if step == 0 {
        return 0;
    }
    while b >= step {
        if a % b == 0 {
            return b;
        }
        b -= step;
    }
    0
}
