/// Solve `a·t² + b·t + c = 0`, returning both real roots smallest-first.
///
/// Uses `q = -0.5·(b + sign(b)·√disc)`, `t1 = q/a`, `t2 = c/q` to avoid
/// cancellation when the roots are close. Returns `None` when the
/// discriminant is negative or the equation has no unique solution.
/// A vanishing `a` degrades to the single linear root, returned twice.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        if b == 0.0 {
            return None;
        }
        let t = -c / b;
        return Some((t, t));
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sign = if b < 0.0 { -1.0 } else { 1.0 };
    let q = -0.5 * (b + sign * discriminant.sqrt());
    if q == 0.0 {
        // b == 0 and c == 0: double root at the origin
        return Some((0.0, 0.0));
    }

    let t1 = q / a;
    let t2 = c / q;
    Some(if t1 <= t2 { (t1, t2) } else { (t2, t1) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_roots_sorted() {
        assert_eq!(solve_quadratic(1.0, 0.0, -1.0), Some((-1.0, 1.0)));
    }

    #[test]
    fn test_negative_discriminant() {
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0), None);
    }

    #[test]
    fn test_double_root() {
        // (t - 2)^2
        let (t1, t2) = solve_quadratic(1.0, -4.0, 4.0).unwrap();
        assert!((t1 - 2.0).abs() < 1e-12);
        assert!((t2 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_near_equal_roots_are_stable() {
        // roots 1e8 and 1e-8: the naive formula loses the small one entirely
        let (t1, t2) = solve_quadratic(1.0, -(1e8 + 1e-8), 1.0).unwrap();
        assert!((t1 - 1e-8).abs() < 1e-20);
        assert!((t2 - 1e8).abs() < 1e-4);
    }

    #[test]
    fn test_negative_leading_coefficient_still_sorted() {
        // -(t - 1)(t - 3)
        let (t1, t2) = solve_quadratic(-1.0, 4.0, -3.0).unwrap();
        assert!((t1 - 1.0).abs() < 1e-12);
        assert!((t2 - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fallback() {
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0), Some((2.0, 2.0)));
        assert_eq!(solve_quadratic(0.0, 0.0, 1.0), None);
    }
}
