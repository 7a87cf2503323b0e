//! Two-sample statistics over unsorted slices.
use mls_core::*;

fn sorted(xs: &[Feature]) -> Vec<Statistic> {
    let mut xs = xs.iter().map(|&x| x as Statistic).collect::<Vec<_>>();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs
}

pub fn mean(xs: &[Feature]) -> Statistic {
    if xs.is_empty() {
        return 0.;
    }
    xs.iter().map(|&x| x as Statistic).sum::<Statistic>() / xs.len() as Statistic
}

/// Kolmogorov-Smirnov statistic: sup |F_a(x) - F_b(x)|.
pub fn ks_statistic(a: &[Feature], b: &[Feature]) -> Statistic {
    if a.is_empty() || b.is_empty() {
        return 0.;
    }
    let ref a = sorted(a);
    let ref b = sorted(b);
    let (n, m) = (a.len() as Statistic, b.len() as Statistic);
    let (mut i, mut j) = (0, 0);
    let mut sup = 0f64;
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        sup = sup.max((i as Statistic / n - j as Statistic / m).abs());
    }
    sup
}

/// Asymptotic two-sided p-value for a KS statistic `d` on samples of size n and m.
///
/// Uses the Kolmogorov distribution with the Stephens small-sample correction
/// λ = (√nₑ + 0.12 + 0.11/√nₑ)·d where nₑ = nm/(n+m).
pub fn ks_p_value(d: Statistic, n: usize, m: usize) -> Statistic {
    if n == 0 || m == 0 {
        return 1.;
    }
    let ne = (n * m) as Statistic / (n + m) as Statistic;
    let root = ne.sqrt();
    let lambda = (root + 0.12 + 0.11 / root) * d;
    kolmogorov(lambda)
}

/// Q_KS(λ) = 2 Σ (-1)^(j-1) exp(-2 j² λ²), clamped to [0, 1].
fn kolmogorov(lambda: Statistic) -> Statistic {
    if lambda < 1e-3 {
        return 1.;
    }
    let mut sum: Statistic = 0.;
    let mut sign: Statistic = 1.;
    for j in 1..=100 {
        let j = j as Statistic;
        let term = sign * (-2. * j * j * lambda * lambda).exp();
        sum += term;
        if term.abs() < 1e-10 {
            break;
        }
        sign = -sign;
    }
    (2. * sum).clamp(0., 1.)
}

/// Population stability index over quantile bins of the reference sample.
///
/// Bin edges are the reference's interior quantiles; proportions are floored
/// at `PSI_EPSILON` so empty bins do not blow up the log term.
pub fn psi(reference: &[Feature], current: &[Feature], bins: usize) -> Statistic {
    if reference.is_empty() || current.is_empty() || bins < 2 {
        return 0.;
    }
    let ref r = sorted(reference);
    let edges = (1..bins)
        .map(|k| r[(k * r.len() / bins).min(r.len() - 1)])
        .collect::<Vec<Statistic>>();
    let histogram = |xs: &[Feature]| {
        let mut counts = vec![0usize; bins];
        for &x in xs {
            let x = x as Statistic;
            counts[edges.partition_point(|&e| e < x)] += 1;
        }
        counts
            .into_iter()
            .map(|c| (c as Statistic / xs.len() as Statistic).max(PSI_EPSILON))
            .collect::<Vec<Statistic>>()
    };
    let p = histogram(reference);
    let q = histogram(current);
    p.iter()
        .zip(q.iter())
        .map(|(p, q)| (q - p) * (q / p).ln())
        .sum()
}

/// Wasserstein-1 (earth mover's) distance between two empirical distributions:
/// ∫ |F_a(x) - F_b(x)| dx over the merged support.
pub fn wasserstein(a: &[Feature], b: &[Feature]) -> Statistic {
    if a.is_empty() || b.is_empty() {
        return 0.;
    }
    let ref a = sorted(a);
    let ref b = sorted(b);
    let mut support = a.iter().chain(b.iter()).copied().collect::<Vec<_>>();
    support.sort_by(|x, y| x.total_cmp(y));
    let (n, m) = (a.len() as Statistic, b.len() as Statistic);
    support
        .windows(2)
        .map(|w| {
            let fa = a.partition_point(|&x| x <= w[0]) as Statistic / n;
            let fb = b.partition_point(|&x| x <= w[0]) as Statistic / m;
            (fa - fb).abs() * (w[1] - w[0])
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ks_of_identical_samples_is_zero() {
        let xs = [1., 2., 3., 4., 5.];
        assert_eq!(ks_statistic(&xs, &xs), 0.);
    }

    #[test]
    fn ks_of_disjoint_samples_is_one() {
        assert_eq!(ks_statistic(&[1., 2., 3.], &[10., 11., 12.]), 1.);
    }

    #[test]
    fn ks_is_symmetric() {
        let a = [0.1, 0.5, 0.9, 1.3];
        let b = [0.2, 0.4, 2.0];
        assert_eq!(ks_statistic(&a, &b), ks_statistic(&b, &a));
    }

    #[test]
    fn p_value_is_one_without_difference() {
        assert_eq!(ks_p_value(0., 100, 100), 1.);
    }

    #[test]
    fn p_value_is_small_for_large_difference() {
        assert!(ks_p_value(0.5, 500, 500) < 1e-6);
        assert!(ks_p_value(0.05, 100, 100) > 0.5);
    }

    #[test]
    fn psi_of_identical_samples_is_zero() {
        let xs = (0..100).map(|i| i as f32).collect::<Vec<_>>();
        assert!(psi(&xs, &xs, 10).abs() < 1e-9);
    }

    #[test]
    fn psi_grows_with_shift() {
        let xs = (0..100).map(|i| i as f32).collect::<Vec<_>>();
        let small = xs.iter().map(|x| x + 5.).collect::<Vec<_>>();
        let large = xs.iter().map(|x| x + 50.).collect::<Vec<_>>();
        assert!(psi(&xs, &small, 10) < psi(&xs, &large, 10));
    }

    #[test]
    fn wasserstein_of_shift_is_the_shift() {
        let a = [0., 1., 2., 3.];
        let b = [2., 3., 4., 5.];
        assert!((wasserstein(&a, &b) - 2.).abs() < 1e-9);
    }

    #[test]
    fn empty_samples_are_harmless() {
        assert_eq!(ks_statistic(&[], &[1.]), 0.);
        assert_eq!(wasserstein(&[1.], &[]), 0.);
        assert_eq!(psi(&[], &[1.], 10), 0.);
        assert_eq!(mean(&[]), 0.);
    }
}
