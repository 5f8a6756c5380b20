//! Shared statistics over model amounts.
//!
//! Every screen model in this crate teaches the same quantity from a different
//! angle: the mean as a leveled water line, a fair share of snacks, or the
//! balance point of a data set. These helpers compute it the same way for all
//! of them.

/// Sum of the given amounts.
pub fn total<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().sum()
}

/// Arithmetic mean, or `None` for an empty sequence.
pub fn mean<I>(amounts: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for a in amounts {
        sum += a;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Sum of absolute deviations from the mean, or `None` for an empty sequence.
///
/// Zero exactly when every amount already sits at the mean, the "everyone has
/// a fair share" reading the models test against.
pub fn total_deviation(amounts: &[f64]) -> Option<f64> {
    let mu = mean(amounts.iter().copied())?;
    Some(amounts.iter().map(|a| (a - mu).abs()).sum())
}

/// A whole part plus a fractional remainder, as produced by sharing `total`
/// items across `parts` recipients.
///
/// The fraction is kept unreduced (`remainder / parts`) because that is what
/// the sharing models display; call [`Fraction::reduced`] for the canonical
/// form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    /// Numerator.
    pub numerator: usize,
    /// Denominator (never zero).
    pub denominator: usize,
}

impl Fraction {
    /// Construct a fraction. Panics if `denominator` is zero.
    pub fn new(numerator: usize, denominator: usize) -> Self {
        assert!(denominator != 0, "Fraction denominator must be non-zero");
        Self {
            numerator,
            denominator,
        }
    }

    /// Whether this fraction is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// The fraction in lowest terms.
    pub fn reduced(&self) -> Self {
        if self.numerator == 0 {
            return Self::new(0, 1);
        }
        let d = gcd(self.numerator, self.denominator);
        Self::new(self.numerator / d, self.denominator / d)
    }

    /// The fraction as a float.
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Split `total` whole items evenly across `parts` recipients.
///
/// Returns the whole count each recipient gets and the fractional remainder
/// piece each recipient gets on top. Panics if `parts` is zero.
pub fn share_evenly(total: usize, parts: usize) -> (usize, Fraction) {
    assert!(parts != 0, "Cannot share across zero recipients");
    (total / parts, Fraction::new(total % parts, parts))
}
