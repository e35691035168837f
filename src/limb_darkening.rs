use crate::error::ParameterError;
use crate::float_trait::Float;

/// Stellar limb-darkening profile with fixed-step radial quadrature
///
/// Intensity at normalized radius $r$ follows the non-linear law
/// $$
/// I(r) = c_0 - \sum_{n \geq 1} c_n \left(1 - \mu^{n/2}\right),\quad \mu = \sqrt{1 - r^2},
/// $$
/// where $c_0$ is the central intensity. [`LimbDarkening::integral`] integrates $2 r I(r)$, so that
/// the integral over a thin annulus divided by the annulus area $r_2^2 - r_1^2$ is the mean
/// intensity of the annulus. The normalization
/// $$
/// \Omega = \sum_n \frac{c'_n}{n + 4},\quad c'_0 = c_0 - \sum_{n \geq 1} c_n,\ c'_n = c_n,
/// $$
/// is a quarter of the integral over the whole disk, $\Omega = 1/4$ for a uniform disk.
#[derive(Clone, Debug, PartialEq)]
pub struct LimbDarkening<T> {
    coeffs: Vec<T>,
    dr: T,
    omega: T,
}

impl<T> LimbDarkening<T>
where
    T: Float,
{
    /// Construct the profile, checking that the central intensity and the radial step are
    /// positive
    pub fn new(coeffs: Vec<T>, dr: T) -> Result<Self, ParameterError> {
        let &c0 = coeffs.first().ok_or(ParameterError::EmptyLimbDarkening)?;
        if !(c0 > T::zero()) {
            return Err(ParameterError::NonPositiveCentralIntensity);
        }
        if !(dr.is_finite() && dr > T::zero()) {
            return Err(ParameterError::NonPositiveRadialStep);
        }
        let omega = Self::disk_normalization(c0, &coeffs[1..]);
        Ok(Self { coeffs, dr, omega })
    }

    fn disk_normalization(c0: T, rest: &[T]) -> T {
        let linear_sum = rest.iter().fold(T::zero(), |acc, &c| acc + c);
        rest.iter()
            .enumerate()
            .fold((c0 - linear_sum) / T::four(), |acc, (i, &c)| {
                acc + c / T::from_count(i + 5)
            })
    }

    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    pub fn dr(&self) -> T {
        self.dr
    }

    /// Disk-integrated normalization constant $\Omega$
    pub fn omega(&self) -> T {
        self.omega
    }

    /// Intensity at normalized radius `r`, radii beyond the limb are treated as the limb
    pub fn intensity(&self, r: T) -> T {
        let mu = (T::one() - r * r).max(T::zero()).sqrt();
        let (&c0, rest) = match self.coeffs.split_first() {
            Some(split) => split,
            None => return T::zero(),
        };
        rest.iter().enumerate().fold(c0, |acc, (i, &c)| {
            let power = T::from_count(i + 1) * T::half();
            acc - c * (T::one() - mu.powf(power))
        })
    }

    /// Midpoint-rule sum of $2 r I(r)$ over `[lo, hi]` divided by the number of nodes
    fn mean_weighted_intensity(&self, lo: T, hi: T) -> T {
        let width = hi - lo;
        let n = num_traits::ToPrimitive::to_usize(&(width / self.dr).ceil())
            .unwrap_or(1)
            .max(1);
        let step = width / T::from_count(n);
        let sum = (0..n).fold(T::zero(), |acc, k| {
            let r = lo + (T::from_count(k) + T::half()) * step;
            acc + T::two() * r * self.intensity(r)
        });
        sum / T::from_count(n)
    }

    /// Definite integral of $2 r I(r)$ over `[lo, hi]`
    pub fn integral(&self, lo: T, hi: T) -> T {
        if hi < lo {
            return -self.integral(hi, lo);
        }
        self.mean_weighted_intensity(lo, hi) * (hi - lo)
    }

    /// Mean intensity of the annulus `[lo, hi]`, i.e. `integral(lo, hi) / (hi² - lo²)`
    ///
    /// The common factor `hi - lo` is cancelled analytically, so the result tends to `I(lo)` as
    /// the annulus becomes thin instead of turning into `0 / 0`.
    pub fn mean_intensity(&self, lo: T, hi: T) -> T {
        let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
        let denominator = hi + lo;
        if denominator.is_zero() {
            return self.intensity(lo);
        }
        self.mean_weighted_intensity(lo, hi) / denominator
    }
}
