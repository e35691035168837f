use crate::float_trait::Float;
use crate::limb_darkening::LimbDarkening;

use enum_dispatch::enum_dispatch;

#[enum_dispatch]
pub trait OcclusionTrait<T> {
    /// Visible fraction of the stellar flux
    fn flux(&self, profile: &LimbDarkening<T>) -> T;
}

/// Geometric configuration of the planet and stellar disks at a single moment
///
/// `z` is the projected center-to-center separation and `p` is the planet radius, both in units
/// of the stellar radius.
#[enum_dispatch(OcclusionTrait<T>)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Regime<T: Float> {
    NoOverlap(NoOverlap),
    FullOverlap(FullOverlap<T>),
    PartialOverlap(PartialOverlap<T>),
}

impl<T> Regime<T>
where
    T: Float,
{
    pub fn select(z: T, p: T) -> Self {
        if z > T::one() + p {
            NoOverlap.into()
        } else if z <= T::one() - p {
            FullOverlap { z, p }.into()
        } else {
            PartialOverlap { z, p }.into()
        }
    }
}

/// Disks do not overlap, or the configuration is not evaluated at all
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoOverlap;

impl<T> OcclusionTrait<T> for NoOverlap
where
    T: Float,
{
    fn flux(&self, _profile: &LimbDarkening<T>) -> T {
        T::one()
    }
}

/// Planet disk lies entirely inside the stellar disk, $z \leq 1 - p$
///
/// The occulted intensity is the mean intensity of the annulus $[z - p, z + p]$:
/// $$
/// F = 1 - \frac{p^2 I^*(z)}{4 \Omega},\quad I^*(z) = \frac{1}{4 z p}\int_{z-p}^{z+p} 2 r I(r) dr.
/// $$
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FullOverlap<T> {
    pub z: T,
    pub p: T,
}

impl<T> OcclusionTrait<T> for FullOverlap<T>
where
    T: Float,
{
    fn flux(&self, profile: &LimbDarkening<T>) -> T {
        let Self { z, p } = *self;
        // 2 r I(r) is odd, so the part of [z - p, z + p] below zero cancels
        let intensity = profile.mean_intensity((z - p).abs(), z + p);
        T::one() - p * p * intensity / (T::four() * profile.omega())
    }
}

/// Planet disk crosses the stellar limb, $1 - p < z \leq 1 + p$
///
/// $$
/// F = 1 - \frac{I^*(z)}{4 \pi \Omega}\left[p^2 \arccos\frac{z - 1}{p} - (z - 1)\sqrt{p^2 - (z - 1)^2}\right],
/// \quad I^*(z) = \frac{1}{1 - (z - p)^2}\int_{z - p}^{1} 2 r I(r) dr.
/// $$
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartialOverlap<T> {
    pub z: T,
    pub p: T,
}

impl<T> PartialOverlap<T>
where
    T: Float,
{
    /// Overlap term in square brackets, vanishes at first and last contact
    pub fn overlap_term(&self) -> T {
        let Self { z, p } = *self;
        let d = z - T::one();
        let cos_angle = (d / p).max(-T::one()).min(T::one());
        p * p * cos_angle.acos() - d * (p * p - d * d).max(T::zero()).sqrt()
    }
}

impl<T> OcclusionTrait<T> for PartialOverlap<T>
where
    T: Float,
{
    fn flux(&self, profile: &LimbDarkening<T>) -> T {
        let overlap = self.overlap_term();
        if !(overlap > T::zero()) {
            return T::one();
        }
        let intensity = profile.mean_intensity((self.z - self.p).abs(), T::one());
        T::one() - intensity * overlap / (T::four() * T::PI() * profile.omega())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn uniform() -> LimbDarkening<f64> {
        LimbDarkening::new(vec![1.0, 0.0], 1e-4).unwrap()
    }

    #[test]
    fn select_by_separation() {
        let p = 0.1;
        assert!(matches!(Regime::select(0.0, p), Regime::FullOverlap(_)));
        assert!(matches!(Regime::select(0.9, p), Regime::FullOverlap(_)));
        assert!(matches!(Regime::select(0.95, p), Regime::PartialOverlap(_)));
        assert!(matches!(Regime::select(1.1, p), Regime::PartialOverlap(_)));
        assert!(matches!(Regime::select(1.1 + 1e-9, p), Regime::NoOverlap(_)));
        assert!(matches!(Regime::select(20.0, p), Regime::NoOverlap(_)));
    }

    #[test]
    fn no_overlap_is_unity() {
        let ld = uniform();
        assert_eq!(Regime::select(1.5, 0.1).flux(&ld), 1.0);
        assert_eq!(OcclusionTrait::<f64>::flux(&NoOverlap, &ld), 1.0);
    }

    #[test]
    fn uniform_disk_full_overlap_depth() {
        let ld = uniform();
        let p = 0.1;
        for &z in &[0.0, 1e-16, 0.05, 0.3, 0.7, 0.9] {
            assert_relative_eq!(
                Regime::select(z, p).flux(&ld),
                1.0 - p * p,
                epsilon = 1e-12
            );
        }
    }

    /// Flux with the occulted intensity summed over a square grid covering the planet disk
    fn disk_grid_flux(ld: &LimbDarkening<f64>, z: f64, p: f64) -> f64 {
        const N: usize = 400;
        let h = 2.0 * p / N as f64;
        let mut occulted = 0.0;
        for i in 0..N {
            let x = z - p + (i as f64 + 0.5) * h;
            for j in 0..N {
                let y = -p + (j as f64 + 0.5) * h;
                if (x - z).powi(2) + y * y <= p * p {
                    occulted += ld.intensity(x.hypot(y));
                }
            }
        }
        1.0 - occulted * h * h / (4.0 * std::f64::consts::PI * ld.omega())
    }

    #[test]
    fn limb_darkened_full_overlap_matches_disk_sum() {
        let ld = LimbDarkening::new(vec![1.0, 0.3, 0.2], 1e-4).unwrap();
        let p = 0.1;
        // z < p: the planet covers the stellar center
        for &z in &[0.0, 0.03, 0.07, 0.5] {
            let flux = Regime::select(z, p).flux(&ld);
            assert!(matches!(Regime::select(z, p), Regime::FullOverlap(_)));
            assert_relative_eq!(flux, disk_grid_flux(&ld, z, p), epsilon = 5e-5);
        }
    }

    #[test]
    fn partial_overlap_is_continuous_at_contacts() {
        let ld = LimbDarkening::new(vec![1.0, 0.0, 0.6], 1e-5).unwrap();
        let p = 0.1;
        let inner = 1.0 - p;
        let full = Regime::select(inner, p).flux(&ld);
        let partial = PartialOverlap { z: inner + 1e-9, p }.flux(&ld);
        assert_relative_eq!(full, partial, epsilon = 1e-5);

        let outer = 1.0 + p;
        assert_eq!(PartialOverlap { z: outer, p }.overlap_term(), 0.0);
        assert_eq!(PartialOverlap { z: outer, p }.flux(&ld), 1.0);
    }

    #[test]
    fn partial_overlap_uniform_disk_is_area_fraction() {
        let ld = uniform();
        let p = 0.1;
        let z = 1.0;
        // half of the planet is on the disk
        let flux = Regime::select(z, p).flux(&ld);
        assert_relative_eq!(flux, 1.0 - 0.5 * p * p, epsilon = 1e-12);
    }

    #[test]
    fn flux_decreases_towards_ingress() {
        let ld = LimbDarkening::new(vec![1.0, 0.0, 0.6], 1e-4).unwrap();
        let p = 0.1;
        let fluxes: Vec<_> = [1.09, 1.05, 1.0, 0.95, 0.91]
            .iter()
            .map(|&z| Regime::select(z, p).flux(&ld))
            .collect();
        assert!(fluxes.windows(2).all(|w| w[1] < w[0]), "{fluxes:?}");
    }
}
