use super::distribution::Distribution1D;
use crate::core::pbrt::*;

/// Discrete distribution on `[min, max]` whose mass decays geometrically on both sides
/// of `center`: `p(i) ∝ base^-|i - center|`.
#[derive(Debug, Clone)]
pub struct TwoTailedGeometricDist {
    base: Float,
    min: i32,
    max: i32,
    dist: Distribution1D,
}

impl TwoTailedGeometricDist {
    pub fn new(base: Float, center: i32, min: i32, max: i32) -> Self {
        let max = i32::max(min, max);
        let weights: Vec<Float> = (min..=max)
            .map(|i| base.powi(-(i - center).abs()))
            .collect();
        TwoTailedGeometricDist {
            base,
            min,
            max,
            dist: Distribution1D::new(&weights),
        }
    }

    pub fn base(&self) -> Float {
        return self.base;
    }

    pub fn sample(&self, u: Float) -> i32 {
        let (offset, _, _) = self.dist.sample_discrete(u);
        return self.min + offset as i32;
    }

    pub fn pdf(&self, i: i32) -> Float {
        if i < self.min || i > self.max {
            return 0.0;
        }
        return self.dist.discrete_pdf((i - self.min) as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let d = TwoTailedGeometricDist::new(2.0, 4, 2, 10);
        let sum: Float = (2..=10).map(|i| d.pdf(i)).sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(d.pdf(4) > d.pdf(3));
        assert_eq!(d.pdf(3), d.pdf(5));
        assert_eq!(d.pdf(1), 0.0);
        assert_eq!(d.pdf(11), 0.0);
    }
}
