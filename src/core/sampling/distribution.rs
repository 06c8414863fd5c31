use crate::core::pbrt::*;

#[derive(Debug, Default, Clone)]
pub struct Distribution1D {
    pub func: Vec<Float>,
    pub cdf: Vec<Float>,
    pub func_int: Float,
    inv_count: Float,
}

#[inline(always)]
fn find_interval_cdf(cdf: &[Float], u: Float) -> usize {
    let mut first = 0usize;
    let mut len = cdf.len();
    while len > 0 {
        let half = len >> 1;
        let middle = first + half;
        if cdf[middle] <= u {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    let idx = first.saturating_sub(1);
    if idx > cdf.len() - 2 {
        cdf.len() - 2
    } else {
        idx
    }
}

impl Distribution1D {
    pub fn new(f: &[Float]) -> Self {
        let n = f.len();
        let func = Vec::from(f);
        let mut cdf = vec![0.0; n + 1];
        for i in 1..(n + 1) {
            cdf[i] = cdf[i - 1] + func[i - 1] / (n as Float);
        }
        let func_int = cdf[n];
        if func_int == 0.0 {
            for i in 1..(n + 1) {
                cdf[i] = (i as Float) / (n as Float);
            }
        } else {
            for i in 1..(n + 1) {
                cdf[i] /= func_int;
            }
        }
        Distribution1D {
            func,
            cdf,
            func_int,
            inv_count: 1.0 / (n as Float),
        }
    }

    pub fn count(&self) -> usize {
        return self.func.len();
    }

    /// Sum of the unnormalized weights.
    pub fn sum(&self) -> Float {
        return self.func_int * self.count() as Float;
    }

    //offset, pdf, remapped
    #[inline(always)]
    pub fn sample_discrete(&self, u: Float) -> (usize, Float, Float) {
        let offset = find_interval_cdf(&self.cdf, u);
        let cdf0 = self.cdf[offset];
        let cdf1 = self.cdf[offset + 1];
        let pdf = if self.func_int > 0.0 {
            self.func[offset] * self.inv_count / self.func_int
        } else {
            0.0
        };
        let remapped = (u - cdf0) / (cdf1 - cdf0);
        return (offset, pdf, remapped);
    }

    /// Zero for indices outside the support, so callers can query arbitrary bookkeeping.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        if index >= self.count() || self.func_int == 0.0 {
            return 0.0;
        }
        return self.func[index] / (self.func_int * self.count() as Float);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let d = Distribution1D::new(&[0.0, 1.0, 0.0, 3.0]);
        assert_eq!(d.sum(), 4.0);
        for i in 0..100 {
            let u = i as Float / 100.0;
            let (index, pdf, _) = d.sample_discrete(u);
            assert!(index == 1 || index == 3);
            assert!(pdf > 0.0);
        }
        assert_eq!(d.discrete_pdf(3), 0.75);
        assert_eq!(d.discrete_pdf(7), 0.0);
    }
}
