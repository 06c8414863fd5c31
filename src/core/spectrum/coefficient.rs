use crate::core::pbrt::Float;
use std::ops;

const YWEIGHT: [Float; 3] = [0.212671, 0.715160, 0.072169];

/// Fixed-width radiometric quantity.
///
/// `N == 3` is an RGB triple, `N == 1` a monochrome value and any other width a set of
/// equally spaced wavelength bands ordered from short to long wavelengths. None of the
/// arithmetic checks for finiteness: NaN and infinity flow through unchanged and are
/// filtered by whoever accumulates the result.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct CoefficientSpectrum<const N: usize> {
    c: [Float; N],
}

impl<const N: usize> CoefficientSpectrum<N> {
    pub const N_SAMPLES: usize = N;

    #[inline]
    pub fn new(v: Float) -> Self {
        CoefficientSpectrum { c: [v; N] }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(0.0)
    }

    #[inline]
    pub fn one() -> Self {
        Self::new(1.0)
    }

    pub fn from_slice(v: &[Float]) -> Self {
        let mut c = [0.0; N];
        c.copy_from_slice(v);
        CoefficientSpectrum { c }
    }

    /// Band range `[begin, end)` that projects onto display channel `ch` (0 red, 2 blue).
    fn band_range(ch: usize) -> (usize, usize) {
        // Bands are ordered from short to long wavelength, so blue comes first.
        let k = 2 - ch;
        let begin = (k * N) / 3;
        let end = ((k + 1) * N) / 3;
        return (begin, usize::max(end, begin + 1).min(N));
    }

    pub fn from_rgb(rgb: &[Float; 3]) -> Self {
        match N {
            1 => {
                return Self::new(YWEIGHT[0] * rgb[0] + YWEIGHT[1] * rgb[1] + YWEIGHT[2] * rgb[2]);
            }
            3 => {
                return Self::from_slice(rgb);
            }
            _ => {
                let mut c = [0.0; N];
                for ch in 0..3 {
                    let (b, e) = Self::band_range(ch);
                    for v in c[b..e].iter_mut() {
                        *v = rgb[ch];
                    }
                }
                return CoefficientSpectrum { c };
            }
        }
    }

    pub fn to_rgb(&self) -> [Float; 3] {
        let c = &self.c;
        match N {
            1 => {
                return [c[0], c[0], c[0]];
            }
            3 => {
                return [c[0], c[1], c[2]];
            }
            _ => {
                let mut rgb = [0.0; 3];
                for ch in 0..3 {
                    let (b, e) = Self::band_range(ch);
                    let sum: Float = c[b..e].iter().sum();
                    rgb[ch] = sum / (e - b) as Float;
                }
                return rgb;
            }
        }
    }

    /// Luminance, used as the scalar contribution of a path.
    pub fn y(&self) -> Float {
        if N == 1 {
            return self.c[0];
        }
        let rgb = self.to_rgb();
        return YWEIGHT[0] * rgb[0] + YWEIGHT[1] * rgb[1] + YWEIGHT[2] * rgb[2];
    }

    pub fn max_component_value(&self) -> Float {
        let c = &self.c;
        let mut m = c[0];
        for i in 1..N {
            m = Float::max(m, c[i]);
        }
        return m;
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        return self.c.iter().all(|x| *x == 0.0);
    }

    pub fn has_nans(&self) -> bool {
        return self.c.iter().any(|x| x.is_nan());
    }

    pub fn is_valid(&self) -> bool {
        return self.c.iter().all(|x| x.is_finite());
    }

    pub fn sqrt(&self) -> Self {
        let mut c = self.c;
        for v in c.iter_mut() {
            *v = v.sqrt();
        }
        CoefficientSpectrum { c }
    }

    #[inline]
    pub fn len(&self) -> usize {
        return N;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return N == 0;
    }
}

impl<const N: usize> Default for CoefficientSpectrum<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<Float> for CoefficientSpectrum<N> {
    fn from(v: Float) -> Self {
        Self::new(v)
    }
}

impl<const N: usize> ops::Index<usize> for CoefficientSpectrum<N> {
    type Output = Float;
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl<const N: usize> ops::IndexMut<usize> for CoefficientSpectrum<N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

macro_rules! impl_binary_op {
    ($tr:ident, $f:ident, $atr:ident, $af:ident, $op:tt) => {
        impl<const N: usize> ops::$tr<CoefficientSpectrum<N>> for CoefficientSpectrum<N> {
            type Output = CoefficientSpectrum<N>;
            #[inline]
            fn $f(self, rhs: CoefficientSpectrum<N>) -> Self::Output {
                let mut c = self.c;
                for i in 0..N {
                    c[i] = c[i] $op rhs.c[i];
                }
                CoefficientSpectrum { c }
            }
        }

        impl<const N: usize> ops::$tr<Float> for CoefficientSpectrum<N> {
            type Output = CoefficientSpectrum<N>;
            #[inline]
            fn $f(self, rhs: Float) -> Self::Output {
                let mut c = self.c;
                for v in c.iter_mut() {
                    *v = *v $op rhs;
                }
                CoefficientSpectrum { c }
            }
        }

        impl<const N: usize> ops::$atr<CoefficientSpectrum<N>> for CoefficientSpectrum<N> {
            #[inline]
            fn $af(&mut self, rhs: CoefficientSpectrum<N>) {
                *self = *self $op rhs;
            }
        }

        impl<const N: usize> ops::$atr<Float> for CoefficientSpectrum<N> {
            #[inline]
            fn $af(&mut self, rhs: Float) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, +);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, -);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, *);
impl_binary_op!(Div, div, DivAssign, div_assign, /);

impl<const N: usize> ops::Mul<CoefficientSpectrum<N>> for Float {
    type Output = CoefficientSpectrum<N>;
    #[inline]
    fn mul(self, rhs: CoefficientSpectrum<N>) -> Self::Output {
        rhs * self
    }
}

impl<const N: usize> ops::Neg for CoefficientSpectrum<N> {
    type Output = CoefficientSpectrum<N>;
    #[inline]
    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let a = CoefficientSpectrum::<3>::from_rgb(&[0.25, 0.5, 1.0]);
        assert_eq!(a.to_rgb(), [0.25, 0.5, 1.0]);
        let m = CoefficientSpectrum::<1>::new(0.5);
        assert_eq!(m.to_rgb(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_002() {
        let s = CoefficientSpectrum::<16>::from_rgb(&[1.0, 0.0, 0.0]);
        let rgb = s.to_rgb();
        assert_eq!(rgb, [1.0, 0.0, 0.0]);
        // short wavelengths carry blue
        assert_eq!(s[0], 0.0);
        assert_eq!(s[15], 1.0);
    }
}
