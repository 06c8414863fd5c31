use crate::core::pbrt::Float;
use std::ops;

#[derive(Debug, PartialEq, Default, Copy, Clone)]
pub struct Vector3 {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Vector3 {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Vector3 { x, y, z }
    }

    #[inline]
    pub fn zero() -> Self {
        Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn abs(&self) -> Self {
        Vector3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> Float {
        return self.x * rhs.x + self.y * rhs.y + self.z * rhs.z;
    }

    #[inline]
    pub fn abs_dot(&self, rhs: &Self) -> Float {
        return self.dot(rhs).abs();
    }

    #[inline]
    pub fn length_squared(&self) -> Float {
        return self.dot(self);
    }

    #[inline]
    pub fn length(&self) -> Float {
        return self.length_squared().sqrt();
    }

    /// A zero vector normalizes to NaNs; callers that can see one must check.
    #[inline]
    pub fn normalize(&self) -> Self {
        let l = self.length();
        return *self * (1.0 / l);
    }

    #[inline]
    pub fn distance_squared(a: &Self, b: &Self) -> Float {
        return (*a - *b).length_squared();
    }

    #[inline]
    pub fn distance(a: &Self, b: &Self) -> Float {
        return (*a - *b).length();
    }

    #[inline]
    pub fn cross(v1: &Self, v2: &Self) -> Self {
        Vector3::new(
            v1.y * v2.z - v1.z * v2.y,
            v1.z * v2.x - v1.x * v2.z,
            v1.x * v2.y - v1.y * v2.x,
        )
    }

    #[inline]
    pub fn max_component(&self) -> Float {
        return Float::max(self.x, Float::max(self.y, self.z));
    }

    pub fn has_nans(&self) -> bool {
        return self.x.is_nan() || self.y.is_nan() || self.z.is_nan();
    }
}

impl ops::Index<usize> for Vector3 {
    type Output = Float;
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl ops::Add<Vector3> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl ops::AddAssign<Vector3> for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl ops::Sub<Vector3> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl ops::Mul<Float> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: Float) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl ops::Mul<Vector3> for Float {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}

impl ops::Div<Float> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn div(self, rhs: Float) -> Vector3 {
        let inv = 1.0 / rhs;
        Vector3::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl ops::Neg for Vector3 {
    type Output = Vector3;
    #[inline]
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        let z = Vector3::cross(&x, &y);
        assert_eq!(z, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(&y), 0.0);
    }

    #[test]
    fn test_002() {
        let v = Vector3::zero().normalize();
        assert!(v.has_nans());
    }
}
