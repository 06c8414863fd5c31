use crate::core::pbrt::Float;
use std::ops;

#[derive(Debug, PartialEq, Default, Copy, Clone)]
pub struct Vector2 {
    pub x: Float,
    pub y: Float,
}

impl Vector2 {
    pub fn new(x: Float, y: Float) -> Self {
        Vector2 { x, y }
    }

    #[inline]
    pub fn zero() -> Self {
        Vector2 { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> Float {
        return self.x * rhs.x + self.y * rhs.y;
    }

    #[inline]
    pub fn length_squared(&self) -> Float {
        return self.dot(self);
    }

    #[inline]
    pub fn length(&self) -> Float {
        return self.length_squared().sqrt();
    }
}

impl ops::Index<usize> for Vector2 {
    type Output = Float;
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            _ => &self.y,
        }
    }
}

impl ops::IndexMut<usize> for Vector2 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        match i {
            0 => &mut self.x,
            _ => &mut self.y,
        }
    }
}

impl ops::Add<Vector2> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub<Vector2> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Mul<Float> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Float) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl ops::Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}
