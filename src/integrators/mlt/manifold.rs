use super::path::PathVertex;
use crate::core::pbrt::*;
use log::*;
use nalgebra as na;

pub type Mat2 = na::Matrix2<Float>;
pub type Vec2 = na::Vector2<Float>;

const MAX_BETA: Float = 100.0;
const WALK_EPSILON: Float = 1e-4;
const MAX_WALK_ITERATIONS: usize = 50;

/// Derivatives of the half-vector constraint at one specular vertex with respect to the
/// tangent-plane coordinates of the previous (`a`), the current (`b`) and the next (`c`)
/// vertex. Rows are the constraint components, columns the `(u, v)` coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexConstraintJacobian {
    pub a: Mat2,
    pub b: Mat2,
    pub c: Mat2,
}

impl Default for VertexConstraintJacobian {
    fn default() -> Self {
        VertexConstraintJacobian {
            a: Mat2::zeros(),
            b: Mat2::zeros(),
            c: Mat2::zeros(),
        }
    }
}

pub type ConstraintJacobian = Vec<VertexConstraintJacobian>;

#[inline]
fn mat2(m00: Float, m01: Float, m10: Float, m11: Float) -> Mat2 {
    return Mat2::new(m00, m01, m10, m11);
}

/// Blocks of the constraint Jacobian of `path`, one entry per interior vertex.
pub fn compute_constraint_jacobian(path: &[PathVertex]) -> ConstraintJacobian {
    let n = path.len();
    if n < 3 {
        return Vec::new();
    }
    let mut nabla_c = vec![VertexConstraintJacobian::default(); n - 2];
    for i in 1..(n - 1) {
        let x = &path[i].geom;
        let xp = &path[i - 1].geom;
        let xn = &path[i + 1].geom;

        let wi = (xp.p - x.p).normalize();
        let wo = (xn.p - x.p).normalize();
        let refracted = x.sn.dot(&wi) * x.sn.dot(&wo) < 0.0;
        let eta = match path[i].surface() {
            Some(s) if refracted => 1.0 / s.eta(x, &wi),
            _ => 1.0,
        };
        let h_raw = wi + wo * eta;
        let inv_hl = 1.0 / h_raw.length();
        let h = h_raw * inv_hl;

        let inv_wi_l = 1.0 / (xp.p - x.p).length();
        let inv_wo_l = 1.0 / (xn.p - x.p).length();

        let dot_h_n = x.sn.dot(&h);
        let dot_h_dndu = x.dndu.dot(&h);
        let dot_h_dndv = x.dndv.dot(&h);
        let dot_u_n = x.dpdu.dot(&x.sn);
        let dot_v_n = x.dpdv.dot(&x.sn);

        let s = x.dpdu - x.sn * dot_u_n;
        let t = x.dpdv - x.sn * dot_v_n;

        let a = inv_wi_l * inv_hl;
        let b = inv_wo_l * inv_hl * eta;

        let project = |d: Vector3f| -> Vector3f { d - h * d.dot(&h) };

        let block = &mut nabla_c[i - 1];
        {
            let tu = (xp.dpdu - wi * wi.dot(&xp.dpdu)) * a;
            let tv = (xp.dpdv - wi * wi.dot(&xp.dpdv)) * a;
            let dhdu = project(tu);
            let dhdv = project(tv);
            block.a = mat2(dhdu.dot(&s), dhdv.dot(&s), dhdu.dot(&t), dhdv.dot(&t));
        }
        {
            let tu = -x.dpdu * (a + b) + wi * (wi.dot(&x.dpdu) * a) + wo * (wo.dot(&x.dpdu) * b);
            let tv = -x.dpdv * (a + b) + wi * (wi.dot(&x.dpdv) * a) + wo * (wo.dot(&x.dpdv) * b);
            let dhdu = project(tu);
            let dhdv = project(tv);
            block.b = mat2(
                dhdu.dot(&s) - x.dpdu.dot(&x.dndu) * dot_h_n - dot_u_n * dot_h_dndu,
                dhdv.dot(&s) - x.dpdu.dot(&x.dndv) * dot_h_n - dot_u_n * dot_h_dndv,
                dhdu.dot(&t) - x.dpdv.dot(&x.dndu) * dot_h_n - dot_v_n * dot_h_dndu,
                dhdv.dot(&t) - x.dpdv.dot(&x.dndv) * dot_h_n - dot_v_n * dot_h_dndv,
            );
        }
        {
            let tu = (xn.dpdu - wo * wo.dot(&xn.dpdu)) * b;
            let tv = (xn.dpdv - wo * wo.dot(&xn.dpdv)) * b;
            let dhdu = project(tu);
            let dhdv = project(tv);
            block.c = mat2(dhdu.dot(&s), dhdv.dot(&s), dhdu.dot(&t), dhdv.dot(&t));
        }
    }
    return nabla_c;
}

/// Dense form of the block-tridiagonal constraint matrix over the interior vertices.
fn assemble(nabla_c: &ConstraintJacobian) -> na::DMatrix<Float> {
    let m = nabla_c.len();
    let mut a = na::DMatrix::<Float>::zeros(2 * m, 2 * m);
    for (i, block) in nabla_c.iter().enumerate() {
        if i > 0 {
            a.fixed_slice_mut::<2, 2>(2 * i, 2 * (i - 1)).copy_from(&block.a);
        }
        a.fixed_slice_mut::<2, 2>(2 * i, 2 * i).copy_from(&block.b);
        if i + 1 < m {
            a.fixed_slice_mut::<2, 2>(2 * i, 2 * (i + 1)).copy_from(&block.c);
        }
    }
    return a;
}

/// `|det(P A^-1 C_last)|`: the area distortion between the first specular vertex and the
/// far endpoint of the chain. Zero for singular configurations.
pub fn compute_constraint_jacobian_determinant(path: &[PathVertex]) -> Float {
    let n = path.len();
    if n < 3 {
        return 0.0;
    }
    let nabla_c = compute_constraint_jacobian(path);
    let inv_a = match assemble(&nabla_c).try_inverse() {
        Some(m) => m,
        None => return 0.0,
    };
    let k = 2 * (n - 3);
    let inv_a_0n: Mat2 = inv_a.fixed_slice::<2, 2>(0, k).into_owned();
    let m = inv_a_0n * nabla_c[n - 3].c;
    return Float::abs(m.determinant());
}

/// Solves the block-tridiagonal system `nabla_c W = V` by block LU decomposition.
pub fn solve_block_linear_eq(nabla_c: &ConstraintJacobian, v: &[Vec2]) -> Option<Vec<Vec2>> {
    let n = nabla_c.len();
    if n == 0 || v.len() != n {
        return None;
    }

    let mut l = vec![Mat2::zeros(); n];
    let mut u = vec![Mat2::zeros(); n];
    u[0] = nabla_c[0].b;
    for i in 1..n {
        l[i] = nabla_c[i].a * u[i - 1].try_inverse()?;
        u[i] = nabla_c[i].b - l[i] * nabla_c[i - 1].c;
    }

    let mut vp = vec![Vec2::zeros(); n];
    vp[0] = v[0];
    for i in 1..n {
        vp[i] = v[i] - l[i] * vp[i - 1];
    }

    let mut w = vec![Vec2::zeros(); n];
    w[n - 1] = u[n - 1].try_inverse()? * vp[n - 1];
    for i in (0..(n - 1)).rev() {
        w[i] = u[i].try_inverse()? * (vp[i] - nabla_c[i].c * w[i + 1]);
    }
    return Some(w);
}

/// Dense LU solve of the same system.
pub fn solve_linear_eq(nabla_c: &ConstraintJacobian, v: &[Vec2]) -> Option<Vec<Vec2>> {
    let n = nabla_c.len();
    if n == 0 || v.len() != n {
        return None;
    }
    let a = assemble(nabla_c);
    let mut b = na::DVector::<Float>::zeros(2 * n);
    for (i, vi) in v.iter().enumerate() {
        b[2 * i] = vi.x;
        b[2 * i + 1] = vi.y;
    }
    let x = a.lu().solve(&b)?;
    return Some((0..n).map(|i| Vec2::new(x[2 * i], x[2 * i + 1])).collect());
}

/// Re-traces `curr` from its first vertex through the point `p`, following the specular
/// chain. Every interior vertex must land on a specular primitive and the last one on a
/// non-specular primitive.
fn propagate(scene: &dyn Scene, curr: &[PathVertex], p: &Point3f) -> Option<Vec<PathVertex>> {
    let n = curr.len();
    let mut next: Vec<PathVertex> = Vec::with_capacity(n);
    next.push(curr[0].clone());
    for i in 1..n {
        let vp = &next[i - 1];
        let wo = if i == 1 {
            (*p - vp.geom.p).normalize()
        } else {
            let vpp = &next[i - 2];
            let wi = vp.direction_to(Some(vpp));
            vp.surface()?
                .sample_direction(&Point2f::zero(), 0.0, vp.ty, &vp.geom, &wi)?
        };
        let ray = Ray::new(&vp.geom.p, &wo);
        let isect = scene.intersect(&ray)?;
        let specular = is_specular(isect.primitive.get_type());
        if i <= n - 2 && !specular {
            return None;
        }
        if i == n - 1 && specular {
            return None;
        }
        let ty = isect.primitive.get_type() & !INTERACTION_EMITTER;
        next.push(PathVertex::new(ty, &isect.geom, &isect.primitive));
    }
    return Some(next);
}

/// Moves the far endpoint of `seed` (an `L S+ D` chain) onto `target` while keeping every
/// specular constraint satisfied. Returns the converged chain, or `None`.
pub fn walk_manifold(scene: &dyn Scene, seed: &[PathVertex], target: &Point3f) -> Option<Vec<PathVertex>> {
    let n = seed.len();
    if n < 3 {
        return None;
    }
    let mut curr: Vec<PathVertex> = seed.to_vec();
    let mut beta = MAX_BETA;

    for _ in 0..MAX_WALK_ITERATIONS {
        let nabla_c = compute_constraint_jacobian(&curr);

        let l = curr
            .iter()
            .fold(0.0, |acc: Float, v| Float::max(acc, v.geom.p.length()));
        let xn = &curr[n - 1].geom;
        if (xn.p - *target).length() < WALK_EPSILON * l {
            return Some(curr);
        }

        let d = *target - xn.p;
        let mut v = vec![Vec2::zeros(); n - 2];
        v[n - 3] = nabla_c[n - 3].c * Vec2::new(xn.dpdu.dot(&d), xn.dpdv.dot(&d));
        let w = solve_linear_eq(&nabla_c, &v)?;

        let x1 = &curr[1].geom;
        let p = x1.p - (x1.dpdu * w[0].x + x1.dpdv * w[0].y) * beta;

        let next = propagate(scene, &curr, &p);
        let improved = match next.as_ref() {
            Some(next) => {
                let dc = (curr[n - 1].geom.p - *target).length_squared();
                let dn = (next[n - 1].geom.p - *target).length_squared();
                dn < dc
            }
            None => false,
        };
        match next {
            Some(next) if improved => {
                beta = clamp(beta * 2.0, -MAX_BETA, MAX_BETA);
                curr = next;
            }
            _ => {
                beta *= -0.5;
            }
        }
    }
    debug!("Manifold walk did not converge");
    return None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let nabla_c: ConstraintJacobian = vec![
            VertexConstraintJacobian {
                a: Mat2::zeros(),
                b: mat2(2.0, 0.5, 0.0, 1.5),
                c: mat2(0.3, 0.0, 0.1, 0.2),
            },
            VertexConstraintJacobian {
                a: mat2(0.2, 0.1, 0.0, 0.4),
                b: mat2(1.8, 0.0, 0.3, 2.2),
                c: mat2(0.1, 0.2, 0.0, 0.1),
            },
            VertexConstraintJacobian {
                a: mat2(0.5, 0.0, 0.2, 0.3),
                b: mat2(2.5, 0.4, 0.0, 1.9),
                c: Mat2::zeros(),
            },
        ];
        let v = vec![Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(0.5, -1.0)];
        let w_block = solve_block_linear_eq(&nabla_c, &v).unwrap();
        let w_dense = solve_linear_eq(&nabla_c, &v).unwrap();
        for i in 0..3 {
            assert!((w_block[i] - w_dense[i]).norm() < 1e-4);
        }
    }
}
