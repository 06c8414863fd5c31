use super::subpath::Subpath;
use crate::core::pbrt::*;
use std::sync::Arc;

/// One interaction on a light transport path.
///
/// `ty` holds the interaction bits the vertex was sampled with. Endpoints carry
/// `INTERACTION_L` or `INTERACTION_E`; interior vertices carry the scattering bits of
/// their primitive. Directions are never stored: they are recomputed from the neighbours.
#[derive(Clone)]
pub struct PathVertex {
    pub ty: InteractionType,
    pub geom: SurfaceGeometry,
    pub primitive: Arc<Primitive>,
}

impl PathVertex {
    pub fn new(ty: InteractionType, geom: &SurfaceGeometry, primitive: &Arc<Primitive>) -> Self {
        PathVertex {
            ty,
            geom: *geom,
            primitive: primitive.clone(),
        }
    }

    #[inline]
    pub fn surface(&self) -> Option<&dyn GeneralizedBsdf> {
        return self.primitive.surface(self.ty);
    }

    #[inline]
    pub fn emitter(&self) -> Option<&dyn Emitter> {
        return self.primitive.emitter(self.ty);
    }

    /// Type of the primitive the vertex lies on, regardless of how it was sampled.
    #[inline]
    pub fn primitive_type(&self) -> InteractionType {
        return self.primitive.get_type();
    }

    /// Unit direction toward `other`, or the zero vector when there is no such vertex.
    #[inline]
    pub fn direction_to(&self, other: Option<&PathVertex>) -> Vector3f {
        match other {
            Some(o) => (o.geom.p - self.geom.p).normalize(),
            None => Vector3f::zero(),
        }
    }

    pub fn evaluate_direction(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        trans_dir: TransportDirection,
        eval_delta: bool,
    ) -> Spectrum {
        match self.surface() {
            Some(s) => s.evaluate_direction(&self.geom, self.ty, wi, wo, trans_dir, eval_delta),
            None => Spectrum::zero(),
        }
    }

    pub fn evaluate_direction_pdf(&self, wi: &Vector3f, wo: &Vector3f, eval_delta: bool) -> Float {
        match self.surface() {
            Some(s) => s.evaluate_direction_pdf(&self.geom, self.ty, wi, wo, eval_delta),
            None => 0.0,
        }
    }

    pub fn evaluate_position(&self, eval_delta: bool) -> Spectrum {
        match self.emitter() {
            Some(e) => e.evaluate_position(&self.geom, eval_delta),
            None => Spectrum::zero(),
        }
    }

    pub fn evaluate_position_pdf(&self, eval_delta: bool) -> Float {
        match self.emitter() {
            Some(e) => e.evaluate_position_pdf(&self.geom, eval_delta),
            None => 0.0,
        }
    }

    fn is_delta_position(&self) -> bool {
        return self.emitter().map(|e| e.is_delta_position()).unwrap_or(false);
    }

    fn is_delta_direction(&self) -> bool {
        return self
            .surface()
            .map(|s| s.is_delta_direction(self.ty))
            .unwrap_or(false);
    }
}

/// Light transport path ordered from the light (index 0) to the sensor (index n-1).
#[derive(Clone, Default)]
pub struct Path {
    pub vertices: Vec<PathVertex>,
}

impl Path {
    pub fn new(vertices: Vec<PathVertex>) -> Self {
        Path { vertices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.vertices.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.vertices.is_empty();
    }

    /// Heckbert-style signature such as `LDSE`.
    pub fn path_type(&self) -> String {
        return self
            .vertices
            .iter()
            .map(|v| interaction_type_char(v.ty))
            .collect();
    }

    /// Joins the first `s` vertices of `subpath_l` with the first `t` vertices of
    /// `subpath_e`. An empty side requires the other one to end on an emitter of the
    /// matching kind, which is then re-tagged as the endpoint.
    pub fn connect_subpaths(
        &mut self,
        scene: &dyn Scene,
        subpath_l: &Subpath,
        subpath_e: &Subpath,
        s: usize,
        t: usize,
    ) -> bool {
        self.vertices.clear();
        if s == 0 && t == 0 {
            return false;
        }
        if s > subpath_l.vertices.len() || t > subpath_e.vertices.len() {
            return false;
        }
        if s == 0 {
            self.vertices
                .extend(subpath_e.vertices[..t].iter().rev().cloned());
            let front = &mut self.vertices[0];
            if (front.primitive_type() & INTERACTION_L) == 0 {
                return false;
            }
            front.ty = INTERACTION_L;
        } else if t == 0 {
            self.vertices.extend(subpath_l.vertices[..s].iter().cloned());
            let back = &mut self.vertices[s - 1];
            if (back.primitive_type() & INTERACTION_E) == 0 {
                return false;
            }
            back.ty = INTERACTION_E;
        } else {
            let v_l = &subpath_l.vertices[s - 1];
            let v_e = &subpath_e.vertices[t - 1];
            if v_l.geom.infinite || v_e.geom.infinite {
                return false;
            }
            if !scene.visible(&v_l.geom.p, &v_e.geom.p) {
                return false;
            }
            self.vertices.extend(subpath_l.vertices[..s].iter().cloned());
            self.vertices
                .extend(subpath_e.vertices[..t].iter().rev().cloned());
        }
        return true;
    }

    #[inline]
    fn index(&self, i: usize, trans_dir: TransportDirection) -> usize {
        match trans_dir {
            TransportDirection::LightToEye => i,
            TransportDirection::EyeToLight => self.vertices.len() - 1 - i,
        }
    }

    /// Vertex `i` counted from the end `trans_dir` starts at.
    fn vertex_from(&self, i: isize, trans_dir: TransportDirection) -> Option<&PathVertex> {
        if i < 0 || i as usize >= self.vertices.len() {
            return None;
        }
        return Some(&self.vertices[self.index(i as usize, trans_dir)]);
    }

    /// Measurement contribution evaluated as if the path had been sampled with `s`
    /// light vertices. Delta lobes away from the connection contribute their coefficient.
    pub fn evaluate_f(&self, s: usize) -> Spectrum {
        let n = self.vertices.len();
        if n < 2 || s > n {
            return Spectrum::zero();
        }
        let t = n - s;

        let mut f_l = Spectrum::one();
        if s > 0 {
            f_l = self.vertices[0].evaluate_position(true);
            for i in 0..(s - 1) {
                let v = &self.vertices[i];
                let v_prev = if i >= 1 { Some(&self.vertices[i - 1]) } else { None };
                let v_next = &self.vertices[i + 1];
                let wi = v.direction_to(v_prev);
                let wo = v.direction_to(Some(v_next));
                f_l *= v.evaluate_direction(&wi, &wo, TransportDirection::LightToEye, true);
                f_l *= geometry_term(&v.geom, &v_next.geom);
            }
        }
        if f_l.is_black() {
            return Spectrum::zero();
        }

        let mut f_e = Spectrum::one();
        if t > 0 {
            f_e = self.vertices[n - 1].evaluate_position(true);
            for i in ((s + 1)..n).rev() {
                let v = &self.vertices[i];
                let v_prev = &self.vertices[i - 1];
                let v_next = if i < n - 1 { Some(&self.vertices[i + 1]) } else { None };
                let wi = v.direction_to(v_next);
                let wo = v.direction_to(Some(v_prev));
                f_e *= v.evaluate_direction(&wi, &wo, TransportDirection::EyeToLight, true);
                f_e *= geometry_term(&v.geom, &v_prev.geom);
            }
        }
        if f_e.is_black() {
            return Spectrum::zero();
        }

        let cst = self.evaluate_cst(s);
        return f_l * cst * f_e;
    }

    /// Connection term `c_{s,t}`. It vanishes whenever the connection touches a delta
    /// position or a delta lobe, since such paths cannot be sampled this way.
    pub fn evaluate_cst(&self, s: usize) -> Spectrum {
        let n = self.vertices.len();
        if n < 2 || s > n {
            return Spectrum::zero();
        }
        let t = n - s;
        if s == 0 {
            let v = &self.vertices[0];
            let wo = v.direction_to(Some(&self.vertices[1]));
            return v.evaluate_position(false)
                * v.evaluate_direction(
                    &Vector3f::zero(),
                    &wo,
                    TransportDirection::EyeToLight,
                    true,
                );
        }
        if t == 0 {
            let v = &self.vertices[n - 1];
            let wo = v.direction_to(Some(&self.vertices[n - 2]));
            return v.evaluate_position(false)
                * v.evaluate_direction(
                    &Vector3f::zero(),
                    &wo,
                    TransportDirection::LightToEye,
                    true,
                );
        }
        let v_l = &self.vertices[s - 1];
        let v_e = &self.vertices[s];
        let v_l_prev = if s >= 2 { Some(&self.vertices[s - 2]) } else { None };
        let v_e_next = self.vertices.get(s + 1);
        let fs_l = v_l.evaluate_direction(
            &v_l.direction_to(v_l_prev),
            &v_l.direction_to(Some(v_e)),
            TransportDirection::LightToEye,
            false,
        );
        let fs_e = v_e.evaluate_direction(
            &v_e.direction_to(v_e_next),
            &v_e.direction_to(Some(v_l)),
            TransportDirection::EyeToLight,
            false,
        );
        let g = geometry_term(&v_l.geom, &v_e.geom);
        return fs_l * g * fs_e;
    }

    /// Throughput `alpha` of the first `l` vertices counted from the light end
    /// (`LightToEye`) or the eye end (`EyeToLight`).
    pub fn evaluate_alpha(&self, scene: &dyn Scene, l: usize, trans_dir: TransportDirection) -> Spectrum {
        if l == 0 {
            return Spectrum::one();
        }
        let n = self.vertices.len();
        if l > n {
            return Spectrum::zero();
        }
        let v0 = &self.vertices[self.index(0, trans_dir)];
        let pdf_p = v0.evaluate_position_pdf(true) * scene.evaluate_emitter_pdf(&v0.primitive);
        let mut alpha = v0.evaluate_position(true) / pdf_p;
        for i in 0..(l - 1) {
            let v = &self.vertices[self.index(i, trans_dir)];
            let v_prev = self.vertex_from(i as isize - 1, trans_dir);
            let v_next = self.vertex_from(i as isize + 1, trans_dir);
            let wi = v.direction_to(v_prev);
            let wo = v.direction_to(v_next);
            let fs = v.evaluate_direction(&wi, &wo, trans_dir, true);
            if fs.is_black() {
                return Spectrum::zero();
            }
            alpha *= fs / v.evaluate_direction_pdf(&wi, &wo, true);
        }
        return alpha;
    }

    /// Product-area density of generating the path with `s` light vertices and `n - s`
    /// eye vertices. Zero when that technique cannot produce the path.
    pub fn evaluate_path_pdf(&self, scene: &dyn Scene, s: usize) -> Float {
        let n = self.vertices.len();
        if n < 2 || s > n {
            return 0.0;
        }
        let t = n - s;

        if s == 0 {
            if self.vertices[0].is_delta_position() {
                return 0.0;
            }
        } else if t == 0 {
            if self.vertices[n - 1].is_delta_position() {
                return 0.0;
            }
        } else if self.vertices[s - 1].is_delta_direction() || self.vertices[s].is_delta_direction() {
            return 0.0;
        }

        let mut pdf = 1.0;
        if s > 0 {
            let v0 = &self.vertices[0];
            pdf *= v0.evaluate_position_pdf(true) * scene.evaluate_emitter_pdf(&v0.primitive);
            for i in 0..(s - 1) {
                let v = &self.vertices[i];
                let v_prev = if i >= 1 { Some(&self.vertices[i - 1]) } else { None };
                let v_next = &self.vertices[i + 1];
                let p = v.evaluate_direction_pdf(
                    &v.direction_to(v_prev),
                    &v.direction_to(Some(v_next)),
                    true,
                );
                pdf *= convert_to_area(p, &v.geom, &v_next.geom);
            }
        }
        if t > 0 {
            let v_e = &self.vertices[n - 1];
            pdf *= v_e.evaluate_position_pdf(true) * scene.evaluate_emitter_pdf(&v_e.primitive);
            for i in ((s + 1)..n).rev() {
                let v = &self.vertices[i];
                let v_prev = &self.vertices[i - 1];
                let v_next = self.vertices.get(i + 1);
                let p = v.evaluate_direction_pdf(
                    &v.direction_to(v_next),
                    &v.direction_to(Some(v_prev)),
                    true,
                );
                pdf *= convert_to_area(p, &v.geom, &v_prev.geom);
            }
        }
        return pdf;
    }

    /// `C*_{s,t} = alpha_L(s) c_{s,t} alpha_E(t)`, i.e. `f / p` for technique `s`.
    pub fn evaluate_unweight_contribution(&self, scene: &dyn Scene, s: usize) -> Spectrum {
        let n = self.vertices.len();
        if n < 2 || s > n {
            return Spectrum::zero();
        }
        let t = n - s;
        let alpha_l = self.evaluate_alpha(scene, s, TransportDirection::LightToEye);
        if alpha_l.is_black() {
            return Spectrum::zero();
        }
        let alpha_e = self.evaluate_alpha(scene, t, TransportDirection::EyeToLight);
        if alpha_e.is_black() {
            return Spectrum::zero();
        }
        let cst = self.evaluate_cst(s);
        if cst.is_black() {
            return Spectrum::zero();
        }
        return alpha_l * cst * alpha_e;
    }

    /// Product of the delta coefficients of vertices `begin..end`, counted from the end
    /// `trans_dir` starts at.
    pub fn evaluate_specular_reflectances(
        &self,
        begin: usize,
        end: usize,
        trans_dir: TransportDirection,
    ) -> Spectrum {
        let mut prod = Spectrum::one();
        for i in begin..end {
            let v = match self.vertex_from(i as isize, trans_dir) {
                Some(v) => v,
                None => return Spectrum::zero(),
            };
            let v_prev = self.vertex_from(i as isize - 1, trans_dir);
            let v_next = self.vertex_from(i as isize + 1, trans_dir);
            let wi = v.direction_to(v_prev);
            let wo = v.direction_to(v_next);
            prod *= v.evaluate_direction(&wi, &wo, trans_dir, true);
        }
        return prod;
    }

    /// Measurement contribution with every delta coefficient included, evaluated through
    /// the first technique able to sample the path.
    pub fn evaluate_measurement(&self, scene: &dyn Scene) -> Spectrum {
        for s in 0..=self.vertices.len() {
            if self.evaluate_path_pdf(scene, s) > 0.0 {
                return self.evaluate_f(s);
            }
        }
        return Spectrum::zero();
    }

    /// Number of techniques `s` with a positive path density.
    pub fn num_samplable_techniques(&self, scene: &dyn Scene) -> usize {
        return (0..=self.vertices.len())
            .filter(|s| self.evaluate_path_pdf(scene, *s) > 0.0)
            .count();
    }

    /// Raster position of the sensor vertex, if the path ends on a sensor that sees it.
    pub fn raster_position(&self) -> Option<Point2f> {
        let n = self.vertices.len();
        if n < 2 {
            return None;
        }
        let v = &self.vertices[n - 1];
        let sensor = v.primitive.sensor.as_ref()?;
        let wo = v.direction_to(Some(&self.vertices[n - 2]));
        return sensor.raster_position(&wo, &v.geom);
    }
}
