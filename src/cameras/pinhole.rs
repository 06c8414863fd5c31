use crate::core::pbrt::*;

use std::sync::Arc;

/// Pinhole sensor looking down `-vz`.
///
/// Raster coordinates live on `[0, 1]^2` with `y` pointing up. The direction sample `u`
/// is the raster coordinate itself, so `raster_position` inverts `sample_direction`.
pub struct PinholeSensor {
    we: Spectrum,
    fov: Float,
    position: Point3f,
    vx: Vector3f,
    vy: Vector3f,
    vz: Vector3f,
    film: Arc<Film>,
    aspect: Float,
}

impl PinholeSensor {
    pub fn new(
        eye: &Point3f,
        center: &Point3f,
        up: &Vector3f,
        fov_degrees: Float,
        film: &Arc<Film>,
    ) -> Self {
        let mut sensor = PinholeSensor::default();
        sensor.set_view(eye, center, up);
        sensor.fov = fov_degrees.to_radians();
        sensor.aspect = film.aspect();
        sensor.film = film.clone();
        return sensor;
    }

    fn set_view(&mut self, eye: &Point3f, center: &Point3f, up: &Vector3f) {
        self.position = *eye;
        self.vz = (*eye - *center).normalize();
        self.vx = Vector3f::cross(up, &self.vz).normalize();
        self.vy = Vector3f::cross(&self.vz, &self.vx);
    }

    fn to_eye(&self, wo: &Vector3f) -> Vector3f {
        return Vector3f::new(wo.dot(&self.vx), wo.dot(&self.vy), wo.dot(&self.vz));
    }

    /// `1 / (A cos^3)`, the importance and the density of the pinhole alike.
    fn importance(&self, wo: &Vector3f, geom: &SurfaceGeometry) -> Float {
        if self.raster_position(wo, geom).is_none() {
            return 0.0;
        }
        let wo_eye = self.to_eye(wo);
        let tan_fov = Float::tan(self.fov * 0.5);
        let inv_cos = -1.0 / local_cos(&wo_eye);
        let a = tan_fov * tan_fov * self.aspect * 4.0;
        return inv_cos * inv_cos * inv_cos / a;
    }
}

impl Default for PinholeSensor {
    fn default() -> Self {
        PinholeSensor {
            we: Spectrum::one(),
            fov: Float::to_radians(45.0),
            position: Point3f::zero(),
            vx: Vector3f::new(1.0, 0.0, 0.0),
            vy: Vector3f::new(0.0, 1.0, 0.0),
            vz: Vector3f::new(0.0, 0.0, 1.0),
            film: Arc::new(Film::new(1, 1)),
            aspect: 1.0,
        }
    }
}

impl Asset for PinholeSensor {
    fn load(
        &mut self,
        props: &PropertyNode,
        _assets: &AssetTable,
        _primitive: &PrimitiveDesc,
    ) -> Result<()> {
        self.we = props.get_spectrum("We", &self.we)?;
        let fov = props.get_float("fov", 45.0)?;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(MltError::invalid_property(
                props.name(),
                "fov must be in (0, 180)",
            ));
        }
        self.fov = fov.to_radians();
        let eye = props.get_vector("eye")?;
        let center = props.get_vector("center")?;
        let up = props
            .find_vector("up")?
            .unwrap_or(Vector3f::new(0.0, 1.0, 0.0));
        self.set_view(&eye, &center, &up);
        if self.vx.has_nans() || self.vz.has_nans() {
            return Err(MltError::invalid_property(
                props.name(),
                "degenerate view direction",
            ));
        }
        let width = props.get_int("width", 256)?;
        let height = props.get_int("height", 256)?;
        if width <= 0 || height <= 0 {
            return Err(MltError::invalid_property(
                props.name(),
                "film size must be positive",
            ));
        }
        self.film = Arc::new(Film::new(width as usize, height as usize));
        self.aspect = self.film.aspect();
        return Ok(());
    }
}

impl GeneralizedBsdf for PinholeSensor {
    fn get_type(&self) -> InteractionType {
        return INTERACTION_E;
    }

    fn sample_direction(
        &self,
        u: &Point2f,
        _u_comp: Float,
        _query_type: InteractionType,
        _geom: &SurfaceGeometry,
        _wi: &Vector3f,
    ) -> Option<Vector3f> {
        let raster = Point2f::new(2.0 * u.x - 1.0, 2.0 * u.y - 1.0);
        let tan_fov = Float::tan(self.fov * 0.5);
        let wo_eye =
            Vector3f::new(self.aspect * tan_fov * raster.x, tan_fov * raster.y, -1.0).normalize();
        return Some(self.vx * wo_eye.x + self.vy * wo_eye.y + self.vz * wo_eye.z);
    }

    fn evaluate_direction_pdf(
        &self,
        geom: &SurfaceGeometry,
        _query_type: InteractionType,
        _wi: &Vector3f,
        wo: &Vector3f,
        _eval_delta: bool,
    ) -> Float {
        return self.importance(wo, geom);
    }

    fn evaluate_direction(
        &self,
        geom: &SurfaceGeometry,
        _types: InteractionType,
        _wi: &Vector3f,
        wo: &Vector3f,
        _trans_dir: TransportDirection,
        _eval_delta: bool,
    ) -> Spectrum {
        return self.we * self.importance(wo, geom);
    }

    fn is_delta_direction(&self, _t: InteractionType) -> bool {
        return false;
    }

    fn sample_direction_inverse(
        &self,
        geom: &SurfaceGeometry,
        _wi: &Vector3f,
        wo: &Vector3f,
    ) -> Option<Point2f> {
        return self.raster_position(wo, geom);
    }
}

impl Emitter for PinholeSensor {
    fn as_bsdf(&self) -> &dyn GeneralizedBsdf {
        self
    }

    fn sample_position(&self, _u: &Point2f) -> SurfaceGeometry {
        return SurfaceGeometry::new_degenerated(&self.position);
    }

    fn evaluate_position_pdf(&self, _geom: &SurfaceGeometry, eval_delta: bool) -> Float {
        if eval_delta {
            1.0
        } else {
            0.0
        }
    }

    fn evaluate_position(&self, _geom: &SurfaceGeometry, eval_delta: bool) -> Spectrum {
        if eval_delta {
            Spectrum::one()
        } else {
            Spectrum::zero()
        }
    }

    fn is_delta_position(&self) -> bool {
        return true;
    }
}

impl Sensor for PinholeSensor {
    fn as_emitter(&self) -> &dyn Emitter {
        self
    }

    fn get_film(&self) -> Arc<Film> {
        return self.film.clone();
    }

    fn raster_position(&self, wo: &Vector3f, _geom: &SurfaceGeometry) -> Option<Point2f> {
        let wo_eye = self.to_eye(wo);
        if !(local_cos(&wo_eye) < 0.0) {
            return None;
        }
        let tan_fov = Float::tan(self.fov * 0.5);
        let raster = Point2f::new(
            (-wo_eye.x / wo_eye.z / tan_fov / self.aspect + 1.0) * 0.5,
            (-wo_eye.y / wo_eye.z / tan_fov + 1.0) * 0.5,
        );
        if !(0.0..=1.0).contains(&raster.x) || !(0.0..=1.0).contains(&raster.y) {
            return None;
        }
        return Some(raster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor() -> PinholeSensor {
        let film = Arc::new(Film::new(32, 16));
        return PinholeSensor::new(
            &Point3f::new(0.0, 1.0, 5.0),
            &Point3f::new(0.0, 1.0, 0.0),
            &Vector3f::new(0.0, 1.0, 0.0),
            45.0,
            &film,
        );
    }

    #[test]
    fn test_001() {
        let s = sensor();
        let geom = s.sample_position(&Point2f::zero());
        let u = Point2f::new(0.3, 0.7);
        let wo = s
            .sample_direction(&u, 0.0, INTERACTION_E, &geom, &Vector3f::zero())
            .unwrap();
        let raster = s.raster_position(&wo, &geom).unwrap();
        assert!((raster - u).length() < 1e-5);
        // Upper half of the raster looks up.
        assert!(wo.y > 0.0);

        let behind = Vector3f::new(0.0, 0.0, 1.0);
        assert!(s.raster_position(&behind, &geom).is_none());
        assert_eq!(
            s.evaluate_direction_pdf(&geom, INTERACTION_E, &Vector3f::zero(), &behind, false),
            0.0
        );
    }

    #[test]
    fn test_002() {
        // The importance integrates to one over the image plane.
        let s = sensor();
        let geom = s.sample_position(&Point2f::zero());
        let center = Vector3f::new(0.0, 0.0, -1.0);
        let tan_fov = Float::tan(Float::to_radians(45.0) * 0.5);
        let a = 4.0 * tan_fov * tan_fov * 2.0;
        let we = s.evaluate_direction(
            &geom,
            INTERACTION_E,
            &Vector3f::zero(),
            &center,
            TransportDirection::EyeToLight,
            false,
        );
        assert!((we.y() - 1.0 / a).abs() < 1e-5);
    }
}
