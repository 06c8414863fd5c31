use crate::core::pbrt::*;
use log::*;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Default, Copy, Clone)]
struct Pixel {
    pub rgb: [f64; 3],
}

/// Accumulation target owned by a sensor.
///
/// Splats are given in raster coordinates on `[0, 1]^2`; the engine itself never touches
/// the film, only the chain driver does.
pub struct Film {
    pub width: usize,
    pub height: usize,
    pixels: Mutex<Vec<Pixel>>,
}

impl Film {
    pub fn new(width: usize, height: usize) -> Self {
        let width = usize::max(1, width);
        let height = usize::max(1, height);
        Film {
            width,
            height,
            pixels: Mutex::new(vec![Pixel::default(); width * height]),
        }
    }

    pub fn aspect(&self) -> Float {
        return self.width as Float / self.height as Float;
    }

    pub fn add_splat(&self, raster: &Point2f, l: &Spectrum) {
        if !l.is_valid() {
            debug!("Ignoring non-finite splat at {:?}", raster);
            return;
        }
        let x = (raster.x * self.width as Float) as isize;
        let y = (raster.y * self.height as Float) as isize;
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return;
        }
        let rgb = l.to_rgb();
        if let Ok(mut pixels) = self.pixels.lock() {
            let pixel = &mut pixels[y as usize * self.width + x as usize];
            for i in 0..3 {
                pixel.rgb[i] += rgb[i] as f64;
            }
        }
    }

    pub fn clear(&self) {
        if let Ok(mut pixels) = self.pixels.lock() {
            pixels.iter_mut().for_each(|p| *p = Pixel::default());
        }
    }

    /// Sum over all pixels, per channel.
    pub fn total(&self) -> [f64; 3] {
        let mut sum = [0.0; 3];
        if let Ok(pixels) = self.pixels.lock() {
            for p in pixels.iter() {
                for i in 0..3 {
                    sum[i] += p.rgb[i];
                }
            }
        }
        return sum;
    }

    /// Writes the accumulated splats scaled by `scale` as an 8-bit sRGB image.
    pub fn write_image(&self, path: &Path, scale: Float) -> Result<()> {
        let pixels = self
            .pixels
            .lock()
            .map_err(|_| MltError::error("film pixels are poisoned"))?;
        let mut buf = Vec::with_capacity(self.width * self.height * 3);
        // raster y points up, image rows go down
        for row in pixels.chunks(self.width).rev() {
            for p in row.iter() {
                for i in 0..3 {
                    let v = (p.rgb[i] * scale as f64) as Float;
                    buf.push(to_byte(gamma_correct(v)));
                }
            }
        }
        let img = image::RgbImage::from_raw(self.width as u32, self.height as u32, buf)
            .ok_or_else(|| MltError::error("film size does not match pixel buffer"))?;
        img.save(path)?;
        info!("Wrote {}", path.display());
        return Ok(());
    }
}

fn gamma_correct(v: Float) -> Float {
    if v <= 0.0031308 {
        return 12.92 * v;
    }
    return 1.055 * Float::powf(v, 1.0 / 2.4) - 0.055;
}

fn to_byte(v: Float) -> u8 {
    return Float::clamp(v * 255.0 + 0.5, 0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let film = Film::new(4, 2);
        film.add_splat(&Point2f::new(0.1, 0.1), &Spectrum::one());
        film.add_splat(&Point2f::new(1.5, 0.1), &Spectrum::one());
        film.add_splat(&Point2f::new(0.1, 0.1), &(Spectrum::one() * Float::NAN));
        let total = film.total();
        assert_eq!(total[0], 1.0);
        assert_eq!(film.aspect(), 2.0);
    }
}
