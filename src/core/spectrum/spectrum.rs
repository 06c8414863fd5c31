use super::coefficient::CoefficientSpectrum;

#[cfg(all(feature = "sampled-spectrum", feature = "mono-spectrum"))]
compile_error!("features \"sampled-spectrum\" and \"mono-spectrum\" are mutually exclusive");

pub const SAMPLED_LAMBDA_START: usize = 400;
pub const SAMPLED_LAMBDA_END: usize = 700;
pub const N_SPECTRAL_SAMPLES: usize = 16;

pub type RGBSpectrum = CoefficientSpectrum<3>;
pub type SampledSpectrum = CoefficientSpectrum<N_SPECTRAL_SAMPLES>;
pub type MonoSpectrum = CoefficientSpectrum<1>;

#[cfg(not(any(feature = "sampled-spectrum", feature = "mono-spectrum")))]
pub type Spectrum = RGBSpectrum;

#[cfg(feature = "sampled-spectrum")]
pub type Spectrum = SampledSpectrum;

#[cfg(feature = "mono-spectrum")]
pub type Spectrum = MonoSpectrum;
