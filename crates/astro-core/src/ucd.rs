//! UCD1+ electromagnetic-spectrum vocabulary and wavelength binning.

/// UCD words accepted for photometry filters and spectral regimes.
pub const VOCABULARY: &[&str] = &[
    "em.gamma",
    "em.X-ray",
    "em.UV",
    "em.UV.10-50nm",
    "em.UV.50-100nm",
    "em.UV.100-200nm",
    "em.UV.200-300nm",
    "em.opt",
    "em.opt.U",
    "em.opt.B",
    "em.opt.V",
    "em.opt.R",
    "em.opt.I",
    "em.IR",
    "em.IR.NIR",
    "em.IR.J",
    "em.IR.H",
    "em.IR.K",
    "em.IR.3-4um",
    "em.IR.4-8um",
    "em.IR.MIR",
    "em.IR.8-15um",
    "em.IR.15-30um",
    "em.IR.30-60um",
    "em.IR.60-100um",
    "em.IR.FIR",
    "em.mm",
    "em.radio",
];

/// Upper edge (inclusive, in angstroms) of each filter band and its UCD.
/// The lower edge of a bin is the upper edge of the previous one, exclusive.
const BINS: &[(f64, &str)] = &[
    (4_000.0, "em.opt.U"),
    (5_000.0, "em.opt.B"),
    (6_000.0, "em.opt.V"),
    (7_500.0, "em.opt.R"),
    (10_000.0, "em.opt.I"),
    (15_000.0, "em.IR.J"),
    (20_000.0, "em.IR.H"),
    (30_000.0, "em.IR.K"),
    (40_000.0, "em.IR.3-4um"),
    (80_000.0, "em.IR.4-8um"),
    (150_000.0, "em.IR.8-15um"),
    (300_000.0, "em.IR.15-30um"),
];

const LOWEST_EDGE: f64 = 3_000.0;

#[must_use]
pub fn is_known(word: &str) -> bool {
    VOCABULARY.contains(&word)
}

/// Coarse band of a filter with the given effective wavelength in angstroms.
///
/// `None` outside `(3000, 300000]`.
#[must_use]
pub fn assign(effective_wavelength_angstroms: f64) -> Option<&'static str> {
    if effective_wavelength_angstroms.is_nan() || effective_wavelength_angstroms <= LOWEST_EDGE {
        return None;
    }
    BINS.iter()
        .find(|(upper, _)| effective_wavelength_angstroms <= *upper)
        .map(|(_, ucd)| *ucd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3_500.0, Some("em.opt.U"))]
    #[case(4_000.0, Some("em.opt.U"))]
    #[case(4_000.1, Some("em.opt.B"))]
    #[case(5_500.0, Some("em.opt.V"))]
    #[case(6_500.0, Some("em.opt.R"))]
    #[case(8_000.0, Some("em.opt.I"))]
    #[case(12_350.0, Some("em.IR.J"))]
    #[case(16_620.0, Some("em.IR.H"))]
    #[case(21_590.0, Some("em.IR.K"))]
    #[case(33_526.0, Some("em.IR.3-4um"))]
    #[case(46_028.0, Some("em.IR.4-8um"))]
    #[case(115_608.0, Some("em.IR.8-15um"))]
    #[case(220_883.0, Some("em.IR.15-30um"))]
    #[case(300_000.0, Some("em.IR.15-30um"))]
    fn wavelengths_fall_into_bands(#[case] wavelength: f64, #[case] expected: Option<&str>) {
        assert_eq!(assign(wavelength), expected);
    }

    #[rstest]
    #[case(3_000.0)]
    #[case(1_500.0)]
    #[case(300_000.5)]
    #[case(f64::NAN)]
    fn wavelengths_outside_bins_are_unknown(#[case] wavelength: f64) {
        assert_eq!(assign(wavelength), None);
    }

    #[test]
    fn every_assigned_band_is_in_vocabulary() {
        assert!(BINS.iter().all(|(_, ucd)| is_known(ucd)));
    }
}
