//! RGB ↔ CIE L\*a\*b\* conversion (sRGB primaries, D65 white).
//!
//! Planes are kept in the 8-bit-scaled convention: L is mapped from
//! [0, 100] to [0, 255], a and b are offset by +128. Plane values stay in
//! f32 between stages so chained filters only quantize once, on merge.

const XN: f32 = 0.950456;
const ZN: f32 = 1.088754;

/// Splits packed RGB into 8-bit-scaled L, a, b planes.
pub fn split_lab_planes(rgb: &[u8]) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    debug_assert_eq!(rgb.len() % 3, 0);
    let pixels = rgb.len() / 3;
    let mut l_plane = Vec::with_capacity(pixels);
    let mut a_plane = Vec::with_capacity(pixels);
    let mut b_plane = Vec::with_capacity(pixels);
    for px in rgb.chunks_exact(3) {
        let (l, a, b) = lab_pixel(px[0], px[1], px[2]);
        l_plane.push(l * 255.0 / 100.0);
        a_plane.push(a + 128.0);
        b_plane.push(b + 128.0);
    }
    (l_plane, a_plane, b_plane)
}

/// Recombines 8-bit-scaled L, a, b planes into packed RGB.
pub fn merge_lab_planes(l: &[f32], a: &[f32], b: &[f32]) -> Vec<u8> {
    debug_assert_eq!(l.len(), a.len());
    debug_assert_eq!(l.len(), b.len());
    let mut rgb = Vec::with_capacity(l.len() * 3);
    for i in 0..l.len() {
        let (r, g, bl) = rgb_pixel(l[i] * 100.0 / 255.0, a[i] - 128.0, b[i] - 128.0);
        rgb.push(r);
        rgb.push(g);
        rgb.push(bl);
    }
    rgb
}

/// L\*a\*b\* of one sRGB pixel, in the native ranges (L in [0, 100]).
pub fn lab_pixel(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = srgb_to_linear(r as f32 / 255.0);
    let g = srgb_to_linear(g as f32 / 255.0);
    let b = srgb_to_linear(b as f32 / 255.0);

    let x = 0.412453 * r + 0.357580 * g + 0.180423 * b;
    let y = 0.212671 * r + 0.715160 * g + 0.072169 * b;
    let z = 0.019334 * r + 0.119193 * g + 0.950227 * b;

    let fx = lab_f(x / XN);
    let fy = lab_f(y);
    let fz = lab_f(z / ZN);

    (116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// sRGB pixel for one L\*a\*b\* triple. Out-of-gamut values clamp.
pub fn rgb_pixel(l: f32, a: f32, b: f32) -> (u8, u8, u8) {
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let x = XN * lab_f_inv(fx);
    let y = lab_f_inv(fy);
    let z = ZN * lab_f_inv(fz);

    let r = 3.240479 * x - 1.537150 * y - 0.498535 * z;
    let g = -0.969256 * x + 1.875992 * y + 0.041556 * z;
    let bl = 0.055648 * x - 0.204043 * y + 1.057311 * z;

    (quantize(r), quantize(g), quantize(bl))
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn lab_f(t: f32) -> f32 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    let cubed = t * t * t;
    if cubed > 0.008856 {
        cubed
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

fn quantize(linear: f32) -> u8 {
    (linear_to_srgb(linear.clamp(0.0, 1.0)) * 255.0)
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_black_and_white_endpoints() {
        let (l, a, b) = lab_pixel(0, 0, 0);
        assert_abs_diff_eq!(l, 0.0, epsilon = 0.5);
        assert_abs_diff_eq!(a, 0.0, epsilon = 0.5);
        assert_abs_diff_eq!(b, 0.0, epsilon = 0.5);

        let (l, a, b) = lab_pixel(255, 255, 255);
        assert_abs_diff_eq!(l, 100.0, epsilon = 0.5);
        assert_abs_diff_eq!(a, 0.0, epsilon = 0.5);
        assert_abs_diff_eq!(b, 0.0, epsilon = 0.5);
    }

    #[test]
    fn test_grays_have_no_chroma() {
        for v in [32u8, 96, 160, 224] {
            let (_, a, b) = lab_pixel(v, v, v);
            assert_abs_diff_eq!(a, 0.0, epsilon = 0.5);
            assert_abs_diff_eq!(b, 0.0, epsilon = 0.5);
        }
    }

    #[test]
    fn test_primaries_land_in_expected_quadrants() {
        // Red: positive a. Green: negative a. Blue: negative b.
        let (_, a, _) = lab_pixel(255, 0, 0);
        assert!(a > 40.0);
        let (_, a, _) = lab_pixel(0, 255, 0);
        assert!(a < -40.0);
        let (_, _, b) = lab_pixel(0, 0, 255);
        assert!(b < -40.0);
    }

    #[rstest]
    #[case([0, 0, 0])]
    #[case([255, 255, 255])]
    #[case([255, 0, 0])]
    #[case([0, 255, 0])]
    #[case([0, 0, 255])]
    #[case([128, 64, 200])]
    #[case([17, 230, 99])]
    #[case([250, 128, 1])]
    fn test_pixel_round_trip(#[case] px: [u8; 3]) {
        let (l, a, b) = lab_pixel(px[0], px[1], px[2]);
        let (r, g, bl) = rgb_pixel(l, a, b);
        assert!((r as i32 - px[0] as i32).abs() <= 1, "r: {r} vs {}", px[0]);
        assert!((g as i32 - px[1] as i32).abs() <= 1, "g: {g} vs {}", px[1]);
        assert!((bl as i32 - px[2] as i32).abs() <= 1, "b: {bl} vs {}", px[2]);
    }

    #[test]
    fn test_plane_round_trip() {
        let rgb: Vec<u8> = (0..60).map(|i| (i * 4 + 3) as u8).collect();
        let (l, a, b) = split_lab_planes(&rgb);
        assert_eq!(l.len(), 20);
        let back = merge_lab_planes(&l, &a, &b);
        assert_eq!(back.len(), rgb.len());
        for (orig, round) in rgb.iter().zip(&back) {
            assert!((*orig as i32 - *round as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_scaled_planes_cover_eight_bit_range() {
        let (l, a, b) = split_lab_planes(&[255, 255, 255, 0, 0, 0]);
        assert_abs_diff_eq!(l[0], 255.0, epsilon = 1.0);
        assert_abs_diff_eq!(l[1], 0.0, epsilon = 1.0);
        assert_abs_diff_eq!(a[0], 128.0, epsilon = 1.0);
        assert_abs_diff_eq!(b[1], 128.0, epsilon = 1.0);
    }
}
