//! Non-local-means denoising over a single plane.
//!
//! Fast variant: for every search-window shift, the plane of squared
//! differences is integrated once, which turns each per-pixel patch
//! distance into four table lookups. Patches are truncated at the plane
//! border and shifted samples clamp to the nearest edge pixel, so the
//! boundary policy is deterministic.

/// Denoises one plane. `template_window` and `search_window` are side
/// lengths and must be odd; `strength` is the filter strength `h`.
pub fn denoise_plane(
    src: &[f32],
    width: usize,
    height: usize,
    strength: f32,
    template_window: usize,
    search_window: usize,
) -> Vec<f32> {
    debug_assert_eq!(src.len(), width * height);
    debug_assert!(template_window % 2 == 1, "template window must be odd");
    debug_assert!(search_window % 2 == 1, "search window must be odd");
    debug_assert!(strength > 0.0);

    if width == 0 || height == 0 {
        return Vec::new();
    }

    let t_half = (template_window / 2) as isize;
    let s_half = (search_window / 2) as isize;
    let h2 = strength * strength;
    let n = width * height;

    let mut accum = vec![0.0f32; n];
    let mut weight_sum = vec![0.0f32; n];
    let mut diff = vec![0.0f32; n];
    let mut integral = vec![0.0f64; (width + 1) * (height + 1)];

    let clamp_x = |x: isize| x.clamp(0, width as isize - 1) as usize;
    let clamp_y = |y: isize| y.clamp(0, height as isize - 1) as usize;

    for dy in -s_half..=s_half {
        for dx in -s_half..=s_half {
            for y in 0..height {
                let sy = clamp_y(y as isize + dy);
                for x in 0..width {
                    let sx = clamp_x(x as isize + dx);
                    let d = src[y * width + x] - src[sy * width + sx];
                    diff[y * width + x] = d * d;
                }
            }
            integrate(&diff, width, height, &mut integral);

            for y in 0..height {
                let y0 = (y as isize - t_half).max(0) as usize;
                let y1 = clamp_y(y as isize + t_half);
                let sy = clamp_y(y as isize + dy);
                for x in 0..width {
                    let x0 = (x as isize - t_half).max(0) as usize;
                    let x1 = clamp_x(x as isize + t_half);
                    let sx = clamp_x(x as isize + dx);
                    let area = ((y1 - y0 + 1) * (x1 - x0 + 1)) as f32;
                    let ssd = window_sum(&integral, width, x0, y0, x1, y1) as f32;
                    let weight = (-(ssd / area) / h2).exp();
                    let i = y * width + x;
                    accum[i] += weight * src[sy * width + sx];
                    weight_sum[i] += weight;
                }
            }
        }
    }

    // The zero shift contributes weight 1, so the sum is never zero.
    accum
        .iter()
        .zip(&weight_sum)
        .map(|(&a, &w)| a / w)
        .collect()
}

/// Summed-area table with a zeroed top row and left column.
fn integrate(plane: &[f32], width: usize, height: usize, integral: &mut [f64]) {
    let stride = width + 1;
    for cell in integral.iter_mut().take(stride) {
        *cell = 0.0;
    }
    for y in 0..height {
        let mut row = 0.0f64;
        integral[(y + 1) * stride] = 0.0;
        for x in 0..width {
            row += plane[y * width + x] as f64;
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row;
        }
    }
}

/// Inclusive rectangle sum over the integral table.
fn window_sum(integral: &[f64], width: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
    let stride = width + 1;
    integral[(y1 + 1) * stride + x1 + 1] - integral[y0 * stride + x1 + 1]
        - integral[(y1 + 1) * stride + x0]
        + integral[y0 * stride + x0]
}
