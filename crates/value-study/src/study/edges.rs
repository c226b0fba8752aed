//! Laplacian edge strength over a single-channel buffer.

/// 4-neighbour discrete Laplacian.
///
/// ```text
///     0 -1  0
///    -1  4 -1
///     0 -1  0
/// ```
pub const LAPLACIAN: [[i32; 3]; 3] = [[0, -1, 0], [-1, 4, -1], [0, -1, 0]];

/// Absolute Laplacian response per pixel, clamped to `0..=255`.
///
/// Only interior pixels are convolved; the outermost ring stays 0 (no
/// padding, reflection or clamping of the kernel window). Images narrower
/// or shorter than 3 pixels have no interior and come back all zero.
pub fn edge_strengths(luminance: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(luminance.len(), width * height);

    let mut edges = vec![0u8; width * height];
    if width < 3 || height < 3 {
        return edges;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = 0i32;
            for (ky, row) in LAPLACIAN.iter().enumerate() {
                let sy = y + ky - 1;
                for (kx, &weight) in row.iter().enumerate() {
                    if weight != 0 {
                        let sx = x + kx - 1;
                        sum += luminance[sy * width + sx] as i32 * weight;
                    }
                }
            }
            edges[y * width + x] = sum.unsigned_abs().min(255) as u8;
        }
    }

    edges
}
