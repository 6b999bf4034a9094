//! Color packing and the few fixed colors the renderer uses.
//!
//! Packed colors are `0xAARRGGBB` words (ARGB8888), the layout the
//! presentation texture expects.

/// Four channels in the 0-255 range: red, green, blue, alpha.
pub type Rgba = [f32; 4];

/// Opaque black, the cleared framebuffer color.
pub const BACKGROUND: u32 = 0xFF00_0000;

/// Pack four 0-255 channels into one ARGB8888 word. Each channel is clamped
/// to [0, 255] and truncated toward zero.
#[inline]
pub fn pack_rgba(color: Rgba) -> u32 {
    let [r, g, b, a] = color.map(|c| c.clamp(0.0, 255.0) as u32);
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Split an ARGB8888 word back into `[r, g, b, a]` bytes.
#[inline]
pub fn unpack_rgba(color: u32) -> [u8; 4] {
    [
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    ]
}

/// Scale the RGB channels by `intensity`, leaving alpha untouched.
#[inline]
pub fn scale_rgb(color: Rgba, intensity: f32) -> Rgba {
    [
        color[0] * intensity,
        color[1] * intensity,
        color[2] * intensity,
        color[3],
    ]
}

/// Convert HSL (all components in [0, 1]) to 0-255 RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l * 255.0; 3];
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        v * 255.0
    };

    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn packs_argb() {
        assert_eq!(pack_rgba([255.0, 0.0, 0.0, 255.0]), 0xFFFF_0000);
        assert_eq!(pack_rgba([0.0, 0.0, 0.0, 255.0]), BACKGROUND);
        assert_eq!(pack_rgba([0x12 as f32, 0x34 as f32, 0x56 as f32, 0x78 as f32]), 0x7812_3456);
    }

    #[test]
    fn pack_clamps_and_truncates() {
        assert_eq!(pack_rgba([300.0, -5.0, 127.9, 255.0]), 0xFFFF_007F);
    }

    #[test]
    fn unpack_inverts_pack() {
        assert_eq!(unpack_rgba(0x80C0_4020), [0xC0, 0x40, 0x20, 0x80]);
    }

    #[test]
    fn scale_keeps_alpha() {
        assert_eq!(scale_rgb([200.0, 100.0, 50.0, 255.0], 0.5), [100.0, 50.0, 25.0, 255.0]);
    }

    #[test]
    fn hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert_relative_eq!(red[0], 255.0, epsilon = 1e-3);
        assert_relative_eq!(red[1], 0.0, epsilon = 1e-3);
        assert_relative_eq!(red[2], 0.0, epsilon = 1e-3);

        let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
        assert_relative_eq!(green[1], 255.0, epsilon = 1e-3);
        assert_relative_eq!(green[0], 0.0, epsilon = 1e-3);

        let grey = hsl_to_rgb(0.7, 0.0, 0.5);
        assert_eq!(grey, [127.5; 3]);
    }
}
