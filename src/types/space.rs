//! Colourspace conversions.
//!
//! All conversions implement the standard documented formulas: sRGB gamma
//! thresholds 0.04045 (decode) / 0.0031308 (encode), the D65 white point
//! (95.047, 100.000, 108.883) for CIE Lab, and BT.601 luminance weights.
//! Round-trips through any space stay within ±1 per 8-bit channel.

/// BT.601 luminance of an RGB triple, in [0, 255].
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Convert RGB to HSL: hue in [0, 360), saturation and lightness in [0, 1].
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    (hue_of(rf, gf, bf, max, d), s, l)
}

/// Convert HSL back to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    if s <= 0.0 {
        let v = to_channel(l);
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hn = h / 360.0;

    (
        to_channel(hue_to_channel(p, q, hn + 1.0 / 3.0)),
        to_channel(hue_to_channel(p, q, hn)),
        to_channel(hue_to_channel(p, q, hn - 1.0 / 3.0)),
    )
}

/// Convert RGB to HSV: hue in [0, 360), saturation and value in [0, 1].
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let d = max - min;

    let s = if max == 0.0 { 0.0 } else { d / max };
    let h = if d == 0.0 {
        0.0
    } else {
        hue_of(rf, gf, bf, max, d)
    };

    (h, s, max)
}

/// Convert HSV back to RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    if s <= 0.0 {
        let c = to_channel(v);
        return (c, c, c);
    }

    let sector = (h / 60.0).rem_euclid(6.0);
    let i = sector.floor();
    let f = sector - i;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (rf, gf, bf) = match i as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (to_channel(rf), to_channel(gf), to_channel(bf))
}

/// A colour in CIE Lab space (D65 white point).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    /// Squared Euclidean distance between two Lab colours.
    pub fn distance_sq(self, other: Lab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

// D65 reference white.
const WHITE_X: f32 = 95.047;
const WHITE_Y: f32 = 100.000;
const WHITE_Z: f32 = 108.883;

/// Convert RGB to CIE Lab.
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab {
    let rl = srgb_decode(r);
    let gl = srgb_decode(g);
    let bl = srgb_decode(b);

    let x = (0.4124 * rl + 0.3576 * gl + 0.1805 * bl) * 100.0;
    let y = (0.2126 * rl + 0.7152 * gl + 0.0722 * bl) * 100.0;
    let z = (0.0193 * rl + 0.1192 * gl + 0.9505 * bl) * 100.0;

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y / WHITE_Y);
    let fz = lab_f(z / WHITE_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert CIE Lab back to RGB, clamping out-of-gamut channels.
pub fn lab_to_rgb(lab: Lab) -> (u8, u8, u8) {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let x = lab_f_inv(fx) * WHITE_X / 100.0;
    let y = lab_f_inv(fy) * WHITE_Y / 100.0;
    let z = lab_f_inv(fz) * WHITE_Z / 100.0;

    let rl = 3.2406 * x - 1.5372 * y - 0.4986 * z;
    let gl = -0.9689 * x + 1.8758 * y + 0.0415 * z;
    let bl = 0.0557 * x - 0.2040 * y + 1.0570 * z;

    (
        to_channel(srgb_encode(rl)),
        to_channel(srgb_encode(gl)),
        to_channel(srgb_encode(bl)),
    )
}

/// sRGB gamma decode to linear light.
fn srgb_decode(u: u8) -> f32 {
    let c = u as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light to sRGB gamma encode.
fn srgb_encode(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.0031308 {
        12.92 * c
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

/// Shared hue sector calculation for HSL and HSV.
fn hue_of(rf: f32, gf: f32, bf: f32, max: f32, d: f32) -> f32 {
    let h = if max == rf {
        (gf - bf) / d + if gf < bf { 6.0 } else { 0.0 }
    } else if max == gf {
        (bf - rf) / d + 2.0
    } else {
        (rf - gf) / d + 4.0
    };
    (h * 60.0).rem_euclid(360.0)
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
