//! Linear-segmented color maps and value normalization.

use std::sync::OnceLock;

use plotters::style::RGBColor;

/// A control point `(x, value_below, value_above)` of one color channel.
///
/// Between two points the channel ramps linearly from `value_above` of the
/// left point to `value_below` of the right one.
pub type Segment = (f64, f64, f64);

/// Lookup-table resolution used when none is given.
pub const DEFAULT_LUT_SIZE: usize = 256;

/// Closed value range mapped onto the full color map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub low: f64,
    pub high: f64,
}

impl ColorScale {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Position of `v` in the scale; 0 for a zero-width scale.
    /// NaN in either the value or the bounds yields NaN.
    pub fn normalize(&self, v: f64) -> f64 {
        if v.is_nan() {
            return f64::NAN;
        }
        if self.low == self.high {
            return 0.0;
        }
        (v - self.low) / (self.high - self.low)
    }
}

#[derive(Debug, Clone)]
pub struct LinearSegmentedColormap {
    name: String,
    lut: Vec<RGBColor>,
}

impl LinearSegmentedColormap {
    pub fn new(
        name: impl Into<String>,
        red: &[Segment],
        green: &[Segment],
        blue: &[Segment],
        lut_size: usize,
    ) -> Self {
        let lut_size = lut_size.max(2);
        let lut = (0..lut_size)
            .map(|i| {
                let x = i as f64 / (lut_size - 1) as f64;
                RGBColor(
                    channel_byte(sample_channel(red, x)),
                    channel_byte(sample_channel(green, x)),
                    channel_byte(sample_channel(blue, x)),
                )
            })
            .collect();
        Self {
            name: name.into(),
            lut,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lut_size(&self) -> usize {
        self.lut.len()
    }

    /// Color at normalized position `t`; out-of-range positions clamp to the
    /// end colors. NaN is the "bad" value and has no color.
    pub fn color_at(&self, t: f64) -> Option<RGBColor> {
        if t.is_nan() {
            return None;
        }
        let n = self.lut.len();
        let idx = if t < 0.0 {
            0
        } else if t >= 1.0 {
            n - 1
        } else {
            ((t * n as f64) as usize).min(n - 1)
        };
        Some(self.lut[idx])
    }

    pub fn map_value(&self, v: f64, scale: ColorScale) -> Option<RGBColor> {
        self.color_at(scale.normalize(v))
    }
}

/// White-to-red ramp: red stays at full, green and blue fall from 1 to 0.
pub fn red_map() -> &'static LinearSegmentedColormap {
    static RED_MAP: OnceLock<LinearSegmentedColormap> = OnceLock::new();
    RED_MAP.get_or_init(|| {
        LinearSegmentedColormap::new(
            "Redmap",
            &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
            &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
            &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
            DEFAULT_LUT_SIZE,
        )
    })
}

fn sample_channel(segments: &[Segment], x: f64) -> f64 {
    let Some(&(x0, _, first)) = segments.first() else {
        return 0.0;
    };
    if x <= x0 {
        return first;
    }
    for pair in segments.windows(2) {
        let (xa, _, ya) = pair[0];
        let (xb, yb, _) = pair[1];
        if x <= xb {
            if xb <= xa {
                return yb;
            }
            return ya + (x - xa) / (xb - xa) * (yb - ya);
        }
    }
    segments.last().map_or(0.0, |&(_, below, _)| below)
}

fn channel_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
