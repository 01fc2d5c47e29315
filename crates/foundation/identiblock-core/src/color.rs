//! Color Deriver - Digest → HLS → RGB
//!
//! Uses the last seven hex characters of the digest:
//! - `[25, 28)`: hue, 0..=4095 scaled to [0, 1)
//! - `[28, 30)`: saturation, mapped onto [0.45, 0.65]
//! - `[30, 32)`: lightness, mapped onto [0.55, 0.75]

use crate::digest::Digest;
use serde::{Deserialize, Serialize};

const HUE: std::ops::Range<usize> = 25..28;
const SATURATION: std::ops::Range<usize> = 28..30;
const LIGHTNESS: std::ops::Range<usize> = 30..32;

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Hue / lightness / saturation, each a fraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hls {
    pub hue: f64,
    pub lightness: f64,
    pub saturation: f64,
}

impl Hls {
    pub fn from_digest(digest: &Digest) -> Self {
        let hue = f64::from(digest.slice_value(HUE)) / 4095.0;
        let saturation = (65.0 - f64::from(digest.slice_value(SATURATION)) * 20.0 / 255.0) / 100.0;
        let lightness = (75.0 - f64::from(digest.slice_value(LIGHTNESS)) * 20.0 / 255.0) / 100.0;

        Self {
            hue,
            lightness,
            saturation,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        hls_to_rgb(self.hue, self.lightness, self.saturation)
    }
}

/// Normalized RGB, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn from_digest(digest: &Digest) -> Self {
        let hls = Hls::from_digest(digest);
        let rgb = hls.to_rgb();
        tracing::debug!(%digest, ?hls, ?rgb, "derived color");
        rgb
    }

    /// 8-bit channels, rounded
    pub fn to_bytes(&self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// RGBA with opaque alpha, the form material inputs expect
    pub fn with_alpha(&self) -> [f64; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// Standard piecewise HLS → RGB conversion.
///
/// Argument order is (hue, lightness, saturation). Swapping the last two
/// produces a different color.
pub fn hls_to_rgb(hue: f64, lightness: f64, saturation: f64) -> Rgb {
    if saturation == 0.0 {
        return Rgb {
            r: lightness,
            g: lightness,
            b: lightness,
        };
    }

    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;

    Rgb {
        r: channel(m1, m2, hue + ONE_THIRD),
        g: channel(m1, m2, hue),
        b: channel(m1, m2, hue - ONE_THIRD),
    }
}

fn channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{derive_digest, Identity};

    const EPS: f64 = 1e-12;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_known_hls() {
        let digest = Digest::parse("b295bf8043975e176de44c2617751f8b").unwrap();
        let hls = Hls::from_digest(&digest);
        assert!(close(hls.hue, 0.4661782661782662));
        assert!(close(hls.saturation, 0.625686274509804));
        assert!(close(hls.lightness, 0.6409803921568628));
    }

    #[test]
    fn test_known_rgb() {
        let digest = Digest::parse("b295bf8043975e176de44c2617751f8b").unwrap();
        let rgb = Rgb::from_digest(&digest);
        assert!(close(rgb.r, 0.4163467512495196), "r = {}", rgb.r);
        assert!(close(rgb.g, 0.8656140330642059), "g = {}", rgb.g);
        assert!(close(rgb.b, 0.7744440425421049), "b = {}", rgb.b);
        assert_eq!(rgb.to_bytes(), [106, 221, 197]);
        assert_eq!(rgb.to_hex(), "#6addc5");
    }

    #[test]
    fn test_argument_order_matters() {
        let digest = Digest::parse("b295bf8043975e176de44c2617751f8b").unwrap();
        let hls = Hls::from_digest(&digest);
        let right = hls_to_rgb(hls.hue, hls.lightness, hls.saturation);
        let swapped = hls_to_rgb(hls.hue, hls.saturation, hls.lightness);
        assert_ne!(right, swapped);
        assert_eq!(right, hls.to_rgb());
    }

    #[test]
    fn test_zero_identity_color() {
        let rgb = Rgb::from_digest(&derive_digest(Identity::from(0)));
        assert!(close(rgb.r, 0.33840042291426387));
        assert!(close(rgb.g, 0.5435877718206438));
        assert!(close(rgb.b, 0.8196387927720108));
    }

    #[test]
    fn test_grey_and_primary() {
        assert_eq!(hls_to_rgb(0.0, 0.5, 0.0), Rgb { r: 0.5, g: 0.5, b: 0.5 });
        let green = hls_to_rgb(1.0 / 3.0, 0.5, 1.0);
        assert!(close(green.r, 0.0));
        assert!(close(green.g, 1.0));
        assert!(close(green.b, 0.0));
    }

    #[test]
    fn test_range_extremes() {
        let low = Digest::parse("00000000000000000000000000000000").unwrap();
        let hls = Hls::from_digest(&low);
        assert_eq!(hls.hue, 0.0);
        assert!(close(hls.saturation, 0.65));
        assert!(close(hls.lightness, 0.75));

        let high = Digest::parse("ffffffffffffffffffffffffffffffff").unwrap();
        let hls = Hls::from_digest(&high);
        assert!(close(hls.hue, 1.0));
        assert!(close(hls.saturation, 0.45));
        assert!(close(hls.lightness, 0.55));
    }

    #[test]
    fn test_ranges_across_identities() {
        for id in 0u64..2000 {
            let digest = derive_digest(Identity::from(id));
            let hls = Hls::from_digest(&digest);
            assert!((0.0..=1.0).contains(&hls.hue));
            assert!((0.45 - EPS..=0.65 + EPS).contains(&hls.saturation));
            assert!((0.55 - EPS..=0.75 + EPS).contains(&hls.lightness));

            let rgb = hls.to_rgb();
            for c in [rgb.r, rgb.g, rgb.b] {
                assert!((0.0..=1.0).contains(&c), "identity {} channel {}", id, c);
            }
        }
    }

    #[test]
    fn test_with_alpha() {
        let rgb = Rgb { r: 0.1, g: 0.2, b: 0.3 };
        assert_eq!(rgb.with_alpha(), [0.1, 0.2, 0.3, 1.0]);
    }
}
