use serde::{Deserialize, Serialize};

/// Linear 0..1 RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GRID_GREY: Self = Self::new(0.69, 0.69, 0.69);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Composite `self` at `alpha` over `background`.
    pub fn over(self, background: Rgb, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self::new(
            self.r * alpha + background.r * (1.0 - alpha),
            self.g * alpha + background.g * (1.0 - alpha),
            self.b * alpha + background.b * (1.0 - alpha),
        )
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), 255]
    }
}

// viridis at t = 0, 1/8, ..., 1
const VIRIDIS_STOPS: [Rgb; 9] = [
    Rgb::new(0.267, 0.005, 0.329),
    Rgb::new(0.278, 0.173, 0.478),
    Rgb::new(0.231, 0.322, 0.545),
    Rgb::new(0.173, 0.447, 0.557),
    Rgb::new(0.129, 0.569, 0.549),
    Rgb::new(0.157, 0.682, 0.502),
    Rgb::new(0.369, 0.788, 0.384),
    Rgb::new(0.678, 0.863, 0.188),
    Rgb::new(0.993, 0.906, 0.144),
];

/// Sample the viridis colormap at `t` in 0..=1.
pub fn viridis(t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS_STOPS.len() - 1) as f32;
    let lower = (scaled.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
    VIRIDIS_STOPS[lower].lerp(VIRIDIS_STOPS[lower + 1], scaled - lower as f32)
}

/// Default colour of the `index`-th series in a panel: viridis at 0, 0.4, 0.8, repeating.
pub fn series_color(index: usize) -> Rgb {
    viridis(0.4 * (index % 3) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), VIRIDIS_STOPS[0]);
        assert_eq!(viridis(1.0), VIRIDIS_STOPS[8]);
        assert_eq!(viridis(-3.0), VIRIDIS_STOPS[0]);
    }

    #[test]
    fn viridis_interpolates_between_stops() {
        let mid = viridis(1.0 / 16.0);
        assert_relative_eq!(mid.g, (0.005 + 0.173) / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn series_colors_cycle() {
        assert_eq!(series_color(0), series_color(3));
        assert_ne!(series_color(0), series_color(1));
    }

    #[test]
    fn alpha_over_white() {
        let faded = Rgb::BLACK.over(Rgb::WHITE, 0.6);
        assert_relative_eq!(faded.r, 0.4, epsilon = 1e-6);
        assert_eq!(Rgb::RED.to_rgba8(), [255, 0, 0, 255]);
    }
}
