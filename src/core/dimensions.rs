use serde::{Deserialize, Serialize};

/// A physical width/height pair in millimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions<T> {
    pub width: T,
    pub height: T,
}

impl<T: Copy> Dimensions<T> {
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub fn swapped(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl Dimensions<u32> {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn to_f64(&self) -> Dimensions<f64> {
        Dimensions::new(f64::from(self.width), f64::from(self.height))
    }
}

impl Dimensions<f64> {
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// `percent` of 100 leaves the size unchanged.
    pub fn scaled(&self, percent: f64) -> Self {
        Self {
            width: self.width * percent / 100.0,
            height: self.height * percent / 100.0,
        }
    }

    /// Nearest whole millimetre; negative or non-finite values clamp to zero.
    pub fn rounded(&self) -> Dimensions<u32> {
        Dimensions::new(round_mm(self.width), round_mm(self.height))
    }

    /// True when both sides round to `other` in either orientation.
    pub fn matches_either_orientation(&self, other: &Dimensions<u32>) -> bool {
        let rounded = self.rounded();
        rounded == *other || rounded.swapped() == *other
    }
}

fn round_mm(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as u32
}

impl<T: std::fmt::Display> std::fmt::Display for Dimensions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {} mm", self.width, self.height)
    }
}
