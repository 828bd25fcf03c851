// src/calibration/regression.rs

/// Running sums for an ordinary least-squares line fit `y = slope * x + intercept`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Regression {
    points: u32,
    x_sum: f64,
    y_sum: f64,
    x2_sum: f64,
    xy_sum: f64,
}

impl Regression {
    pub const fn new() -> Self {
        Regression { points: 0, x_sum: 0.0, y_sum: 0.0, x2_sum: 0.0, xy_sum: 0.0 }
    }

    pub fn add(&mut self, x: f64, y: f64) {
        self.points += 1;
        self.x_sum += x;
        self.y_sum += y;
        self.x2_sum += x * x;
        self.xy_sum += x * y;
    }

    /// Number of points accumulated so far.
    pub const fn points(&self) -> u32 {
        self.points
    }

    // n * sum(x^2) - sum(x)^2; zero when every x is identical.
    fn denominator(&self) -> Option<f64> {
        if self.points < 2 {
            return None;
        }
        let d = f64::from(self.points) * self.x2_sum - self.x_sum * self.x_sum;
        if d == 0.0 {
            None
        } else {
            Some(d)
        }
    }

    /// Least-squares slope, or `None` for a degenerate point set.
    pub fn slope(&self) -> Option<f64> {
        let d = self.denominator()?;
        Some((f64::from(self.points) * self.xy_sum - self.x_sum * self.y_sum) / d)
    }

    /// Least-squares intercept, or `None` for a degenerate point set.
    pub fn intercept(&self) -> Option<f64> {
        let d = self.denominator()?;
        Some((self.y_sum * self.x2_sum - self.x_sum * self.xy_sum) / d)
    }
}
