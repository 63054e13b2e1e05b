//! Data-to-pixel mapping.

/// Left margin reserved for the vertical axis.
pub const MARGIN_LEFT: f64 = 40.0;
/// Top margin reserved for the legend strip.
pub const MARGIN_TOP: f64 = 10.0;
/// Right margin.
pub const MARGIN_RIGHT: f64 = 10.0;
/// Bottom margin reserved for the horizontal axis.
pub const MARGIN_BOTTOM: f64 = 20.0;

/// Plot region of a chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub width: f64,
    pub height: f64,
}

impl PlotFrame {
    /// Frame for a surface of the given pixel size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// X of the vertical axis.
    #[must_use]
    pub const fn left(&self) -> f64 {
        MARGIN_LEFT
    }

    /// Rightmost plotted x.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.width - MARGIN_RIGHT
    }

    /// Topmost plotted y.
    #[must_use]
    pub const fn top(&self) -> f64 {
        MARGIN_TOP
    }

    /// Y of the horizontal axis.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.height - MARGIN_BOTTOM
    }

    /// Vertical extent of the grid: from the top margin to one top margin
    /// above the surface edge, past the horizontal axis.
    #[must_use]
    pub fn grid_span(&self) -> f64 {
        self.height - 2.0 * MARGIN_TOP
    }

    /// Scale mapping `[min, max]` of the data onto the horizontal extent.
    #[must_use]
    pub fn x_scale(&self, min: f64, max: f64) -> LinearScale {
        LinearScale::from_extent(min, max, self.left(), self.right())
    }

    /// Scale mapping `[min, max]` of the data onto the vertical extent,
    /// larger values drawn higher.
    #[must_use]
    pub fn y_scale(&self, min: f64, max: f64) -> LinearScale {
        LinearScale::from_extent(min, max, self.bottom(), self.top())
    }

    /// The axis polyline: up the left edge, along the bottom.
    #[must_use]
    pub fn axis_points(&self) -> Vec<(f64, f64)> {
        vec![
            (self.left(), self.top()),
            (self.left(), self.bottom()),
            (self.right(), self.bottom()),
        ]
    }
}

/// Linear map from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Build a scale over `[min, max]`.
    ///
    /// A degenerate extent (equal bounds, or no finite data at all) falls
    /// back to a span of 1 centred on the value, so every finite input maps
    /// to a finite pixel and a constant series lands mid-range.
    #[must_use]
    pub fn from_extent(min: f64, max: f64, range_start: f64, range_end: f64) -> Self {
        let (domain_min, domain_max) = if max - min > 0.0 && (max - min).is_finite() {
            (min, max)
        } else {
            let centre = if min.is_finite() { min } else { 0.0 };
            (centre - 0.5, centre + 0.5)
        };
        Self {
            domain_min,
            domain_max,
            range_start,
            range_end,
        }
    }

    /// Fit a scale to the extent of `values`. Non-finite values are ignored.
    #[must_use]
    pub fn fit<I>(values: I, range_start: f64, range_end: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = extent(values);
        Self::from_extent(min, max, range_start, range_end)
    }

    /// Map a data value to a pixel coordinate.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Effective data domain after the degenerate fallback.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }
}

/// Minimum and maximum of the finite values, `(+inf, -inf)` when there are
/// none.
#[must_use]
pub fn extent<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}
