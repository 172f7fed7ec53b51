/// Page geometry and character height for one render.
///
/// All distances are integer machine units. `y` grows upward, so lines of
/// text run toward more negative baselines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Nominal character height
    pub height: f64,
    /// Widest a line may get before the next word is wrapped
    pub max_line_width: i32,
    /// Baseline of the first line
    pub top_margin_y: i32,
    /// Lowest baseline a line break may produce
    pub min_allowed_y: i32,
}

impl LayoutParams {
    /// Line width of the default page
    pub const DEFAULT_MAX_LINE_WIDTH: i32 = 100;
    /// Depth below the first line available on the default page
    pub const DEFAULT_DRAWABLE_DEPTH: i32 = 90;

    /// Parameters for `height` on the default page.
    ///
    /// Positions saturate at the `i32` range for very large heights.
    pub fn new(height: f64) -> Self {
        let char_height = height as i32;
        Self {
            height,
            max_line_width: Self::DEFAULT_MAX_LINE_WIDTH,
            top_margin_y: char_height.saturating_neg(),
            min_allowed_y: (-Self::DEFAULT_DRAWABLE_DEPTH).saturating_sub(char_height),
        }
    }

    /// Set the widest a line may get before wrapping.
    pub fn with_max_line_width(mut self, max_line_width: i32) -> Self {
        self.max_line_width = max_line_width;
        self
    }

    /// Set how far below the origin the lowest baseline may sit, not
    /// counting one character height of clearance.
    pub fn with_drawable_depth(mut self, depth: i32) -> Self {
        self.min_allowed_y = depth.saturating_neg().saturating_sub(self.height as i32);
        self
    }

    /// Set the baseline of the first line.
    pub fn with_top_margin_y(mut self, top_margin_y: i32) -> Self {
        self.top_margin_y = top_margin_y;
        self
    }

    /// Set the lowest baseline a line break may produce.
    pub fn with_min_allowed_y(mut self, min_allowed_y: i32) -> Self {
        self.min_allowed_y = min_allowed_y;
        self
    }

    /// Horizontal advance of one character.
    pub fn char_width(&self) -> i32 {
        self.height as i32
    }

    /// Vertical distance from the lowest point of a line to the next baseline.
    pub fn line_gap(&self) -> i32 {
        (self.height + 5.0) as i32
    }

    /// Space left after every word.
    pub fn word_gap(&self) -> i32 {
        self.char_width()
    }
}
