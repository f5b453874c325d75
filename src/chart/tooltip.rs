//! Headless tooltip model.
//!
//! The chart core does not own a DOM or widget toolkit, so the tooltip is a
//! plain placement model: content, visibility, and a computed screen
//! position with right-edge overflow flipping. A host embedding the chart
//! mirrors this state into its own floating element.

/// Average glyph width as a fraction of the font size, used to estimate the
/// rendered tooltip width without a text backend.
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

const DEFAULT_FONT_PX: f64 = 12.0;
const DEFAULT_OFFSET: (f64, f64) = (20.0, 20.0);
const CONTENT_PADDING_PX: f64 = 8.0;

/// Estimated width of the tooltip's rendered content. Markup tags are not
/// part of the visible text and are excluded.
fn estimate_content_width(html: &str, font_px: f64) -> f64 {
    let mut visible_chars = 0usize;
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => visible_chars += 1,
            _ => {}
        }
    }
    visible_chars as f64 * font_px * GLYPH_WIDTH_FACTOR + CONTENT_PADDING_PX * 2.0
}

#[derive(Debug)]
pub struct Tooltip {
    visible: bool,
    html: String,
    class: String,
    offset: (f64, f64),
    font_px: f64,
    position: (f64, f64),
    attached: bool,
}

impl Tooltip {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            visible: false,
            html: String::new(),
            class: class.into(),
            offset: DEFAULT_OFFSET,
            font_px: DEFAULT_FONT_PX,
            position: (0.0, 0.0),
            attached: true,
        }
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn set_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if self.class != class {
            self.class = class;
        }
    }

    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    pub fn set_offset(&mut self, offset: (f64, f64)) {
        self.offset = offset;
    }

    /// Position computed by the last `show` call (top-left corner).
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Shows the tooltip at the pointer position.
    ///
    /// `html` replaces the content when given; `None` repositions existing
    /// content and is a no-op when no content is set. When the estimated
    /// width would overflow `container_width`, the tooltip flips to the left
    /// of the pointer; the vertical position never flips.
    pub fn show(&mut self, pointer_x: f64, pointer_y: f64, html: Option<String>, container_width: f64) {
        if !self.attached {
            return;
        }
        if let Some(html) = html {
            self.html = html;
        } else if self.html.is_empty() {
            return;
        }

        self.visible = true;
        let width = estimate_content_width(&self.html, self.font_px);
        let mut left = pointer_x + self.offset.0;
        if left + width > container_width {
            left -= width + self.offset.0;
        }
        let top = pointer_y + self.offset.1;
        self.position = (left, top);
    }

    /// Hides the tooltip and clears its content, so stale content can never
    /// reappear without a fresh `show`.
    pub fn hide(&mut self) {
        self.visible = false;
        self.html.clear();
    }

    /// Drops visibility only, keeping content. Used on pointer-out of the
    /// whole chart surface.
    pub fn conceal(&mut self) {
        self.visible = false;
    }

    /// Detaches the tooltip from its host. Further `show` calls are no-ops.
    pub fn detach(&mut self) {
        self.attached = false;
        self.hide();
    }
}
