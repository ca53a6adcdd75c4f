//! Searchable select widget model
//!
//! UI-toolkit-agnostic state for a combo box whose text input doubles as
//! search filter and display value. The view layer feeds it input text,
//! clicks, and layout rectangles; it answers with the visible options and
//! the overlay placement.

/// Screen-space point in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Screen-space rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.bottom()
    }
}

/// One selectable entry; `value` is the stable identifier, `label` what the
/// user sees and searches against
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// Height of one option row in the overlay
const ROW_HEIGHT: f64 = 32.0;
/// Rows shown before the overlay scrolls
const MAX_VISIBLE_ROWS: usize = 8;

/// State machine behind the searchable dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct SearchableSelect {
    options: Vec<SelectOption>,
    query: String,
    committed: Option<String>,
    open: bool,
    /// Typed queries filter; opening via the indicator shows the full list
    filtering: bool,
    anchor: Rect,
    overlay: Rect,
}

impl SearchableSelect {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            query: String::new(),
            committed: None,
            open: false,
            filtering: false,
            anchor: Rect::default(),
            overlay: Rect::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current text of the input field
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Value of the committed selection, if any
    pub fn committed_value(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    fn committed_label(&self) -> Option<&str> {
        let committed = self.committed.as_deref()?;
        self.options
            .iter()
            .find(|option| option.value == committed)
            .map(|option| option.label.as_str())
    }

    /// Replace the option list, e.g. after a directory fetch.
    ///
    /// A committed value no longer present is dropped.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        if self.committed_label().is_none() {
            self.committed = None;
        }
    }

    /// Click on the dropdown indicator: toggle the overlay showing the full
    /// unfiltered list regardless of the input text
    pub fn toggle_via_indicator(&mut self) {
        if self.open {
            self.close_and_revert();
        } else {
            self.open = true;
            self.filtering = false;
        }
    }

    /// Text typed into the input: becomes both the display value and the
    /// active filter, and opens the overlay
    pub fn input(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.open = true;
        self.filtering = true;
    }

    /// Options currently visible in the overlay
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        if !self.filtering || self.query.is_empty() {
            return self.options.iter().collect();
        }
        let needle = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Click on an option row: commit it, show its label, close the overlay
    pub fn commit(&mut self, value: &str) -> Option<&SelectOption> {
        let index = self.options.iter().position(|option| option.value == value)?;
        self.committed = Some(self.options[index].value.clone());
        self.query = self.options[index].label.clone();
        self.open = false;
        self.filtering = false;
        Some(&self.options[index])
    }

    /// Close the overlay and snap the input text back to the committed
    /// selection's label (or empty when nothing is committed)
    pub fn close_and_revert(&mut self) {
        self.query = self.committed_label().unwrap_or_default().to_string();
        self.open = false;
        self.filtering = false;
    }

    /// Place the overlay for the given anchor (the input field's rectangle)
    /// inside the viewport.
    ///
    /// The overlay sits flush below the anchor and flips above it when the
    /// preferred placement would run past the viewport bottom.
    pub fn reposition(&mut self, anchor: Rect, viewport: Rect) -> Rect {
        self.anchor = anchor;
        let rows = self.visible_options().len().clamp(1, MAX_VISIBLE_ROWS);
        let height = rows as f64 * ROW_HEIGHT;

        let below = Rect::new(anchor.x, anchor.bottom(), anchor.width, height);
        self.overlay = if below.bottom() > viewport.bottom() {
            Rect::new(anchor.x, anchor.y - height, anchor.width, height)
        } else {
            below
        };
        self.overlay
    }

    /// A click anywhere on screen while the overlay is open.
    ///
    /// Clicks outside both the input and the overlay dismiss the widget and
    /// revert the text; returns whether the widget closed.
    pub fn handle_outside_click(&mut self, point: Point) -> bool {
        if !self.open || self.anchor.contains(point) || self.overlay.contains(point) {
            return false;
        }
        self.close_and_revert();
        true
    }
}
