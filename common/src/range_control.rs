//! Two-handle range control. Handles sit inside the facet bounds; the link is
//! spliced from the backend's `before`/`during`/`after` fragments, switching
//! to `before_min_value`/`after_max_value` for a handle resting on its bound.

use serde::Serialize;

use crate::facet_descriptor::{FacetDescriptor, FacetUris, RangeBounds};
use crate::panl_const::NO_INFIX_REPLACEMENT;
use crate::path_codec::display_token;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeControlState {
    /// Both handles on their bounds: the range filters nothing.
    Unconstrained,
    Constrained,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeLink {
    pub state: RangeControlState,
    pub low: i64,
    pub high: i64,
    /// Path fragment to append to the collection path.
    pub href_fragment: String,
    /// The range as it appears in a single LPSE path segment, or `None` when
    /// the control no longer constrains anything.
    pub lpse_value: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeControl {
    code: String,
    bounds: RangeBounds,
    uris: FacetUris,
    prefix: Option<String>,
    suffix: Option<String>,
    range_min_value: Option<String>,
    range_max_value: Option<String>,
    low: i64,
    high: i64,
}

impl RangeControl {
    /// A control for a range facet with usable bounds. The handles start on
    /// the range the backend reports as active, or on the bounds.
    pub fn from_descriptor(descriptor: &FacetDescriptor) -> Option<Self> {
        if !descriptor.kind().is_range() {
            return None;
        }
        let bounds = descriptor.bounds()?;
        let mut control = Self {
            code: descriptor.panl_code.clone(),
            bounds,
            uris: descriptor.uris.clone(),
            prefix: descriptor.prefix.clone(),
            suffix: descriptor.suffix.clone(),
            range_min_value: descriptor.range_min_value.clone(),
            range_max_value: descriptor.range_max_value.clone(),
            low: bounds.min,
            high: bounds.max,
        };
        if let Some((low, high)) = descriptor.active_range() {
            control.slide(low, high);
        }
        Some(control)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn bounds(&self) -> RangeBounds {
        self.bounds
    }

    pub fn handles(&self) -> (i64, i64) {
        (self.low, self.high)
    }

    pub fn state(&self) -> RangeControlState {
        if self.low == self.bounds.min && self.high == self.bounds.max {
            RangeControlState::Unconstrained
        } else {
            RangeControlState::Constrained
        }
    }

    /// Moves both handles. Values are clamped to the bounds and put in order.
    pub fn slide(&mut self, low: i64, high: i64) -> RangeLink {
        let (low, high) = (self.bounds.clamp(low), self.bounds.clamp(high));
        (self.low, self.high) = if low <= high { (low, high) } else { (high, low) };
        self.link()
    }

    pub fn reset(&mut self) -> RangeLink {
        self.slide(self.bounds.min, self.bounds.max)
    }

    pub fn link(&self) -> RangeLink {
        let low_replacement = self
            .uris
            .before_min_value
            .as_deref()
            .filter(|_| self.low == self.bounds.min);
        let high_replacement = self
            .uris
            .after_max_value
            .as_deref()
            .filter(|_| self.high == self.bounds.max);

        let before = match low_replacement {
            Some(fragment) => fragment.to_string(),
            None => format!("{}{}", self.uris.before, self.low),
        };
        let after = match high_replacement {
            Some(fragment) => fragment.to_string(),
            None => format!("{}{}", self.high, self.uris.after),
        };
        let during = if !self.uris.has_infix && (low_replacement.is_some() || high_replacement.is_some()) {
            NO_INFIX_REPLACEMENT
        } else {
            self.uris.during.as_deref().unwrap_or("")
        };

        let state = self.state();
        let lpse_value = match state {
            RangeControlState::Unconstrained => None,
            RangeControlState::Constrained => Some(range_segment(&before, during, &after)),
        };

        RangeLink {
            state,
            low: self.low,
            high: self.high,
            href_fragment: format!("{before}{during}{after}"),
            lpse_value,
            text: self.text(),
        }
    }

    fn text(&self) -> String {
        let low = self.endpoint_text(self.low, self.low == self.bounds.min, self.range_min_value.as_deref());
        let high = self.endpoint_text(self.high, self.high == self.bounds.max, self.range_max_value.as_deref());
        format!("{low} to {high}")
    }

    fn endpoint_text(&self, value: i64, on_bound: bool, replacement: Option<&str>) -> String {
        match replacement.filter(|_| on_bound) {
            Some(replacement) => display_token(replacement),
            None => format!(
                "{}{}{}",
                self.prefix.as_deref().map(display_token).unwrap_or_default(),
                value,
                self.suffix.as_deref().map(display_token).unwrap_or_default(),
            ),
        }
    }
}

// the segment of `before + during + after` that holds the range itself
fn range_segment(before: &str, during: &str, after: &str) -> String {
    let head = before.rsplit('/').next().unwrap_or_default();
    let tail = after.split('/').next().unwrap_or_default();
    format!("{head}{during}{tail}")
}
