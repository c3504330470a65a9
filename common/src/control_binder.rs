//! Applies control events (radio, checkbox, slider, date form) to the page's
//! LPSE state and re-derives the links that depend on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::date_range::{DateRangeControl, DateRangeLink, DateRangeSelection};
use crate::facet_descriptor::FacetKind;
use crate::lpse_path::lpse_path;
use crate::lpse_state::{LpseState, LpseStateError};
use crate::panl_response::PanlConfiguration;
use crate::range_control::{RangeControl, RangeLink};
use crate::viewer_links::search_href;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// Radio button or select box. `None` is the "no selection" choice.
    Select { code: String, value: Option<String> },
    /// Checkbox of a multivalued facet.
    Toggle { code: String, value: String, included: bool },
    RangeSlide { code: String, low: i64, high: i64 },
    RangeClear { code: String },
    DateRangeApply { code: String, selection: DateRangeSelection },
    DateRangeClear { code: String },
}

impl ControlEvent {
    pub fn code(&self) -> &str {
        match self {
            Self::Select { code, .. }
            | Self::Toggle { code, .. }
            | Self::RangeSlide { code, .. }
            | Self::RangeClear { code }
            | Self::DateRangeApply { code, .. }
            | Self::DateRangeClear { code } => code,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Toggle { .. } => "toggle",
            Self::RangeSlide { .. } => "range slide",
            Self::RangeClear { .. } => "range clear",
            Self::DateRangeApply { .. } => "date range apply",
            Self::DateRangeClear { .. } => "date range clear",
        }
    }

    fn accepts(&self, kind: FacetKind) -> bool {
        match self {
            Self::Select { .. } => matches!(kind, FacetKind::Regular | FacetKind::Boolean),
            Self::Toggle { .. } => kind.is_multivalued(),
            Self::RangeSlide { .. } | Self::RangeClear { .. } => kind == FacetKind::Range,
            Self::DateRangeApply { .. } | Self::DateRangeClear { .. } => kind == FacetKind::DateRange,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlBinderError {
    #[error("code '{0}' is not a facet of this field-set")]
    UnknownFacet(String),
    #[error("a {event} event cannot drive the {kind:?} facet '{code}'")]
    KindMismatch { code: String, kind: FacetKind, event: &'static str },
    #[error("range facet '{0}' has no usable bounds")]
    MissingBounds(String),
    #[error("date range for '{0}' has no amount")]
    InvalidDateRange(String),
    #[error(transparent)]
    State(#[from] LpseStateError),
}

/// Links that follow the state after every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundLinks {
    pub lpse_path: String,
    pub search_href: String,
}

/// Owns the LPSE state of one single-page search. Each event mutates at most
/// one slot; a rejected event leaves the state as it was.
#[derive(Debug, Clone)]
pub struct ControlBinder {
    viewer_url: String,
    collection: String,
    config: PanlConfiguration,
    state: LpseState,
    ranges: BTreeMap<String, RangeControl>,
    date_ranges: BTreeMap<String, DateRangeControl>,
}

impl ControlBinder {
    pub fn new(viewer_url: impl Into<String>, collection: impl Into<String>, config: PanlConfiguration) -> Self {
        let state = LpseState::from_configuration(&config);
        let ranges = config
            .facets()
            .filter_map(RangeControl::from_descriptor)
            .map(|control| (control.code().to_string(), control))
            .collect();
        let date_ranges = config
            .facets()
            .filter_map(DateRangeControl::from_descriptor)
            .map(|control| (control.code().to_string(), control))
            .collect();
        Self { viewer_url: viewer_url.into(), collection: collection.into(), config, state, ranges, date_ranges }
    }

    pub fn state(&self) -> &LpseState {
        &self.state
    }

    pub fn configuration(&self) -> &PanlConfiguration {
        &self.config
    }

    pub fn range(&self, code: &str) -> Option<&RangeControl> {
        self.ranges.get(code)
    }

    pub fn range_link(&self, code: &str) -> Option<RangeLink> {
        self.ranges.get(code).map(RangeControl::link)
    }

    /// Preview of the date range link for a selection, without applying it.
    pub fn date_range_link(&self, code: &str, selection: &DateRangeSelection) -> Option<DateRangeLink> {
        self.date_ranges.get(code).map(|control| control.link(selection))
    }

    pub fn links(&self) -> BoundLinks {
        let lpse_path = lpse_path(&self.state, &self.config);
        BoundLinks {
            search_href: search_href(&self.viewer_url, &self.collection, &lpse_path),
            lpse_path,
        }
    }

    pub fn dispatch(&mut self, event: ControlEvent) -> Result<BoundLinks, ControlBinderError> {
        if let Err(e) = self.apply(&event) {
            warn!("control event rejected: {}", e);
            return Err(e);
        }
        let links = self.links();
        debug!("{} on '{}' -> {}", event.name(), event.code(), links.lpse_path);
        Ok(links)
    }

    fn apply(&mut self, event: &ControlEvent) -> Result<(), ControlBinderError> {
        let code = event.code();
        let kind = self
            .config
            .kind_of(code)
            .ok_or_else(|| ControlBinderError::UnknownFacet(code.to_string()))?;
        if !event.accepts(kind) {
            return Err(ControlBinderError::KindMismatch { code: code.to_string(), kind, event: event.name() });
        }

        match event {
            ControlEvent::Select { value, .. } => self.state.set_single(code, value.as_deref())?,
            ControlEvent::Toggle { value, included, .. } => self.state.toggle_multi(code, value, *included)?,
            ControlEvent::RangeSlide { low, high, .. } => {
                let mut control = self.range_control(code)?;
                let link = control.slide(*low, *high);
                self.state.set_single(code, link.lpse_value.as_deref())?;
                self.ranges.insert(code.to_string(), control);
            }
            ControlEvent::RangeClear { .. } => {
                let mut control = self.range_control(code)?;
                control.reset();
                self.state.clear(code)?;
                self.ranges.insert(code.to_string(), control);
            }
            ControlEvent::DateRangeApply { selection, .. } => {
                let link = self
                    .date_ranges
                    .get(code)
                    .map(|control| control.link(selection))
                    .unwrap_or(DateRangeLink::Invalid);
                let value = link
                    .lpse_value()
                    .ok_or_else(|| ControlBinderError::InvalidDateRange(code.to_string()))?;
                self.state.set_single(code, Some(value))?;
            }
            ControlEvent::DateRangeClear { .. } => self.state.clear(code)?,
        }
        Ok(())
    }

    fn range_control(&self, code: &str) -> Result<RangeControl, ControlBinderError> {
        self.ranges
            .get(code)
            .cloned()
            .ok_or_else(|| ControlBinderError::MissingBounds(code.to_string()))
    }
}
