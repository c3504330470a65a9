//! Relative date range ("next 3 days", "previous 2 years") for a date range
//! facet. The text is assembled from the facet's own localized words.

use serde::{Deserialize, Serialize};

use crate::facet_descriptor::{DateDesignators, FacetDescriptor, FacetKind, FacetUris};
use crate::path_codec::{display_token, encode_panl};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateDirection {
    #[default]
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateUnit {
    #[default]
    Hours,
    Days,
    Months,
    Years,
}

impl DateUnit {
    /// Parses the Solr designator the backend reports (`HOURS`, `DAYS`...).
    pub fn from_solr_designator(designator: &str) -> Option<Self> {
        match designator {
            "HOURS" => Some(Self::Hours),
            "DAYS" => Some(Self::Days),
            "MONTHS" => Some(Self::Months),
            "YEARS" => Some(Self::Years),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRangeSelection {
    pub direction: DateDirection,
    pub amount: Option<u32>,
    pub unit: DateUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DateRangeLink {
    /// No amount entered yet.
    Invalid,
    Apply {
        text: String,
        lpse_value: String,
        href_fragment: String,
    },
}

impl DateRangeLink {
    pub fn lpse_value(&self) -> Option<&str> {
        match self {
            Self::Invalid => None,
            Self::Apply { lpse_value, .. } => Some(lpse_value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeControl {
    code: String,
    next: String,
    previous: String,
    designators: DateDesignators,
    uris: FacetUris,
}

impl DateRangeControl {
    pub fn from_descriptor(descriptor: &FacetDescriptor) -> Option<Self> {
        if descriptor.kind() != FacetKind::DateRange {
            return None;
        }
        Some(Self {
            code: descriptor.panl_code.clone(),
            next: descriptor.next.clone().unwrap_or_default(),
            previous: descriptor.previous.clone().unwrap_or_default(),
            designators: descriptor.designators.clone().unwrap_or_default(),
            uris: descriptor.uris.clone(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The selection the backend reports as active on a results page.
    pub fn initial_selection(&self, descriptor: &FacetDescriptor) -> DateRangeSelection {
        let direction = match descriptor.previous_next.as_deref() {
            Some(previous_next) if previous_next == self.previous && previous_next != self.next => {
                DateDirection::Previous
            }
            _ => DateDirection::Next,
        };
        DateRangeSelection {
            direction,
            amount: descriptor.value.and_then(|value| u32::try_from(value).ok()),
            unit: descriptor
                .solr_range_designator
                .as_deref()
                .and_then(DateUnit::from_solr_designator)
                .unwrap_or_default(),
        }
    }

    pub fn link(&self, selection: &DateRangeSelection) -> DateRangeLink {
        let Some(amount) = selection.amount else {
            return DateRangeLink::Invalid;
        };

        let direction = match selection.direction {
            DateDirection::Next => &self.next,
            DateDirection::Previous => &self.previous,
        };
        let designator = match selection.unit {
            DateUnit::Hours => &self.designators.hours,
            DateUnit::Days => &self.designators.days,
            DateUnit::Months => &self.designators.months,
            DateUnit::Years => &self.designators.years,
        };

        let text = format!("{}{}{}", display_token(direction), amount, display_token(designator));
        let lpse_value = encode_panl(&text);
        DateRangeLink::Apply {
            href_fragment: format!("{}{}{}", self.uris.before, lpse_value, self.uris.after),
            text,
            lpse_value,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn descriptor() -> FacetDescriptor {
        serde_json::from_value(json!({
            "facet_name": "solr_date",
            "panl_code": "S",
            "is_date_range_facet": true,
            "next": "next+",
            "previous": "previous+",
            "previous_next": "previous+",
            "value": "4",
            "solr_range_designator": "MONTHS",
            "designators": {"hours": "+hours", "days": "+days", "months": "+months", "years": "+years"},
            "uris": {"before": "/", "after": "/S/"}
        }))
        .unwrap()
    }

    #[test]
    fn builds_text_value_and_fragment() {
        let control = DateRangeControl::from_descriptor(&descriptor()).unwrap();
        let link = control.link(&DateRangeSelection {
            direction: DateDirection::Next,
            amount: Some(3),
            unit: DateUnit::Days,
        });

        assert_eq!(
            link,
            DateRangeLink::Apply {
                text: "next 3 days".to_string(),
                lpse_value: "next+3+days".to_string(),
                href_fragment: "/next+3+days/S/".to_string(),
            }
        );
        assert_eq!(link.lpse_value(), Some("next+3+days"));
    }

    #[test]
    fn missing_amount_is_invalid() {
        let control = DateRangeControl::from_descriptor(&descriptor()).unwrap();
        let link = control.link(&DateRangeSelection::default());
        assert_eq!(link, DateRangeLink::Invalid);
        assert_eq!(link.lpse_value(), None);
    }

    #[test]
    fn initial_selection_reflects_the_active_range() {
        let descriptor = descriptor();
        let control = DateRangeControl::from_descriptor(&descriptor).unwrap();
        assert_eq!(
            control.initial_selection(&descriptor),
            DateRangeSelection { direction: DateDirection::Previous, amount: Some(4), unit: DateUnit::Months }
        );
    }

    #[test]
    fn other_kinds_have_no_date_control() {
        let facet: FacetDescriptor = serde_json::from_value(json!({"is_range_facet": true})).unwrap();
        assert!(DateRangeControl::from_descriptor(&facet).is_none());
        assert_eq!(DateUnit::from_solr_designator("WEEKS"), None);
    }
}
