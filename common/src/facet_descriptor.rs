//! Server-supplied metadata for one LPSE dimension.

use serde::{Deserialize, Deserializer, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetKind {
    Regular,
    RegularMultivalue,
    Or,
    OrSeparated,
    Boolean,
    BooleanCheckbox,
    Range,
    DateRange,
}

impl FacetKind {
    /// Kinds whose slot can hold several selections at once.
    pub fn is_multivalued(self) -> bool {
        matches!(self, Self::RegularMultivalue | Self::Or | Self::OrSeparated | Self::BooleanCheckbox)
    }

    pub fn is_range(self) -> bool {
        matches!(self, Self::Range)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::RegularMultivalue => "REGULAR - Multi",
            Self::Or => "OR",
            Self::OrSeparated => "OR SEP",
            Self::Boolean | Self::BooleanCheckbox => "BOOLEAN",
            Self::Range => "RANGE",
            Self::DateRange => "DATE Range",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: i64,
    pub max: i64,
}

impl RangeBounds {
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetValue {
    pub value: String,
    pub encoded: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_multi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Path fragments the backend computed for the current state. A new value is
/// spliced in between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetUris {
    pub before: String,
    pub after: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub during: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_min_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_max_value: Option<String>,
    pub has_infix: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DateDesignators {
    pub hours: String,
    pub days: String,
    pub months: String,
    pub years: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetDescriptor {
    pub facet_name: String,
    pub name: String,
    pub panl_code: String,

    pub is_boolean_facet: bool,
    pub is_or_facet: bool,
    pub is_range_facet: bool,
    pub is_date_range_facet: bool,
    pub is_multivalue: bool,
    pub value_separator: Option<String>,
    /// Separator of an OR facet whose values are joined in one segment.
    pub or_separator: Option<String>,
    pub checkbox_value: Option<String>,

    pub values: Vec<FacetValue>,
    pub uris: FacetUris,

    // range facets
    #[serde(deserialize_with = "loose_int")]
    pub min: Option<i64>,
    #[serde(deserialize_with = "loose_int")]
    pub max: Option<i64>,
    #[serde(deserialize_with = "loose_int")]
    pub dynamic_min: Option<i64>,
    #[serde(deserialize_with = "loose_int")]
    pub dynamic_max: Option<i64>,
    #[serde(deserialize_with = "loose_int")]
    pub value: Option<i64>,
    #[serde(deserialize_with = "loose_int")]
    pub value_to: Option<i64>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub range_min_value: Option<String>,
    pub range_max_value: Option<String>,

    // date range facets
    pub next: Option<String>,
    pub previous: Option<String>,
    pub previous_next: Option<String>,
    pub designators: Option<DateDesignators>,
    pub solr_range_designator: Option<String>,
}

impl FacetDescriptor {
    pub fn kind(&self) -> FacetKind {
        if self.is_boolean_facet {
            if self.checkbox_value.is_some() { FacetKind::BooleanCheckbox } else { FacetKind::Boolean }
        } else if self.is_or_facet {
            if self.or_separator.is_some() || self.value_separator.is_some() {
                FacetKind::OrSeparated
            } else {
                FacetKind::Or
            }
        } else if self.is_range_facet {
            FacetKind::Range
        } else if self.is_date_range_facet {
            FacetKind::DateRange
        } else if self.is_multivalue {
            FacetKind::RegularMultivalue
        } else {
            FacetKind::Regular
        }
    }

    /// The label the viewers print next to the facet name.
    pub fn kind_label(&self) -> &'static str {
        match self.kind() {
            FacetKind::RegularMultivalue if self.value_separator.is_some() => "REGULAR - Multi SEP",
            kind => kind.label(),
        }
    }

    /// Both bounds, or nothing when either is missing or they are inverted.
    pub fn bounds(&self) -> Option<RangeBounds> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min <= max => Some(RangeBounds { min, max }),
            _ => None,
        }
    }

    /// The range currently applied by the backend, if this facet carries one.
    pub fn active_range(&self) -> Option<(i64, i64)> {
        Some((self.value?, self.value_to?))
    }

    pub fn find_value(&self, encoded: &str) -> Option<&FacetValue> {
        self.values.iter().find(|v| v.encoded == encoded)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

// bounds come through as numbers from some collections and as strings from others
fn loose_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<LooseInt>::deserialize(deserializer)? {
        None => None,
        Some(LooseInt::Int(i)) => Some(i),
        Some(LooseInt::Float(f)) => Some(f as i64),
        Some(LooseInt::Text(text)) => text.trim().parse().ok(),
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn descriptor(value: serde_json::Value) -> FacetDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn classifies_kinds_with_boolean_first() {
        assert_eq!(descriptor(json!({"is_boolean_facet": true, "is_or_facet": true})).kind(), FacetKind::Boolean);
        assert_eq!(descriptor(json!({"is_boolean_facet": true, "checkbox_value": "true"})).kind(), FacetKind::BooleanCheckbox);
        assert_eq!(descriptor(json!({"is_or_facet": true})).kind(), FacetKind::Or);
        assert_eq!(descriptor(json!({"is_or_facet": true, "value_separator": ","})).kind(), FacetKind::OrSeparated);
        assert_eq!(descriptor(json!({"is_range_facet": true})).kind(), FacetKind::Range);
        assert_eq!(descriptor(json!({"is_date_range_facet": true})).kind(), FacetKind::DateRange);
        assert_eq!(descriptor(json!({"is_multivalue": true})).kind(), FacetKind::RegularMultivalue);
        assert_eq!(descriptor(json!({})).kind(), FacetKind::Regular);
    }

    #[test]
    fn or_separator_marks_a_separated_or_facet() {
        let facet = descriptor(json!({
            "facet_name": "colours",
            "name": "Colours",
            "panl_code": "Q",
            "is_or_facet": true,
            "or_separator": ",",
            "values": [{"value": "Black", "encoded": "Black", "count": 3}],
            "uris": {"before": "/", "after": "/Q/"}
        }));
        assert_eq!(facet.kind(), FacetKind::OrSeparated);
        assert_eq!(facet.kind_label(), "OR SEP");
        assert!(facet.kind().is_multivalued());

        let plain = descriptor(json!({"is_or_facet": true, "or_separator": null}));
        assert_eq!(plain.kind(), FacetKind::Or);
    }

    #[test]
    fn labels_match_the_viewers() {
        assert_eq!(descriptor(json!({"is_multivalue": true, "value_separator": ","})).kind_label(), "REGULAR - Multi SEP");
        assert_eq!(descriptor(json!({"is_or_facet": true, "value_separator": ","})).kind_label(), "OR SEP");
        assert_eq!(descriptor(json!({"is_date_range_facet": true})).kind_label(), "DATE Range");
    }

    #[test]
    fn reads_a_full_descriptor() {
        let facet = descriptor(json!({
            "facet_name": "weight",
            "name": "Weight",
            "panl_code": "w",
            "is_range_facet": true,
            "min": "10",
            "max": 400,
            "prefix": "",
            "suffix": "+grams",
            "range_min_value": "from+light",
            "values": [{"value": "ignored", "encoded": "ignored", "count": 3}],
            "uris": {
                "before": "/",
                "during": "~",
                "after": "/w+/",
                "before_min_value": "/from+light",
                "has_infix": false
            },
            "some_future_field": {"nested": true}
        }));

        assert_eq!(facet.kind(), FacetKind::Range);
        assert_eq!(facet.bounds(), Some(RangeBounds { min: 10, max: 400 }));
        assert_eq!(facet.uris.before_min_value.as_deref(), Some("/from+light"));
        assert_eq!(facet.uris.after_max_value, None);
        assert_eq!(facet.find_value("ignored").and_then(|v| v.count), Some(3));
        assert_eq!(facet.active_range(), None);
    }

    #[test]
    fn inverted_or_missing_bounds_are_ignored() {
        assert_eq!(descriptor(json!({"min": 9, "max": 1})).bounds(), None);
        assert_eq!(descriptor(json!({"min": 1})).bounds(), None);
        assert_eq!(descriptor(json!({"min": "abc", "max": 3})).bounds(), None);
        assert_eq!(descriptor(json!({"min": null, "max": 3})).bounds(), None);
    }
}
