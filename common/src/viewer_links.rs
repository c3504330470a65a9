//! Outbound links of the results viewer. Every href is the viewer base, the
//! collection path and a fragment the backend precomputed; nothing here
//! re-derives a path from state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date_range::DateRangeControl;
use crate::facet_descriptor::FacetDescriptor;
use crate::panl_const::{DEFAULT_FIELDSET, PER_PAGE_CHOICES};
use crate::panl_response::{ActiveFacet, ActiveSection, PanlResults, SortingSection};
use crate::path_codec::display_token;
use crate::range_control::RangeControl;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionUrlError {
    #[error("'{0}' is not of the form /<collection>/<fieldset>")]
    Malformed(String),
    #[error("collection '{0}' is not served by this Panl server")]
    UnknownCollection(String),
}

/// `/<collection>/<fieldset>`, the part of every href between the viewer base
/// and the LPSE fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionUrl {
    pub collection: String,
    pub fieldset: String,
}

impl CollectionUrl {
    pub fn new(collection: impl Into<String>, fieldset: impl Into<String>) -> Self {
        Self { collection: collection.into(), fieldset: fieldset.into() }
    }

    pub fn with_default_fieldset(collection: impl Into<String>) -> Self {
        Self::new(collection, DEFAULT_FIELDSET)
    }

    /// Reads the collection and field-set out of a viewer page path
    /// (`<viewer>/<collection>/<fieldset>/...`) and checks it against the
    /// collection URLs the server advertises.
    pub fn from_viewer_path(viewer_url: &str, path: &str, collections: &[String]) -> Result<Self, CollectionUrlError> {
        let rest = path.strip_prefix(viewer_url).unwrap_or(path);
        let mut parts = rest.trim_start_matches('/').split('/');
        let (Some(collection), Some(fieldset)) = (
            parts.next().filter(|part| !part.is_empty()),
            parts.next().filter(|part| !part.is_empty()),
        ) else {
            return Err(CollectionUrlError::Malformed(path.to_string()));
        };
        let url = Self::new(collection, fieldset);
        url.validate(collections)?;
        Ok(url)
    }

    pub fn validate(&self, collections: &[String]) -> Result<(), CollectionUrlError> {
        let path = self.to_string();
        if collections.iter().any(|known| *known == path) {
            Ok(())
        } else {
            Err(CollectionUrlError::UnknownCollection(path))
        }
    }
}

impl fmt::Display for CollectionUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.collection, self.fieldset)
    }
}

impl FromStr for CollectionUrl {
    type Err = CollectionUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CollectionUrlError::Malformed(s.to_string());
        let mut parts = s.strip_prefix('/').ok_or_else(malformed)?.trim_end_matches('/').split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(collection), Some(fieldset), None) if !collection.is_empty() && !fieldset.is_empty() => {
                Ok(Self::new(collection, fieldset))
            }
            _ => Err(malformed()),
        }
    }
}

/// Href of the single-page search button: the collection's default
/// field-set followed by the LPSE path.
pub fn search_href(viewer_url: &str, collection: &str, lpse_path: &str) -> String {
    format!("{viewer_url}/{collection}/{DEFAULT_FIELDSET}{lpse_path}")
}


/// A link the viewer shows. `href` is `None` when the option is shown but not
/// clickable (the active sort direction, a missing next page...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerLink {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValueLink {
    pub text: String,
    pub href: String,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableFacetLinks {
    pub name: String,
    pub panl_code: String,
    pub kind_label: &'static str,
    pub values: Vec<FacetValueLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFacetLinks {
    pub facet_name: String,
    pub name: String,
    pub panl_code: String,
    pub remove: ViewerLink,
    pub invert: Option<ViewerLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSortLinks {
    pub name: String,
    pub panl_code: String,
    pub is_descending: bool,
    pub remove: ViewerLink,
    pub inverse: ViewerLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOptionLinks {
    pub name: String,
    pub ascending: ViewerLink,
    pub descending: ViewerLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    pub next: ViewerLink,
    pub previous: ViewerLink,
    pub per_page: Vec<ViewerLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLinks {
    pub query: Option<ViewerLink>,
    pub active_facets: Vec<ActiveFacetLinks>,
    pub active_sorts: Vec<ActiveSortLinks>,
    pub clear_sorting: Option<ViewerLink>,
    pub available: Vec<AvailableFacetLinks>,
    pub sort_options: Vec<SortOptionLinks>,
    pub then_sort_by: Vec<SortOptionLinks>,
    pub pagination: PaginationLinks,
    pub and_operand: ViewerLink,
    pub or_operand: ViewerLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerLinks {
    viewer_url: String,
    collection: CollectionUrl,
}

impl ViewerLinks {
    pub fn new(viewer_url: impl Into<String>, collection: CollectionUrl) -> Self {
        Self { viewer_url: viewer_url.into(), collection }
    }

    pub fn collection(&self) -> &CollectionUrl {
        &self.collection
    }

    pub fn href(&self, fragment: &str) -> String {
        format!("{}{}{}", self.viewer_url, self.collection, fragment)
    }

    fn link(&self, text: impl Into<String>, fragment: &str) -> ViewerLink {
        ViewerLink { text: text.into(), href: Some(self.href(fragment)) }
    }

    fn label(text: impl Into<String>) -> ViewerLink {
        ViewerLink { text: text.into(), href: None }
    }

    pub fn result_links(&self, results: &PanlResults) -> ResultLinks {
        ResultLinks {
            query: results
                .active
                .query
                .as_ref()
                .map(|query| self.link(query.value.clone(), &query.remove_uri)),
            active_facets: results.active.facet.iter().map(|facet| self.active_facet(facet)).collect(),
            active_sorts: self.active_sorts(&results.active),
            clear_sorting: (!results.active.sort.is_empty())
                .then(|| self.link("Clear all sorting", &results.sorting.remove_uri)),
            available: results.available.facets.iter().map(|facet| self.available_facet(facet)).collect(),
            sort_options: self.sort_options(&results.sorting, &results.active),
            then_sort_by: self.then_sort_by(&results.sorting),
            pagination: self.pagination(results),
            and_operand: self.link("AND", &results.query_operand.and),
            or_operand: self.link("OR", &results.query_operand.or),
        }
    }

    pub fn available_facet(&self, facet: &FacetDescriptor) -> AvailableFacetLinks {
        let show_count = !facet.is_or_facet;
        AvailableFacetLinks {
            name: facet.name.clone(),
            panl_code: facet.panl_code.clone(),
            kind_label: facet.kind_label(),
            values: facet
                .values
                .iter()
                .map(|value| FacetValueLink {
                    text: display_token(&value.encoded),
                    href: self.href(&format!("{}{}{}", facet.uris.before, value.encoded, facet.uris.after)),
                    count: value.count.filter(|_| show_count),
                })
                .collect(),
        }
    }

    fn active_facet(&self, facet: &ActiveFacet) -> ActiveFacetLinks {
        let invert = if facet.is_boolean_facet {
            facet.inverse_uri.as_deref().map(|uri| {
                self.link(display_token(facet.inverse_encoded.as_deref().unwrap_or_default()), uri)
            })
        } else {
            None
        };
        ActiveFacetLinks {
            facet_name: facet.facet_name.clone(),
            name: facet.name.clone(),
            panl_code: facet.panl_code.clone(),
            remove: self.link(display_token(&facet.encoded), &facet.remove_uri),
            invert,
        }
    }

    fn active_sorts(&self, active: &ActiveSection) -> Vec<ActiveSortLinks> {
        active
            .sort
            .iter()
            .map(|sort| ActiveSortLinks {
                name: sort.name.clone(),
                panl_code: sort.panl_code.clone(),
                is_descending: sort.is_descending,
                remove: self.link("Remove sort", &sort.remove_uri),
                inverse: self.link(
                    if sort.is_descending { "Change to ASC" } else { "Change to DESC" },
                    &sort.inverse_uri,
                ),
            })
            .collect()
    }

    fn sort_options(&self, sorting: &SortingSection, active: &ActiveSection) -> Vec<SortOptionLinks> {
        sorting
            .fields
            .iter()
            .map(|field| {
                let current = active.sort.iter().find(|sort| sort.facet_name == field.facet_name);
                let is_descending = current.map(|sort| sort.is_descending);
                SortOptionLinks {
                    name: field.name.clone(),
                    ascending: match is_descending {
                        Some(false) => Self::label("ASC"),
                        _ => self.link("ASC", &field.set_uri_asc),
                    },
                    descending: match is_descending {
                        Some(true) => Self::label("DESC"),
                        _ => self.link("DESC", &field.set_uri_desc),
                    },
                }
            })
            .collect()
    }

    fn then_sort_by(&self, sorting: &SortingSection) -> Vec<SortOptionLinks> {
        let additive = sorting.fields.iter().filter(|field| field.add_uri_asc.is_some()).count();
        if additive == sorting.fields.len() {
            return Vec::new();
        }

        sorting
            .fields
            .iter()
            .filter_map(|field| {
                let asc = field.add_uri_asc.as_deref()?;
                Some(SortOptionLinks {
                    name: field.name.clone(),
                    ascending: self.link("ASC", asc),
                    descending: match field.add_uri_desc.as_deref() {
                        Some(desc) => self.link("DESC", desc),
                        None => Self::label("DESC"),
                    },
                })
            })
            .collect()
    }

    fn pagination(&self, results: &PanlResults) -> PaginationLinks {
        let page_uris = &results.pagination.page_uris;
        let per_page_uris = &results.pagination.num_per_page_uris;
        PaginationLinks {
            next: match page_uris.next.as_deref() {
                Some(next) => self.link("NEXT", next),
                None => Self::label("NEXT"),
            },
            previous: match page_uris.previous.as_deref() {
                Some(previous) => self.link("PREV", previous),
                None => Self::label("PREV"),
            },
            per_page: PER_PAGE_CHOICES
                .iter()
                .map(|count| {
                    self.link(count.to_string(), &format!("{}{}{}", per_page_uris.before, count, per_page_uris.after))
                })
                .collect(),
        }
    }
}

/// Range controls for the range facets of a results page, handles placed on
/// the range the page is currently filtered by.
pub fn range_controls(results: &PanlResults) -> Vec<RangeControl> {
    results
        .available
        .range_facets
        .iter()
        .filter_map(|facet| {
            let mut control = RangeControl::from_descriptor(facet)?;
            if let Some((low, high)) = active_range(&results.active, &facet.facet_name) {
                control.slide(low, high);
            }
            Some(control)
        })
        .collect()
}

pub fn date_range_controls(results: &PanlResults) -> Vec<DateRangeControl> {
    results
        .available
        .date_range_facets
        .iter()
        .filter_map(DateRangeControl::from_descriptor)
        .collect()
}

fn active_range(active: &ActiveSection, facet_name: &str) -> Option<(i64, i64)> {
    let facet = active
        .facet
        .iter()
        .find(|facet| facet.facet_name == facet_name && facet.value_to.is_some())?;
    let low = facet.value.trim().parse().ok()?;
    let high = facet.value_to.as_deref()?.trim().parse().ok()?;
    Some((low, high))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::panl_response::PanlResultsResponse;
    use crate::range_control::RangeControlState;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn links() -> ViewerLinks {
        ViewerLinks::new("/panl-results-viewer", CollectionUrl::new("mechanical-pencils", "default"))
    }

    fn href(fragment: &str) -> Option<String> {
        Some(format!("/panl-results-viewer/mechanical-pencils/default{fragment}"))
    }

    fn results() -> PanlResults {
        let response: PanlResultsResponse = serde_json::from_value(json!({
            "panl": {
                "canonical_uri": "/Koh-i-Noor/true/1/10/bWpn/",
                "active": {
                    "facet": [
                        {
                            "facet_name": "brand", "name": "Brand", "panl_code": "b",
                            "value": "Koh-i-Noor", "encoded": "Koh-i-Noor", "remove_uri": "/1/10/Wpn/"
                        },
                        {
                            "facet_name": "disassemble", "name": "Disassemble", "panl_code": "W",
                            "value": "true", "encoded": "true", "remove_uri": "/Koh-i-Noor/1/10/bpn/",
                            "is_boolean_facet": true,
                            "inverse_uri": "/Koh-i-Noor/false/1/10/bWpn/",
                            "inverse_encoded": "false"
                        },
                        {
                            "facet_name": "weight", "name": "Weight", "panl_code": "w",
                            "value": "12", "value_to": "20", "encoded": "12~20", "remove_uri": "/"
                        }
                    ],
                    "sort": [
                        {
                            "facet_name": "brand", "name": "Brand", "panl_code": "b", "is_descending": true,
                            "remove_uri": "/Koh-i-Noor/true/1/10/bWpn/", "inverse_uri": "/Koh-i-Noor/true/1/10/bWpn+sb+/"
                        }
                    ]
                },
                "available": {
                    "facets": [
                        {
                            "facet_name": "colours", "name": "Colours", "panl_code": "Q", "is_or_facet": true,
                            "values": [{"value": "Black", "encoded": "Black", "count": 3}],
                            "uris": {"before": "/", "after": "/Q/"}
                        },
                        {
                            "facet_name": "lead_size", "name": "Lead size", "panl_code": "L",
                            "values": [{"value": "0.5 mm", "encoded": "0.5+mm", "count": 7}],
                            "uris": {"before": "/Koh-i-Noor/", "after": "/bL/"}
                        }
                    ],
                    "range_facets": [
                        {
                            "facet_name": "weight", "name": "Weight", "panl_code": "w", "is_range_facet": true,
                            "min": 0, "max": 100,
                            "uris": {"before": "/", "during": "~", "after": "/w+w/", "has_infix": false}
                        }
                    ],
                    "date_range_facets": [
                        {"facet_name": "released", "panl_code": "S", "is_date_range_facet": true}
                    ]
                },
                "sorting": {
                    "remove_uri": "/Koh-i-Noor/true/1/10/bWpn/",
                    "fields": [
                        {"facet_name": "brand", "name": "Brand", "set_uri_asc": "/sb+/", "set_uri_desc": "/sb-/",
                         "add_uri_asc": "/sb+sw+/", "add_uri_desc": "/sb+sw-/"},
                        {"facet_name": "weight", "name": "Weight", "set_uri_asc": "/sw+/", "set_uri_desc": "/sw-/"}
                    ]
                },
                "pagination": {
                    "page_uris": {"before": "/", "after": "p/", "next": "/2/pn/"},
                    "num_per_page_uris": {"before": "/", "after": "n/"}
                },
                "query_operand": {"AND": "/+o/", "OR": "/-o/"}
            }
        }))
        .unwrap();
        response.panl
    }

    #[test]
    fn parses_collection_urls() {
        let url: CollectionUrl = "/mechanical-pencils/brandandname".parse().unwrap();
        assert_eq!(url, CollectionUrl::new("mechanical-pencils", "brandandname"));
        assert_eq!(url.to_string(), "/mechanical-pencils/brandandname");
        assert!("mechanical-pencils".parse::<CollectionUrl>().is_err());
        assert!("/mechanical-pencils/".parse::<CollectionUrl>().is_err());
        assert_eq!("/mechanical-pencils/default/".parse::<CollectionUrl>(), Ok(CollectionUrl::with_default_fieldset("mechanical-pencils")));
        assert_eq!(
            "/mechanical-pencils/default/extra".parse::<CollectionUrl>(),
            Err(CollectionUrlError::Malformed("/mechanical-pencils/default/extra".to_string()))
        );
        assert!("//default".parse::<CollectionUrl>().is_err());
    }

    #[test]
    fn viewer_paths_must_name_an_advertised_collection() {
        let collections = vec!["/mechanical-pencils/default".to_string()];
        let url = CollectionUrl::from_viewer_path(
            "/panl-results-viewer",
            "/panl-results-viewer/mechanical-pencils/default/Koh-i-Noor/b/",
            &collections,
        )
        .unwrap();
        assert_eq!(url, CollectionUrl::with_default_fieldset("mechanical-pencils"));

        assert_eq!(
            CollectionUrl::from_viewer_path("/panl-results-viewer", "/panl-results-viewer/books/default", &collections),
            Err(CollectionUrlError::UnknownCollection("/books/default".to_string()))
        );
        assert!(matches!(
            CollectionUrl::from_viewer_path("/panl-results-viewer", "/panl-results-viewer/books", &collections),
            Err(CollectionUrlError::Malformed(_))
        ));
    }

    #[test]
    fn search_href_uses_the_default_fieldset() {
        assert_eq!(
            search_href("/panl-results-viewer", "mechanical-pencils", "/red/b/"),
            "/panl-results-viewer/mechanical-pencils/default/red/b/"
        );
    }

    #[test]
    fn available_values_splice_the_fragments() {
        let links = links().result_links(&results());

        assert_eq!(links.available[0].kind_label, "OR");
        assert_eq!(
            links.available[0].values,
            vec![FacetValueLink { text: "Black".to_string(), href: href("/Black/Q/").unwrap(), count: None }]
        );
        assert_eq!(
            links.available[1].values,
            vec![FacetValueLink {
                text: "0.5 mm".to_string(),
                href: href("/Koh-i-Noor/0.5+mm/bL/").unwrap(),
                count: Some(7),
            }]
        );
    }

    #[test]
    fn boolean_facets_can_be_inverted() {
        let links = links().result_links(&results());

        assert_eq!(links.active_facets[0].invert, None);
        assert_eq!(
            links.active_facets[1].invert,
            Some(ViewerLink { text: "false".to_string(), href: href("/Koh-i-Noor/false/1/10/bWpn/") })
        );
        assert_eq!(links.active_facets[1].remove.href, href("/Koh-i-Noor/1/10/bpn/"));
    }

    #[test]
    fn active_sort_direction_is_not_offered_again() {
        let links = links().result_links(&results());

        assert_eq!(links.sort_options[0].descending, ViewerLink { text: "DESC".to_string(), href: None });
        assert_eq!(links.sort_options[0].ascending.href, href("/sb+/"));
        assert_eq!(links.sort_options[1].ascending.href, href("/sw+/"));
        assert_eq!(links.active_sorts[0].inverse.text, "Change to ASC");
        assert_eq!(links.clear_sorting.and_then(|link| link.href), href("/Koh-i-Noor/true/1/10/bWpn/"));

        assert_eq!(links.then_sort_by.len(), 1);
        assert_eq!(links.then_sort_by[0].descending.href, href("/sb+sw-/"));
    }

    #[test]
    fn then_sort_is_dropped_when_every_field_offers_it() {
        let mut results = results();
        for field in &mut results.sorting.fields {
            field.add_uri_asc = Some("/x/".to_string());
        }
        assert!(links().result_links(&results).then_sort_by.is_empty());
    }

    #[test]
    fn pagination_and_operands() {
        let links = links().result_links(&results());

        assert_eq!(links.pagination.next.href, href("/2/pn/"));
        assert_eq!(links.pagination.previous, ViewerLink { text: "PREV".to_string(), href: None });
        let per_page = links.pagination.per_page.iter().map(|link| link.href.clone()).collect::<Vec<_>>();
        assert_eq!(per_page, vec![href("/3n/"), href("/5n/"), href("/10n/")]);
        assert_eq!(links.and_operand.href, href("/+o/"));
        assert_eq!(links.or_operand.href, href("/-o/"));
        assert_eq!(links.query, None);
    }

    #[test]
    fn range_controls_start_on_the_active_range() {
        let results = results();
        let controls = range_controls(&results);
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].handles(), (12, 20));
        assert_eq!(controls[0].state(), RangeControlState::Constrained);
        assert_eq!(date_range_controls(&results).len(), 1);
    }
}
