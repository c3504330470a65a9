//! Payloads returned by the Panl server: the field-set configuration used to
//! build the LPSE state, and the results page with its precomputed links.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facet_descriptor::{FacetDescriptor, FacetKind};


/// Body of the single-page search configuration request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanlConfigurationResponse {
    pub panl: PanlConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanlConfiguration {
    pub lpse_lookup: BTreeMap<String, usize>,
    /// Index-aligned with the offsets in `lpse_lookup`. Codes that are not
    /// facets (sort, page, query...) leave a hole.
    pub lpse_order: Vec<Option<FacetDescriptor>>,
}

impl PanlConfiguration {
    pub fn descriptor_at(&self, offset: usize) -> Option<&FacetDescriptor> {
        self.lpse_order.get(offset).and_then(Option::as_ref)
    }

    pub fn descriptor(&self, code: &str) -> Option<&FacetDescriptor> {
        self.lpse_lookup.get(code).and_then(|offset| self.descriptor_at(*offset))
    }

    pub fn kind_of(&self, code: &str) -> Option<FacetKind> {
        self.descriptor(code).map(FacetDescriptor::kind)
    }

    /// Facet descriptors in LPSE order.
    pub fn facets(&self) -> impl Iterator<Item = &FacetDescriptor> {
        self.lpse_order.iter().flatten()
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanlResultsResponse {
    pub panl: PanlResults,
    /// Solr's own response, passed through untouched.
    pub response: serde_json::Value,
    #[serde(rename = "responseHeader")]
    pub response_header: serde_json::Value,
}

impl PanlResultsResponse {
    /// Documents in the result page. Solr before 9 puts the list directly
    /// under `response`.
    pub fn documents(&self) -> Vec<serde_json::Value> {
        match &self.response {
            serde_json::Value::Object(obj) => match obj.get("docs") {
                Some(serde_json::Value::Array(docs)) => docs.clone(),
                _ => Vec::new(),
            },
            serde_json::Value::Array(docs) => docs.clone(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanlResults {
    pub canonical_uri: String,
    pub query_respond_to: String,
    pub active: ActiveSection,
    pub available: AvailableSection,
    pub sorting: SortingSection,
    pub pagination: Pagination,
    pub query_operand: QueryOperand,
    pub timings: Timings,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActiveSection {
    pub query: Option<ActiveQuery>,
    pub facet: Vec<ActiveFacet>,
    pub sort: Vec<ActiveSort>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActiveQuery {
    pub panl_code: String,
    pub value: String,
    pub remove_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActiveFacet {
    pub facet_name: String,
    pub name: String,
    pub panl_code: String,
    pub value: String,
    pub value_to: Option<String>,
    pub encoded: String,
    pub remove_uri: String,
    pub is_boolean_facet: bool,
    pub is_or_facet: bool,
    pub is_range_facet: bool,
    pub has_infix: bool,
    pub inverse_uri: Option<String>,
    pub inverse_encoded: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActiveSort {
    pub facet_name: String,
    pub name: String,
    pub panl_code: String,
    pub is_descending: bool,
    pub remove_uri: String,
    pub inverse_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AvailableSection {
    pub facets: Vec<FacetDescriptor>,
    pub range_facets: Vec<FacetDescriptor>,
    pub date_range_facets: Vec<FacetDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SortingSection {
    pub remove_uri: String,
    pub fields: Vec<SortField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SortField {
    pub facet_name: String,
    pub name: String,
    pub set_uri_asc: String,
    pub set_uri_desc: String,
    pub add_uri_asc: Option<String>,
    pub add_uri_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Pagination {
    pub num_results: u64,
    pub num_results_exact: bool,
    pub page_num: u64,
    pub num_pages: u64,
    pub num_per_page: u64,
    pub page_uris: PageUris,
    pub num_per_page_uris: NumPerPageUris,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PageUris {
    pub before: String,
    pub after: String,
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NumPerPageUris {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueryOperand {
    #[serde(rename = "AND")]
    pub and: String,
    #[serde(rename = "OR")]
    pub or: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Timings {
    pub panl_parse_request_time: u64,
    pub panl_build_request_time: u64,
    pub panl_send_request_time: u64,
    pub panl_build_response_time: u64,
    pub panl_total_time: u64,
}
