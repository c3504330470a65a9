//! Projects an [`LpseState`] onto the LPSE path the search endpoint reads:
//! the selected values as path segments, then one segment of codes.

use crate::facet_descriptor::FacetDescriptor;
use crate::lpse_state::LpseState;
use crate::panl_const::{RANGE_INFIX_CODE_SEPARATOR, RANGE_NO_INFIX_CODE_SEPARATOR};
use crate::panl_response::PanlConfiguration;


/// Builds the path for `state`. Slots are visited in offset order, each value
/// contributes `value/` and its code; range codes carry `-` (infix) or `+`.
///
/// This is a display and bookmarking aid: links used for navigation come from
/// the fragments the backend hands out.
pub fn serialize_lpse_path(state: &LpseState, lpse_order: &[Option<FacetDescriptor>]) -> String {
    let mut values = String::from("/");
    let mut codes = String::new();

    for (offset, slot) in state.populated() {
        let separator = lpse_order
            .get(offset)
            .and_then(Option::as_ref)
            .and_then(range_code_separator);

        for value in slot.selections() {
            values.push_str(value);
            values.push('/');
            codes.push_str(slot.code());
            if let Some(separator) = separator {
                codes.push(separator);
            }
        }
    }

    let path = format!("{values}{codes}/");
    if path == "//" {
        "/".to_string()
    } else {
        path
    }
}

pub fn lpse_path(state: &LpseState, config: &PanlConfiguration) -> String {
    serialize_lpse_path(state, &config.lpse_order)
}

fn range_code_separator(descriptor: &FacetDescriptor) -> Option<char> {
    if !descriptor.kind().is_range() {
        return None;
    }
    Some(if descriptor.uris.has_infix { RANGE_INFIX_CODE_SEPARATOR } else { RANGE_NO_INFIX_CODE_SEPARATOR })
}
