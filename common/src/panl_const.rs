//! Constants shared by the viewers and the backend client.

pub const RESULTS_VIEWER_URL: &'static str = "/panl-results-viewer";
pub const SINGLE_PAGE_CONFIG_URL: &'static str = "/panl-single-page";
pub const DEFAULT_FIELDSET: &'static str = "default";

/// Stands in for the range infix when a range has none and one endpoint was
/// replaced by its min/max text.
pub const NO_INFIX_REPLACEMENT: &'static str = "~";

pub const RANGE_INFIX_CODE_SEPARATOR: char = '-';
pub const RANGE_NO_INFIX_CODE_SEPARATOR: char = '+';

pub const PER_PAGE_CHOICES: [u32; 3] = [3, 5, 10];
