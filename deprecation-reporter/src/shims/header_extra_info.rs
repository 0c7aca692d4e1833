/*!
Extension points of the header extra-info component
*/

use deprecation_notice::DeprecationId;

use crate::core::reporter::DeprecationReporter;

/// Identifier of the `needsSecondRowIf` deprecation; allow-lists key on it
pub const NEEDS_SECOND_ROW_IF: DeprecationId =
    DeprecationId::from_static("discourse.header-extra-info.needs-second-row-if");

const NEEDS_SECOND_ROW_IF_MESSAGE: &str =
    "`needsSecondRowIf` is deprecated. Use widget hooks on `header-second-row`";

/// Formerly registered a predicate deciding whether the header renders a
/// second row. It no longer has any effect beyond reporting its deprecation.
pub fn needs_second_row_if(reporter: &DeprecationReporter) {
    reporter.report(NEEDS_SECOND_ROW_IF_MESSAGE, NEEDS_SECOND_ROW_IF);
}
