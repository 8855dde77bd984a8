use crate::{
    error::{StencilError, StencilResult},
    pipeline::{CheckReport, CheckStatus},
};

const PASS_GLYPH: &str = ":white_check_mark:";
const FAIL_GLYPH: &str = ":x:";

/// Render a check report as the fixed markdown table.
///
/// Errors when the report carries no submission name: that means the pipeline
/// stopped before name extraction, and there is nothing to title (or file) the
/// report under.
pub fn render_markdown(report: &CheckReport) -> StencilResult<String> {
    let name = report.submission_name.as_deref().ok_or_else(|| {
        StencilError::report("report unavailable: checks stopped before the submission name was extracted")
    })?;

    let mut out = format!("### Preliminary Checks Report - `{name}`: \n");
    out.push_str("|Check    |Status |\n");
    out.push_str("|:--------|:-----:|\n");

    for (label, status) in report.rows() {
        let glyph = match status {
            CheckStatus::Passed => PASS_GLYPH,
            CheckStatus::Failed | CheckStatus::NotAttempted => FAIL_GLYPH,
        };
        out.push_str(&format!("|{label}|{glyph}|\n"));
    }

    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_name() -> CheckReport {
        CheckReport {
            submission_name: Some("Tom".to_string()),
            ..CheckReport::default()
        }
    }

    #[test]
    fn renders_heading_and_all_four_rows() {
        let mut report = report_with_name();
        report.valid_png = CheckStatus::Passed;
        report.valid_name = CheckStatus::Passed;
        report.valid_dimensions = CheckStatus::Passed;
        report.within_outline = CheckStatus::Passed;

        let md = render_markdown(&report).unwrap();
        assert!(md.starts_with("### Preliminary Checks Report - `Tom`"));
        assert_eq!(md.matches(PASS_GLYPH).count(), 4);
        assert!(md.contains("|Image file is a valid .png|"));
        assert!(md.contains("|Drawing is within outline of template|"));
    }

    #[test]
    fn each_row_renders_its_own_status() {
        let mut report = report_with_name();
        report.valid_png = CheckStatus::Passed;
        report.valid_name = CheckStatus::Failed;

        let md = render_markdown(&report).unwrap();
        assert!(md.contains(&format!("|Image file is a valid .png|{PASS_GLYPH}|")));
        assert!(md.contains(&format!("|Image file has valid name|{FAIL_GLYPH}|")));
    }

    #[test]
    fn unattempted_rows_render_as_failures() {
        let mut report = report_with_name();
        report.valid_png = CheckStatus::Passed;
        report.valid_name = CheckStatus::Passed;
        report.valid_dimensions = CheckStatus::Failed;

        let md = render_markdown(&report).unwrap();
        assert_eq!(md.matches(FAIL_GLYPH).count(), 2);
    }

    #[test]
    fn report_without_name_is_unavailable() {
        let report = CheckReport::default();
        let err = render_markdown(&report).unwrap_err();
        assert!(err.to_string().contains("report unavailable"));
    }
}
