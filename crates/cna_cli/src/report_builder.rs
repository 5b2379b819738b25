// crates/cna_cli/src/report_builder.rs
//
// Composition of the two subsystems: grouped question statistics become a
// report document, one report section per survey section, one statistics
// table per section. The aggregator and the export engine never call each
// other; this is the only place they meet.

use std::collections::BTreeMap;

use cna_core::SurveyResponse;
use cna_report::{CellValue, ContentBlock, ReportDocument, ReportSection, TableBlock};
use cna_stats::{aggregate, group_by_section, QuestionStatistics, StatsError};

const TABLE_HEADERS: [&str; 7] = [
    "Code",
    "Question",
    "Responses",
    "Response Rate",
    "Mean",
    "Mode",
    "Variance",
];

/// Aggregate survey responses and shape the result as a report document.
pub fn build_statistics_report(
    title: &str,
    responses: &[SurveyResponse],
    officer_count: u32,
    labels: &BTreeMap<String, String>,
) -> Result<ReportDocument, StatsError> {
    let stats = aggregate(responses, officer_count, labels)?;
    let item_count = stats.len();
    let sections = group_by_section(stats);

    let mut doc = ReportDocument::new(title);

    let mut overview = ReportSection::new("Overview");
    overview.content.push(ContentBlock::Text {
        text: format!(
            "{officer_count} officers in scope.\n{} responses across {item_count} survey items.",
            responses.len()
        ),
    });
    doc.sections.push(overview);

    for (key, entries) in sections {
        let mut section = ReportSection::new(format!("Section {key}"));
        section
            .content
            .push(ContentBlock::Table(statistics_table(&entries)));
        doc.sections.push(section);
    }

    Ok(doc)
}

fn statistics_table(entries: &[QuestionStatistics]) -> TableBlock {
    TableBlock {
        headers: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: entries.iter().map(statistics_row).collect(),
    }
}

fn statistics_row(s: &QuestionStatistics) -> Vec<CellValue> {
    vec![
        CellValue::from(s.question_code.as_str()),
        CellValue::from(s.question_text.as_str()),
        CellValue::from(s.response_count as i64),
        CellValue::from(response_rate(s.response_count, s.total_possible)),
        CellValue::from(format!("{:.2}", s.average_score)),
        CellValue::from(s.modal_score),
        CellValue::from(format!("{:.2}", s.variance)),
    ]
}

/// One-decimal percent, e.g. "2 of 3 (66.7%)".
fn response_rate(count: u32, possible: u32) -> String {
    let pct = if possible == 0 {
        0.0
    } else {
        count as f64 / possible as f64 * 100.0
    };
    format!("{count} of {possible} ({pct:.1}%)")
}
