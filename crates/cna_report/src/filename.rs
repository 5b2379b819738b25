//! crates/cna_report/src/filename.rs
//! Export filename convention: `<slug(title)>-report-<YYYY-MM-DD>.<ext>`.
//! Every format shares the stem, differing only by extension.

use chrono::NaiveDate;

/// Lowercase the title and collapse each whitespace run into one hyphen.
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_run = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('-');
                in_run = true;
            }
        } else {
            for lc in c.to_lowercase() {
                out.push(lc);
            }
            in_run = false;
        }
    }
    out
}

/// Filename for one export of `title` generated on `date`.
pub fn export_filename(title: &str, date: NaiveDate, ext: &str) -> String {
    format!("{}-report-{}.{}", slug(title), date.format("%Y-%m-%d"), ext)
}
