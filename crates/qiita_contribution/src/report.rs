//! Comma-separated report output.

use crate::error::ContributionResult;
use crate::score::ContributionRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "qiita_contributions.csv";

const COLUMNS: [&str; 5] = [
    "user_id",
    "item_count",
    "lgtm_count",
    "stock_count",
    "contribution",
];

const RANKED_COLUMNS: [&str; 9] = [
    "rank",
    "user_id",
    "followees",
    "followers",
    "item_count",
    "lgtm_count",
    "stock_count",
    "comment_count",
    "contribution",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportLayout {
    /// Rows in the order users were given.
    #[default]
    Plain,
    /// Leading `rank` column plus follow and comment counts, rows sorted by
    /// contribution, highest first. Ties keep their input order.
    Ranked,
}

/// Write the header and one row per record to `sink`.
pub fn write_report<W: Write>(
    mut sink: W,
    records: &[ContributionRecord],
    layout: ReportLayout,
) -> ContributionResult<()> {
    match layout {
        ReportLayout::Plain => {
            writeln!(sink, "{}", COLUMNS.join(","))?;
            for rec in records {
                writeln!(sink, "{}", format_row(rec))?;
            }
        }
        ReportLayout::Ranked => {
            writeln!(sink, "{}", RANKED_COLUMNS.join(","))?;
            let mut ordered: Vec<&ContributionRecord> = records.iter().collect();
            ordered.sort_by(|a, b| b.score.total_cmp(&a.score));
            for (i, rec) in ordered.into_iter().enumerate() {
                writeln!(sink, "{}", format_ranked_row(i + 1, rec))?;
            }
        }
    }
    sink.flush()?;
    Ok(())
}

/// Create or truncate `path` and write the report into it.
pub fn write_report_file(
    path: &Path,
    records: &[ContributionRecord],
    layout: ReportLayout,
) -> ContributionResult<()> {
    let file = File::create(path)?;
    write_report(BufWriter::new(file), records, layout)
}

fn format_row(rec: &ContributionRecord) -> String {
    format!(
        "{},{},{},{},{:.1}",
        rec.user_id, rec.item_count, rec.endorsement_total, rec.stock_total, rec.score
    )
}

fn format_ranked_row(rank: usize, rec: &ContributionRecord) -> String {
    format!(
        "{rank},{},{},{},{},{},{},{},{:.1}",
        rec.user_id,
        rec.followees,
        rec.followers,
        rec.item_count,
        rec.endorsement_total,
        rec.stock_total,
        rec.comments_total,
        rec.score
    )
}
