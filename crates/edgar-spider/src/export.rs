use crate::stock::sec::FilingResult;
use crate::SpiderError;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Longest worksheet name Excel accepts.
const SHEET_NAME_LIMIT: usize = 31;

/// Outcome of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Export {
    /// Nothing to write; no file was created.
    Skipped,
    /// This many filings were written.
    Saved(usize),
}

/// `=HYPERLINK("url", "url")`; a clickable cell in any spreadsheet.
pub fn hyperlink(url: &str) -> String {
    format!("=HYPERLINK(\"{url}\", \"{url}\")")
}

/// Write `filings` to an `.xlsx` workbook at `path`, links as clickable formulas and every
/// column sized to its longest cell.
///
/// An empty list writes nothing, and says so.
pub fn save_to_excel(filings: &[FilingResult], path: impl AsRef<Path>) -> Result<Export, SpiderError> {
    let path = path.as_ref();
    if filings.is_empty() {
        warn!("no filings to save to {}", path.display());
        println!("No filings to save.");
        return Ok(Export::Skipped);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(path))?;

    for (col, name) in FilingResult::COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    let mut widths = [0usize; FilingResult::COLUMNS.len()];
    for (row, filing) in filings.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, (name, value)) in filing.fields().into_iter().enumerate() {
            let cell = if name == "link" {
                let formula = hyperlink(value);
                worksheet.write_formula(row, col as u16, formula.as_str())?;
                formula
            } else {
                worksheet.write_string(row, col as u16, value)?;
                value.to_string()
            };
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, (width + 2) as f64)?;
    }

    workbook.save(path).map_err(|err| {
        error!("failed to save {}, error({err})", path.display());
        err
    })?;

    info!("{} filings saved to {}", filings.len(), path.display());
    println!("Saved {} filings to {}", filings.len(), path.display());

    Ok(Export::Saved(filings.len()))
}

/// Write `filings` to a text file at `path`, one filing per line as
/// `accessionNumber: ...; filingDate: ...; document: ...; link: ...; source: ...`.
///
/// An empty list writes nothing, and says so.
pub async fn save_to_text(
    filings: &[FilingResult],
    path: impl AsRef<Path>,
) -> Result<Export, SpiderError> {
    let path = path.as_ref();
    if filings.is_empty() {
        warn!("no filings to save to {}", path.display());
        println!("No filings to save.");
        return Ok(Export::Skipped);
    }

    let mut text = String::new();
    for filing in filings {
        let line = filing
            .fields()
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        text.push_str(&line);
        text.push('\n');
    }

    tokio::fs::write(path, text).await.map_err(|err| {
        error!("failed to write {}, error({err})", path.display());
        err
    })?;

    debug!("{} filings written to {}", filings.len(), path.display());
    println!("filings list saved as text to {}", path.display());

    Ok(Export::Saved(filings.len()))
}

/// Sheet name from the file name: at most 31 characters, none of `[]:*?/\`.
fn sheet_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(SHEET_NAME_LIMIT)
        .collect();

    match name.trim_matches('\'') {
        "" => "filings".to_string(),
        name => name.to_string(),
    }
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names() {
        assert_eq!(sheet_name(Path::new("out/NFLX.xlsx")), "NFLX.xlsx");
        assert_eq!(
            sheet_name(Path::new("NFLX_10-Ks_combined_10yrs.xlsx")),
            "NFLX_10-Ks_combined_10yrs.xlsx"
        );
        assert_eq!(
            sheet_name(Path::new("MSFT_DEF 14As_combined_10yrs[1].xlsx")),
            "MSFT_DEF 14As_combined_10yrs_1_"
        );
        assert_eq!(sheet_name(Path::new("")), "filings");
    }

    #[test]
    fn hyperlink_formula() {
        assert_eq!(
            hyperlink("https://www.sec.gov/a.htm"),
            r#"=HYPERLINK("https://www.sec.gov/a.htm", "https://www.sec.gov/a.htm")"#
        );
    }
}
