use edgar_spider::export::{save_to_excel, save_to_text, Export};
use edgar_spider::stock::sec::FilingResult;
use std::io::Read;
use std::path::Path;

fn filings() -> Vec<FilingResult> {
    vec![
        FilingResult {
            accession_number: "0001065280-24-000001".to_string(),
            filing_date: "2024-01-26".to_string(),
            document: "nflx-20231231.htm".to_string(),
            link: "https://www.sec.gov/Archives/edgar/data/1065280/000106528024000001/nflx-20231231.htm"
                .to_string(),
            source: "recent".to_string(),
        },
        FilingResult {
            accession_number: "0001065280-14-000006".to_string(),
            filing_date: "2014-02-03".to_string(),
            document: "nflx-20131231x10k.htm".to_string(),
            link: "https://www.sec.gov/Archives/edgar/data/1065280/000106528014000006/nflx-20131231x10k.htm"
                .to_string(),
            source: "CIK0001065280-submissions-001.json".to_string(),
        },
    ]
}

/// An XML part of the `.xlsx` (zip) archive at `path`.
fn part(path: &Path, name: &str) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut xml = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn empty_excel_export_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    assert_eq!(save_to_excel(&[], &path).unwrap(), Export::Skipped);
    assert!(!path.exists());
}

#[test]
fn excel_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NFLX_10-Ks_combined_10yrs.xlsx");

    assert_eq!(save_to_excel(&filings(), &path).unwrap(), Export::Saved(2));

    // -- SHEET NAME --
    let workbook = part(&path, "xl/workbook.xml");
    assert!(workbook.contains(r#"<sheet name="NFLX_10-Ks_combined_10yrs.xlsx""#));

    // -- HEADER --
    // written first, so the header row holds the first shared strings, in column order
    let strings = part(&path, "xl/sharedStrings.xml");
    let header: Vec<usize> = ["accessionNumber", "filingDate", "document", "link", "source"]
        .iter()
        .map(|name| strings.find(&format!("<t>{name}</t>")).unwrap())
        .collect();
    assert!(header.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(strings.contains("<t>nflx-20231231.htm</t>"));

    // -- LINKS --
    // formulas, never plain strings
    let sheet = part(&path, "xl/worksheets/sheet1.xml");
    let link = "https://www.sec.gov/Archives/edgar/data/1065280/000106528024000001/nflx-20231231.htm";
    assert!(sheet.contains(&format!(r#"<f>HYPERLINK("{link}", "{link}")</f>"#)));
    assert!(!strings.contains(&format!("<t>{link}</t>")));
    assert_eq!(sheet.matches("<f>HYPERLINK(").count(), 2);

    // -- WIDTHS --
    // longest cell + 2: "0001065280-24-000001" is 20 characters, "nflx-20131231x10k.htm" 21
    assert!(sheet.contains(r#"<col min="1" max="1" width="22.71"#));
    assert!(sheet.contains(r#"<col min="3" max="3" width="23.71"#));
}

#[test]
fn long_file_names_are_cut_to_a_sheet_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NFLX_10-Ks_combined_10yrs_report.xlsx");

    assert_eq!(save_to_excel(&filings(), &path).unwrap(), Export::Saved(2));

    let workbook = part(&path, "xl/workbook.xml");
    assert!(workbook.contains(r#"<sheet name="NFLX_10-Ks_combined_10yrs_repor""#));
}

#[tokio::test]
async fn text_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filings_list.txt");

    assert_eq!(save_to_text(&filings(), &path).await.unwrap(), Export::Saved(2));

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "accessionNumber: 0001065280-24-000001; filingDate: 2024-01-26; \
        document: nflx-20231231.htm; \
        link: https://www.sec.gov/Archives/edgar/data/1065280/000106528024000001/nflx-20231231.htm; \
        source: recent"
    );
    assert!(lines[1].ends_with("source: CIK0001065280-submissions-001.json"));
}

#[tokio::test]
async fn empty_text_export_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filings_list.txt");

    assert_eq!(save_to_text(&[], &path).await.unwrap(), Export::Skipped);
    assert!(!path.exists());
}
