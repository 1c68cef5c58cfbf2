//! Integration tests for writing reports to disk.

use screener_output::{
    ExportFormat, Exporter, PortfolioReport, PortfolioReportBuilder, ReportEntry, ScreenKind,
};
use std::fs;

fn report(kind: ScreenKind) -> PortfolioReport {
    PortfolioReportBuilder::new(kind)
        .entries([
            ReportEntry::new("AAPL", 187.5, 12.34, 10),
            ReportEntry::new("MSFT", 415.25, 8.0, 4),
        ])
        .total_capital(5_000.0)
        .capital_invested(3_536.0)
        .capital_remaining(1_464.0)
        .unavailable(["RIVN".to_string()])
        .build()
        .unwrap()
}

#[test]
fn test_write_csv_report() {
    let dir = std::env::temp_dir().join("screener-output-csv");
    fs::create_dir_all(&dir).unwrap();

    let report = report(ScreenKind::momentum("3month"));
    let path = report.output_path(&dir, ExportFormat::Csv);
    report.export_to_file(&path, ExportFormat::Csv).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1 + 2 + 1 + 5);
    assert_eq!(lines[1], "AAPL,187.5,12.34,10");
    assert_eq!(lines[3], ",,,");
    assert_eq!(lines[6], "Capital remaining:,1464.00,,");
    assert!(
        path.file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("Quantitative Momentum over - 3month")
    );

    fs::remove_file(path).ok();
}

#[test]
fn test_write_json_report() {
    let dir = std::env::temp_dir().join("screener-output-json");
    fs::create_dir_all(&dir).unwrap();

    let report = report(ScreenKind::EqualWeight);
    let path = report.output_path(&dir, ExportFormat::PrettyJson);
    report.export_to_file(&path, ExportFormat::PrettyJson).unwrap();

    let parsed: PortfolioReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.kind, ScreenKind::EqualWeight);
    assert_eq!(parsed.entries, report.entries);
    assert_eq!(parsed.summary.unavailable, vec!["RIVN"]);

    fs::remove_file(path).ok();
}
