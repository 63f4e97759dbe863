// 📤 Export / Import - CSV history exports and JSON supplier transfer
//
// CSV column order is fixed and every field is double-quoted. Supplier
// import accepts only a JSON array; anything else is rejected the same way
// the original import dialog rejected it.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::Path;

use crate::entities::SupplierRecord;
use crate::history::HistoricalEntry;

pub const HISTORY_CSV_HEADERS: [&str; 10] = [
    "Date",
    "Company",
    "Animal",
    "Price",
    "Grade",
    "Credibility Score",
    "Website",
    "Email",
    "Phone",
    "Address",
];

// ============================================================================
// HISTORY CSV
// ============================================================================

/// Render the historical log as CSV: one header row, one row per entry,
/// every field quoted.
pub fn render_history_csv(entries: &[HistoricalEntry]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(HISTORY_CSV_HEADERS)
        .context("failed to write CSV header")?;

    for entry in entries {
        writer
            .write_record([
                entry.recorded_at.to_rfc3339().as_str(),
                entry.company_name.as_str(),
                entry.animal.as_str(),
                entry.price.as_str(),
                entry.grade.map_or("Not specified", |g| g.as_str()),
                entry.credibility_score.to_string().as_str(),
                entry.website.as_deref().unwrap_or(""),
                entry.email.as_deref().unwrap_or(""),
                entry.phone.as_deref().unwrap_or(""),
                entry.address.as_deref().unwrap_or(""),
            ])
            .context("failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

pub fn write_history_csv(path: &Path, entries: &[HistoricalEntry]) -> Result<()> {
    let csv = render_history_csv(entries)?;
    fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}

// ============================================================================
// SUPPLIER JSON
// ============================================================================

pub fn render_suppliers_json(suppliers: &[SupplierRecord]) -> Result<String> {
    serde_json::to_string_pretty(suppliers).context("failed to serialize suppliers")
}

pub fn write_suppliers_json(path: &Path, suppliers: &[SupplierRecord]) -> Result<()> {
    let json = render_suppliers_json(suppliers)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Parse a supplier import payload. Only a JSON array is accepted.
pub fn parse_suppliers_json(payload: &str) -> Result<Vec<SupplierRecord>> {
    let value: serde_json::Value =
        serde_json::from_str(payload).context("import payload is not valid JSON")?;

    if !value.is_array() {
        bail!("import payload must be a JSON array of suppliers");
    }

    serde_json::from_value(value).context("import payload is not a valid supplier array")
}

pub fn read_suppliers_json(path: &Path) -> Result<Vec<SupplierRecord>> {
    let payload =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_suppliers_json(&payload)
}

/// Conventional export filename: suppliers-YYYY-MM-DD.json
pub fn suppliers_export_filename(now: DateTime<Utc>) -> String {
    format!("suppliers-{}.json", now.format("%Y-%m-%d"))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{HideGrade, SupplierRecord};

    fn now() -> DateTime<Utc> {
        "2024-06-01T10:00:00Z".parse().unwrap()
    }

    fn entries() -> Vec<HistoricalEntry> {
        let mut supplier = SupplierRecord::new(
            "Karoo Hides".to_string(),
            "sales@karoohides.co.za".to_string(),
            "+27 82 123 4567".to_string(),
            "14 Voortrekker Rd".to_string(),
            now(),
        );
        supplier.specialties = vec!["Springbok".to_string()];
        supplier.grade = Some(HideGrade::Aa);
        supplier.website = Some("https://www.karoohides.co.za".to_string());

        vec![
            HistoricalEntry::record(&supplier, "Springbok", 1250, 85, now()),
            HistoricalEntry::record(&supplier, "Kudu", 1800, 85, now()),
        ]
    }

    #[test]
    fn test_csv_has_header_plus_one_row_per_entry() {
        let csv = render_history_csv(&entries()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\"Date\",\"Company\",\"Animal\",\"Price\",\"Grade\""));
    }

    #[test]
    fn test_csv_fields_are_quoted_in_fixed_order() {
        let csv = render_history_csv(&entries()).unwrap();
        let first_row = csv.lines().nth(1).unwrap();
        assert!(first_row.contains("\"Karoo Hides\",\"Springbok\",\"R1250\",\"AA Grade\",\"85\""));
        assert!(first_row.contains("\"sales@karoohides.co.za\""));
    }

    #[test]
    fn test_csv_missing_grade_renders_not_specified() {
        let mut entry = entries().remove(0);
        entry.grade = None;
        entry.website = None;
        let csv = render_history_csv(&[entry]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Not specified\""));
        // Missing website stays an empty quoted field
        assert!(row.contains("\"85\",\"\",\"sales@karoohides.co.za\""));
    }

    #[test]
    fn test_csv_of_empty_history_is_header_only() {
        let csv = render_history_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_suppliers_json_round_trip() {
        let mut supplier = SupplierRecord::new(
            "Cape Exotic Leathers".to_string(),
            "info@capeexotic.co.za".to_string(),
            "+27 21 555 0187".to_string(),
            "8 Harbour View Dr".to_string(),
            now(),
        );
        supplier.specialties = vec!["Ostrich".to_string()];

        let json = render_suppliers_json(std::slice::from_ref(&supplier)).unwrap();
        let parsed = parse_suppliers_json(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, supplier.id);
    }

    #[test]
    fn test_import_rejects_non_array_payloads() {
        assert!(parse_suppliers_json("{\"companyName\": \"X\"}").is_err());
        assert!(parse_suppliers_json("not json at all").is_err());
        assert!(parse_suppliers_json("42").is_err());
    }

    #[test]
    fn test_import_accepts_empty_array() {
        assert!(parse_suppliers_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_export_filename_convention() {
        assert_eq!(suppliers_export_filename(now()), "suppliers-2024-06-01.json");
    }
}
