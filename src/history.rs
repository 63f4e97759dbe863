// 📜 Historical Log - append-only record of price observations
//
// One entry per (supplier × searched animal) pairing at search time. Entries
// are never mutated or deleted; the surrounding app offers only create and
// export. Contact fields are copied in at record time so the log stays
// meaningful after a supplier is edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::supplier::{lenient_grade, HideGrade, SupplierRecord};
use crate::pricing::format_price;

// ============================================================================
// HISTORICAL ENTRY
// ============================================================================

/// One immutable price observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEntry {
    pub id: Uuid,

    pub recorded_at: DateTime<Utc>,

    pub company_name: String,

    pub animal: String,

    /// Wire format: `R<integer>`, e.g. "R1250".
    pub price: String,

    #[serde(default, deserialize_with = "lenient_grade")]
    pub grade: Option<HideGrade>,

    pub credibility_score: u8,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
}

impl HistoricalEntry {
    /// Snapshot a supplier's quote for one animal.
    pub fn record(
        supplier: &SupplierRecord,
        animal: &str,
        price: u64,
        credibility_score: u8,
        now: DateTime<Utc>,
    ) -> Self {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };

        HistoricalEntry {
            id: Uuid::new_v4(),
            recorded_at: now,
            company_name: supplier.company_name.clone(),
            animal: animal.to_string(),
            price: format_price(price),
            grade: supplier.grade,
            credibility_score,
            website: supplier.website.as_deref().and_then(non_empty),
            email: non_empty(&supplier.email),
            phone: non_empty(&supplier.phone),
            address: non_empty(&supplier.address),
        }
    }

    /// Key match for delta lookups: company and animal, case-insensitive.
    pub fn same_key(&self, company: &str, animal: &str) -> bool {
        self.company_name.eq_ignore_ascii_case(company) && self.animal.eq_ignore_ascii_case(animal)
    }

    #[cfg(test)]
    pub fn for_tests(company: &str, animal: &str, price: &str, recorded_at: DateTime<Utc>) -> Self {
        HistoricalEntry {
            id: Uuid::new_v4(),
            recorded_at,
            company_name: company.to_string(),
            animal: animal.to_string(),
            price: price.to_string(),
            grade: None,
            credibility_score: 50,
            website: None,
            email: None,
            phone: None,
            address: None,
        }
    }
}

// ============================================================================
// HISTORY LOG
// ============================================================================

/// Append-only log. Deliberately exposes no edit or delete operations.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoricalEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        HistoryLog { entries: Vec::new() }
    }

    pub fn from_entries(entries: Vec<HistoricalEntry>) -> Self {
        HistoryLog { entries }
    }

    pub fn entries(&self) -> &[HistoricalEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<HistoricalEntry> {
        self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn append(&mut self, entry: HistoricalEntry) {
        self.entries.push(entry);
    }

    /// All observations for one (company, animal) key, in insertion order.
    pub fn for_key(&self, company: &str, animal: &str) -> Vec<&HistoricalEntry> {
        self.entries
            .iter()
            .filter(|e| e.same_key(company, animal))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-01T10:00:00Z".parse().unwrap()
    }

    fn supplier() -> SupplierRecord {
        let mut s = SupplierRecord::new(
            "Karoo Hides".to_string(),
            "sales@karoohides.co.za".to_string(),
            "+27 82 123 4567".to_string(),
            "14 Voortrekker Rd".to_string(),
            now(),
        );
        s.specialties = vec!["Springbok".to_string()];
        s.grade = Some(HideGrade::A);
        s
    }

    #[test]
    fn test_record_snapshots_supplier_fields() {
        let entry = HistoricalEntry::record(&supplier(), "Springbok", 1250, 83, now());

        assert_eq!(entry.company_name, "Karoo Hides");
        assert_eq!(entry.animal, "Springbok");
        assert_eq!(entry.price, "R1250");
        assert_eq!(entry.grade, Some(HideGrade::A));
        assert_eq!(entry.credibility_score, 83);
        assert_eq!(entry.email.as_deref(), Some("sales@karoohides.co.za"));
        assert_eq!(entry.website, None);
    }

    #[test]
    fn test_record_blank_contact_becomes_none() {
        let mut s = supplier();
        s.email = "   ".to_string();
        let entry = HistoricalEntry::record(&s, "Springbok", 100, 50, now());
        assert_eq!(entry.email, None);
    }

    #[test]
    fn test_same_key_is_case_insensitive() {
        let entry = HistoricalEntry::record(&supplier(), "Springbok", 1250, 83, now());
        assert!(entry.same_key("karoo hides", "SPRINGBOK"));
        assert!(!entry.same_key("Karoo Hides", "Kudu"));
    }

    #[test]
    fn test_log_appends_in_order() {
        let mut log = HistoryLog::new();
        log.append(HistoricalEntry::record(&supplier(), "Springbok", 1000, 80, now()));
        log.append(HistoricalEntry::record(&supplier(), "Springbok", 1100, 80, now()));
        log.append(HistoricalEntry::record(&supplier(), "Kudu", 2000, 80, now()));

        assert_eq!(log.count(), 3);
        let springbok = log.for_key("Karoo Hides", "Springbok");
        assert_eq!(springbok.len(), 2);
        assert_eq!(springbok[0].price, "R1000");
        assert_eq!(springbok[1].price, "R1100");
    }

    #[test]
    fn test_entry_json_round_trip() {
        let entry = HistoricalEntry::record(&supplier(), "Springbok", 1250, 83, now());
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoricalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, "R1250");
        assert_eq!(back.grade, Some(HideGrade::A));
        assert_eq!(back.recorded_at, entry.recorded_at);
    }
}
