// 🐃 Supplier Entity - Hide suppliers with grade and specialty tags
//
// Problem solved:
// - "Karoo Hides (Pty) Ltd" sells Springbok AND Kudu hides → one record,
//   many specialty tags
// - Grades come from user input and imports → unknown labels must degrade
//   to "ungraded", never reject a record
// - UUID provides stable identity across edits; values change in place

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// HIDE GRADE
// ============================================================================

/// Hide quality tier. Ordered by credibility weight, not alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HideGrade {
    #[serde(rename = "Tri Grade")]
    Tri,
    #[serde(rename = "AAS Grade")]
    Aas,
    #[serde(rename = "AA Grade")]
    Aa,
    #[serde(rename = "A Grade")]
    A,
    #[serde(rename = "AS Grade")]
    As,
    #[serde(rename = "B Grade")]
    B,
    #[serde(rename = "BS Grade")]
    Bs,
    #[serde(rename = "SMALL Grade")]
    Small,
}

impl HideGrade {
    pub const ALL: [HideGrade; 8] = [
        HideGrade::Tri,
        HideGrade::Aas,
        HideGrade::Aa,
        HideGrade::A,
        HideGrade::As,
        HideGrade::B,
        HideGrade::Bs,
        HideGrade::Small,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HideGrade::Tri => "Tri Grade",
            HideGrade::Aas => "AAS Grade",
            HideGrade::Aa => "AA Grade",
            HideGrade::A => "A Grade",
            HideGrade::As => "AS Grade",
            HideGrade::B => "B Grade",
            HideGrade::Bs => "BS Grade",
            HideGrade::Small => "SMALL Grade",
        }
    }

    /// Fixed contribution to the credibility score.
    pub fn credibility_weight(&self) -> i64 {
        match self {
            HideGrade::Tri => 25,
            HideGrade::Aas => 20,
            HideGrade::Aa => 15,
            HideGrade::A => 10,
            HideGrade::As => 8,
            HideGrade::B => 5,
            HideGrade::Bs => 3,
            HideGrade::Small => 2,
        }
    }

    /// Lenient parse: unknown labels map to None (zero weight), never an error.
    pub fn parse(label: &str) -> Option<HideGrade> {
        let label = label.trim();
        HideGrade::ALL.iter().copied().find(|g| g.as_str() == label)
    }
}

/// Deserializer for grade fields: tolerates missing, null, and unrecognized
/// labels by mapping all of them to None.
pub fn lenient_grade<'de, D>(deserializer: D) -> Result<Option<HideGrade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(HideGrade::parse))
}

// ============================================================================
// SUPPLIER RECORD
// ============================================================================

/// One hide supplier.
///
/// Identity: `id` (UUID, never changes).
/// Values: everything else, mutated in place on edit. No versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRecord {
    pub id: Uuid,

    pub company_name: String,

    #[serde(default)]
    pub website: Option<String>,

    pub email: String,

    pub phone: String,

    pub address: String,

    /// Animal names this supplier trades in. Must be non-empty.
    pub specialties: Vec<String>,

    #[serde(default, deserialize_with = "lenient_grade")]
    pub grade: Option<HideGrade>,

    #[serde(default)]
    pub established_year: Option<i32>,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupplierRecord {
    pub fn new(company_name: String, email: String, phone: String, address: String, now: DateTime<Utc>) -> Self {
        SupplierRecord {
            id: Uuid::new_v4(),
            company_name,
            website: None,
            email,
            phone,
            address,
            specialties: Vec::new(),
            grade: None,
            established_year: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when email, phone, and address are all present and non-empty.
    pub fn contact_complete(&self) -> bool {
        !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
            && !self.address.trim().is_empty()
    }

    pub fn has_specialty(&self, animal: &str) -> bool {
        self.specialties
            .iter()
            .any(|s| s.eq_ignore_ascii_case(animal))
    }

    /// Free-text match over company name, email, and phone.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.company_name.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
            || self.phone.contains(&term)
    }

    /// Basic format checks only: required fields, email shape, SA phone shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.company_name.trim().is_empty() {
            return Err(ValidationError::MissingField("companyName"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingField("phone"));
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::MissingField("address"));
        }
        if self.specialties.is_empty() {
            return Err(ValidationError::NoSpecialties);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if !is_valid_phone(&self.phone) {
            return Err(ValidationError::InvalidPhone(self.phone.clone()));
        }
        Ok(())
    }
}

/// Shape: `local@domain.tld`, no whitespace, one `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Shape: `+27 ## ### ####` (e.g. "+27 82 123 4567").
fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    if bytes.len() != 16 || !phone.starts_with("+27 ") {
        return false;
    }
    bytes.iter().enumerate().skip(4).all(|(i, &c)| match i {
        6 | 10 => c == b' ',
        _ => c.is_ascii_digit(),
    })
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),

    #[error("at least one specialty is required")]
    NoSpecialties,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid phone number (expected +27 ## ### ####): {0}")]
    InvalidPhone(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("supplier not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

// ============================================================================
// SUPPLIER REGISTRY
// ============================================================================

/// In-memory supplier list. The registry owns no storage: callers load it
/// from and save it to `store::LocalStore`.
#[derive(Debug, Default)]
pub struct SupplierRegistry {
    records: Vec<SupplierRecord>,
}

impl SupplierRegistry {
    pub fn new() -> Self {
        SupplierRegistry { records: Vec::new() }
    }

    pub fn from_records(records: Vec<SupplierRecord>) -> Self {
        SupplierRegistry { records }
    }

    pub fn records(&self) -> &[SupplierRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SupplierRecord> {
        self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a supplier after validation.
    pub fn add(&mut self, record: SupplierRecord) -> Result<(), RegistryError> {
        record.validate()?;
        self.records.push(record);
        Ok(())
    }

    /// Append records without validation (import path: trust the payload's
    /// shape, same as the original import behavior).
    pub fn extend(&mut self, records: Vec<SupplierRecord>) {
        self.records.extend(records);
    }

    /// Mutate a supplier in place. Re-validates and stamps `updated_at`.
    pub fn update<F>(&mut self, id: Uuid, now: DateTime<Utc>, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut SupplierRecord),
    {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        f(record);
        record.updated_at = now;
        record.validate()?;
        Ok(())
    }

    /// Remove a supplier. Returns false when the id is unknown.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&SupplierRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_company(&self, company: &str) -> Option<&SupplierRecord> {
        self.records
            .iter()
            .find(|r| r.company_name.eq_ignore_ascii_case(company))
    }

    /// Suppliers trading in the given animal.
    pub fn with_specialty(&self, animal: &str) -> Vec<&SupplierRecord> {
        self.records
            .iter()
            .filter(|r| r.has_specialty(animal))
            .collect()
    }

    /// Combined search + specialty filter, as the management page offers.
    pub fn search(&self, term: &str, specialty: Option<&str>) -> Vec<&SupplierRecord> {
        self.records
            .iter()
            .filter(|r| r.matches_search(term))
            .filter(|r| specialty.map_or(true, |s| r.has_specialty(s)))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(now: DateTime<Utc>) -> SupplierRecord {
        let mut record = SupplierRecord::new(
            "Karoo Hides (Pty) Ltd".to_string(),
            "sales@karoohides.co.za".to_string(),
            "+27 82 123 4567".to_string(),
            "14 Voortrekker Rd, Graaff-Reinet".to_string(),
            now,
        );
        record.specialties = vec!["Springbok".to_string(), "Kudu".to_string()];
        record.grade = Some(HideGrade::Aa);
        record.established_year = Some(2009);
        record
    }

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_grade_parse_known_labels() {
        assert_eq!(HideGrade::parse("Tri Grade"), Some(HideGrade::Tri));
        assert_eq!(HideGrade::parse("SMALL Grade"), Some(HideGrade::Small));
        assert_eq!(HideGrade::parse("  AA Grade "), Some(HideGrade::Aa));
    }

    #[test]
    fn test_grade_parse_unknown_is_none() {
        assert_eq!(HideGrade::parse("Premium"), None);
        assert_eq!(HideGrade::parse(""), None);
        assert_eq!(HideGrade::parse("aa grade"), None);
    }

    #[test]
    fn test_grade_weights_descend() {
        let weights: Vec<i64> = HideGrade::ALL.iter().map(|g| g.credibility_weight()).collect();
        let mut sorted = weights.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(weights, sorted);
        assert_eq!(HideGrade::Tri.credibility_weight(), 25);
        assert_eq!(HideGrade::Small.credibility_weight(), 2);
    }

    #[test]
    fn test_lenient_grade_deserialization() {
        let json = r#"{
            "id": "f3b5a8a0-0000-0000-0000-000000000001",
            "companyName": "Cape Leather Co",
            "email": "info@capeleather.co.za",
            "phone": "+27 21 555 0101",
            "address": "8 Harbour St, Cape Town",
            "specialties": ["Ostrich"],
            "grade": "Superduper Grade",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let record: SupplierRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.grade, None);
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        assert_eq!(sample(now()).validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_specialties() {
        let mut record = sample(now());
        record.specialties.clear();
        assert_eq!(record.validate(), Err(ValidationError::NoSpecialties));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut record = sample(now());
        record.email = "not-an-email".to_string();
        assert!(matches!(record.validate(), Err(ValidationError::InvalidEmail(_))));

        record.email = "two@at@signs.com".to_string();
        assert!(matches!(record.validate(), Err(ValidationError::InvalidEmail(_))));
    }

    #[test]
    fn test_validate_rejects_bad_phone() {
        let mut record = sample(now());
        record.phone = "082 123 4567".to_string();
        assert!(matches!(record.validate(), Err(ValidationError::InvalidPhone(_))));

        record.phone = "+27 82 123 456".to_string();
        assert!(matches!(record.validate(), Err(ValidationError::InvalidPhone(_))));
    }

    #[test]
    fn test_registry_add_and_find() {
        let mut registry = SupplierRegistry::new();
        let record = sample(now());
        let id = record.id;
        registry.add(record).unwrap();

        assert_eq!(registry.count(), 1);
        assert!(registry.find_by_id(id).is_some());
        assert!(registry.find_by_company("karoo hides (pty) ltd").is_some());
    }

    #[test]
    fn test_registry_update_stamps_updated_at() {
        let mut registry = SupplierRegistry::new();
        let record = sample(now());
        let id = record.id;
        registry.add(record).unwrap();

        let later: DateTime<Utc> = "2024-07-01T00:00:00Z".parse().unwrap();
        registry
            .update(id, later, |r| r.notes = Some("Visited in July".to_string()))
            .unwrap();

        let updated = registry.find_by_id(id).unwrap();
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.notes.as_deref(), Some("Visited in July"));
    }

    #[test]
    fn test_registry_update_rejects_invalidating_edit() {
        let mut registry = SupplierRegistry::new();
        let record = sample(now());
        let id = record.id;
        registry.add(record).unwrap();

        let result = registry.update(id, now(), |r| r.specialties.clear());
        assert_eq!(result, Err(RegistryError::Invalid(ValidationError::NoSpecialties)));
    }

    #[test]
    fn test_registry_remove() {
        let mut registry = SupplierRegistry::new();
        let record = sample(now());
        let id = record.id;
        registry.add(record).unwrap();

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_specialty_filter_is_case_insensitive() {
        let mut registry = SupplierRegistry::new();
        registry.add(sample(now())).unwrap();

        assert_eq!(registry.with_specialty("springbok").len(), 1);
        assert_eq!(registry.with_specialty("SPRINGBOK").len(), 1);
        assert_eq!(registry.with_specialty("Zebra").len(), 0);
    }

    #[test]
    fn test_search_matches_company_email_phone() {
        let mut registry = SupplierRegistry::new();
        registry.add(sample(now())).unwrap();

        assert_eq!(registry.search("karoo", None).len(), 1);
        assert_eq!(registry.search("karoohides.co.za", None).len(), 1);
        assert_eq!(registry.search("82 123", None).len(), 1);
        assert_eq!(registry.search("karoo", Some("Kudu")).len(), 1);
        assert_eq!(registry.search("karoo", Some("Zebra")).len(), 0);
        assert_eq!(registry.search("durban", None).len(), 0);
    }
}
