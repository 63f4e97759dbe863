// 🔍 Search - quote prices for suppliers trading in one animal
//
// There is no live market feed. Quotes are derived from a SHA-256 digest of
// (company, animal, calendar day) bounded by a per-animal price band, so a
// repeated search on the same day reproduces the same prices and the
// historical log classifies it as Stable instead of random noise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::credibility::{self, ScoreBreakdown};
use crate::entities::{HideGrade, SupplierRecord, SupplierRegistry};
use crate::history::{HistoricalEntry, HistoryLog};
use crate::pricing::{self, PriceMovement, PricingError};

// ============================================================================
// PRICE BANDS
// ============================================================================

/// Inclusive quote range in rand for one hide type. Unknown animals fall
/// into a generic band rather than failing.
pub fn price_band(animal: &str) -> (u64, u64) {
    match animal.to_lowercase().as_str() {
        "springbok" => (600, 1400),
        "blesbok" => (500, 1200),
        "impala" => (550, 1300),
        "kudu" => (900, 2200),
        "ostrich" => (1200, 2800),
        "nguni cow" | "nguni" => (1500, 3500),
        "zebra" => (2500, 6000),
        "goat" => (300, 800),
        "sheep" => (250, 700),
        _ => (400, 1600),
    }
}

/// Deterministic quote for a (company, animal, day) triple.
pub fn quote_price(company: &str, animal: &str, on: DateTime<Utc>) -> u64 {
    let (min, max) = price_band(animal);

    let mut hasher = Sha256::new();
    hasher.update(company.to_lowercase());
    hasher.update("|");
    hasher.update(animal.to_lowercase());
    hasher.update("|");
    hasher.update(on.format("%Y-%m-%d").to_string());
    let digest = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    min + u64::from_be_bytes(seed) % (max - min + 1)
}

// ============================================================================
// SEARCH
// ============================================================================

/// One supplier's quote for the searched animal, scored and classified.
/// `entry` is the log record the caller appends after a successful search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub company_name: String,
    pub animal: String,
    pub price: String,
    pub grade: Option<HideGrade>,
    pub credibility: ScoreBreakdown,
    pub movement: PriceMovement,
    pub entry: HistoricalEntry,
}

/// Quote every supplier trading in `animal` against the current history
/// snapshot. Results are sorted by credibility, best first. The caller owns
/// appending the produced entries to the log and persisting it.
pub fn search(
    registry: &SupplierRegistry,
    history: &HistoryLog,
    animal: &str,
    now: DateTime<Utc>,
    current_year: i32,
) -> Result<Vec<SearchResult>, PricingError> {
    let mut results = Vec::new();

    for supplier in registry.with_specialty(animal) {
        let price = quote_price(&supplier.company_name, animal, now);
        let breakdown = credibility::breakdown(supplier, current_year);
        let entry = HistoricalEntry::record(supplier, animal, price, breakdown.total, now);
        let movement = pricing::delta(history.entries(), &entry)?;

        results.push(SearchResult {
            company_name: supplier.company_name.clone(),
            animal: entry.animal.clone(),
            price: entry.price.clone(),
            grade: supplier.grade,
            credibility: breakdown,
            movement,
            entry,
        });
    }

    results.sort_by(|a, b| {
        b.credibility
            .total
            .cmp(&a.credibility.total)
            .then_with(|| a.company_name.cmp(&b.company_name))
    });

    Ok(results)
}

// ============================================================================
// SEEDED DIRECTORY
// ============================================================================

/// Built-in supplier directory, stamped with the caller's clock.
pub fn default_directory(now: DateTime<Utc>) -> Vec<SupplierRecord> {
    let mut directory = Vec::new();

    let mut add = |company: &str,
                   website: Option<&str>,
                   email: &str,
                   phone: &str,
                   address: &str,
                   specialties: &[&str],
                   grade: Option<HideGrade>,
                   established_year: i32| {
        let mut record = SupplierRecord::new(
            company.to_string(),
            email.to_string(),
            phone.to_string(),
            address.to_string(),
            now,
        );
        record.website = website.map(str::to_string);
        record.specialties = specialties.iter().map(|s| s.to_string()).collect();
        record.grade = grade;
        record.established_year = Some(established_year);
        directory.push(record);
    };

    add(
        "Karoo Hides (Pty) Ltd",
        Some("https://www.karoohides.co.za"),
        "sales@karoohides.co.za",
        "+27 49 892 3341",
        "14 Voortrekker Rd, Graaff-Reinet, Eastern Cape",
        &["Springbok", "Kudu", "Blesbok"],
        Some(HideGrade::Aa),
        2004,
    );
    add(
        "Cape Exotic Leathers",
        Some("https://capeexotic.co.za"),
        "info@capeexotic.co.za",
        "+27 21 555 0187",
        "8 Harbour View Dr, Paarden Eiland, Cape Town",
        &["Ostrich", "Zebra"],
        Some(HideGrade::Tri),
        1998,
    );
    add(
        "Oudtshoorn Ostrich Traders",
        Some("https://www.ostrichtraders.co.za"),
        "orders@ostrichtraders.co.za",
        "+27 44 272 6658",
        "112 Baron van Reede St, Oudtshoorn",
        &["Ostrich"],
        Some(HideGrade::Aas),
        2001,
    );
    add(
        "Highveld Game Skins",
        None,
        "admin@highveldgame.com",
        "+27 13 752 4410",
        "Plot 27, R40, Mbombela, Mpumalanga",
        &["Kudu", "Impala", "Zebra"],
        Some(HideGrade::A),
        2012,
    );
    add(
        "Nguni Heritage Hides",
        Some("https://nguniheritage.co.za"),
        "hello@nguniheritage.co.za",
        "+27 31 207 8823",
        "45 Umgeni Rd, Durban, KwaZulu-Natal",
        &["Nguni Cow", "Goat"],
        Some(HideGrade::As),
        2016,
    );
    add(
        "Free State Tannery Co-op",
        None,
        "coop@fstannery.org.za",
        "+27 51 430 1190",
        "3 Industrial Ave, Bloemfontein",
        &["Sheep", "Goat", "Nguni Cow"],
        Some(HideGrade::B),
        2019,
    );
    add(
        "Limpopo Bush Traders",
        None,
        "bush@limpopotraders.com",
        "+27 15 291 7734",
        "22 Grobler St, Polokwane",
        &["Impala", "Springbok"],
        None,
        2021,
    );

    directory
}

// ============================================================================
// TESTS
// ============================================================================
