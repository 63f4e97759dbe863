// 🎯 Credibility Scorer - bounded [0,100] trust heuristic for suppliers
//
// Additive point model over business age, hide grade, and contact
// completeness. Deterministic: the current year is an explicit parameter,
// never an ambient clock read.

use serde::{Deserialize, Serialize};

use crate::entities::SupplierRecord;

pub const BASE_POINTS: i64 = 50;
pub const LONGEVITY_POINTS_PER_YEAR: i64 = 5;
pub const MAX_LONGEVITY_POINTS: i64 = 30;
pub const LOCAL_WEBSITE_POINTS: i64 = 10;
pub const CONTACT_POINTS: i64 = 10;

/// Per-term breakdown of a credibility score, for display alongside the
/// clamped total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub longevity: i64,
    pub grade: i64,
    pub local_website: i64,
    pub contact: i64,
    /// Sum of all terms, clamped to [0, 100].
    pub total: u8,
}

/// Score a supplier for the given current year. Always in [0, 100].
///
/// Missing or malformed optional fields contribute zero points; this never
/// fails. An `established_year` in the future floors the longevity term at 0.
pub fn score(supplier: &SupplierRecord, current_year: i32) -> u8 {
    breakdown(supplier, current_year).total
}

pub fn breakdown(supplier: &SupplierRecord, current_year: i32) -> ScoreBreakdown {
    let longevity = longevity_points(supplier.established_year, current_year);
    let grade = supplier.grade.map_or(0, |g| g.credibility_weight());
    let local_website = if has_local_website(supplier) {
        LOCAL_WEBSITE_POINTS
    } else {
        0
    };
    let contact = if supplier.contact_complete() {
        CONTACT_POINTS
    } else {
        0
    };

    let total = (BASE_POINTS + longevity + grade + local_website + contact).clamp(0, 100) as u8;

    ScoreBreakdown {
        base: BASE_POINTS,
        longevity,
        grade,
        local_website,
        contact,
        total,
    }
}

/// `min(years_in_business * 5, 30)`, floored at 0 for future years.
fn longevity_points(established_year: Option<i32>, current_year: i32) -> i64 {
    match established_year {
        Some(year) => {
            let years = i64::from(current_year) - i64::from(year);
            (years.max(0) * LONGEVITY_POINTS_PER_YEAR).min(MAX_LONGEVITY_POINTS)
        }
        None => 0,
    }
}

fn has_local_website(supplier: &SupplierRecord) -> bool {
    supplier
        .website
        .as_deref()
        .map_or(false, |w| w.contains(".co.za"))
}

// ============================================================================
// TESTS
// ============================================================================
