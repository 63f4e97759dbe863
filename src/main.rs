// CLI for the SA Hide Sourcing Agent.
// Dispatch on the first argument; all state lives in a local SQLite store
// (SAHIDE_DB env var, default ./sahide.db).

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Utc};
use std::env;
use std::path::PathBuf;

use sa_hide_agent::{
    default_directory, export, search, HideGrade, HistoryLog, LocalStore, Session, SupplierRecord,
    SupplierRegistry, UserDirectory, VERSION,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "seed" => cmd_seed(),
        "suppliers" => cmd_suppliers(args.get(2).map(String::as_str)),
        "add-supplier" => cmd_add_supplier(&args[2..]),
        "remove-supplier" => cmd_remove_supplier(&args[2..]),
        "search" => cmd_search(&args[2..]),
        "history" => cmd_history(),
        "export-csv" => cmd_export_csv(&args[2..]),
        "export-suppliers" => cmd_export_suppliers(&args[2..]),
        "import-suppliers" => cmd_import_suppliers(&args[2..]),
        "signup" => cmd_signup(&args[2..]),
        "login" => cmd_login(&args[2..]),
        "logout" => cmd_logout(),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("🐃 SA Hide Sourcing Agent v{VERSION}");
    println!();
    println!("Usage: sa-hide-agent <command>");
    println!();
    println!("  seed                                     load the built-in supplier directory");
    println!("  suppliers [term]                         list (or search) suppliers");
    println!("  add-supplier <company> <email> <phone> <address> <specialties,> [grade] [year]");
    println!("  remove-supplier <company>");
    println!("  search <animal>                          quote and score suppliers (login required)");
    println!("  history                                  show the historical log (login required)");
    println!("  export-csv <path>                        export history as CSV");
    println!("  export-suppliers [path]                  export suppliers as JSON");
    println!("  import-suppliers <path>                  import a JSON supplier array");
    println!("  signup <name> <surname> <email> <password> <confirm>");
    println!("  login <email> <password>");
    println!("  logout");
}

fn open_store() -> Result<LocalStore> {
    let path = env::var("SAHIDE_DB").map_or_else(|_| PathBuf::from("sahide.db"), PathBuf::from);
    LocalStore::open(&path)
}

fn require_session(store: &LocalStore) -> Result<Session> {
    store
        .load_session()?
        .context("not logged in - run: sa-hide-agent login <email> <password>")
}

// ============================================================================
// SUPPLIER COMMANDS
// ============================================================================

fn cmd_seed() -> Result<()> {
    let store = open_store()?;
    let existing = store.load_suppliers()?;
    if !existing.is_empty() {
        println!("ℹ️  Store already holds {} suppliers, leaving it alone", existing.len());
        return Ok(());
    }

    let directory = default_directory(Utc::now());
    store.save_suppliers(&directory)?;
    println!("✓ Seeded {} suppliers", directory.len());
    Ok(())
}

fn cmd_suppliers(term: Option<&str>) -> Result<()> {
    let store = open_store()?;
    let registry = SupplierRegistry::from_records(store.load_suppliers()?);

    let records: Vec<&SupplierRecord> = match term {
        Some(term) => registry.search(term, None),
        None => registry.records().iter().collect(),
    };

    if records.is_empty() {
        println!("No suppliers found. Run: sa-hide-agent seed");
        return Ok(());
    }

    println!("📇 {} suppliers", records.len());
    for record in records {
        println!(
            "  {} | {} | {} | {}",
            record.company_name,
            record.grade.map_or("Not specified", |g| g.as_str()),
            record.specialties.join(", "),
            record.email,
        );
    }
    Ok(())
}

fn cmd_add_supplier(args: &[String]) -> Result<()> {
    if args.len() < 5 {
        bail!("usage: add-supplier <company> <email> <phone> <address> <specialties,> [grade] [year]");
    }

    let now = Utc::now();
    let mut record = SupplierRecord::new(
        args[0].clone(),
        args[1].clone(),
        args[2].clone(),
        args[3].clone(),
        now,
    );
    record.specialties = args[4]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    record.grade = args.get(5).and_then(|g| HideGrade::parse(g));
    record.established_year = args.get(6).and_then(|y| y.parse().ok());

    let store = open_store()?;
    let mut registry = SupplierRegistry::from_records(store.load_suppliers()?);
    let company = record.company_name.clone();
    registry.add(record)?;
    store.save_suppliers(registry.records())?;

    println!("✓ Added supplier {company}");
    Ok(())
}

fn cmd_remove_supplier(args: &[String]) -> Result<()> {
    let company = args.first().context("usage: remove-supplier <company>")?;

    let store = open_store()?;
    let mut registry = SupplierRegistry::from_records(store.load_suppliers()?);
    let id = registry
        .find_by_company(company)
        .map(|r| r.id)
        .with_context(|| format!("no supplier named {company:?}"))?;

    registry.remove(id);
    store.save_suppliers(registry.records())?;
    println!("✓ Removed supplier {company}");
    Ok(())
}

// ============================================================================
// SEARCH & HISTORY
// ============================================================================

fn cmd_search(args: &[String]) -> Result<()> {
    let animal = args.first().context("usage: search <animal>")?;

    let store = open_store()?;
    let session = require_session(&store)?;

    let registry = SupplierRegistry::from_records(store.load_suppliers()?);
    let mut log = HistoryLog::from_entries(store.load_history()?);

    let now = Utc::now();
    let results = search::search(&registry, &log, animal, now, now.year())?;

    if results.is_empty() {
        println!("No suppliers trade in {animal:?}.");
        return Ok(());
    }

    println!("🔍 {} ({}): {} suppliers", animal, session.name, results.len());
    for result in &results {
        println!(
            "  {:<30} {:>7}  score {:>3}  {}",
            result.company_name,
            result.price,
            result.credibility.total,
            result.movement.label(),
        );
    }

    for result in results {
        log.append(result.entry);
    }
    store.save_history(log.entries())?;
    println!("✓ Logged {} historical entries", log.count());
    Ok(())
}

fn cmd_history() -> Result<()> {
    let store = open_store()?;
    require_session(&store)?;

    let log = HistoryLog::from_entries(store.load_history()?);
    if log.count() == 0 {
        println!("History is empty. Run a search first.");
        return Ok(());
    }

    println!("📜 {} entries", log.count());
    for entry in log.entries() {
        println!(
            "  {} | {:<30} | {:<12} | {:>7} | score {:>3}",
            entry.recorded_at.format("%Y-%m-%d %H:%M"),
            entry.company_name,
            entry.animal,
            entry.price,
            entry.credibility_score,
        );
    }
    Ok(())
}

// ============================================================================
// IMPORT / EXPORT COMMANDS
// ============================================================================

fn cmd_export_csv(args: &[String]) -> Result<()> {
    let path = args.first().context("usage: export-csv <path>")?;
    let store = open_store()?;
    let entries = store.load_history()?;
    if entries.is_empty() {
        bail!("no historical data to export");
    }
    export::write_history_csv(path.as_ref(), &entries)?;
    println!("✓ Exported {} entries to {path}", entries.len());
    Ok(())
}

fn cmd_export_suppliers(args: &[String]) -> Result<()> {
    let store = open_store()?;
    let suppliers = store.load_suppliers()?;
    if suppliers.is_empty() {
        bail!("no suppliers to export");
    }

    let path = match args.first() {
        Some(path) => path.clone(),
        None => export::suppliers_export_filename(Utc::now()),
    };
    export::write_suppliers_json(path.as_ref(), &suppliers)?;
    println!("✓ Exported {} suppliers to {path}", suppliers.len());
    Ok(())
}

fn cmd_import_suppliers(args: &[String]) -> Result<()> {
    let path = args.first().context("usage: import-suppliers <path>")?;

    let imported = export::read_suppliers_json(path.as_ref())?;
    let store = open_store()?;
    let mut registry = SupplierRegistry::from_records(store.load_suppliers()?);
    let count = imported.len();
    registry.extend(imported);
    store.save_suppliers(registry.records())?;

    println!("✓ Imported {count} suppliers ({} total)", registry.count());
    Ok(())
}

// ============================================================================
// AUTH COMMANDS
// ============================================================================

fn cmd_signup(args: &[String]) -> Result<()> {
    if args.len() < 5 {
        bail!("usage: signup <name> <surname> <email> <password> <confirm>");
    }

    let store = open_store()?;
    let mut directory = UserDirectory::from_users(store.load_users()?);
    let now: DateTime<Utc> = Utc::now();
    directory.signup(&args[0], &args[1], &args[2], &args[3], &args[4], now)?;
    store.save_users(directory.users())?;

    println!("✓ Account created for {}. Now run: sa-hide-agent login {} <password>", args[2], args[2]);
    Ok(())
}

fn cmd_login(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        bail!("usage: login <email> <password>");
    }

    let store = open_store()?;
    let directory = UserDirectory::from_users(store.load_users()?);
    let session = directory.login(&args[0], &args[1], Utc::now())?;
    store.save_session(&session)?;

    println!("✓ Welcome back, {}!", session.name);
    Ok(())
}

fn cmd_logout() -> Result<()> {
    let store = open_store()?;
    store.clear_session()?;
    println!("✓ Logged out");
    Ok(())
}
