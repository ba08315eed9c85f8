/// Filters Example
///
/// This example demonstrates:
/// - A session reacting to selection changes
/// - Rejected selections leaving the session untouched
/// - The empty dashboard produced by clearing a selection
/// - Exporting the filtered rows as CSV

use salarydash::{FilterColumn, FilterValue, Panel, Record, RecordStore, Session};
use std::sync::Arc;

fn print_summary(step: &str, session: &Session) {
    let dashboard = session.dashboard();
    println!("{}", step);
    for tile in &dashboard.tiles {
        println!("   {:<18} {}", tile.label, tile.value);
    }
    if let Panel::NoData { message, .. } = &dashboard.charts.distribution {
        println!("   ({})", message);
    }
    println!();
}

fn main() {
    println!("=== SalaryDash Filters Example ===\n");

    let store = Arc::new(RecordStore::from_records(vec![
        Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
        Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
        Record::new(2024, "mid", "contract", "medium", "Data Science", "hybrid", "PRT", 65000.0),
        Record::new(2024, "senior", "full-time", "large", "Data Science", "remote", "USA", 170000.0),
    ]));

    let mut session = Session::new(store);
    print_summary("1. Everything selected:", &session);

    session
        .select(FilterColumn::CompanySize, vec![FilterValue::from("large")])
        .expect("large is a known size");
    print_summary("2. Large companies only:", &session);

    match session.select(FilterColumn::Seniority, vec![FilterValue::from("principal")]) {
        Ok(()) => println!("3. Unexpectedly accepted 'principal'\n"),
        Err(e) => println!("3. Rejected selection: {}\n", e),
    }

    session.select(FilterColumn::Year, Vec::new()).expect("empty selection is valid");
    print_summary("4. No years selected:", &session);

    session.reset();
    session
        .select(FilterColumn::Year, vec![FilterValue::Year(2024)])
        .expect("2024 is a known year");
    println!("5. Detailed table for 2024:");
    print!("{}", session.view().to_csv());

    println!("\n=== Example Complete ===");
}
