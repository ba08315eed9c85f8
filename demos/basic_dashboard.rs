/// Basic Dashboard Example
///
/// This example demonstrates:
/// - Loading a record store from CSV text
/// - Listing the options of the four filters
/// - Computing the default dashboard
///
/// Pass a URL or path as the first argument to load a real dataset instead.

use salarydash::{compute_dashboard, DataSource, FilterColumn, FilterCriteria, Panel, RecordStore};

const SAMPLE: &str = "\
ano,senioridade,contrato,tamanho_empresa,cargo,remoto,residencia_iso3,usd
2025,senior,integral,media,Data Science,remoto,USA,180000
2025,pleno,integral,grande,Data Engineer,hibrido,DEU,97000
2024,senior,integral,grande,Data Science,presencial,USA,120000
2024,junior,freelancer,pequena,Data Analyst,remoto,BRA,6000
2023,executivo,integral,grande,Head of Data,remoto,USA,250000
2023,pleno,contrato,media,Data Science,remoto,BRA,12000
";

fn main() {
    println!("=== SalaryDash Basic Dashboard Example ===\n");

    let source = match std::env::args().nth(1) {
        Some(location) => DataSource::parse(&location),
        None => DataSource::Inline(SAMPLE.to_string()),
    };

    // 1. Load the store
    println!("1. Loading records from {}...", source);
    let store = match RecordStore::load(&source) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("   {}", e);
            std::process::exit(1);
        }
    };
    println!("   Loaded {} records\n", store.len());

    // 2. Filter options
    println!("2. Filter options:");
    for column in FilterColumn::ALL {
        let values: Vec<String> = store.distinct_values(column).iter().map(|v| v.to_string()).collect();
        println!("   {}: {}", column.label(), values.join(", "));
    }
    println!();

    // 3. Default dashboard
    println!("3. Dashboard with every value selected:");
    let dashboard = compute_dashboard(&store, &FilterCriteria::all(&store));
    for tile in &dashboard.tiles {
        println!("   {:<18} {}", tile.label, tile.value);
    }
    println!();

    if let Panel::Ready { title, data } = &dashboard.charts.top_titles {
        println!("   {}:", title);
        for row in data {
            println!("     {:<20} US${:.2}", row.title, row.mean_usd);
        }
    }

    if let Panel::Ready { title, data } = &dashboard.charts.remote_modes {
        println!("   {}:", title);
        for row in data {
            println!("     {:<20} {}", row.mode, row.count);
        }
    }

    println!("\n=== Example Complete ===");
}
