//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `techdesk_core` linkage and storage bootstrap from a terminal.
//! - Print the dashboard summary for the configured database.
//! - List the suggested service types offered by the service form.
//!
//! Usage: `techdesk_cli [path/to/techdesk.toml]`

use std::error::Error;
use techdesk_core::db::{open_db, open_db_in_memory};
use techdesk_core::report::{dashboard_summary, demand_ranking, service_type_popularity};
use techdesk_core::{
    init_from_config, DeskConfig, SqliteKeyValueRepository, Store, SERVICE_TYPES,
};

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => DeskConfig::load(path)?,
        None => DeskConfig::default(),
    };
    init_from_config(&config)?;

    println!("techdesk_core ping={}", techdesk_core::ping());
    println!("techdesk_core version={}", techdesk_core::core_version());

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = Store::open_with(SqliteKeyValueRepository::new(&conn), config.store_options());

    for key in store.seeded_collections() {
        println!("seeded collection={}", key.as_str());
    }

    let summary = dashboard_summary(store.clients(), store.services(), store.ratings());
    println!(
        "clients={} services={} completed={} average_rating={:.1}",
        summary.total_clients,
        summary.total_services,
        summary.completed_services,
        summary.average_rating
    );

    for row in demand_ranking(store.clients(), store.services()) {
        println!("demand client={} services={}", row.client.name, row.service_count);
    }
    for row in service_type_popularity(store.services()) {
        println!(
            "popularity type={} count={} share={:.1}%",
            row.service_type, row.count, row.percentage
        );
    }

    println!("service_types={}", SERVICE_TYPES.join(", "));

    Ok(())
}
