use chrono::NaiveDate;
use techdesk_core::model::seed::{seed_clients, seed_ratings, seed_services};
use techdesk_core::report::{
    average_rating, average_rating_by_type, client_name_for_service, dashboard_summary,
    demand_ranking, rateable_services, service_label_for_rating, service_type_popularity,
    MISSING_CLIENT_LABEL, MISSING_SERVICE_LABEL,
};
use techdesk_core::{Client, Rating, RecordId, ServiceRequest, ServiceStatus};

fn client(id: RecordId, name: &str) -> Client {
    Client {
        id,
        name: name.to_string(),
        email: format!("{id}@example.com"),
        phone: "555".to_string(),
    }
}

fn service(id: RecordId, client_id: RecordId, service_type: &str) -> ServiceRequest {
    ServiceRequest {
        id,
        client_id,
        service_type: service_type.to_string(),
        description: None,
        budget: 100.0,
        status: ServiceStatus::Completed,
        date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    }
}

fn rating(id: RecordId, service_id: RecordId, score: u8) -> Rating {
    Rating {
        id,
        service_id,
        score,
        comment: None,
    }
}

#[test]
fn average_rating_of_five_and_four_is_four_and_a_half() {
    assert_eq!(average_rating(&[rating(1, 1, 5), rating(2, 2, 4)]), 4.5);
}

#[test]
fn average_rating_without_ratings_is_zero() {
    assert_eq!(average_rating(&[]), 0.0);
}

#[test]
fn average_rating_rounds_to_one_decimal() {
    let ratings = [rating(1, 1, 5), rating(2, 2, 4), rating(3, 3, 4)];
    assert_eq!(average_rating(&ratings), 4.3);
}

#[test]
fn popularity_counts_and_percentages() {
    let services = [service(1, 1, "A"), service(2, 1, "A"), service(3, 1, "B")];
    let rows = service_type_popularity(&services);

    let counts: Vec<(&str, usize)> = rows
        .iter()
        .map(|row| (row.service_type.as_str(), row.count))
        .collect();
    assert_eq!(counts, vec![("A", 2), ("B", 1)]);
    assert_eq!(rows[0].percentage, 66.7);
    assert_eq!(rows[1].percentage, 33.3);
}

#[test]
fn popularity_keeps_top_five_and_first_seen_order_on_ties() {
    let labels = ["F", "E", "D", "C", "B", "A", "A"];
    let services: Vec<ServiceRequest> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| service(i as RecordId + 1, 1, label))
        .collect();

    let order: Vec<String> = service_type_popularity(&services)
        .into_iter()
        .map(|row| row.service_type)
        .collect();
    assert_eq!(order, vec!["A", "F", "E", "D", "C"]);
}

#[test]
fn popularity_of_no_services_is_empty() {
    assert!(service_type_popularity(&[]).is_empty());
}

#[test]
fn demand_ranking_excludes_clients_without_services() {
    let clients = [client(1, "Acme"), client(2, "Globex")];
    let services = [service(10, 1, "A"), service(11, 1, "B")];

    let ranking = demand_ranking(&clients, &services);
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].client.id, 1);
    assert_eq!(ranking[0].service_count, 2);
}

#[test]
fn demand_ranking_sorts_busiest_first() {
    let clients = [client(1, "Acme"), client(2, "Globex"), client(3, "Initech")];
    let services = [
        service(10, 2, "A"),
        service(11, 3, "A"),
        service(12, 3, "B"),
        service(13, 1, "C"),
    ];

    let ids: Vec<RecordId> = demand_ranking(&clients, &services)
        .iter()
        .map(|row| row.client.id)
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn average_by_type_joins_through_service_ids() {
    let services = [
        service(1, 1, "Network"),
        service(2, 1, "Support"),
        service(3, 2, "Network"),
        service(4, 2, "Backup"),
    ];
    let ratings = [
        rating(20, 1, 3),
        rating(21, 2, 5),
        rating(22, 3, 4),
        // Dangling rating: its service no longer exists.
        rating(23, 99, 1),
    ];

    let rows = average_rating_by_type(&services, &ratings);
    let summary: Vec<(&str, f64, usize)> = rows
        .iter()
        .map(|row| (row.service_type.as_str(), row.average, row.rating_count))
        .collect();
    assert_eq!(summary, vec![("Support", 5.0, 1), ("Network", 3.5, 2)]);
}

#[test]
fn dashboard_summary_over_seed_data() {
    let summary = dashboard_summary(&seed_clients(), &seed_services(), &seed_ratings());
    assert_eq!(summary.total_clients, 2);
    assert_eq!(summary.total_services, 3);
    assert_eq!(summary.completed_services, 2);
    assert_eq!(summary.average_rating, 4.5);
}

#[test]
fn labels_fall_back_to_placeholders_for_dangling_references() {
    let clients = [client(1, "Acme")];
    let services = [service(5, 1, "Backup"), service(6, 42, "Cloud")];

    assert_eq!(client_name_for_service(&clients, &services[0]), "Acme");
    assert_eq!(
        client_name_for_service(&clients, &services[1]),
        MISSING_CLIENT_LABEL
    );
    assert_eq!(service_label_for_rating(&services, &rating(1, 5, 4)), "Backup");
    assert_eq!(
        service_label_for_rating(&services, &rating(2, 77, 4)),
        MISSING_SERVICE_LABEL
    );
}

#[test]
fn rateable_services_lists_completed_and_flags_rated() {
    let clients = [client(1, "Acme")];
    let mut pending = service(3, 1, "Support");
    pending.status = ServiceStatus::Pending;
    let services = [service(1, 1, "Network"), service(2, 1, "Backup"), pending];
    let ratings = [rating(10, 1, 5)];

    let rows = rateable_services(&clients, &services, &ratings);
    let view: Vec<(RecordId, bool, &str)> = rows
        .iter()
        .map(|row| (row.service.id, row.already_rated, row.client_name))
        .collect();
    assert_eq!(view, vec![(1, true, "Acme"), (2, false, "Acme")]);
}
