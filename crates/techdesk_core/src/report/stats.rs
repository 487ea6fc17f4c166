//! Aggregate statistics for the dashboard and ratings views.

use crate::model::{Client, Rating, ServiceRequest};

/// Number of service types kept by [`service_type_popularity`].
pub const POPULARITY_TOP_N: usize = 5;

/// Headline counters shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub total_services: usize,
    pub completed_services: usize,
    pub average_rating: f64,
}

/// One row of the client demand ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDemand<'a> {
    pub client: &'a Client,
    pub service_count: usize,
}

/// One row of the service-type popularity table.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePopularity {
    pub service_type: String,
    pub count: usize,
    /// Share of all service requests, in percent.
    pub percentage: f64,
}

/// Mean score for one service type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRating {
    pub service_type: String,
    pub average: f64,
    pub rating_count: usize,
}

pub fn dashboard_summary(
    clients: &[Client],
    services: &[ServiceRequest],
    ratings: &[Rating],
) -> DashboardSummary {
    DashboardSummary {
        total_clients: clients.len(),
        total_services: services.len(),
        completed_services: services.iter().filter(|s| s.is_completed()).count(),
        average_rating: average_rating(ratings),
    }
}

/// Mean of every score in the system; `0.0` when there are no ratings.
pub fn average_rating(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: u64 = ratings.iter().map(|rating| u64::from(rating.score)).sum();
    round_one_decimal(total as f64 / ratings.len() as f64)
}

/// Clients with at least one service request, busiest first.
pub fn demand_ranking<'a>(
    clients: &'a [Client],
    services: &[ServiceRequest],
) -> Vec<ClientDemand<'a>> {
    let mut ranking: Vec<ClientDemand<'a>> = clients
        .iter()
        .map(|client| ClientDemand {
            client,
            service_count: services.iter().filter(|s| s.client_id == client.id).count(),
        })
        .filter(|row| row.service_count > 0)
        .collect();
    ranking.sort_by(|a, b| b.service_count.cmp(&a.service_count));
    ranking
}

/// Most requested service types, at most [`POPULARITY_TOP_N`] rows.
pub fn service_type_popularity(services: &[ServiceRequest]) -> Vec<TypePopularity> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for service in services {
        match counts
            .iter_mut()
            .find(|(label, _)| *label == service.service_type)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((service.service_type.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = services.len();
    counts
        .into_iter()
        .take(POPULARITY_TOP_N)
        .map(|(label, count)| TypePopularity {
            service_type: label.to_string(),
            count,
            percentage: round_one_decimal(count as f64 * 100.0 / total as f64),
        })
        .collect()
}

/// Mean rating per service type, joined through `Rating::service_id`.
///
/// Types without any rated request are omitted. Highest mean first.
pub fn average_rating_by_type(services: &[ServiceRequest], ratings: &[Rating]) -> Vec<TypeRating> {
    // (label, score sum, rating count) in first-appearance order.
    let mut groups: Vec<(&str, u64, usize)> = Vec::new();
    for service in services {
        let scores: Vec<u64> = ratings
            .iter()
            .filter(|rating| rating.service_id == service.id)
            .map(|rating| u64::from(rating.score))
            .collect();
        if scores.is_empty() {
            continue;
        }

        let sum: u64 = scores.iter().sum();
        match groups
            .iter_mut()
            .find(|(label, _, _)| *label == service.service_type)
        {
            Some(group) => {
                group.1 += sum;
                group.2 += scores.len();
            }
            None => groups.push((service.service_type.as_str(), sum, scores.len())),
        }
    }

    let mut rows: Vec<TypeRating> = groups
        .into_iter()
        .map(|(label, sum, count)| TypeRating {
            service_type: label.to_string(),
            average: round_one_decimal(sum as f64 / count as f64),
            rating_count: count,
        })
        .collect();
    rows.sort_by(|a, b| b.average.total_cmp(&a.average));
    rows
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
