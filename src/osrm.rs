//! OSRM HTTP adapter for road-network travel times.

use std::collections::HashMap;

use serde::Deserialize;

use crate::graph::location_key;
use crate::traits::{Coordinate, TravelTimeEstimator};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        // OSRM expects lng,lat pairs.
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.1,
            from.0,
            to.1,
            to.0
        )
    }

    fn table_url(&self, locations: &[Coordinate]) -> String {
        let coords = locations
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=duration",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    /// Duration table in minutes, indexed `[from][to]`. Unroutable pairs are `None`.
    pub fn table_minutes(
        &self,
        locations: &[Coordinate],
    ) -> Result<Vec<Vec<Option<f64>>>, reqwest::Error> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .client
            .get(self.table_url(locations))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>())?;

        Ok(body.into_minutes())
    }
}

impl TravelTimeEstimator for OsrmClient {
    fn travel_minutes(&self, from: Coordinate, to: Coordinate) -> Option<f64> {
        let response = self
            .client
            .get(self.route_url(from, to))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        match response {
            Ok(body) => body
                .routes
                .unwrap_or_default()
                .first()
                .map(|route| route.duration / 60.0),
            Err(err) => {
                tracing::warn!(?from, ?to, error = %err, "OSRM route request failed");
                None
            }
        }
    }
}

/// Travel times for a fixed set of locations, fetched with one table request.
///
/// Pairs outside the table are asked of the route service one at a time.
#[derive(Debug, Clone)]
pub struct OsrmTable {
    client: OsrmClient,
    index: HashMap<String, usize>,
    minutes: Vec<Vec<Option<f64>>>,
}

impl OsrmTable {
    pub fn fetch(client: OsrmClient, locations: &[Coordinate]) -> Self {
        let mut index = HashMap::new();
        let mut unique = Vec::new();
        for &location in locations {
            index.entry(location_key(location)).or_insert_with(|| {
                unique.push(location);
                unique.len() - 1
            });
        }

        let minutes = match client.table_minutes(&unique) {
            Ok(rows) if rows.len() == unique.len() => rows,
            Ok(rows) => {
                tracing::warn!(
                    expected = unique.len(),
                    rows = rows.len(),
                    "OSRM table has the wrong shape, using route requests"
                );
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "OSRM table request failed, using route requests");
                Vec::new()
            }
        };
        if minutes.is_empty() {
            index.clear();
        }
        tracing::debug!(locations = index.len(), "prefetched OSRM table");

        Self {
            client,
            index,
            minutes,
        }
    }

    /// `Some(cell)` when both ends are in the table.
    fn cached(&self, from: Coordinate, to: Coordinate) -> Option<Option<f64>> {
        let from = *self.index.get(&location_key(from))?;
        let to = *self.index.get(&location_key(to))?;
        self.minutes.get(from)?.get(to).copied()
    }
}

impl TravelTimeEstimator for OsrmTable {
    fn travel_minutes(&self, from: Coordinate, to: Coordinate) -> Option<f64> {
        match self.cached(from, to) {
            Some(minutes) => minutes,
            None => self.client.travel_minutes(from, to),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    /// Seconds; `null` where no route exists.
    durations: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    fn into_minutes(self) -> Vec<Vec<Option<f64>>> {
        self.durations
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.map(|secs| secs / 60.0)).collect())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Seconds.
    duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_swaps_to_lng_lat() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://osrm.local/".to_string(),
            ..OsrmConfig::default()
        })
        .expect("build client");

        let url = client.route_url((40.7128, -74.006), (40.7306, -73.9352));
        assert_eq!(
            url,
            "http://osrm.local/route/v1/car/-74.006000,40.712800;-73.935200,40.730600?overview=false"
        );
    }

    #[test]
    fn test_route_response_parses_duration() {
        let body = r#"{"code":"Ok","routes":[{"duration":600.0,"distance":4200.5}],"waypoints":[]}"#;
        let parsed: OsrmRouteResponse = serde_json::from_str(body).expect("parse");
        let minutes = parsed.routes.unwrap()[0].duration / 60.0;
        assert_eq!(minutes, 10.0);
    }

    #[test]
    fn test_unreachable_server_yields_no_estimate() {
        assert_eq!(offline_client().travel_minutes((0.0, 0.0), (0.1, 0.1)), None);
    }

    fn offline_client() -> OsrmClient {
        OsrmClient::new(OsrmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            profile: "car".to_string(),
            timeout_secs: 1,
        })
        .expect("build client")
    }

    #[test]
    fn test_table_url_lists_every_location() {
        let client = OsrmClient::new(OsrmConfig::default()).expect("build client");

        let url = client.table_url(&[(40.7128, -74.006), (40.758, -73.9855)]);
        assert_eq!(
            url,
            "http://localhost:5000/table/v1/car/-74.006000,40.712800;-73.985500,40.758000?annotations=duration"
        );
    }

    #[test]
    fn test_table_response_keeps_unroutable_cells() {
        let body = r#"{"code":"Ok","durations":[[0.0,120.0],[null,0.0]]}"#;
        let parsed: OsrmTableResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(
            parsed.into_minutes(),
            vec![vec![Some(0.0), Some(2.0)], vec![None, Some(0.0)]]
        );
    }

    #[test]
    fn test_table_answers_without_network() {
        let downtown = (40.7128, -74.006);
        let times_square = (40.758, -73.9855);
        let table = OsrmTable {
            client: offline_client(),
            index: HashMap::from([
                (location_key(downtown), 0),
                (location_key(times_square), 1),
            ]),
            minutes: vec![vec![Some(0.0), Some(14.5)], vec![None, Some(0.0)]],
        };

        assert_eq!(table.travel_minutes(downtown, times_square), Some(14.5));
        // A null cell is an answer, not a miss.
        assert_eq!(table.travel_minutes(times_square, downtown), None);
        // Unknown pairs go to the route service, which is down here.
        assert_eq!(table.travel_minutes(downtown, (0.0, 0.0)), None);
    }

    #[test]
    fn test_failed_table_fetch_falls_back_to_routes() {
        let table = OsrmTable::fetch(offline_client(), &[(40.7128, -74.006), (40.758, -73.9855)]);
        assert!(table.index.is_empty());
        assert_eq!(table.travel_minutes((40.7128, -74.006), (40.758, -73.9855)), None);
    }
}
