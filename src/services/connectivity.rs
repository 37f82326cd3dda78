//! Reachability probe for the inference endpoint.

use log::debug;
use std::time::Duration;
use tokio::net::TcpStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl Connectivity {
    /// Submissions pause only once the endpoint is known to be unreachable.
    pub fn allows_submission(&self) -> bool {
        !matches!(self, Self::Offline)
    }
}

/// Opens (and drops) a TCP connection to the endpoint's host and port.
pub async fn probe(endpoint: String, timeout: Duration) -> Connectivity {
    let url = match reqwest::Url::parse(&endpoint) {
        Ok(url) => url,
        Err(e) => {
            debug!("Cannot probe {}: {}", endpoint, e);
            return Connectivity::Offline;
        }
    };
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return Connectivity::Offline;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');

    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_)) => Connectivity::Online,
        Ok(Err(e)) => {
            debug!("{}:{} unreachable: {}", host, port, e);
            Connectivity::Offline
        }
        Err(_) => {
            debug!("{}:{} timed out after {:?}", host, port, timeout);
            Connectivity::Offline
        }
    }
}
