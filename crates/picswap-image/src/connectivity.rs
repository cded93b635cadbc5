use std::{
    net::{SocketAddr, TcpStream},
    time::{Duration, Instant},
};

use reqwest::Url;

/// Best-effort check whether a URL's host can be reached right now.
///
/// A positive answer is no guarantee: the connection can still drop before or
/// during the request. Loaders use it only to skip requests that are bound to
/// fail.
pub trait Connectivity {
    /// Returns `true` if `url`'s host looks reachable.
    fn is_reachable(&self, url: &Url) -> bool;
}

/// Probes reachability by opening a TCP connection to the URL's host and port.
///
/// The timeout covers the whole probe, however many addresses the host
/// resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    /// Default time allowed for the whole probe.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// Creates a probe that gives up after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl Connectivity for TcpProbe {
    fn is_reachable(&self, url: &Url) -> bool {
        let addrs = match url.socket_addrs(|| None) {
            Ok(addrs) => addrs,
            Err(err) => {
                log::debug!("cannot resolve {url}: {err}");
                return false;
            }
        };
        connects_within(&addrs, self.timeout)
    }
}

// Tries the addresses in order, sharing one deadline between them.
fn connects_within(addrs: &[SocketAddr], budget: Duration) -> bool {
    let deadline = Instant::now() + budget;
    addrs.iter().any(|addr| {
        let remaining = deadline.saturating_duration_since(Instant::now());
        !remaining.is_zero() && TcpStream::connect_timeout(addr, remaining).is_ok()
    })
}

/// Reports every host as unreachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offline;

impl Connectivity for Offline {
    fn is_reachable(&self, _url: &Url) -> bool {
        false
    }
}

impl<C: Connectivity + ?Sized> Connectivity for &C {
    fn is_reachable(&self, url: &Url) -> bool {
        (**self).is_reachable(url)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn test_tcp_probe_reaches_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        assert!(TcpProbe::default().is_reachable(&url));
    }

    #[test]
    fn test_unreachable_addresses_share_one_deadline() {
        // Non-routable; connects either hang until the timeout or fail fast.
        let addrs = vec![SocketAddr::from(([10, 255, 255, 1], 81)); 5];
        let start = Instant::now();
        assert!(!connects_within(&addrs, Duration::from_millis(200)));
        assert!(start.elapsed() < Duration::from_millis(800));
    }

    #[test]
    fn test_connects_within_finds_listening_address() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addrs = [listener.local_addr().unwrap()];
        assert!(connects_within(&addrs, Duration::from_secs(2)));
        assert!(!connects_within(&addrs, Duration::ZERO));
    }

    #[test]
    fn test_tcp_probe_without_host() {
        let url = Url::parse("file:///tmp/image.png").unwrap();
        assert!(!TcpProbe::default().is_reachable(&url));
    }

    #[test]
    fn test_offline() {
        let url = Url::parse("https://picsum.photos/1024").unwrap();
        assert!(!Offline.is_reachable(&url));
    }
}
