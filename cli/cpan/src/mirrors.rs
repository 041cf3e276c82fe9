// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Mirror reachability for `-p`

use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};
use url::Url;

pub const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Host and port of a mirror URL worth pinging.
pub fn pingable(mirror: &str) -> Option<(String, u16)> {
    let url = Url::parse(mirror).ok()?;
    if !matches!(url.scheme(), "http" | "https" | "ftp") {
        return None;
    }
    let host = url.host_str()?.to_string();
    let port = url.port_or_known_default()?;
    Some((host, port))
}

/// Time to open a TCP connection, or `None` if no address answers.
pub fn ping(host: &str, port: u16, timeout: Duration) -> Option<Duration> {
    let addrs = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            log::debug!("{}: {}", host, e);
            return None;
        }
    };

    for addr in addrs {
        let start = Instant::now();
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_) => return Some(start.elapsed()),
            Err(e) => log::debug!("{}: {}", addr, e),
        }
    }
    None
}

pub fn report_line(mirror: &str, latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("  {:<45} {:>6} ms", mirror, latency.as_millis()),
        None => format!("  {:<45} unreachable", mirror),
    }
}

/// Mirror URLs from the `URL\t` lines of the urllist query.
pub fn parse_urllist(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("URL\t"))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_pingable_schemes() {
        assert_eq!(pingable("http://www.cpan.org/"), Some(("www.cpan.org".to_string(), 80)));
        assert_eq!(pingable("https://cpan.metacpan.org/"), Some(("cpan.metacpan.org".to_string(), 443)));
        assert_eq!(pingable("ftp://ftp.funet.fi/pub/CPAN/"), Some(("ftp.funet.fi".to_string(), 21)));
        assert_eq!(pingable("http://mirror.example:8080/CPAN"), Some(("mirror.example".to_string(), 8080)));
        assert_eq!(pingable("file:///minicpan/"), None);
        assert_eq!(pingable("not a url"), None);
    }

    #[test]
    fn test_ping_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(ping("127.0.0.1", port, PING_TIMEOUT).is_some());
    }

    #[test]
    fn test_ping_closed_port() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        assert_eq!(ping("127.0.0.1", port, Duration::from_millis(500)), None);
    }

    #[test]
    fn test_parse_urllist() {
        let output = "CPAN: loading config\nURL\thttp://www.cpan.org/\nURL\tfile:///minicpan/\n";
        assert_eq!(parse_urllist(output), vec!["http://www.cpan.org/", "file:///minicpan/"]);
    }

    #[test]
    fn test_report_line() {
        assert!(report_line("http://www.cpan.org/", None).ends_with("unreachable"));
        assert!(report_line("http://www.cpan.org/", Some(Duration::from_millis(42))).ends_with("42 ms"));
    }
}
