// src/core/net.rs
// Blocking HTTP GET against the parcel-details endpoint.

use reqwest::Url;
use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::config::options::{SourceOptions, StatusPolicy};
use crate::error::{Error, Result};

/// Where raw documents come from. One call per identifier, body returned verbatim.
pub trait DocumentSource {
    fn retrieve(&self, id: &str) -> Result<Vec<u8>>;
}

pub struct HttpSource {
    client: Client,
    base: Url,
    id_param: String,
    status: StatusPolicy,
}

impl HttpSource {
    pub fn new(opts: &SourceOptions) -> Result<Self> {
        let base = Url::parse(&opts.base_url).map_err(|e| Error::Url {
            url: opts.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Url {
                url: opts.base_url.clone(),
                reason: s!("not a hierarchical URL"),
            });
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(opts.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            base,
            id_param: opts.id_param.clone(),
            status: opts.status,
        })
    }

    /// `{base_url}?{id_param}={id}`, value percent-encoded.
    pub fn url_for(&self, id: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair(&self.id_param, id);
        url
    }
}

impl DocumentSource for HttpSource {
    fn retrieve(&self, id: &str) -> Result<Vec<u8>> {
        let url = self.url_for(id);
        logd!("GET {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| Error::Http { id: s!(id), source })?;

        let status = resp.status();
        if !status.is_success() {
            match self.status {
                StatusPolicy::Strict => {
                    return Err(Error::Status { id: s!(id), status: status.as_u16() });
                }
                StatusPolicy::Lenient => {
                    logw!("{id}: HTTP {status}, storing body anyway");
                }
            }
        }

        let body = resp
            .bytes()
            .map_err(|source| Error::Http { id: s!(id), source })?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// One-shot HTTP/1.1 server on a free local port.
    /// Returns the base URL and a handle yielding the request line it saw.
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 { break; }
                req.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
            let text = String::from_utf8_lossy(&req).into_owned();
            s!(text.lines().next().unwrap_or_default())
        });
        (format!("http://{addr}/Property/Details"), handle)
    }

    fn local(base_url: String, status: StatusPolicy) -> HttpSource {
        HttpSource::new(&SourceOptions {
            base_url,
            timeout: Duration::from_secs(5),
            status,
            ..SourceOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn retrieve_returns_body_verbatim() {
        let body: &'static [u8] = b"\xff\xfe<p>raw  bytes</p>\n";
        let (url, server) = serve_once("200 OK", body);
        let got = local(url, StatusPolicy::Lenient).retrieve("123").unwrap();
        assert_eq!(got, body);
        assert_eq!(server.join().unwrap(), "GET /Property/Details?parcelId=123 HTTP/1.1");
    }

    #[test]
    fn lenient_stores_non_2xx_body() {
        let (url, server) = serve_once("404 Not Found", b"<html>no such parcel</html>");
        let got = local(url, StatusPolicy::Lenient).retrieve("9").unwrap();
        assert_eq!(got, b"<html>no such parcel</html>");
        server.join().unwrap();
    }

    #[test]
    fn strict_rejects_non_2xx() {
        let (url, server) = serve_once("404 Not Found", b"<html>no such parcel</html>");
        let err = local(url, StatusPolicy::Strict).retrieve("9").unwrap_err();
        assert!(matches!(err, Error::Status { ref id, status: 404 } if id == "9"));
        server.join().unwrap();
    }

    #[test]
    fn url_substitutes_identifier() {
        let src = HttpSource::new(&SourceOptions::default()).unwrap();
        assert_eq!(
            src.url_for("00424629440000010").as_str(),
            "https://pbcpao.gov/Property/Details?parcelId=00424629440000010"
        );
    }

    #[test]
    fn url_keeps_existing_query_and_encodes() {
        let opts = SourceOptions {
            base_url: s!("http://localhost:8080/details?view=full"),
            id_param: s!("pcn"),
            ..SourceOptions::default()
        };
        let src = HttpSource::new(&opts).unwrap();
        assert_eq!(
            src.url_for("12 34&5").as_str(),
            "http://localhost:8080/details?view=full&pcn=12+34%265"
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        let opts = SourceOptions { base_url: s!("not a url"), ..SourceOptions::default() };
        assert!(matches!(HttpSource::new(&opts), Err(Error::Url { .. })));

        let opts = SourceOptions { base_url: s!("mailto:x@example.com"), ..SourceOptions::default() };
        assert!(matches!(HttpSource::new(&opts), Err(Error::Url { .. })));
    }
}
