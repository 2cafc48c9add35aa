//! Shared HTTP agent.
//!
//! Dictionary lookups and update checks are small JSON GETs; every one of
//! them must fail fast so a dead network turns into "no result" quickly.

use std::sync::OnceLock;

use crate::error::HttpError;
use crate::model::HTTP_TIMEOUT;

/// Return a shared HTTP agent with the application-wide timeouts.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(HTTP_TIMEOUT)
            .timeout_read(HTTP_TIMEOUT)
            .timeout_write(HTTP_TIMEOUT)
            .build()
    })
}

/// GET `url` with `headers` and decode the body as JSON.
pub(crate) fn get_json<T>(url: &str, query: &[(&str, &str)], headers: &[(&str, &str)]) -> Result<T, HttpError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let mut request = agent().get(url);
    for (name, value) in query {
        request = request.query(name, value);
    }
    for (name, value) in headers {
        request = request.set(name, value);
    }
    let response = request.call().map_err(Box::new)?;
    response.into_json::<T>().map_err(HttpError::Decode)
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_json_once;
    use super::*;

    #[derive(serde::Deserialize)]
    struct Body {
        version: String,
    }

    #[test]
    fn decodes_json_body() {
        let url = serve_json_once(200, r#"{"version":"1.2.3"}"#);
        let body: Body = get_json(&url, &[("q", "hus")], &[("Accept", "application/json")]).unwrap();
        assert_eq!(body.version, "1.2.3");
    }

    #[test]
    fn error_status_is_a_request_error() {
        let url = serve_json_once(500, "{}");
        assert!(matches!(get_json::<Body>(&url, &[], &[]), Err(HttpError::Request(_))));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let url = serve_json_once(200, r#"{"name":"hus"}"#);
        assert!(matches!(get_json::<Body>(&url, &[], &[]), Err(HttpError::Decode(_))));
        let url = serve_json_once(200, "<html>down for maintenance</html>");
        assert!(matches!(get_json::<Body>(&url, &[], &[]), Err(HttpError::Decode(_))));
    }

    #[test]
    fn unreachable_host_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(matches!(
            get_json::<Body>(&format!("http://{addr}/"), &[], &[]),
            Err(HttpError::Request(_))
        ));
    }
}
