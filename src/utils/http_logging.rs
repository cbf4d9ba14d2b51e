use http::Extensions;
use reqwest::{Client, Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next, Result as MwResult};
use std::time::Instant;
use tracing::{debug, warn};

/// Logs every outgoing request and what came back. Never retries: a failed
/// call is handed back to the caller untouched.
struct RequestLogger;

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> MwResult<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let t0 = Instant::now();
        debug!("→ {method} {url}");

        let res = next.run(req, extensions).await;

        match &res {
            Ok(resp) => debug!(
                status = resp.status().as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "← {method} {url}"
            ),
            Err(err) => warn!(
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "✖ {method} {url} failed: {err}"
            ),
        }
        res
    }
}

pub fn build_client_with_logging(reqwest_client: Client) -> ClientWithMiddleware {
    ClientBuilder::new(reqwest_client).with(RequestLogger).build()
}
