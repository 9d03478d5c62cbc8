//! Request accounting middleware.
//!
//! Wraps every route: one `http_requests_total{path,status}` increment and
//! one latency observation per completed request, a short request id echoed
//! back as `X-Request-ID`, and a completion log line for everything except
//! `/webhook` (which logs its own richer line from the handler).

use ntex::service::{Middleware, Service, ServiceCtx};
use ntex::{http, web};
use std::time::Instant;

use crate::{consts, metric};

pub struct RequestMetrics;

impl<S> Middleware<S> for RequestMetrics {
    type Service = RequestMetricsMiddleware<S>;

    fn create(&self, service: S) -> Self::Service {
        RequestMetricsMiddleware { service }
    }
}

pub struct RequestMetricsMiddleware<S> {
    service: S,
}

impl<S, Err> Service<web::WebRequest<Err>> for RequestMetricsMiddleware<S>
where
    S: Service<web::WebRequest<Err>, Response = web::WebResponse, Error = web::Error>,
    Err: web::ErrorRenderer,
{
    type Response = web::WebResponse;
    type Error = web::Error;

    ntex::forward_ready!(service);

    async fn call(
        &self,
        req: web::WebRequest<Err>,
        ctx: ServiceCtx<'_, Self>,
    ) -> Result<Self::Response, Self::Error> {
        let started = Instant::now();
        let path = req.path().to_string();
        let method = req.method().to_string();
        let request_id = new_request_id();

        let mut res = ctx.call(&self.service, req).await?;

        let status = res.response().status().as_u16();
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        metric::inc_http_requests(&path, status);
        metric::observe_latency(latency_ms);

        if let Ok(value) = http::header::HeaderValue::from_str(&request_id) {
            res.response_mut().headers_mut().insert(
                http::header::HeaderName::from_static(consts::REQUEST_ID_HEADER),
                value,
            );
        }

        if path != "/webhook" {
            log::info!(
                "request completed request_id={request_id} method={method} path={path} status={status} latency_ms={latency_ms:.2}"
            );
        }

        Ok(res)
    }
}

fn new_request_id() -> String {
    let mut request_id = uuid::Uuid::new_v4().simple().to_string();
    request_id.truncate(8);
    request_id
}
