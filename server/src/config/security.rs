use axum::http::{header, HeaderName, HeaderValue, Request, Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

const PERMISSIONS_POLICY: &str = "permissions-policy";

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

/// JSON and SVG responses load nothing.
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
/// The admin page needs its inline stylesheet, inline SVG codes and
/// same-origin form posts; still no scripts.
const CSP_PAGE_VALUE: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src 'self' data:; form-action 'self'; frame-ancestors 'none'";

#[derive(Clone)]
pub struct SecurityHeadersLayer {
    include_hsts: bool,
}

impl SecurityHeadersLayer {
    pub fn new(include_hsts: bool) -> Self {
        Self { include_hsts }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            include_hsts: self.include_hsts,
        }
    }
}

#[derive(Clone)]
pub struct SecurityHeadersService<S> {
    inner: S,
    include_hsts: bool,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SecurityHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = SecurityHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        SecurityHeadersFuture {
            future: self.inner.call(request),
            include_hsts: self.include_hsts,
        }
    }
}

#[pin_project::pin_project]
pub struct SecurityHeadersFuture<F> {
    #[pin]
    future: F,
    include_hsts: bool,
}

impl<F, ResBody, E> std::future::Future for SecurityHeadersFuture<F>
where
    F: std::future::Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = match this.future.poll(cx) {
            Poll::Ready(Ok(response)) => response,
            other => return other,
        };

        let csp = if is_html(response.headers()) {
            CSP_PAGE_VALUE
        } else {
            CSP_API_VALUE
        };

        let headers = response.headers_mut();
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(NOSNIFF));
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static(DENY));
        headers.insert(header::CONTENT_SECURITY_POLICY, HeaderValue::from_static(csp));
        headers.insert(header::REFERRER_POLICY, HeaderValue::from_static(REFERRER_POLICY_VALUE));
        headers.insert(
            HeaderName::from_static(PERMISSIONS_POLICY),
            HeaderValue::from_static(PERMISSIONS_POLICY_VALUE),
        );

        // Only add HSTS in production (HTTPS environments)
        if *this.include_hsts {
            headers.insert(
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS_VALUE),
            );
        }

        Poll::Ready(Ok(response))
    }
}

fn is_html(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

pub fn create_security_headers_layer(production: bool) -> SecurityHeadersLayer {
    if production {
        tracing::info!("Security: HSTS header enabled (production mode)");
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }
    SecurityHeadersLayer::new(production)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_headers_layer_creation() {
        let layer = create_security_headers_layer(false);
        assert!(!layer.include_hsts);

        let layer_with_hsts = create_security_headers_layer(true);
        assert!(layer_with_hsts.include_hsts);
    }

    #[test]
    fn test_is_html_checks_content_type() {
        let mut headers = axum::http::HeaderMap::new();
        assert!(!is_html(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        assert!(is_html(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        assert!(!is_html(&headers));
    }
}
