//! Server-side HTML for the QR codes admin page.
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;

use super::qr::{render_qr_svg, DEFAULT_QR_SIZE};
use super::QrCodesView;
use crate::models::INVALID_QR_DATA;

const INVALID_INDICATOR: &str = "Invalid QR data";

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub back_url: String,
    pub qr_size: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            back_url: "/admin".to_string(),
            qr_size: DEFAULT_QR_SIZE,
        }
    }
}

/// Renders the whole page for `view`.
///
/// `alert` is a one-off input message shown above everything else; it is
/// not part of the view's error slot.
pub fn render_page(view: &QrCodesView, options: &PageOptions, alert: Option<&str>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Manage QR Codes</title>");
    html.push_str(
        "<style>.error{color:red}.qr-codes{list-style:none;padding:0}.qr-codes li{margin-bottom:1.5em}</style>",
    );
    html.push_str("</head><body><section>");

    if let Some(alert) = alert {
        let _ = write!(html, "<div class=\"alert\" role=\"alert\">{}</div>", escape(alert));
    }

    html.push_str("<h2>Manage QR Codes</h2>");
    let _ = write!(html, "<a class=\"back\" href=\"{}\">Back</a>", escape(&options.back_url));

    let base = view
        .event_id()
        .map(|id| escape(&format!("/admin/events/{}/qr-codes", segment(id.as_str()))));

    if let Some(base) = &base {
        let _ = write!(html, " <a class=\"reload\" href=\"{base}?refresh=true\">Reload</a>");
    }

    if view.is_loading() {
        html.push_str("<div class=\"loading\">Loading...</div>");
    } else if let Some(base) = &base {
        let _ = write!(
            html,
            "<form method=\"post\" action=\"{base}\">\
             <input type=\"text\" name=\"description\" value=\"{}\" placeholder=\"Enter QR Code description\">\
             <button type=\"submit\">Add QR Code</button></form>",
            escape(view.pending_description()),
        );

        html.push_str("<ul class=\"qr-codes\">");
        for record in view.records() {
            let _ = write!(html, "<li id=\"qr-{}\">", escape(&record.id));
            let _ = write!(html, "<p>{}</p>", escape(&record.description));
            html.push_str(&render_code(&record.qr_data, options.qr_size));
            let _ = write!(
                html,
                "<form method=\"post\" action=\"{base}/{}/delete\"><button type=\"submit\">Delete</button></form>",
                escape(&segment(&record.id)),
            );
            html.push_str("</li>");
        }
        html.push_str("</ul>");
    }

    if let Some(error) = view.error() {
        let _ = write!(html, "<p class=\"error\">{}</p>", escape(error));
    }

    html.push_str("</section></body></html>");
    html
}

/// Loading defaults missing payloads to [`INVALID_QR_DATA`]; that marker is
/// shown as the invalid indicator, never encoded.
fn render_code(data: &str, size: u32) -> String {
    if data.is_empty() || data == INVALID_QR_DATA {
        return format!("<p class=\"error\">{INVALID_INDICATOR}</p>");
    }
    match render_qr_svg(data, size) {
        Ok(svg) => format!("<div class=\"qr\" data-value=\"{}\">{svg}</div>", escape(data)),
        Err(e) => {
            tracing::warn!(error = ?e, "Could not encode QR data");
            format!("<p class=\"error\">{INVALID_INDICATOR}</p>")
        }
    }
}

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
