//! QR image URLs and offline QR rendering
//!
//! Payment screens show the receiving address as a QR image fetched from a
//! third-party render service. The core only builds the request URL; the
//! address is percent-encoded so reserved characters (`&`, `?`, `#`, `=`, `:`)
//! cannot break out of the `data` parameter. For offline surfaces the address
//! can be rendered locally as SVG or as terminal block characters.

use coindeck_types::{CoindeckError, Result};
use qrcode::render::{svg, unicode};
use qrcode::QrCode;
use serde::{Deserialize, Serialize};

/// QR render service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrServiceConfig {
    /// Render endpoint (without query string parameters for size/data)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Square image edge in pixels
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for QrServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            size: default_size(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.qrserver.com/v1/create-qr-code/".to_string()
}

fn default_size() -> u32 {
    200
}

/// Builds QR image URLs and renders QR codes locally
#[derive(Debug, Clone, Default)]
pub struct QrRenderService {
    config: QrServiceConfig,
}

impl QrRenderService {
    pub fn new(config: QrServiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QrServiceConfig {
        &self.config
    }

    /// Build the render-service URL for an address
    ///
    /// Format: `<endpoint>?size=<n>x<n>&data=<percent-encoded address>`
    pub fn image_url(&self, address: &str) -> String {
        let separator = if self.config.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}size={}x{}&data={}",
            self.config.endpoint,
            separator,
            self.config.size,
            self.config.size,
            urlencoding::encode(address)
        )
    }

    /// Render an address as an SVG document
    pub fn render_svg(&self, data: &str) -> Result<String> {
        let code = encode(data)?;
        Ok(code
            .render::<svg::Color>()
            .min_dimensions(self.config.size, self.config.size)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build())
    }

    /// Render an address with unicode half blocks for terminal display
    pub fn render_terminal(&self, data: &str) -> Result<String> {
        let code = encode(data)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build())
    }
}

fn encode(data: &str) -> Result<QrCode> {
    QrCode::new(data.as_bytes()).map_err(|e| CoindeckError::QrEncode {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";

    #[test]
    fn test_image_url_for_plain_address() {
        let service = QrRenderService::default();
        assert_eq!(
            service.image_url(ADDRESS),
            format!("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data={}", ADDRESS)
        );
    }

    #[test]
    fn test_image_url_escapes_reserved_characters() {
        let service = QrRenderService::default();
        let url = service.image_url("bitcoin:bc1q?amount=0.1&label=a b#x");
        assert!(url.ends_with(
            "data=bitcoin%3Abc1q%3Famount%3D0.1%26label%3Da%20b%23x"
        ));
        assert_eq!(url.matches('&').count(), 1);
    }

    #[test]
    fn test_image_url_appends_to_existing_query() {
        let service = QrRenderService::new(QrServiceConfig {
            endpoint: "https://qr.example.com/render?format=png".to_string(),
            size: 320,
        });
        assert_eq!(
            service.image_url("addr"),
            "https://qr.example.com/render?format=png&size=320x320&data=addr"
        );
    }

    #[test]
    fn test_local_rendering() {
        let service = QrRenderService::default();
        let svg = service.render_svg(ADDRESS).unwrap();
        assert!(svg.contains("<svg"));

        let terminal = service.render_terminal(ADDRESS).unwrap();
        assert!(terminal.lines().count() > 10);
    }
}
