use std::borrow::Cow;
use std::sync::Arc;

use abcode_common::{ContentOrigin, PanelError, PanelId};
use tracing::{debug, warn};
use wry::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use wry::http::{HeaderValue, Response, StatusCode};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{
    asset_base, host_origin, ContentProvider, Document, HOST_SCHEME, INDEX_PATH,
};
use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create a new WebView as a child of `window`, positioned at `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        panel_id: PanelId,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, PanelError> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_focused(true)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, self.events.clone(), panel_id);
        builder = Self::attach_page_load_handler(builder, self.events.clone(), panel_id);
        builder = Self::attach_navigation_handler(
            builder,
            self.events.clone(),
            panel_id,
            config.allowed_origins.clone(),
        );
        builder = self.attach_custom_protocol(builder);

        let initial_url;
        if let Some(url) = &config.url {
            builder = builder.with_url(url);
            initial_url = url.clone();
        } else if let Some(html) = &config.html {
            builder = builder.with_html(html);
            initial_url = "about:blank".to_string();
        } else {
            builder = builder.with_html("<html><body></body></html>");
            initial_url = "about:blank".to_string();
        }

        let webview = builder
            .build_as_child(window)
            .map_err(|e| PanelError::Create(e.to_string()))?;

        debug!(%panel_id, url = %initial_url, "WebView created");

        Ok(WebViewHandle { webview, panel_id })
    }

    /// How to load `document` into a new webview.
    ///
    /// Bundled documents are served as `index.html` on the host origin so
    /// their assets load same-origin. The dev-server wrapper only frames an
    /// external page and is rendered inline.
    pub fn config_for(&self, document: Document) -> WebViewConfig {
        match (document.origin, &self.content_provider) {
            (ContentOrigin::Bundled, Some(provider)) => {
                provider.serve_document(document.html);
                WebViewConfig::with_url(format!("{}{INDEX_PATH}", asset_base()))
            }
            (ContentOrigin::Bundled, None) => {
                warn!("no content provider; bundled assets will not load");
                WebViewConfig::with_html(document.html)
            }
            (ContentOrigin::DevServer, _) => WebViewConfig::with_html(document.html),
        }
    }

    /// Set the content provider for serving bundled assets via `abcode://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    fn attach_custom_protocol<'a>(&self, builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        let Some(provider) = &self.content_provider else {
            return builder;
        };
        let cp = Arc::clone(provider);
        builder.with_custom_protocol(HOST_SCHEME.to_string(), move |_wv_id, request| {
            let uri = request.uri().to_string();
            let path = ContentProvider::request_path(&uri);

            match cp.resolve(path) {
                Some((mime, data)) => asset_response(StatusCode::OK, mime, data.into_owned()),
                None => {
                    warn!(path = %path, "custom protocol: asset not found");
                    asset_response(StatusCode::NOT_FOUND, "text/plain", b"Not Found".to_vec())
                }
            }
        })
    }
}

fn asset_response(
    status: StatusCode,
    mime: &'static str,
    body: Vec<u8>,
) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::Owned(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime));
    if let Ok(origin) = HeaderValue::from_str(host_origin()) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    response
}
