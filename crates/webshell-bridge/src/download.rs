// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Download interceptor.
//
// Turns a WebView download event into a finished `DownloadDescriptor` and
// hands it to the platform download service. The service is only invoked
// once every field is resolved, so a failure at any earlier step leaves
// nothing behind. Storage permission is assumed to have been granted by the
// host before downloads can be triggered.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};
use url::Url;

use webshell_core::error::{Result, ShellError};
use webshell_core::{DownloadDescriptor, DownloadHandle, StorageCategory};

use crate::filename::resolve_filename;
use crate::traits::DownloadService;

/// Raw inputs of a WebView download callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEvent {
    pub url: String,
    pub user_agent: String,
    pub content_disposition: Option<String>,
    pub mime_type: String,
    pub content_length: i64,
}

/// Classifies download events and enqueues them.
pub struct DownloadInterceptor {
    service: Arc<dyn DownloadService>,
    description: String,
}

impl DownloadInterceptor {
    pub fn new(service: Arc<dyn DownloadService>, description: impl Into<String>) -> Self {
        Self {
            service,
            description: description.into(),
        }
    }

    /// Handle one download event.
    ///
    /// Never fails from the caller's point of view: errors are logged and the
    /// download is abandoned. The returned handle is informational.
    #[instrument(skip_all, fields(url = %event.url))]
    pub fn on_download_event(&self, event: &DownloadEvent) -> Option<DownloadHandle> {
        let result = self
            .build_descriptor(event)
            .and_then(|descriptor| self.enqueue(&descriptor));
        match result {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = %e, "download abandoned");
                None
            }
        }
    }

    /// Resolve every descriptor field for `event`.
    pub fn build_descriptor(&self, event: &DownloadEvent) -> Result<DownloadDescriptor> {
        let source = Url::parse(&event.url).map_err(|e| ShellError::InvalidUrl(format!("{}: {e}", event.url)))?;
        if !matches!(source.scheme(), "http" | "https") {
            return Err(ShellError::Download(format!(
                "unsupported scheme {:?} for download manager",
                source.scheme()
            )));
        }

        let filename = resolve_filename(event.content_disposition.as_deref(), &event.url, &event.mime_type);
        // Routing and the request both use the server's MIME type as sent.
        let mime_type = event.mime_type.clone();
        let category = StorageCategory::for_mime(&mime_type);

        debug!(
            %filename,
            mime = %mime_type,
            ?category,
            content_length = event.content_length,
            "download descriptor resolved"
        );

        Ok(DownloadDescriptor {
            source_url: event.url.clone(),
            user_agent: event.user_agent.clone(),
            filename,
            mime_type,
            content_length: event.content_length,
            category,
            description: self.description.clone(),
            notify_on_completion: true,
            media_scannable: true,
        })
    }

    fn enqueue(&self, descriptor: &DownloadDescriptor) -> Result<DownloadHandle> {
        let handle = self.service.enqueue(descriptor)?;
        info!(
            %handle,
            filename = %descriptor.filename,
            directory = descriptor.category.directory_name(),
            "download enqueued"
        );
        Ok(handle)
    }
}
