//! Builds the runtime and config bundle used by front-ends.
use anyhow::{Context, Result};
use tracing::info;

use gallery_content::ConfigLoader;
use gallery_core::GalleryConfig;
use gallery_runtime::{FileDataSource, Runtime, RuntimeConfig};

use crate::config::ClientConfig;

/// Builder that assembles the gallery config and a started runtime.
pub struct RuntimeBuilder {
    config: ClientConfig,
    gallery: Option<GalleryConfig>,
}

impl RuntimeBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            gallery: None,
        }
    }

    /// Use `gallery` instead of reading the TOML config file.
    pub fn gallery_config(mut self, gallery: GalleryConfig) -> Self {
        self.gallery = Some(gallery);
        self
    }

    pub async fn build(self) -> Result<RuntimeSetup> {
        let mut gallery = match self.gallery {
            Some(gallery) => gallery,
            None => {
                let path = self.config.resolved_config_path();
                ConfigLoader::load_or_default(&path)
                    .with_context(|| format!("Failed to load gallery config {}", path.display()))?
            }
        };
        if let Some(page_size) = self.config.page_size {
            gallery.view.page_size = page_size;
        }

        info!(
            data_dir = %self.config.data_dir.display(),
            page_size = gallery.view.effective_page_size(),
            default_sort = %gallery.view.default_sort,
            "bootstrapping gallery runtime"
        );

        let runtime_config = RuntimeConfig {
            view: gallery.view.clone(),
            event_buffer_size: self.config.channels.event_capacity,
            command_buffer_size: self.config.channels.command_buffer,
            path: self.config.path.clone(),
            initial_location: self.config.initial_location(),
        };

        let runtime = Runtime::builder()
            .config(runtime_config)
            .source(FileDataSource::with_files(
                self.config.data_dir.clone(),
                gallery.files.clone(),
            ))
            .build()
            .await?;

        Ok(RuntimeSetup {
            config: self.config,
            gallery,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: ClientConfig,
    pub gallery: GalleryConfig,
    pub runtime: Runtime,
}
