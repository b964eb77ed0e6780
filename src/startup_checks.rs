use crate::Config;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Templates directory does not exist: {0}")]
    TemplatesDirectoryMissing(String),

    #[error("Static files directory does not exist: {0}")]
    StaticDirectoryMissing(String),

    #[error("Required template missing: {0}")]
    RequiredTemplateMissing(String),

    #[error("Cookie secret is still the placeholder value")]
    PlaceholderCookieSecret,

    #[error("Backend API is not reachable: {0}")]
    BackendUnreachable(String),
}

impl StartupCheckError {
    /// Critical errors stop the server; the rest are logged and tolerated.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            StartupCheckError::TemplatesDirectoryMissing(_)
                | StartupCheckError::StaticDirectoryMissing(_)
        )
    }
}

pub async fn perform_startup_checks(config: &Config) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    info!("Performing startup checks...");

    // Templates are required for every page
    let templates_dir = Path::new(&config.templates.directory);
    if !templates_dir.exists() {
        error!("Templates directory does not exist: {:?}", templates_dir);
        errors.push(StartupCheckError::TemplatesDirectoryMissing(
            templates_dir.display().to_string(),
        ));
    } else {
        info!("Templates directory exists: {:?}", templates_dir);

        let required_templates = vec![
            "partials/_header.html.liquid",
            "partials/_footer.html.liquid",
            "pages/index.html.liquid",
            "pages/error.html.liquid",
            "pages/not_found.html.liquid",
        ];
        for template in required_templates {
            let template_path = templates_dir.join(template);
            if template_path.exists() {
                info!("Required template found: {:?}", template_path);
            } else {
                warn!("Required template missing: {:?}", template_path);
                errors.push(StartupCheckError::RequiredTemplateMissing(
                    template.to_string(),
                ));
            }
        }
    }

    let static_dir = Path::new(&config.static_files.directory);
    if !static_dir.exists() {
        error!("Static files directory does not exist: {:?}", static_dir);
        errors.push(StartupCheckError::StaticDirectoryMissing(
            static_dir.display().to_string(),
        ));
    } else {
        info!("Static files directory exists: {:?}", static_dir);
    }

    if config.app.cookie_secret == "change-me-in-production" {
        warn!("Cookie secret is still the placeholder value");
        errors.push(StartupCheckError::PlaceholderCookieSecret);
    }

    // Probe the backend so a misconfigured base URL shows up in the logs
    // at boot instead of on the first page view. Not critical: the site
    // degrades to inline error views when the backend is down.
    match crate::api::ApiClient::new(&config.api) {
        Ok(client) => match client.list_posts().await {
            Ok(posts) => info!(
                "Backend API reachable at {} ({} posts)",
                config.api.base_url,
                posts.len()
            ),
            Err(e) => {
                warn!("Backend API probe failed: {}", e);
                errors.push(StartupCheckError::BackendUnreachable(e.to_string()));
            }
        },
        Err(e) => {
            warn!("Backend API client could not be constructed: {}", e);
            errors.push(StartupCheckError::BackendUnreachable(e.to_string()));
        }
    }

    if errors.is_empty() {
        info!("All startup checks passed");
        Ok(())
    } else {
        error!("Startup checks failed with {} errors", errors.len());
        Err(errors)
    }
}
