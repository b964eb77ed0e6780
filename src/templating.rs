use chrono::Datelike;
use liquid::partials::{EagerCompiler, InMemorySource};
use std::{collections::HashMap, path::PathBuf, sync::Arc, time::SystemTime};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Liquid template engine with an mtime-keyed content cache. Templates
/// live under the configured directory; shared partials (`_header`,
/// `_footer`) live in its `partials/` subdirectory and are available to
/// `{% include %}` under their bare filenames.
pub struct TemplateEngine {
    template_dir: PathBuf,
    cache: Arc<RwLock<HashMap<String, CachedTemplate>>>,
}

struct CachedTemplate {
    content: String,
    modified: SystemTime,
}

impl TemplateEngine {
    pub fn new(template_dir: PathBuf) -> Self {
        Self {
            template_dir,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn load_template(&self, path: &str) -> Result<String, String> {
        let template_path = self.template_dir.join(path);

        let metadata = tokio::fs::metadata(&template_path)
            .await
            .map_err(|e| format!("Failed to get metadata for {}: {}", path, e))?;

        let modified = metadata
            .modified()
            .map_err(|e| format!("Failed to get modified time: {}", e))?;

        let mut cache = self.cache.write().await;

        if let Some(cached) = cache.get(path) {
            if cached.modified >= modified {
                debug!("Using cached template for {}", path);
                return Ok(cached.content.clone());
            }
        }

        info!("Loading template: {}", path);

        let content = tokio::fs::read_to_string(&template_path)
            .await
            .map_err(|e| format!("Failed to read template {}: {}", path, e))?;

        cache.insert(
            path.to_string(),
            CachedTemplate {
                content: content.clone(),
                modified,
            },
        );

        Ok(content)
    }

    /// Collect every partial under `partials/` into an in-memory source,
    /// registered under its bare filename so templates can
    /// `{% include "_header.html.liquid" %}`.
    async fn load_partials(&self) -> InMemorySource {
        let mut source = InMemorySource::default();
        let partials_dir = self.template_dir.join("partials");

        let mut entries = match tokio::fs::read_dir(&partials_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to read partials directory: {}", e);
                return source;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".liquid") {
                continue;
            }

            match self.load_template(&format!("partials/{}", file_name)).await {
                Ok(content) => {
                    source.add(file_name.to_string(), content);
                }
                Err(e) => error!("Failed to load partial {}: {}", file_name, e),
            }
        }

        source
    }

    pub async fn render_template(
        &self,
        template_name: &str,
        globals: liquid::Object,
    ) -> Result<String, String> {
        let template_content = self.load_template(template_name).await?;
        let partials = EagerCompiler::new(self.load_partials().await);

        let parser = liquid::ParserBuilder::with_stdlib()
            .partials(partials)
            .build()
            .map_err(|e| format!("Failed to create parser: {}", e))?;

        let template = parser
            .parse(&template_content)
            .map_err(|e| format!("Failed to parse template {}: {}", template_name, e))?;

        let mut full_globals = globals;
        if !full_globals.contains_key("current_year") {
            full_globals.insert(
                "current_year".into(),
                liquid::model::Value::scalar(chrono::Utc::now().year()),
            );
        }

        template
            .render(&full_globals)
            .map_err(|e| format!("Failed to render template {}: {}", template_name, e))
    }
}
