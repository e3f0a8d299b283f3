use std::env;
use std::path::PathBuf;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub posts_dir: PathBuf,
    pub index_file: PathBuf,
    pub uploads_dir: PathBuf,
    pub viewer_shell: PathBuf,
    pub assist: AssistConfig,
}

/// Settings for the OpenAI-compatible completion endpoint used by `/api/ai-generate`
#[derive(Debug, Clone)]
pub struct AssistConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, String> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => 3000,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "localhost".to_string()),
            port,
            posts_dir: path_var("POSTS_DIR", "posts"),
            index_file: path_var("INDEX_FILE", "posts.json"),
            uploads_dir: path_var("UPLOADS_DIR", "uploads/images"),
            viewer_shell: path_var("VIEWER_SHELL", "html/post.html"),
            assist: AssistConfig {
                api_url: env::var("AI_API_URL").unwrap_or_else(|_| {
                    "https://api.openai.com/v1/chat/completions".to_string()
                }),
                api_key: env::var("AI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
                model: env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
        })
    }

    /// Configuration rooted at `root`, used by tests
    #[cfg(test)]
    pub fn rooted_at(root: &std::path::Path) -> Self {
        Self {
            host: "localhost".to_string(),
            port: 0,
            posts_dir: root.join("posts"),
            index_file: root.join("posts.json"),
            uploads_dir: root.join("uploads").join("images"),
            viewer_shell: root.join("html").join("post.html"),
            assist: AssistConfig {
                api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
                api_key: None,
                model: "test-model".to_string(),
            },
        }
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    PathBuf::from(env::var(key).unwrap_or_else(|_| default.to_string()))
}

/// Name reported in every JSON envelope
pub fn service_name() -> String {
    env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string())
}
