use std::env;

/// Everything the provider needs, gathered explicitly at startup instead of
/// living in ambient globals. A missing API key is not an error here; the
/// provider reports it when a call is actually made.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub word_temperature: f32,
    pub hint_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_output_tokens: 50,
            // near-maximum creativity for the word, calmer for the hint
            word_temperature: 1.0,
            hint_temperature: 0.7,
        }
    }
}

impl Config {
    /// Read overrides from the environment (a `.env` file, if any, has
    /// already been loaded by the caller).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        if config.api_key.is_none() {
            log::warn!("OPENAI_API_KEY is not set; word and hint requests will fail");
        }

        if let Ok(url) = env::var("OPENAI_BASE_URL") {
            log::debug!("using base url override from environment: {url}");
            config.base_url = url;
        }
        if let Ok(model) = env::var("HANGMAN_MODEL") {
            log::debug!("using model override from environment: {model}");
            config.model = model;
        }

        config
    }
}
