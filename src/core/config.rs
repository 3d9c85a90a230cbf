use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub bind_addr: String,
    pub db_path: String,
    pub download_dir: String,
    pub output_dir: String,
    pub max_clip_seconds: u32,
    pub public_base_url: String,
    pub ytdlp_bin: String,
    pub ffmpeg_bin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let max_clip_seconds = match env::var("SAFAR_MAX_CLIP_SECONDS") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| format!("SAFAR_MAX_CLIP_SECONDS: {}", e))?,
            Err(_) => 60,
        };

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            bind_addr: env::var("SAFAR_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            db_path: env::var("SAFAR_DB_PATH").unwrap_or_else(|_| "data/safar.db".to_string()),
            download_dir: env::var("SAFAR_DOWNLOAD_DIR")
                .unwrap_or_else(|_| "downloads".to_string()),
            output_dir: env::var("SAFAR_OUTPUT_DIR")
                .unwrap_or_else(|_| "generated".to_string()),
            max_clip_seconds,
            public_base_url: env::var("SAFAR_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "https://safar.fun".to_string()),
            ytdlp_bin: env::var("SAFAR_YTDLP_BIN").unwrap_or_else(|_| "yt-dlp".to_string()),
            ffmpeg_bin: env::var("SAFAR_FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()),
        })
    }
}
