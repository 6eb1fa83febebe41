use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 内置默认值，保证没有配置文件时也能启动
    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("app.system_name", "AssignHub")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 8)?
            .set_default("server.timeouts.client_request", 5000)?
            .set_default("server.timeouts.client_disconnect", 1000)?
            .set_default("server.timeouts.keep_alive", 30)?
            .set_default("server.limits.max_payload_size", 1_048_576)?
            .set_default("jwt.secret", "")?
            .set_default("jwt.access_token_expiry", 15)?
            .set_default("jwt.refresh_token_expiry", 7)?
            .set_default("jwt.refresh_token_remember_me_expiry", 30)?
            .set_default("database.url", "assignhub.db")?
            .set_default("database.pool_size", 8)?
            .set_default("database.timeout", 10)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("cors.max_age", 3600)?
            .set_default("argon2.memory_cost", 19_456)?
            .set_default("argon2.time_cost", 2)?
            .set_default("argon2.parallelism", 1)
    }

    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults(Config::builder())?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("ASSIGNHUB")
                    .separator("__")
                    .try_parsing(true),
            );

        // 常用环境变量的快捷覆盖
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        if app_config.jwt.secret.is_empty() {
            if app_config.is_production() {
                return Err(ConfigError::Message(
                    "jwt.secret must be set in production (JWT_SECRET)".to_string(),
                ));
            }
            tracing::warn!("jwt.secret is empty, using an insecure development secret");
            app_config.jwt.secret = "assignhub-development-secret".to_string();
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::with_defaults(Config::builder())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.system_name, "AssignHub");
        assert!(config.is_development());
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
        assert_eq!(config.jwt.access_token_expiry, 15);
        assert_eq!(config.database.url, "assignhub.db");
        assert_eq!(config.argon2.parallelism, 1);
    }
}
