use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub vacation: VacationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 前端来源；为空时不限制
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// 身份服务签发的访问令牌共享密钥
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationConfig {
    /// 每年可用的假期天数
    #[serde(default = "default_base_days")]
    pub base_days: i32,
}

fn default_base_days() -> i32 {
    22
}

impl Default for VacationConfig {
    fn default() -> Self {
        Self {
            base_days: default_base_days(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::from_toml_str(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env_lookup(get_env)?,
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        if config.jwt.secret.trim().is_empty() {
            return Err("JWT secret must not be empty".into());
        }
        Ok(config)
    }

    // 无配置文件时：数据库 URL 与 JWT 密钥必须提供，其余取默认值
    fn from_env_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").ok_or("DATABASE_URL is not set and config.toml was not found")?;
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or("JWT_SECRET is not set and config.toml was not found")?;

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(lookup("SERVER_PORT"), 8080u16),
                allowed_origins: Vec::new(),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), 10u32),
            },
            jwt: JwtConfig { secret: jwt_secret },
            vacation: VacationConfig {
                base_days: parse_or(lookup("VACATION_BASE_DAYS"), default_base_days()),
            },
        })
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Invalid config file: {e}").into())
    }

    // 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()) {
            self.server.port = p;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.server.allowed_origins = split_origins(&v);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(mc) = env::var("DB_MAX_CONNECTIONS").ok().and_then(|v| v.parse().ok()) {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Some(n) = env::var("VACATION_BASE_DAYS").ok().and_then(|v| v.parse().ok()) {
            self.vacation.base_days = n;
        }
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacation_section_is_optional() {
        let config = Config::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://localhost/descanso"
            max_connections = 5

            [jwt]
            secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.vacation.base_days, 22);
    }

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_base_days_from_file() {
        let config = Config::from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://localhost/descanso"
            max_connections = 10

            [jwt]
            secret = "s3cret"

            [vacation]
            base_days = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.vacation.base_days, 25);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        assert!(Config::from_toml_str("server = 1").is_err());
    }

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_only_config_requires_jwt_secret() {
        let vars = [("DATABASE_URL", "postgres://localhost/descanso")];
        let err = Config::from_env_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let vars = [
            ("DATABASE_URL", "postgres://localhost/descanso"),
            ("JWT_SECRET", "  "),
        ];
        assert!(Config::from_env_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_env_only_config_uses_defaults() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/descanso"),
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "not-a-port"),
        ];
        let config = Config::from_env_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.vacation.base_days, 22);
    }
}
