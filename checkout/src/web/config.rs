use checkout::config::ServiceConfig;
use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: log::Level,

    #[envconfig(from = "SERVER_PORT", default = "3000")]
    pub server_port: u16,

    #[envconfig(from = "SERVER_HOST", default = "0.0.0.0")]
    pub server_host: String,

    #[envconfig(nested)]
    pub services: ServiceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, envconfig::Error> {
        Config::init_from_env()
    }
}
