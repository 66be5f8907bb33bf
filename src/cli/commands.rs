use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use servicetitan_auth::ConnectOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "st-auth")]
#[command(
    author,
    version,
    about = "ServiceTitan auth helper - resolve credentials and fetch API tokens"
)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Target API environment ("production"; anything else means integration)
    #[arg(long = "env", global = true)]
    pub api_environment: Option<String>,

    /// ServiceTitan app key
    #[arg(long, global = true)]
    pub app_key: Option<String>,

    /// Tenant id
    #[arg(long, global = true)]
    pub tenant_id: Option<String>,

    /// OAuth client id
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// App id
    #[arg(long, global = true)]
    pub app_id: Option<String>,

    /// Timezone (defaults to UTC when every core credential is given)
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// JSON config file (overrides every credential option above)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// .env file merged under the process environment
    #[arg(long, global = true, env = "ST_AUTH_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Token request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            api_environment: self.api_environment.clone(),
            app_key: self.app_key.clone(),
            tenant_id: self.tenant_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            app_id: self.app_id.clone(),
            timezone: self.timezone.clone(),
            config_file: self.config.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the resolved connection config
    #[command(alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Fetch a new access token
    Token,

    /// Fetch a token and print the auth headers
    Headers,

    /// Show the base URLs for an environment
    Urls {
        /// Environment selector
        environment: String,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the resolved configuration (client secret masked)
    Show,
}

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}
