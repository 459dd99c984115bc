#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "Serve the Jira tools over the Model Context Protocol")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Newline-delimited JSON-RPC on stdin/stdout (for editor and agent integrations)
    #[clap(name = "stdio")]
    Stdio,

    /// HTTP transport: GET /sse announces the endpoint, POST /message takes requests
    #[clap(name = "sse")]
    Sse(SseOptions),
}

#[derive(Debug, Clone, clap::Args)]
pub struct SseOptions {
    /// Port to listen on
    #[arg(short, long, env = "JIRAMCP_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to; keep it on loopback unless the Jira token may be shared
    #[arg(long, env = "JIRAMCP_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

impl SseOptions {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
