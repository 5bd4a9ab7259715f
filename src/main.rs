//! Demo server.
//!
//! Run with:
//!   RUST_LOG=barehttp=debug cargo run -- --addr localhost:8080
//!
//! Try:
//!   curl http://localhost:8080/
//!   curl http://localhost:8080/hello
//!   curl http://localhost:8080/time
//!   curl 'http://localhost:8080/echo?message=Hello'

use std::process::ExitCode;

use barehttp::{ContentType, Request, Response, Router, Server, DEFAULT_BUFFER_SIZE};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "barehttp", version, about = "Minimal HTTP/1.1 server over raw TCP")]
struct Cli {
    /// Address to listen on (host:port).
    #[arg(short, long, env = "BAREHTTP_ADDR", default_value = "localhost:8080")]
    addr: String,

    /// Bytes read from each connection; the first read is the whole request.
    #[arg(
        short,
        long,
        env = "BAREHTTP_BUFFER_SIZE",
        default_value_t = DEFAULT_BUFFER_SIZE,
        value_parser = parse_buffer_size
    )]
    buffer_size: usize,
}

fn parse_buffer_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_owned()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "barehttp=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let app = Router::new()
        .get("/", index)
        .get("/hello", hello)
        .get("/time", time)
        .get("/echo", echo);

    match Server::bind(cli.addr).buffer_size(cli.buffer_size).serve(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("failed to start server: {e}");
            ExitCode::FAILURE
        }
    }
}

// GET /
fn index(_req: &Request, res: &mut Response) {
    res.set_content_type(ContentType::Html);
    res.set_body(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>barehttp</title>
</head>
<body>
    <h1>Welcome to barehttp!</h1>
    <p>This server speaks HTTP/1.1 directly over TCP, without an HTTP library.</p>
    <ul>
        <li><a href="/hello">Hello Page</a></li>
        <li><a href="/time">Current Time</a></li>
        <li><a href="/echo?message=Hello">Echo Page</a></li>
    </ul>
</body>
</html>
"#,
    );
}

// GET /hello
fn hello(_req: &Request, res: &mut Response) {
    res.set_content_type(ContentType::Text);
    res.set_body("Hello, World!");
}

// GET /time, server local time
fn time(_req: &Request, res: &mut Response) {
    res.set_content_type(ContentType::Text);
    res.set_body(format!(
        "Current time: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
}

// GET /echo?message=...
fn echo(req: &Request, res: &mut Response) {
    let message = req.query_param("message").unwrap_or("No message provided");
    res.set_content_type(ContentType::Text);
    res.set_body(format!("Echo: {message}"));
}
