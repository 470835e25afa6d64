//! Web 服务器主程序入口

use std::str::FromStr;

use polyglot_faq::env::{self, EnvVar};
use polyglot_faq::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载 .env 文件（如果存在）
    let env_file = dotenv::dotenv().ok();

    init_tracing();

    if let Some(path) = env_file {
        tracing::info!("已加载环境变量文件: {}", path.display());
    }

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();
    let mut web_config = WebConfig::default();

    // 简单的命令行参数解析
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    web_config.bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    web_config.port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--env-docs" => {
                println!("{}", env::generate_env_docs());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 启动 Web 服务器
    let server = WebServer::new(web_config);
    server.start().await?;

    Ok(())
}

fn init_tracing() {
    let level = env::core::LogLevel::get()
        .ok()
        .and_then(|level| tracing::Level::from_str(&level).ok())
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt().with_max_level(level).init();
}

fn print_help() {
    println!("Polyglot FAQ Web Server");
    println!();
    println!("USAGE:");
    println!("    faq-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [default: 7080]");
    println!("        --env-docs           Print supported environment variables");
    println!("    -h, --help               Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    faq-web");
    println!("    faq-web --bind 0.0.0.0 --port 3000");
}
