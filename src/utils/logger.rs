use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 依 `-v` 次數決定預設過濾等級，`RUST_LOG` 仍可覆蓋
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "pydev_docker=warn",
        1 => "pydev_docker=info",
        _ => "pydev_docker=debug,info",
    }
}

pub fn init_cli_logger(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    // 日誌一律寫到 stderr，stdout 保留給容器輸出
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
