use clap::Parser;
use pydev_docker::utils::logger;
use pydev_docker::{CliConfig, DockerCli, Launcher, PathResolver, PydevError};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let code = match run(config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("❌ {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(config: CliConfig) -> Result<i32, PydevError> {
    let resolver = PathResolver::from_env()?;
    let plan = config.plan(&resolver)?;

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the container will not be started");
        println!("{}", plan.invocation.command_line());
        return Ok(0);
    }

    let launcher = Launcher::new(DockerCli::new());
    launcher
        .launch(&plan.request, &plan.config, &plan.invocation)
        .await
}
