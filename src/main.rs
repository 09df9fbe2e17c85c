use clap::Parser;
use fbp_new_component::utils::logger::{self, LogFormat};
use fbp_new_component::{
    CargoLockTool, CliConfig, ComponentConfig, LocalStorage, LockfileStatus, ScaffoldEngine,
    ScaffoldError, ScaffoldReport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, LogFormat::from_json_flag(config.log_json));

    tracing::info!("📁 Loading component specification from: {}", config.config.display());
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let spec = match ComponentConfig::from_file(&config.config).and_then(ComponentConfig::into_spec) {
        Ok(spec) => spec,
        Err(e) => fail(e),
    };

    let storage = LocalStorage::new(config.components_root.clone());
    let lock_tool = CargoLockTool::new(config.lock_command.clone());
    let engine = ScaffoldEngine::new(storage, lock_tool, config.scaffold_options());

    match engine.run(&spec).await {
        Ok(report) => finish(report),
        Err(e) => fail(e),
    }
}

fn finish(report: ScaffoldReport) -> anyhow::Result<()> {
    if report.dry_run {
        display_plan(&report);
        return Ok(());
    }

    println!("*** Created component: {} ***", report.component);

    if let LockfileStatus::Failed(e) = report.lockfile {
        tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("⚠️ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn display_plan(report: &ScaffoldReport) {
    println!("🔍 Dry run for component {}:", report.component);
    println!("  Directory: {}", report.component_dir.display());
    println!("  Registry entry: {}", report.artifacts.registry_entry.trim());
    println!();
    println!("--- default.nix ---\n{}", report.artifacts.descriptor);
    println!("--- Cargo.toml ---\n{}", report.artifacts.manifest);
    println!("--- src/lib.rs ---\n{}", report.artifacts.stub);
}

fn fail(e: ScaffoldError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("{}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
