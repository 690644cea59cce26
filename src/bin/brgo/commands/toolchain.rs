//! `brgo toolchain` command

use anyhow::Result;

use brgo::ops::toolchain_version;
use brgo::util::process::GO_ENV;
use brgo::util::GlobalContext;

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();

    println!("Toolchain:");
    println!();

    match toolchain_version(config.toolchain.go.as_deref()) {
        Ok((go, version)) => {
            println!("  go:     {}", go.display());
            println!("          {}", version);
        }
        Err(e) => println!("  go:     not found ({:#})", e),
    }

    println!();
    println!("Configuration:");
    println!("  global:  {}", ctx.config_path().display());
    println!("  project: {}", ctx.project_config_path().display());
    if let Ok(go) = std::env::var(GO_ENV) {
        println!("  {}={}", GO_ENV, go);
    }

    Ok(())
}
