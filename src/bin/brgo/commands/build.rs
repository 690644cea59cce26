//! `brgo build` command

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::cli::BuildArgs;
use brgo::ops::{build, BuildOptions};
use brgo::util::{GlobalContext, Shell, Status};
use brgo::KeywordTable;

pub fn execute(args: BuildArgs, shell: &Arc<Shell>) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();

    // Temp dir: CLI > config > system default
    let opts = BuildOptions {
        output: args.output,
        temp_dir: args.temp_dir.or_else(|| config.toolchain.temp_dir.clone()),
        go: config.toolchain.go.clone(),
        directory: config.directory_options(),
    };

    let start = Instant::now();
    shell.status(Status::Compiling, args.input.display());

    let result = build(KeywordTable::pt_br(), &args.input, &opts)?;

    shell.verbose(
        Status::Info,
        format!("{} source files translated", result.translated),
    );
    shell.finished(result.binary.display(), start.elapsed());

    Ok(())
}
