//! `brgo run` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::RunArgs;
use brgo::ops::{run, BuildOptions};
use brgo::util::{GlobalContext, Shell, Status};
use brgo::KeywordTable;

pub fn execute(args: RunArgs, shell: &Arc<Shell>) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();

    let opts = BuildOptions {
        output: None,
        temp_dir: args.temp_dir.or_else(|| config.toolchain.temp_dir.clone()),
        go: config.toolchain.go.clone(),
        directory: config.directory_options(),
    };

    shell.status(Status::Running, args.input.display());

    let code = run(KeywordTable::pt_br(), &args.input, &args.args, &opts)?;
    if code != 0 {
        // The temporary directory is already gone at this point.
        std::process::exit(code);
    }

    Ok(())
}
