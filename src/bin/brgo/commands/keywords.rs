//! `brgo keywords` command

use std::io::{self, Write};

use anyhow::Result;

use crate::cli::KeywordsArgs;
use brgo::KeywordTable;

pub fn execute(args: KeywordsArgs) -> Result<()> {
    let table = KeywordTable::pt_br();
    let mut stdout = io::stdout().lock();

    if args.reverse {
        write_table(&table.reverse(), &mut stdout)?;
    } else {
        write_table(table, &mut stdout)?;
    }

    Ok(())
}

/// One `source  target` row per entry, sorted by source.
fn write_table(table: &KeywordTable, out: &mut impl Write) -> io::Result<()> {
    let width = table.iter().map(|(s, _)| s.chars().count()).max().unwrap_or(0);

    for (source, target) in table.iter() {
        let pad = width - source.chars().count();
        writeln!(out, "{}{}  {}", source, " ".repeat(pad), target)?;
    }

    Ok(())
}
