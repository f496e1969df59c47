use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use taxonav_core::Taxonav;

use crate::cli::Commands;


pub(crate) fn run_from_root(root: &Path, command: Commands) -> Result<()> {
    let app = Taxonav::new(root);

    match command {
        Commands::Check => {
            print_json(&serde_json::json!({
                "root": root.display().to_string(),
                "eligible": app.is_eligible(),
            }))?;
        }
        Commands::Scan => {
            let outcome = app.scan().context("scan failed")?;
            print_json(&outcome)?;
        }
        Commands::Terms(args) => {
            let index = app.rebuild(args.axis.into()).context("index rebuild failed")?;
            print_json(&index.terms())?;
        }
        Commands::Files(args) => {
            let axis = args.axis.into();
            let index = app.rebuild(axis).context("index rebuild failed")?;
            let files = index.lookup(&args.term)?;
            print_json(&serde_json::json!({
                "axis": axis,
                "term": args.term,
                "files": files,
            }))?;
        }
        Commands::Tree(args) => {
            let tree = app.tree(args.axis.into()).context("tree build failed")?;
            print_json(&tree)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
