use std::path::PathBuf;

use anyhow::Result;
use mailweave_core::{find_variables, VariableCatalog};

use crate::utils::read_file;

#[derive(Debug)]
pub struct VarsArgs {
    pub template: PathBuf,
    pub unknown: bool,
}

/// List the placeholder paths a template uses
pub fn run(args: VarsArgs) -> Result<()> {
    let template = read_file(&args.template)?;
    for line in describe(&template, &VariableCatalog::builtin(), args.unknown) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per placeholder path, labelled from the catalog when known
pub fn describe(template: &str, catalog: &VariableCatalog, only_unknown: bool) -> Vec<String> {
    find_variables(template)
        .into_iter()
        .filter_map(|path| match catalog.get(&path) {
            Some(_) if only_unknown => None,
            Some(variable) => Some(format!("{:<32} {}", path, variable.label)),
            None => Some(path),
        })
        .collect()
}
