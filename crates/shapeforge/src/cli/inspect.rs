//! `shapeforge inspect`: synthesize a schema and describe the resulting type.

use anyhow::Result;
use std::path::PathBuf;

use super::output::{print_json, print_table};

#[derive(Debug)]
pub struct InspectArgs {
    pub schema: PathBuf,
    pub json: bool,
    pub propagate: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let ty = super::synthesize(&args.schema, args.propagate)?;
    let summary = ty.summary();

    if args.json {
        return print_json(&summary);
    }

    println!("Class:     {}", summary.class_name);
    println!("Module:    {}", summary.module);
    println!("Contracts: {}", summary.contracts.join(", "));
    println!();

    if summary.properties.is_empty() {
        println!("(no properties)");
        return Ok(());
    }

    let rows = summary
        .properties
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.data_type.to_string(),
                p.backing_field.clone(),
                p.getter.clone(),
                p.setter.clone(),
            ]
        })
        .collect();
    print_table(&["Property", "Type", "Field", "Getter", "Setter"], rows);

    Ok(())
}
