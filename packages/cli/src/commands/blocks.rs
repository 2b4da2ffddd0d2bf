use anyhow::Result;
use broadsheet_schema::{all_schemas, FieldKind, FieldSpec};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Also print each field's default value
    #[arg(short, long)]
    pub verbose: bool,
}

/// List the block palette
pub fn blocks(args: BlocksArgs, _cwd: &str) -> Result<()> {
    for schema in all_schemas() {
        println!(
            "{} {} {}",
            schema.tag.bold(),
            schema.label,
            format!("[{}]", schema.category.as_str()).dimmed()
        );
        for field in schema.fields {
            if args.verbose {
                println!(
                    "    {}: {} = {}",
                    field.name,
                    kind_name(&field.kind),
                    field.default_value()
                );
            } else {
                println!("    {}: {}", field.name, kind_name(&field.kind));
            }
        }
    }
    Ok(())
}

fn kind_name(kind: &FieldKind) -> String {
    match kind {
        FieldKind::String => "string".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::Color => "color".to_string(),
        FieldKind::Url => "url".to_string(),
        FieldKind::Date => "date".to_string(),
        FieldKind::StringList => "list<string>".to_string(),
        FieldKind::StructList(fields) => format!("list<{{{}}}>", field_names(fields)),
    }
}

fn field_names(fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .map(|f| f.name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use broadsheet_schema::{schema_for, BlockType};

    #[test]
    fn test_kind_names() {
        let stats = schema_for(&BlockType::StatisticsPanel).unwrap();
        let field = stats.field("stats").unwrap();
        assert_eq!(kind_name(&field.kind), "list<{label, value}>");
        assert_eq!(kind_name(&FieldKind::Color), "color");
    }
}
