use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::{format_id, output_created, output_records, parse_finite};
use crate::cli::OutputFormat;
use crate::database::{Repository, RowStore};
use crate::models::Item;

#[derive(Subcommand)]
pub enum ItemCommands {
    #[command(about = "List every item")]
    List,

    #[command(about = "Create an item")]
    Create {
        #[arg(long, help = "Item name")]
        name: String,
        #[arg(long, value_parser = parse_finite, help = "Item price")]
        price: f64,
        #[arg(long, help = "Optional description")]
        description: Option<String>,
        #[arg(long, value_parser = parse_finite, help = "Optional tax amount")]
        tax: Option<f64>,
    },
}

pub async fn handle(
    cmd: ItemCommands,
    store: Arc<dyn RowStore>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let repository: Repository<Item> = Repository::new(store);

    match cmd {
        ItemCommands::List => {
            let items = repository.list_all().await?;
            output_records(output_format, &items, "No items found", describe)
        }
        ItemCommands::Create {
            name,
            price,
            description,
            tax,
        } => {
            let candidate = Item {
                id: None,
                name,
                description,
                price,
                tax,
            };
            let created = repository.create_one(&candidate).await?;
            output_created(output_format, &created, describe)
        }
    }
}

fn describe(item: &Item) -> String {
    let mut line = format!("{} {} {:.2}", format_id(item.id), item.name, item.price);
    if let Some(tax) = item.tax {
        line.push_str(&format!(" (tax {:.2})", tax));
    }
    if let Some(description) = &item.description {
        line.push_str(&format!(" - {}", description));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_items() {
        let item = Item {
            id: Some(3),
            name: "Awesome Item".into(),
            description: Some("Shiny".into()),
            price: 19.99,
            tax: Some(1.5),
        };
        assert_eq!(describe(&item), "#3 Awesome Item 19.99 (tax 1.50) - Shiny");
        assert_eq!(describe(&Item::new("Pen", 2.0)), "#? Pen 2.00");
    }
}
