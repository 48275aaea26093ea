use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::{format_id, output_created, output_records};
use crate::cli::OutputFormat;
use crate::database::{Repository, RowStore};
use crate::models::User;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List every user")]
    List,

    #[command(about = "Create a user")]
    Create {
        #[arg(long, help = "User name")]
        name: String,
        #[arg(long, help = "Optional description")]
        description: Option<String>,
        #[arg(long, help = "Optional age")]
        age: Option<i64>,
    },
}

pub async fn handle(
    cmd: UserCommands,
    store: Arc<dyn RowStore>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let repository: Repository<User> = Repository::new(store);

    match cmd {
        UserCommands::List => {
            let users = repository.list_all().await?;
            output_records(output_format, &users, "No users found", describe)
        }
        UserCommands::Create {
            name,
            description,
            age,
        } => {
            let candidate = User {
                id: None,
                name,
                description,
                age,
            };
            let created = repository.create_one(&candidate).await?;
            output_created(output_format, &created, describe)
        }
    }
}

fn describe(user: &User) -> String {
    match user.age {
        Some(age) => format!("{} {} ({})", format_id(user.id), user.name, age),
        None => format!("{} {}", format_id(user.id), user.name),
    }
}
