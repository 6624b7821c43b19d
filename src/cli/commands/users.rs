use crate::api::MarkStore;
use crate::cli::commands::client;
use crate::cli::parser::{Commands, UsersCommand};
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::models::id::Id;
use crate::models::payload::UserUpdate;
use crate::models::user::User;
use crate::ui::messages::{info, success};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Users { command } = cmd else {
        return Ok(());
    };

    let store = client(cfg)?;
    Core::require_admin(&store)?;

    match command {
        None | Some(UsersCommand::List) => list(&store),

        Some(UsersCommand::Show { id }) => {
            let user = store.user_by_id(&Id::from(id.as_str()))?;
            print!("{}", profile_table(&user).render());
            Ok(())
        }

        Some(UsersCommand::Update {
            id,
            first_name,
            last_name,
        }) => {
            let update = UserUpdate::new(first_name.as_deref(), last_name.as_deref())?;
            let user = store.update_user(&Id::from(id.as_str()), &update)?;
            success(format!("User #{} updated: {}", user.id, user.display_name()));
            Ok(())
        }
    }
}

fn list(store: &impl MarkStore) -> AppResult<()> {
    let mut users = store.list_users()?;
    if users.is_empty() {
        info("No users found.");
        return Ok(());
    }
    users.sort_by_key(|u| u.display_name().to_lowercase());

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("NAME").max(32),
        Column::left("EMAIL").max(40),
        Column::left("ROLE"),
        Column::left("ACTIVE"),
    ]);
    for u in &users {
        table.add_row(vec![
            u.id.to_string(),
            u.display_name(),
            u.email.clone(),
            role(u).to_string(),
            yes_no(u.is_active).to_string(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

/// Two-column FIELD / VALUE view of one user.
fn profile_table(u: &User) -> Table {
    let mut table = Table::new(vec![Column::left("FIELD"), Column::left("VALUE").max(48)]);
    let rows = [
        ("ID", u.id.to_string()),
        ("Email", u.email.clone()),
        ("First name", or_dash(u.first_name.as_deref())),
        ("Last name", or_dash(u.last_name.as_deref())),
        ("Role", role(u).to_string()),
        ("Active", yes_no(u.is_active).to_string()),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}

fn role(u: &User) -> &'static str {
    if u.is_superuser { "admin" } else { "employee" }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}
