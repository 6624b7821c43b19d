use crate::api::MarkStore;
use crate::cli::commands::client;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let me = client(cfg)?.current_user()?;

    println!("{}", me.display_name());
    println!("  id:     {}", me.id);
    println!("  email:  {}", me.email);
    println!(
        "  role:   {}",
        if me.is_superuser { "admin" } else { "employee" }
    );
    if !me.is_active {
        println!("  status: inactive");
    }
    Ok(())
}
