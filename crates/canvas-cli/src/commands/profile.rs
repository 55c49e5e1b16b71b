//! Profile command handler.

use canvas_api::CanvasClient;
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ProfileRow {
    field: &'static str,
    value: String,
}

pub async fn handle(
    client: &CanvasClient,
    user_id: i64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let profile = client.get_user_profile(user_id).await?;

    match global.output {
        OutputFormat::Json => output::print_json(&profile),
        OutputFormat::Table => {
            let rows = vec![
                row("id", profile.id.to_string()),
                row("name", profile.name),
                row("sortable name", profile.sortable_name.unwrap_or_default()),
                row("email", profile.primary_email.unwrap_or_default()),
                row("login", profile.login_id.unwrap_or_default()),
                row("sis id", profile.sis_user_id.unwrap_or_default()),
                row("time zone", profile.time_zone.unwrap_or_default()),
                row("locale", profile.locale.unwrap_or_default()),
            ];
            output::print_table(&rows);
            Ok(())
        }
    }
}

fn row(field: &'static str, value: String) -> ProfileRow {
    ProfileRow { field, value }
}
