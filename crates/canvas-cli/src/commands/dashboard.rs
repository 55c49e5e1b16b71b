//! Dashboard positions command handler.

use canvas_api::CanvasClient;
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PositionRow {
    course: String,
    position: i32,
}

pub async fn handle(
    client: &CanvasClient,
    user_id: i64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let positions = client.get_dashboard_positions(user_id).await?;

    match global.output {
        OutputFormat::Json => output::print_json(&positions),
        OutputFormat::Table => {
            let mut rows: Vec<PositionRow> = positions
                .into_iter()
                .map(|(course, position)| PositionRow { course, position })
                .collect();
            rows.sort_by_key(|row| row.position);
            output::print_table(&rows);
            Ok(())
        }
    }
}
