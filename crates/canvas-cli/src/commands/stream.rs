//! Activity stream command handler.

use canvas_api::CanvasClient;
use canvas_api::activity::ActivityStreamQuery;
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat, StreamArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct StreamRow {
    kind: &'static str,
    id: i64,
    title: String,
    course: i64,
    read: &'static str,
}

fn row(kind: &'static str, id: i64, title: &str, course_id: i64, read_state: bool) -> StreamRow {
    StreamRow {
        kind,
        id,
        title: title.to_owned(),
        course: course_id,
        read: if read_state { "read" } else { "unread" },
    }
}

pub async fn handle(
    client: &CanvasClient,
    args: StreamArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = ActivityStreamQuery::new().only_active_courses(args.only_active_courses);
    let stream = client.get_activity_stream(&query).await?;

    if global.output == OutputFormat::Json {
        return output::print_json(&stream);
    }

    if stream.is_empty() {
        if !global.quiet {
            println!("(activity stream is empty)");
        }
        return Ok(());
    }

    if !global.quiet {
        output::heading(&format!("Activity stream ({} items)", stream.len()));
    }

    let mut rows = Vec::with_capacity(stream.len());
    for item in &stream.discussion_topics {
        rows.push(row("discussion", item.id, &item.title, item.course_id, item.read_state));
    }
    for item in &stream.announcements {
        rows.push(row("announcement", item.id, &item.title, item.course_id, item.read_state));
    }
    for item in &stream.conversations {
        rows.push(row("conversation", item.id, &item.title, item.course_id, item.read_state));
    }
    for item in &stream.messages {
        rows.push(row("message", item.id, &item.title, item.course_id, item.read_state));
    }
    for item in &stream.conferences {
        rows.push(row("conference", item.id, &item.title, item.course_id, item.read_state));
    }
    for item in &stream.collaborations {
        rows.push(row("collaboration", item.id, &item.title, item.course_id, item.read_state));
    }
    for item in &stream.assessment_requests {
        rows.push(row("peer review", item.id, &item.title, item.course_id, item.read_state));
    }

    output::print_table(&rows);
    Ok(())
}
