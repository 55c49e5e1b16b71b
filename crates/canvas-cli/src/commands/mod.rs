//! Command handlers, one module per resource.

pub mod dashboard;
pub mod profile;
pub mod stream;
pub mod users;

use canvas_api::CanvasClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(
    command: Command,
    client: &CanvasClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Profile { user_id } => profile::handle(client, user_id, global).await,
        Command::Dashboard { user_id } => dashboard::handle(client, user_id, global).await,
        Command::Users(args) => users::handle(client, args, global).await,
        Command::Stream(args) => stream::handle(client, args, global).await,
    }
}
