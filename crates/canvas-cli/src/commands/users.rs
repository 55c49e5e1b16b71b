//! Account users command handler.

use canvas_api::CanvasClient;
use canvas_api::users::{AccountUsersQuery, User};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat, UsersArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct UserRow {
    id: i64,
    name: String,
    login: String,
    sis_id: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            login: user.login_id.unwrap_or_default(),
            sis_id: user.sis_user_id.unwrap_or_default(),
        }
    }
}

pub async fn handle(
    client: &CanvasClient,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Sort/order are validated here, before any request goes out.
    let mut query = AccountUsersQuery::new();
    if let Some(search) = args.search {
        query = query.search_term(search);
    }
    if let Some(enrollment) = args.enrollment_type {
        query = query.enrollment_type(enrollment);
    }
    if let Some(ref sort) = args.sort {
        query = query.try_sort(sort)?;
    }
    if let Some(ref order) = args.order {
        query = query.try_order(order)?;
    }

    let users = client.list_account_users(&query).await?;

    match global.output {
        OutputFormat::Json => output::print_json(&users),
        OutputFormat::Table => {
            let rows: Vec<UserRow> = users.into_iter().map(UserRow::from).collect();
            output::print_table(&rows);
            Ok(())
        }
    }
}
