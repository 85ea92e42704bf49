use crate::cli::ListAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::commands::{CreateList, DeleteList, MoveList, RenameList, SortListCards};
use kanban_domain::BoardState;

pub async fn handle(ctx: &CliContext, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::Create { board_id, title } => {
            let command = CreateList::new(ctx.ids(), title);
            let state = ctx.execute(&board_id, &command).await?;
            output::output_success(state.list(&command.list_id)?)?;
        }
        ListAction::Rename {
            board_id,
            id,
            title,
        } => {
            let state = ctx
                .execute(&board_id, &RenameList { list_id: id.clone(), title })
                .await?;
            output::output_success(state.list(&id)?)?;
        }
        ListAction::Delete { board_id, id } => {
            ctx.execute(&board_id, &DeleteList { list_id: id.clone() })
                .await?;
            output::output_success(serde_json::json!({ "deleted": id }))?;
        }
        ListAction::Sort { board_id, id, by } => {
            let state = ctx
                .execute(
                    &board_id,
                    &SortListCards {
                        list_id: id.clone(),
                        sort_key: by,
                    },
                )
                .await?;
            output::output_success(state.list(&id)?)?;
        }
        ListAction::Move {
            board_id,
            id,
            position,
        } => {
            let state = ctx
                .execute(
                    &board_id,
                    &MoveList {
                        list_id: id,
                        target_index: position,
                    },
                )
                .await?;
            output_list_order(&state)?;
        }
    }
    Ok(())
}

fn output_list_order(state: &BoardState) -> anyhow::Result<()> {
    output::output_success(serde_json::json!({ "listOrder": state.list_order }))
}
