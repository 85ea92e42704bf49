use crate::cli::{BoardAction, BoardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_domain::{Board, BoardFields, BoardUpdate, Card, FieldUpdate};
use serde::Serialize;

/// A board with its lists and cards, both in display order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardView<'a> {
    board: Board,
    lists: Vec<ListView<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListView<'a> {
    id: &'a str,
    title: &'a str,
    cards: Vec<&'a Card>,
}

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Create {
            title,
            description,
            color,
        } => {
            let board = ctx
                .repo
                .create_board(BoardFields {
                    title,
                    description,
                    color,
                })
                .await?;
            output::output_success(&board)?;
        }
        BoardAction::List => {
            let boards = ctx.repo.list_boards().await?;
            output::output_list(boards)?;
        }
        BoardAction::Get { id } => {
            let board = ctx.repo.get_board(&id).await?;
            output::output_success(&board)?;
        }
        BoardAction::Update(args) => {
            let board = handle_update(ctx, args).await?;
            output::output_success(&board)?;
        }
        BoardAction::Show { id } => {
            let board = ctx.repo.get_board(&id).await?;
            let state = ctx.board_state(&id).await?;
            let lists = state
                .ordered_lists()
                .map(|list| {
                    Ok(ListView {
                        id: &list.id,
                        title: &list.title,
                        cards: state.cards_for_list(&list.id)?,
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            output::output_success(BoardView { board, lists })?;
        }
    }
    Ok(())
}

async fn handle_update(ctx: &CliContext, args: BoardUpdateArgs) -> anyhow::Result<Board> {
    let updates = BoardUpdate {
        title: args.title,
        description: FieldUpdate::from_flags(args.description, args.clear_description),
        color: args.color,
    };
    Ok(ctx.repo.update_board(&args.id, updates).await?)
}
