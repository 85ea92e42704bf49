use crate::cli::{CardAction, CardCreateArgs, CardMoveArgs, CardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::commands::{CreateCard, DeleteCard, MoveCard, UpdateCard};
use kanban_domain::{BoardState, CardFields, CardUpdate, DragSession, DropTarget, FieldUpdate};

pub async fn handle(ctx: &CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Create(args) => {
            let board_id = args.board_id.clone();
            let command = CreateCard::new(ctx.ids(), args.list_id.clone(), build_card_fields(args));
            let state = ctx.execute(&board_id, &command).await?;
            output::output_success(state.card(&command.card_id)?)?;
        }
        CardAction::Get { board_id, id } => {
            let state = ctx.board_state(&board_id).await?;
            output::output_success(state.card(&id)?)?;
        }
        CardAction::List { board_id, list_id } => {
            let state = ctx.board_state(&board_id).await?;
            output::output_list(state.cards_for_list(&list_id)?)?;
        }
        CardAction::Update(args) => {
            let id = args.id.clone();
            let board_id = args.board_id.clone();
            let updates = build_card_update(args);
            let state = ctx
                .repo
                .update_board_state(&board_id, |state| {
                    let card = state.card(&id)?.with_update(updates);
                    state.apply(&UpdateCard { card })
                })
                .await?;
            output::output_success(state.card(&id)?)?;
        }
        CardAction::Delete { board_id, id } => {
            ctx.execute(&board_id, &DeleteCard { card_id: id.clone() })
                .await?;
            output::output_success(serde_json::json!({ "deleted": id }))?;
        }
        CardAction::Move(args) => {
            let state = ctx
                .repo
                .update_board_state(&args.board_id, |state| move_card(state, &args))
                .await?;
            let list_id = state
                .list_of_card(&args.id)
                .ok_or_else(|| KanbanError::not_found("Card", &args.id))?;
            let position = state.list(list_id)?.position_of(&args.id);
            output::output_success(serde_json::json!({
                "card": state.card(&args.id)?,
                "listId": list_id,
                "position": position,
            }))?;
        }
    }
    Ok(())
}

/// `--before`/`--after` drop relative to another card the way a drag does;
/// otherwise the card goes to `--position` of `--list-id`, appending when no
/// position is given.
fn move_card(state: &BoardState, args: &CardMoveArgs) -> KanbanResult<BoardState> {
    let target = match (&args.before, &args.after) {
        (Some(card_id), _) => Some(DropTarget::before(card_id.clone())),
        (None, Some(card_id)) => Some(DropTarget::after(card_id.clone())),
        (None, None) => None,
    };
    if let Some(target) = target {
        let session = DragSession::start(state, args.id.clone())?;
        return Ok(session.drop_on(&target)?.state);
    }

    let target_list_id = match &args.list_id {
        Some(list_id) => list_id.clone(),
        None => state
            .list_of_card(&args.id)
            .cloned()
            .ok_or_else(|| KanbanError::not_found("Card", &args.id))?,
    };
    state.apply(&MoveCard {
        card_id: args.id.clone(),
        target_list_id,
        target_index: args.position.unwrap_or(usize::MAX),
    })
}

fn build_card_fields(args: CardCreateArgs) -> CardFields {
    CardFields {
        title: args.title,
        description: args.description,
        labels: args.labels,
        due_date: args.due_date,
        assignee: args.assignee,
    }
}

fn build_card_update(args: CardUpdateArgs) -> CardUpdate {
    let labels = if args.clear_labels {
        Some(Vec::new())
    } else {
        args.labels
    };
    CardUpdate {
        title: args.title,
        description: args.description,
        labels,
        due_date: FieldUpdate::from_flags(args.due_date, args.clear_due_date),
        assignee: FieldUpdate::from_flags(args.assignee, args.clear_assignee),
    }
}
