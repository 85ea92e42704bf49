use crate::cli::AttachmentAction;
use crate::context::CliContext;
use crate::output;
use kanban_domain::commands::{AddAttachment, RemoveAttachment};
use kanban_domain::Attachment;

pub async fn handle(ctx: &CliContext, action: AttachmentAction) -> anyhow::Result<()> {
    match action {
        AttachmentAction::Add {
            board_id,
            card_id,
            name,
            size,
            mime_type,
            url,
        } => {
            let attachment = Attachment::new(ctx.ids(), name, size, mime_type, url);
            let command = AddAttachment {
                card_id,
                attachment: attachment.clone(),
                max_bytes: ctx.max_attachment_bytes(),
            };
            ctx.execute(&board_id, &command).await?;
            output::output_success(serde_json::json!({
                "attachment": attachment,
                "humanSize": attachment.human_size(),
            }))?;
        }
        AttachmentAction::Remove {
            board_id,
            card_id,
            id,
        } => {
            ctx.execute(
                &board_id,
                &RemoveAttachment {
                    card_id,
                    attachment_id: id.clone(),
                },
            )
            .await?;
            output::output_success(serde_json::json!({ "removed": id }))?;
        }
    }
    Ok(())
}
