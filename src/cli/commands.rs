//! Runs a parsed command against the diary service.

use super::{render, Command, EntryArgs, ListArgs, ShowArgs};
use crate::api::DiaryClient;
use crate::calendar::CalendarView;
use crate::config::Config;
use crate::constants::PROMPT_CONTINUE_ENTRY;
use crate::date_codec::DiaryDate;
use crate::diary::{filter_by_date, normalize, sort_by_date, DiaryFilter, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::gallery::Gallery;
use crate::images::ImageIndex;
use crate::ops::{
    entry_prompt, load_journal_cancellable, open_for_edit, upload_profile_photo, DiaryForm,
    EntryPrompt, UploadRequest,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const MESSAGE_UPLOADED: &str = "プロフィール画像をアップロードしました。";

/// Executes `command` and returns the text to print.
///
/// Every command gives up with `AppError::Cancelled` once `token` is
/// cancelled, whichever request it is waiting on.
pub async fn execute(
    command: Command,
    config: &Config,
    token: &CancellationToken,
) -> AppResult<String> {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("Command cancelled");
            Err(AppError::Cancelled)
        }
        result = dispatch(command, config, token) => result,
    }
}

async fn dispatch(
    command: Command,
    config: &Config,
    token: &CancellationToken,
) -> AppResult<String> {
    let client = DiaryClient::new(config)?;

    match command {
        Command::List(args) => list(&client, token, args).await,
        Command::Show(args) => show(&client, args).await,
        Command::Write(args) => write(&client, config, args).await,
        Command::Edit(args) => edit(&client, config, args).await,
        Command::Delete { id } => {
            client.delete_diary(id).await?;
            info!("Deleted diary {}", id);
            Ok(format!("Deleted diary #{}", id))
        }
        Command::Calendar { month, select } => {
            let journal = load_journal_cancellable(&client, token).await?;
            let mut view = match (month, select) {
                (Some(cursor), _) => CalendarView::at(cursor),
                (None, Some(date)) => CalendarView::new(date),
                (None, None) => CalendarView::new(DiaryDate::today()),
            };
            let mut out = String::new();
            if let Some(date) = select {
                view.click(date);
            }
            out.push_str(&render::calendar(&view, &view.cells(&journal.diary_dates())));
            if let Some(date) = view.selected() {
                let on_day = filter_by_date(&journal.diaries, date);
                out.push_str("\n\n");
                out.push_str(&render::diary_list(&on_day));
            }
            Ok(out)
        }
        Command::Gallery { index } => {
            let journal = load_journal_cancellable(&client, token).await?;
            let mut gallery = Gallery::new(&journal.diaries);
            if let Some(index) = index {
                gallery.select(index);
            }
            Ok(render::gallery(&gallery, &journal.images))
        }
        Command::Upload { file, name, email } => {
            upload_profile_photo(&client, &UploadRequest { file, name, email }).await?;
            Ok(MESSAGE_UPLOADED.to_string())
        }
    }
}

async fn list(client: &DiaryClient, token: &CancellationToken, args: ListArgs) -> AppResult<String> {
    let journal = load_journal_cancellable(client, token).await?;

    let filter = DiaryFilter {
        date_range: args.from.zip(args.to),
        search_query: args.search,
    };
    let mut views = filter.apply(&journal.diaries);
    if let Some(date) = args.date {
        views = filter_by_date(&views, date);
    }
    let order = if args.asc {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };
    Ok(render::diary_list(&sort_by_date(&views, order)))
}

async fn show(client: &DiaryClient, args: ShowArgs) -> AppResult<String> {
    let lookup = async {
        match (args.id, args.date) {
            (Some(id), _) => client.get_diary(id).await,
            (None, Some(date)) => client.get_diary_by_date(date).await,
            (None, None) => Err(AppError::Validation(
                "Either a date or an id is required".to_string(),
            )),
        }
    };
    let (record, images) = futures::try_join!(lookup, client.list_all_images())?;

    let record = match (record, args.date) {
        (Some(record), _) => record,
        (None, Some(date)) => return Ok(render::empty_day(date)),
        (None, None) => return Err(AppError::Validation("No diary found".to_string())),
    };
    let views = normalize(vec![record])?;
    let images = ImageIndex::build(images);
    match views.first() {
        Some(view) => Ok(render::diary_card(view, images.lookup(&view.id))),
        None => Err(AppError::Validation("Diary has been deleted".to_string())),
    }
}

async fn write(client: &DiaryClient, config: &Config, args: EntryArgs) -> AppResult<String> {
    let prompt = entry_prompt(client, args.date).await?;
    if let EntryPrompt::Continue(_) = prompt {
        return Err(AppError::Validation(format!(
            "{} already has a diary; use `mirai edit --date {}`",
            args.date, args.date
        )));
    }

    let mut form = DiaryForm::new(args.date);
    form.set_body(read_body(&args).await?);
    let outcome = form.submit(client, config.user_id).await?;
    Ok(format!(
        "{}\n{}",
        prompt.text(),
        render::submission(&form, &outcome)
    ))
}

async fn edit(client: &DiaryClient, config: &Config, args: EntryArgs) -> AppResult<String> {
    let Some(mut form) = open_for_edit(client, args.date).await? else {
        return Ok(render::empty_day(args.date));
    };

    form.set_body(read_body(&args).await?);
    let outcome = form.submit(client, config.user_id).await?;
    Ok(format!(
        "{}\n{}",
        PROMPT_CONTINUE_ENTRY,
        render::submission(&form, &outcome)
    ))
}

async fn read_body(args: &EntryArgs) -> AppResult<String> {
    match (&args.body, &args.file) {
        (Some(body), _) => Ok(body.clone()),
        (None, Some(path)) => {
            let path = path.to_string_lossy();
            let expanded = shellexpand::full(&path)
                .map_err(|e| AppError::Config(format!("Failed to expand path '{}': {}", path, e)))?;
            debug!("Reading diary body from {}", expanded);
            Ok(tokio::fs::read_to_string(&*expanded).await?)
        }
        (None, None) => Err(AppError::Validation(
            "Either --body or --file is required".to_string(),
        )),
    }
}
