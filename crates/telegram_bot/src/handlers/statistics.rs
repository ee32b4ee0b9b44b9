//! Statistics flow: period, optional custom range, category multi-select,
//! then paged report navigation.

use engine::{StatisticsRequest, pagination};
use teloxide::{prelude::*, types::{ChatId, MessageId}};

use crate::{
    ConfigParameters,
    callback::{CallbackPayload, Pager},
    parsing,
    state::{ChatState, SafeExit, Session},
    texts::{self, Language},
    ui,
};

use super::{flip_page, handle_error_situation};

pub(super) async fn begin(
    bot: &Bot,
    chat_id: ChatId,
    session: &mut Session,
    lang: Language,
) -> ResponseResult<()> {
    session.state = ChatState::StatsChoosingPeriod;
    bot.send_message(chat_id, texts::choose_period_message(lang))
        .reply_markup(ui::periods(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_period_event(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    payload: CallbackPayload,
) -> ResponseResult<()> {
    match payload {
        CallbackPayload::Period(period) => {
            session.data.period = Some(period);
            enter_category_selection(bot, chat_id, user_id, cfg, session, lang).await
        }
        CallbackPayload::CustomPeriod => {
            session.state = ChatState::StatsEnteringStartDate;
            bot.send_message(chat_id, texts::input_start_date_message(lang))
                .reply_markup(ui::menu_only(lang))
                .await?;
            Ok(())
        }
        _ => Ok(()),
    }
}

pub(super) async fn handle_start_date(
    bot: &Bot,
    chat_id: ChatId,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    let Ok(date) = parsing::parse_date(text) else {
        bot.send_message(chat_id, texts::error_date(lang)).await?;
        return Ok(());
    };

    session.data.custom_start = Some(date);
    session.state = ChatState::StatsEnteringEndDate;
    bot.send_message(chat_id, texts::input_end_date_message(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_end_date(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    let Ok(date) = parsing::parse_date(text) else {
        bot.send_message(chat_id, texts::error_date(lang)).await?;
        return Ok(());
    };

    session.data.custom_end = Some(date);
    enter_category_selection(bot, chat_id, user_id, cfg, session, lang).await
}

async fn enter_category_selection(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
) -> ResponseResult<()> {
    let Some(categories) = cfg.engine.categories_of(user_id).await else {
        return handle_error_situation(
            bot,
            chat_id,
            session,
            lang,
            texts::error_no_categories_configured(lang),
            Some(SafeExit::Statistics),
        )
        .await;
    };

    session.data.current_page = 0;
    session.data.last_page =
        pagination::total_pages(categories.len(), pagination::PAGE_SIZE).saturating_sub(1);
    session.data.categories = categories;
    session.state = ChatState::StatsSelectingCategories;

    let sent = bot
        .send_message(chat_id, texts::choose_stats_categories_message(lang))
        .reply_markup(ui::stats_category_page(lang, &session.data.categories, 0))
        .await?;
    session.data.pager_message_id = Some(sent.id);
    Ok(())
}

pub(super) async fn handle_selection_event(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    payload: CallbackPayload,
) -> ResponseResult<()> {
    match payload {
        CallbackPayload::NextPage(Pager::StatsCategories)
        | CallbackPayload::PrevPage(Pager::StatsCategories) => {
            let forward = matches!(payload, CallbackPayload::NextPage(_));
            let page_index = flip_page(session, forward);
            bot.edit_message_reply_markup(chat_id, message_id)
                .reply_markup(ui::stats_category_page(
                    lang,
                    &session.data.categories,
                    page_index,
                ))
                .await?;
            Ok(())
        }
        CallbackPayload::Category { id, name } => {
            // Repeated taps on the same category are a no-op.
            if !session
                .data
                .selected_categories
                .iter()
                .any(|(selected, _)| *selected == id)
            {
                session.data.selected_categories.push((id, name));
            }
            Ok(())
        }
        CallbackPayload::EndCategories => {
            finish(bot, chat_id, user_id, cfg, session, lang).await
        }
        _ => Ok(()),
    }
}

async fn finish(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
) -> ResponseResult<()> {
    if session.data.selected_categories.is_empty() {
        return handle_error_situation(
            bot,
            chat_id,
            session,
            lang,
            texts::error_no_categories_selected(lang),
            Some(SafeExit::Statistics),
        )
        .await;
    }

    let request = StatisticsRequest {
        period: session.data.period,
        custom_range: match (session.data.custom_start, session.data.custom_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        },
        categories: session.data.selected_categories.clone(),
    };

    match cfg.engine.statistics(user_id, &request).await {
        Ok(pages) => {
            let rendered: Vec<String> = pages
                .iter()
                .map(|p| texts::stats_page_text(lang, &p.category_name, &p.totals))
                .collect();
            SafeExit::Statistics.invoke(session);

            session.data.stats_current_page = 0;
            session.data.stats_last_page = rendered.len().saturating_sub(1);
            session.data.stats_pages = rendered;
            session.state = ChatState::StatsViewingPages;

            let total = session.data.stats_pages.len();
            let Some(first) = session.data.stats_pages.first().cloned() else {
                return Ok(());
            };
            bot.send_message(chat_id, first)
                .reply_markup(ui::stats_pages_nav(0, total))
                .await?;
            Ok(())
        }
        Err(err) => {
            tracing::warn!("Statistics for user {user_id} were not generated: {err}");
            handle_error_situation(
                bot,
                chat_id,
                session,
                lang,
                texts::error_no_statistics(lang),
                Some(SafeExit::Statistics),
            )
            .await
        }
    }
}

pub(super) async fn handle_pages_event(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    session: &mut Session,
    payload: CallbackPayload,
) -> ResponseResult<()> {
    let forward = match payload {
        CallbackPayload::NextPage(Pager::StatsPages) => true,
        CallbackPayload::PrevPage(Pager::StatsPages) => false,
        _ => return Ok(()),
    };

    let data = &mut session.data;
    data.stats_current_page = if forward {
        pagination::next_page(data.stats_current_page, data.stats_last_page)
    } else {
        pagination::prev_page(data.stats_current_page, data.stats_last_page)
    };

    let Some(text) = data.stats_pages.get(data.stats_current_page).cloned() else {
        return Ok(());
    };
    bot.edit_message_text(chat_id, message_id, text)
        .reply_markup(ui::stats_pages_nav(
            data.stats_current_page,
            data.stats_pages.len(),
        ))
        .await?;
    Ok(())
}
