//! Update dispatch.
//!
//! Both endpoints lock the chat's session first and route on the current
//! dialogue state. Anything that does not fit the state falls back to a
//! safe exit, so an abandoned or broken flow always heals itself on the
//! next message.

use teloxide::{prelude::*, types::{ChatId, MessageId}};

use crate::{
    ConfigParameters,
    callback::CallbackPayload,
    state::{ChatState, SafeExit, Session},
    texts::{self, Language},
    ui,
};

mod add_expense;
mod registration;
mod settings;
mod statistics;

pub(crate) async fn handle_message(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let mut session = cfg.sessions.lock(chat_id).await;

    let Some(from) = msg.from.as_ref() else {
        let lang = session.data.reg_language.unwrap_or_default();
        let exit = SafeExit::for_state(session.state);
        return handle_error_situation(
            &bot,
            chat_id,
            &mut session,
            lang,
            texts::error_user_info(lang),
            exit,
        )
        .await;
    };
    let user_id = from.id.0 as i64;
    let lang = resolve_language(&cfg, user_id, &session).await;

    let text = msg.text().unwrap_or_default().trim();

    // /start restarts from anywhere.
    if text == "/start" {
        if let Some(exit) = SafeExit::for_state(session.state) {
            exit.invoke(&mut session);
        }
        return handle_start(&bot, chat_id, user_id, &cfg, &mut session, lang, text).await;
    }

    // The "main menu" reply button aborts whatever flow is collecting text.
    if texts::is_main_menu_button(text)
        && let Some(exit) = SafeExit::for_state(session.state)
    {
        exit.invoke(&mut session);
        bot.send_message(chat_id, texts::start_message(lang))
            .reply_markup(ui::main_menu(lang))
            .await?;
        return Ok(());
    }

    match session.state {
        ChatState::Start => {
            handle_start(&bot, chat_id, user_id, &cfg, &mut session, lang, text).await
        }
        ChatState::RegWaitingCurrency => {
            registration::handle_currency(&bot, chat_id, &mut session, lang, text).await
        }
        ChatState::RegWaitingCategories => {
            registration::handle_category(&bot, chat_id, user_id, &cfg, &mut session, lang, text)
                .await
        }
        ChatState::AddEnteringAmount => {
            add_expense::handle_amount(&bot, chat_id, &mut session, lang, text).await
        }
        ChatState::AddEnteringName => {
            add_expense::handle_name(&bot, chat_id, user_id, &cfg, &mut session, lang, text).await
        }
        ChatState::SettingsMenu => {
            settings::handle_menu(&bot, chat_id, &mut session, lang, text).await
        }
        ChatState::CategorySettingsMenu => {
            settings::handle_category_menu(&bot, chat_id, user_id, &cfg, &mut session, lang, text)
                .await
        }
        ChatState::AddingCategories => {
            settings::handle_new_category(&bot, chat_id, user_id, &cfg, &mut session, lang, text)
                .await
        }
        ChatState::ChangingCurrency => {
            settings::handle_new_currency(&bot, chat_id, user_id, &cfg, &mut session, lang, text)
                .await
        }
        ChatState::StatsEnteringStartDate => {
            statistics::handle_start_date(&bot, chat_id, &mut session, lang, text).await
        }
        ChatState::StatsEnteringEndDate => {
            statistics::handle_end_date(&bot, chat_id, user_id, &cfg, &mut session, lang, text)
                .await
        }
        // These states only react to inline buttons; a text message here
        // means the user walked away from the keyboard.
        ChatState::RegWaitingLanguage
        | ChatState::AddSelectingCategory
        | ChatState::AddConfirmingExpense
        | ChatState::RemovingCategory
        | ChatState::ChangingLanguage
        | ChatState::StatsChoosingPeriod
        | ChatState::StatsSelectingCategories
        | ChatState::StatsViewingPages => {
            let exit = SafeExit::for_state(session.state);
            handle_error_situation(
                &bot,
                chat_id,
                &mut session,
                lang,
                texts::command_not_recognized(lang),
                exit,
            )
            .await
        }
    }
}

pub(crate) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();
    let user_id = q.from.id.0 as i64;

    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        tracing::warn!("Failed to answer callback query {}: {err}", q.id.0);
    }

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(payload) = CallbackPayload::decode(data) else {
        tracing::warn!("Undecodable callback payload: {data}");
        return Ok(());
    };
    if payload == CallbackPayload::PageLabel {
        return Ok(());
    }

    let mut session = cfg.sessions.lock(chat_id).await;
    let lang = resolve_language(&cfg, user_id, &session).await;

    match session.state {
        ChatState::RegWaitingLanguage => {
            registration::handle_language(&bot, chat_id, &mut session, payload).await
        }
        ChatState::AddSelectingCategory => {
            add_expense::handle_category_event(
                &bot, chat_id, message_id, &mut session, lang, payload,
            )
            .await
        }
        ChatState::AddConfirmingExpense => {
            add_expense::handle_confirmation(
                &bot, chat_id, user_id, &cfg, &mut session, lang, payload,
            )
            .await
        }
        ChatState::RemovingCategory => {
            settings::handle_remove_event(
                &bot, chat_id, message_id, user_id, &cfg, &mut session, lang, payload,
            )
            .await
        }
        ChatState::ChangingLanguage => {
            settings::handle_language_change(&bot, chat_id, user_id, &cfg, &mut session, payload)
                .await
        }
        ChatState::StatsChoosingPeriod => {
            statistics::handle_period_event(
                &bot, chat_id, user_id, &cfg, &mut session, lang, payload,
            )
            .await
        }
        ChatState::StatsSelectingCategories => {
            statistics::handle_selection_event(
                &bot, chat_id, message_id, user_id, &cfg, &mut session, lang, payload,
            )
            .await
        }
        ChatState::StatsViewingPages => {
            statistics::handle_pages_event(&bot, chat_id, message_id, &mut session, payload).await
        }
        // A button from an earlier, already finished dialogue.
        _ => Ok(()),
    }
}

async fn handle_start(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if !cfg.engine.is_registered(user_id).await {
        return registration::begin(bot, chat_id, session).await;
    }

    if text == "/start" {
        bot.send_message(chat_id, texts::already_registered_message(lang))
            .reply_markup(ui::main_menu(lang))
            .await?;
        Ok(())
    } else if texts::is_add_expense_button(text) {
        add_expense::begin(bot, chat_id, user_id, cfg, session, lang).await
    } else if texts::is_statistics_button(text) {
        statistics::begin(bot, chat_id, session, lang).await
    } else if texts::is_settings_button(text) {
        settings::begin(bot, chat_id, session, lang).await
    } else {
        bot.send_message(chat_id, texts::command_not_recognized(lang))
            .reply_markup(ui::main_menu(lang))
            .await?;
        Ok(())
    }
}

/// Recover from a broken dialogue step: run the flow's safe exit (if the
/// conversation is inside a flow) and answer with exactly one error message
/// plus the main menu.
async fn handle_error_situation(
    bot: &Bot,
    chat_id: ChatId,
    session: &mut Session,
    lang: Language,
    text: &str,
    safe_exit: Option<SafeExit>,
) -> ResponseResult<()> {
    if let Some(exit) = safe_exit {
        exit.invoke(session);
    }
    bot.send_message(chat_id, text)
        .reply_markup(ui::main_menu(lang))
        .await?;
    Ok(())
}

async fn resolve_language(cfg: &ConfigParameters, user_id: i64, session: &Session) -> Language {
    if let Some(lang) = session.data.reg_language {
        return lang;
    }
    match cfg.engine.language_of(user_id).await {
        Some(code) => Language::from_code(&code).unwrap_or_default(),
        None => Language::default(),
    }
}

/// Advance the category pager one step in either direction. The cached
/// `last_page` from the first render drives the wraparound.
fn flip_page(session: &mut Session, forward: bool) -> usize {
    use engine::pagination::{next_page, prev_page};

    let data = &mut session.data;
    data.current_page = if forward {
        next_page(data.current_page, data.last_page)
    } else {
        prev_page(data.current_page, data.last_page)
    };
    data.current_page
}
