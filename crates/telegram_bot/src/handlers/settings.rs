//! Settings flow: categories, currency and language.

use engine::pagination::{PAGE_SIZE, total_pages};
use teloxide::{prelude::*, types::{ChatId, MessageId}};

use crate::{
    ConfigParameters,
    callback::{CallbackPayload, Pager},
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
    session.state = ChatState::SettingsMenu;
    bot.send_message(chat_id, texts::settings_menu_message(lang))
        .reply_markup(ui::settings_menu(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_menu(
    bot: &Bot,
    chat_id: ChatId,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if texts::is_category_settings_button(text) {
        session.state = ChatState::CategorySettingsMenu;
        bot.send_message(chat_id, texts::category_settings_message(lang))
            .reply_markup(ui::category_settings_menu(lang))
            .await?;
    } else if texts::is_change_currency_button(text) {
        session.state = ChatState::ChangingCurrency;
        bot.send_message(chat_id, texts::input_new_currency_message(lang))
            .reply_markup(ui::menu_only(lang))
            .await?;
    } else if texts::is_change_language_button(text) {
        session.state = ChatState::ChangingLanguage;
        bot.send_message(chat_id, texts::choose_new_language_message(lang))
            .reply_markup(ui::languages())
            .await?;
    } else {
        bot.send_message(chat_id, texts::command_not_recognized(lang))
            .reply_markup(ui::settings_menu(lang))
            .await?;
    }
    Ok(())
}

pub(super) async fn handle_category_menu(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if texts::is_add_category_button(text) {
        session.state = ChatState::AddingCategories;
        bot.send_message(chat_id, texts::input_categories_message(lang))
            .reply_markup(ui::add_categories(lang))
            .await?;
        return Ok(());
    }

    if texts::is_remove_category_button(text) {
        let Some(categories) = cfg.engine.categories_of(user_id).await else {
            return handle_error_situation(
                bot,
                chat_id,
                session,
                lang,
                texts::error_no_categories_configured(lang),
                Some(SafeExit::Settings),
            )
            .await;
        };

        session.data.current_page = 0;
        session.data.last_page = total_pages(categories.len(), PAGE_SIZE).saturating_sub(1);
        session.data.categories = categories;
        session.state = ChatState::RemovingCategory;

        let sent = bot
            .send_message(chat_id, texts::choose_category_to_remove(lang))
            .reply_markup(ui::category_page(
                &session.data.categories,
                0,
                Pager::RemoveCategories,
            ))
            .await?;
        session.data.pager_message_id = Some(sent.id);
        return Ok(());
    }

    bot.send_message(chat_id, texts::command_not_recognized(lang))
        .reply_markup(ui::category_settings_menu(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_new_category(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if texts::is_end_categories_button(text) {
        if session.data.new_categories.is_empty() {
            bot.send_message(chat_id, texts::error_no_categories(lang))
                .await?;
            return Ok(());
        }

        let names = session.data.new_categories.clone();
        match cfg.engine.add_categories(user_id, &names).await {
            Ok(()) => {
                SafeExit::Settings.invoke(session);
                bot.send_message(chat_id, texts::categories_added(lang))
                    .reply_markup(ui::main_menu(lang))
                    .await?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Adding categories for user {user_id} failed: {err}");
                handle_error_situation(
                    bot,
                    chat_id,
                    session,
                    lang,
                    texts::error_config_not_changed(lang),
                    Some(SafeExit::Settings),
                )
                .await
            }
        }
    } else if text.is_empty() || text.contains(':') {
        bot.send_message(chat_id, texts::error_category_name(lang))
            .await?;
        Ok(())
    } else {
        session.data.new_categories.push(text.to_string());
        bot.send_message(chat_id, texts::input_next_category_message(lang))
            .await?;
        Ok(())
    }
}

pub(super) async fn handle_new_currency(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if text.is_empty() {
        bot.send_message(chat_id, texts::input_new_currency_message(lang))
            .await?;
        return Ok(());
    }

    match cfg.engine.change_currency(user_id, text).await {
        Ok(()) => {
            SafeExit::Settings.invoke(session);
            bot.send_message(chat_id, texts::currency_changed(lang))
                .reply_markup(ui::main_menu(lang))
                .await?;
            Ok(())
        }
        Err(err) => {
            tracing::warn!("Currency change for user {user_id} failed: {err}");
            handle_error_situation(
                bot,
                chat_id,
                session,
                lang,
                texts::error_config_not_changed(lang),
                Some(SafeExit::Settings),
            )
            .await
        }
    }
}

pub(super) async fn handle_remove_event(
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
        CallbackPayload::NextPage(Pager::RemoveCategories)
        | CallbackPayload::PrevPage(Pager::RemoveCategories) => {
            let forward = matches!(payload, CallbackPayload::NextPage(_));
            let page_index = flip_page(session, forward);
            bot.edit_message_reply_markup(chat_id, message_id)
                .reply_markup(ui::category_page(
                    &session.data.categories,
                    page_index,
                    Pager::RemoveCategories,
                ))
                .await?;
            Ok(())
        }
        CallbackPayload::Category { id, .. } => {
            match cfg.engine.remove_category(user_id, id).await {
                Ok(()) => {
                    SafeExit::Settings.invoke(session);
                    bot.send_message(chat_id, texts::category_removed(lang))
                        .reply_markup(ui::main_menu(lang))
                        .await?;
                    Ok(())
                }
                Err(err) => {
                    tracing::warn!("Removing category {id} for user {user_id} failed: {err}");
                    handle_error_situation(
                        bot,
                        chat_id,
                        session,
                        lang,
                        texts::error_config_not_changed(lang),
                        Some(SafeExit::Settings),
                    )
                    .await
                }
            }
        }
        _ => Ok(()),
    }
}

pub(super) async fn handle_language_change(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    payload: CallbackPayload,
) -> ResponseResult<()> {
    let CallbackPayload::Language(code) = payload else {
        return Ok(());
    };
    let Some(new_lang) = Language::from_code(&code) else {
        return handle_error_situation(
            bot,
            chat_id,
            session,
            Language::default(),
            texts::error_unknown(Language::default()),
            Some(SafeExit::Settings),
        )
        .await;
    };

    match cfg.engine.change_language(user_id, new_lang.code()).await {
        Ok(()) => {
            SafeExit::Settings.invoke(session);
            // Confirm in the freshly chosen language.
            bot.send_message(chat_id, texts::language_changed(new_lang))
                .reply_markup(ui::main_menu(new_lang))
                .await?;
            Ok(())
        }
        Err(err) => {
            tracing::warn!("Language change for user {user_id} failed: {err}");
            handle_error_situation(
                bot,
                chat_id,
                session,
                new_lang,
                texts::error_config_not_changed(new_lang),
                Some(SafeExit::Settings),
            )
            .await
        }
    }
}
