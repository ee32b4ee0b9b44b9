//! Registration flow: language, currency, then categories until "done".
//!
//! The three collected pieces are committed in one engine transaction at the
//! end, so a user is either fully registered or not registered at all.

use teloxide::{prelude::*, types::ChatId};

use crate::{
    ConfigParameters,
    callback::CallbackPayload,
    state::{ChatState, SafeExit, Session},
    texts::{self, Language},
    ui,
};

use super::handle_error_situation;

pub(super) async fn begin(bot: &Bot, chat_id: ChatId, session: &mut Session) -> ResponseResult<()> {
    session.state = ChatState::RegWaitingLanguage;
    bot.send_message(chat_id, texts::choose_language_message())
        .reply_markup(ui::languages())
        .await?;
    Ok(())
}

pub(super) async fn handle_language(
    bot: &Bot,
    chat_id: ChatId,
    session: &mut Session,
    payload: CallbackPayload,
) -> ResponseResult<()> {
    let CallbackPayload::Language(code) = payload else {
        return Ok(());
    };
    let Some(lang) = Language::from_code(&code) else {
        return handle_error_situation(
            bot,
            chat_id,
            session,
            Language::default(),
            texts::error_unknown(Language::default()),
            Some(SafeExit::Registration),
        )
        .await;
    };

    session.data.reg_language = Some(lang);
    session.state = ChatState::RegWaitingCurrency;
    bot.send_message(chat_id, texts::input_currency_message(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_currency(
    bot: &Bot,
    chat_id: ChatId,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if text.is_empty() {
        bot.send_message(chat_id, texts::input_currency_message(lang))
            .await?;
        return Ok(());
    }

    session.data.reg_currency = Some(text.to_string());
    session.state = ChatState::RegWaitingCategories;
    bot.send_message(chat_id, texts::input_categories_message(lang))
        .reply_markup(ui::add_categories(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_category(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if texts::is_end_categories_button(text) {
        return finish(bot, chat_id, user_id, cfg, session, lang).await;
    }

    if text.is_empty() || text.contains(':') {
        bot.send_message(chat_id, texts::error_category_name(lang))
            .await?;
        return Ok(());
    }

    session.data.reg_categories.push(text.to_string());
    bot.send_message(chat_id, texts::input_next_category_message(lang))
        .await?;
    Ok(())
}

async fn finish(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
) -> ResponseResult<()> {
    if session.data.reg_categories.is_empty() {
        bot.send_message(chat_id, texts::error_no_categories(lang))
            .await?;
        return Ok(());
    }

    let (Some(language), Some(currency)) = (
        session.data.reg_language,
        session.data.reg_currency.clone(),
    ) else {
        return handle_error_situation(
            bot,
            chat_id,
            session,
            lang,
            texts::error_registration(lang),
            Some(SafeExit::Registration),
        )
        .await;
    };
    let categories = session.data.reg_categories.clone();

    match cfg
        .engine
        .register(user_id, language.code(), &currency, &categories)
        .await
    {
        Ok(()) => {
            SafeExit::Registration.invoke(session);
            bot.send_message(chat_id, texts::registration_success_message(lang))
                .reply_markup(ui::main_menu(lang))
                .await?;
            Ok(())
        }
        Err(err) => {
            tracing::warn!("Registration of user {user_id} failed: {err}");
            handle_error_situation(
                bot,
                chat_id,
                session,
                lang,
                texts::error_registration(lang),
                Some(SafeExit::Registration),
            )
            .await
        }
    }
}
