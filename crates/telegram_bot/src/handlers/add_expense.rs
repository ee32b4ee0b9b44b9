//! Add-expense flow: amount, name, category, confirmation.

use engine::pagination::{PAGE_SIZE, total_pages};
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
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
) -> ResponseResult<()> {
    let Some(currency) = cfg.engine.currency_of(user_id).await else {
        return handle_error_situation(
            bot,
            chat_id,
            session,
            lang,
            texts::error_user_currency(lang),
            Some(SafeExit::AddExpense),
        )
        .await;
    };

    session.data.currency = Some(currency.clone());
    session.state = ChatState::AddEnteringAmount;
    bot.send_message(chat_id, texts::input_amount_message(lang, &currency))
        .reply_markup(ui::menu_only(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_amount(
    bot: &Bot,
    chat_id: ChatId,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    let Ok(amount) = parsing::parse_amount(text) else {
        bot.send_message(chat_id, texts::error_amount(lang)).await?;
        return Ok(());
    };

    session.data.amount = Some(amount);
    session.state = ChatState::AddEnteringName;
    bot.send_message(chat_id, texts::input_expense_name(lang))
        .await?;
    Ok(())
}

pub(super) async fn handle_name(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    text: &str,
) -> ResponseResult<()> {
    if text.is_empty() {
        bot.send_message(chat_id, texts::error_expense_name(lang))
            .await?;
        return Ok(());
    }
    session.data.expense_name = Some(text.to_string());

    let Some(categories) = cfg.engine.categories_of(user_id).await else {
        return handle_error_situation(
            bot,
            chat_id,
            session,
            lang,
            texts::error_no_categories_configured(lang),
            Some(SafeExit::AddExpense),
        )
        .await;
    };

    session.data.current_page = 0;
    session.data.last_page = total_pages(categories.len(), PAGE_SIZE).saturating_sub(1);
    session.data.categories = categories;
    session.state = ChatState::AddSelectingCategory;

    let sent = bot
        .send_message(chat_id, texts::choose_category(lang))
        .reply_markup(ui::category_page(
            &session.data.categories,
            0,
            Pager::AddExpenseCategories,
        ))
        .await?;
    session.data.pager_message_id = Some(sent.id);
    Ok(())
}

pub(super) async fn handle_category_event(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    session: &mut Session,
    lang: Language,
    payload: CallbackPayload,
) -> ResponseResult<()> {
    match payload {
        CallbackPayload::NextPage(Pager::AddExpenseCategories)
        | CallbackPayload::PrevPage(Pager::AddExpenseCategories) => {
            let forward = matches!(payload, CallbackPayload::NextPage(_));
            let page_index = flip_page(session, forward);
            bot.edit_message_reply_markup(chat_id, message_id)
                .reply_markup(ui::category_page(
                    &session.data.categories,
                    page_index,
                    Pager::AddExpenseCategories,
                ))
                .await?;
            Ok(())
        }
        CallbackPayload::Category { id, name } => {
            let (Some(amount), Some(expense_name), Some(currency)) = (
                session.data.amount,
                session.data.expense_name.clone(),
                session.data.currency.clone(),
            ) else {
                return handle_error_situation(
                    bot,
                    chat_id,
                    session,
                    lang,
                    texts::error_unknown(lang),
                    Some(SafeExit::AddExpense),
                )
                .await;
            };

            session.data.category_id = Some(id);
            session.data.category_name = Some(name.clone());
            session.state = ChatState::AddConfirmingExpense;
            bot.send_message(
                chat_id,
                texts::confirm_expense_message(lang, &expense_name, amount, &currency, &name),
            )
            .reply_markup(ui::confirm_cancel(lang))
            .await?;
            Ok(())
        }
        _ => Ok(()),
    }
}

pub(super) async fn handle_confirmation(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    session: &mut Session,
    lang: Language,
    payload: CallbackPayload,
) -> ResponseResult<()> {
    match payload {
        CallbackPayload::Confirm => {
            let (Some(amount), Some(name), Some(currency), Some(category_id)) = (
                session.data.amount,
                session.data.expense_name.clone(),
                session.data.currency.clone(),
                session.data.category_id,
            ) else {
                return handle_error_situation(
                    bot,
                    chat_id,
                    session,
                    lang,
                    texts::error_unknown(lang),
                    Some(SafeExit::AddExpense),
                )
                .await;
            };

            // Exit first so a slow insert can never leave the dialogue stuck.
            SafeExit::AddExpense.invoke(session);

            match cfg
                .engine
                .add_expense(user_id, &name, &currency, amount, category_id)
                .await
            {
                Ok(()) => {
                    bot.send_message(chat_id, texts::expense_added(lang))
                        .reply_markup(ui::main_menu(lang))
                        .await?;
                }
                Err(err) => {
                    tracing::warn!("Expense of user {user_id} was not added: {err}");
                    bot.send_message(chat_id, texts::error_expense_not_added(lang))
                        .reply_markup(ui::main_menu(lang))
                        .await?;
                }
            }
            Ok(())
        }
        CallbackPayload::Cancel => {
            SafeExit::AddExpense.invoke(session);
            bot.send_message(chat_id, texts::expense_cancelled(lang))
                .reply_markup(ui::main_menu(lang))
                .await?;
            Ok(())
        }
        _ => Ok(()),
    }
}
