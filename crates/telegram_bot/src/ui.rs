//! Keyboard construction.
//!
//! Paginated pickers render at most `PAGE_SIZE` items per page, laid out
//! `ROW_SIZE` buttons per row, followed by a navigation row of exactly three
//! elements: prev arrow, a "{page}/{total}" label and next arrow.

use engine::pagination::{PAGE_SIZE, ROW_SIZE, page, total_pages};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::{
    callback::{CallbackPayload, Pager},
    texts::{self, Language},
};

pub(crate) fn main_menu(lang: Language) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(texts::add_expense_button(lang))],
        vec![KeyboardButton::new(texts::statistics_button(lang))],
        vec![KeyboardButton::new(texts::settings_button(lang))],
    ])
    .resize_keyboard()
}

/// The single "back to the menu" button shown while a flow collects text.
pub(crate) fn menu_only(lang: Language) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(texts::main_menu_button(
        lang,
    ))]])
    .resize_keyboard()
}

pub(crate) fn add_categories(lang: Language) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(
        texts::end_categories_button(lang),
    )]])
    .resize_keyboard()
}

pub(crate) fn settings_menu(lang: Language) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(texts::category_settings_button(lang))],
        vec![KeyboardButton::new(texts::change_currency_button(lang))],
        vec![KeyboardButton::new(texts::change_language_button(lang))],
        vec![KeyboardButton::new(texts::main_menu_button(lang))],
    ])
    .resize_keyboard()
}

pub(crate) fn category_settings_menu(lang: Language) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(texts::add_category_button(lang))],
        vec![KeyboardButton::new(texts::remove_category_button(lang))],
        vec![KeyboardButton::new(texts::main_menu_button(lang))],
    ])
    .resize_keyboard()
}

pub(crate) fn languages() -> InlineKeyboardMarkup {
    let row = texts::LANGUAGES
        .iter()
        .map(|lang| {
            InlineKeyboardButton::callback(
                lang.native_name(),
                CallbackPayload::Language(lang.code().to_string()).encode(),
            )
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![row])
}

pub(crate) fn confirm_cancel(lang: Language) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(
            texts::confirm_button(lang),
            CallbackPayload::Confirm.encode(),
        ),
        InlineKeyboardButton::callback(texts::cancel_button(lang), CallbackPayload::Cancel.encode()),
    ]])
}

pub(crate) fn periods(lang: Language) -> InlineKeyboardMarkup {
    use engine::Period;
    let rows = vec![
        vec![
            period_button(lang, Period::Day),
            period_button(lang, Period::Week),
        ],
        vec![
            period_button(lang, Period::Month),
            period_button(lang, Period::Year),
        ],
        vec![period_button(lang, Period::All)],
        vec![InlineKeyboardButton::callback(
            texts::custom_period_button(lang),
            CallbackPayload::CustomPeriod.encode(),
        )],
    ];
    InlineKeyboardMarkup::new(rows)
}

fn period_button(lang: Language, period: engine::Period) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(
        texts::period_button(lang, period),
        CallbackPayload::Period(period).encode(),
    )
}

/// One page of a category picker: the item grid plus the navigation row.
pub(crate) fn category_page(
    categories: &[(String, i64)],
    page_index: usize,
    pager: Pager,
) -> InlineKeyboardMarkup {
    let mut rows = category_grid(categories, page_index);
    rows.push(navigation_row(
        page_index,
        total_pages(categories.len(), PAGE_SIZE),
        pager,
    ));
    InlineKeyboardMarkup::new(rows)
}

/// The statistics multi-select: an "all categories" row on top of the grid,
/// a "done" row below the navigation.
pub(crate) fn stats_category_page(
    lang: Language,
    categories: &[(String, i64)],
    page_index: usize,
) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback(
        texts::all_categories_button(lang),
        CallbackPayload::Category {
            id: engine::ALL_CATEGORIES_ID,
            name: texts::all_categories_button(lang).to_string(),
        }
        .encode(),
    )]];
    rows.extend(category_grid(categories, page_index));
    rows.push(navigation_row(
        page_index,
        total_pages(categories.len(), PAGE_SIZE),
        Pager::StatsCategories,
    ));
    rows.push(vec![InlineKeyboardButton::callback(
        texts::done_button(lang),
        CallbackPayload::EndCategories.encode(),
    )]);
    InlineKeyboardMarkup::new(rows)
}

/// Navigation-only keyboard for flipping through rendered statistics pages.
pub(crate) fn stats_pages_nav(page_index: usize, total: usize) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![navigation_row(page_index, total, Pager::StatsPages)])
}

fn category_grid(categories: &[(String, i64)], page_index: usize) -> Vec<Vec<InlineKeyboardButton>> {
    page(categories, page_index, PAGE_SIZE)
        .chunks(ROW_SIZE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|(name, id)| {
                    InlineKeyboardButton::callback(
                        name.clone(),
                        CallbackPayload::Category {
                            id: *id,
                            name: name.clone(),
                        }
                        .encode(),
                    )
                })
                .collect()
        })
        .collect()
}

fn navigation_row(page_index: usize, total: usize, pager: Pager) -> Vec<InlineKeyboardButton> {
    vec![
        InlineKeyboardButton::callback("<", CallbackPayload::PrevPage(pager).encode()),
        InlineKeyboardButton::callback(
            format!("{}/{}", page_index + 1, total),
            CallbackPayload::PageLabel.encode(),
        ),
        InlineKeyboardButton::callback(">", CallbackPayload::NextPage(pager).encode()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(n: usize) -> Vec<(String, i64)> {
        (0..n).map(|i| (format!("cat{i}"), i as i64)).collect()
    }

    #[test]
    fn grid_respects_page_and_row_limits() {
        let kb = category_page(&categories(13), 0, Pager::AddExpenseCategories);
        // 6 items over 3 rows of 2, plus the navigation row
        assert_eq!(kb.inline_keyboard.len(), 4);
        for row in &kb.inline_keyboard[..3] {
            assert_eq!(row.len(), 2);
        }
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let kb = category_page(&categories(13), 2, Pager::AddExpenseCategories);
        assert_eq!(kb.inline_keyboard.len(), 2);
        assert_eq!(kb.inline_keyboard[0].len(), 1);
    }

    #[test]
    fn navigation_row_has_three_elements_and_human_numbering() {
        let kb = category_page(&categories(13), 1, Pager::AddExpenseCategories);
        let nav = kb.inline_keyboard.last().unwrap();
        assert_eq!(nav.len(), 3);
        assert_eq!(nav[1].text, "2/3");
    }

    #[test]
    fn stats_picker_wraps_grid_with_all_and_done() {
        let kb = stats_category_page(Language::En, &categories(4), 0);
        let first = &kb.inline_keyboard[0][0];
        assert_eq!(first.text, "All categories");
        let last = kb.inline_keyboard.last().unwrap();
        assert_eq!(last[0].text, "Done");
    }
}
