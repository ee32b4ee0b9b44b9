//! Localized message catalog.
//!
//! Two locales, English and Russian. Reply-keyboard buttons arrive back as
//! plain message text, so every button label also has an `is_*` matcher
//! that accepts the label in either locale.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Language {
    #[default]
    En,
    Ru,
}

pub(crate) const LANGUAGES: [Language; 2] = [Language::En, Language::Ru];

impl Language {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    pub(crate) fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "ru" => Some(Language::Ru),
            _ => None,
        }
    }

    pub(crate) fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }
}

// ─── Reply-keyboard button labels ───────────────────────────────────────────

macro_rules! button {
    ($fn_name:ident, $is_name:ident, $en:expr, $ru:expr) => {
        pub(crate) fn $fn_name(lang: Language) -> &'static str {
            match lang {
                Language::En => $en,
                Language::Ru => $ru,
            }
        }

        pub(crate) fn $is_name(text: &str) -> bool {
            LANGUAGES.iter().any(|lang| $fn_name(*lang) == text)
        }
    };
}

button!(add_expense_button, is_add_expense_button, "Add expense", "Добавить трату");
button!(
    statistics_button,
    is_statistics_button,
    "Show expenses",
    "Показать траты за определенное время"
);
button!(settings_button, is_settings_button, "Settings", "Изменить настройки");
button!(main_menu_button, is_main_menu_button, "Main menu", "Главное меню");
button!(end_categories_button, is_end_categories_button, "Done", "Закончить ввод категорий");
button!(
    category_settings_button,
    is_category_settings_button,
    "Category settings",
    "Настройки категорий"
);
button!(
    change_currency_button,
    is_change_currency_button,
    "Change currency",
    "Изменить валюту"
);
button!(
    change_language_button,
    is_change_language_button,
    "Change language",
    "Изменить язык"
);
button!(add_category_button, is_add_category_button, "Add categories", "Добавить категории");
button!(
    remove_category_button,
    is_remove_category_button,
    "Remove a category",
    "Удалить категорию"
);

// ─── Inline button labels ───────────────────────────────────────────────────

pub(crate) fn confirm_button(lang: Language) -> &'static str {
    match lang {
        Language::En => "Confirm",
        Language::Ru => "Подтвердить",
    }
}

pub(crate) fn cancel_button(lang: Language) -> &'static str {
    match lang {
        Language::En => "Cancel",
        Language::Ru => "Отменить",
    }
}

pub(crate) fn all_categories_button(lang: Language) -> &'static str {
    match lang {
        Language::En => "All categories",
        Language::Ru => "Все категории",
    }
}

pub(crate) fn done_button(lang: Language) -> &'static str {
    match lang {
        Language::En => "Done",
        Language::Ru => "Готово",
    }
}

pub(crate) fn period_button(lang: Language, period: engine::Period) -> &'static str {
    use engine::Period;
    match (lang, period) {
        (Language::En, Period::Day) => "Day",
        (Language::En, Period::Week) => "Week",
        (Language::En, Period::Month) => "Month",
        (Language::En, Period::Year) => "Year",
        (Language::En, Period::All) => "All time",
        (Language::Ru, Period::Day) => "День",
        (Language::Ru, Period::Week) => "Неделя",
        (Language::Ru, Period::Month) => "Месяц",
        (Language::Ru, Period::Year) => "Год",
        (Language::Ru, Period::All) => "Все время",
    }
}

pub(crate) fn custom_period_button(lang: Language) -> &'static str {
    match lang {
        Language::En => "Custom period",
        Language::Ru => "Свой период",
    }
}

// ─── Messages ───────────────────────────────────────────────────────────────

macro_rules! message {
    ($fn_name:ident, $en:expr, $ru:expr) => {
        pub(crate) fn $fn_name(lang: Language) -> &'static str {
            match lang {
                Language::En => $en,
                Language::Ru => $ru,
            }
        }
    };
}

message!(
    start_message,
    "Welcome to the expense tracking bot!",
    "Рады приветствовать Вас в боте для отслеживания ваших трат!"
);
// Shown before any language is chosen, so it carries both locales.
pub(crate) fn choose_language_message() -> &'static str {
    "Choose a language / Выберите язык"
}
message!(
    input_currency_message,
    "Enter the currency you spend in (for example: USD).",
    "Введите валюту, в которой вы тратите (например: RUB)."
);
message!(
    input_categories_message,
    "Enter your expense categories one message at a time. Press the button when you are done.",
    "Вводите категории трат по одной в сообщении. Нажмите кнопку, когда закончите."
);
message!(
    input_next_category_message,
    "Saved. Enter the next category or press the button to finish.",
    "Сохранено. Введите следующую категорию или нажмите кнопку для завершения."
);
message!(
    registration_success_message,
    "Registration complete! Use the buttons below.",
    "Регистрация завершена! Используйте кнопки ниже."
);
message!(
    already_registered_message,
    "You are already registered. Use the buttons below.",
    "Вы уже зарегистрированы. Используйте кнопки ниже."
);
message!(
    error_registration,
    "Registration failed. Please try again with /start.",
    "Не удалось завершить регистрацию. Пожалуйста, попробуйте снова через /start."
);
message!(
    error_no_categories,
    "You have not entered a single category. Please enter at least one.",
    "Вы не ввели ни одной категории. Пожалуйста, введите хотя бы одну."
);
message!(
    error_category_name,
    "This category name is not valid. Please enter another one.",
    "Название категории недопустимо. Пожалуйста, введите другое."
);
message!(
    command_not_recognized,
    "Command not recognized.\nPlease use /start or the buttons below.",
    "Команда не распознана.\nПожалуйста, используйте /start или кнопки ниже."
);
message!(
    error_user_info,
    "Error: could not identify the user.",
    "Ошибка: не удалось получить информацию о пользователе."
);
message!(
    error_unknown,
    "Something went wrong. Please start over.",
    "Что-то пошло не так. Пожалуйста, начните заново."
);
message!(
    error_user_currency,
    "Error: could not find your currency.\nPlease set it in the settings.",
    "Ошибка: не удалось получить выбранную валюту.\nПожалуйста, выберите её в настройках."
);
message!(
    error_amount,
    "The amount you entered is not valid. Please try again.",
    "К сожалению, введенное количество затраченных средств не является валидным. Пожалуйста, повторите попытку."
);
message!(
    error_expense_name,
    "The expense name is not valid. Please try again.",
    "К сожалению, введенное название траты не является валидным. Пожалуйста, повторите попытку."
);
message!(
    input_expense_name,
    "Enter a name for this expense.",
    "Введите пожалуйста название для данного расхода."
);
message!(
    choose_category,
    "Please choose a category from the list below.\n\nIf a category is missing, add it in the settings.",
    "Пожалуйста, выберите категорию из списка ниже.\n\nВ случае, если нужной категории не хватает, то перейдите в настройки и добавьте."
);
message!(
    error_no_categories_configured,
    "You have no categories yet. Add some in the settings.",
    "У вас пока нет категорий. Добавьте их в настройках."
);
message!(
    expense_added,
    "Expense added!",
    "Трата добавлена!"
);
message!(
    expense_cancelled,
    "Expense cancelled.",
    "Добавление траты отменено."
);
message!(
    error_expense_not_added,
    "The expense was not added. Please try again.",
    "Трату не удалось добавить. Пожалуйста, попробуйте снова."
);
message!(
    settings_menu_message,
    "Settings. Choose what to change.",
    "Настройки. Выберите, что изменить."
);
message!(
    category_settings_message,
    "Category settings.",
    "Настройки категорий."
);
message!(
    input_new_currency_message,
    "Enter the new currency.",
    "Введите новую валюту."
);
message!(
    currency_changed,
    "Currency changed!",
    "Валюта изменена!"
);
message!(
    choose_new_language_message,
    "Choose the new language.",
    "Выберите новый язык."
);
message!(
    language_changed,
    "Language changed!",
    "Язык изменен!"
);
message!(
    choose_category_to_remove,
    "Choose the category to remove. Its expenses will be removed with it.",
    "Выберите категорию для удаления. Её траты будут удалены вместе с ней."
);
message!(
    category_removed,
    "Category removed!",
    "Категория удалена!"
);
message!(
    categories_added,
    "Categories added!",
    "Категории добавлены!"
);
message!(
    error_config_not_changed,
    "The settings were not changed. Please try again.",
    "Настройки не были изменены. Пожалуйста, попробуйте снова."
);
message!(
    choose_period_message,
    "Choose the period for the statistics.",
    "Выберите период для статистики."
);
message!(
    input_start_date_message,
    "Enter the start date (dd.mm.yyyy).",
    "Введите начальную дату (дд.мм.гггг)."
);
message!(
    input_end_date_message,
    "Enter the end date (dd.mm.yyyy).",
    "Введите конечную дату (дд.мм.гггг)."
);
message!(
    error_date,
    "The date is not valid. Please use the dd.mm.yyyy format.",
    "Дата недействительна. Пожалуйста, используйте формат дд.мм.гггг."
);
message!(
    choose_stats_categories_message,
    "Choose the categories to include, then press \"Done\".",
    "Выберите категории для статистики, затем нажмите \"Готово\"."
);
message!(
    error_no_categories_selected,
    "No categories selected. Statistics were not generated.",
    "Не выбрано ни одной категории. Статистика не сформирована."
);
message!(
    error_no_statistics,
    "Statistics could not be generated for this selection.",
    "Статистику не удалось сформировать для данного выбора."
);
message!(
    no_expenses_page_message,
    "No expenses in this category for the chosen period.",
    "Нет трат в этой категории за выбранный период."
);

pub(crate) fn input_amount_message(lang: Language, currency: &str) -> String {
    match lang {
        Language::En => format!(
            "Enter the amount spent in {currency}.\n\nTo change the currency, go to the settings."
        ),
        Language::Ru => format!(
            "Введите количество затраченных {currency}.\n\nЕсли хотите изменить валюту, то зайдите в настройки."
        ),
    }
}

pub(crate) fn confirm_expense_message(
    lang: Language,
    name: &str,
    amount: f64,
    currency: &str,
    category: &str,
) -> String {
    match lang {
        Language::En => format!(
            "Add this expense?\n\n{name}: {amount} {currency}\nCategory: {category}"
        ),
        Language::Ru => format!(
            "Добавить эту трату?\n\n{name}: {amount} {currency}\nКатегория: {category}"
        ),
    }
}

/// One statistics page: the category header plus one line per currency.
pub(crate) fn stats_page_text(
    lang: Language,
    category_name: &str,
    totals: &[(String, f64)],
) -> String {
    if totals.is_empty() {
        return format!("{category_name}:\n{}", no_expenses_page_message(lang));
    }
    let lines: Vec<String> = totals
        .iter()
        .map(|(currency, amount)| format!("{amount:.2} {currency}"))
        .collect();
    format!("{category_name}:\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_matchers_accept_both_locales() {
        assert!(is_add_expense_button("Add expense"));
        assert!(is_add_expense_button("Добавить трату"));
        assert!(!is_add_expense_button("Add Expense"));
    }

    #[test]
    fn language_codes_round_trip() {
        for lang in LANGUAGES {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn stats_page_lists_one_line_per_currency() {
        let text = stats_page_text(
            Language::En,
            "Food",
            &[("USD".to_string(), 150.0), ("EUR".to_string(), 9.5)],
        );
        assert_eq!(text, "Food:\n150.00 USD\n9.50 EUR");
    }

    #[test]
    fn empty_bucket_renders_no_expenses_message() {
        let text = stats_page_text(Language::En, "Food", &[]);
        assert!(text.contains("No expenses"));
    }
}
