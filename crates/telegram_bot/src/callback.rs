//! Inline-keyboard callback payloads.
//!
//! Every inline button carries one opaque string. Payloads are colon
//! delimited; navigation tokens are scoped per pager so the add-expense
//! picker, the statistics picker and the remove-category picker never
//! receive each other's events.

use engine::Period;

/// Which paginated keyboard a navigation event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pager {
    AddExpenseCategories,
    StatsCategories,
    StatsPages,
    RemoveCategories,
}

impl Pager {
    fn tag(&self) -> &'static str {
        match self {
            Pager::AddExpenseCategories => "addexp_cat",
            Pager::StatsCategories => "stat_cat",
            Pager::StatsPages => "stat_page",
            Pager::RemoveCategories => "rem_cat",
        }
    }

    fn from_tag(tag: &str) -> Option<Pager> {
        match tag {
            "addexp_cat" => Some(Pager::AddExpenseCategories),
            "stat_cat" => Some(Pager::StatsCategories),
            "stat_page" => Some(Pager::StatsPages),
            "rem_cat" => Some(Pager::RemoveCategories),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CallbackPayload {
    /// Language picked during registration or in settings.
    Language(String),
    /// A category button: `category:<id>:<name>`.
    Category { id: i64, name: String },
    NextPage(Pager),
    PrevPage(Pager),
    /// The non-interactive "{page}/{total}" label between the arrows.
    PageLabel,
    Period(Period),
    CustomPeriod,
    EndCategories,
    Confirm,
    Cancel,
}

impl CallbackPayload {
    pub(crate) fn encode(&self) -> String {
        match self {
            CallbackPayload::Language(code) => format!("lang:{code}"),
            CallbackPayload::Category { id, name } => format!("category:{id}:{name}"),
            CallbackPayload::NextPage(pager) => format!("{}:next_page", pager.tag()),
            CallbackPayload::PrevPage(pager) => format!("{}:prev_page", pager.tag()),
            CallbackPayload::PageLabel => "page_label".to_string(),
            CallbackPayload::Period(period) => period.tag().to_string(),
            CallbackPayload::CustomPeriod => "custom_period".to_string(),
            CallbackPayload::EndCategories => "end_categories".to_string(),
            CallbackPayload::Confirm => "confirm".to_string(),
            CallbackPayload::Cancel => "cancel".to_string(),
        }
    }

    pub(crate) fn decode(data: &str) -> Option<CallbackPayload> {
        match data {
            "page_label" => return Some(CallbackPayload::PageLabel),
            "custom_period" => return Some(CallbackPayload::CustomPeriod),
            "end_categories" => return Some(CallbackPayload::EndCategories),
            "confirm" => return Some(CallbackPayload::Confirm),
            "cancel" => return Some(CallbackPayload::Cancel),
            _ => {}
        }
        if let Some(period) = Period::from_tag(data) {
            return Some(CallbackPayload::Period(period));
        }
        if let Some(code) = data.strip_prefix("lang:") {
            return Some(CallbackPayload::Language(code.to_string()));
        }
        if let Some(rest) = data.strip_prefix("category:") {
            let (id, name) = rest.split_once(':')?;
            let id = id.parse().ok()?;
            return Some(CallbackPayload::Category {
                id,
                name: name.to_string(),
            });
        }
        let (tag, action) = data.split_once(':')?;
        let pager = Pager::from_tag(tag)?;
        match action {
            "next_page" => Some(CallbackPayload::NextPage(pager)),
            "prev_page" => Some(CallbackPayload::PrevPage(pager)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_payload_round_trips() {
        let payload = CallbackPayload::Category {
            id: 3,
            name: "Food".to_string(),
        };
        assert_eq!(payload.encode(), "category:3:Food");
        assert_eq!(CallbackPayload::decode("category:3:Food"), Some(payload));
    }

    #[test]
    fn sentinel_category_round_trips() {
        let encoded = CallbackPayload::Category {
            id: engine::ALL_CATEGORIES_ID,
            name: "All".to_string(),
        }
        .encode();
        assert_eq!(
            CallbackPayload::decode(&encoded),
            Some(CallbackPayload::Category {
                id: engine::ALL_CATEGORIES_ID,
                name: "All".to_string(),
            })
        );
    }

    #[test]
    fn category_payload_fits_telegram_callback_limit() {
        // The engine caps category names at 32 bytes; even with the widest
        // possible id the payload stays within Telegram's 64 bytes.
        let payload = CallbackPayload::Category {
            id: i64::MIN,
            name: "x".repeat(32),
        };
        assert!(payload.encode().len() <= 64);
    }

    #[test]
    fn pager_tokens_stay_scoped() {
        let add = CallbackPayload::NextPage(Pager::AddExpenseCategories).encode();
        let rem = CallbackPayload::NextPage(Pager::RemoveCategories).encode();
        assert_ne!(add, rem);
        assert_eq!(
            CallbackPayload::decode(&rem),
            Some(CallbackPayload::NextPage(Pager::RemoveCategories))
        );
    }

    #[test]
    fn period_tags_decode() {
        assert_eq!(
            CallbackPayload::decode("week_period"),
            Some(CallbackPayload::Period(Period::Week))
        );
        assert_eq!(
            CallbackPayload::decode("all_time_period"),
            Some(CallbackPayload::Period(Period::All))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(CallbackPayload::decode("category:x:Food"), None);
        assert_eq!(CallbackPayload::decode("unknown"), None);
        assert_eq!(CallbackPayload::decode("rem_cat:sideways"), None);
    }
}
