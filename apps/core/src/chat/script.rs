//! Scripted chatbot content (`chatbot.json`).

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::locale::{Locale, Localized};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatScript {
    /// First message of every conversation
    pub greeting: Localized<String>,
    /// Fixed reply to a crisis signal
    pub crisis: Localized<String>,
    /// Pool the non-crisis replies are drawn from
    pub supportive: Localized<Vec<String>>,
    pub crisis_keywords: Localized<Vec<String>>,
}

impl ChatScript {
    pub fn validate(&self) -> Result<(), AppError> {
        for locale in self.supportive.locales() {
            if self.supportive.get(locale).is_empty() {
                return Err(AppError::ConfigurationGap(format!(
                    "supportive response pool for {} is empty",
                    locale
                )));
            }
        }
        if self.crisis_keywords.get(Locale::English).is_empty() {
            return Err(AppError::ConfigurationGap(
                "english crisis keyword list is empty".to_string(),
            ));
        }
        Ok(())
    }
}
