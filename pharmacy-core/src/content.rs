//! Marketing content: offers, home-page features and testimonials.
use crate::language::Localized;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: u32,
    pub title: Localized,
    pub description: Localized,
    /// `"33%"` style percentage or `"Free"`.
    pub discount: String,
    pub valid_until: NaiveDate,
    pub image: String,
    pub category: Localized,
    /// Absent for offers that apply to every category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Corner badge of an offer card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferBadge {
    Free,
    Off(String),
}

impl Offer {
    /// Whole days until the offer ends, rounded up. The offer ends at the
    /// start of its `valid_until` date (UTC).
    #[must_use]
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        let Some(end) = self.valid_until.and_hms_opt(0, 0, 0) else {
            return 0;
        };
        let secs = (end.and_utc() - now).num_seconds();
        secs / SECS_PER_DAY + i64::from(secs % SECS_PER_DAY > 0)
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.days_left(now) <= 0
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.discount.eq_ignore_ascii_case("free")
    }

    #[must_use]
    pub fn badge(&self) -> OfferBadge {
        if self.is_free() {
            OfferBadge::Free
        } else {
            OfferBadge::Off(self.discount.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub icon: String,
    pub title: Localized,
    pub description: Localized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: Localized,
    pub text: Localized,
    pub rating: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub offers: Vec<Offer>,
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
}

impl SiteContent {
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is malformed.
    pub fn load_from_static() -> Result<Self, serde_json::Error> {
        serde_json::from_str(include_str!("../data/content.json"))
    }

    pub fn featured_offers(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter().filter(|offer| offer.featured)
    }

    pub fn regular_offers(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter().filter(|offer| !offer.featured)
    }
}
