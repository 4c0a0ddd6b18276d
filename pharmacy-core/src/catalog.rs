//! Static product catalog: categories, products, search and the price book.
use crate::constants::{DEFAULT_PRICE_MAX_EGP, DEFAULT_PRICE_MIN_EGP};
use crate::error::PharmacyError;
use crate::language::{Language, Localized};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: String,
    pub name: Localized,
    pub icon: String,
    pub product_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: Localized,
    pub brand: String,
    pub category_slug: String,
    pub category: Localized,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
    pub in_stock: bool,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Localized>,
}

impl Product {
    /// Whole-percent discount against the original price, if one is listed.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        self.original_price
            .and_then(|original| discount_percent(original, self.price))
    }

    /// Case-insensitive match on the English name, brand and category, plus
    /// a plain substring match on the Arabic name and category.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim();
        if needle.is_empty() {
            return true;
        }
        let lowered = needle.to_lowercase();
        self.name.en.to_lowercase().contains(&lowered)
            || self.brand.to_lowercase().contains(&lowered)
            || self.category.en.to_lowercase().contains(&lowered)
            || self.name.ar.contains(needle)
            || self.category.ar.contains(needle)
    }
}

/// `round((original - price) / original * 100)`; `None` when there is no saving.
#[must_use]
pub fn discount_percent(original: Money, price: Money) -> Option<u32> {
    if !original.is_positive() || price >= original {
        return None;
    }
    let saved = original.piastres() - price.piastres();
    let percent = (saved * 100 + original.piastres() / 2) / original.piastres();
    u32::try_from(percent).ok()
}

/// Category URL slug: lower-cased with spaces turned into dashes.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Name, Self::PriceLow, Self::PriceHigh, Self::Rating];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Name => "category.sort_name",
            Self::PriceLow => "category.sort_price_low",
            Self::PriceHigh => "category.sort_price_high",
            Self::Rating => "category.sort_rating",
        }
    }
}

/// Filters and ordering of the category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub sort: SortKey,
    pub min_price: Money,
    pub max_price: Money,
    /// Empty means every brand.
    pub brands: BTreeSet<String>,
    pub in_stock_only: bool,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            min_price: Money::from_pounds(DEFAULT_PRICE_MIN_EGP),
            max_price: Money::from_pounds(DEFAULT_PRICE_MAX_EGP),
            brands: BTreeSet::new(),
            in_stock_only: false,
        }
    }
}

impl ProductQuery {
    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        (self.min_price..=self.max_price).contains(&product.price)
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
            && (!self.in_stock_only || product.in_stock)
    }

    /// Filter and sort; names compare in the active language.
    #[must_use]
    pub fn apply<'a>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
        lang: Language,
    ) -> Vec<&'a Product> {
        let mut picked: Vec<&Product> = products.into_iter().filter(|p| self.admits(p)).collect();
        picked.sort_by(|a, b| self.compare(a, b, lang));
        picked
    }

    fn compare(&self, a: &Product, b: &Product, lang: Language) -> Ordering {
        match self.sort {
            SortKey::Name => a.name.pick(lang).cmp(b.name.pick(lang)),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
        }
    }

    /// Flip a brand in or out of the filter set.
    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.brands.remove(brand) {
            self.brands.insert(brand.to_string());
        }
    }
}

/// Categories, products and the ids managed on the price-update screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    #[serde(default)]
    pub price_book: Vec<String>,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is malformed.
    pub fn load_from_static() -> Result<Self, serde_json::Error> {
        Self::from_json(include_str!("../data/catalog.json"))
    }

    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.slug == slug)
    }

    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    fn product_mut(&mut self, id: &str) -> Result<&mut Product, PharmacyError> {
        self.products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| PharmacyError::NotFound {
                kind: "product",
                id: id.to_string(),
            })
    }

    /// Every product for an empty query, otherwise the matching ones.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches(query)).collect()
    }

    /// `found` with every product replaced by this catalog's current copy.
    #[must_use]
    pub fn refreshed(&self, found: &[Product]) -> Vec<Product> {
        found
            .iter()
            .map(|product| self.product(&product.id).unwrap_or(product).clone())
            .collect()
    }

    pub fn in_category<'a>(&'a self, slug: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |product| product.category_slug == slug)
    }

    /// Distinct brands in a category, alphabetical.
    #[must_use]
    pub fn brands_in<'a>(&'a self, slug: &str) -> Vec<&'a str> {
        self.products
            .iter()
            .filter(|product| product.category_slug == slug)
            .map(|product| product.brand.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Price-book medicines matching `query`, in price-book order.
    #[must_use]
    pub fn price_book(&self, query: &str) -> Vec<&Product> {
        self.price_book
            .iter()
            .filter_map(|id| self.product(id))
            .filter(|product| product.matches(query))
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`PharmacyError::InvalidPrice`] for zero or negative prices and
    /// [`PharmacyError::NotFound`] for unknown ids.
    pub fn update_price(&mut self, id: &str, price: Money) -> Result<&Product, PharmacyError> {
        if !price.is_positive() {
            return Err(PharmacyError::InvalidPrice);
        }
        let product = self.product_mut(id)?;
        log::info!("price of {id} changed from {} to {price}", product.price);
        product.price = price;
        Ok(product)
    }

    /// Flip availability and return the new in-stock flag.
    ///
    /// # Errors
    ///
    /// Returns [`PharmacyError::NotFound`] for unknown ids.
    pub fn toggle_stock(&mut self, id: &str) -> Result<bool, PharmacyError> {
        let product = self.product_mut(id)?;
        product.in_stock = !product.in_stock;
        Ok(product.in_stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::load_from_static().expect("embedded catalog parses")
    }

    #[test]
    fn static_catalog_has_expected_tables() {
        let catalog = catalog();
        assert_eq!(catalog.categories.len(), 7);
        assert_eq!(catalog.price_book.len(), 6);
        for category in &catalog.categories {
            assert_eq!(category.slug, slugify(&category.name.en));
        }
        for id in &catalog.price_book {
            assert!(catalog.product(id).is_some(), "price book id {id}");
        }
    }

    #[test]
    fn discount_rounds_to_whole_percent() {
        assert_eq!(
            discount_percent(Money::from_pounds(30), Money::from_pounds(25)),
            Some(17)
        );
        assert_eq!(
            discount_percent(Money::from_pounds(180), Money::from_pounds(150)),
            Some(17)
        );
        assert_eq!(
            discount_percent(Money::from_pounds(200), Money::from_pounds(180)),
            Some(10)
        );
        assert_eq!(
            discount_percent(Money::from_pounds(20), Money::from_pounds(20)),
            None
        );
        let catalog = catalog();
        assert_eq!(
            catalog.product("amoxicillin-500").unwrap().discount_percent(),
            None
        );
        assert_eq!(
            catalog.product("panadol-extra").unwrap().discount_percent(),
            Some(17)
        );
    }

    #[test]
    fn search_matches_both_languages() {
        let catalog = catalog();
        assert_eq!(catalog.search("   ").len(), catalog.products.len());
        let hits: Vec<_> = catalog.search("VITAMIN").iter().map(|p| p.id.as_str()).collect();
        assert!(hits.contains(&"vitamin-d3"));
        assert!(hits.contains(&"multivitamin-complex"));
        let arabic: Vec<_> = catalog.search("بنادول").iter().map(|p| p.id.clone()).collect();
        assert_eq!(arabic, ["panadol-extra"]);
        assert!(catalog.search("gsk").iter().any(|p| p.id == "panadol-extra"));
        assert!(catalog.search("zzz-no-such").is_empty());
    }

    #[test]
    fn query_filters_then_sorts() {
        let catalog = catalog();
        let slug = "vitamins-&-supplements";
        let mut query = ProductQuery {
            sort: SortKey::PriceLow,
            ..ProductQuery::default()
        };
        let prices: Vec<_> = query
            .apply(catalog.in_category(slug), Language::En)
            .iter()
            .map(|p| p.price)
            .collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(prices.len(), 6);

        query.in_stock_only = true;
        query.max_price = Money::from_pounds(150);
        let ids: Vec<_> = query
            .apply(catalog.in_category(slug), Language::En)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(
            ids,
            ["zinc-supplement", "iron-supplement", "calcium-magnesium", "vitamin-d3"]
        );

        query.toggle_brand("VitaMax");
        query.in_stock_only = false;
        query.max_price = Money::from_pounds(1000);
        let only: Vec<_> = query.apply(catalog.in_category(slug), Language::En);
        assert_eq!(only.len(), 1);
        query.toggle_brand("VitaMax");
        assert!(query.brands.is_empty());
    }

    #[test]
    fn rating_sort_is_descending() {
        let catalog = catalog();
        let query = ProductQuery {
            sort: SortKey::Rating,
            ..ProductQuery::default()
        };
        let sorted = query.apply(&catalog.products, Language::En);
        assert_eq!(sorted[0].id, "multivitamin-complex");
        assert_eq!(SortKey::parse("price-high"), Some(SortKey::PriceHigh));
    }

    #[test]
    fn price_updates_reject_non_positive_values() {
        let mut catalog = catalog();
        assert!(matches!(
            catalog.update_price("panadol-extra", Money::ZERO),
            Err(PharmacyError::InvalidPrice)
        ));
        let updated = catalog
            .update_price("panadol-extra", Money::from_piastres(2750))
            .unwrap();
        assert_eq!(updated.price.to_string(), "27.50 EGP");
        assert!(matches!(
            catalog.update_price("ghost", Money::from_pounds(5)),
            Err(PharmacyError::NotFound { .. })
        ));
        assert!(catalog.toggle_stock("cetaphil-cleanser").unwrap());
        assert_eq!(catalog.price_book("sanofi").len(), 1);
        assert_eq!(catalog.price_book("").len(), 6);
    }

    #[test]
    fn brands_are_distinct_and_sorted() {
        let catalog = catalog();
        let brands = catalog.brands_in("vitamins-&-supplements");
        assert_eq!(brands.first(), Some(&"BoneStrong"));
        assert_eq!(brands.len(), 6);
    }

    #[test]
    fn brands_outlive_the_slug_they_were_looked_up_with() {
        let catalog = catalog();
        let brands = {
            let slug = String::from("vitamins-&-supplements");
            catalog.brands_in(&slug)
        };
        assert!(brands.contains(&"BoneStrong"));
    }
}
