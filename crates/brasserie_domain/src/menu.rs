//! Menus and dishes.
//!
//! A menu owns an ordered dish collection and a qualified sub-map from a
//! qualifier string ("Special", "Seasonal", ...) to a single dish. Dishes
//! carry the reverse key back to their menu.

use std::collections::BTreeMap;

use brasserie_foundation::{Error, Result};
use brasserie_registry::Entity;
use serde::{Deserialize, Serialize};

use crate::keys::{DishKey, MenuKey, OrderLineId};

/// A menu: an ordered dish list plus qualified specials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub(crate) name: MenuKey,
    pub(crate) kind: String,
    /// Languages the menu is printed in; multi-valued, duplicate-free,
    /// insertion-ordered.
    pub(crate) languages: Vec<String>,
    pub(crate) dishes: Vec<DishKey>,
    /// Qualifier -> dish.
    pub(crate) specials: BTreeMap<String, DishKey>,
}

impl Menu {
    /// Creates a menu.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name or kind is empty, or no language is
    /// given.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        languages: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        let kind = kind.into();
        if name.trim().is_empty() {
            return Err(Error::validation("menu name cannot be empty"));
        }
        if kind.trim().is_empty() {
            return Err(Error::validation("menu kind cannot be empty"));
        }
        if languages.is_empty() {
            return Err(Error::validation("menu needs at least one language"));
        }
        let mut deduped: Vec<String> = Vec::new();
        for language in languages {
            if !deduped.contains(&language) {
                deduped.push(language);
            }
        }
        Ok(Self {
            name: MenuKey::new(name),
            kind,
            languages: deduped,
            dishes: Vec::new(),
            specials: BTreeMap::new(),
        })
    }

    /// The menu's name key.
    #[must_use]
    pub fn name(&self) -> &MenuKey {
        &self.name
    }

    /// The menu kind label.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Languages in insertion order.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Adds a language if not already present.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the language is blank.
    pub fn add_language(&mut self, language: impl Into<String>) -> Result<()> {
        let language = language.into();
        if language.trim().is_empty() {
            return Err(Error::validation("language cannot be empty"));
        }
        if !self.languages.contains(&language) {
            self.languages.push(language);
        }
        Ok(())
    }

    /// Removes a language.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when removing the last language, `NotFound` if
    /// the language is absent.
    pub fn remove_language(&mut self, language: &str) -> Result<()> {
        let pos = self
            .languages
            .iter()
            .position(|l| l == language)
            .ok_or_else(|| Error::not_found("Language", language))?;
        if self.languages.len() == 1 {
            return Err(Error::validation("menu needs at least one language"));
        }
        self.languages.remove(pos);
        Ok(())
    }

    /// Attached dishes in attachment order.
    #[must_use]
    pub fn dishes(&self) -> &[DishKey] {
        &self.dishes
    }

    /// The dish bound under a qualifier, if any.
    #[must_use]
    pub fn special(&self, qualifier: &str) -> Option<&DishKey> {
        self.specials.get(qualifier)
    }

    /// All qualifier bindings, ordered by qualifier.
    pub fn specials(&self) -> impl Iterator<Item = (&str, &DishKey)> {
        self.specials.iter().map(|(q, d)| (q.as_str(), d))
    }
}

impl Entity for Menu {
    type Key = MenuKey;
    const NAME: &'static str = "Menu";

    fn key(&self) -> MenuKey {
        self.name.clone()
    }
}

/// A dish, keyed by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub(crate) name: DishKey,
    pub(crate) cuisine: String,
    pub(crate) price: f64,
    pub(crate) vegetarian: bool,
    pub(crate) ingredients: Vec<String>,
    /// Back-pointer to the owning menu.
    pub(crate) menu: Option<MenuKey>,
    /// Order lines referencing this dish.
    pub(crate) lines: Vec<OrderLineId>,
}

impl Dish {
    /// Creates a dish.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name or cuisine is empty, the price is
    /// not positive, or no ingredient is given.
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price: f64,
        vegetarian: bool,
        ingredients: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        let cuisine = cuisine.into();
        if name.trim().is_empty() {
            return Err(Error::validation("dish name cannot be empty"));
        }
        if cuisine.trim().is_empty() {
            return Err(Error::validation("dish cuisine cannot be empty"));
        }
        if price <= 0.0 {
            return Err(Error::validation(format!(
                "dish price must be positive, got {price}"
            )));
        }
        if ingredients.is_empty() {
            return Err(Error::validation("dish needs at least one ingredient"));
        }
        let mut deduped: Vec<String> = Vec::new();
        for ingredient in ingredients {
            if !deduped.contains(&ingredient) {
                deduped.push(ingredient);
            }
        }
        Ok(Self {
            name: DishKey::new(name),
            cuisine,
            price,
            vegetarian,
            ingredients: deduped,
            menu: None,
            lines: Vec::new(),
        })
    }

    /// The dish's name key.
    #[must_use]
    pub fn name(&self) -> &DishKey {
        &self.name
    }

    /// Cuisine label.
    #[must_use]
    pub fn cuisine(&self) -> &str {
        &self.cuisine
    }

    /// Menu price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Whether the dish is vegetarian.
    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        self.vegetarian
    }

    /// Ingredients, duplicate-free, in insertion order.
    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// The owning menu, if attached.
    #[must_use]
    pub fn menu(&self) -> Option<&MenuKey> {
        self.menu.as_ref()
    }

    /// Order lines referencing this dish.
    #[must_use]
    pub fn lines(&self) -> &[OrderLineId] {
        &self.lines
    }
}

impl Entity for Dish {
    type Key = DishKey;
    const NAME: &'static str = "Dish";

    fn key(&self) -> DishKey {
        self.name.clone()
    }
}
