//! Menu and dish scenarios
//!
//! Dish attachment, the qualified specials map, and dish removal rules.

use brasserie_domain::{Dish, DishKey, Menu, MenuKey, OrderId};
use brasserie_foundation::ErrorKind;
use chrono::Utc;

use crate::{ana, base_restaurant};

fn lunch() -> MenuKey {
    MenuKey::new("Lunch")
}

fn pho() -> DishKey {
    DishKey::new("Pho")
}

fn setup() -> brasserie_domain::Restaurant {
    let mut restaurant = base_restaurant();
    restaurant
        .add_menu(Menu::new("Lunch", "seasonal", vec!["en".into(), "fr".into()]).unwrap())
        .unwrap();
    restaurant
        .add_dish(Dish::new("Pho", "Vietnamese", 11.0, false, vec!["broth".into()]).unwrap())
        .unwrap();
    restaurant
        .add_dish(Dish::new("Bun", "Vietnamese", 9.0, false, vec!["noodles".into()]).unwrap())
        .unwrap();
    restaurant
}

// =============================================================================
// Attachment
// =============================================================================

#[test]
fn attach_and_detach_keep_both_sides() {
    let mut restaurant = setup();

    restaurant.attach_dish(&lunch(), &pho()).unwrap();
    assert_eq!(restaurant.menus().get(&lunch()).unwrap().dishes(), [pho()]);
    assert_eq!(restaurant.dishes().get(&pho()).unwrap().menu(), Some(&lunch()));

    restaurant.detach_dish(&lunch(), &pho()).unwrap();
    assert!(restaurant.menus().get(&lunch()).unwrap().dishes().is_empty());
    assert_eq!(restaurant.dishes().get(&pho()).unwrap().menu(), None);
}

#[test]
fn detaching_an_unattached_dish_fails() {
    let mut restaurant = setup();

    let result = restaurant.detach_dish(&lunch(), &pho());
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::NotAttached { .. }
    ));
}

#[test]
fn menu_preserves_attachment_order() {
    let mut restaurant = setup();
    restaurant.attach_dish(&lunch(), &DishKey::new("Bun")).unwrap();
    restaurant.attach_dish(&lunch(), &pho()).unwrap();

    assert_eq!(
        restaurant.menus().get(&lunch()).unwrap().dishes(),
        [DishKey::new("Bun"), pho()]
    );
}

// =============================================================================
// Qualified specials
// =============================================================================

#[test]
fn one_dish_per_qualifier_and_one_qualifier_per_dish() {
    let mut restaurant = setup();
    restaurant.attach_dish(&lunch(), &pho()).unwrap();
    restaurant.attach_dish(&lunch(), &DishKey::new("Bun")).unwrap();
    restaurant.bind_special(&lunch(), "Special", &pho()).unwrap();

    // Qualifier taken.
    let result = restaurant.bind_special(&lunch(), "Special", &DishKey::new("Bun"));
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::DuplicateQualifier { .. }
    ));

    // Dish already qualified.
    let result = restaurant.bind_special(&lunch(), "Seasonal", &pho());
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::AlreadyBound { .. }
    ));

    // A different pairing is fine.
    restaurant
        .bind_special(&lunch(), "Seasonal", &DishKey::new("Bun"))
        .unwrap();
}

#[test]
fn rebinding_after_unbind_works() {
    let mut restaurant = setup();
    restaurant.attach_dish(&lunch(), &pho()).unwrap();
    restaurant.bind_special(&lunch(), "Special", &pho()).unwrap();

    let released = restaurant.unbind_special(&lunch(), "Special").unwrap();
    assert_eq!(released, pho());

    restaurant.bind_special(&lunch(), "Seasonal", &pho()).unwrap();
    assert_eq!(
        restaurant.menus().get(&lunch()).unwrap().special("Seasonal"),
        Some(&pho())
    );
}

#[test]
fn unbinding_an_unknown_qualifier_fails() {
    let mut restaurant = setup();
    let result = restaurant.unbind_special(&lunch(), "Special");
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::UnknownQualifier { .. }
    ));
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn removing_a_menu_releases_its_dishes() {
    let mut restaurant = setup();
    restaurant.attach_dish(&lunch(), &pho()).unwrap();
    restaurant.bind_special(&lunch(), "Special", &pho()).unwrap();

    restaurant.remove_menu(&lunch()).unwrap();

    assert!(!restaurant.menus().contains(&lunch()));
    // The dish survives, free to join another menu.
    assert_eq!(restaurant.dishes().get(&pho()).unwrap().menu(), None);
}

#[test]
fn removing_an_ordered_dish_is_blocked_until_lines_go() {
    let mut restaurant = setup();
    restaurant.attach_dish(&lunch(), &pho()).unwrap();
    restaurant.place_order(OrderId(1), Utc::now(), &ana()).unwrap();
    let line = restaurant.add_to_order(OrderId(1), &pho(), 1).unwrap();

    assert!(restaurant.remove_dish(&pho()).is_err());

    restaurant.remove_order_line(line).unwrap();
    restaurant.remove_dish(&pho()).unwrap();
    assert!(restaurant.menus().get(&lunch()).unwrap().dishes().is_empty());
}
