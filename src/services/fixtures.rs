use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::recipe::{Recipe, RecipeIngredient};
use crate::domain::tag::Tag;
use crate::domain::user::{Requester, User};

pub fn fixed_datetime() -> NaiveDateTime {
    match NaiveDate::from_ymd_opt(2024, 1, 1) {
        Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
        None => NaiveDateTime::default(),
    }
}

pub fn sample_user(id: i32, username: &str) -> User {
    User {
        id,
        sub: format!("sub-{id}"),
        email: format!("{username}@example.com"),
        username: username.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    }
}

pub fn signed_in(id: i32) -> Requester {
    Requester::User(sample_user(id, &format!("user{id}")))
}

pub fn claims(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        email: "Cook@Example.com".to_string(),
        username: "cook".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Cook".to_string(),
        exp: i64::MAX,
    }
}

pub fn sample_tag(id: i32, slug: &str) -> Tag {
    Tag {
        id,
        name: slug.to_uppercase(),
        color: "#E26C2D".to_string(),
        slug: slug.to_string(),
    }
}

pub fn sample_recipe(id: i32, author_id: i32, name: &str) -> Recipe {
    Recipe {
        id,
        author_id,
        name: name.to_string(),
        text: "Mix and cook.".to_string(),
        cooking_time: 30,
        image: format!("/media/recipes/{id}.png"),
        pub_date: fixed_datetime(),
        tags: vec![sample_tag(1, "lunch")],
        ingredients: vec![
            RecipeIngredient {
                ingredient_id: 1,
                name: "flour".to_string(),
                measurement_unit: "g".to_string(),
                amount: 200,
            },
            RecipeIngredient {
                ingredient_id: 2,
                name: "egg".to_string(),
                measurement_unit: "pcs".to_string(),
                amount: 2,
            },
        ],
    }
}
