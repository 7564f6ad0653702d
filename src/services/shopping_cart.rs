use crate::domain::shopping_cart::NewShoppingCartEntry;
use crate::domain::shopping_list::ShoppingList;
use crate::domain::user::Requester;
use crate::repository::errors::RepositoryError;
use crate::repository::{RecipeReader, ShoppingCartReader, ShoppingCartWriter};
use crate::services::users::require_user;
use crate::services::views::{RecipeShortView, recipe_short_view};
use crate::services::{ServiceError, ServiceResult};

/// File name offered to the browser for the downloaded list.
pub const SHOPPING_LIST_FILE_NAME: &str = "shopping_cart.txt";

pub fn add_to_shopping_cart<R>(
    repo: &R,
    requester: &Requester,
    recipe_id: i32,
) -> ServiceResult<RecipeShortView>
where
    R: RecipeReader + ShoppingCartWriter + ?Sized,
{
    let user = require_user(requester)?;
    let recipe = repo
        .get_recipe_by_id(recipe_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.add_to_shopping_cart(&NewShoppingCartEntry::new(user.id, recipe.id))
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => {
                ServiceError::Conflict("recipe is already in the shopping cart".to_string())
            }
            other => ServiceError::from(other),
        })?;

    Ok(recipe_short_view(&recipe))
}

/// Takes the recipe out of the cart. Succeeds when it was not there.
pub fn remove_from_shopping_cart<R>(
    repo: &R,
    requester: &Requester,
    recipe_id: i32,
) -> ServiceResult<()>
where
    R: RecipeReader + ShoppingCartWriter + ?Sized,
{
    let user = require_user(requester)?;
    if repo.get_recipe_by_id(recipe_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.remove_from_shopping_cart(user.id, recipe_id)?;

    Ok(())
}

/// Every ingredient across the requester's cart, grouped by name and summed.
pub fn download_shopping_list<R>(repo: &R, requester: &Requester) -> ServiceResult<ShoppingList>
where
    R: ShoppingCartReader + ?Sized,
{
    let user = require_user(requester)?;
    let rows = repo.list_cart_ingredients(user.id)?;

    Ok(ShoppingList::aggregate(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shopping_list::CartIngredient;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures::{sample_recipe, signed_in};

    #[test]
    fn add_twice_conflicts() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        let mut calls = 0;
        repo.expect_add_to_shopping_cart()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Ok(())
                } else {
                    Err(RepositoryError::Conflict("UNIQUE constraint failed".to_string()))
                }
            });

        assert!(add_to_shopping_cart(&repo, &signed_in(1), 5).is_ok());
        assert!(matches!(
            add_to_shopping_cart(&repo, &signed_in(1), 5),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn remove_unknown_recipe_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id().returning(|_| Ok(None));

        assert!(matches!(
            remove_from_shopping_cart(&repo, &signed_in(1), 42),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn download_aggregates_cart_rows() {
        let mut repo = MockRepository::new();
        repo.expect_list_cart_ingredients()
            .times(1)
            .withf(|user_id| *user_id == 1)
            .returning(|_| {
                Ok(vec![
                    CartIngredient::new(1, "Flour", "g", 200),
                    CartIngredient::new(1, "Egg", "pcs", 2),
                    CartIngredient::new(2, "Flour", "g", 100),
                    CartIngredient::new(2, "Milk", "ml", 250),
                ])
            });

        let list = download_shopping_list(&repo, &signed_in(1)).expect("expected success");

        assert_eq!(
            list.to_string(),
            "Egg - 2 pcs\nFlour - 300 g\nMilk - 250 ml\n"
        );
    }

    #[test]
    fn download_requires_identity() {
        let repo = MockRepository::new();

        assert!(matches!(
            download_shopping_list(&repo, &Requester::Anonymous),
            Err(ServiceError::Unauthorized)
        ));
    }
}
