use crate::domain::favorite::NewFavorite;
use crate::domain::user::Requester;
use crate::repository::errors::RepositoryError;
use crate::repository::{FavoriteWriter, RecipeReader};
use crate::services::users::require_user;
use crate::services::views::{RecipeShortView, recipe_short_view};
use crate::services::{ServiceError, ServiceResult};

/// Marks the recipe as a favorite of the requester.
pub fn add_favorite<R>(
    repo: &R,
    requester: &Requester,
    recipe_id: i32,
) -> ServiceResult<RecipeShortView>
where
    R: RecipeReader + FavoriteWriter + ?Sized,
{
    let user = require_user(requester)?;
    let recipe = repo
        .get_recipe_by_id(recipe_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.add_favorite(&NewFavorite::new(user.id, recipe.id))
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => {
                ServiceError::Conflict("recipe is already in favorites".to_string())
            }
            other => ServiceError::from(other),
        })?;

    Ok(recipe_short_view(&recipe))
}

/// Removes the recipe from the requester's favorites. Succeeds when it was not there.
pub fn remove_favorite<R>(repo: &R, requester: &Requester, recipe_id: i32) -> ServiceResult<()>
where
    R: RecipeReader + FavoriteWriter + ?Sized,
{
    let user = require_user(requester)?;
    if repo.get_recipe_by_id(recipe_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    if !repo.remove_favorite(user.id, recipe_id)? {
        log::debug!("Recipe {recipe_id} was not a favorite of user {}", user.id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures::{sample_recipe, signed_in};

    #[test]
    fn toggles_require_identity() {
        let repo = MockRepository::new();

        assert!(matches!(
            add_favorite(&repo, &Requester::Anonymous, 1),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            remove_favorite(&repo, &Requester::Anonymous, 1),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn add_returns_short_view() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        repo.expect_add_favorite()
            .times(1)
            .withf(|favorite| *favorite == NewFavorite::new(1, 5))
            .returning(|_| Ok(()));

        let view = add_favorite(&repo, &signed_in(1), 5).expect("expected success");

        assert_eq!(view.id, 5);
        assert_eq!(view.name, "Soup");
        assert_eq!(view.cooking_time, 30);
    }

    #[test]
    fn second_add_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        repo.expect_add_favorite()
            .returning(|_| {
                Err(RepositoryError::Conflict(
                    "UNIQUE constraint failed".to_string(),
                ))
            });

        assert!(matches!(
            add_favorite(&repo, &signed_in(1), 5),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn missing_recipe_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id().returning(|_| Ok(None));
        repo.expect_add_favorite().never();
        repo.expect_remove_favorite().never();

        assert!(matches!(
            add_favorite(&repo, &signed_in(1), 5),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            remove_favorite(&repo, &signed_in(1), 5),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        let mut deleted = true;
        repo.expect_remove_favorite().times(2).returning(move |_, _| {
            let result = deleted;
            deleted = false;
            Ok(result)
        });

        assert!(remove_favorite(&repo, &signed_in(1), 5).is_ok());
        assert!(remove_favorite(&repo, &signed_in(1), 5).is_ok());
    }
}
