use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::domain::recipe::{AuthorFilter, NewRecipe, Recipe, RecipeListQuery, UpdateRecipe};
use crate::domain::user::{Requester, User};
use crate::forms::recipes::{RecipeForm, RecipePayload};
use crate::images::{ImageError, ImageStore};
use crate::pagination::{Paginated, Pagination};
use crate::repository::{IngredientReader, RecipeReader, RecipeWriter, TagReader};
use crate::services::users::require_user;
use crate::services::views::{ProjectionReader, RecipeView, RequesterLookups, recipe_view};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the recipe listing.
///
/// `tags` may repeat (`?tags=breakfast&tags=lunch`), so this is parsed with
/// `serde_html_form` rather than the default query extractor.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    /// Page number requested by the client (1-based).
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Author id or username.
    pub author: Option<String>,
    /// Tag slugs, any of which must match.
    #[serde(default)]
    pub tags: Vec<String>,
    /// `1`/`true` or `0`/`false`.
    pub is_favorited: Option<String>,
    /// `1`/`true` or `0`/`false`.
    pub is_in_shopping_cart: Option<String>,
}

impl RecipeQuery {
    fn into_list_query(
        self,
        requester: &Requester,
        pagination: Pagination,
    ) -> ServiceResult<RecipeListQuery> {
        let mut list_query = RecipeListQuery::new(requester.user_id()).paginate(pagination);

        if let Some(author) = self.author.as_deref().and_then(AuthorFilter::parse) {
            list_query = list_query.author(author);
        }

        let slugs: Vec<String> = self
            .tags
            .iter()
            .map(|slug| slug.trim())
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
            .collect();
        if !slugs.is_empty() {
            list_query = list_query.tags(slugs);
        }

        if let Some(flag) = parse_flag("is_favorited", self.is_favorited.as_deref())? {
            list_query = list_query.favorited(flag);
        }

        let in_shopping_cart =
            parse_flag("is_in_shopping_cart", self.is_in_shopping_cart.as_deref())?;
        if let Some(flag) = in_shopping_cart {
            list_query = list_query.in_shopping_cart(flag);
        }

        Ok(list_query)
    }
}

fn parse_flag(name: &str, raw: Option<&str>) -> ServiceResult<Option<bool>> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    if value == "1" || value.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if value == "0" || value.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(ServiceError::Validation(format!(
            "`{name}` must be 0 or 1, got `{value}`"
        )))
    }
}

/// Filtered, paginated recipes in publish order, projected for the requester.
pub fn load_recipes<R>(
    repo: &R,
    requester: &Requester,
    query: RecipeQuery,
) -> ServiceResult<Paginated<RecipeView>>
where
    R: RecipeReader + ProjectionReader + ?Sized,
{
    let pagination = Pagination::from_query(query.page, query.limit);
    let list_query = query.into_list_query(requester, pagination)?;

    let (total, recipes) = repo.list_recipes(list_query)?;
    let views = project_recipes(repo, requester, recipes)?;

    Ok(Paginated::new(views, total, pagination))
}

pub fn get_recipe<R>(repo: &R, requester: &Requester, recipe_id: i32) -> ServiceResult<RecipeView>
where
    R: RecipeReader + ProjectionReader + ?Sized,
{
    let recipe = repo
        .get_recipe_by_id(recipe_id)?
        .ok_or(ServiceError::NotFound)?;

    project_recipe(repo, requester, recipe)
}

/// Publishes a recipe authored by the requester.
pub fn create_recipe<R, S>(
    repo: &R,
    images: &S,
    requester: &Requester,
    form: RecipeForm,
) -> ServiceResult<RecipeView>
where
    R: RecipeWriter + TagReader + IngredientReader + ProjectionReader + ?Sized,
    S: ImageStore + ?Sized,
{
    let user = require_user(requester)?;

    let (payload, raw_image) = form
        .into_create_payload()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;
    ensure_references_exist(repo, &payload)?;

    let image = store_image(images, &raw_image)?;

    let new_recipe = NewRecipe {
        author_id: user.id,
        name: payload.name,
        text: payload.text,
        cooking_time: payload.cooking_time,
        image,
        tag_ids: payload.tag_ids,
        ingredients: payload.ingredients,
    };

    let created = match repo.create_recipe(&new_recipe) {
        Ok(created) => created,
        Err(err) => {
            discard_image(images, &new_recipe.image);
            return Err(err.into());
        }
    };
    log::info!("User {} published recipe {}", user.id, created.id);

    project_recipe(repo, requester, created)
}

/// Replaces the recipe fields and both association sets. Author only.
pub fn update_recipe<R, S>(
    repo: &R,
    images: &S,
    requester: &Requester,
    recipe_id: i32,
    form: RecipeForm,
) -> ServiceResult<RecipeView>
where
    R: RecipeReader + RecipeWriter + TagReader + IngredientReader + ProjectionReader + ?Sized,
    S: ImageStore + ?Sized,
{
    let user = require_user(requester)?;
    let current = ensure_author(repo, user, recipe_id)?;

    let payload = form
        .into_update_payload()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;
    ensure_references_exist(repo, &payload)?;

    let image = payload
        .image
        .as_deref()
        .map(|raw| store_image(images, raw))
        .transpose()?;

    let updates = UpdateRecipe {
        name: payload.name,
        text: payload.text,
        cooking_time: payload.cooking_time,
        image,
        tag_ids: payload.tag_ids,
        ingredients: payload.ingredients,
    };

    let updated = match repo.update_recipe(recipe_id, &updates) {
        Ok(updated) => updated,
        Err(err) => {
            if let Some(image) = &updates.image {
                discard_image(images, image);
            }
            return Err(err.into());
        }
    };
    if updates.image.is_some() && current.image != updated.image {
        discard_image(images, &current.image);
    }

    project_recipe(repo, requester, updated)
}

/// Deletes the recipe and every relation pointing at it. Author only.
pub fn delete_recipe<R, S>(
    repo: &R,
    images: &S,
    requester: &Requester,
    recipe_id: i32,
) -> ServiceResult<()>
where
    R: RecipeReader + RecipeWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    let user = require_user(requester)?;
    let recipe = ensure_author(repo, user, recipe_id)?;

    repo.delete_recipe(recipe_id)?;
    discard_image(images, &recipe.image);
    log::info!("User {} deleted recipe {recipe_id}", user.id);

    Ok(())
}

fn ensure_author<R>(repo: &R, user: &User, recipe_id: i32) -> ServiceResult<Recipe>
where
    R: RecipeReader + ?Sized,
{
    let recipe = repo
        .get_recipe_by_id(recipe_id)?
        .ok_or(ServiceError::NotFound)?;

    if recipe.author_id != user.id {
        return Err(ServiceError::Forbidden);
    }

    Ok(recipe)
}

/// Every tag and ingredient id of the payload must exist in the catalog.
fn ensure_references_exist<R>(repo: &R, payload: &RecipePayload) -> ServiceResult<()>
where
    R: TagReader + IngredientReader + ?Sized,
{
    let known_tags: HashSet<i32> = repo
        .list_tags_by_ids(&payload.tag_ids)?
        .into_iter()
        .map(|tag| tag.id)
        .collect();
    let missing_tags = missing_ids(payload.tag_ids.iter().copied(), &known_tags);
    if !missing_tags.is_empty() {
        return Err(ServiceError::Validation(format!(
            "unknown tags: {missing_tags}"
        )));
    }

    let ingredient_ids: Vec<i32> = payload
        .ingredients
        .iter()
        .map(|ingredient| ingredient.ingredient_id)
        .collect();
    let known_ingredients: HashSet<i32> = repo
        .list_ingredients_by_ids(&ingredient_ids)?
        .into_iter()
        .map(|ingredient| ingredient.id)
        .collect();
    let missing_ingredients = missing_ids(ingredient_ids.into_iter(), &known_ingredients);
    if !missing_ingredients.is_empty() {
        return Err(ServiceError::Validation(format!(
            "unknown ingredients: {missing_ingredients}"
        )));
    }

    Ok(())
}

fn missing_ids(ids: impl Iterator<Item = i32>, known: &HashSet<i32>) -> String {
    ids.filter(|id| !known.contains(id))
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn store_image<S>(images: &S, raw: &str) -> ServiceResult<String>
where
    S: ImageStore + ?Sized,
{
    images.store(raw).map_err(|err| match err {
        ImageError::Io(io) => {
            log::error!("Failed to write recipe image: {io}");
            ServiceError::Internal("failed to store image".to_string())
        }
        other => ServiceError::Validation(other.to_string()),
    })
}

/// Best effort: a file that cannot be removed is logged and left behind.
fn discard_image<S>(images: &S, reference: &str)
where
    S: ImageStore + ?Sized,
{
    if let Err(err) = images.remove(reference) {
        log::warn!("Failed to remove recipe image {reference}: {err}");
    }
}

fn project_recipe<R>(repo: &R, requester: &Requester, recipe: Recipe) -> ServiceResult<RecipeView>
where
    R: ProjectionReader + ?Sized,
{
    project_recipes(repo, requester, vec![recipe])?
        .pop()
        .ok_or_else(|| ServiceError::Internal("recipe projection is empty".to_string()))
}

/// Resolve authors and requester relations for a batch of recipes, keeping their order.
fn project_recipes<R>(
    repo: &R,
    requester: &Requester,
    recipes: Vec<Recipe>,
) -> ServiceResult<Vec<RecipeView>>
where
    R: ProjectionReader + ?Sized,
{
    if recipes.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<i32> = recipes.iter().map(|recipe| recipe.id).collect();
    let mut author_ids: Vec<i32> = recipes.iter().map(|recipe| recipe.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, User> = repo
        .list_users_by_ids(&author_ids)?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();
    let lookups = RequesterLookups::load(repo, requester, &recipe_ids, &author_ids)?;

    recipes
        .into_iter()
        .map(|recipe| {
            let author = authors.get(&recipe.author_id).ok_or_else(|| {
                ServiceError::Internal(format!(
                    "author {} of recipe {} is missing",
                    recipe.author_id, recipe.id
                ))
            })?;
            Ok(recipe_view(recipe, author, &lookups))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::ingredient::Ingredient;
    use crate::domain::recipe::IngredientAmount;
    use crate::forms::recipes::IngredientAmountForm;
    use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures::{sample_recipe, sample_tag, sample_user, signed_in};

    struct StubImages;

    impl ImageStore for StubImages {
        fn store(&self, payload: &str) -> Result<String, ImageError> {
            if payload == "broken" {
                return Err(ImageError::InvalidEncoding);
            }
            Ok("/media/recipes/stored.png".to_string())
        }

        fn remove(&self, _reference: &str) -> Result<(), ImageError> {
            Ok(())
        }
    }

    /// Stores like `StubImages` and remembers every removed reference.
    #[derive(Default)]
    struct RecordingImages {
        removed: RefCell<Vec<String>>,
    }

    impl ImageStore for RecordingImages {
        fn store(&self, payload: &str) -> Result<String, ImageError> {
            StubImages.store(payload)
        }

        fn remove(&self, reference: &str) -> Result<(), ImageError> {
            self.removed.borrow_mut().push(reference.to_string());
            Ok(())
        }
    }

    fn recipe_form(image: Option<&str>) -> RecipeForm {
        RecipeForm {
            name: "Pancakes".to_string(),
            text: "Whisk and fry.".to_string(),
            cooking_time: 15,
            image: image.map(str::to_string),
            tags: vec![1],
            ingredients: vec![
                IngredientAmountForm { id: 1, amount: 200 },
                IngredientAmountForm { id: 2, amount: 2 },
            ],
        }
    }

    fn expect_catalog(repo: &mut MockRepository) {
        repo.expect_list_tags_by_ids().returning(|ids| {
            Ok(ids
                .iter()
                .filter(|id| **id == 1)
                .map(|id| sample_tag(*id, "lunch"))
                .collect())
        });
        repo.expect_list_ingredients_by_ids().returning(|ids| {
            Ok(ids
                .iter()
                .filter(|id| **id <= 2)
                .map(|id| Ingredient {
                    id: *id,
                    name: format!("ingredient-{id}"),
                    measurement_unit: "g".to_string(),
                })
                .collect())
        });
    }

    fn expect_projection(repo: &mut MockRepository) {
        repo.expect_list_users_by_ids()
            .returning(|ids| Ok(ids.iter().map(|id| sample_user(*id, "chef")).collect()));
        repo.expect_favorited_recipe_ids()
            .returning(|_, _| Ok(HashSet::new()));
        repo.expect_carted_recipe_ids()
            .returning(|_, _| Ok(HashSet::new()));
        repo.expect_subscribed_author_ids()
            .returning(|_, _| Ok(HashSet::new()));
    }

    #[test]
    fn anonymous_listing_ignores_relation_filters() {
        let mut repo = MockRepository::new();
        repo.expect_list_recipes()
            .times(1)
            .withf(|query| {
                assert_eq!(query.requester_id, None);
                assert_eq!(query.author, Some(AuthorFilter::Username("chef".to_string())));
                assert_eq!(query.tags, vec!["breakfast".to_string(), "lunch".to_string()]);
                assert_eq!(query.effective_favorited(), None);
                match &query.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 1);
                        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((1, vec![sample_recipe(3, 2, "Soup")])));
        repo.expect_list_users_by_ids()
            .returning(|ids| Ok(ids.iter().map(|id| sample_user(*id, "chef")).collect()));
        repo.expect_favorited_recipe_ids().never();

        let query = RecipeQuery {
            author: Some("chef".to_string()),
            tags: vec!["breakfast".to_string(), " ".to_string(), "lunch".to_string()],
            is_favorited: Some("1".to_string()),
            ..RecipeQuery::default()
        };

        let page = load_recipes(&repo, &Requester::Anonymous, query).expect("expected success");

        assert_eq!(page.count, 1);
        assert_eq!(page.next, None);
        assert!(!page.results[0].is_favorited);
    }

    #[test]
    fn signed_in_listing_projects_relations() {
        let mut repo = MockRepository::new();
        repo.expect_list_recipes()
            .times(1)
            .withf(|query| query.effective_in_shopping_cart() == Some((1, false)))
            .returning(|_| {
                Ok((
                    9,
                    vec![sample_recipe(7, 2, "Stew"), sample_recipe(6, 3, "Salad")],
                ))
            });
        repo.expect_list_users_by_ids()
            .withf(|ids| *ids == [2, 3])
            .returning(|ids| Ok(ids.iter().map(|id| sample_user(*id, "chef")).collect()));
        repo.expect_favorited_recipe_ids()
            .returning(|_, _| Ok(HashSet::from([6])));
        repo.expect_carted_recipe_ids()
            .returning(|_, _| Ok(HashSet::new()));
        repo.expect_subscribed_author_ids()
            .returning(|_, _| Ok(HashSet::from([3])));

        let query = RecipeQuery {
            page: Some(2),
            limit: Some(2),
            is_in_shopping_cart: Some("false".to_string()),
            ..RecipeQuery::default()
        };

        let page = load_recipes(&repo, &signed_in(1), query).expect("expected success");

        assert_eq!(page.count, 9);
        assert_eq!(page.next, Some(3));
        assert_eq!(page.previous, Some(1));
        let names: Vec<&str> = page.results.iter().map(|view| view.name.as_str()).collect();
        assert_eq!(names, vec!["Stew", "Salad"]);
        assert!(!page.results[0].is_favorited);
        assert!(page.results[1].is_favorited);
        assert!(page.results[1].author.is_subscribed);
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let repo = MockRepository::new();
        let query = RecipeQuery {
            is_favorited: Some("maybe".to_string()),
            ..RecipeQuery::default()
        };

        assert!(matches!(
            load_recipes(&repo, &signed_in(1), query),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn get_recipe_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id().returning(|_| Ok(None));

        assert!(matches!(
            get_recipe(&repo, &Requester::Anonymous, 5),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn create_requires_identity() {
        let repo = MockRepository::new();

        let result = create_recipe(
            &repo,
            &StubImages,
            &Requester::Anonymous,
            recipe_form(Some("png")),
        );

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_stores_image_and_sets_author() {
        let mut repo = MockRepository::new();
        expect_catalog(&mut repo);
        expect_projection(&mut repo);
        repo.expect_create_recipe()
            .times(1)
            .withf(|new_recipe| {
                assert_eq!(new_recipe.author_id, 4);
                assert_eq!(new_recipe.image, "/media/recipes/stored.png");
                assert_eq!(new_recipe.tag_ids, vec![1]);
                assert_eq!(
                    new_recipe.ingredients,
                    vec![IngredientAmount::new(1, 200), IngredientAmount::new(2, 2)]
                );
                true
            })
            .returning(|new_recipe| {
                let mut recipe = sample_recipe(10, new_recipe.author_id, &new_recipe.name);
                recipe.image = new_recipe.image.clone();
                Ok(recipe)
            });

        let view = create_recipe(&repo, &StubImages, &signed_in(4), recipe_form(Some("png")))
            .expect("expected success");

        assert_eq!(view.id, 10);
        assert_eq!(view.author.id, 4);
        assert_eq!(view.image, "/media/recipes/stored.png");
    }

    #[test]
    fn create_rejects_unknown_references() {
        let mut repo = MockRepository::new();
        expect_catalog(&mut repo);
        repo.expect_create_recipe().never();

        let mut form = recipe_form(Some("png"));
        form.ingredients.push(IngredientAmountForm { id: 77, amount: 1 });

        let result = create_recipe(&repo, &StubImages, &signed_in(4), form);

        match result {
            Err(ServiceError::Validation(message)) => assert!(message.contains("77")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_undecodable_image() {
        let mut repo = MockRepository::new();
        expect_catalog(&mut repo);
        repo.expect_create_recipe().never();

        let result = create_recipe(
            &repo,
            &StubImages,
            &signed_in(4),
            recipe_form(Some("broken")),
        );

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_rejects_cooking_time_out_of_range() {
        let repo = MockRepository::new();
        let mut form = recipe_form(Some("png"));
        form.cooking_time = 1441;

        let result = create_recipe(&repo, &StubImages, &signed_in(4), form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn update_by_other_user_is_forbidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        repo.expect_update_recipe().never();

        let result = update_recipe(&repo, &StubImages, &signed_in(5), 3, recipe_form(None));

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn update_with_duplicate_ingredient_leaves_recipe_untouched() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        repo.expect_update_recipe().never();

        let mut form = recipe_form(None);
        form.ingredients.push(IngredientAmountForm { id: 1, amount: 5 });

        let result = update_recipe(&repo, &StubImages, &signed_in(2), 3, form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn update_without_image_keeps_stored_one() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        expect_catalog(&mut repo);
        expect_projection(&mut repo);
        repo.expect_update_recipe()
            .times(1)
            .withf(|recipe_id, updates| {
                assert_eq!(*recipe_id, 3);
                assert_eq!(updates.image, None);
                assert_eq!(updates.name, "Pancakes");
                true
            })
            .returning(|recipe_id, updates| Ok(sample_recipe(recipe_id, 2, &updates.name)));

        let view = update_recipe(&repo, &StubImages, &signed_in(2), 3, recipe_form(None))
            .expect("expected success");

        assert_eq!(view.name, "Pancakes");
        assert_eq!(view.image, "/media/recipes/3.png");
    }

    #[test]
    fn delete_checks_authorship() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        repo.expect_delete_recipe()
            .times(1)
            .withf(|recipe_id| *recipe_id == 3)
            .returning(|_| Ok(()));

        assert!(matches!(
            delete_recipe(&repo, &StubImages, &signed_in(8), 3),
            Err(ServiceError::Forbidden)
        ));
        assert!(delete_recipe(&repo, &StubImages, &signed_in(2), 3).is_ok());
    }

    #[test]
    fn failed_create_removes_stored_image() {
        let mut repo = MockRepository::new();
        expect_catalog(&mut repo);
        repo.expect_create_recipe()
            .times(1)
            .returning(|_| Err(RepositoryError::ForeignKey("author".to_string())));
        let images = RecordingImages::default();

        let result = create_recipe(&repo, &images, &signed_in(4), recipe_form(Some("png")));

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(
            *images.removed.borrow(),
            vec!["/media/recipes/stored.png".to_string()]
        );
    }

    #[test]
    fn failed_update_removes_new_image_and_keeps_old_one() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        expect_catalog(&mut repo);
        repo.expect_update_recipe()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));
        let images = RecordingImages::default();

        let result = update_recipe(&repo, &images, &signed_in(2), 3, recipe_form(Some("png")));

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert_eq!(
            *images.removed.borrow(),
            vec!["/media/recipes/stored.png".to_string()]
        );
    }

    #[test]
    fn replaced_image_is_removed_after_update() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        expect_catalog(&mut repo);
        expect_projection(&mut repo);
        repo.expect_update_recipe().returning(|recipe_id, updates| {
            let mut recipe = sample_recipe(recipe_id, 2, &updates.name);
            if let Some(image) = &updates.image {
                recipe.image = image.clone();
            }
            Ok(recipe)
        });
        let images = RecordingImages::default();

        let view = update_recipe(&repo, &images, &signed_in(2), 3, recipe_form(Some("png")))
            .expect("expected success");

        assert_eq!(view.image, "/media/recipes/stored.png");
        assert_eq!(
            *images.removed.borrow(),
            vec!["/media/recipes/3.png".to_string()]
        );

        let untouched = RecordingImages::default();
        update_recipe(&repo, &untouched, &signed_in(2), 3, recipe_form(None))
            .expect("expected success");
        assert!(untouched.removed.borrow().is_empty());
    }

    #[test]
    fn delete_removes_the_recipe_image() {
        let mut repo = MockRepository::new();
        repo.expect_get_recipe_by_id()
            .returning(|id| Ok(Some(sample_recipe(id, 2, "Soup"))));
        repo.expect_delete_recipe().returning(|_| Ok(()));
        let images = RecordingImages::default();

        delete_recipe(&repo, &images, &signed_in(2), 3).expect("author may delete");

        assert_eq!(
            *images.removed.borrow(),
            vec!["/media/recipes/3.png".to_string()]
        );
    }
}
