//! Category endpoints.

use finwise_core::budget::{Category, CategoryQuery, CategoryType, NewCategory};
use finwise_shared::types::UserCategoryId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientResult;
use crate::http::ApiClient;

const MY_CATEGORIES: &str = "/categories/my-categories";
const USER_CATEGORIES: &str = "/categories/user-categories/";

/// Body of `GET /categories/my-categories`.
#[derive(Debug, Deserialize)]
struct MyCategoriesResponse {
    #[serde(default)]
    display_categories: Vec<DisplayCategory>,
}

/// One category as listed for the current user.
#[derive(Debug, Clone, Deserialize)]
struct DisplayCategory {
    user_category_id: UserCategoryId,
    display_name: String,
    #[serde(default)]
    category_type: Option<CategoryType>,
}

impl DisplayCategory {
    fn into_category(self, requested: CategoryType) -> Category {
        Category {
            category_id: self.user_category_id,
            display_name: self.display_name,
            category_type: self.category_type.unwrap_or(requested),
        }
    }
}

/// Body of `POST /categories/user-categories/`.
#[derive(Debug, Serialize)]
struct CreateCategoryRequest<'a> {
    custom_name: &'a str,
    category_type: CategoryType,
}

#[derive(Debug, Deserialize)]
struct CreatedCategory {
    user_category_id: UserCategoryId,
}

impl ApiClient {
    /// Lists the caller's categories.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the request fails or the body is malformed.
    pub async fn list_categories(&self, query: &CategoryQuery) -> ClientResult<Vec<Category>> {
        let response: MyCategoriesResponse =
            self.get_json(MY_CATEGORIES, &query.query_pairs()).await?;
        debug!(count = response.display_categories.len(), "Fetched categories");

        Ok(response
            .display_categories
            .into_iter()
            .map(|c| c.into_category(query.category_type))
            .collect())
    }

    /// Creates a user category and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` if the backend rejects the category.
    pub async fn create_category(&self, category: &NewCategory) -> ClientResult<UserCategoryId> {
        let body = CreateCategoryRequest {
            custom_name: &category.name,
            category_type: category.category_type,
        };
        let created: CreatedCategory = self.post_json(USER_CATEGORIES, &body).await?;
        Ok(created.user_category_id)
    }
}
