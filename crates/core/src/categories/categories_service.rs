use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::constants::{CATEGORY_NAME_MAX_LEN, CATEGORY_NAME_MIN_LEN};
use crate::errors::{Error, Result};

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { category_repo }
    }

    fn normalize_name(name: &str) -> Result<String> {
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if !(CATEGORY_NAME_MIN_LEN..=CATEGORY_NAME_MAX_LEN).contains(&len) {
            return Err(Error::invalid_input(format!(
                "Category name must be between {} and {} characters",
                CATEGORY_NAME_MIN_LEN, CATEGORY_NAME_MAX_LEN
            )));
        }
        Ok(trimmed.to_string())
    }

    fn ensure_unique_name(&self, user_id: &str, name: &str, exclude: Option<&str>) -> Result<()> {
        let wanted = name.to_lowercase();
        let duplicate = self
            .category_repo
            .get_categories(user_id)?
            .iter()
            .any(|c| c.name.to_lowercase() == wanted && exclude != Some(c.id.as_str()));
        if duplicate {
            return Err(Error::ConstraintViolation(format!(
                "Category '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.category_repo.get_categories(user_id)
    }

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category> {
        self.category_repo
            .get_category_by_id(user_id, category_id)?
            .ok_or_else(|| Error::NotFound(format!("Category {}", category_id)))
    }

    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        let name = Self::normalize_name(&new_category.name)?;
        self.ensure_unique_name(user_id, &name, None)?;

        let category = NewCategory {
            id: new_category.id,
            user_id: user_id.to_string(),
            name,
            icon_name: new_category.icon_name,
        };
        let created = self.category_repo.create_category(category).await?;
        debug!("Created category {} for user {}", created.id, user_id);
        Ok(created)
    }

    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        // Existence check keeps the error a 404 rather than a storage failure
        self.get_category(user_id, category_id)?;

        let name = match update.name {
            Some(ref raw) => {
                let name = Self::normalize_name(raw)?;
                self.ensure_unique_name(user_id, &name, Some(category_id))?;
                Some(name)
            }
            None => None,
        };

        self.category_repo
            .update_category(
                user_id,
                category_id,
                CategoryUpdate {
                    name,
                    icon_name: update.icon_name,
                },
            )
            .await
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize> {
        self.get_category(user_id, category_id)?;
        let references = self.category_repo.count_references(user_id, category_id)?;
        if references > 0 {
            return Err(Error::ConstraintViolation(format!(
                "Category {} is still used by {} expense(s) or budget(s)",
                category_id, references
            )));
        }
        self.category_repo.delete_category(user_id, category_id).await
    }
}
